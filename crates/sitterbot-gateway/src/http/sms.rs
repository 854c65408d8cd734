//! Twilio inbound webhook — POST /sms.
//!
//! Twilio posts application/x-www-form-urlencoded fields; `From` and `Body`
//! are all the bot needs. The response is TwiML: a `<Message>` element
//! becomes the reply text, an empty `<Response/>` sends nothing.

use axum::{extract::State, http::header, response::IntoResponse, Form};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{error, info};

use sitterbot_sms::InboundSms;

use crate::app::AppState;

#[derive(Debug, Deserialize)]
pub struct TwilioForm {
    #[serde(rename = "From")]
    pub from: String,
    #[serde(rename = "Body")]
    pub body: String,
}

pub async fn sms_handler(
    State(state): State<Arc<AppState>>,
    Form(form): Form<TwilioForm>,
) -> impl IntoResponse {
    info!(from = %form.from, "inbound sms");
    let inbound = InboundSms {
        from: form.from,
        body: form.body,
    };

    let reply = match state.dispatcher.handle(&inbound).await {
        Ok(reply) => reply,
        Err(e) => {
            error!("failed to handle inbound sms: {e}");
            Some("Sorry, something went wrong on my end.  Please try again.".to_string())
        }
    };

    (
        [(header::CONTENT_TYPE, "application/xml")],
        twiml(reply.as_deref()),
    )
}

/// Render the TwiML reply document.
fn twiml(message: Option<&str>) -> String {
    match message {
        Some(text) => format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?><Response><Message>{}</Message></Response>",
            xml_escape(text)
        ),
        None => "<?xml version=\"1.0\" encoding=\"UTF-8\"?><Response/>".to_string(),
    }
}

fn xml_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_is_wrapped_and_escaped() {
        let doc = twiml(Some("drop-off & pick-up <5pm>"));
        assert_eq!(
            doc,
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?><Response><Message>drop-off &amp; pick-up &lt;5pm&gt;</Message></Response>"
        );
    }

    #[test]
    fn no_reply_is_an_empty_response() {
        assert_eq!(
            twiml(None),
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?><Response/>"
        );
    }
}
