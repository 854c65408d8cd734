use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::error::SmsError;
use crate::transport::SmsSender;
use crate::types::OutboundSms;

/// Sender backed by the Twilio Messages REST API.
#[derive(Debug, Clone)]
pub struct TwilioSender {
    http: Client,
    account_sid: String,
    auth_token: String,
    from: String,
}

impl TwilioSender {
    pub fn new(account_sid: String, auth_token: String, from: String) -> Self {
        Self {
            http: Client::new(),
            account_sid,
            auth_token,
            from,
        }
    }

    fn messages_url(&self) -> String {
        format!(
            "https://api.twilio.com/2010-04-01/Accounts/{}/Messages.json",
            self.account_sid
        )
    }
}

#[async_trait]
impl SmsSender for TwilioSender {
    async fn send(&self, msg: &OutboundSms) -> Result<(), SmsError> {
        let form = [
            ("To", msg.to.as_str()),
            ("From", self.from.as_str()),
            ("Body", msg.body.as_str()),
        ];
        let response = self
            .http
            .post(self.messages_url())
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .form(&form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SmsError::Api {
                status: status.as_u16(),
                body,
            });
        }
        debug!(to = %msg.to, "sms sent");
        Ok(())
    }
}
