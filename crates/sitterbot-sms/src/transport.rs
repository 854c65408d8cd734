use async_trait::async_trait;
use tracing::warn;

use crate::error::SmsError;
use crate::types::OutboundSms;

/// Common interface implemented by every outbound sender (Twilio, the
/// log-only fallback, the recording test double).
///
/// Implementations must be `Send + Sync` so one sender can be shared by the
/// scheduler task and the webhook handlers.
#[async_trait]
pub trait SmsSender: Send + Sync {
    /// Deliver a single message. A failure is reported to the caller and
    /// must never undo persisted state.
    async fn send(&self, msg: &OutboundSms) -> Result<(), SmsError>;
}

/// Fire-and-forget send: a failure is logged with the recipient, nothing
/// else happens.
pub async fn send_or_log(sender: &dyn SmsSender, to: &str, body: String) {
    let msg = OutboundSms {
        to: to.to_string(),
        body,
    };
    if let Err(e) = sender.send(&msg).await {
        warn!(to = %msg.to, "outbound send failed: {e}");
    }
}
