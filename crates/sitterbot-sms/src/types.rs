use serde::{Deserialize, Serialize};

/// A text message received from the transport webhook.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InboundSms {
    /// Sender address in E.164 form, the sole identity signal.
    pub from: String,
    pub body: String,
}

/// A text message to deliver.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutboundSms {
    pub to: String,
    pub body: String,
}
