//! Recording sender used by scheduler, bot and gateway tests.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::SmsError;
use crate::transport::SmsSender;
use crate::types::OutboundSms;

/// Collects outbound messages instead of delivering them.
#[derive(Debug, Default)]
pub struct MemorySender {
    sent: Mutex<Vec<OutboundSms>>,
}

impl MemorySender {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything sent so far, in order.
    pub fn sent(&self) -> Vec<OutboundSms> {
        self.sent.lock().unwrap().clone()
    }

    /// Bodies of messages sent to one address, in order.
    pub fn bodies_to(&self, to: &str) -> Vec<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.to == to)
            .map(|m| m.body.clone())
            .collect()
    }
}

#[async_trait]
impl SmsSender for MemorySender {
    async fn send(&self, msg: &OutboundSms) -> Result<(), SmsError> {
        self.sent.lock().unwrap().push(msg.clone());
        Ok(())
    }
}
