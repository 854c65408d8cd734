use thiserror::Error;

/// Errors from the outbound transport. These never roll back a persisted
/// state transition; callers log and move on.
#[derive(Debug, Error)]
pub enum SmsError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("twilio api error ({status}): {body}")]
    Api { status: u16, body: String },
}
