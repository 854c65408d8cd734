use serde::{Deserialize, Serialize};
use std::fmt;

/// What a sitter asked to do while we wait for them to pick a booking by
/// number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplyAction {
    Accept,
    Decline,
}

impl fmt::Display for ReplyAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReplyAction::Accept => write!(f, "accept"),
            ReplyAction::Decline => write!(f, "decline"),
        }
    }
}

/// A registered babysitter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sitter {
    /// Lowercased first name, used as the registry key.
    pub name: String,
    /// Phone number in E.164 form ("+1612…").
    pub address: String,
    /// Set while a bare yes/no is waiting on a numeric pick between several
    /// pending offers; cleared as soon as the pick lands.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pending_action: Option<ReplyAction>,
}

impl Sitter {
    /// "amy" → "Amy", for user-facing strings.
    pub fn display_name(&self) -> String {
        display_name(&self.name)
    }
}

/// Capitalize a stored (lowercased) name for display.
pub fn display_name(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_capitalizes() {
        assert_eq!(display_name("amy"), "Amy");
        assert_eq!(display_name(""), "");
    }

    #[test]
    fn pending_action_omitted_when_none() {
        let sitter = Sitter {
            name: "amy".into(),
            address: "+16125550101".into(),
            pending_action: None,
        };
        let json = serde_json::to_string(&sitter).unwrap();
        assert!(!json.contains("pending_action"));
    }
}
