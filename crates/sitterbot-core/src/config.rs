use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

/// Scheduler tick cadence when the config does not say otherwise, seconds.
pub const DEFAULT_TICK_SECS: u64 = 5;
/// How long a pending offer blocks the next sitter, minutes.
pub const DEFAULT_TIMEOUT_MINUTES: i64 = 120;
pub const DEFAULT_PORT: u16 = 8700;
pub const DEFAULT_BIND: &str = "127.0.0.1";

/// Top-level config (sitterbot.toml + SITTERBOT_* env overrides).
///
/// `booker` and `twilio.from` have no defaults: a deployment without them
/// cannot route anything, so extraction fails at start-up.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SitterbotConfig {
    pub booker: BookerConfig,
    pub twilio: TwilioConfig,
    #[serde(default)]
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub offers: OffersConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookerConfig {
    /// The booker's phone number, the only address allowed to manage the
    /// sitter list and request bookings.
    pub address: String,
    /// Country calling code prepended to 10-digit sitter numbers (e.g. "1").
    pub country: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TwilioConfig {
    /// The bot's own number, the From field on every outbound message.
    pub from: String,
    /// Account SID. When either credential is absent, outbound messages are
    /// logged instead of sent.
    pub sid: Option<String>,
    pub token: Option<String>,
}

impl TwilioConfig {
    /// Both credentials, or `None` when the transport should run in
    /// log-only mode.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (self.sid.as_deref(), self.token.as_deref()) {
            (Some(sid), Some(token)) => Some((sid, token)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_db_path")]
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OffersConfig {
    /// Scheduler tick interval, seconds.
    #[serde(default = "default_tick_secs")]
    pub tick_secs: u64,
    /// Minutes a pending offer is left outstanding before the next sitter
    /// becomes eligible.
    #[serde(default = "default_timeout_minutes")]
    pub timeout_minutes: i64,
}

impl Default for OffersConfig {
    fn default() -> Self {
        Self {
            tick_secs: default_tick_secs(),
            timeout_minutes: default_timeout_minutes(),
        }
    }
}

fn default_bind() -> String {
    DEFAULT_BIND.to_string()
}
fn default_port() -> u16 {
    DEFAULT_PORT
}
fn default_tick_secs() -> u64 {
    DEFAULT_TICK_SECS
}
fn default_timeout_minutes() -> i64 {
    DEFAULT_TIMEOUT_MINUTES
}
fn default_db_path() -> String {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    format!("{}/.sitterbot/sitterbot.db", home)
}

impl SitterbotConfig {
    /// Load config from a TOML file with SITTERBOT_* env var overrides.
    ///
    /// Missing required values (booker address/country, bot-from number)
    /// fail extraction here, before anything else starts.
    pub fn load(config_path: Option<&str>) -> crate::error::Result<Self> {
        let path = config_path.unwrap_or("sitterbot.toml");

        let config: SitterbotConfig = Figment::new()
            .merge(Toml::file(path))
            .merge(Env::prefixed("SITTERBOT_").split("_"))
            .extract()
            .map_err(|e| crate::error::CoreError::Config(e.to_string()))?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_config_gets_defaults() {
        let config: SitterbotConfig = Figment::new()
            .merge(Toml::string(
                r#"
                [booker]
                address = "+15550001111"
                country = "1"

                [twilio]
                from = "+15552220000"
                "#,
            ))
            .extract()
            .unwrap();

        assert_eq!(config.gateway.bind, DEFAULT_BIND);
        assert_eq!(config.gateway.port, DEFAULT_PORT);
        assert_eq!(config.offers.tick_secs, DEFAULT_TICK_SECS);
        assert_eq!(config.offers.timeout_minutes, DEFAULT_TIMEOUT_MINUTES);
        assert!(config.twilio.credentials().is_none());
    }

    #[test]
    fn missing_booker_fails() {
        let result: Result<SitterbotConfig, _> = Figment::new()
            .merge(Toml::string(
                r#"
                [twilio]
                from = "+15552220000"
                "#,
            ))
            .extract();
        assert!(result.is_err());
    }

    #[test]
    fn credentials_require_both_values() {
        let config: SitterbotConfig = Figment::new()
            .merge(Toml::string(
                r#"
                [booker]
                address = "+15550001111"
                country = "1"

                [twilio]
                from = "+15552220000"
                sid = "ACxxxx"
                "#,
            ))
            .extract()
            .unwrap();
        assert!(config.twilio.credentials().is_none());

        let config: SitterbotConfig = Figment::new()
            .merge(Toml::string(
                r#"
                [booker]
                address = "+15550001111"
                country = "1"

                [twilio]
                from = "+15552220000"
                sid = "ACxxxx"
                token = "secret"
                "#,
            ))
            .extract()
            .unwrap();
        assert_eq!(config.twilio.credentials(), Some(("ACxxxx", "secret")));
    }
}
