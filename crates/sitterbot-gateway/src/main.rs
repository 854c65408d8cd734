use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{info, warn};

mod app;
mod http;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sitterbot_gateway=info,tower_http=debug".into()),
        )
        .init();

    // config: explicit path via SITTERBOT_CONFIG > ./sitterbot.toml.
    // Missing required values (booker, twilio.from) abort start-up here.
    let config_path = std::env::var("SITTERBOT_CONFIG").ok();
    let config = sitterbot_core::SitterbotConfig::load(config_path.as_deref())?;

    let db_path = config.database.path.clone();
    ensure_parent_dir(&db_path);
    info!(path = %db_path, "opening SQLite database");
    let store: Arc<dyn sitterbot_store::SnapshotStore> =
        Arc::new(sitterbot_store::SqliteStore::open(&db_path)?);

    let registry = Arc::new(sitterbot_sitters::SitterRegistry::new(Arc::clone(&store)));
    let bookings = Arc::new(sitterbot_bookings::BookingStore::new(Arc::clone(&store)));

    let sender: Arc<dyn sitterbot_sms::SmsSender> = match config.twilio.credentials() {
        Some((sid, token)) => {
            info!("outbound transport: Twilio");
            Arc::new(sitterbot_sms::TwilioSender::new(
                sid.to_string(),
                token.to_string(),
                config.twilio.from.clone(),
            ))
        }
        None => {
            warn!("no Twilio credentials configured; outbound messages will only be logged");
            Arc::new(LogSender)
        }
    };

    // spawn the offer engine loop in the background
    let engine = sitterbot_scheduler::OfferEngine::new(
        Arc::clone(&registry),
        Arc::clone(&bookings),
        Arc::clone(&sender),
        config.booker.address.clone(),
        config.offers.tick_secs,
        config.offers.timeout_minutes,
    );
    let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
    tokio::spawn(async move { engine.run(shutdown_rx).await });

    sitterbot_sms::send_or_log(
        sender.as_ref(),
        &config.booker.address,
        "Hi, this is Sitter Bot, on the job!  Send me a date with time range and I'll try \
         to book one of our sitters!"
            .to_string(),
    )
    .await;
    if registry.all()?.is_empty() {
        sitterbot_sms::send_or_log(
            sender.as_ref(),
            &config.booker.address,
            "Please add at least one babysitter.".to_string(),
        )
        .await;
    }

    let dispatcher = sitterbot_bot::Dispatcher::new(
        registry,
        bookings,
        Arc::clone(&sender),
        config.booker.address.clone(),
        config.booker.country.clone(),
    );

    let addr: SocketAddr = format!("{}:{}", config.gateway.bind, config.gateway.port).parse()?;
    let state = Arc::new(app::AppState { dispatcher });
    let router = app::build_router(state);

    info!("sitterbot gateway listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // signal the offer engine to stop
    let _ = shutdown_tx.send(true);
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}

/// Ensure the parent directory for a file path exists.
fn ensure_parent_dir(path: &str) {
    if let Some(parent) = std::path::Path::new(path).parent() {
        let _ = std::fs::create_dir_all(parent);
    }
}

/// Fallback sender used when Twilio is not configured.
struct LogSender;

#[async_trait::async_trait]
impl sitterbot_sms::SmsSender for LogSender {
    async fn send(
        &self,
        msg: &sitterbot_sms::OutboundSms,
    ) -> Result<(), sitterbot_sms::SmsError> {
        info!(to = %msg.to, body = %msg.body, "sms (dry run)");
        Ok(())
    }
}
