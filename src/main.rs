//! Command-line entry point: lists the sessions on the configured registry.
//!
//! Configuration comes from `SESSION_BOOKING__*` environment variables (and
//! `.env`). With `SESSION_BOOKING__CREDENTIALS__*` set, the client logs in
//! first and marks the sessions the account is registered for.

use std::sync::Arc;

use session_booking::adapters::{HttpRegistryClient, RegistryClientConfig};
use session_booking::application::{
    AuthSessionStore, BookingCoordinator, LoginCommand, LoginHandler, LogoutHandler,
};
use session_booking::config::AppConfig;
use session_booking::telemetry;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    telemetry::init_tracing(&config.client);
    config.validate()?;

    let store = Arc::new(AuthSessionStore::new());
    let _auth_log = store.subscribe(|authenticated| {
        tracing::info!(authenticated, "Authentication state changed");
    });

    let client_config = RegistryClientConfig::new(&config.registry.base_url)
        .with_timeout(config.registry.request_timeout());
    let client = Arc::new(HttpRegistryClient::new(client_config, store.clone())?);

    if let Some(credentials) = &config.credentials {
        LoginHandler::new(client.clone(), store.clone())
            .handle(LoginCommand {
                email: credentials.email.clone(),
                password: credentials.password.clone(),
            })
            .await?;
    }

    let coordinator =
        BookingCoordinator::new(store.clone(), client.clone(), client.clone(), client.clone());

    let sessions = coordinator.list_sessions().await?;
    let me = store.current_identity().map(|identity| identity.user_id());

    for session in &sessions {
        let id = session
            .id()
            .map(|id| id.to_string())
            .unwrap_or_else(|| "-".to_string());
        let booked = me.map_or(false, |user| session.has_participant(user));
        println!(
            "{:>4}  {}  {:<50}  {:>3} attendees{}",
            id,
            session.date(),
            session.name(),
            session.participant_count(),
            if booked { "  (booked)" } else { "" }
        );
    }
    tracing::info!(count = sessions.len(), "Listed sessions");

    if store.is_authenticated() {
        LogoutHandler::new(store.clone()).handle();
    }

    Ok(())
}
