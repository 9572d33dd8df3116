mod model;
mod server;

use std::{net::SocketAddr, sync::Arc};

use crate::server::{
    config::Config,
    error::AppError,
    logging,
    middleware::performance::PerformanceTracker,
    router,
    scheduler,
    service::{alerting::AlertingService, uptime::UptimeMonitoringService},
    startup,
    state::AppState,
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    logging::init_tracing(&config);

    let db = startup::connect_to_database(&config).await?;
    let session = startup::connect_to_session(&db).await?;
    let http_client = startup::setup_reqwest_client()?;
    let email_sender = startup::setup_email_sender(&config)?;
    let notifier = startup::setup_notifier(&config, &email_sender);

    let tracker = PerformanceTracker::new();
    let uptime = UptimeMonitoringService::new(http_client.clone(), config.uptime_targets.clone());
    let alerting = AlertingService::new(notifier);

    let bind_addr = config.bind_addr;
    let state = AppState::new(
        db,
        http_client,
        Arc::new(config),
        email_sender,
        tracker,
        uptime,
        alerting,
    );

    // Start uptime and cleanup scheduler
    let scheduler_state = state.clone();
    tokio::spawn(async move {
        if let Err(e) = scheduler::monitoring::start_scheduler(scheduler_state).await {
            tracing::error!("Monitoring scheduler error: {}", e);
        }
    });

    let app = router::router(state).layer(session);

    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    tracing::info!("Listening on {}", bind_addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
