use std::sync::Arc;

use tower_sessions::{cookie::time::Duration, Expiry, SessionManagerLayer};
use tower_sessions_sqlx_store::SqliteStore;

use crate::server::{
    config::Config,
    error::AppError,
    service::{
        email::EmailSender,
        notification::{
            discord::DiscordNotifier, email::EmailNotifier, ChannelNotifier, Notifier,
        },
    },
};

/// Days of inactivity before a session expires.
const SESSION_INACTIVITY_DAYS: i64 = 7;

/// Connects to the Sqlite database and runs pending migrations.
///
/// Establishes a connection pool to the Sqlite database using the connection string from
/// configuration, then automatically runs all pending SeaORM migrations to ensure the database
/// schema is up-to-date. This function must complete successfully before the application can
/// access the database.
///
/// # Arguments
/// - `config` - Application configuration containing the database URL
///
/// # Returns
/// - `Ok(DatabaseConnection)` - Connected database with migrations applied
/// - `Err(Error)` - Failed to connect to database or run migrations
pub async fn connect_to_database(config: &Config) -> Result<sea_orm::DatabaseConnection, AppError> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Creates the session layer backed by the application database.
///
/// Sessions are stored in their own table, created on first start, and expire after
/// seven days of inactivity.
///
/// # Returns
/// - `Ok(SessionManagerLayer)` - Layer to apply to the router
/// - `Err(AppError::SqlxErr)` - Failed to create the session table
pub async fn connect_to_session(
    db: &sea_orm::DatabaseConnection,
) -> Result<SessionManagerLayer<SqliteStore>, AppError> {
    let pool = db.get_sqlite_connection_pool().clone();
    let store = SqliteStore::new(pool);
    store.migrate().await?;

    Ok(SessionManagerLayer::new(store)
        .with_secure(false)
        .with_expiry(Expiry::OnInactivity(Duration::days(SESSION_INACTIVITY_DAYS))))
}

/// HTTP client for outbound requests. Redirects are not followed so a probed URL cannot
/// bounce the server to another host.
pub fn setup_reqwest_client() -> Result<reqwest::Client, AppError> {
    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()?;

    Ok(client)
}

pub fn setup_email_sender(config: &Config) -> Result<EmailSender, AppError> {
    EmailSender::new(config.smtp.as_ref(), &config.smtp_from)
}

/// Builds the alert notifier from the configured webhook and recipients.
///
/// Discord is enabled when a webhook URL is set. Email is enabled when SMTP is configured
/// and at least one recipient is listed.
pub fn setup_notifier(config: &Config, email_sender: &EmailSender) -> Arc<dyn Notifier> {
    let discord = config
        .discord_webhook_url
        .clone()
        .map(DiscordNotifier::new);

    let email = (email_sender.is_enabled() && !config.alert_email_recipients.is_empty())
        .then(|| EmailNotifier::new(email_sender.clone(), config.alert_email_recipients.clone()));

    tracing::info!(
        discord = discord.is_some(),
        email = email.is_some(),
        "Alert notification channels configured"
    );

    Arc::new(ChannelNotifier::new(discord, email))
}
