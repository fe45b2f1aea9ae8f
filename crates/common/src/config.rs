use serde::Deserialize;

/// Global application configuration loaded from environment variables.
///
/// Built once at startup and handed to each service by value; nothing reads
/// the environment after `from_env` returns.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// PostgreSQL connection string
    pub database_url: String,

    /// Maximum number of PostgreSQL connections in the pool (default: 10)
    pub db_max_connections: u32,

    /// Socket address the HTTP server binds to (default: 0.0.0.0:3000)
    pub listen_addr: String,

    /// Resend API key for email delivery
    pub resend_api_key: String,

    /// Resend API base URL
    pub resend_api_url: String,

    /// Email sender address
    pub email_from: String,

    /// Display name shown next to the sender address
    pub email_from_name: String,

    /// Blind-copy addresses added to every deadline sweep email
    pub sweep_bcc: Vec<String>,

    /// Public base URL of the web app, used to build listing links
    pub app_base_url: String,

    /// QStash signing key currently in use
    pub qstash_current_signing_key: String,

    /// QStash signing key that will replace the current one on rotation
    pub qstash_next_signing_key: Option<String>,

    /// Maximum number of sends in flight during a sweep (default: 9)
    pub dispatch_concurrency: usize,

    /// Days past the deadline before a sponsor is reminded (default: 7)
    pub deadline_grace_days: i64,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let dispatch_concurrency: usize = std::env::var("DISPATCH_CONCURRENCY")
            .unwrap_or_else(|_| "9".to_string())
            .parse()
            .map_err(|_| anyhow::anyhow!("DISPATCH_CONCURRENCY must be a valid usize"))?;
        if dispatch_concurrency == 0 {
            anyhow::bail!("DISPATCH_CONCURRENCY must be at least 1");
        }

        Ok(Self {
            database_url: std::env::var("DATABASE_URL")
                .map_err(|_| anyhow::anyhow!("DATABASE_URL environment variable is required"))?,
            db_max_connections: std::env::var("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("DB_MAX_CONNECTIONS must be a valid u32"))?,
            listen_addr: std::env::var("LISTEN_ADDR")
                .unwrap_or_else(|_| "0.0.0.0:3000".to_string()),
            resend_api_key: std::env::var("RESEND_API_KEY")
                .map_err(|_| anyhow::anyhow!("RESEND_API_KEY environment variable is required"))?,
            resend_api_url: std::env::var("RESEND_API_URL")
                .unwrap_or_else(|_| "https://api.resend.com".to_string()),
            email_from: std::env::var("EMAIL_FROM")
                .map_err(|_| anyhow::anyhow!("EMAIL_FROM environment variable is required"))?,
            email_from_name: std::env::var("EMAIL_FROM_NAME")
                .unwrap_or_else(|_| "Kash from Superteam".to_string()),
            sweep_bcc: parse_list(&std::env::var("SWEEP_BCC").unwrap_or_default()),
            app_base_url: std::env::var("APP_BASE_URL")
                .unwrap_or_else(|_| "https://earn.superteam.fun".to_string()),
            qstash_current_signing_key: std::env::var("QSTASH_CURRENT_SIGNING_KEY").map_err(
                |_| anyhow::anyhow!("QSTASH_CURRENT_SIGNING_KEY environment variable is required"),
            )?,
            qstash_next_signing_key: std::env::var("QSTASH_NEXT_SIGNING_KEY").ok(),
            dispatch_concurrency,
            deadline_grace_days: parse_grace_days(
                &std::env::var("DEADLINE_GRACE_DAYS").unwrap_or_else(|_| "7".to_string()),
            )?,
        })
    }

    /// Sender header value, e.g. `Kash from Superteam <hello@example.com>`.
    pub fn sender(&self) -> String {
        format!("{} <{}>", self.email_from_name, self.email_from)
    }
}

/// Upper bound on the reminder grace period, in days.
const MAX_GRACE_DAYS: i64 = 3650;

/// Parse `DEADLINE_GRACE_DAYS`, accepting `0..=MAX_GRACE_DAYS`.
fn parse_grace_days(raw: &str) -> anyhow::Result<i64> {
    let days: i64 = raw
        .trim()
        .parse()
        .map_err(|_| anyhow::anyhow!("DEADLINE_GRACE_DAYS must be a valid i64"))?;
    if !(0..=MAX_GRACE_DAYS).contains(&days) {
        anyhow::bail!("DEADLINE_GRACE_DAYS must be between 0 and {MAX_GRACE_DAYS}, got {days}");
    }
    Ok(days)
}

/// Split a comma-separated list, dropping blank entries.
fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
