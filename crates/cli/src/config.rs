use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use serde::Deserialize;

const DEFAULT_CONFIG_PATH: &str = "config/finmate.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: String,
    pub store_path: String,
    pub user_id: Option<String>,
    pub token: Option<String>,
    pub offline: bool,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            store_path: tracker::default_store_path().to_string(),
            user_id: None,
            token: None,
            offline: false,
            log_level: "info".to_string(),
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "finmate", about = "Offline-first expense tracker")]
struct Args {
    /// Optional config file path (TOML).
    #[arg(long)]
    config: Option<String>,
    /// Override base URL (e.g. http://127.0.0.1:5000).
    #[arg(long)]
    base_url: Option<String>,
    /// Override the local store file path.
    #[arg(long)]
    store_path: Option<String>,
    /// User id for authenticated sync.
    #[arg(long)]
    user_id: Option<String>,
    /// Bearer token for authenticated sync.
    #[arg(long, env = "FINMATE_TOKEN", hide_env_values = true)]
    token: Option<String>,
    /// Skip every remote call, even when a token is configured.
    #[arg(long)]
    offline: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Log a new expense.
    Add {
        #[arg(long)]
        amount: f64,
        /// One of: food, transport, shopping, entertainment, health,
        /// education, bills, other. Anything else counts as "other".
        #[arg(long)]
        category: String,
        #[arg(long)]
        note: Option<String>,
        /// Calendar date (YYYY-MM-DD); defaults to today.
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// List expenses, newest first.
    List,
    /// Delete an expense by id.
    Delete { id: String },
    /// Replace local state with the server's expense list.
    Sync,
    /// Show a financial tip for the current expenses.
    Tip,
    /// Show spending totals per category.
    Stats,
}

/// Validates a submitted amount. NaN and infinity are rejected along
/// with non-positive values: serde_json writes non-finite floats as
/// `null`, which the store file could never deserialize again.
pub fn validate_amount(amount: f64) -> Result<f64, String> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err("amount must be a positive number".to_string());
    }
    Ok(amount)
}

pub fn load() -> Result<(AppConfig, Command), config::ConfigError> {
    let args = Args::parse();

    let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(config::Environment::with_prefix("FINMATE"));
    let mut settings: AppConfig = builder.build()?.try_deserialize()?;

    if let Some(base_url) = args.base_url {
        settings.base_url = base_url;
    }
    if let Some(store_path) = args.store_path {
        settings.store_path = store_path;
    }
    if let Some(user_id) = args.user_id {
        settings.user_id = Some(user_id);
    }
    if let Some(token) = args.token {
        settings.token = Some(token);
    }
    if args.offline {
        settings.offline = true;
    }

    Ok((settings, args.command))
}
