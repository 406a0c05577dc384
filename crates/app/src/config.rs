use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use clap::{Args, Parser, Subcommand};
use engine::Currency;
use serde::Deserialize;

use crate::error::{AppError, Result};

const DEFAULT_CONFIG_PATH: &str = "config/kinman.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// IANA timezone used to decide what "today" is.
    pub timezone: String,
    pub currency: String,
    pub level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            timezone: "Asia/Ho_Chi_Minh".to_string(),
            currency: Currency::default().code().to_string(),
            level: "info".to_string(),
        }
    }
}

impl AppConfig {
    pub fn tz(&self) -> Result<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|_| AppError::Timezone(self.timezone.clone()))
    }

    pub fn currency(&self) -> Result<Currency> {
        Ok(Currency::try_from(self.currency.as_str())?)
    }

    /// Current calendar day in the configured timezone.
    pub fn today(&self) -> Result<NaiveDate> {
        Ok(Utc::now().with_timezone(&self.tz()?).date_naive())
    }
}

#[derive(Debug, Parser)]
#[command(name = "kinman", version)]
#[command(about = "Parse expense notes and split bills")]
pub struct Cli {
    /// Optional config file path (TOML).
    #[arg(long, global = true)]
    pub config: Option<String>,
    /// Override timezone (IANA name).
    #[arg(long, global = true)]
    pub timezone: Option<String>,
    /// Override currency code (VND, USD).
    #[arg(long, global = true)]
    pub currency: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show what an expense note parses to.
    Parse(ParseArgs),
    /// Build the transaction request body for an expense note.
    Draft(DraftArgs),
    /// Split a bill between participants.
    Split(SplitArgs),
}

#[derive(Debug, Args)]
pub struct ParseArgs {
    /// Expense note, e.g. `Coffee 50k today`.
    #[arg(required = true, num_args = 1..)]
    pub text: Vec<String>,
    /// Pretend today is this day (YYYY-MM-DD).
    #[arg(long)]
    pub date: Option<NaiveDate>,
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct DraftArgs {
    #[arg(required = true, num_args = 1..)]
    pub text: Vec<String>,
    #[arg(long)]
    pub date: Option<NaiveDate>,
    #[arg(long)]
    pub category: String,
    #[arg(long)]
    pub wallet: String,
    #[arg(long)]
    pub group: Option<String>,
}

#[derive(Debug, Args)]
pub struct SplitArgs {
    /// Bill total in major units.
    #[arg(long, allow_hyphen_values = true)]
    pub total: String,
    /// Exact share as `ID=AMOUNT`; switches to exact mode. Repeatable.
    #[arg(long = "exact", value_name = "ID=AMOUNT")]
    pub exact: Vec<String>,
    #[arg(long, default_value = "")]
    pub description: String,
    #[arg(long)]
    pub json: bool,
    /// Participants in order; the first one absorbs any remainder.
    pub participants: Vec<String>,
}

impl ParseArgs {
    pub fn text(&self) -> String {
        self.text.join(" ")
    }
}

impl DraftArgs {
    pub fn text(&self) -> String {
        self.text.join(" ")
    }
}

pub fn load(cli: &Cli) -> Result<AppConfig> {
    let config_path = cli.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(config::Environment::with_prefix("KINMAN"));
    let mut settings: AppConfig = builder.build()?.try_deserialize()?;

    if let Some(timezone) = &cli.timezone {
        settings.timezone = timezone.clone();
    }
    if let Some(currency) = &cli.currency {
        settings.currency = currency.clone();
    }

    Ok(settings)
}
