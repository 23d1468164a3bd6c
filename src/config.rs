//! Configuration, CLI argument handling and launch parameters

use axum::{extract::Query, http::Uri};
use clap::Parser;
use serde::Deserialize;
use tracing::warn;

/// CLI argument parsing structure
#[derive(Parser, Debug, Default)]
#[command(name = "flapboard")]
#[command(about = "A split-flap style countdown board for the terminal")]
#[command(version = "1.0.0")]
pub struct Config {
    /// Raw launch query string, e.g. "date=2026-12-25&time=18:00&title=Party"
    #[arg(short, long)]
    pub query: Option<String>,

    /// Target date (overrides the query string)
    #[arg(short, long, alias = "target")]
    pub date: Option<String>,

    /// Target time of day, combined with the date
    #[arg(long)]
    pub time: Option<String>,

    /// Timezone label shown next to the board
    #[arg(long, alias = "tz")]
    pub timezone: Option<String>,

    /// Board title
    #[arg(long)]
    pub title: Option<String>,

    /// Board theme
    #[arg(long)]
    pub theme: Option<String>,

    /// Port for the local control surface
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address for the local control surface
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Do not start the local control surface
    #[arg(long)]
    pub no_control: bool,

    /// Tear down and exit once the countdown completes
    #[arg(long)]
    pub exit_on_complete: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the control surface address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Merge the query string and the individual flags. Flags win.
    pub fn launch_params(&self) -> LaunchParams {
        let from_query = match self.query.as_deref() {
            Some(query) => LaunchParams::from_query(query).unwrap_or_else(|e| {
                warn!("Ignoring unparseable query string: {}", e);
                LaunchParams::default()
            }),
            None => LaunchParams::default(),
        };

        LaunchParams {
            date: present(&self.date).or(from_query.date),
            time: present(&self.time).or(from_query.time),
            timezone: present(&self.timezone).or(from_query.timezone),
            title: present(&self.title).or(from_query.title),
            theme: present(&self.theme).or(from_query.theme),
        }
    }
}

/// Raw, optional inputs for the configuration resolver
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LaunchParams {
    pub date: Option<String>,
    pub time: Option<String>,
    pub timezone: Option<String>,
    pub title: Option<String>,
    pub theme: Option<String>,
}

/// Query string keys as the hosting page passes them
#[derive(Debug, Default, Deserialize)]
struct QueryParams {
    date: Option<String>,
    target: Option<String>,
    time: Option<String>,
    timezone: Option<String>,
    tz: Option<String>,
    title: Option<String>,
    theme: Option<String>,
}

impl LaunchParams {
    /// Parse a query string (with or without the leading `?`)
    pub fn from_query(query: &str) -> Result<Self, String> {
        let uri: Uri = format!("/?{}", query.trim_start_matches('?').replace(' ', "%20"))
            .parse()
            .map_err(|e| format!("Invalid query string: {}", e))?;

        let Query(raw) = Query::<QueryParams>::try_from_uri(&uri)
            .map_err(|e| format!("Invalid query parameters: {}", e))?;

        Ok(Self {
            date: present(&raw.date).or_else(|| present(&raw.target)),
            time: present(&raw.time),
            timezone: present(&raw.timezone).or_else(|| present(&raw.tz)),
            title: present(&raw.title),
            theme: present(&raw.theme),
        })
    }
}

/// Empty values count as absent
fn present(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|v| !v.is_empty()).cloned()
}
