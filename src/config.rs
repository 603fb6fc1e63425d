//! Configuration
//!
//! Flags fall back to environment variables, which `main` may have loaded
//! from a `.env` file.

use clap::Parser;

use crate::constants::{HTTP_HOST_DEFAULT, HTTP_PORT_DEFAULT};

/// Student records service
#[derive(Parser, Debug, Clone)]
#[command(name = crate::APP_NAME)]
#[command(about = "REST API over a persistent student record store")]
#[command(version)]
pub struct Config {
    /// Host to bind the HTTP server to
    #[arg(long, env = "HOST", default_value = HTTP_HOST_DEFAULT)]
    pub host: String,

    /// Port to bind the HTTP server to
    #[arg(short, long, env = "PORT", default_value_t = HTTP_PORT_DEFAULT)]
    pub port: u16,

    /// PostgreSQL connection string; without one, records live in memory
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Insert the sample students when the store is empty
    #[arg(
        long,
        env = "SEED_SAMPLE_DATA",
        value_parser = clap::builder::BoolishValueParser::new()
    )]
    pub seed: bool,

    /// Enable verbose logging
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Config {
    /// `host:port` for the listener.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Database URL, if one is set and not blank.
    ///
    /// `.env` templates often leave `DATABASE_URL=` empty; that means no database.
    #[must_use]
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Default log filter for the verbosity level, used when `RUST_LOG` is unset.
    #[must_use]
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "info,tower_http=debug",
            1 => "debug",
            _ => "trace",
        }
    }
}
