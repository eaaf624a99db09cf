//! Configuration and CLI argument handling

use clap::Parser;

use crate::state::Theme;

/// CLI argument parsing structure. Every flag is optional; a bare
/// `desk-clock` starts in clock mode with the dark theme.
#[derive(Parser, Debug, Clone)]
#[command(name = "desk-clock")]
#[command(about = "An always-on-top desk clock, stopwatch and countdown widget")]
#[command(version = "1.0.0")]
pub struct Config {
    /// Port for the local control surface
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address for the local control surface
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Start with the light theme instead of the dark one
    #[arg(long)]
    pub light: bool,

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

    /// Theme the widget starts with
    pub fn initial_theme(&self) -> Theme {
        if self.light { Theme::Light } else { Theme::Dark }
    }
}
