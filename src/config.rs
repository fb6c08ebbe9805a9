//! Configuration and CLI argument handling

use clap::Parser;

use crate::state::UserId;

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "ready-room")]
#[command(about = "Hosts a multiplayer room snapshot and the ready button bound to it")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// User id of the local participant
    #[arg(short, long, default_value = "1")]
    pub local_user: UserId,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_and_overrides() {
        let config = Config::try_parse_from(["ready-room"]).unwrap();
        assert_eq!(config.address(), "0.0.0.0:20554");
        assert_eq!(config.local_user, 1);
        assert_eq!(config.log_level(), "info");

        let config =
            Config::try_parse_from(["ready-room", "-p", "9000", "--local-user", "42", "-v"]).unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.local_user, 42);
        assert_eq!(config.log_level(), "debug");
    }
}
