//! Configuration and CLI argument handling

use std::time::Duration;
use clap::Parser;

use crate::{
    services::{MockDelay, RetryPolicy, DEFAULT_MOCK_SECONDS},
    tasks::SessionConfig,
};

/// CLI argument parsing structure
#[derive(Debug, Parser)]
#[command(name = "deadline-countdown")]
#[command(about = "Polls a deadline endpoint and counts it down locally")]
#[command(version)]
pub struct Config {
    /// Deadline endpoint to poll
    #[arg(long, default_value = "http://127.0.0.1:8080/api/deadline")]
    pub url: String,

    /// Seconds between remote refreshes
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u64).range(1..))]
    pub poll_interval: u64,

    /// Milliseconds between local countdown ticks
    #[arg(long, default_value_t = 1000, value_parser = clap::value_parser!(u64).range(1..))]
    pub tick_interval_ms: u64,

    /// Attempts per fetch before giving up
    #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(u32).range(1..))]
    pub retries: u32,

    /// Initial backoff between attempts in milliseconds (0 retries immediately)
    #[arg(long, default_value_t = 200)]
    pub retry_backoff_ms: u64,

    /// Use the simulated backend instead of the HTTP endpoint
    #[arg(long)]
    pub mock: bool,

    /// Seconds reported by the simulated backend
    #[arg(long, default_value_t = DEFAULT_MOCK_SECONDS)]
    pub mock_seconds: u64,

    /// Fixed simulated latency in milliseconds (random 200-1000ms when omitted)
    #[arg(long)]
    pub mock_delay_ms: Option<u64>,

    /// Probability that a simulated call fails
    #[arg(long, default_value_t = 0.1, value_parser = parse_probability)]
    pub mock_failure_rate: f64,

    /// Host address for the status API
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Port for the status API
    #[arg(short, long, default_value_t = 20554)]
    pub port: u16,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

fn parse_probability(s: &str) -> Result<f64, String> {
    let value: f64 = s.parse().map_err(|e| format!("{}", e))?;
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(format!("{} is not between 0 and 1", value))
    }
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

    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            tick_interval: Duration::from_millis(self.tick_interval_ms),
            poll_interval: Duration::from_secs(self.poll_interval),
        }
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.retries, Duration::from_millis(self.retry_backoff_ms))
    }

    pub fn mock_delay(&self) -> MockDelay {
        match self.mock_delay_ms {
            Some(ms) => MockDelay::Fixed(Duration::from_millis(ms)),
            None => MockDelay::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::try_parse_from(["deadline-countdown"]).unwrap();
        assert_eq!(config.session_config(), SessionConfig::default());
        assert_eq!(config.retry_policy(), RetryPolicy::default());
        assert_eq!(config.mock_delay(), MockDelay::default());
        assert_eq!(config.address(), "127.0.0.1:20554");
        assert_eq!(config.log_level(), "info");
        assert!(!config.mock);
    }

    #[test]
    fn mock_flags() {
        let config = Config::try_parse_from([
            "deadline-countdown",
            "--mock",
            "--mock-seconds",
            "90",
            "--mock-delay-ms",
            "2500",
            "--mock-failure-rate",
            "0.25",
            "-v",
        ])
        .unwrap();

        assert!(config.mock);
        assert_eq!(config.mock_seconds, 90);
        assert_eq!(config.mock_delay(), MockDelay::Fixed(Duration::from_millis(2500)));
        assert_eq!(config.mock_failure_rate, 0.25);
        assert_eq!(config.log_level(), "debug");
    }

    #[test]
    fn rejects_bad_values() {
        assert!(Config::try_parse_from(["deadline-countdown", "--mock-failure-rate", "1.5"]).is_err());
        assert!(Config::try_parse_from(["deadline-countdown", "--poll-interval", "0"]).is_err());
        assert!(Config::try_parse_from(["deadline-countdown", "--retries", "0"]).is_err());
    }

    #[test]
    fn immediate_retry_when_backoff_is_zero() {
        let config =
            Config::try_parse_from(["deadline-countdown", "--retry-backoff-ms", "0"]).unwrap();
        assert_eq!(config.retry_policy(), RetryPolicy::immediate(3));
    }
}
