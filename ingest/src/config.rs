use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for tracing::Level {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}

/// Parses match recordings into per-match and per-player results.
#[derive(Debug, Clone, clap::Parser)]
#[command(name = "ingest", long_about = None)]
pub struct Config {
    /// Directory containing the `.jsonl` match recordings
    #[arg(long, default_value = "recordings/")]
    pub recordings: PathBuf,

    /// Directory the results are written to
    #[arg(long, default_value = "results/")]
    pub results: PathBuf,

    #[arg(long, default_value_t = 4, value_parser = clap::value_parser!(u16).range(1..))]
    pub workers: u16,

    /// Number of matches that can wait for a free worker
    #[arg(long, default_value_t = 16, value_parser = clap::value_parser!(u16).range(1..))]
    pub queue_depth: u16,

    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u64).range(1..))]
    pub poll_interval_secs: u64,

    /// Maximum time a single match may take to parse
    #[arg(long, default_value_t = 120, value_parser = clap::value_parser!(u64).range(1..))]
    pub parse_timeout_secs: u64,

    /// Matches stored by an older parser version are parsed again
    #[arg(long, default_value_t = analysis::PARSER_VERSION)]
    pub parser_version: u32,

    /// Run a single pass over the recordings and exit once it is done
    #[arg(long)]
    pub once: bool,

    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,
}

impl Config {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub fn parse_timeout(&self) -> Duration {
        Duration::from_secs(self.parse_timeout_secs)
    }

    pub fn parser_config(&self) -> analysis::ParserConfig {
        analysis::ParserConfig {
            parser_version: self.parser_version,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn defaults() {
        let config = Config::try_parse_from(["ingest"]).unwrap();

        assert_eq!(4, config.workers);
        assert_eq!(analysis::PARSER_VERSION, config.parser_version);
        assert!(!config.once);
        assert_eq!(LogLevel::Info, config.log_level);
    }

    #[test]
    fn flags() {
        let config = Config::try_parse_from([
            "ingest",
            "--recordings",
            "/tmp/recordings",
            "--workers",
            "8",
            "--parser-version",
            "3",
            "--once",
            "--log-level",
            "debug",
        ])
        .unwrap();

        assert_eq!(PathBuf::from("/tmp/recordings"), config.recordings);
        assert_eq!(8, config.workers);
        assert_eq!(3, config.parser_config().parser_version);
        assert!(config.once);
        assert_eq!(LogLevel::Debug, config.log_level);
    }

    #[test]
    fn zero_workers_are_rejected() {
        assert!(Config::try_parse_from(["ingest", "--workers", "0"]).is_err());
    }
}
