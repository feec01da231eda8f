use anyhow::{bail, Result};
use flexi_logger::{Duplicate, FileSpec, Logger, LoggerHandle};
use std::path::PathBuf;

pub(crate) const DATA_FILE: &str = "expenses.json";
const LOG_BASENAME: &str = "wallet-watch";

#[cfg(debug_assertions)]
const DEFAULT_LOG_LEVEL: &str = "debug";
#[cfg(not(debug_assertions))]
const DEFAULT_LOG_LEVEL: &str = "info";

/// Settings taken from the command line. Whatever is left in `args` picks the
/// mode: nothing means the TUI, anything else is a CLI subcommand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Config {
    pub(crate) data_dir: PathBuf,
    pub(crate) log_level: Option<String>,
    pub(crate) args: Vec<String>,
}

impl Config {
    /// Pull `--data-dir DIR` and `--log-level LEVEL` (or their `=` forms) out
    /// of `args`, which excludes the program name.
    pub(crate) fn parse(args: &[String]) -> Result<Self> {
        let mut config = Self {
            data_dir: PathBuf::from("data"),
            log_level: None,
            args: Vec::new(),
        };

        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            let (flag, inline) = match arg.split_once('=') {
                Some((flag, value)) if flag.starts_with("--") => (flag, Some(value.to_string())),
                _ => (arg.as_str(), None),
            };
            match flag {
                "--data-dir" | "--log-level" => {
                    let Some(value) = inline.or_else(|| iter.next().cloned()) else {
                        bail!("{flag} needs a value");
                    };
                    if flag == "--data-dir" {
                        config.data_dir = PathBuf::from(value);
                    } else {
                        config.log_level = Some(value);
                    }
                }
                _ => config.args.push(arg.clone()),
            }
        }

        Ok(config)
    }

    pub(crate) fn data_file(&self) -> PathBuf {
        self.data_dir.join(DATA_FILE)
    }

    pub(crate) fn is_tui(&self) -> bool {
        self.args.is_empty()
    }

    /// Start logging to `<data-dir>/wallet-watch.log`. The CLI also echoes
    /// warnings to stderr; the TUI can't, it owns the screen.
    pub(crate) fn init_logging(&self) -> Result<LoggerHandle> {
        std::fs::create_dir_all(&self.data_dir)?;
        let logger = match &self.log_level {
            Some(level) => Logger::try_with_str(level)?,
            None => Logger::try_with_env_or_str(DEFAULT_LOG_LEVEL)?,
        };
        let logger = logger
            .log_to_file(
                FileSpec::default()
                    .directory(self.data_dir.clone())
                    .basename(LOG_BASENAME)
                    .suppress_timestamp(),
            )
            .append();
        let logger = if self.is_tui() {
            logger
        } else {
            logger.duplicate_to_stderr(Duplicate::Warn)
        };
        Ok(logger.start()?)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_defaults() {
        let config = Config::parse(&[]).unwrap();
        assert_eq!(config.data_file(), PathBuf::from("data/expenses.json"));
        assert_eq!(config.log_level, None);
        assert!(config.is_tui());
    }

    #[test]
    fn test_flags_are_removed_from_args() {
        let config = Config::parse(&args(&[
            "--data-dir",
            "/tmp/ww",
            "summary",
            "--log-level=warn",
            "2024-05",
        ]))
        .unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/tmp/ww"));
        assert_eq!(config.log_level.as_deref(), Some("warn"));
        assert_eq!(config.args, args(&["summary", "2024-05"]));
        assert!(!config.is_tui());
    }

    #[test]
    fn test_missing_flag_value() {
        let err = Config::parse(&args(&["--data-dir"])).unwrap_err();
        assert!(err.to_string().contains("--data-dir needs a value"));
    }

    #[test]
    fn test_other_flags_pass_through() {
        let config = Config::parse(&args(&["export", "--month", "2024-05"])).unwrap();
        assert_eq!(config.args, args(&["export", "--month", "2024-05"]));
    }
}
