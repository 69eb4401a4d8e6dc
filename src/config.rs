//! Runtime configuration from environment variables.
//!
//! | Variable | Default | Meaning |
//! |---|---|---|
//! | `STROKECHECK_REPORT_DIR` | `.` | Directory reports are saved into |
//! | `STROKECHECK_LOG_MODE` | `auto` | `file`, `stdout` or `auto` (file when interactive) |
//! | `STROKECHECK_LOG_FILE` | `strokecheck.log` | Log file used in file mode |
//! | `STROKECHECK_SEED` | unset | Fixed seed for the confidence source |

use std::path::PathBuf;

/// Where log output goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogMode {
    /// File when stdout is a terminal, stdout otherwise
    Auto,
    File,
    Stdout,
}

impl LogMode {
    fn parse(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "file" => Self::File,
            "stdout" => Self::Stdout,
            _ => Self::Auto,
        }
    }

    /// Resolve `Auto` against whether the process owns an interactive terminal.
    #[must_use]
    pub fn use_file(&self, interactive: bool) -> bool {
        match self {
            Self::File => true,
            Self::Stdout => false,
            Self::Auto => interactive,
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub report_dir: PathBuf,
    pub log_mode: LogMode,
    pub log_file: PathBuf,
    pub seed: Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            report_dir: PathBuf::from("."),
            log_mode: LogMode::Auto,
            log_file: PathBuf::from("strokecheck.log"),
            seed: None,
        }
    }
}

impl AppConfig {
    /// Read configuration from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary lookup function.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let seed = lookup("STROKECHECK_SEED").and_then(|v| match v.trim().parse::<u64>() {
            Ok(seed) => Some(seed),
            Err(_) => {
                tracing::warn!("Ignoring STROKECHECK_SEED: not an unsigned integer");
                None
            }
        });

        Self {
            report_dir: lookup("STROKECHECK_REPORT_DIR")
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.report_dir),
            log_mode: lookup("STROKECHECK_LOG_MODE")
                .map(|v| LogMode::parse(&v))
                .unwrap_or(defaults.log_mode),
            log_file: lookup("STROKECHECK_LOG_FILE")
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.log_file),
            seed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_lookup(lookup_from(&[]));
        assert_eq!(config.report_dir, PathBuf::from("."));
        assert_eq!(config.log_mode, LogMode::Auto);
        assert_eq!(config.log_file, PathBuf::from("strokecheck.log"));
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("STROKECHECK_REPORT_DIR", "/tmp/reports"),
            ("STROKECHECK_LOG_MODE", "STDOUT"),
            ("STROKECHECK_LOG_FILE", "/var/log/sc.log"),
            ("STROKECHECK_SEED", "42"),
        ]));
        assert_eq!(config.report_dir, PathBuf::from("/tmp/reports"));
        assert_eq!(config.log_mode, LogMode::Stdout);
        assert_eq!(config.log_file, PathBuf::from("/var/log/sc.log"));
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn test_invalid_seed_is_ignored() {
        let config = AppConfig::from_lookup(lookup_from(&[("STROKECHECK_SEED", "abc")]));
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_log_mode_resolution() {
        assert!(LogMode::Auto.use_file(true));
        assert!(!LogMode::Auto.use_file(false));
        assert!(LogMode::File.use_file(false));
        assert!(!LogMode::Stdout.use_file(true));
    }
}
