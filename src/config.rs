use std::path::PathBuf;

use chrono::Duration;

use crate::srs::session_memory::DEFAULT_SESSION_TTL_HOURS;

const MAX_SESSION_TTL_HOURS: i64 = 24 * 365;
const DEFAULT_SWEEP_SCHEDULE: &str = "0 */10 * * * *";

#[derive(Debug, Clone)]
pub struct SrsConfig {
    pub session_ttl_hours: i64,
    pub sweep_enabled: bool,
    pub sweep_schedule: String,
    pub log_level: String,
    pub file_logs_enabled: bool,
    pub log_dir: PathBuf,
}

impl Default for SrsConfig {
    fn default() -> Self {
        Self {
            session_ttl_hours: DEFAULT_SESSION_TTL_HOURS,
            sweep_enabled: true,
            sweep_schedule: DEFAULT_SWEEP_SCHEDULE.to_string(),
            log_level: "info".to_string(),
            file_logs_enabled: false,
            log_dir: PathBuf::from("./logs"),
        }
    }
}

impl SrsConfig {
    pub fn from_env() -> Self {
        Self::from_source(|key| std::env::var(key).ok())
    }

    pub fn from_source<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let session_ttl_hours = lookup("SRS_SESSION_TTL_HOURS")
            .and_then(|value| value.parse::<i64>().ok())
            .map(|hours| hours.clamp(1, MAX_SESSION_TTL_HOURS))
            .unwrap_or(defaults.session_ttl_hours);

        let sweep_enabled = lookup("SRS_SWEEP_ENABLED")
            .map(|v| v != "false" && v != "0")
            .unwrap_or(defaults.sweep_enabled);

        let sweep_schedule = lookup("SRS_SWEEP_SCHEDULE")
            .filter(|value| !value.trim().is_empty())
            .unwrap_or(defaults.sweep_schedule);

        let log_level = lookup("RUST_LOG").unwrap_or(defaults.log_level);

        let file_logs_enabled = lookup("ENABLE_FILE_LOGS")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(defaults.file_logs_enabled);

        let log_dir = lookup("LOG_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.log_dir);

        Self {
            session_ttl_hours,
            sweep_enabled,
            sweep_schedule,
            log_level,
            file_logs_enabled,
            log_dir,
        }
    }

    pub fn session_ttl(&self) -> Duration {
        Duration::hours(self.session_ttl_hours.clamp(1, MAX_SESSION_TTL_HOURS))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> SrsConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        SrsConfig::from_source(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = config_from(&[]);
        assert_eq!(config.session_ttl_hours, 24);
        assert!(config.sweep_enabled);
        assert_eq!(config.sweep_schedule, DEFAULT_SWEEP_SCHEDULE);
        assert_eq!(config.log_level, "info");
        assert!(!config.file_logs_enabled);
        assert_eq!(config.session_ttl(), Duration::hours(24));
    }

    #[test]
    fn test_reads_overrides() {
        let config = config_from(&[
            ("SRS_SESSION_TTL_HOURS", "6"),
            ("SRS_SWEEP_ENABLED", "0"),
            ("SRS_SWEEP_SCHEDULE", "0 0 * * * *"),
            ("RUST_LOG", "vocab_srs=debug"),
            ("ENABLE_FILE_LOGS", "true"),
            ("LOG_DIR", "/tmp/srs"),
        ]);
        assert_eq!(config.session_ttl(), Duration::hours(6));
        assert!(!config.sweep_enabled);
        assert_eq!(config.sweep_schedule, "0 0 * * * *");
        assert_eq!(config.log_level, "vocab_srs=debug");
        assert!(config.file_logs_enabled);
        assert_eq!(config.log_dir, PathBuf::from("/tmp/srs"));
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = config_from(&[
            ("SRS_SESSION_TTL_HOURS", "soon"),
            ("SRS_SWEEP_SCHEDULE", "   "),
        ]);
        assert_eq!(config.session_ttl_hours, 24);
        assert_eq!(config.sweep_schedule, DEFAULT_SWEEP_SCHEDULE);

        let config = config_from(&[("SRS_SESSION_TTL_HOURS", "-5")]);
        assert_eq!(config.session_ttl_hours, 1);
    }
}
