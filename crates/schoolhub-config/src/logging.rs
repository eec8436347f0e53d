use crate::env_or;

/// Where log files go and whether metrics/log layers are switched on.
///
/// - `LOG_DIR`: directory for rolling log files (default `storage/logs`)
/// - `OBSERVABILITY_ENABLED`: `false` or `0` disables metrics (default enabled)
#[derive(Clone, Debug)]
pub struct LoggingConfig {
    pub log_dir: String,
    pub observability_enabled: bool,
}

impl LoggingConfig {
    pub fn from_env() -> Self {
        let observability_enabled = std::env::var("OBSERVABILITY_ENABLED")
            .map(|v| parse_flag(&v))
            .unwrap_or(true);

        Self {
            log_dir: env_or("LOG_DIR", "storage/logs".to_string()),
            observability_enabled,
        }
    }
}

fn parse_flag(raw: &str) -> bool {
    let v = raw.trim().to_lowercase();
    v != "false" && v != "0"
}

#[cfg(test)]
mod tests {
    use super::parse_flag;

    #[test]
    fn only_false_and_zero_disable() {
        assert!(!parse_flag("false"));
        assert!(!parse_flag("FALSE"));
        assert!(!parse_flag("0"));
        assert!(parse_flag("true"));
        assert!(parse_flag("yes"));
    }
}
