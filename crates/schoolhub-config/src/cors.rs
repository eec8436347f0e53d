use std::env;

pub const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:3000,http://localhost:5173";

#[derive(Clone, Debug)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl CorsConfig {
    pub fn from_env() -> Self {
        let raw =
            env::var("ALLOWED_ORIGINS").unwrap_or_else(|_| DEFAULT_ALLOWED_ORIGINS.to_string());
        Self::parse(&raw)
    }

    pub fn parse(raw: &str) -> Self {
        let allowed_origins = raw
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Self { allowed_origins }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_and_trims_origins() {
        let cfg = CorsConfig::parse(" http://a.test , ,http://b.test");
        assert_eq!(cfg.allowed_origins, vec!["http://a.test", "http://b.test"]);
    }

    #[test]
    fn defaults_cover_local_dev() {
        let cfg = CorsConfig::parse(DEFAULT_ALLOWED_ORIGINS);
        assert_eq!(cfg.allowed_origins.len(), 2);
    }
}
