use carline_core::placard::DEFAULT_PLACARD_TTL_SEC;

pub const LANE_ID_ENV: &str = "CARLINE_LANE_ID";
pub const PLACARD_TTL_ENV: &str = "CARLINE_PLACARD_TTL_SEC";
pub const DEFAULT_LANE_ID: &str = "A";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaneConfig {
    /// Lane used when a snapshot does not name one.
    pub lane_id: String,
    pub placard_ttl_sec: i64,
}

impl Default for LaneConfig {
    fn default() -> Self {
        Self {
            lane_id: DEFAULT_LANE_ID.to_string(),
            placard_ttl_sec: DEFAULT_PLACARD_TTL_SEC,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    message: String,
}

impl ConfigError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ConfigError {}

impl LaneConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; unset or blank keys keep defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(value) = lookup(LANE_ID_ENV) {
            let trimmed = value.trim();
            if !trimmed.is_empty() {
                config.lane_id = trimmed.to_string();
            }
        }

        if let Some(value) = lookup(PLACARD_TTL_ENV) {
            let trimmed = value.trim();
            if !trimmed.is_empty() {
                config.placard_ttl_sec = parse_ttl(trimmed)?;
            }
        }

        Ok(config)
    }
}

fn parse_ttl(value: &str) -> Result<i64, ConfigError> {
    match value.parse::<i64>() {
        Ok(ttl) if ttl > 0 => Ok(ttl),
        _ => Err(ConfigError::new(format!(
            "{PLACARD_TTL_ENV} must be a positive integer, got '{value}'"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let values: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |key: &str| values.get(key).cloned()
    }

    #[test]
    fn unset_keys_keep_defaults() {
        let config = LaneConfig::from_lookup(lookup_from(&[])).expect("config should load");
        assert_eq!(config, LaneConfig::default());
        assert_eq!(config.placard_ttl_sec, 120);
    }

    #[test]
    fn reads_lane_and_ttl_overrides() {
        let config = LaneConfig::from_lookup(lookup_from(&[
            (LANE_ID_ENV, " B "),
            (PLACARD_TTL_ENV, "300"),
        ]))
        .expect("config should load");
        assert_eq!(config.lane_id, "B");
        assert_eq!(config.placard_ttl_sec, 300);
    }

    #[test]
    fn rejects_non_positive_ttl_instead_of_defaulting() {
        let error = LaneConfig::from_lookup(lookup_from(&[(PLACARD_TTL_ENV, "0")]))
            .expect_err("config should fail");
        assert_eq!(
            error.message(),
            "CARLINE_PLACARD_TTL_SEC must be a positive integer, got '0'"
        );

        assert!(LaneConfig::from_lookup(lookup_from(&[(PLACARD_TTL_ENV, "soon")])).is_err());
    }
}
