use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::Level;

/// Runtime options handed to the detector at install time. Nothing here is
/// persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Profile {
    pub enabled: bool,
    /// Drop all held keys on window blur/focus and visibility changes.
    ///
    /// With this off, a modifier released while the page had no focus (after
    /// an alt-tab, say) stays in the pressed set and can fire chords the user
    /// never typed, until that key is pressed and released again.
    pub reset_on_focus_change: bool,
    /// Ignore auto-repeated key-downs instead of inserting again.
    pub suppress_repeat: bool,
    /// `trace`, `debug`, `info`, `warn` or `error`.
    pub log_level: String,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            enabled: true,
            reset_on_focus_change: true,
            suppress_repeat: false,
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Profile {
    /// Parses an options object. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let profile: Profile =
            serde_json::from_str(json).context("options must be a JSON object")?;
        profile.level()?;
        Ok(profile)
    }

    pub fn level(&self) -> Result<Level> {
        self.log_level
            .parse::<Level>()
            .map_err(|_| anyhow::anyhow!("unknown log level {:?}", self.log_level))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let profile = Profile::default();
        assert!(profile.enabled);
        assert!(profile.reset_on_focus_change);
        assert!(!profile.suppress_repeat);
        assert_eq!(profile.level().unwrap(), Level::INFO);
    }

    #[test]
    fn test_partial_options() {
        let profile = Profile::from_json(r#"{"suppressRepeat": true}"#).unwrap();
        assert!(profile.suppress_repeat);
        assert!(profile.enabled);
        assert_eq!(profile.log_level, "info");
    }

    #[test]
    fn test_empty_object() {
        assert_eq!(Profile::from_json("{}").unwrap(), Profile::default());
    }

    #[test]
    fn test_bad_level_rejected() {
        let err = Profile::from_json(r#"{"logLevel": "loud"}"#).unwrap_err();
        assert!(err.to_string().contains("loud"));
    }

    #[test]
    fn test_not_an_object() {
        assert!(Profile::from_json("[1, 2]").is_err());
    }
}
