use std::time::Duration;

use crate::error::ConfigError;

/// Default wait for navigation and confirm menus.
pub const DEFAULT_MENU_TIMEOUT_SECS: u64 = 30;
/// Default wait for each question of a prompt script.
pub const DEFAULT_PROMPT_TIMEOUT_SECS: u64 = 60;
/// Default keyword that aborts prompt scripts and waiters.
pub const DEFAULT_STOP_KEYWORD: &str = "cancel";

/// Runtime configuration read from the environment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub token: String,
    pub menu_timeout: Duration,
    pub prompt_timeout: Duration,
    pub stop_keyword: String,
}

impl Config {
    /// Load configuration from process environment, after reading `.env` if present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let token = lookup("DISCORD_TOKEN")
            .filter(|value| !value.trim().is_empty())
            .ok_or(ConfigError::Missing("DISCORD_TOKEN"))?;

        let menu_timeout = seconds_var(&lookup, "MENU_TIMEOUT_SECS", DEFAULT_MENU_TIMEOUT_SECS)?;
        let prompt_timeout =
            seconds_var(&lookup, "PROMPT_TIMEOUT_SECS", DEFAULT_PROMPT_TIMEOUT_SECS)?;

        let stop_keyword = lookup("MENU_STOP_KEYWORD")
            .map(|value| value.trim().to_lowercase())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_STOP_KEYWORD.to_owned());

        Ok(Self {
            token,
            menu_timeout,
            prompt_timeout,
            stop_keyword,
        })
    }
}

fn seconds_var(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: u64,
) -> Result<Duration, ConfigError> {
    let Some(raw) = lookup(name) else {
        return Ok(Duration::from_secs(default));
    };

    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::InvalidSeconds { name, value: raw }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_apply_when_only_token_is_set() {
        let config = Config::from_lookup(lookup_from(&[("DISCORD_TOKEN", "abc")])).unwrap();

        assert_eq!(config.token, "abc");
        assert_eq!(config.menu_timeout, Duration::from_secs(30));
        assert_eq!(config.prompt_timeout, Duration::from_secs(60));
        assert_eq!(config.stop_keyword, "cancel");
    }

    #[test]
    fn overrides_are_read() {
        let config = Config::from_lookup(lookup_from(&[
            ("DISCORD_TOKEN", "abc"),
            ("MENU_TIMEOUT_SECS", "45"),
            ("PROMPT_TIMEOUT_SECS", " 90 "),
            ("MENU_STOP_KEYWORD", "Stop"),
        ]))
        .unwrap();

        assert_eq!(config.menu_timeout, Duration::from_secs(45));
        assert_eq!(config.prompt_timeout, Duration::from_secs(90));
        assert_eq!(config.stop_keyword, "stop");
    }

    #[test]
    fn missing_token_is_an_error() {
        let err = Config::from_lookup(lookup_from(&[])).unwrap_err();
        assert_eq!(err, ConfigError::Missing("DISCORD_TOKEN"));
    }

    #[test]
    fn zero_or_garbage_seconds_are_rejected() {
        for value in ["0", "-3", "soon"] {
            let err = Config::from_lookup(lookup_from(&[
                ("DISCORD_TOKEN", "abc"),
                ("MENU_TIMEOUT_SECS", value),
            ]))
            .unwrap_err();

            assert!(matches!(
                err,
                ConfigError::InvalidSeconds {
                    name: "MENU_TIMEOUT_SECS",
                    ..
                }
            ));
        }
    }
}
