//! Process configuration, read once from the action's `INPUT_*` variables.

use std::fmt;

use thiserror::Error;

pub const GIST_ID_VAR: &str = "INPUT_GIST_ID";
pub const GH_TOKEN_VAR: &str = "INPUT_GH_TOKEN";
pub const ANILIST_USERNAME_VAR: &str = "INPUT_ANILIST_USERNAME";

pub const DEFAULT_ANILIST_API: &str = "https://graphql.anilist.co";
pub const DEFAULT_GITHUB_API: &str = "https://api.github.com";
pub const DEFAULT_GIST_FILENAME: &str = "Powered by Neko-Box!";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("required environment variable {0} is not set")]
    Missing(&'static str),
}

/// Column budgets for the rendered card.
///
/// The decorative rule is centered in its own field, independent of
/// `body_width`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardLayout {
    pub body_width: usize,
    pub rule_width: usize,
    /// Text activity bodies longer than this many characters are cut.
    pub text_limit: usize,
}

impl Default for CardLayout {
    fn default() -> Self {
        Self {
            body_width: 58,
            rule_width: 42,
            text_limit: 150,
        }
    }
}

#[derive(Clone)]
pub struct Config {
    pub gist_id: String,
    pub gh_token: String,
    pub anilist_username: String,
    pub anilist_api: String,
    pub github_api: String,
    pub gist_filename: String,
    pub layout: CardLayout,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build a config from any variable lookup. Every required variable
    /// must be present and non-blank.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or(ConfigError::Missing(name))
        };

        Ok(Self {
            gist_id: required(GIST_ID_VAR)?,
            gh_token: required(GH_TOKEN_VAR)?,
            anilist_username: required(ANILIST_USERNAME_VAR)?,
            anilist_api: DEFAULT_ANILIST_API.to_string(),
            github_api: DEFAULT_GITHUB_API.to_string(),
            gist_filename: DEFAULT_GIST_FILENAME.to_string(),
            layout: CardLayout::default(),
        })
    }

    /// Point both clients at different hosts, e.g. a local mock server.
    pub fn with_endpoints(mut self, anilist_api: &str, github_api: &str) -> Self {
        self.anilist_api = anilist_api.trim_end_matches('/').to_string();
        self.github_api = github_api.trim_end_matches('/').to_string();
        self
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("gist_id", &self.gist_id)
            .field("gh_token", &"<redacted>")
            .field("anilist_username", &self.anilist_username)
            .field("anilist_api", &self.anilist_api)
            .field("github_api", &self.github_api)
            .field("gist_filename", &self.gist_filename)
            .field("layout", &self.layout)
            .finish()
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
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_from_lookup_all_present() {
        let config = Config::from_lookup(lookup_from(&[
            (GIST_ID_VAR, "abc123"),
            (GH_TOKEN_VAR, "ghp_secret"),
            (ANILIST_USERNAME_VAR, " alice "),
        ]))
        .unwrap();

        assert_eq!(config.gist_id, "abc123");
        assert_eq!(config.gh_token, "ghp_secret");
        assert_eq!(config.anilist_username, "alice");
        assert_eq!(config.anilist_api, DEFAULT_ANILIST_API);
        assert_eq!(config.github_api, DEFAULT_GITHUB_API);
        assert_eq!(config.layout.body_width, 58);
        assert_eq!(config.layout.rule_width, 42);
        assert_eq!(config.layout.text_limit, 150);
    }

    #[test]
    fn test_from_lookup_missing_token() {
        let err = Config::from_lookup(lookup_from(&[
            (GIST_ID_VAR, "abc123"),
            (ANILIST_USERNAME_VAR, "alice"),
        ]))
        .unwrap_err();
        assert_eq!(err, ConfigError::Missing(GH_TOKEN_VAR));
    }

    #[test]
    fn test_from_lookup_blank_username_is_missing() {
        let err = Config::from_lookup(lookup_from(&[
            (GIST_ID_VAR, "abc123"),
            (GH_TOKEN_VAR, "ghp_secret"),
            (ANILIST_USERNAME_VAR, "   "),
        ]))
        .unwrap_err();
        assert_eq!(err, ConfigError::Missing(ANILIST_USERNAME_VAR));
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = Config::from_lookup(lookup_from(&[
            (GIST_ID_VAR, "abc123"),
            (GH_TOKEN_VAR, "ghp_secret"),
            (ANILIST_USERNAME_VAR, "alice"),
        ]))
        .unwrap();
        let printed = format!("{:?}", config);
        assert!(!printed.contains("ghp_secret"));
        assert!(printed.contains("<redacted>"));
    }

    #[test]
    fn test_with_endpoints_strips_trailing_slash() {
        let config = Config::from_lookup(lookup_from(&[
            (GIST_ID_VAR, "abc123"),
            (GH_TOKEN_VAR, "ghp_secret"),
            (ANILIST_USERNAME_VAR, "alice"),
        ]))
        .unwrap()
        .with_endpoints("http://127.0.0.1:9000/", "http://127.0.0.1:9001");
        assert_eq!(config.anilist_api, "http://127.0.0.1:9000");
        assert_eq!(config.github_api, "http://127.0.0.1:9001");
    }
}
