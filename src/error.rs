use reqwest::StatusCode;
use thiserror::Error;

use crate::config::ConfigError;

pub type Result<T> = std::result::Result<T, NekoError>;

#[derive(Debug, Error)]
pub enum NekoError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The identity query failed or found no account.
    #[error("AniList user lookup failed ({status}), check the provided username {username:?}")]
    Resolution {
        username: String,
        status: StatusCode,
    },

    /// The activity query for a resolved account failed.
    #[error("AniList activity query failed ({status}) for user id {user_id}, check the provided username")]
    Fetch { user_id: i64, status: StatusCode },

    /// The gist write was answered with anything but 200/201.
    #[error("error while updating gist {gist_id} ({status}), check your token and gist id")]
    Publish { gist_id: String, status: StatusCode },

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
}
