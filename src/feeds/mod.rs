pub mod anilist;
pub mod github;

use async_trait::async_trait;

use crate::card::PublishedCard;
use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserIdentity {
    pub username: String,
    pub user_id: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Anime,
    Manga,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextActivity {
    pub created_at: i64,
    pub reply_count: u32,
    pub like_count: u32,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaListActivity {
    pub kind: MediaKind,
    pub created_at: i64,
    pub reply_count: u32,
    pub like_count: u32,
    pub status: String,
    pub progress: Option<String>,
    pub media_title: String,
}

impl MediaListActivity {
    /// Progress worth showing, if any. Absent, empty and zero progress
    /// all mean the whole entry was covered.
    pub fn shown_progress(&self) -> Option<&str> {
        self.progress
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty() && *p != "0")
    }
}

/// The latest activity of a user, decoded once at the API boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivityRecord {
    Text(TextActivity),
    MediaList(MediaListActivity),
    /// Any other activity type. `None` when the API sent no type at all.
    Unsupported(Option<String>),
}

impl ActivityRecord {
    pub fn created_at(&self) -> Option<i64> {
        match self {
            ActivityRecord::Text(a) => Some(a.created_at),
            ActivityRecord::MediaList(a) => Some(a.created_at),
            ActivityRecord::Unsupported(_) => None,
        }
    }
}

/// Where user identities and activities come from.
#[async_trait]
pub trait ActivitySource: Send + Sync {
    async fn resolve_user(&self, username: &str) -> Result<UserIdentity>;
    async fn latest_activity(&self, user: &UserIdentity) -> Result<ActivityRecord>;
}

/// Where rendered cards go.
#[async_trait]
pub trait CardPublisher: Send + Sync {
    async fn publish(&self, card: &PublishedCard) -> Result<()>;
}
