use super::{
    ActivityRecord, ActivitySource, MediaKind, MediaListActivity, TextActivity, UserIdentity,
};
use crate::error::{NekoError, Result};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use chrono::DateTime;
use tracing::{debug, warn};

const USER_QUERY: &str = r#"
query ($username: String) {
  User (name: $username) {
    id
  }
}
"#;

const ACTIVITY_QUERY: &str = r#"
query ($user_id: Int) {
  Activity (userId: $user_id, sort: ID_DESC) {
    ... on ListActivity {
      type
      createdAt
      replyCount
      likeCount
      status
      progress
      media {
        title {
          romaji
        }
      }
    }
    ... on TextActivity {
      type
      createdAt
      replyCount
      likeCount
      text
    }
  }
}
"#;

pub struct AniListFetcher {
    endpoint: String,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
}

#[derive(Debug, Deserialize)]
struct UserData {
    #[serde(rename = "User")]
    user: Option<ApiUser>,
}

#[derive(Debug, Deserialize)]
struct ApiUser {
    id: i64,
}

#[derive(Debug, Deserialize)]
struct ActivityData {
    #[serde(rename = "Activity")]
    activity: Option<ApiActivity>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiActivity {
    #[serde(rename = "type")]
    activity_type: Option<String>,
    created_at: Option<i64>,
    reply_count: Option<u32>,
    like_count: Option<u32>,
    text: Option<String>,
    status: Option<String>,
    progress: Option<Progress>,
    media: Option<Media>,
}

/// AniList sends progress as a string ("5", "1 - 3") but some list entries
/// carry a bare number.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Progress {
    Text(String),
    Number(i64),
}

#[derive(Debug, Deserialize)]
struct Media {
    title: Option<MediaTitle>,
}

#[derive(Debug, Deserialize)]
struct MediaTitle {
    romaji: Option<String>,
}

impl From<ApiActivity> for ActivityRecord {
    fn from(a: ApiActivity) -> Self {
        let kind = match a.activity_type.as_deref() {
            Some("TEXT") => None,
            Some("ANIME_LIST") => Some(MediaKind::Anime),
            Some("MANGA_LIST") => Some(MediaKind::Manga),
            _ => return ActivityRecord::Unsupported(a.activity_type),
        };

        let Some(created_at) = a
            .created_at
            .filter(|ts| DateTime::from_timestamp(*ts, 0).is_some())
        else {
            warn!(
                activity_type = ?a.activity_type,
                created_at = ?a.created_at,
                "activity has no usable createdAt"
            );
            return ActivityRecord::Unsupported(a.activity_type);
        };
        let reply_count = a.reply_count.unwrap_or_default();
        let like_count = a.like_count.unwrap_or_default();

        match kind {
            None => ActivityRecord::Text(TextActivity {
                created_at,
                reply_count,
                like_count,
                text: a.text.unwrap_or_default(),
            }),
            Some(kind) => ActivityRecord::MediaList(MediaListActivity {
                kind,
                created_at,
                reply_count,
                like_count,
                status: a.status.unwrap_or_default(),
                progress: a.progress.map(|p| match p {
                    Progress::Text(s) => s,
                    Progress::Number(n) => n.to_string(),
                }),
                media_title: a
                    .media
                    .and_then(|m| m.title)
                    .and_then(|t| t.romaji)
                    .unwrap_or_default(),
            }),
        }
    }
}

impl AniListFetcher {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            client: reqwest::Client::new(),
        }
    }

    async fn run_query(
        &self,
        query: &str,
        variables: serde_json::Value,
    ) -> reqwest::Result<reqwest::Response> {
        self.client
            .post(&self.endpoint)
            .header("Accept", "application/json")
            .json(&json!({ "query": query, "variables": variables }))
            .send()
            .await
    }
}

#[async_trait]
impl ActivitySource for AniListFetcher {
    async fn resolve_user(&self, username: &str) -> Result<UserIdentity> {
        let response = self
            .run_query(USER_QUERY, json!({ "username": username }))
            .await?;
        let status = response.status();
        debug!(%status, username, "AniList user query answered");

        if !status.is_success() {
            return Err(NekoError::Resolution {
                username: username.to_string(),
                status,
            });
        }

        let body: GraphQlResponse<UserData> = response.json().await?;
        let user = body
            .data
            .and_then(|d| d.user)
            .ok_or_else(|| NekoError::Resolution {
                username: username.to_string(),
                status,
            })?;

        Ok(UserIdentity {
            username: username.to_string(),
            user_id: user.id,
        })
    }

    async fn latest_activity(&self, user: &UserIdentity) -> Result<ActivityRecord> {
        let response = self
            .run_query(ACTIVITY_QUERY, json!({ "user_id": user.user_id }))
            .await?;
        let status = response.status();
        debug!(%status, user_id = user.user_id, "AniList activity query answered");

        if !status.is_success() {
            return Err(NekoError::Fetch {
                user_id: user.user_id,
                status,
            });
        }

        let body: GraphQlResponse<ActivityData> = response.json().await?;
        Ok(body
            .data
            .and_then(|d| d.activity)
            .map(ActivityRecord::from)
            .unwrap_or(ActivityRecord::Unsupported(None)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(raw: &str) -> ActivityRecord {
        let body: GraphQlResponse<ActivityData> = serde_json::from_str(raw).unwrap();
        body.data
            .and_then(|d| d.activity)
            .map(ActivityRecord::from)
            .unwrap_or(ActivityRecord::Unsupported(None))
    }

    #[test]
    fn test_decode_text_activity() {
        let record = decode(
            r#"{"data":{"Activity":{"type":"TEXT","createdAt":1700000000,"replyCount":3,"likeCount":10,"text":"hello world"}}}"#,
        );
        assert_eq!(
            record,
            ActivityRecord::Text(TextActivity {
                created_at: 1_700_000_000,
                reply_count: 3,
                like_count: 10,
                text: "hello world".to_string(),
            })
        );
    }

    #[test]
    fn test_decode_manga_list_with_numeric_progress() {
        let record = decode(
            r#"{"data":{"Activity":{"type":"MANGA_LIST","createdAt":1,"replyCount":0,"likeCount":2,"status":"read chapter","progress":12,"media":{"title":{"romaji":"Yotsuba to!"}}}}}"#,
        );
        match record {
            ActivityRecord::MediaList(a) => {
                assert_eq!(a.kind, MediaKind::Manga);
                assert_eq!(a.progress.as_deref(), Some("12"));
                assert_eq!(a.media_title, "Yotsuba to!");
                assert_eq!(a.status, "read chapter");
            }
            other => panic!("unexpected record {:?}", other),
        }
    }

    #[test]
    fn test_decode_anime_list_null_progress() {
        let record = decode(
            r#"{"data":{"Activity":{"type":"ANIME_LIST","createdAt":1,"replyCount":0,"likeCount":0,"status":"completed","progress":null,"media":{"title":{"romaji":"Cowboy Bebop"}}}}}"#,
        );
        match record {
            ActivityRecord::MediaList(a) => {
                assert_eq!(a.kind, MediaKind::Anime);
                assert_eq!(a.progress, None);
                assert_eq!(a.shown_progress(), None);
            }
            other => panic!("unexpected record {:?}", other),
        }
    }

    #[test]
    fn test_decode_unknown_type_is_unsupported() {
        let record = decode(r#"{"data":{"Activity":{"type":"MESSAGE","createdAt":1}}}"#);
        assert_eq!(
            record,
            ActivityRecord::Unsupported(Some("MESSAGE".to_string()))
        );
    }

    #[test]
    fn test_decode_empty_fragment_is_unsupported() {
        // Activities outside the queried fragments come back as an empty object.
        assert_eq!(
            decode(r#"{"data":{"Activity":{}}}"#),
            ActivityRecord::Unsupported(None)
        );
    }

    #[test]
    fn test_decode_null_activity_is_unsupported() {
        assert_eq!(
            decode(r#"{"data":{"Activity":null}}"#),
            ActivityRecord::Unsupported(None)
        );
    }

    #[test]
    fn test_decode_missing_created_at_is_unsupported() {
        assert_eq!(
            decode(r#"{"data":{"Activity":{"type":"TEXT","replyCount":1,"likeCount":1,"text":"hi"}}}"#),
            ActivityRecord::Unsupported(Some("TEXT".to_string()))
        );
    }

    #[test]
    fn test_decode_out_of_range_created_at_is_unsupported() {
        assert_eq!(
            decode(r#"{"data":{"Activity":{"type":"ANIME_LIST","createdAt":9223372036854775807,"status":"watched"}}}"#),
            ActivityRecord::Unsupported(Some("ANIME_LIST".to_string()))
        );
    }

    #[test]
    fn test_fetcher_new() {
        let fetcher = AniListFetcher::new("https://graphql.anilist.co");
        assert_eq!(fetcher.endpoint, "https://graphql.anilist.co");
    }
}
