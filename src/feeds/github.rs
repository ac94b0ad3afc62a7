use super::CardPublisher;
use crate::card::PublishedCard;
use crate::error::{NekoError, Result};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;

pub struct GistPublisher {
    api_base: String,
    token: String,
    gist_id: String,
    filename: String,
    client: reqwest::Client,
}

#[derive(Debug, Serialize)]
struct GistUpdate<'a> {
    description: &'a str,
    public: bool,
    files: HashMap<&'a str, GistFile<'a>>,
}

#[derive(Debug, Serialize)]
struct GistFile<'a> {
    content: &'a str,
}

impl GistPublisher {
    pub fn new(api_base: String, token: String, gist_id: String, filename: String) -> Self {
        Self {
            api_base,
            token,
            gist_id,
            filename,
            client: reqwest::Client::new(),
        }
    }

    fn payload<'a>(&'a self, card: &'a PublishedCard) -> GistUpdate<'a> {
        GistUpdate {
            description: &card.description,
            public: true,
            files: HashMap::from([(
                self.filename.as_str(),
                GistFile {
                    content: &card.content,
                },
            )]),
        }
    }
}

#[async_trait]
impl CardPublisher for GistPublisher {
    async fn publish(&self, card: &PublishedCard) -> Result<()> {
        let url = format!("{}/gists/{}", self.api_base, self.gist_id);

        let response = self
            .client
            .post(&url)
            .query(&[("scope", "gist")])
            .header("Authorization", format!("token {}", self.token))
            .header("User-Agent", "nekobox")
            .header("Accept", "application/vnd.github.v3+json")
            .json(&self.payload(card))
            .send()
            .await?;

        let status = response.status();
        debug!(%status, gist_id = %self.gist_id, "GitHub gist update answered");

        if status != StatusCode::OK && status != StatusCode::CREATED {
            return Err(NekoError::Publish {
                gist_id: self.gist_id.clone(),
                status,
            });
        }

        Ok(())
    }
}
