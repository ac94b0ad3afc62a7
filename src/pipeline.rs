use crate::card::{render_card, PublishedCard};
use crate::config::{CardLayout, Config};
use crate::error::Result;
use crate::feeds::anilist::AniListFetcher;
use crate::feeds::github::GistPublisher;
use crate::feeds::{ActivityRecord, ActivitySource, CardPublisher};
use tracing::{info, warn};

/// How a run ended when nothing went wrong.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Published(PublishedCard),
    /// The latest activity is of a kind the card can't show. Carries the
    /// reported type, if there was one.
    Unsupported(Option<String>),
}

/// Resolve, fetch, render, publish. Each step runs once and in order.
pub async fn run<S, P>(
    source: &S,
    publisher: &P,
    username: &str,
    layout: &CardLayout,
) -> Result<Outcome>
where
    S: ActivitySource + ?Sized,
    P: CardPublisher + ?Sized,
{
    let user = source.resolve_user(username).await?;
    info!(username = %user.username, user_id = user.user_id, "resolved AniList user");

    let activity = source.latest_activity(&user).await?;

    let Some(card) = render_card(&user.username, &activity, layout) else {
        let kind = match activity {
            ActivityRecord::Unsupported(kind) => kind,
            _ => None,
        };
        warn!(activity_type = ?kind, "latest activity type not supported");
        return Ok(Outcome::Unsupported(kind));
    };

    info!(description = %card.description, "rendered activity card");
    publisher.publish(&card).await?;
    info!("gist updated");

    Ok(Outcome::Published(card))
}

/// Build the real clients from `config` and run once.
pub async fn run_with_config(config: &Config) -> Result<Outcome> {
    let source = AniListFetcher::new(config.anilist_api.clone());
    let publisher = GistPublisher::new(
        config.github_api.clone(),
        config.gh_token.clone(),
        config.gist_id.clone(),
        config.gist_filename.clone(),
    );

    run(&source, &publisher, &config.anilist_username, &config.layout).await
}
