use anyhow::Context;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::domain::{RedditPost, RedditUser};

const REDDIT_TOKEN_URL: &str = "https://www.reddit.com/api/v1/access_token";
const REDDIT_API_BASE: &str = "https://oauth.reddit.com";

/// Application-only Reddit API client. Constructed fresh for every
/// incoming request, so the token lives exactly as long as the request.
pub struct RedditClient {
    client: Client,
    access_token: String,
    user_agent: String,
}

#[derive(Deserialize)]
struct AccessTokenResponse {
    access_token: String,
}

#[derive(Debug, Default, Deserialize)]
struct Listing {
    #[serde(default)]
    data: ListingData,
}

#[derive(Debug, Default, Deserialize)]
struct ListingData {
    #[serde(default)]
    children: Vec<ListingChild>,
}

#[derive(Debug, Default, Deserialize)]
struct ListingChild {
    #[serde(default)]
    data: PostData,
}

#[derive(Debug, Default, Deserialize)]
struct PostData {
    #[serde(default)]
    id: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    author: String,
    #[serde(default)]
    subreddit: String,
    #[serde(default)]
    score: i64,
    #[serde(default)]
    num_comments: u64,
    #[serde(default)]
    url: String,
    #[serde(default)]
    permalink: String,
    #[serde(default)]
    created_utc: f64,
    #[serde(default)]
    selftext: String,
}

#[derive(Debug, Deserialize)]
struct UserAbout {
    data: UserAboutData,
}

#[derive(Debug, Default, Deserialize)]
struct UserAboutData {
    #[serde(default)]
    comment_karma: i64,
    #[serde(default)]
    link_karma: i64,
    #[serde(default)]
    created_utc: f64,
    #[serde(default)]
    is_verified: bool,
}

impl RedditClient {
    /// Runs the OAuth client-credentials exchange and keeps the token.
    pub async fn connect(
        client_id: &str,
        client_secret: &str,
        user_agent: &str,
    ) -> anyhow::Result<Self> {
        let client = Client::new();

        let response = client
            .post(REDDIT_TOKEN_URL)
            .basic_auth(client_id, Some(client_secret))
            .header("User-Agent", user_agent)
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await
            .context("Reddit token request failed")?
            .error_for_status()
            .context("Reddit rejected the credentials")?;

        let token: AccessTokenResponse = response
            .json()
            .await
            .context("Reddit token response was not valid JSON")?;

        Ok(RedditClient {
            client,
            access_token: token.access_token,
            user_agent: user_agent.to_string(),
        })
    }

    /// Searches posts, scoped to one subreddit when given, globally
    /// otherwise. A failed search logs and returns no posts rather than
    /// failing the whole request.
    pub async fn search_posts(
        &self,
        query: &str,
        subreddit: Option<&str>,
        limit: u32,
        time_filter: &str,
    ) -> Vec<RedditPost> {
        let limit = limit.to_string();
        let (endpoint, params): (String, Vec<(&str, &str)>) = match subreddit {
            Some(name) => (
                format!("/r/{}/search", name),
                vec![
                    ("q", query),
                    ("restrict_sr", "true"),
                    ("sort", "hot"),
                    ("t", time_filter),
                    ("limit", &limit),
                ],
            ),
            None => (
                "/search".to_string(),
                vec![
                    ("q", query),
                    ("sort", "hot"),
                    ("t", time_filter),
                    ("limit", &limit),
                    ("type", "link"),
                ],
            ),
        };

        match self.get_json::<Listing>(&endpoint, &params).await {
            Ok(listing) => posts_from_listing(listing),
            Err(e) => {
                log::error!("Reddit search on {} failed: {:?}", endpoint, e);
                Vec::new()
            }
        }
    }

    /// Profile lookup; `None` when the lookup fails or returns no data.
    pub async fn user_about(&self, username: &str) -> Option<RedditUser> {
        let endpoint = format!("/user/{}/about", username);

        match self.get_json::<UserAbout>(&endpoint, &[]).await {
            Ok(about) => Some(RedditUser {
                username: username.to_string(),
                comment_karma: about.data.comment_karma,
                link_karma: about.data.link_karma,
                created_utc: about.data.created_utc,
                reddit_url: format!("https://reddit.com/user/{}", username),
                is_verified: about.data.is_verified,
                relevance_score: 0.0,
            }),
            Err(e) => {
                log::error!("Reddit user lookup for {} failed: {:?}", username, e);
                None
            }
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> anyhow::Result<T> {
        let url = format!("{}{}", REDDIT_API_BASE, endpoint);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.access_token)
            .header("User-Agent", &self.user_agent)
            .query(params)
            .send()
            .await
            .context("Reddit API request failed")?
            .error_for_status()
            .context("Reddit API returned an error status")?;

        response
            .json::<T>()
            .await
            .context("Reddit API response was not valid JSON")
    }
}

fn posts_from_listing(listing: Listing) -> Vec<RedditPost> {
    listing
        .data
        .children
        .into_iter()
        .map(|child| RedditPost {
            id: child.data.id,
            title: child.data.title,
            author: child.data.author,
            subreddit: child.data.subreddit,
            score: child.data.score,
            num_comments: child.data.num_comments,
            url: child.data.url,
            reddit_url: format!("https://reddit.com{}", child.data.permalink),
            created_utc: child.data.created_utc,
            selftext: Some(child.data.selftext),
        })
        .collect()
}
