use serde::Serialize;

/// Author value Reddit substitutes for removed accounts.
pub const DELETED_AUTHOR: &str = "[deleted]";

#[derive(Debug, Clone, Serialize)]
pub struct RedditPost {
    pub id: String,
    pub title: String,
    pub author: String,
    pub subreddit: String,
    pub score: i64,
    pub num_comments: u64,
    pub url: String,
    pub reddit_url: String,
    pub created_utc: f64,
    pub selftext: Option<String>,
}

/// Comment search is not implemented yet; the response shape carries an
/// always-empty list of these.
#[derive(Debug, Clone, Serialize)]
pub struct RedditComment {
    pub id: String,
    pub author: String,
    pub body: String,
    pub score: i64,
    pub subreddit: String,
    pub post_title: String,
    pub reddit_url: String,
    pub created_utc: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct RedditUser {
    pub username: String,
    pub comment_karma: i64,
    pub link_karma: i64,
    pub created_utc: f64,
    pub reddit_url: String,
    pub is_verified: bool,
    /// Reserved for a later scoring pass; currently always 0.0.
    pub relevance_score: f64,
}
