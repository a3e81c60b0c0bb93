use std::collections::HashSet;

use actix_web::{post, web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::configuration::Settings;
use crate::domain::{RedditComment, RedditPost, RedditUser, SearchStrategy, DELETED_AUTHOR};
use crate::routes::internal_error;
use crate::services::{PerplexityClient, RedditClient};

// Caps keep each request inside Reddit's rate limits.
const SUBREDDIT_SEARCH_CAP: usize = 5;
const PER_SUBREDDIT_LIMIT: u32 = 10;
const GLOBAL_SEARCH_LIMIT: u32 = 15;
const USER_LOOKUP_CAP: usize = 10;
const POST_RESULT_CAP: usize = 20;

#[derive(Deserialize)]
struct ReachRequest {
    idea: String,
}

#[derive(Serialize)]
struct ReachResponse {
    relevant_posts: Vec<RedditPost>,
    active_comments: Vec<RedditComment>,
    key_users: Vec<RedditUser>,
    search_strategy: String,
    recommended_subreddits: Vec<String>,
}

#[post("/reach")]
async fn reach(body: web::Json<ReachRequest>, settings: web::Data<Settings>) -> HttpResponse {
    /*
    1. Ask the model for a search strategy (falls back to a fixed one)
    2. Search the first few recommended subreddits, then globally
    3. Deduplicate authors and look up a handful of profiles
    4. Assemble the capped aggregate response
    */

    if settings.api_keys.perplexity.is_empty() {
        return internal_error("Perplexity API key not set.".to_string());
    }
    if settings.api_keys.reddit_client_id.is_empty()
        || settings.api_keys.reddit_client_secret.is_empty()
    {
        return internal_error("Reddit API credentials not set.".to_string());
    }

    let perplexity = PerplexityClient::new(settings.api_keys.perplexity.clone());
    let reddit = match RedditClient::connect(
        &settings.api_keys.reddit_client_id,
        &settings.api_keys.reddit_client_secret,
        &settings.api_keys.reddit_user_agent,
    )
    .await
    {
        Ok(reddit) => reddit,
        Err(e) => return internal_error(format!("Reach analysis failed: {}", e)),
    };

    let strategy = perplexity.get_search_strategy(&body.idea).await;
    log::info!("Search strategy: {:?}", strategy);

    let mut all_posts: Vec<RedditPost> = Vec::new();
    for subreddit in strategy.subreddits.iter().take(SUBREDDIT_SEARCH_CAP) {
        let posts = reddit
            .search_posts(
                &strategy.keywords,
                Some(subreddit.as_str()),
                PER_SUBREDDIT_LIMIT,
                &strategy.search_timeframe,
            )
            .await;
        all_posts.extend(posts);
    }

    let global_posts = reddit
        .search_posts(
            &strategy.keywords,
            None,
            GLOBAL_SEARCH_LIMIT,
            &strategy.search_timeframe,
        )
        .await;
    all_posts.extend(global_posts);

    let mut key_users: Vec<RedditUser> = Vec::new();
    for username in distinct_authors(&all_posts).into_iter().take(USER_LOOKUP_CAP) {
        if let Some(user) = reddit.user_about(&username).await {
            key_users.push(user);
        }
    }

    HttpResponse::Ok().json(build_response(strategy, all_posts, key_users))
}

/// Distinct post authors, excluding deleted accounts and blank author
/// fields. Set iteration order, so the output order is not stable.
fn distinct_authors(posts: &[RedditPost]) -> Vec<String> {
    let mut authors: HashSet<String> = HashSet::new();
    for post in posts {
        if !post.author.is_empty() && post.author != DELETED_AUTHOR {
            authors.insert(post.author.clone());
        }
    }
    authors.into_iter().collect()
}

fn build_response(
    strategy: SearchStrategy,
    mut posts: Vec<RedditPost>,
    key_users: Vec<RedditUser>,
) -> ReachResponse {
    posts.truncate(POST_RESULT_CAP);

    ReachResponse {
        relevant_posts: posts,
        // Comment search is not implemented yet.
        active_comments: Vec::new(),
        key_users,
        search_strategy: format!(
            "Strategy: {} in subreddits: {}",
            strategy.keywords,
            strategy.subreddits.join(", ")
        ),
        recommended_subreddits: strategy.subreddits,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(id: usize, author: &str) -> RedditPost {
        RedditPost {
            id: format!("t3_{}", id),
            title: format!("post {}", id),
            author: author.to_string(),
            subreddit: "startups".to_string(),
            score: 1,
            num_comments: 0,
            url: String::new(),
            reddit_url: String::new(),
            created_utc: 0.0,
            selftext: Some(String::new()),
        }
    }

    #[test]
    fn deleted_and_blank_authors_are_excluded() {
        let posts = vec![
            post(1, "[deleted]"),
            post(2, "[deleted]"),
            post(3, "userA"),
            post(4, "userB"),
            post(5, "userC"),
            post(6, ""),
        ];

        let mut authors = distinct_authors(&posts);
        authors.sort();

        assert_eq!(authors, vec!["userA", "userB", "userC"]);
    }

    #[test]
    fn repeat_authors_count_once() {
        let posts = vec![post(1, "userA"), post(2, "userA"), post(3, "userA")];
        assert_eq!(distinct_authors(&posts).len(), 1);
    }

    #[test]
    fn response_caps_posts_preserving_accumulation_order() {
        // 5 subreddits x 10 posts, then 15 global posts.
        let posts: Vec<RedditPost> = (0..65).map(|i| post(i, "someone")).collect();
        let response = build_response(SearchStrategy::fallback("idea"), posts, Vec::new());

        assert_eq!(response.relevant_posts.len(), 20);
        for (i, p) in response.relevant_posts.iter().enumerate() {
            assert_eq!(p.id, format!("t3_{}", i));
        }
    }

    #[test]
    fn response_echoes_strategy_and_leaves_comments_empty() {
        let strategy = SearchStrategy::fallback("smart pet collar with GPS tracking");
        let response = build_response(strategy, Vec::new(), Vec::new());

        assert!(response.active_comments.is_empty());
        assert_eq!(
            response.search_strategy,
            "Strategy: smart pet collar with GPS tracking in subreddits: startups, entrepreneur, business"
        );
        assert_eq!(
            response.recommended_subreddits,
            vec!["startups", "entrepreneur", "business"]
        );
    }
}
