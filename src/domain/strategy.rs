use regex::Regex;
use serde::{Deserialize, Serialize};

pub const DEFAULT_SUBREDDITS: [&str; 3] = ["startups", "entrepreneur", "business"];
pub const DEFAULT_USER_PERSONAS: [&str; 2] = ["entrepreneurs", "early adopters"];

/// How to search Reddit for a given idea. Derived from a model response
/// once per request; whatever shape the model returned is passed through
/// as-is, with per-field defaults filling the gaps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchStrategy {
    #[serde(default)]
    pub keywords: String,
    #[serde(default)]
    pub subreddits: Vec<String>,
    #[serde(default)]
    pub user_personas: Vec<String>,
    #[serde(default = "default_timeframe")]
    pub search_timeframe: String,
    #[serde(default = "default_content_types")]
    pub content_types: String,
}

fn default_timeframe() -> String {
    "month".to_string()
}

fn default_content_types() -> String {
    "both".to_string()
}

impl SearchStrategy {
    /// Fixed strategy used when strategy generation fails outright.
    pub fn fallback(idea: &str) -> Self {
        SearchStrategy {
            keywords: idea.to_string(),
            subreddits: DEFAULT_SUBREDDITS.map(String::from).to_vec(),
            user_personas: DEFAULT_USER_PERSONAS.map(String::from).to_vec(),
            search_timeframe: default_timeframe(),
            content_types: default_content_types(),
        }
    }

    /// Pulls a strategy out of a model response that should contain a JSON
    /// object, possibly wrapped in prose.
    ///
    /// The first `{` through the last `}` is parsed strictly; an
    /// unparseable span falls back to the fixed strategy, and a response
    /// with no braces at all degrades to its first line as keywords (the
    /// idea itself when the response is empty) plus the default lists.
    pub fn from_response(response: &str, idea: &str) -> Self {
        let json_span = Regex::new(r"(?s)\{.*\}")
            .ok()
            .and_then(|re| re.find(response))
            .map(|m| m.as_str().to_string());

        if let Some(span) = json_span {
            return match serde_json::from_str::<SearchStrategy>(&span) {
                Ok(strategy) => strategy,
                Err(e) => {
                    log::error!("Strategy JSON did not parse: {:?}", e);
                    SearchStrategy::fallback(idea)
                }
            };
        }

        let keywords = if response.is_empty() {
            idea.to_string()
        } else {
            response.lines().next().unwrap_or_default().to_string()
        };

        SearchStrategy {
            keywords,
            subreddits: DEFAULT_SUBREDDITS.map(String::from).to_vec(),
            user_personas: DEFAULT_USER_PERSONAS.map(String::from).to_vec(),
            search_timeframe: default_timeframe(),
            content_types: default_content_types(),
        }
    }
}
