use std::time::Duration;

use anyhow::{anyhow, Context};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::domain::SearchStrategy;

const PERPLEXITY_API_URL: &str = "https://api.perplexity.ai/chat/completions";
const MODEL: &str = "sonar-pro";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

const KEYWORD_EXTRACTION_PROMPT: &str = "Extract the most relevant keywords and phrases from the following startup idea for searching on Reddit. Return a comma-separated list of keywords only.";

const SUMMARY_SYSTEM_PROMPT: &str = "You are an expert Reddit analyst who extracts detailed, actionable insights from Reddit discussions for startup validation. Always structure your response with exactly these three sections: 1. SUMMARY:, 2. PAIN POINTS:, 3. FEATURES:. Include specific product names, brands, pricing details, and exact user quotes when available.";

const STRATEGY_SYSTEM_PROMPT: &str = r#"You are a Reddit search strategist. Given a startup idea, determine the best search approach.

Return a JSON response with:
1. "keywords": comma-separated search terms
2. "subreddits": list of 5-10 relevant subreddit names (without r/ prefix)
3. "user_personas": types of users to look for
4. "search_timeframe": "week", "month", or "year"
5. "content_types": "posts", "comments", or "both"

Example format:
{
  "keywords": "smart pet collar, GPS tracking, pet health",
  "subreddits": ["dogs", "cats", "pets", "pettech", "dogtraining"],
  "user_personas": ["pet owners", "veterinarians", "pet tech enthusiasts"],
  "search_timeframe": "month",
  "content_types": "both"
}"#;

pub struct PerplexityClient {
    client: Client,
    api_key: String,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    search_domain_filter: Option<Vec<&'a str>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    web_search_options: Option<WebSearchOptions<'a>>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct WebSearchOptions<'a> {
    search_context_size: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

impl PerplexityClient {
    pub fn new(api_key: String) -> Self {
        PerplexityClient {
            client: Client::new(),
            api_key,
        }
    }

    /// Comma-separated Reddit search keywords for an idea.
    pub async fn extract_keywords(&self, idea: &str) -> anyhow::Result<String> {
        self.chat(&ChatRequest {
            model: MODEL,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: KEYWORD_EXTRACTION_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: idea,
                },
            ],
            search_domain_filter: None,
            web_search_options: None,
        })
        .await
    }

    /// Raw findings from a web search scoped to reddit.com.
    pub async fn search_reddit_discussions(&self, keywords: &str) -> anyhow::Result<String> {
        let prompt = format!(
            "Search Reddit discussions about {}. I need detailed, specific insights from actual Reddit users including: specific product names mentioned, exact pain points users complain about, detailed feature requests, pricing concerns, brand comparisons, and real user experiences. Focus on finding authentic Reddit conversations from subreddits like r/technology, r/entrepreneur, r/startups, and relevant product-specific communities.",
            keywords
        );

        self.chat(&ChatRequest {
            model: MODEL,
            messages: vec![ChatMessage {
                role: "user",
                content: &prompt,
            }],
            search_domain_filter: Some(vec!["reddit.com"]),
            web_search_options: Some(WebSearchOptions {
                search_context_size: "high",
            }),
        })
        .await
    }

    /// Three-section narrative over the gathered findings, to be split by
    /// the section extractor.
    pub async fn summarize_findings(&self, idea: &str, findings: &str) -> anyhow::Result<String> {
        let prompt = format!(
            "Based on this Reddit research about '{}', provide a comprehensive structured analysis:\n\n{}\n\nFormat your response with exactly these three sections:\n\n1. SUMMARY: [Provide detailed overview of Reddit sentiment, specific subreddits mentioned, popular brands/products discussed, and overall market reception. Include specific examples and user experiences.]\n\n2. PAIN POINTS: [List specific, detailed complaints users have mentioned. Include exact issues like battery life, pricing concerns, subscription fees, accuracy problems, etc. Format as bullet points with specific details.]\n\n3. FEATURES: [List detailed feature requests and suggestions from Reddit users. Include specific functionality, integrations, improvements, and innovations users want. Format as bullet points with comprehensive descriptions.]\n\nMake each section rich with specific details, product names, pricing information, and authentic Reddit user insights.",
            idea, findings
        );

        self.chat(&ChatRequest {
            model: MODEL,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SUMMARY_SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: &prompt,
                },
            ],
            search_domain_filter: None,
            web_search_options: None,
        })
        .await
    }

    /// Never fails: a request error falls back to the fixed strategy, an
    /// off-format response to the degraded one. No retry either way.
    pub async fn get_search_strategy(&self, idea: &str) -> SearchStrategy {
        let prompt = format!("Create a Reddit search strategy for this startup idea: {}", idea);
        let request = ChatRequest {
            model: MODEL,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: STRATEGY_SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: &prompt,
                },
            ],
            search_domain_filter: None,
            web_search_options: None,
        };

        match self.chat(&request).await {
            Ok(response) => SearchStrategy::from_response(&response, idea),
            Err(e) => {
                log::error!("Strategy generation failed: {:?}", e);
                SearchStrategy::fallback(idea)
            }
        }
    }

    async fn chat(&self, request: &ChatRequest<'_>) -> anyhow::Result<String> {
        let response = self
            .client
            .post(PERPLEXITY_API_URL)
            .bearer_auth(&self.api_key)
            .timeout(REQUEST_TIMEOUT)
            .json(request)
            .send()
            .await
            .context("Perplexity request failed")?
            .error_for_status()
            .context("Perplexity returned an error status")?;

        let body: ChatResponse = response
            .json()
            .await
            .context("Perplexity response was not valid JSON")?;

        body.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| anyhow!("No content in Perplexity response"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn web_search_fields_are_omitted_when_unset() {
        let request = ChatRequest {
            model: MODEL,
            messages: vec![ChatMessage {
                role: "user",
                content: "hi",
            }],
            search_domain_filter: None,
            web_search_options: None,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("search_domain_filter").is_none());
        assert!(json.get("web_search_options").is_none());
    }

    #[test]
    fn reddit_scoped_request_serializes_search_options() {
        let request = ChatRequest {
            model: MODEL,
            messages: vec![ChatMessage {
                role: "user",
                content: "hi",
            }],
            search_domain_filter: Some(vec!["reddit.com"]),
            web_search_options: Some(WebSearchOptions {
                search_context_size: "high",
            }),
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["search_domain_filter"][0], "reddit.com");
        assert_eq!(json["web_search_options"]["search_context_size"], "high");
    }
}
