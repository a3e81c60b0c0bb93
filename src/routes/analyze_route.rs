use actix_web::{post, web, HttpResponse};
use serde::Deserialize;

use crate::configuration::Settings;
use crate::domain::extract_sections;
use crate::routes::internal_error;
use crate::services::PerplexityClient;

#[derive(Deserialize)]
struct AnalyzeRequest {
    idea: String,
}

#[post("/analyze")]
async fn analyze(
    body: web::Json<AnalyzeRequest>,
    settings: web::Data<Settings>,
) -> HttpResponse {
    /*
    1. Extract Reddit search keywords from the idea
    2. Web search scoped to reddit.com using those keywords
    3. Summarize the findings into three labeled sections
    4. Split the narrative into summary / pain points / features
    */

    if settings.api_keys.perplexity.is_empty() {
        return internal_error("API key not set.".to_string());
    }
    let perplexity = PerplexityClient::new(settings.api_keys.perplexity.clone());

    let keywords = match perplexity.extract_keywords(&body.idea).await {
        Ok(keywords) => keywords,
        Err(e) => return internal_error(format!("Failed to extract keywords: {}", e)),
    };
    log::info!("Extracted keywords: {}", keywords);

    let findings = match perplexity.search_reddit_discussions(&keywords).await {
        Ok(findings) => findings,
        Err(e) => return internal_error(format!("Failed to search Reddit: {}", e)),
    };

    let narrative = match perplexity.summarize_findings(&body.idea, &findings).await {
        Ok(narrative) => narrative,
        Err(e) => return internal_error(format!("Failed to summarize Reddit findings: {}", e)),
    };

    HttpResponse::Ok().json(extract_sections(&narrative))
}
