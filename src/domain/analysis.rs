use regex::Regex;
use serde::Serialize;

/// One analysis per request, discarded after the response is sent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub summary: String,
    pub pain_points: String,
    pub features: String,
}

/// Splits a model narrative into its `SUMMARY:` / `PAIN POINTS:` /
/// `FEATURES:` sections.
///
/// This is pure pattern matching against whatever text the model produced.
/// A label quoted inside a user remark is still a section boundary, and a
/// trailing header with nothing after it yields an empty section. Keep it
/// that way: the prompts were tuned against this splitter.
pub fn extract_sections(raw: &str) -> AnalysisResult {
    match split_labeled_sections(raw) {
        Ok(result) => result,
        Err(e) => {
            log::error!("Section extraction failed: {:?}", e);
            AnalysisResult {
                summary: raw.to_string(),
                pain_points: "Could not extract pain points.".to_string(),
                features: "Could not extract features.".to_string(),
            }
        }
    }
}

fn split_labeled_sections(raw: &str) -> Result<AnalysisResult, regex::Error> {
    let summary_label = Regex::new(r"(?i)SUMMARY:")?;
    let pain_points_label = Regex::new(r"(?i)PAIN POINTS:")?;
    let features_label = Regex::new(r"(?i)FEATURES:")?;

    let summary = capture_after(raw, &summary_label, &[&pain_points_label, &features_label]);
    let pain_points = capture_after(raw, &pain_points_label, &[&features_label]);
    let features = capture_after(raw, &features_label, &[]);

    if is_blank(&summary) && is_blank(&pain_points) && is_blank(&features) {
        // Looser labels for responses that dropped the colons or headers.
        let summary_loose = Regex::new(r"(?i)summary[\s\-:]*")?;
        let pain_points_loose = Regex::new(r"(?i)pain points[\s\-:]*")?;
        let features_loose = Regex::new(r"(?i)features[\s\-:]*")?;
        let pain_points_word = Regex::new(r"(?i)pain points")?;
        let features_word = Regex::new(r"(?i)features")?;

        let summary = capture_after(raw, &summary_loose, &[&pain_points_word, &features_word]);
        let pain_points = capture_after(raw, &pain_points_loose, &[&features_word]);
        let features = capture_after(raw, &features_loose, &[]);

        return Ok(AnalysisResult {
            summary: summary.unwrap_or_else(|| raw.to_string()),
            pain_points: pain_points.unwrap_or_else(|| "Not found in results.".to_string()),
            features: features.unwrap_or_else(|| "Not found in results.".to_string()),
        });
    }

    Ok(AnalysisResult {
        summary: summary.unwrap_or_default(),
        pain_points: pain_points.unwrap_or_default(),
        features: features.unwrap_or_default(),
    })
}

fn is_blank(section: &Option<String>) -> bool {
    section.as_deref().map_or(true, |s| s.is_empty())
}

/// Text after the first match of `label`, up to the earliest match of any
/// `boundaries` pattern, trimmed. `None` when the label never occurs.
fn capture_after(raw: &str, label: &Regex, boundaries: &[&Regex]) -> Option<String> {
    let label_match = label.find(raw)?;
    let rest = &raw[label_match.end()..];

    let mut end = rest.len();
    for boundary in boundaries {
        if let Some(boundary_match) = boundary.find(rest) {
            end = end.min(boundary_match.start());
        }
    }

    Some(rest[..end].trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_three_well_formed_sections() {
        let text = "SUMMARY: Overall positive sentiment.\nPAIN POINTS: Short battery life.\nFEATURES: Geofencing alerts.";
        let result = extract_sections(text);

        assert_eq!(result.summary, "Overall positive sentiment.");
        assert_eq!(result.pain_points, "Short battery life.");
        assert_eq!(result.features, "Geofencing alerts.");
    }

    #[test]
    fn labels_match_case_insensitively() {
        let text = "Summary: a\npain points: b\nFeatures: c";
        let result = extract_sections(text);

        assert_eq!(result.summary, "a");
        assert_eq!(result.pain_points, "b");
        assert_eq!(result.features, "c");
    }

    #[test]
    fn sections_never_contain_later_label_text() {
        let text = "SUMMARY: first part\n\nPAIN POINTS: second part\n\nFEATURES: third part";
        let result = extract_sections(text);

        assert!(!result.summary.contains("PAIN POINTS:"));
        assert!(!result.summary.contains("FEATURES:"));
        assert!(!result.pain_points.contains("FEATURES:"));
    }

    #[test]
    fn trailing_header_without_body_yields_empty_section() {
        let text = "SUMMARY: users want this\nPAIN POINTS: price\nFEATURES:";
        let result = extract_sections(text);

        assert_eq!(result.summary, "users want this");
        assert_eq!(result.pain_points, "price");
        assert_eq!(result.features, "");
    }

    #[test]
    fn quoted_label_is_still_a_boundary() {
        let text = r#"SUMMARY: One user said "the FEATURES: tab is broken". PAIN POINTS: none really."#;
        let result = extract_sections(text);

        assert_eq!(result.summary, r#"One user said "the"#);
        assert_eq!(result.features, r#"tab is broken". PAIN POINTS: none really."#);
    }

    #[test]
    fn loose_fallback_handles_dash_separators() {
        let text = "Summary - overview here\nPain Points - pricing complaints\nFeatures - live tracking";
        let result = extract_sections(text);

        assert_eq!(result.summary, "overview here");
        assert_eq!(result.pain_points, "pricing complaints");
        assert_eq!(result.features, "live tracking");
    }

    #[test]
    fn label_free_text_becomes_summary_with_placeholders() {
        let text = "The model went off script and returned prose only.";
        let result = extract_sections(text);

        assert_eq!(result.summary, text);
        assert_eq!(result.pain_points, "Not found in results.");
        assert_eq!(result.features, "Not found in results.");
    }
}
