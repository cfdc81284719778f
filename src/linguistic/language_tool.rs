//! HTTP client for LanguageTool-compatible `/v2/check` endpoints.

use crate::linguistic::augment::{AugmentError, GrammarChecker, RemoteFinding};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

/// Public LanguageTool endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.languagetool.org/v2/check";

/// LanguageTool client configuration.
#[derive(Debug, Clone)]
pub struct LanguageToolConfig {
    pub endpoint: String,
    /// Optional checking level (e.g. `picky`)
    pub level: Option<String>,
    /// Transport-level timeout
    pub timeout: Duration,
}

impl Default for LanguageToolConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            level: None,
            timeout: Duration::from_secs(5),
        }
    }
}

#[derive(Debug, Deserialize)]
struct CheckResponse {
    matches: Vec<CheckMatch>,
}

#[derive(Debug, Deserialize)]
struct CheckMatch {
    message: String,
    offset: usize,
    length: usize,
    #[serde(default)]
    replacements: Vec<Replacement>,
    rule: CheckRule,
}

#[derive(Debug, Deserialize)]
struct Replacement {
    value: String,
}

#[derive(Debug, Deserialize)]
struct CheckRule {
    id: String,
    category: CheckCategory,
}

#[derive(Debug, Deserialize)]
struct CheckCategory {
    name: String,
}

/// LanguageTool grammar checker.
pub struct LanguageToolClient {
    config: LanguageToolConfig,
    client: reqwest::Client,
}

impl LanguageToolClient {
    /// Create a new client.
    pub fn new(config: LanguageToolConfig) -> Result<Self, AugmentError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AugmentError::Network(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { config, client })
    }

    /// Get the configured endpoint.
    pub fn endpoint(&self) -> &str {
        &self.config.endpoint
    }
}

#[async_trait]
impl GrammarChecker for LanguageToolClient {
    fn name(&self) -> &str {
        "languagetool"
    }

    async fn check(&self, text: &str, locale: &str) -> Result<Vec<RemoteFinding>, AugmentError> {
        let mut form = vec![("text", text), ("language", locale)];
        if let Some(level) = self.config.level.as_deref() {
            form.push(("level", level));
        }

        let response = self
            .client
            .post(&self.config.endpoint)
            .form(&form)
            .send()
            .await
            .map_err(|e| AugmentError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AugmentError::Status {
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| AugmentError::Network(e.to_string()))?;

        parse_response(text, &body)
    }
}

/// Convert a `/v2/check` body into findings.
///
/// The server reports UTF-16 offsets; findings carry character offsets into
/// `text`.
pub fn parse_response(text: &str, body: &str) -> Result<Vec<RemoteFinding>, AugmentError> {
    let response: CheckResponse =
        serde_json::from_str(body).map_err(|e| AugmentError::Malformed(e.to_string()))?;

    Ok(response
        .matches
        .into_iter()
        .map(|m| {
            let (offset, matched_text) = utf16_span(text, m.offset, m.length);
            RemoteFinding {
                matched_text,
                message: m.message,
                offset,
                rule_id: m.rule.id,
                category: m.rule.category.name,
                replacements: m.replacements.into_iter().map(|r| r.value).collect(),
            }
        })
        .collect())
}

/// Map a UTF-16 span onto `text` as a char offset plus the covered text.
fn utf16_span(text: &str, offset: usize, length: usize) -> (usize, String) {
    let end = offset.saturating_add(length);
    let mut units = 0;
    let mut char_offset = None;
    let mut matched = String::new();

    for (index, c) in text.chars().enumerate() {
        if units >= offset {
            char_offset.get_or_insert(index);
            if units >= end {
                break;
            }
            matched.push(c);
        }
        units += c.len_utf16();
    }

    (char_offset.unwrap_or_else(|| text.chars().count()), matched)
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &str = r#"{
        "matches": [
            {
                "message": "Possível erro ortográfico",
                "offset": 4,
                "length": 5,
                "replacements": [{"value": "casa"}, {"value": "caso"}],
                "context": {"text": "Uma cassa azul", "offset": 4, "length": 5},
                "rule": {"id": "HUNSPELL_RULE", "category": {"id": "TYPOS", "name": "Possible Typo"}}
            }
        ]
    }"#;

    #[test]
    fn test_parse_response() {
        let findings = parse_response("Uma cassa azul", BODY).unwrap();
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].matched_text, "cassa");
        assert_eq!(findings[0].replacements, vec!["casa", "caso"]);
        assert!(findings[0].is_spelling());
    }

    #[test]
    fn test_offsets_after_astral_characters() {
        // the emoji is two UTF-16 units but one char
        let text = "Olá 😀 uma cassa azul";
        let body = r#"{"matches": [{
            "message": "Possível erro ortográfico",
            "offset": 11,
            "length": 5,
            "replacements": [{"value": "casa"}],
            "rule": {"id": "HUNSPELL_RULE", "category": {"id": "TYPOS", "name": "Possible Typo"}}
        }]}"#;

        let findings = parse_response(text, body).unwrap();
        assert_eq!(findings[0].matched_text, "cassa");
        assert_eq!(findings[0].offset, 10);
    }

    #[test]
    fn test_utf16_span_edges() {
        assert_eq!(utf16_span("abc", 1, 0), (1, String::new()));
        assert_eq!(utf16_span("abc", 10, 2), (3, String::new()));
        assert_eq!(utf16_span("ação", 1, 2), (1, "çã".to_string()));
    }

    #[test]
    fn test_parse_malformed() {
        assert!(matches!(
            parse_response("x", "<html>"),
            Err(AugmentError::Malformed(_))
        ));
        assert!(matches!(
            parse_response("x", r#"{"other": 1}"#),
            Err(AugmentError::Malformed(_))
        ));
    }

    #[test]
    fn test_default_config() {
        let client = LanguageToolClient::new(LanguageToolConfig::default()).unwrap();
        assert_eq!(client.endpoint(), DEFAULT_ENDPOINT);
    }
}
