// Classifier Service
// Client for a hosted text-classification model (Hugging Face inference style)
// plus sentence-level analysis on top of it

use reqwest::Client;
use serde::Deserialize;
use std::future::Future;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, info};

use super::config_store::ClassifierSettings;
use super::text_processor::{compute_metrics, preview};
use crate::models::{
    ClassificationLabel, ClassificationResult, SentenceClassification, TextAnalysisResponse,
};

const PREVIEW_CHARS: usize = 100;

#[derive(Error, Debug)]
pub enum ClassifierError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },
    #[error("Missing label scores in response")]
    MissingScores,
    #[error("JSON parse error: {0}")]
    Json(String),
    #[error("Classifier API token not configured")]
    NotConfigured,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LabelScore {
    pub label: String,
    pub score: f64,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum InferenceResponse {
    Nested(Vec<Vec<LabelScore>>),
    Flat(Vec<LabelScore>),
    Error { error: String },
}

/// Anything that can put a text into Human / AI / Mixed.
pub trait TextClassifier {
    fn classify(
        &self,
        text: &str,
    ) -> impl Future<Output = Result<ClassificationResult, ClassifierError>> + Send;
}

/// Map a model label onto a bucket. Unknown labels are ignored.
pub fn label_bucket(label: &str) -> Option<ClassificationLabel> {
    match label.trim().to_lowercase().as_str() {
        "human" | "human-written" | "real" | "label_0" => Some(ClassificationLabel::Human),
        "ai" | "ai-generated" | "fake" | "machine" | "machine-generated" | "generated"
        | "label_1" => Some(ClassificationLabel::Ai),
        "mixed" => Some(ClassificationLabel::Mixed),
        _ => None,
    }
}

/// Fold raw label scores into the three probabilities and pick the argmax.
///
/// Ties resolve Human, then AI, then Mixed. All-zero scores give `Unknown`.
pub fn fold_scores(scores: &[LabelScore]) -> ClassificationResult {
    let mut result = ClassificationResult::default();
    for s in scores {
        match label_bucket(&s.label) {
            Some(ClassificationLabel::Human) => result.human_prob += s.score,
            Some(ClassificationLabel::Ai) => result.ai_prob += s.score,
            Some(ClassificationLabel::Mixed) => result.mixed_prob += s.score,
            _ => {}
        }
    }

    let mut best = (ClassificationLabel::Unknown, 0.0);
    for (label, prob) in [
        (ClassificationLabel::Human, result.human_prob),
        (ClassificationLabel::Ai, result.ai_prob),
        (ClassificationLabel::Mixed, result.mixed_prob),
    ] {
        if prob > best.1 {
            best = (label, prob);
        }
    }
    result.label = best.0;
    result
}

/// Parse an inference response body into label scores.
pub fn parse_scores(body: &str) -> Result<Vec<LabelScore>, ClassifierError> {
    let parsed: InferenceResponse =
        serde_json::from_str(body).map_err(|e| ClassifierError::Json(e.to_string()))?;
    let scores = match parsed {
        InferenceResponse::Nested(outer) => outer.into_iter().next().unwrap_or_default(),
        InferenceResponse::Flat(scores) => scores,
        InferenceResponse::Error { error } => {
            return Err(ClassifierError::Api {
                status: 200,
                message: error,
            })
        }
    };
    if scores.is_empty() {
        return Err(ClassifierError::MissingScores);
    }
    Ok(scores)
}

pub struct ClassifierClient {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
}

impl ClassifierClient {
    pub fn new(settings: &ClassifierSettings) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .unwrap_or_default();

        Self {
            client,
            endpoint: settings.endpoint(),
            api_key: settings.api_key.clone().filter(|k| !k.trim().is_empty()),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn call_inference_api(&self, text: &str) -> Result<Vec<LabelScore>, ClassifierError> {
        let api_key = self.api_key.as_deref().ok_or(ClassifierError::NotConfigured)?;
        let request = serde_json::json!({ "inputs": text });

        let start = Instant::now();

        let response = self
            .client
            .post(&self.endpoint)
            .header("Authorization", format!("Bearer {}", api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        let latency_ms = start.elapsed().as_millis() as i64;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClassifierError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;
        debug!("[CLASSIFIER] {} chars classified in {}ms", text.chars().count(), latency_ms);
        parse_scores(&body)
    }
}

impl TextClassifier for ClassifierClient {
    async fn classify(&self, text: &str) -> Result<ClassificationResult, ClassifierError> {
        let scores = self.call_inference_api(text).await?;
        Ok(fold_scores(&scores))
    }
}

/// Sentences as the analysis view sees them: split on `.`, trimmed, non-empty.
pub fn analysis_sentences(text: &str) -> Vec<&str> {
    text.split('.')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Classify the whole text, then every sentence on its own.
pub async fn analyze_text<C: TextClassifier>(
    classifier: &C,
    text: &str,
) -> Result<TextAnalysisResponse, ClassifierError> {
    let overall = classifier.classify(text).await?;
    let sentences = analysis_sentences(text);
    let metrics = compute_metrics(text);

    let mut rows = Vec::with_capacity(sentences.len());
    for (idx, sentence) in sentences.iter().enumerate() {
        let result = classifier.classify(sentence).await?;
        rows.push(SentenceClassification {
            index: idx + 1,
            text: preview(sentence, PREVIEW_CHARS),
            label: result.label,
            confidence: result.confidence(),
        });
    }

    info!(
        "[CLASSIFIER] analysis done: overall={} sentences={}",
        overall.label.as_str(),
        rows.len()
    );

    Ok(TextAnalysisResponse {
        overall,
        word_count: metrics.word_count,
        sentence_count: metrics.sentence_count,
        sentences: rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    struct KeywordClassifier;

    impl TextClassifier for KeywordClassifier {
        async fn classify(&self, text: &str) -> Result<ClassificationResult, ClassifierError> {
            let ai = if text.contains("delve") { 0.9 } else { 0.2 };
            Ok(fold_scores(&[
                LabelScore { label: "Real".to_string(), score: 1.0 - ai },
                LabelScore { label: "Fake".to_string(), score: ai },
            ]))
        }
    }

    #[test]
    fn test_parse_nested_and_flat() {
        let nested = r#"[[{"label": "Real", "score": 0.8}, {"label": "Fake", "score": 0.2}]]"#;
        let flat = r#"[{"label": "LABEL_1", "score": 0.7}]"#;
        assert_eq!(parse_scores(nested).unwrap().len(), 2);
        assert_eq!(parse_scores(flat).unwrap()[0].label, "LABEL_1");
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(parse_scores("[]"), Err(ClassifierError::MissingScores)));
        assert!(matches!(parse_scores("[[]]"), Err(ClassifierError::MissingScores)));
        assert!(matches!(parse_scores("oops"), Err(ClassifierError::Json(_))));
        assert!(matches!(
            parse_scores(r#"{"error": "Model is loading"}"#),
            Err(ClassifierError::Api { ref message, .. }) if message == "Model is loading"
        ));
    }

    #[test]
    fn test_fold_scores() {
        let r = fold_scores(&[
            LabelScore { label: "Human".to_string(), score: 0.1 },
            LabelScore { label: "AI".to_string(), score: 0.6 },
            LabelScore { label: "mixed".to_string(), score: 0.3 },
        ]);
        assert_eq!(r.label, ClassificationLabel::Ai);
        assert_eq!(r.confidence(), 0.6);

        let r = fold_scores(&[LabelScore { label: "LABEL_0".to_string(), score: 0.95 }]);
        assert_eq!(r.label, ClassificationLabel::Human);
        assert_eq!(r.ai_prob, 0.0);
    }

    #[test]
    fn test_unknown_labels_give_unknown() {
        let r = fold_scores(&[LabelScore { label: "toxic".to_string(), score: 0.99 }]);
        assert_eq!(r.label, ClassificationLabel::Unknown);
        assert_eq!(r.confidence(), 0.0);
    }

    #[test]
    fn test_client_without_token_is_not_configured() {
        let client = ClassifierClient::new(&ClassifierSettings::default());
        assert!(!client.is_configured());
        assert!(client.endpoint().ends_with("/roberta-base-openai-detector"));
    }

    #[tokio::test]
    async fn test_unconfigured_client_fails_fast() {
        let client = ClassifierClient::new(&ClassifierSettings::default());
        let err = client.classify("Some text.").await.unwrap_err();
        assert!(matches!(err, ClassifierError::NotConfigured));
    }

    #[test]
    fn test_analysis_sentences() {
        assert_eq!(
            analysis_sentences("First one. Second one.  . Third"),
            vec!["First one", "Second one", "Third"]
        );
        assert!(analysis_sentences("...").is_empty());
    }

    #[tokio::test]
    async fn test_analyze_text() {
        let long = "word ".repeat(30);
        let text = format!("We delve into data. Plain words here. {}.", long.trim());
        let analysis = analyze_text(&KeywordClassifier, &text).await.unwrap();

        assert_eq!(analysis.overall.label, ClassificationLabel::Ai);
        assert_eq!(analysis.sentences.len(), 3);
        assert_eq!(analysis.sentences[0].index, 1);
        assert_eq!(analysis.sentences[0].label, ClassificationLabel::Ai);
        assert_eq!(analysis.sentences[1].label, ClassificationLabel::Human);
        assert!((analysis.sentences[1].confidence - 0.8).abs() < 1e-9);
        assert!(analysis.sentences[2].text.ends_with("..."));
        assert_eq!(analysis.sentences[2].text.chars().count(), PREVIEW_CHARS + 3);
        assert_eq!(analysis.sentence_count, 3);
    }
}
