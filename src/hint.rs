//! Hint generation for a round.
//!
//! A `HintProvider` talks to whatever produces hints (an OpenAI-compatible
//! chat-completion endpoint in production) and may fail. `HintService` wraps a
//! provider and turns every failure into a locally generated hint, so callers
//! always receive usable text.

use std::collections::BTreeSet;
use std::time::Duration;

use log::{debug, info};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::error::HintError;

pub const DEFAULT_API_URL: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "gpt-4";
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;
const FALLBACK_LETTERS: usize = 3;

/// What a provider is told about the round.
#[derive(Debug, Clone, Copy)]
pub struct HintRequest<'a> {
    pub word: &'a str,
    pub category: &'a str,
    pub guessed: &'a BTreeSet<char>,
}

pub trait HintProvider {
    /// Produces a hint that does not contain the target word.
    fn fetch_hint(&mut self, request: &HintRequest<'_>) -> Result<String, HintError>;
}

/// Boundary between a fallible provider and the game.
pub struct HintService {
    provider: Box<dyn HintProvider>,
    rng: StdRng,
}

impl HintService {
    #[must_use]
    pub fn new(provider: Box<dyn HintProvider>) -> Self {
        Self::with_rng(provider, StdRng::from_entropy())
    }

    #[must_use]
    pub fn with_rng(provider: Box<dyn HintProvider>, rng: StdRng) -> Self {
        Self { provider, rng }
    }

    pub fn hint_for(&mut self, request: &HintRequest<'_>) -> String {
        match self.provider.fetch_hint(request) {
            Ok(hint) => hint,
            Err(e) => {
                info!("Hint provider failed, using local hint: {e}");
                fallback_hint(request, &mut self.rng)
            }
        }
    }
}

/// Category plus up to three distinct letters of the word that are still hidden.
pub fn fallback_hint<R: Rng + ?Sized>(request: &HintRequest<'_>, rng: &mut R) -> String {
    let mut hidden: Vec<char> = Vec::new();
    for c in request.word.chars() {
        if !request.guessed.contains(&c) && !hidden.contains(&c) {
            hidden.push(c);
        }
    }
    let sample: Vec<String> = hidden
        .choose_multiple(rng, FALLBACK_LETTERS)
        .map(char::to_string)
        .collect();
    format!(
        "Категория: {}. Попробуйте буквы: {}",
        request.category,
        sample.join(", ")
    )
}

#[derive(Debug, Clone)]
pub struct HintConfig {
    pub api_url: String,
    pub api_key: Option<String>,
    pub model: String,
    pub timeout: Duration,
}

impl Default for HintConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

/// Provider backed by an OpenAI-compatible chat-completion endpoint.
pub struct ChatHintProvider {
    config: HintConfig,
    client: reqwest::blocking::Client,
}

impl ChatHintProvider {
    pub fn new(config: HintConfig) -> Result<Self, HintError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .build()?;
        if config.api_key.is_none() {
            info!("No API key configured for the hint service");
        }
        Ok(Self { config, client })
    }
}

impl HintProvider for ChatHintProvider {
    fn fetch_hint(&mut self, request: &HintRequest<'_>) -> Result<String, HintError> {
        let body = ChatRequest {
            model: &self.config.model,
            messages: vec![ChatMessage {
                role: "system".to_string(),
                content: build_prompt(request),
            }],
        };
        debug!("Requesting hint from {}", self.config.api_url);

        let mut http = self.client.post(&self.config.api_url).json(&body);
        if let Some(key) = &self.config.api_key {
            http = http.bearer_auth(key);
        }
        let response = http.send()?;
        if !response.status().is_success() {
            return Err(HintError::Status(response.status().as_u16()));
        }
        let parsed: ChatResponse = response
            .json()
            .map_err(|e| HintError::Malformed(e.to_string()))?;
        extract_reply(parsed, request)
    }
}

fn build_prompt(request: &HintRequest<'_>) -> String {
    let guessed: Vec<String> = request.guessed.iter().map(char::to_string).collect();
    format!(
        "Дай подсказку для слова '{}' (категория: {}) в игре 'Виселица', не называя само слово. \
         Уже угаданы буквы: {}. Ответь 1-2 предложениями на русском.",
        request.word,
        request.category,
        guessed.join(", ")
    )
}

fn extract_reply(response: ChatResponse, request: &HintRequest<'_>) -> Result<String, HintError> {
    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| HintError::Malformed("no choices in response".to_string()))?;
    let text = choice.message.content.trim().to_string();
    if text.is_empty() {
        return Ok(format!("Слово связано с: {}", request.category));
    }
    if text.to_lowercase().contains(request.word) {
        return Err(HintError::RevealsWord);
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request<'a>(word: &'a str, guessed: &'a BTreeSet<char>) -> HintRequest<'a> {
        HintRequest {
            word,
            category: "Животные",
            guessed,
        }
    }

    fn parse(json: &str) -> ChatResponse {
        serde_json::from_str(json).unwrap()
    }

    struct Failing;

    impl HintProvider for Failing {
        fn fetch_hint(&mut self, _request: &HintRequest<'_>) -> Result<String, HintError> {
            Err(HintError::Status(503))
        }
    }

    #[test]
    fn test_fallback_samples_hidden_letters() {
        let guessed: BTreeSet<char> = "о".chars().collect();
        let req = request("собака", &guessed);
        let mut rng = StdRng::seed_from_u64(42);
        let hint = fallback_hint(&req, &mut rng);
        assert!(hint.starts_with("Категория: Животные. Попробуйте буквы: "));
        let letters: Vec<&str> = hint.rsplit(": ").next().unwrap().split(", ").collect();
        assert_eq!(letters.len(), 3);
        for letter in &letters {
            assert!("сбак".contains(letter), "{letter} is not hidden");
        }
        let mut unique = letters.clone();
        unique.sort_unstable();
        unique.dedup();
        assert_eq!(unique.len(), 3);
    }

    #[test]
    fn test_fallback_with_few_hidden_letters() {
        let guessed: BTreeSet<char> = "ко".chars().collect();
        let req = request("кот", &guessed);
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            fallback_hint(&req, &mut rng),
            "Категория: Животные. Попробуйте буквы: т"
        );
    }

    #[test]
    fn test_service_falls_back_on_error() {
        let guessed = BTreeSet::new();
        let req = request("кот", &guessed);
        let mut service = HintService::with_rng(Box::new(Failing), StdRng::seed_from_u64(9));
        let hint = service.hint_for(&req);
        assert!(hint.contains("Животные"));
    }

    #[test]
    fn test_prompt_mentions_word_category_and_letters() {
        let guessed: BTreeSet<char> = "ок".chars().collect();
        let prompt = build_prompt(&request("кот", &guessed));
        assert!(prompt.contains("'кот'"));
        assert!(prompt.contains("категория: Животные"));
        assert!(prompt.contains("Уже угаданы буквы: к, о."));
    }

    #[test]
    fn test_extract_reply_ok() {
        let guessed = BTreeSet::new();
        let body = parse(r#"{"choices":[{"message":{"role":"assistant","content":"  Любит молоко и мышей. "}}]}"#);
        assert_eq!(
            extract_reply(body, &request("кот", &guessed)).unwrap(),
            "Любит молоко и мышей."
        );
    }

    #[test]
    fn test_extract_reply_empty_content() {
        let guessed = BTreeSet::new();
        let body = parse(r#"{"choices":[{"message":{"role":"assistant","content":""}}]}"#);
        assert_eq!(
            extract_reply(body, &request("кот", &guessed)).unwrap(),
            "Слово связано с: Животные"
        );
    }

    #[test]
    fn test_extract_reply_rejects_revealed_word() {
        let guessed = BTreeSet::new();
        let body = parse(r#"{"choices":[{"message":{"role":"assistant","content":"Это КОТ."}}]}"#);
        assert!(matches!(
            extract_reply(body, &request("кот", &guessed)),
            Err(HintError::RevealsWord)
        ));
    }

    #[test]
    fn test_extract_reply_without_choices() {
        let guessed = BTreeSet::new();
        let body = parse(r#"{"choices":[]}"#);
        assert!(matches!(
            extract_reply(body, &request("кот", &guessed)),
            Err(HintError::Malformed(_))
        ));
    }

    #[test]
    fn test_unreachable_endpoint_falls_back() {
        let config = HintConfig {
            api_url: "http://127.0.0.1:9/v1/chat/completions".to_string(),
            timeout: Duration::from_secs(2),
            ..HintConfig::default()
        };
        let provider = ChatHintProvider::new(config).unwrap();
        let mut service = HintService::with_rng(Box::new(provider), StdRng::seed_from_u64(5));
        let guessed = BTreeSet::new();
        let hint = service.hint_for(&request("кот", &guessed));
        assert!(hint.starts_with("Категория: Животные."));
    }
}
