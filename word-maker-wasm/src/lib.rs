//! WASM bindings for word-maker: the voice platform's request adapter.
//!
//! Requests and responses cross the boundary as JSON strings. The session
//! state travels as its persisted token (`""`, `"WORDMODE"`, `"ASKMODE"`).

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::warn;
use wasm_bindgen::prelude::*;

use word_maker::core::composer::PhraseBook;
use word_maker::core::lexicon::Lexicon;
use word_maker::schema::intent::Intent;
use word_maker::schema::response::{Card, DialogResponse};
use word_maker::schema::session::{DialogRequest, SessionState};
use word_maker::WordMaker;

// ---------------------------------------------------------------------------
// Embedded lexicon data, compiled into the WASM binary
// ---------------------------------------------------------------------------
mod data {
    pub const MORPHEMES: &str = include_str!("../../data/lexicon/morphemes.ron");
    pub const COMMON_WORDS: &str = include_str!("../../data/lexicon/words/common.txt");
    pub const COMPOUND_WORDS: &str = include_str!("../../data/lexicon/words/compound.txt");
    pub const DERIVED_WORDS: &str = include_str!("../../data/lexicon/words/derived.txt");
    pub const EXTRA: &str = include_str!("../../data/lexicon/extra.txt");
    pub const PHRASES: &str = include_str!("../../data/phrases.ron");
}

// ---------------------------------------------------------------------------
// JSON envelopes
// ---------------------------------------------------------------------------
#[derive(Debug, Deserialize)]
struct RequestEnvelope {
    session_id: String,
    intent: String,
    #[serde(default)]
    state: String,
    #[serde(default)]
    app_id: Option<String>,
}

#[derive(Debug, Serialize)]
struct ResponseEnvelope<'a> {
    speech: &'a str,
    reprompt: Option<&'a str>,
    card: Option<&'a Card>,
    state: &'static str,
    should_end_session: bool,
}

#[derive(Debug, Serialize)]
struct ErrorEnvelope<'a> {
    error: &'a str,
}

impl<'a> From<&'a DialogResponse> for ResponseEnvelope<'a> {
    fn from(response: &'a DialogResponse) -> Self {
        ResponseEnvelope {
            speech: &response.speech,
            reprompt: response.reprompt.as_deref(),
            card: response.card.as_ref(),
            state: response.state.token(),
            should_end_session: response.should_end_session,
        }
    }
}

fn error_json(message: &str) -> String {
    serde_json::to_string(&ErrorEnvelope { error: message })
        .unwrap_or_else(|_| r#"{"error":"unserializable error"}"#.to_string())
}

/// Build the lexicon from the embedded resources.
pub fn embedded_lexicon() -> Result<Lexicon, word_maker::core::lexicon::LexiconError> {
    Lexicon::from_sources(
        data::MORPHEMES,
        &[data::COMMON_WORDS, data::COMPOUND_WORDS, data::DERIVED_WORDS],
        data::EXTRA,
    )
}

// ---------------------------------------------------------------------------
// WordMakerSkill, the exported struct
// ---------------------------------------------------------------------------
#[wasm_bindgen]
pub struct WordMakerSkill {
    maker: WordMaker,
    app_id: Option<String>,
}

#[wasm_bindgen]
impl WordMakerSkill {
    /// Create a skill instance. `seed` makes output reproducible; pass an
    /// `app_id` to reject requests addressed to a different application.
    #[wasm_bindgen(constructor)]
    pub fn new(seed: Option<u64>, app_id: Option<String>) -> Result<WordMakerSkill, JsError> {
        let lexicon = embedded_lexicon()
            .map_err(|e| JsError::new(&format!("Lexicon error: {e}")))?;
        let phrases = PhraseBook::parse_ron(data::PHRASES)
            .map_err(|e| JsError::new(&format!("Phrase book error: {e}")))?;

        let mut builder = WordMaker::builder()
            .with_lexicon(Arc::new(lexicon))
            .with_phrases(phrases);
        if let Some(seed) = seed {
            builder = builder.seed(seed);
        }
        let maker = builder
            .build()
            .map_err(|e| JsError::new(&format!("Engine build error: {e}")))?;

        Ok(WordMakerSkill {
            maker,
            app_id: app_id.filter(|id| !id.is_empty()),
        })
    }

    /// Answer one platform request.
    ///
    /// Expected JSON shape:
    /// ```json
    /// {
    ///   "session_id": "abc",
    ///   "intent": "randomword",
    ///   "state": "ASKMODE",
    ///   "app_id": "amzn1.ask.skill.example"
    /// }
    /// ```
    ///
    /// Returns the response envelope, `null` when the session has ended,
    /// or `{"error": "..."}`.
    pub fn handle_request(&mut self, json: &str) -> String {
        match self.dispatch(json) {
            Ok(Some(response)) => serde_json::to_string(&ResponseEnvelope::from(&response))
                .unwrap_or_else(|e| error_json(&format!("Serialization error: {e}"))),
            Ok(None) => "null".to_string(),
            Err(message) => error_json(&message),
        }
    }

    /// Approximate number of words this skill can produce.
    pub fn vocabulary_size(&self) -> i64 {
        self.maker.vocabulary_size()
    }
}

// Private helpers
impl WordMakerSkill {
    fn dispatch(&mut self, json: &str) -> Result<Option<DialogResponse>, String> {
        let envelope: RequestEnvelope =
            serde_json::from_str(json).map_err(|e| format!("Invalid request JSON: {e}"))?;

        if let (Some(expected), Some(actual)) = (&self.app_id, &envelope.app_id) {
            if !actual.is_empty() && actual != expected {
                warn!(app_id = %actual, "request for another application");
                return Err(format!("Invalid application id: {actual}"));
            }
        }

        let state = SessionState::from_token(&envelope.state).map_err(|e| e.to_string())?;
        let request = DialogRequest::new(
            envelope.session_id,
            Intent::from_name(&envelope.intent),
            state,
        );
        self.maker.handle(&request).map_err(|e| e.to_string())
    }
}
