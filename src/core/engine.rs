/// The word maker: dialog turn in, response out.
///
/// Wires together the dialog table, word generation, and utterance
/// composition.

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, info_span};

use crate::core::composer::{ComposerError, PhraseBook, Utterance, UtteranceComposer};
use crate::core::config::{ConfigError, EngineConfig};
use crate::core::dialog::{self, Action, DialogError, Outcome};
use crate::core::generator::{self, GeneratorError, WordGenerator, DEFAULT_MAX_ATTEMPTS};
use crate::core::lexicon::{Lexicon, LexiconError};
use crate::schema::response::DialogResponse;
use crate::schema::session::{DialogRequest, SessionState};

/// Lexicon directory used when none is configured.
pub const DEFAULT_LEXICON_DIR: &str = "data/lexicon";

#[derive(Debug, Error)]
pub enum WordMakerError {
    #[error("lexicon error: {0}")]
    Lexicon(#[from] LexiconError),
    #[error("generator error: {0}")]
    Generator(#[from] GeneratorError),
    #[error("composer error: {0}")]
    Composer(#[from] ComposerError),
    #[error("dialog error: {0}")]
    Dialog(#[from] DialogError),
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

/// Answers dialog turns. Built via `WordMaker::builder()`.
///
/// The lexicon is shared and read-only; each `WordMaker` owns its random
/// source, so give every concurrent caller its own instance.
pub struct WordMaker {
    lexicon: Arc<Lexicon>,
    composer: UtteranceComposer,
    max_attempts: u64,
    vocabulary_size: i64,
    rng: StdRng,
}

/// Builder for constructing a `WordMaker`.
pub struct WordMakerBuilder {
    lexicon_dir: Option<PathBuf>,
    phrases_path: Option<PathBuf>,
    seed: Option<u64>,
    max_attempts: u64,
    /// Directly provided lexicon (for testing without files).
    lexicon: Option<Arc<Lexicon>>,
    /// Directly provided phrases (for testing without files).
    phrases: Option<PhraseBook>,
}

impl WordMaker {
    pub fn builder() -> WordMakerBuilder {
        WordMakerBuilder {
            lexicon_dir: None,
            phrases_path: None,
            seed: None,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            lexicon: None,
            phrases: None,
        }
    }

    /// Answer one turn.
    ///
    /// Returns `None` when the platform reports that the session has
    /// ended; there is nobody left to answer.
    pub fn handle(
        &mut self,
        request: &DialogRequest,
    ) -> Result<Option<DialogResponse>, WordMakerError> {
        let span = info_span!(
            "turn",
            session = %request.session_id,
            state = %request.state,
            intent = request.intent.name()
        );
        let _guard = span.enter();

        let resolved = dialog::resolve(request.state, request.intent)?;
        if let Some(through) = resolved.via {
            debug!(through = %through, "redirected");
        }

        match resolved.outcome {
            Outcome::Silent => {
                info!("session ended by user");
                Ok(None)
            }
            Outcome::End { next } => {
                let utterance = self.composer.farewell(&mut self.rng);
                Ok(Some(respond(utterance, next, true)))
            }
            Outcome::Respond { next, action } => {
                let utterance = self.perform(action)?;
                Ok(Some(respond(utterance, next, false)))
            }
        }
    }

    /// Generate one word outside of any dialog.
    pub fn make_word(&mut self) -> Result<String, WordMakerError> {
        let generator = WordGenerator::new(&self.lexicon).with_max_attempts(self.max_attempts);
        Ok(generator.generate(&mut self.rng)?)
    }

    /// Approximate number of distinct words, computed once at build time.
    pub fn vocabulary_size(&self) -> i64 {
        self.vocabulary_size
    }

    pub fn lexicon(&self) -> &Arc<Lexicon> {
        &self.lexicon
    }

    fn perform(&mut self, action: Action) -> Result<Utterance, WordMakerError> {
        let rng = &mut self.rng;
        let utterance = match action {
            Action::Launch => self.composer.launch(rng),
            Action::Relaunch => self.composer.relaunch(rng),
            Action::MakeWord => {
                info!(
                    roots = self.lexicon.roots().len(),
                    suffixes = self.lexicon.suffixes().len(),
                    corpus = self.lexicon.corpus_len(),
                    supplemental = self.lexicon.supplemental_len(),
                    "making a word"
                );
                let generator =
                    WordGenerator::new(&self.lexicon).with_max_attempts(self.max_attempts);
                let word = generator.generate(rng)?;
                self.composer.compose(&word, rng)
            }
            Action::Count => self.composer.count(self.vocabulary_size, rng),
            Action::Help => self.composer.help(rng),
            Action::Clarify => self.composer.clarify(rng),
        };
        Ok(utterance)
    }
}

fn respond(utterance: Utterance, state: SessionState, should_end_session: bool) -> DialogResponse {
    DialogResponse {
        speech: utterance.speech,
        reprompt: utterance.reprompt,
        card: utterance.card,
        state,
        should_end_session,
    }
}

impl WordMakerBuilder {
    /// Apply every setting present in a config file.
    pub fn from_config(mut self, config: &EngineConfig) -> Self {
        if let Some(ref dir) = config.lexicon_dir {
            self.lexicon_dir = Some(PathBuf::from(dir));
        }
        if let Some(ref path) = config.phrases {
            self.phrases_path = Some(PathBuf::from(path));
        }
        if let Some(seed) = config.seed {
            self.seed = Some(seed);
        }
        if let Some(max_attempts) = config.max_attempts {
            self.max_attempts = max_attempts;
        }
        self
    }

    /// Load settings from a RON config file.
    pub fn config_file(self, path: &Path) -> Result<Self, WordMakerError> {
        let config = EngineConfig::load_from_ron(path)?;
        Ok(self.from_config(&config))
    }

    pub fn lexicon_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.lexicon_dir = Some(path.into());
        self
    }

    pub fn phrases(mut self, path: impl Into<PathBuf>) -> Self {
        self.phrases_path = Some(path.into());
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn max_attempts(mut self, max_attempts: u64) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Provide a lexicon directly (for testing without files, or to share
    /// one lexicon between several makers).
    pub fn with_lexicon(mut self, lexicon: impl Into<Arc<Lexicon>>) -> Self {
        self.lexicon = Some(lexicon.into());
        self
    }

    /// Provide phrases directly (for testing without files).
    pub fn with_phrases(mut self, phrases: PhraseBook) -> Self {
        self.phrases = Some(phrases);
        self
    }

    pub fn build(self) -> Result<WordMaker, WordMakerError> {
        let lexicon = match self.lexicon {
            Some(lexicon) => lexicon,
            None => {
                let dir = self
                    .lexicon_dir
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_LEXICON_DIR));
                Arc::new(Lexicon::load(&dir)?)
            }
        };

        let phrases = match (self.phrases, self.phrases_path) {
            (Some(phrases), _) => phrases,
            (None, Some(path)) => PhraseBook::load_from_ron(&path)?,
            (None, None) => PhraseBook::default(),
        };
        let composer = UtteranceComposer::new(phrases)?;

        let rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let vocabulary_size = generator::estimate_vocabulary_size(&lexicon);
        debug!(vocabulary_size, "word maker ready");

        Ok(WordMaker {
            lexicon,
            composer,
            max_attempts: self.max_attempts,
            vocabulary_size,
            rng,
        })
    }
}
