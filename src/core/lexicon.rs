/// Lexical resources: morpheme inventories, exclusion corpora, and
/// forbidden letter sequences.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
pub enum LexiconError {
    #[error("morpheme set '{0}' is empty")]
    EmptyMorphemes(&'static str),
    #[error("morpheme set '{0}' contains an empty entry")]
    InvalidMorpheme(&'static str),
    #[error("forbidden sequence list contains an empty entry")]
    InvalidForbidden,
    #[error("exclusion corpus is empty: {0}")]
    EmptyCorpus(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
}

/// Letter sequences that make a candidate unpronounceable or ugly.
pub const DEFAULT_FORBIDDEN: &[&str] = &["ii", "tj", "tf", "mf", "aa", "bf", "tg", "tq", "uu", "dj"];

/// File names inside a lexicon directory.
pub const MORPHEMES_FILE: &str = "morphemes.ron";
pub const WORDS_DIR: &str = "words";
pub const EXTRA_FILE: &str = "extra.txt";

/// The morpheme inventories as they appear in `morphemes.ron`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Morphemes {
    pub roots: Vec<String>,
    pub suffixes: Vec<String>,
    #[serde(default = "default_forbidden")]
    pub forbidden: Vec<String>,
}

fn default_forbidden() -> Vec<String> {
    DEFAULT_FORBIDDEN.iter().map(|s| s.to_string()).collect()
}

impl Morphemes {
    pub fn new(roots: &[&str], suffixes: &[&str], forbidden: &[&str]) -> Self {
        fn owned(items: &[&str]) -> Vec<String> {
            items.iter().map(|s| s.to_string()).collect()
        }
        Self {
            roots: owned(roots),
            suffixes: owned(suffixes),
            forbidden: owned(forbidden),
        }
    }

    /// Parse morpheme inventories from a RON string.
    pub fn parse_ron(input: &str) -> Result<Morphemes, LexiconError> {
        Ok(ron::from_str(input)?)
    }
}

/// Read-only lexical data shared by every session.
///
/// Morphemes are stored lowercase, exclusion entries uppercase. Both
/// exclusion corpora are kept apart only so their sizes can be reported.
#[derive(Debug, Clone)]
pub struct Lexicon {
    roots: Vec<String>,
    suffixes: Vec<String>,
    forbidden: Vec<String>,
    corpus: FxHashSet<String>,
    supplemental: FxHashSet<String>,
}

impl Lexicon {
    /// Build a lexicon from parsed morphemes and raw exclusion entries.
    ///
    /// Morpheme sets must be non-empty and hold no blank entries. The
    /// exclusion corpora may be empty here; file-based loading is stricter.
    pub fn new<I, J, S, T>(
        morphemes: Morphemes,
        corpus: I,
        supplemental: J,
    ) -> Result<Lexicon, LexiconError>
    where
        I: IntoIterator<Item = S>,
        J: IntoIterator<Item = T>,
        S: AsRef<str>,
        T: AsRef<str>,
    {
        let roots = normalize_morphemes(morphemes.roots);
        let suffixes = normalize_morphemes(morphemes.suffixes);
        let forbidden = normalize_morphemes(morphemes.forbidden);

        if roots.is_empty() {
            return Err(LexiconError::EmptyMorphemes("roots"));
        }
        if suffixes.is_empty() {
            return Err(LexiconError::EmptyMorphemes("suffixes"));
        }
        if roots.iter().any(|s| s.is_empty()) {
            return Err(LexiconError::InvalidMorpheme("roots"));
        }
        if suffixes.iter().any(|s| s.is_empty()) {
            return Err(LexiconError::InvalidMorpheme("suffixes"));
        }
        if forbidden.iter().any(|s| s.is_empty()) {
            return Err(LexiconError::InvalidForbidden);
        }

        let corpus: FxHashSet<String> = corpus
            .into_iter()
            .map(|w| w.as_ref().trim().to_uppercase())
            .filter(|w| !w.is_empty())
            .collect();
        let supplemental: FxHashSet<String> = supplemental
            .into_iter()
            .map(|w| w.as_ref().trim().to_uppercase())
            .filter(|w| !w.is_empty())
            .collect();

        Ok(Lexicon {
            roots,
            suffixes,
            forbidden,
            corpus,
            supplemental,
        })
    }

    /// Build a lexicon from resource text held in memory.
    ///
    /// `word_lists` are merged into one corpus and must contain at least
    /// one entry between them.
    pub fn from_sources(
        morphemes_ron: &str,
        word_lists: &[&str],
        extra: &str,
    ) -> Result<Lexicon, LexiconError> {
        let morphemes = Morphemes::parse_ron(morphemes_ron)?;
        let corpus: Vec<&str> = word_lists
            .iter()
            .copied()
            .flat_map(parse_word_list)
            .collect();
        if corpus.is_empty() {
            return Err(LexiconError::EmptyCorpus(
                "word lists contain no entries".to_string(),
            ));
        }

        let supplemental: Vec<&str> = parse_word_list(extra).collect();
        if supplemental.is_empty() {
            warn!("supplemental exclusion list is empty");
        }

        Lexicon::new(morphemes, corpus, supplemental)
    }

    /// Load a lexicon directory: `morphemes.ron`, every `.txt` file in
    /// `words/`, and `extra.txt`.
    pub fn load(dir: &Path) -> Result<Lexicon, LexiconError> {
        let morphemes_ron = std::fs::read_to_string(dir.join(MORPHEMES_FILE))?;

        let words_dir = dir.join(WORDS_DIR);
        if !words_dir.is_dir() {
            return Err(LexiconError::EmptyCorpus(format!(
                "'{}' is not a directory",
                words_dir.display()
            )));
        }
        let list_paths = list_word_files(&words_dir)?;
        if list_paths.is_empty() {
            return Err(LexiconError::EmptyCorpus(format!(
                "no .txt word lists in '{}'",
                words_dir.display()
            )));
        }

        let mut lists = Vec::with_capacity(list_paths.len());
        for path in &list_paths {
            debug!(path = %path.display(), "reading word list");
            lists.push(std::fs::read_to_string(path)?);
        }
        let extra = std::fs::read_to_string(dir.join(EXTRA_FILE))?;

        let list_refs: Vec<&str> = lists.iter().map(String::as_str).collect();
        let lexicon = Self::from_sources(&morphemes_ron, &list_refs, &extra)?;
        info!(
            roots = lexicon.roots.len(),
            suffixes = lexicon.suffixes.len(),
            corpus = lexicon.corpus.len(),
            supplemental = lexicon.supplemental.len(),
            "lexicon loaded from {}",
            dir.display()
        );
        Ok(lexicon)
    }

    pub fn roots(&self) -> &[String] {
        &self.roots
    }

    pub fn suffixes(&self) -> &[String] {
        &self.suffixes
    }

    pub fn forbidden(&self) -> &[String] {
        &self.forbidden
    }

    /// True if the uppercased word is a real or manually banned word.
    pub fn is_excluded(&self, word: &str) -> bool {
        let upper = word.to_uppercase();
        self.corpus.contains(&upper) || self.supplemental.contains(&upper)
    }

    /// True if the word contains any forbidden letter sequence.
    pub fn is_forbidden(&self, word: &str) -> bool {
        self.forbidden.iter().any(|seq| word.contains(seq.as_str()))
    }

    /// Number of distinct entries in the main exclusion corpus.
    pub fn corpus_len(&self) -> usize {
        self.corpus.len()
    }

    /// Number of distinct entries in the manual exclusion list.
    pub fn supplemental_len(&self) -> usize {
        self.supplemental.len()
    }
}

fn normalize_morphemes(items: Vec<String>) -> Vec<String> {
    items
        .into_iter()
        .map(|s| s.trim().to_lowercase())
        .collect()
}

/// Iterate the entries of a word list: one per line, blank lines and
/// `#` comments skipped.
pub fn parse_word_list(text: &str) -> impl Iterator<Item = &str> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
}

fn list_word_files(dir: &Path) -> Result<Vec<PathBuf>, LexiconError> {
    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.extension().and_then(|s| s.to_str()) == Some("txt") {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}
