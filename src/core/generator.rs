/// Word generator: morpheme combination with rejection filtering.

use rand::rngs::StdRng;
use rand::Rng;
use thiserror::Error;
use tracing::{debug, trace};

use crate::core::lexicon::Lexicon;

/// Chance of appending a second root.
pub const SECOND_ROOT_PROBABILITY: f64 = 0.15;
/// Chance of appending a third root, drawn independently of the second.
pub const THIRD_ROOT_PROBABILITY: f64 = 0.005;
/// Unbounded in practice.
pub const DEFAULT_MAX_ATTEMPTS: u64 = u64::MAX;

#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("no acceptable word after {0} attempts")]
    Exhausted(u64),
}

/// One unfiltered draw: up to three roots and exactly one suffix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate<'a> {
    pub first: &'a str,
    pub second: Option<&'a str>,
    pub third: Option<&'a str>,
    pub suffix: &'a str,
}

impl Candidate<'_> {
    /// Number of root segments (1–3).
    pub fn root_count(&self) -> usize {
        1 + usize::from(self.second.is_some()) + usize::from(self.third.is_some())
    }

    /// The concatenated word.
    pub fn text(&self) -> String {
        let mut word = String::from(self.first);
        if let Some(root) = self.second {
            word.push_str(root);
        }
        if let Some(root) = self.third {
            word.push_str(root);
        }
        word.push_str(self.suffix);
        word
    }
}

/// Produces words that pass every lexicon filter.
pub struct WordGenerator<'a> {
    lexicon: &'a Lexicon,
    max_attempts: u64,
}

impl<'a> WordGenerator<'a> {
    pub fn new(lexicon: &'a Lexicon) -> Self {
        Self {
            lexicon,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: u64) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Draw morphemes without filtering.
    ///
    /// The two extra-root rolls are independent and made in order, so a
    /// draw can pick up both.
    pub fn draw_candidate(&self, rng: &mut StdRng) -> Candidate<'a> {
        let roots = self.lexicon.roots();
        let first = pick(roots, rng);
        let second = rng.gen_bool(SECOND_ROOT_PROBABILITY).then(|| pick(roots, rng));
        let third = rng.gen_bool(THIRD_ROOT_PROBABILITY).then(|| pick(roots, rng));
        let suffix = pick(self.lexicon.suffixes(), rng);
        Candidate {
            first,
            second,
            third,
            suffix,
        }
    }

    /// True if the word clears the forbidden sequences and both
    /// exclusion corpora.
    pub fn accepts(&self, word: &str) -> bool {
        !self.lexicon.is_forbidden(word) && !self.lexicon.is_excluded(word)
    }

    /// Draw candidates until one is accepted.
    pub fn generate(&self, rng: &mut StdRng) -> Result<String, GeneratorError> {
        let mut attempts = 0u64;
        while attempts < self.max_attempts {
            attempts += 1;
            let word = self.draw_candidate(rng).text();
            if self.accepts(&word) {
                debug!(word = %word, attempts, "word accepted");
                return Ok(word);
            }
            trace!(word = %word, "candidate rejected");
        }
        Err(GeneratorError::Exhausted(attempts))
    }

    pub fn estimate_vocabulary_size(&self) -> i64 {
        estimate_vocabulary_size(self.lexicon)
    }
}

/// Rough count of words the lexicon can produce:
/// `roots² × suffixes − exclusions`.
///
/// Ignores three-root words and duplicate morphemes.
pub fn estimate_vocabulary_size(lexicon: &Lexicon) -> i64 {
    let roots = lexicon.roots().len() as i64;
    let suffixes = lexicon.suffixes().len() as i64;
    roots * roots * suffixes - lexicon.corpus_len() as i64 - lexicon.supplemental_len() as i64
}

// Lexicon guarantees non-empty morpheme sets.
fn pick<'a>(items: &'a [String], rng: &mut StdRng) -> &'a str {
    &items[rng.gen_range(0..items.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::lexicon::Morphemes;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn cat_dog(corpus: &[&str]) -> Lexicon {
        Lexicon::new(
            Morphemes::new(&["cat", "dog"], &["ly"], &["ii"]),
            corpus.iter().copied(),
            std::iter::empty::<&str>(),
        )
        .unwrap()
    }

    #[test]
    fn two_root_outputs_are_known() {
        let lex = cat_dog(&[]);
        let generator = WordGenerator::new(&lex);
        let allowed: HashSet<&str> = [
            "catly", "dogly", "catcatly", "catdogly", "dogcatly", "dogdogly",
        ]
        .into_iter()
        .collect();

        for seed in 0..500 {
            let mut rng = StdRng::seed_from_u64(seed);
            let candidate = generator.draw_candidate(&mut rng);
            let word = generator.generate(&mut StdRng::seed_from_u64(seed)).unwrap();
            // Nothing is filtered, so the first draw is the answer.
            assert_eq!(word, candidate.text());
            if candidate.root_count() < 3 {
                assert!(allowed.contains(word.as_str()), "unexpected word: {}", word);
            } else {
                assert_eq!(word.len(), 3 * 3 + 2);
            }
        }
    }

    #[test]
    fn excluded_word_never_returned() {
        let lex = cat_dog(&["CATLY"]);
        let generator = WordGenerator::new(&lex);
        for seed in 0..500 {
            let mut rng = StdRng::seed_from_u64(seed);
            let word = generator.generate(&mut rng).unwrap();
            assert_ne!(word, "catly");
        }
    }

    #[test]
    fn forbidden_sequence_never_returned() {
        let lex = Lexicon::new(
            Morphemes::new(&["ski", "run"], &["ing", "ish"], &["ii"]),
            ["RUNNING"],
            std::iter::empty::<&str>(),
        )
        .unwrap();
        let generator = WordGenerator::new(&lex);
        for seed in 0..500 {
            let mut rng = StdRng::seed_from_u64(seed);
            let word = generator.generate(&mut rng).unwrap();
            assert!(!word.contains("ii"), "forbidden sequence in {}", word);
        }
    }

    #[test]
    fn exhausted_when_every_candidate_fails() {
        let lex = Lexicon::new(
            Morphemes::new(&["cat"], &["ly"], &["at"]),
            std::iter::empty::<&str>(),
            std::iter::empty::<&str>(),
        )
        .unwrap();
        let generator = WordGenerator::new(&lex).with_max_attempts(25);
        let mut rng = StdRng::seed_from_u64(7);
        let err = generator.generate(&mut rng).unwrap_err();
        assert!(matches!(err, GeneratorError::Exhausted(25)));
    }

    #[test]
    fn same_seed_same_word() {
        let lex = cat_dog(&["CATLY"]);
        let generator = WordGenerator::new(&lex);
        let a = generator.generate(&mut StdRng::seed_from_u64(42)).unwrap();
        let b = generator.generate(&mut StdRng::seed_from_u64(42)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn extra_root_rates_match_thresholds() {
        let lex = cat_dog(&[]);
        let generator = WordGenerator::new(&lex);
        let mut rng = StdRng::seed_from_u64(2018);

        let draws = 100_000;
        let mut second = 0usize;
        let mut third = 0usize;
        let mut both = 0usize;
        for _ in 0..draws {
            let c = generator.draw_candidate(&mut rng);
            second += usize::from(c.second.is_some());
            third += usize::from(c.third.is_some());
            both += usize::from(c.second.is_some() && c.third.is_some());
        }

        let second_rate = second as f64 / draws as f64;
        let third_rate = third as f64 / draws as f64;
        assert!((second_rate - 0.15).abs() < 0.01, "second root rate {}", second_rate);
        assert!((third_rate - 0.005).abs() < 0.0015, "third root rate {}", third_rate);

        // Independence: the third-root rate holds among draws that already
        // have a second root.
        let conditional = both as f64 / second as f64;
        assert!(conditional < 0.012, "conditional third root rate {}", conditional);
    }

    #[test]
    fn vocabulary_estimate_formula() {
        let lex = Lexicon::new(
            Morphemes::new(&["cat", "dog", "dog"], &["ly", "ish"], &[]),
            ["CATLY", "catly", "DOGISH"],
            ["DOGDOGLY"],
        )
        .unwrap();
        // 3² × 2 − 2 − 1
        assert_eq!(estimate_vocabulary_size(&lex), 15);
        assert_eq!(WordGenerator::new(&lex).estimate_vocabulary_size(), 15);
    }

    #[test]
    fn vocabulary_estimate_can_go_negative() {
        let lex = Lexicon::new(Morphemes::new(&["a"], &["b"], &[]), ["X", "Y"], ["Z"]).unwrap();
        assert_eq!(estimate_vocabulary_size(&lex), -2);
    }

    #[test]
    fn candidate_text_concatenates_in_order() {
        let c = Candidate {
            first: "bio",
            second: Some("geo"),
            third: None,
            suffix: "ist",
        };
        assert_eq!(c.text(), "biogeoist");
        assert_eq!(c.root_count(), 2);
    }
}
