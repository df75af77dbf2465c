/// Utterance composition: spoken output, letter-by-letter spelling,
/// and display cards.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::schema::response::{Card, CardImages};

#[derive(Debug, Error)]
pub enum ComposerError {
    #[error("phrase pool '{0}' is empty")]
    EmptyPool(&'static str),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
}

/// Pause inserted before the repeat prompt.
pub const PAUSE: &str = r#"<break time="600ms"/>"#;

const DELIVERY_LEAD: &str = "Your new word is";
const LAUNCH_LEAD: &str = "Word Maker creates new nonsense words.";
const RELAUNCH_LEAD: &str = "Word Maker creates made-up English words.";
const HELP_LEAD: &str =
    "Word Maker creates made-up English words. You can always say 'stop' to end the session.";
const CLARIFY_LEAD: &str = "I didn't get that.";

/// The pools every utterance draws its variable lines from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhraseBook {
    /// Card body openers.
    pub intros: Vec<String>,
    /// Card body closers.
    pub flavors: Vec<String>,
    /// "Another one?" prompts after a word.
    pub repeat_prompts: Vec<String>,
    /// "Want a word?" prompts.
    pub intent_prompts: Vec<String>,
    pub farewells: Vec<String>,
}

impl Default for PhraseBook {
    fn default() -> Self {
        let owned = |items: &[&str]| -> Vec<String> { items.iter().map(|s| s.to_string()).collect() };
        Self {
            intros: owned(&[
                "Here is your new word!",
                "We hope you enjoy this made-up word!",
                "Invented just for you!",
                "This new word is one in forty million!",
            ]),
            flavors: owned(&[
                "This word was lovingly hand-crafted for you.",
                "Jabberwocky ain't got nothing on us.",
                "This one is totally tweet-worthy.",
                "Now you have to figure out what it means.",
                "Remoggle has been ladling out steaming hot bowls of nonsense since 2018.",
                "Cool word, but the domain name is probably already taken.",
                "Hot off the presses.",
                "Two generations of technology's brightest minds bring you this nonsense word.",
            ]),
            repeat_prompts: owned(&[
                "Would you like another new word?",
                "Do you want to go again?",
                "Shall I create another new word?",
                "Shall I invent another new word?",
                "Do you want another new word?",
                "Do you want a fresh word?",
            ]),
            intent_prompts: owned(&[
                "Would you like a new word?",
                "Shall I create a new word?",
                "Shall I invent a new word?",
                "Do you want a fresh word?",
            ]),
            farewells: owned(&["Talk to ya later.", "Bye for now.", "Bye-bye!", "Goodbye!"]),
        }
    }
}

impl PhraseBook {
    /// Load a phrase book from a RON file.
    pub fn load_from_ron(path: &Path) -> Result<PhraseBook, ComposerError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_ron(&contents)
    }

    /// Parse a phrase book from a RON string. Every pool must be non-empty.
    pub fn parse_ron(input: &str) -> Result<PhraseBook, ComposerError> {
        let book: PhraseBook = ron::from_str(input)?;
        book.validate()?;
        Ok(book)
    }

    pub fn validate(&self) -> Result<(), ComposerError> {
        let pools = [
            ("intros", &self.intros),
            ("flavors", &self.flavors),
            ("repeat_prompts", &self.repeat_prompts),
            ("intent_prompts", &self.intent_prompts),
            ("farewells", &self.farewells),
        ];
        for (name, pool) in pools {
            if pool.is_empty() {
                return Err(ComposerError::EmptyPool(name));
            }
        }
        Ok(())
    }
}

/// A composed reply: what to say, what to say if the user goes quiet,
/// and what to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Utterance {
    pub speech: String,
    pub reprompt: Option<String>,
    pub card: Option<Card>,
}

/// Turns dialog actions into utterances. Pure apart from the random
/// phrase draws.
#[derive(Debug, Clone, Default)]
pub struct UtteranceComposer {
    phrases: PhraseBook,
    images: CardImages,
}

impl UtteranceComposer {
    pub fn new(phrases: PhraseBook) -> Result<Self, ComposerError> {
        phrases.validate()?;
        Ok(Self {
            phrases,
            images: CardImages::default(),
        })
    }

    pub fn phrases(&self) -> &PhraseBook {
        &self.phrases
    }

    /// Deliver a freshly generated word: the word, its spelling, the
    /// word again, a pause, and an offer to repeat.
    pub fn compose(&self, word: &str, rng: &mut StdRng) -> Utterance {
        let title = format!("New Word: {}", word);
        let body = format!(
            "{} {}",
            pick(&self.phrases.intros, rng),
            pick(&self.phrases.flavors, rng)
        );
        let speech = format!(
            "{} {}. <p>{}.</p> {}. {}{}",
            DELIVERY_LEAD,
            word,
            spell(word),
            word,
            PAUSE,
            pick(&self.phrases.repeat_prompts, rng)
        );
        Utterance {
            speech,
            reprompt: Some(pick(&self.phrases.repeat_prompts, rng).to_string()),
            card: Some(Card {
                title,
                body,
                images: self.images.clone(),
            }),
        }
    }

    /// Opening line for a new session.
    pub fn launch(&self, rng: &mut StdRng) -> Utterance {
        self.prompting(LAUNCH_LEAD, rng)
    }

    /// Opening line when the session was already in word mode.
    pub fn relaunch(&self, rng: &mut StdRng) -> Utterance {
        self.prompting(RELAUNCH_LEAD, rng)
    }

    pub fn help(&self, rng: &mut StdRng) -> Utterance {
        self.prompting(HELP_LEAD, rng)
    }

    pub fn clarify(&self, rng: &mut StdRng) -> Utterance {
        self.prompting(CLARIFY_LEAD, rng)
    }

    /// Report the approximate vocabulary size.
    pub fn count(&self, vocabulary_size: i64, rng: &mut StdRng) -> Utterance {
        let lead = format!(
            "Remoggle Word Maker can currently create approximately \
             <say-as interpret-as=\"cardinal\">{}</say-as> unique nonsense words.",
            vocabulary_size
        );
        self.prompting(&lead, rng)
    }

    /// A goodbye. Nothing follows it, so there is no reprompt.
    pub fn farewell(&self, rng: &mut StdRng) -> Utterance {
        Utterance {
            speech: pick(&self.phrases.farewells, rng).to_string(),
            reprompt: None,
            card: None,
        }
    }

    fn prompting(&self, lead: &str, rng: &mut StdRng) -> Utterance {
        Utterance {
            speech: format!("{} {}", lead, pick(&self.phrases.intent_prompts, rng)),
            reprompt: Some(pick(&self.phrases.intent_prompts, rng).to_string()),
            card: None,
        }
    }
}

/// Spell a word out: `"abc"` → `"a, b, c"`.
pub fn spell(word: &str) -> String {
    let letters: Vec<String> = word.chars().map(String::from).collect();
    letters.join(", ")
}

fn pick<'a>(pool: &'a [String], rng: &mut StdRng) -> &'a str {
    pool.choose(rng).map(String::as_str).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn spell_separates_letters() {
        assert_eq!(spell("zorbly"), "z, o, r, b, l, y");
        assert_eq!(spell("a"), "a");
        assert_eq!(spell(""), "");
    }

    #[test]
    fn compose_speaks_word_spelling_and_prompt() {
        let composer = UtteranceComposer::default();
        let mut rng = StdRng::seed_from_u64(3);
        let u = composer.compose("vexful", &mut rng);

        assert!(u.speech.starts_with("Your new word is vexful. "));
        assert!(u.speech.contains("<p>v, e, x, f, u, l.</p> vexful. "));
        let (_, prompt) = u.speech.split_once(PAUSE).unwrap();
        assert!(composer.phrases().repeat_prompts.iter().any(|p| p == prompt));

        let reprompt = u.reprompt.unwrap();
        assert!(composer.phrases().repeat_prompts.contains(&reprompt));
    }

    #[test]
    fn compose_builds_card_from_pools() {
        let composer = UtteranceComposer::default();
        let mut rng = StdRng::seed_from_u64(11);
        let card = composer.compose("vexful", &mut rng).card.unwrap();

        assert_eq!(card.title, "New Word: vexful");
        let phrases = composer.phrases();
        let intro = phrases
            .intros
            .iter()
            .find(|i| card.body.starts_with(i.as_str()))
            .expect("body should open with an intro");
        let rest = card.body[intro.len()..].trim_start();
        assert!(phrases.flavors.iter().any(|f| f == rest));
        assert_eq!(card.images, CardImages::default());
    }

    #[test]
    fn prompting_utterances_carry_intent_reprompt() {
        let composer = UtteranceComposer::default();
        let mut rng = StdRng::seed_from_u64(5);
        let prompts = &composer.phrases().intent_prompts;

        for u in [
            composer.launch(&mut rng),
            composer.relaunch(&mut rng),
            composer.help(&mut rng),
            composer.clarify(&mut rng),
            composer.count(42, &mut rng),
        ] {
            let reprompt = u.reprompt.unwrap();
            assert!(prompts.contains(&reprompt));
            assert!(prompts.iter().any(|p| u.speech.ends_with(p.as_str())));
            assert!(u.card.is_none());
        }
    }

    #[test]
    fn launch_variants_differ() {
        let composer = UtteranceComposer::default();
        let mut rng = StdRng::seed_from_u64(5);
        assert!(composer
            .launch(&mut rng)
            .speech
            .starts_with("Word Maker creates new nonsense words. "));
        assert!(composer
            .relaunch(&mut rng)
            .speech
            .starts_with("Word Maker creates made-up English words. "));
    }

    #[test]
    fn count_uses_cardinal_markup() {
        let composer = UtteranceComposer::default();
        let mut rng = StdRng::seed_from_u64(1);
        let u = composer.count(34_044_800, &mut rng);
        assert!(u
            .speech
            .contains(r#"<say-as interpret-as="cardinal">34044800</say-as> unique nonsense words."#));
    }

    #[test]
    fn farewell_has_no_reprompt() {
        let composer = UtteranceComposer::default();
        let mut rng = StdRng::seed_from_u64(9);
        let u = composer.farewell(&mut rng);
        assert!(composer.phrases().farewells.contains(&u.speech));
        assert!(u.reprompt.is_none());
    }

    #[test]
    fn phrase_book_rejects_empty_pool() {
        let input = r#"(
            intros: ["Hi!"],
            flavors: [],
            repeat_prompts: ["Again?"],
            intent_prompts: ["Word?"],
            farewells: ["Bye."],
        )"#;
        let err = PhraseBook::parse_ron(input).unwrap_err();
        assert!(matches!(err, ComposerError::EmptyPool("flavors")));
    }

    #[test]
    fn shipped_phrase_book_loads() {
        let book = PhraseBook::load_from_ron(Path::new("data/phrases.ron")).unwrap();
        assert_eq!(book, PhraseBook::default());
    }
}
