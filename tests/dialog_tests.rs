/// Conversation tests: whole sessions against the fixture and shipped lexicons.

use std::path::Path;

use word_maker::core::composer::{spell, PAUSE};
use word_maker::core::lexicon::Lexicon;
use word_maker::schema::intent::Intent;
use word_maker::schema::response::DialogResponse;
use word_maker::schema::session::{DialogRequest, SessionState};
use word_maker::{WordMaker, WordMakerError};

const FIXTURE_LEXICON: &str = "tests/fixtures/lexicon";

fn fixture_maker(seed: u64) -> WordMaker {
    WordMaker::builder()
        .lexicon_dir(FIXTURE_LEXICON)
        .seed(seed)
        .build()
        .unwrap()
}

/// Send a platform intent name the way an adapter would, carrying the
/// state token across turns.
fn say(maker: &mut WordMaker, token: &str, intent: &str) -> Option<DialogResponse> {
    let state = SessionState::from_token(token).unwrap();
    maker
        .handle(&DialogRequest::new("it-session", Intent::from_name(intent), state))
        .unwrap()
}

fn word_of(response: &DialogResponse) -> String {
    response
        .card
        .as_ref()
        .and_then(|c| c.title.strip_prefix("New Word: "))
        .expect("word delivery carries a card")
        .to_string()
}

#[test]
fn fixture_lexicon_merges_all_word_lists() {
    let lexicon = Lexicon::load(Path::new(FIXTURE_LEXICON)).unwrap();
    assert_eq!(lexicon.corpus_len(), 2);
    assert_eq!(lexicon.supplemental_len(), 1);
    assert!(lexicon.is_excluded("catly"));
    assert!(lexicon.is_excluded("DOGLY"));
    assert!(lexicon.is_excluded("DogDogLy"));
    assert!(!lexicon.is_excluded("catdogly"));
}

#[test]
fn empty_corpus_fixture_is_rejected() {
    let result = WordMaker::builder()
        .lexicon_dir("tests/fixtures/empty_lexicon")
        .seed(1)
        .build();
    assert!(matches!(result, Err(WordMakerError::Lexicon(_))));
}

#[test]
fn full_session_launch_word_repeat_goodbye() {
    let mut maker = fixture_maker(11);

    let launch = say(&mut maker, "", "LaunchRequest").unwrap();
    assert_eq!(launch.state.token(), "ASKMODE");
    assert!(launch.speech.starts_with("Word Maker creates new nonsense words. "));

    let first = say(&mut maker, launch.state.token(), "AMAZON.YesIntent").unwrap();
    assert_eq!(first.state, SessionState::AskMode);
    let word = word_of(&first);
    assert!(!["catly", "dogly", "dogdogly"].contains(&word.as_str()));
    assert_eq!(
        first.speech.split(PAUSE).next().unwrap(),
        format!("Your new word is {w}. <p>{s}.</p> {w}. ", w = word, s = spell(&word))
    );

    let second = say(&mut maker, first.state.token(), "AMAZON.YesIntent").unwrap();
    assert_eq!(second.state, SessionState::AskMode);
    word_of(&second);

    let bye = say(&mut maker, second.state.token(), "AMAZON.NoIntent").unwrap();
    assert!(bye.should_end_session);
    assert_eq!(bye.state, SessionState::WordMode);

    assert!(say(&mut maker, bye.state.token(), "SessionEndedRequest").is_none());
}

#[test]
fn returning_session_in_word_mode_relaunches() {
    let mut maker = fixture_maker(12);
    let r = say(&mut maker, "WORDMODE", "LaunchRequest").unwrap();
    assert_eq!(r.state, SessionState::AskMode);
    assert!(r.speech.starts_with("Word Maker creates made-up English words. "));
}

#[test]
fn help_from_every_state_explains_stop() {
    for token in ["", "WORDMODE", "ASKMODE"] {
        let mut maker = fixture_maker(13);
        let r = say(&mut maker, token, "AMAZON.HelpIntent").unwrap();
        assert!(r.speech.contains("You can always say 'stop'"), "state {:?}", token);
        assert_eq!(r.state, SessionState::AskMode);
        assert!(!r.should_end_session);
    }
}

#[test]
fn stop_and_cancel_keep_the_state() {
    for token in ["", "WORDMODE", "ASKMODE"] {
        for intent in ["AMAZON.StopIntent", "AMAZON.CancelIntent"] {
            let mut maker = fixture_maker(14);
            let r = say(&mut maker, token, intent).unwrap();
            assert!(r.should_end_session);
            assert_eq!(r.state.token(), token);
            assert!(r.card.is_none());
        }
    }
}

#[test]
fn unknown_intent_asks_again() {
    let mut maker = fixture_maker(15);
    let r = say(&mut maker, "WORDMODE", "OrderPizzaIntent").unwrap();
    assert!(r.speech.starts_with("I didn't get that. "));
    assert_eq!(r.state, SessionState::AskMode);
    assert!(r.reprompt.is_some());
}

#[test]
fn word_request_while_asking_is_clarified() {
    let mut maker = fixture_maker(17);
    let r = say(&mut maker, "ASKMODE", "randomword").unwrap();
    assert!(r.speech.starts_with("I didn't get that. "));
    assert!(r.card.is_none());
    assert_eq!(r.state, SessionState::AskMode);
    assert!(r.reprompt.is_some());
    assert!(!r.should_end_session);
}

#[test]
fn count_uses_fixture_estimate() {
    let mut maker = fixture_maker(16);
    // 2² × 1 − 2 − 1
    assert_eq!(maker.vocabulary_size(), 1);
    let r = say(&mut maker, "ASKMODE", "howmany").unwrap();
    assert!(r
        .speech
        .contains("<say-as interpret-as=\"cardinal\">1</say-as>"));
}

#[test]
fn shipped_config_builds_a_working_maker() {
    let mut maker = WordMaker::builder()
        .config_file(Path::new("word_maker.ron"))
        .unwrap()
        .seed(99)
        .build()
        .unwrap();
    assert!(maker.vocabulary_size() > 0);

    let r = say(&mut maker, "", "randomword").unwrap();
    let word = word_of(&r);
    assert!(!maker.lexicon().is_excluded(&word));
    assert!(!maker.lexicon().is_forbidden(&word));
}

#[test]
fn same_seed_replays_the_same_session() {
    let script = ["LaunchRequest", "AMAZON.YesIntent", "randomword", "howmany", "AMAZON.NoIntent"];
    let run = |seed| {
        let mut maker = fixture_maker(seed);
        let mut token = "";
        let mut transcript = Vec::new();
        for intent in script {
            let r = say(&mut maker, token, intent).unwrap();
            token = r.state.token();
            transcript.push(r);
        }
        transcript
    };
    assert_eq!(run(21), run(21));
}
