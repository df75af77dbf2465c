/// Dialog state machine: which action answers an intent in each state.
///
/// The table is a plain function of `(state, intent)`. Executing the
/// action (generating words, drawing phrases) is the engine's job.

use thiserror::Error;

use crate::schema::intent::Intent;
use crate::schema::session::SessionState;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DialogError {
    #[error("redirect chain from {state} on '{intent}' did not settle after {hops} hops")]
    RedirectLoop {
        state: SessionState,
        intent: &'static str,
        hops: usize,
    },
}

/// Upper bound on chained redirects. The table needs one at most.
const MAX_REDIRECTS: usize = 4;

/// What to say on a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Introduce the product at the start of a session.
    Launch,
    /// Introduce it again when a session restarts in word mode.
    Relaunch,
    /// Generate a word and spell it out.
    MakeWord,
    /// Report the approximate vocabulary size.
    Count,
    Help,
    /// "I didn't get that."
    Clarify,
}

/// Final result of a turn once redirects are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Perform the action and keep listening.
    Respond { next: SessionState, action: Action },
    /// Say goodbye and end the session.
    End { next: SessionState },
    /// Log only; nothing goes back to the user.
    Silent,
}

/// One row of the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Done(Outcome),
    /// Switch to `through` and answer `intent` from that state's row.
    Redirect {
        through: SessionState,
        intent: Intent,
    },
}

fn respond(next: SessionState, action: Action) -> Transition {
    Transition::Done(Outcome::Respond { next, action })
}

/// Look up the row for `intent` in `state`.
///
/// Yes and help in ask mode deliberately go through word mode's rows
/// instead of answering in place.
pub fn transition(state: SessionState, intent: Intent) -> Transition {
    use Intent::*;
    use SessionState::*;

    match (state, intent) {
        (_, SessionEnded) => Transition::Done(Outcome::Silent),

        (Stateless, StartSession) => respond(AskMode, Action::Launch),
        (WordMode, StartSession) => respond(AskMode, Action::Relaunch),

        (Stateless | WordMode, RequestWord) => respond(AskMode, Action::MakeWord),
        (_, RequestCount) => respond(AskMode, Action::Count),

        (Stateless, Help) => Transition::Redirect {
            through: WordMode,
            intent: Help,
        },
        (WordMode, Help | Yes | No) => respond(AskMode, Action::Help),

        (AskMode, Yes) => Transition::Redirect {
            through: WordMode,
            intent: RequestWord,
        },
        (AskMode, Help) => Transition::Redirect {
            through: WordMode,
            intent: Help,
        },
        (AskMode, No) => Transition::Done(Outcome::End { next: WordMode }),

        (state, Cancel | Stop) => Transition::Done(Outcome::End { next: state }),

        // Everything else, including Unhandled, gets a clarification.
        _ => respond(AskMode, Action::Clarify),
    }
}

/// A settled turn and the state it passed through on the way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolved {
    pub via: Option<SessionState>,
    pub outcome: Outcome,
}

/// Follow redirects until a row settles.
pub fn resolve(state: SessionState, intent: Intent) -> Result<Resolved, DialogError> {
    let mut current = (state, intent);
    let mut via = None;
    for _ in 0..=MAX_REDIRECTS {
        match transition(current.0, current.1) {
            Transition::Done(outcome) => return Ok(Resolved { via, outcome }),
            Transition::Redirect { through, intent } => {
                via = Some(through);
                current = (through, intent);
            }
        }
    }
    Err(DialogError::RedirectLoop {
        state,
        intent: intent.name(),
        hops: MAX_REDIRECTS,
    })
}
