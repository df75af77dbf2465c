use serde::{Deserialize, Serialize};

/// What the user asked for on a given turn.
///
/// The platform decides which intent an utterance maps to; the dialog
/// only ever sees one of these symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Intent {
    StartSession,
    RequestWord,
    RequestCount,
    Help,
    Yes,
    No,
    Cancel,
    Stop,
    SessionEnded,
    Unhandled,
}

impl Intent {
    /// Map an intent name to an `Intent`.
    ///
    /// Accepts the symbolic names (`request-word`) as well as the voice
    /// platform's own names (`randomword`, `AMAZON.YesIntent`). Anything
    /// unrecognized becomes `Unhandled`, never an error.
    pub fn from_name(name: &str) -> Intent {
        match name.trim() {
            "start-session" | "LaunchRequest" => Intent::StartSession,
            "request-word" | "randomword" => Intent::RequestWord,
            "request-count" | "howmany" => Intent::RequestCount,
            "help" | "AMAZON.HelpIntent" => Intent::Help,
            "yes" | "AMAZON.YesIntent" => Intent::Yes,
            "no" | "AMAZON.NoIntent" => Intent::No,
            "cancel" | "AMAZON.CancelIntent" => Intent::Cancel,
            "stop" | "AMAZON.StopIntent" => Intent::Stop,
            "session-ended" | "SessionEndedRequest" => Intent::SessionEnded,
            _ => Intent::Unhandled,
        }
    }

    /// The symbolic name of this intent.
    pub fn name(&self) -> &'static str {
        match self {
            Intent::StartSession => "start-session",
            Intent::RequestWord => "request-word",
            Intent::RequestCount => "request-count",
            Intent::Help => "help",
            Intent::Yes => "yes",
            Intent::No => "no",
            Intent::Cancel => "cancel",
            Intent::Stop => "stop",
            Intent::SessionEnded => "session-ended",
            Intent::Unhandled => "unhandled",
        }
    }
}
