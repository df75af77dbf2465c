use serde::{Deserialize, Serialize};

use super::session::SessionState;

/// Static card artwork. Opaque to the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardImages {
    pub small_image_url: String,
    pub large_image_url: String,
}

impl Default for CardImages {
    fn default() -> Self {
        Self {
            small_image_url: "https://s3.amazonaws.com/cdn.remoggle.com/assets/rm_cd_720_tx_b.png"
                .to_string(),
            large_image_url: "https://s3.amazonaws.com/cdn.remoggle.com/assets/rm_cd_1200_tx_b.png"
                .to_string(),
        }
    }
}

/// A display card shown alongside the spoken output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub title: String,
    pub body: String,
    pub images: CardImages,
}

/// Everything the adapter needs to answer one turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogResponse {
    /// Spoken text, possibly carrying inline pause and pacing markup.
    pub speech: String,
    pub reprompt: Option<String>,
    pub card: Option<Card>,
    /// State to persist for the next turn.
    pub state: SessionState,
    pub should_end_session: bool,
}
