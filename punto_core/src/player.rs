// A seat at the table: identity, card supply, and turn state.

use serde::{Deserialize, Serialize};

use crate::deck::{Deck, EmptyDeckError};
use crate::rng::GameRng;
use crate::types::{CardValue, PlayerId};

/// One player: seat id, deck, the card currently awaiting placement, and
/// whether this seat holds the turn.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Player {
    id: PlayerId,
    deck: Deck,
    current_card: Option<CardValue>,
    playing: bool,
}

impl Player {
    pub fn new(id: PlayerId, rng: &mut GameRng) -> Self {
        Self {
            id,
            deck: Deck::new(rng),
            current_card: None,
            playing: false,
        }
    }

    /// Draw the next card and hold it for placement.
    pub fn draw_card(&mut self) -> Result<CardValue, EmptyDeckError> {
        let value = self.deck.draw()?;
        self.current_card = Some(value);
        Ok(value)
    }

    /// Toggle the turn flag. Has no other effect.
    pub fn set_playing(&mut self, playing: bool) {
        self.playing = playing;
    }

    pub fn id(&self) -> PlayerId {
        self.id
    }

    /// The card drawn this turn, `None` before the seat's first draw.
    pub fn current_card(&self) -> Option<CardValue> {
        self.current_card
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn cards_left(&self) -> usize {
        self.deck.len()
    }
}
