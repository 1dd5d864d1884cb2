use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::cards::{full_deck, Card};
use crate::errors::GameError;

/// The 52-card deck, split into the undealt stack and the dealt pile.
///
/// Cards are dealt from the end of `undealt`. Every card is in exactly one
/// of the two partitions at all times.
#[derive(Debug, Clone)]
pub struct Deck {
    undealt: Vec<Card>,
    dealt: Vec<Card>,
    rng: ChaCha20Rng,
}

impl Deck {
    pub fn new_with_seed(seed: u64) -> Self {
        let rng = ChaCha20Rng::seed_from_u64(seed);
        // Keep initial order until shuffle is called explicitly
        Self {
            undealt: full_deck(),
            dealt: Vec::with_capacity(52),
            rng,
        }
    }

    /// Rebuild the 52 cards in canonical order, all undealt and face down.
    pub fn initialize(&mut self) {
        self.undealt = full_deck();
        self.dealt.clear();
    }

    /// Fisher-Yates shuffle of the undealt cards.
    pub fn shuffle(&mut self) {
        self.undealt.shuffle(&mut self.rng);
    }

    pub fn deal_card(&mut self) -> Result<Card, GameError> {
        let card = self.undealt.pop().ok_or(GameError::DeckExhausted)?;
        self.dealt.push(card);
        Ok(card)
    }

    pub fn deal_cards(&mut self, n: usize) -> Result<Vec<Card>, GameError> {
        (0..n).map(|_| self.deal_card()).collect()
    }

    /// Put every dealt card back on the undealt stack, face down, unshuffled.
    pub fn return_all_cards(&mut self) {
        while let Some(mut card) = self.dealt.pop() {
            card.hide();
            self.undealt.push(card);
        }
    }

    pub fn reset(&mut self) {
        self.initialize();
        self.shuffle();
    }

    pub fn remaining(&self) -> usize {
        self.undealt.len()
    }

    pub fn dealt_count(&self) -> usize {
        self.dealt.len()
    }

    pub fn dealt_cards(&self) -> &[Card] {
        &self.dealt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deal_moves_card_between_partitions() {
        let mut deck = Deck::new_with_seed(3);
        deck.shuffle();
        let c = deck.deal_card().unwrap();
        assert_eq!(deck.remaining(), 51);
        assert_eq!(deck.dealt_count(), 1);
        assert_eq!(deck.dealt_cards()[0], c);
    }

    #[test]
    fn exhausted_deck_errors() {
        let mut deck = Deck::new_with_seed(3);
        deck.deal_cards(52).unwrap();
        assert_eq!(deck.deal_card(), Err(GameError::DeckExhausted));
        assert_eq!(deck.dealt_count(), 52);
    }

    #[test]
    fn return_all_cards_restores_full_stack() {
        let mut deck = Deck::new_with_seed(11);
        deck.shuffle();
        deck.deal_cards(9).unwrap();
        deck.return_all_cards();
        assert_eq!(deck.remaining(), 52);
        assert_eq!(deck.dealt_count(), 0);
    }
}
