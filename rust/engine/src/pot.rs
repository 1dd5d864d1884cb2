use serde::{Deserialize, Serialize};

use crate::player::Seat;

/// The single heads-up pot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pot {
    amount: u32,
}

impl Pot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn amount(&self) -> u32 {
        self.amount
    }

    pub fn add(&mut self, chips: u32) {
        self.amount += chips;
    }

    /// Removes up to `chips` (an uncalled bet going back to its owner).
    pub fn remove(&mut self, chips: u32) -> u32 {
        let taken = chips.min(self.amount);
        self.amount -= taken;
        taken
    }

    /// Empties the pot, returning what it held.
    pub fn take(&mut self) -> u32 {
        std::mem::take(&mut self.amount)
    }

    /// Empties the pot into two shares indexed by seat.
    ///
    /// Each seat gets `amount / 2`; an odd chip goes to `odd_chip_to`.
    pub fn split(&mut self, odd_chip_to: Seat) -> [u32; 2] {
        let total = self.take();
        let half = total / 2;
        let mut shares = [half, half];
        shares[odd_chip_to.index()] += total - 2 * half;
        shares
    }
}
