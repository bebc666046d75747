// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Caller-owned card list and settings. The session is the only place cards
// are mutated; expansion and pagination read from it.

use tracing::{debug, info};

use crate::config::LayoutConfig;
use crate::error::{CardsheetError, Result};
use crate::expand::expand;
use crate::paginate::paginate;
use crate::types::{Card, CardId, ExpandedCard, ImageRef, PageDescription};

/// Largest copy count a card may hold. Requests above it are clamped down so
/// that expansion stays within memory for any input.
pub const MAX_COPIES: u32 = 10_000;

/// Cards queued for printing plus the settings to print them with.
#[derive(Debug, Clone, Default)]
pub struct CardSession {
    cards: Vec<Card>,
    config: LayoutConfig,
}

impl CardSession {
    /// An empty session that will print with `config`.
    pub fn new(config: LayoutConfig) -> Self {
        Self {
            cards: Vec::new(),
            config,
        }
    }

    // -- Card list --------------------------------------------------------------

    /// Append a card with one copy.
    pub fn add(&mut self, image: impl Into<ImageRef>) -> CardId {
        let card = Card::new(image);
        let id = card.id;
        debug!(card = %id, image = %card.image, "Card added");
        self.cards.push(card);
        id
    }

    /// Remove a card. Returns `false` if it was not present.
    pub fn remove(&mut self, id: CardId) -> bool {
        let before = self.cards.len();
        self.cards.retain(|card| card.id != id);
        let removed = self.cards.len() != before;
        if removed {
            debug!(card = %id, "Card removed");
        }
        removed
    }

    /// Set a card's copy count, clamped to `1..=MAX_COPIES`.
    ///
    /// Returns the stored value.
    pub fn set_copies(&mut self, id: CardId, copies: i64) -> Result<u32> {
        let card = self
            .cards
            .iter_mut()
            .find(|card| card.id == id)
            .ok_or(CardsheetError::CardNotFound(id))?;
        card.copies = copies.clamp(1, i64::from(MAX_COPIES)) as u32;
        if i64::from(card.copies) != copies {
            debug!(card = %id, requested = copies, stored = card.copies, "Copy count clamped");
        }
        Ok(card.copies)
    }

    /// Put every card back to a single copy.
    pub fn reset_copies(&mut self) {
        for card in &mut self.cards {
            card.copies = 1;
        }
        info!(cards = self.cards.len(), "Copy counts reset");
    }

    /// Cards in print order.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Number of card instances that will be printed.
    pub fn total_copies(&self) -> u64 {
        self.cards.iter().map(|card| card.copies as u64).sum()
    }

    // -- Settings ---------------------------------------------------------------

    /// Settings used by [`CardSession::paginate`].
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Replace the settings; the card list is untouched.
    pub fn set_config(&mut self, config: LayoutConfig) {
        self.config = config;
    }

    // -- Generation -------------------------------------------------------------

    /// One entry per printed instance, in print order.
    pub fn expanded(&self) -> Result<Vec<ExpandedCard>> {
        expand(&self.cards)
    }

    /// Expand and paginate the current cards.
    ///
    /// Unlike the engine, a session with no cards is an error: there is
    /// nothing to print.
    pub fn paginate(&self) -> Result<Vec<PageDescription>> {
        if self.cards.is_empty() {
            return Err(CardsheetError::EmptySession);
        }
        let expanded = self.expanded()?;
        paginate(&expanded, &self.config)
    }
}
