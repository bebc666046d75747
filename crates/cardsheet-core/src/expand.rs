// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Copy expansion: flatten a card list into one entry per printed instance.

use tracing::error;

use crate::error::{CardsheetError, Result};
use crate::types::{Card, ExpandedCard};

/// Expand each card into `copies` consecutive entries, keeping card order.
///
/// Copy counts are clamped where they are edited, not here. A count below 1
/// means the mutation path is broken, so it is reported rather than repaired.
pub fn expand(cards: &[Card]) -> Result<Vec<ExpandedCard>> {
    let mut expanded = Vec::with_capacity(cards.iter().map(|c| c.copies as usize).sum());

    for card in cards {
        if card.copies < 1 {
            error!(card = %card.id, image = %card.image, copies = card.copies, "card has illegal copy count");
            return Err(CardsheetError::InvariantViolation(format!(
                "card {} ({}) has {} copies",
                card.id, card.image, card.copies
            )));
        }

        expanded.extend((0..card.copies).map(|copy_index| ExpandedCard {
            card: card.id,
            image: card.image.clone(),
            copy_index,
        }));
    }

    Ok(expanded)
}
