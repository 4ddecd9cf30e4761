//! Ranked answer sequences.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Stable identity of an answer: its position in the screen's fixed option
/// list. Two options with identical text still get distinct ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AnswerId(pub usize);

/// One ranked answer as emitted to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderedAnswer {
    pub id: AnswerId,
    pub text: String,
    /// 1-based rank; always a contiguous `1..=N` across the sequence.
    pub order: usize,
}

/// Ranking errors surfaced to the screen.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RankingError {
    #[error("position {index} out of range")]
    PositionOutOfRange { index: usize },
}

/// An ordered sequence of answers.
///
/// `order` values are re-derived from array position after every move and
/// never mutated independently, so they stay a contiguous permutation of
/// `1..=N` no matter what sequence of moves happens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedList {
    items: Vec<OrderedAnswer>,
}

impl RankedList {
    /// Snapshot the selected subset of `options`, in display order, with
    /// `order` assigned from position.
    pub fn from_selection(options: &[String], selected_indices: &[usize]) -> Self {
        let items = selected_indices
            .iter()
            .enumerate()
            .map(|(position, &index)| OrderedAnswer {
                id: AnswerId(index),
                text: options.get(index).cloned().unwrap_or_default(),
                order: position + 1,
            })
            .collect();
        Self { items }
    }

    pub fn items(&self) -> &[OrderedAnswer] {
        &self.items
    }

    pub fn into_items(self) -> Vec<OrderedAnswer> {
        self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Move the item at `from` to position `to` (both 0-based), shifting
    /// everything in between. The whole sequence is renumbered afterwards;
    /// the latest arrangement is authoritative, there is no undo.
    pub fn move_item(&mut self, from: usize, to: usize) -> Result<(), RankingError> {
        if from >= self.items.len() {
            return Err(RankingError::PositionOutOfRange { index: from });
        }
        if to >= self.items.len() {
            return Err(RankingError::PositionOutOfRange { index: to });
        }
        if from != to {
            let item = self.items.remove(from);
            self.items.insert(to, item);
            self.renumber();
        }
        Ok(())
    }

    fn renumber(&mut self) {
        for (position, item) in self.items.iter_mut().enumerate() {
            item.order = position + 1;
        }
    }
}
