//! Move sequences.
//!
//! [`MoveList`] holds candidate moves returned by move generation.
//! [`MoveHistory`] is the append-only record of committed moves kept by a
//! board and by each piece.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Move;

/// A list of moves, such as the legal moves of one piece.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct MoveList {
    moves: Vec<Move>,
}

impl MoveList {
    /// Creates an empty move list.
    #[inline]
    pub const fn new() -> Self {
        MoveList { moves: Vec::new() }
    }

    /// Adds a move to the list.
    #[inline]
    pub fn push(&mut self, m: Move) {
        self.moves.push(m);
    }

    /// Returns the number of moves.
    #[inline]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    /// Returns true if the list is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Returns a slice of the moves.
    #[inline]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves
    }

    /// Returns an iterator over the moves.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.moves.iter()
    }

    /// Returns true if the list contains `m`.
    #[inline]
    pub fn contains(&self, m: &Move) -> bool {
        self.moves.contains(m)
    }

    /// Clears the move list.
    #[inline]
    pub fn clear(&mut self) {
        self.moves.clear();
    }

    /// Retains only moves for which the predicate returns true.
    pub fn retain<F>(&mut self, f: F)
    where
        F: FnMut(&Move) -> bool,
    {
        self.moves.retain(f);
    }
}

impl std::ops::Index<usize> for MoveList {
    type Output = Move;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.moves[index]
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.moves.iter()
    }
}

impl IntoIterator for MoveList {
    type Item = Move;
    type IntoIter = std::vec::IntoIter<Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.moves.into_iter()
    }
}

impl FromIterator<Move> for MoveList {
    fn from_iter<I: IntoIterator<Item = Move>>(iter: I) -> Self {
        MoveList {
            moves: iter.into_iter().collect(),
        }
    }
}

impl Extend<Move> for MoveList {
    fn extend<I: IntoIterator<Item = Move>>(&mut self, iter: I) {
        self.moves.extend(iter);
    }
}

impl fmt::Debug for MoveList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.moves.iter()).finish()
    }
}

/// The ordered record of committed moves.
///
/// Moves are only ever appended, except by [`MoveHistory::pop_last`] which
/// exists for take-back. Cloning produces an independent copy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MoveHistory {
    moves: Vec<Move>,
}

impl MoveHistory {
    /// Creates an empty history.
    #[inline]
    pub const fn new() -> Self {
        MoveHistory { moves: Vec::new() }
    }

    /// Appends a committed move.
    #[inline]
    pub fn push(&mut self, m: Move) {
        self.moves.push(m);
    }

    /// Returns the number of moves recorded.
    #[inline]
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Returns the most recent move.
    #[inline]
    pub fn last(&self) -> Option<Move> {
        self.moves.last().copied()
    }

    /// Removes and returns the most recent move.
    #[inline]
    pub fn pop_last(&mut self) -> Option<Move> {
        self.moves.pop()
    }

    #[inline]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.moves.iter()
    }
}

impl<'a> IntoIterator for &'a MoveHistory {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.moves.iter()
    }
}

impl FromIterator<Move> for MoveHistory {
    fn from_iter<I: IntoIterator<Item = Move>>(iter: I) -> Self {
        MoveHistory {
            moves: iter.into_iter().collect(),
        }
    }
}
