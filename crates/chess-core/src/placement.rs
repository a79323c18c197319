//! Piece-placement strings.
//!
//! A placement lists the ranks from 8 down to 1 separated by `/`. Within a
//! rank, letters are pieces (uppercase for White) and digits count empty
//! squares, e.g. `rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR`.
//!
//! Only the placement is described. Side to move, move counters and move
//! notation are not part of it.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::{Color, Location, PieceKind};

/// Errors that can occur when parsing a placement string.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlacementError {
    #[error("expected 8 ranks, got {0}")]
    RankCount(usize),

    #[error("invalid character '{character}' in rank {rank}")]
    InvalidCharacter { character: char, rank: u8 },

    #[error("rank {rank} has {squares} squares, expected 8")]
    RankLength { rank: u8, squares: u32 },
}

/// A parsed piece placement.
#[derive(Clone, PartialEq, Eq)]
pub struct Placement {
    squares: [Option<(Color, PieceKind)>; Location::COUNT],
}

impl Placement {
    /// The standard starting placement with White on ranks 1 and 2.
    pub const STANDARD: &'static str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";

    /// Creates a placement with no pieces.
    pub const fn empty() -> Self {
        Placement {
            squares: [None; Location::COUNT],
        }
    }

    /// Parses a placement string.
    pub fn parse(placement: &str) -> Result<Self, PlacementError> {
        let ranks: Vec<&str> = placement.trim().split('/').collect();
        if ranks.len() != 8 {
            return Err(PlacementError::RankCount(ranks.len()));
        }

        let mut result = Placement::empty();
        for (i, text) in ranks.iter().enumerate() {
            let rank = 7 - i as u8;
            let mut file: u32 = 0;
            for c in text.chars() {
                if let Some(skip) = c.to_digit(10).filter(|d| (1..=8).contains(d)) {
                    file += skip;
                    continue;
                }
                let (kind, color) = PieceKind::from_symbol(c)
                    .ok_or(PlacementError::InvalidCharacter {
                        character: c,
                        rank: rank + 1,
                    })?;
                if file < 8 {
                    if let Some(loc) = Location::of(file as i8, rank as i8) {
                        result.squares[loc.index()] = Some((color, kind));
                    }
                }
                file += 1;
            }
            if file != 8 {
                return Err(PlacementError::RankLength {
                    rank: rank + 1,
                    squares: file,
                });
            }
        }

        Ok(result)
    }

    /// Returns the piece on `location`.
    #[inline]
    pub fn get(&self, location: Location) -> Option<(Color, PieceKind)> {
        self.squares[location.index()]
    }

    /// Puts a piece on `location`, or clears it with `None`.
    #[inline]
    pub fn set(&mut self, location: Location, piece: Option<(Color, PieceKind)>) {
        self.squares[location.index()] = piece;
    }

    /// Iterates over occupied squares in index order (a1, b1, ..., h8).
    pub fn pieces(&self) -> impl Iterator<Item = (Location, Color, PieceKind)> + '_ {
        Location::all().filter_map(move |loc| self.get(loc).map(|(c, k)| (loc, c, k)))
    }
}

impl Default for Placement {
    fn default() -> Self {
        Self::empty()
    }
}

impl FromStr for Placement {
    type Err = PlacementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8i8).rev() {
            let mut empty = 0;
            for file in 0..8i8 {
                let piece = Location::of(file, rank).and_then(|loc| self.get(loc));
                match piece {
                    Some((color, kind)) => {
                        if empty > 0 {
                            write!(f, "{}", empty)?;
                            empty = 0;
                        }
                        write!(f, "{}", kind.symbol(color))?;
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                write!(f, "{}", empty)?;
            }
            if rank > 0 {
                write!(f, "/")?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Placement({})", self)
    }
}
