//! Board coordinates.
//!
//! A [`Location`] is a validated (file, rank) pair. Every constructor and
//! step function returns `None` instead of producing an off-board value, so
//! walking a ray simply stops when it runs out of board.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::properties::Shade;

/// A relative step on the board, in files and ranks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Offset {
    pub files: i8,
    pub ranks: i8,
}

impl Offset {
    /// Creates an offset.
    #[inline]
    pub const fn new(files: i8, ranks: i8) -> Self {
        Offset { files, ranks }
    }

    /// Returns the offset scaled by `n`.
    ///
    /// Saturates instead of overflowing; a saturated offset is still far off
    /// the board.
    #[inline]
    pub const fn times(self, n: i8) -> Self {
        Offset::new(self.files.saturating_mul(n), self.ranks.saturating_mul(n))
    }

    pub const UP: Offset = Offset::new(0, 1);
    pub const DOWN: Offset = Offset::new(0, -1);
    pub const LEFT: Offset = Offset::new(-1, 0);
    pub const RIGHT: Offset = Offset::new(1, 0);
    pub const UP_LEFT: Offset = Offset::new(-1, 1);
    pub const UP_RIGHT: Offset = Offset::new(1, 1);
    pub const DOWN_LEFT: Offset = Offset::new(-1, -1);
    pub const DOWN_RIGHT: Offset = Offset::new(1, -1);

    /// Rook directions.
    pub const ORTHOGONAL: [Offset; 4] = [Offset::LEFT, Offset::RIGHT, Offset::UP, Offset::DOWN];

    /// Bishop directions.
    pub const DIAGONAL: [Offset; 4] = [
        Offset::UP_LEFT,
        Offset::UP_RIGHT,
        Offset::DOWN_LEFT,
        Offset::DOWN_RIGHT,
    ];

    /// Queen and king directions.
    pub const ALL_DIRECTIONS: [Offset; 8] = [
        Offset::LEFT,
        Offset::RIGHT,
        Offset::UP,
        Offset::DOWN,
        Offset::UP_LEFT,
        Offset::UP_RIGHT,
        Offset::DOWN_LEFT,
        Offset::DOWN_RIGHT,
    ];

    /// The eight knight jumps.
    pub const KNIGHT: [Offset; 8] = [
        Offset::new(-1, 2),
        Offset::new(1, 2),
        Offset::new(-1, -2),
        Offset::new(1, -2),
        Offset::new(-2, 1),
        Offset::new(-2, -1),
        Offset::new(2, 1),
        Offset::new(2, -1),
    ];

    /// Returns true for the four diagonal unit steps.
    #[inline]
    pub const fn is_diagonal(self) -> bool {
        self.files != 0 && self.ranks != 0
    }
}

/// A square on the board.
///
/// Files and ranks are zero-based: a1 is (0, 0), h8 is (7, 7).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawLocation")]
pub struct Location {
    file: u8,
    rank: u8,
}

#[derive(Deserialize)]
struct RawLocation {
    file: u8,
    rank: u8,
}

impl TryFrom<RawLocation> for Location {
    type Error = String;

    fn try_from(raw: RawLocation) -> Result<Self, Self::Error> {
        if raw.file < 8 && raw.rank < 8 {
            Ok(Location {
                file: raw.file,
                rank: raw.rank,
            })
        } else {
            Err(format!("location ({}, {}) is off the board", raw.file, raw.rank))
        }
    }
}

impl Location {
    /// Number of squares on the board.
    pub const COUNT: usize = 64;

    /// Creates a location from zero-based file and rank.
    ///
    /// Returns `None` if either coordinate is outside 0-7.
    #[inline]
    pub const fn of(file: i8, rank: i8) -> Option<Self> {
        if file < 0 || file > 7 || rank < 0 || rank > 7 {
            return None;
        }
        Some(Location {
            file: file as u8,
            rank: rank as u8,
        })
    }

    /// Creates a location from a file letter ('a'-'h') and rank digit ('1'-'8').
    pub const fn at(file: char, rank: char) -> Option<Self> {
        let file = match file.to_ascii_lowercase() {
            c @ 'a'..='h' => c as u8 - b'a',
            _ => return None,
        };
        let rank = match rank {
            c @ '1'..='8' => c as u8 - b'1',
            _ => return None,
        };
        Some(Location { file, rank })
    }

    /// Parses algebraic notation such as "e4".
    pub fn from_algebraic(s: &str) -> Option<Self> {
        let mut chars = s.chars();
        let file = chars.next()?;
        let rank = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        Self::at(file, rank)
    }

    /// Creates a location from a 0-63 index (a1 = 0, h1 = 7, a8 = 56).
    #[inline]
    pub const fn from_index(index: usize) -> Option<Self> {
        if index < Self::COUNT {
            Some(Location {
                file: (index % 8) as u8,
                rank: (index / 8) as u8,
            })
        } else {
            None
        }
    }

    /// Returns the 0-63 index of this location.
    #[inline]
    pub const fn index(self) -> usize {
        self.rank as usize * 8 + self.file as usize
    }

    /// Returns the zero-based file.
    #[inline]
    pub const fn file(self) -> u8 {
        self.file
    }

    /// Returns the zero-based rank.
    #[inline]
    pub const fn rank(self) -> u8 {
        self.rank
    }

    /// Iterates over all 64 locations in index order.
    pub fn all() -> impl Iterator<Item = Location> {
        (0..Self::COUNT).filter_map(Location::from_index)
    }

    /// Returns the location shifted by `offset`, if it stays on the board.
    #[inline]
    pub const fn offset(self, offset: Offset) -> Option<Self> {
        let file = self.file as i16 + offset.files as i16;
        let rank = self.rank as i16 + offset.ranks as i16;
        if file < 0 || file > 7 || rank < 0 || rank > 7 {
            return None;
        }
        Some(Location {
            file: file as u8,
            rank: rank as u8,
        })
    }

    /// Returns true on the first and last rank, where pawns promote.
    #[inline]
    pub const fn is_end_row(self) -> bool {
        self.rank == 0 || self.rank == 7
    }

    /// Returns the shade of the square (a1 is dark).
    #[inline]
    pub const fn shade(self) -> Shade {
        if (self.file + self.rank) % 2 == 0 {
            Shade::Dark
        } else {
            Shade::Light
        }
    }

    /// Returns the file letter.
    #[inline]
    pub const fn file_char(self) -> char {
        (b'a' + self.file) as char
    }

    /// Returns the rank digit.
    #[inline]
    pub const fn rank_char(self) -> char {
        (b'1' + self.rank) as char
    }

    /// Returns the algebraic notation for this location.
    pub fn to_algebraic(self) -> String {
        format!("{}{}", self.file_char(), self.rank_char())
    }

    /// Walks from this location (exclusive) in the direction of `step`
    /// until the edge of the board.
    pub fn ray(self, step: Offset) -> Ray {
        Ray {
            current: Some(self),
            step,
        }
    }

    /// Returns the squares a knight on this location could jump to.
    pub fn knight_jumps(self) -> impl Iterator<Item = Location> {
        Offset::KNIGHT.into_iter().filter_map(move |o| self.offset(o))
    }

    /// Returns the up-to-eight adjacent squares.
    pub fn neighbors(self) -> impl Iterator<Item = Location> {
        Offset::ALL_DIRECTIONS
            .into_iter()
            .filter_map(move |o| self.offset(o))
    }

    #[inline]
    pub const fn up(self) -> Option<Self> {
        self.offset(Offset::UP)
    }

    #[inline]
    pub const fn down(self) -> Option<Self> {
        self.offset(Offset::DOWN)
    }

    #[inline]
    pub const fn left(self) -> Option<Self> {
        self.offset(Offset::LEFT)
    }

    #[inline]
    pub const fn right(self) -> Option<Self> {
        self.offset(Offset::RIGHT)
    }

    #[inline]
    pub const fn up_left(self) -> Option<Self> {
        self.offset(Offset::UP_LEFT)
    }

    #[inline]
    pub const fn up_right(self) -> Option<Self> {
        self.offset(Offset::UP_RIGHT)
    }

    #[inline]
    pub const fn down_left(self) -> Option<Self> {
        self.offset(Offset::DOWN_LEFT)
    }

    #[inline]
    pub const fn down_right(self) -> Option<Self> {
        self.offset(Offset::DOWN_RIGHT)
    }

    #[inline]
    pub const fn up2(self) -> Option<Self> {
        self.offset(Offset::UP.times(2))
    }

    #[inline]
    pub const fn down2(self) -> Option<Self> {
        self.offset(Offset::DOWN.times(2))
    }

    #[inline]
    pub const fn left2(self) -> Option<Self> {
        self.offset(Offset::LEFT.times(2))
    }

    #[inline]
    pub const fn right2(self) -> Option<Self> {
        self.offset(Offset::RIGHT.times(2))
    }

    #[inline]
    pub const fn up_n(self, n: i8) -> Option<Self> {
        self.offset(Offset::UP.times(n))
    }

    #[inline]
    pub const fn down_n(self, n: i8) -> Option<Self> {
        self.offset(Offset::DOWN.times(n))
    }

    #[inline]
    pub const fn left_n(self, n: i8) -> Option<Self> {
        self.offset(Offset::LEFT.times(n))
    }

    #[inline]
    pub const fn right_n(self, n: i8) -> Option<Self> {
        self.offset(Offset::RIGHT.times(n))
    }

    #[inline]
    pub const fn up_left_n(self, n: i8) -> Option<Self> {
        self.offset(Offset::UP_LEFT.times(n))
    }

    #[inline]
    pub const fn up_right_n(self, n: i8) -> Option<Self> {
        self.offset(Offset::UP_RIGHT.times(n))
    }

    #[inline]
    pub const fn down_left_n(self, n: i8) -> Option<Self> {
        self.offset(Offset::DOWN_LEFT.times(n))
    }

    #[inline]
    pub const fn down_right_n(self, n: i8) -> Option<Self> {
        self.offset(Offset::DOWN_RIGHT.times(n))
    }
}

/// Iterator over the squares along one direction.
#[derive(Debug, Clone)]
pub struct Ray {
    current: Option<Location>,
    step: Offset,
}

impl Iterator for Ray {
    type Item = Location;

    fn next(&mut self) -> Option<Location> {
        let next = self.current?.offset(self.step);
        self.current = next;
        next
    }
}

impl fmt::Debug for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Location({})", self.to_algebraic())
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file_char(), self.rank_char())
    }
}
