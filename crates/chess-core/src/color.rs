//! Sides of the board.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The two sides. Which way each side's pawns advance is a property of the
/// game, see [`GameProperties::direction`](crate::GameProperties::direction).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Color {
    White = 0,
    Black = 1,
}

/// A string that names neither side.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown color '{0}', expected white or black")]
pub struct ParseColorError(String);

impl Color {
    /// White, then Black.
    pub const ALL: [Color; 2] = [Color::White, Color::Black];

    /// Returns the other side.
    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Index into per-side tables (White 0, Black 1).
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "white" | "w" => Ok(Color::White),
            "black" | "b" => Ok(Color::Black),
            _ => Err(ParseColorError(s.to_string())),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Color::White => "White",
            Color::Black => "Black",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opposite_is_involution() {
        for color in Color::ALL {
            assert_ne!(color.opposite(), color);
            assert_eq!(color.opposite().opposite(), color);
        }
    }

    #[test]
    fn indices_are_distinct() {
        assert_eq!(Color::White.index(), 0);
        assert_eq!(Color::Black.index(), 1);
    }

    #[test]
    fn parse() {
        assert_eq!("white".parse::<Color>(), Ok(Color::White));
        assert_eq!("B".parse::<Color>(), Ok(Color::Black));
        assert_eq!(
            "red".parse::<Color>(),
            Err(ParseColorError("red".to_string()))
        );
    }

    #[test]
    fn display_and_serde() {
        assert_eq!(Color::Black.to_string(), "Black");
        assert_eq!(serde_json::to_string(&Color::White).unwrap(), "\"white\"");
    }
}
