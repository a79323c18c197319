//! Caller-owned game properties.
//!
//! [`GameProperties`] carries the settings the rules need but that are not
//! part of the board itself: which way each color advances and the colors
//! used to shade squares. It is passed into board construction rather than
//! looked up globally, and can be loaded from a TOML file.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{Color, Location};

/// Errors that can occur when loading properties.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the properties file from disk.
    #[error("failed to read properties file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse the properties as valid TOML.
    #[error("failed to parse properties: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Direction a color's pawns advance along the ranks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Towards rank 8.
    Up,
    /// Towards rank 1.
    Down,
}

impl Direction {
    /// Returns the rank delta of one step in this direction.
    #[inline]
    pub const fn rank_step(self) -> i8 {
        match self {
            Direction::Up => 1,
            Direction::Down => -1,
        }
    }

    /// Returns the opposite direction.
    #[inline]
    pub const fn reverse(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }
}

/// An RGB triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Shade of a board square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shade {
    Light,
    Dark,
}

/// Settings shared by every board of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameProperties {
    /// Direction White's pawns advance. Black always moves the other way.
    #[serde(default = "default_white_direction")]
    pub white_direction: Direction,
    /// Color of light squares.
    #[serde(default = "default_light_square")]
    pub light_square: Rgb,
    /// Color of dark squares.
    #[serde(default = "default_dark_square")]
    pub dark_square: Rgb,
}

fn default_white_direction() -> Direction {
    Direction::Up
}

fn default_light_square() -> Rgb {
    Rgb(188, 185, 83)
}

fn default_dark_square() -> Rgb {
    Rgb(101, 147, 90)
}

impl Default for GameProperties {
    fn default() -> Self {
        GameProperties {
            white_direction: default_white_direction(),
            light_square: default_light_square(),
            dark_square: default_dark_square(),
        }
    }
}

impl GameProperties {
    /// Number of files and ranks on the board.
    pub const BOARD_SIZE: u8 = 8;

    /// Parses properties from a TOML document. Missing keys take defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Loads properties from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ReadError`] if the file cannot be read, or
    /// [`ConfigError::ParseError`] if it is not valid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Returns the direction pawns of `color` advance.
    #[inline]
    pub const fn direction(&self, color: Color) -> Direction {
        match color {
            Color::White => self.white_direction,
            Color::Black => self.white_direction.reverse(),
        }
    }

    /// Returns the rank holding the back row of `color` at setup.
    #[inline]
    pub const fn home_rank(&self, color: Color) -> u8 {
        match self.direction(color) {
            Direction::Up => 0,
            Direction::Down => Self::BOARD_SIZE - 1,
        }
    }

    /// Returns the rank `color`'s pawns start on.
    #[inline]
    pub const fn pawn_rank(&self, color: Color) -> u8 {
        match self.direction(color) {
            Direction::Up => 1,
            Direction::Down => Self::BOARD_SIZE - 2,
        }
    }

    /// Returns the rank on which `color`'s pawns promote.
    #[inline]
    pub const fn promotion_rank(&self, color: Color) -> u8 {
        self.home_rank(color.opposite())
    }

    /// Returns the display color of a square.
    pub fn square_color(&self, location: Location) -> Rgb {
        match location.shade() {
            Shade::Light => self.light_square,
            Shade::Dark => self.dark_square,
        }
    }
}
