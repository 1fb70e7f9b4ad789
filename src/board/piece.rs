//! Piece colors and kinds.

use std::fmt;

use serde::Serialize;

/// One of the two sides.
///
/// Red starts on rows 5..=7 and moves toward row 0; White starts on rows
/// 0..=2 and moves toward row 7. Red moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Red,
    White,
}

pub const ALL_COLORS: [Color; 2] = [Color::Red, Color::White];

impl Color {
    pub const fn opponent(self) -> Color {
        match self {
            Color::Red => Color::White,
            Color::White => Color::Red,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::White => "white",
        }
    }

    /// Single-character notation abbreviation.
    pub const fn notation_char(self) -> char {
        match self {
            Color::Red => 'r',
            Color::White => 'w',
        }
    }

    pub fn from_notation_char(c: char) -> Option<Color> {
        match c {
            'r' => Some(Color::Red),
            'w' => Some(Color::White),
            _ => None,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A checker on the board. Its location is the grid slot holding it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub color: Color,
    pub king: bool,
}

impl Piece {
    pub const fn man(color: Color) -> Piece {
        Piece { color, king: false }
    }

    pub const fn king(color: Color) -> Piece {
        Piece { color, king: true }
    }

    /// Notation character: lowercase for men, uppercase for kings.
    pub fn notation_char(self) -> char {
        let c = self.color.notation_char();
        if self.king {
            c.to_ascii_uppercase()
        } else {
            c
        }
    }

    pub fn from_notation_char(c: char) -> Option<Piece> {
        let color = Color::from_notation_char(c.to_ascii_lowercase())?;
        Some(Piece {
            color,
            king: c.is_ascii_uppercase(),
        })
    }
}
