//! Primitive chess types shared by every subsystem.
//!
//! Squares are plain `u8` indices with little-endian file/rank mapping
//! (`a1 == 0`, `h1 == 7`, `h8 == 63`). Pieces use a compact one-byte encoding
//! where the colour is recovered from the numeric range alone.

use std::fmt;

pub use crate::game_state::game_state::GameState;
pub use crate::game_state::undo_state::UndoState;

/// Board square index (`0..=63`).
pub type Square = u8;

/// Integer sentinel for "no square", for callers that cannot use `Option`.
pub const NO_SQUARE: Square = 64;

/// Compact castling rights bitmask.
pub type CastlingRights = u8;
pub const CASTLE_LIGHT_KINGSIDE: CastlingRights = 1 << 0;
pub const CASTLE_LIGHT_QUEENSIDE: CastlingRights = 1 << 1;
pub const CASTLE_DARK_KINGSIDE: CastlingRights = 1 << 2;
pub const CASTLE_DARK_QUEENSIDE: CastlingRights = 1 << 3;
pub const CASTLE_ALL: CastlingRights = 0b1111;

#[inline]
pub const fn file_of(square: Square) -> u8 {
    square & 7
}

#[inline]
pub const fn rank_of(square: Square) -> u8 {
    square >> 3
}

#[inline]
pub const fn square_at(file: u8, rank: u8) -> Square {
    rank * 8 + file
}

/// Side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Light,
    Dark,
}

impl Color {
    pub const BOTH: [Color; 2] = [Color::Light, Color::Dark];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Color::Light => 0,
            Color::Dark => 1,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::Light => Color::Dark,
            Color::Dark => Color::Light,
        }
    }

    /// `+1` for Light, `-1` for Dark. Converts White-relative scores.
    #[inline]
    pub const fn sign(self) -> i32 {
        match self {
            Color::Light => 1,
            Color::Dark => -1,
        }
    }

    /// Rank index a pawn of this colour promotes on.
    #[inline]
    pub const fn promotion_rank(self) -> u8 {
        match self {
            Color::Light => 7,
            Color::Dark => 0,
        }
    }

    /// Rank index of this colour's pawns before they have moved.
    #[inline]
    pub const fn pawn_start_rank(self) -> u8 {
        match self {
            Color::Light => 1,
            Color::Dark => 6,
        }
    }

    /// Square offset of a single pawn push.
    #[inline]
    pub const fn forward(self) -> i8 {
        match self {
            Color::Light => 8,
            Color::Dark => -8,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Light => f.write_str("white"),
            Color::Dark => f.write_str("black"),
        }
    }
}

/// Piece kind. The declaration order matches the compact piece encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    King,
    Queen,
    Bishop,
    Knight,
    Rook,
    Pawn,
}

impl PieceKind {
    pub const ALL: [PieceKind; 6] = [
        PieceKind::King,
        PieceKind::Queen,
        PieceKind::Bishop,
        PieceKind::Knight,
        PieceKind::Rook,
        PieceKind::Pawn,
    ];

    /// Pieces a pawn may promote to, strongest first.
    pub const PROMOTIONS: [PieceKind; 4] = [
        PieceKind::Queen,
        PieceKind::Rook,
        PieceKind::Bishop,
        PieceKind::Knight,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            PieceKind::King => 0,
            PieceKind::Queen => 1,
            PieceKind::Bishop => 2,
            PieceKind::Knight => 3,
            PieceKind::Rook => 4,
            PieceKind::Pawn => 5,
        }
    }

    #[inline]
    const fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(PieceKind::King),
            1 => Some(PieceKind::Queen),
            2 => Some(PieceKind::Bishop),
            3 => Some(PieceKind::Knight),
            4 => Some(PieceKind::Rook),
            5 => Some(PieceKind::Pawn),
            _ => None,
        }
    }

    /// Upper-case letter used by FEN and algebraic notation.
    #[inline]
    pub const fn letter(self) -> char {
        match self {
            PieceKind::King => 'K',
            PieceKind::Queen => 'Q',
            PieceKind::Bishop => 'B',
            PieceKind::Knight => 'N',
            PieceKind::Rook => 'R',
            PieceKind::Pawn => 'P',
        }
    }

    pub fn from_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_uppercase() {
            'K' => Some(PieceKind::King),
            'Q' => Some(PieceKind::Queen),
            'B' => Some(PieceKind::Bishop),
            'N' => Some(PieceKind::Knight),
            'R' => Some(PieceKind::Rook),
            'P' => Some(PieceKind::Pawn),
            _ => None,
        }
    }

    #[inline]
    pub const fn is_slider(self) -> bool {
        matches!(self, PieceKind::Queen | PieceKind::Bishop | PieceKind::Rook)
    }
}

/// One board cell: `0` is empty, `1..=6` light pieces, `7..=12` dark pieces,
/// both ranges ordered as [`PieceKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct Piece(u8);

impl Piece {
    pub const EMPTY: Piece = Piece(0);

    #[inline]
    pub const fn new(color: Color, kind: PieceKind) -> Self {
        let base = kind.index() as u8 + 1;
        match color {
            Color::Light => Piece(base),
            Color::Dark => Piece(base + 6),
        }
    }

    #[inline]
    pub const fn from_code(code: u8) -> Option<Self> {
        if code <= 12 {
            Some(Piece(code))
        } else {
            None
        }
    }

    #[inline]
    pub const fn code(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Colour derived from the encoding range; `None` for an empty square.
    #[inline]
    pub const fn color(self) -> Option<Color> {
        match self.0 {
            0 => None,
            code if code > 6 => Some(Color::Dark),
            _ => Some(Color::Light),
        }
    }

    #[inline]
    pub const fn kind(self) -> Option<PieceKind> {
        if self.0 == 0 {
            None
        } else {
            PieceKind::from_index((self.0 - 1) % 6)
        }
    }

    #[inline]
    pub fn is_color(self, color: Color) -> bool {
        self.color() == Some(color)
    }

    #[inline]
    pub fn is(self, color: Color, kind: PieceKind) -> bool {
        self == Piece::new(color, kind)
    }

    #[inline]
    pub fn is_kind(self, kind: PieceKind) -> bool {
        self.kind() == Some(kind)
    }

    /// FEN letter: upper case for light, lower case for dark.
    pub fn to_fen_char(self) -> Option<char> {
        let kind = self.kind()?;
        let letter = kind.letter();
        match self.color()? {
            Color::Light => Some(letter),
            Color::Dark => Some(letter.to_ascii_lowercase()),
        }
    }

    pub fn from_fen_char(ch: char) -> Option<Self> {
        let color = if ch.is_ascii_uppercase() {
            Color::Light
        } else if ch.is_ascii_lowercase() {
            Color::Dark
        } else {
            return None;
        };
        PieceKind::from_letter(ch).map(|kind| Piece::new(color, kind))
    }
}
