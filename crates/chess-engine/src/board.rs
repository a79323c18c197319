//! Board state.
//!
//! [`BoardState`] stores one optional [`Piece`] per square in a flat array,
//! an index of where each king stands, the game-level move history and the
//! pieces captured so far. Cloning copies the array, which keeps the
//! clone-and-simulate legality check cheap.

use std::fmt;

use chess_core::{Color, GameProperties, Location, Move, MoveHistory, PieceKind, Placement};

use crate::Piece;

/// Back row, file a to file h.
const BACK_ROW: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// The full state of one board.
#[derive(Clone, PartialEq, Eq)]
pub struct BoardState {
    squares: [Option<Piece>; Location::COUNT],
    kings: [Option<Location>; 2],
    history: MoveHistory,
    captured: Vec<Piece>,
    properties: GameProperties,
}

impl BoardState {
    /// Creates an empty board.
    pub fn new(properties: GameProperties) -> Self {
        BoardState {
            squares: std::array::from_fn(|_| None),
            kings: [None; 2],
            history: MoveHistory::new(),
            captured: Vec::new(),
            properties,
        }
    }

    /// Creates a board with all 32 pieces on their starting squares.
    ///
    /// Each color's back row sits on its home rank with its pawns on the
    /// rank in front, as given by `properties`.
    pub fn standard(properties: GameProperties) -> Self {
        let mut board = Self::new(properties);
        for color in Color::ALL {
            let home = properties.home_rank(color) as i8;
            let pawns = properties.pawn_rank(color) as i8;
            for (file, kind) in BACK_ROW.into_iter().enumerate() {
                let file = file as i8;
                if let Some(loc) = Location::of(file, home) {
                    board.set_piece(Piece::new(color, kind), loc);
                }
                if let Some(loc) = Location::of(file, pawns) {
                    board.set_piece(Piece::pawn(color), loc);
                }
            }
        }
        board
    }

    /// Creates a board from a parsed placement. Every piece starts with an
    /// empty history.
    pub fn from_placement(placement: &Placement, properties: GameProperties) -> Self {
        let mut board = Self::new(properties);
        for (loc, color, kind) in placement.pieces() {
            board.set_piece(Piece::new(color, kind), loc);
        }
        board
    }

    /// Returns the placement of the pieces, without histories.
    pub fn to_placement(&self) -> Placement {
        let mut placement = Placement::empty();
        for (loc, piece) in self.occupied() {
            placement.set(loc, Some((piece.color(), piece.kind())));
        }
        placement
    }

    #[inline]
    pub fn properties(&self) -> &GameProperties {
        &self.properties
    }

    /// Returns true if no piece stands on `location`.
    #[inline]
    pub fn is_empty(&self, location: Location) -> bool {
        self.squares[location.index()].is_none()
    }

    /// Returns the piece on `location`.
    #[inline]
    pub fn piece(&self, location: Location) -> Option<&Piece> {
        self.squares[location.index()].as_ref()
    }

    #[inline]
    pub(crate) fn piece_mut(&mut self, location: Location) -> Option<&mut Piece> {
        self.squares[location.index()].as_mut()
    }

    /// Returns true if an opponent of `color` stands on `location`.
    #[inline]
    pub fn is_enemy(&self, location: Location, color: Color) -> bool {
        self.piece(location).is_some_and(|p| p.color() != color)
    }

    /// Places `piece` on `location` and returns whatever stood there.
    ///
    /// Placing a king records its square in the king index.
    pub fn set_piece(&mut self, piece: Piece, location: Location) -> Option<Piece> {
        if piece.kind() == PieceKind::King {
            self.kings[piece.color().index()] = Some(location);
        }
        self.squares[location.index()].replace(piece)
    }

    /// Removes and returns the piece on `location`.
    ///
    /// The king index is left alone: a king that is lifted is expected to be
    /// placed again straight away.
    pub fn remove_piece(&mut self, location: Location) -> Option<Piece> {
        self.squares[location.index()].take()
    }

    /// Returns where the king of `color` was last placed.
    #[inline]
    pub fn king_location(&self, color: Color) -> Option<Location> {
        self.kings[color.index()]
    }

    /// Returns the king of `color` and its square, if it is still on the
    /// board where the king index says it is.
    pub fn king(&self, color: Color) -> Option<(Location, &Piece)> {
        let loc = self.king_location(color)?;
        self.piece(loc)
            .filter(|p| p.is(color, PieceKind::King))
            .map(|p| (loc, p))
    }

    /// Returns every move committed on this board, oldest first.
    #[inline]
    pub fn history(&self) -> &MoveHistory {
        &self.history
    }

    /// Returns the most recently committed move.
    #[inline]
    pub fn last_move(&self) -> Option<Move> {
        self.history.last()
    }

    /// Returns the pieces captured so far, in capture order.
    #[inline]
    pub fn captured(&self) -> &[Piece] {
        &self.captured
    }

    pub(crate) fn record(&mut self, m: Move, captured: Option<Piece>) {
        self.history.push(m);
        self.captured.extend(captured);
    }

    /// Iterates over every occupied square.
    pub fn occupied(&self) -> impl Iterator<Item = (Location, &Piece)> + '_ {
        Location::all().filter_map(move |loc| self.piece(loc).map(|p| (loc, p)))
    }

    /// Iterates over the squares holding pieces of `color`.
    pub fn pieces(&self, color: Color) -> impl Iterator<Item = (Location, &Piece)> + '_ {
        self.occupied().filter(move |(_, p)| p.color() == color)
    }
}

impl fmt::Display for BoardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8i8).rev() {
            write!(f, "{} ", rank + 1)?;
            for file in 0..8i8 {
                let symbol = Location::of(file, rank)
                    .and_then(|loc| self.piece(loc))
                    .map_or('.', Piece::symbol);
                write!(f, " {}", symbol)?;
            }
            writeln!(f)?;
        }
        write!(f, "   a b c d e f g h")
    }
}

impl fmt::Debug for BoardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoardState")
            .field("placement", &self.to_placement().to_string())
            .field("history", &self.history)
            .field("captured", &self.captured.len())
            .finish()
    }
}
