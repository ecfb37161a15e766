//! Reads chess games written in Portable Game Notation into a tree of
//! half-moves, annotations and nested variations.
//!
//! Moves are checked for well-formed algebraic notation only. No board is
//! tracked, so legality against a position is left to the caller.

pub mod game;
pub mod reader;

pub use game::{
    Castling, CheckKind, Game, GameResult, HalfMove, Origin, PieceType, PromotionPieces, Square,
    Variation,
};
pub use reader::{parse, parse_with, PgnError, ReaderConfig};
