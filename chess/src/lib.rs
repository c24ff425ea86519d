//! Chess rules engine with board variants
//!
//! The crate keeps track of a chess game: it generates legal moves for each piece, detects check,
//! checkmate and stalemate, handles castling, en passant and promotion, and can hand the moves
//! over to an external UCI engine.
//!
//! Three variants are supported: the standard game, Horde (where White has only pawns and loses
//! when all of them are captured) and Chess960 with unconstrained shuffling of the back ranks.
//!
//! # Example
//!
//! ```
//! use varchess::{Board, GameResult, Orientation, Variant};
//!
//! let mut b = Board::new(Variant::Standard, Orientation::WhiteBottom);
//! for mv in ["f2f3", "e7e5", "g2g4", "d8h4"] {
//!     b.push_coord_move(mv.parse().unwrap()).unwrap();
//! }
//! assert!(b.is_check());
//! assert_eq!(b.result(), GameResult::BlackWins);
//! ```

pub mod board;
pub mod config;
pub mod engine;
pub mod game;
pub mod notation;
pub mod piece;
pub mod rules;
pub mod variant;

pub use varchess_base::{cellset, geometry, types};

pub use board::{Board, MoveDelta, MoveRecord, PromotionRequest};
pub use cellset::CellSet;
pub use config::{Controller, EngineConfig, GameConfig, Players};
pub use engine::{MoveSearcher, UciEngine};
pub use game::Game;
pub use notation::CoordMove;
pub use piece::{Destination, Destinations, Piece};
pub use rules::MoveRule;
pub use types::{Cell, Color, Coord, GameResult, Orientation, PieceKind, PromotePiece, Square};
pub use variant::{Layout, Variant};
