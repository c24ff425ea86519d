//! Moves in coordinate notation
//!
//! This is the notation used by UCI engines: source square, destination square and an optional
//! promotion letter, e.g. `e2e4` or `e7e8q`. Squares are always written from White's perspective,
//! regardless of how the board is oriented.

use crate::types::{PromotePiece, Square, SquareParseError};

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Error parsing [`CoordMove`]
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum CoordMoveParseError {
    /// Bad string length
    #[error("bad string length")]
    BadLength,
    /// Bad source square
    #[error("bad source: {0}")]
    BadSrc(SquareParseError),
    /// Bad destination square
    #[error("bad destination: {0}")]
    BadDst(SquareParseError),
    /// Bad promote character
    #[error("bad promote char {0:?}")]
    BadPromote(char),
}

/// Move in coordinate notation
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct CoordMove {
    /// Source square
    pub src: Square,
    /// Destination square
    pub dst: Square,
    /// Piece to promote, if any
    pub promote: Option<PromotePiece>,
}

impl CoordMove {
    pub const fn new(src: Square, dst: Square) -> CoordMove {
        CoordMove {
            src,
            dst,
            promote: None,
        }
    }

    pub const fn with_promote(self, p: PromotePiece) -> CoordMove {
        CoordMove {
            promote: Some(p),
            ..self
        }
    }
}

impl fmt::Display for CoordMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}{}", self.src, self.dst)?;
        if let Some(p) = self.promote {
            write!(f, "{}", p.as_char())?;
        }
        Ok(())
    }
}

impl FromStr for CoordMove {
    type Err = CoordMoveParseError;

    fn from_str(s: &str) -> Result<CoordMove, Self::Err> {
        if !s.is_ascii() || !matches!(s.len(), 4 | 5) {
            return Err(CoordMoveParseError::BadLength);
        }
        let src = Square::from_str(&s[0..2]).map_err(CoordMoveParseError::BadSrc)?;
        let dst = Square::from_str(&s[2..4]).map_err(CoordMoveParseError::BadDst)?;
        let promote = if s.len() == 5 {
            let c = s.as_bytes()[4] as char;
            Some(PromotePiece::from_char(c).ok_or(CoordMoveParseError::BadPromote(c))?)
        } else {
            None
        };
        Ok(CoordMove { src, dst, promote })
    }
}
