//! Game controller
//!
//! [`Game`] binds a [`Board`] to the players configured in [`GameConfig`]. Human moves come
//! through [`Game::select()`] and [`Game::play()`], engine moves through
//! [`Game::play_engine_move()`]. Every completed move is reported to the searcher, so it always
//! knows the full game.

use crate::board::{Board, MoveDelta, PromoteError, PushError};
use crate::config::{ConfigError, Controller, GameConfig};
use crate::engine::{EngineError, MoveSearcher, UciEngine};
use crate::notation::{CoordMove, CoordMoveParseError};
use crate::piece::Destinations;
use crate::types::{Coord, GameResult, PromotePiece};

use std::fmt;

use log::debug;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("bad configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("engine failure: {0}")]
    Engine(#[from] EngineError),
    #[error("move rejected: {0}")]
    Push(#[from] PushError),
    #[error("promotion rejected: {0}")]
    Promote(#[from] PromoteError),
    #[error("cannot parse move #{}: {}", .pos + 1, .source)]
    Parse {
        pos: usize,
        source: CoordMoveParseError,
    },
    #[error("it is not the engine's turn")]
    NotEngineTurn,
}

pub struct Game<S: MoveSearcher = UciEngine> {
    board: Board,
    config: GameConfig,
    searcher: Option<S>,
    moves: Vec<CoordMove>,
}

impl Game<UciEngine> {
    /// Starts a game, launching the engine if some side is played by it
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        config.validate()?;
        let searcher = match (&config.engine, config.players.engine_side()) {
            (Some(engine), Some(_)) => Some(UciEngine::spawn(engine)?),
            _ => None,
        };
        Self::with_searcher(config, searcher)
    }
}

impl<S: MoveSearcher> Game<S> {
    /// Starts a game with an already running searcher
    ///
    /// `config.engine` is ignored, only the presence of `searcher` matters.
    pub fn with_searcher(config: GameConfig, searcher: Option<S>) -> Result<Self, GameError> {
        config.validate_players(searcher.is_some())?;
        let board = match config.seed {
            Some(seed) => Board::with_rng(
                config.variant,
                config.orientation,
                &mut Xoshiro256PlusPlus::seed_from_u64(seed),
            ),
            None => Board::new(config.variant, config.orientation),
        };
        Ok(Game {
            board,
            config,
            searcher,
            moves: Vec::new(),
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn searcher(&self) -> Option<&S> {
        self.searcher.as_ref()
    }

    pub fn result(&self) -> GameResult {
        self.board.result()
    }

    /// Moves played so far, with promotions
    pub fn moves(&self) -> &[CoordMove] {
        &self.moves
    }

    /// Controller of the side to move
    pub fn controller(&self) -> Controller {
        self.config.players.get(self.board.turn())
    }

    pub fn is_engine_turn(&self) -> bool {
        !self.board.result().is_finished()
            && self.board.pending_promotion().is_none()
            && self.controller() == Controller::Engine
    }

    /// Selects a cell on behalf of the human to move
    ///
    /// Returns an empty set if the side to move is not played by a human.
    pub fn select(&mut self, c: Coord) -> Destinations {
        if self.controller() != Controller::Human {
            return Destinations::new();
        }
        self.board.select(c)
    }

    /// Moves the selected piece on behalf of the human to move
    ///
    /// Returns `Ok(None)` if the move was not made. If the returned delta carries a promotion
    /// request, [`Game::promote()`] must be called before the game continues.
    pub fn play(&mut self, to: Coord) -> Result<Option<MoveDelta>, GameError> {
        if self.controller() != Controller::Human {
            return Ok(None);
        }
        let delta = match self.board.execute_move(to) {
            Some(delta) => delta,
            None => return Ok(None),
        };
        self.record(&delta)?;
        Ok(Some(delta))
    }

    /// Resolves the pending promotion
    pub fn promote(&mut self, piece: PromotePiece) -> Result<(), GameError> {
        let req = self
            .board
            .pending_promotion()
            .ok_or(PromoteError::NotPending)?;
        self.board.try_promote(req.coord, piece.into())?;
        self.record_promotion(piece)
    }

    /// Applies a move in coordinate notation regardless of who controls the side to move
    pub fn push_coord_move(&mut self, mv: CoordMove) -> Result<MoveDelta, GameError> {
        let delta = self.board.push_coord_move(mv)?;
        self.record(&delta)?;
        if let Some(piece) = mv.promote {
            self.record_promotion(piece)?;
        }
        Ok(delta)
    }

    /// Applies space-separated moves in coordinate notation
    pub fn push_uci_list(&mut self, list: &str) -> Result<(), GameError> {
        for (pos, token) in list.split_ascii_whitespace().enumerate() {
            let mv = token
                .parse()
                .map_err(|source| GameError::Parse { pos, source })?;
            self.push_coord_move(mv)?;
        }
        Ok(())
    }

    /// Asks the engine for a move and plays it
    ///
    /// Blocks until the engine answers. A malformed or illegal reply is an error, and the game
    /// should not be continued after it.
    pub fn play_engine_move(&mut self) -> Result<MoveDelta, GameError> {
        if !self.is_engine_turn() {
            return Err(GameError::NotEngineTurn);
        }
        let searcher = self.searcher.as_mut().ok_or(GameError::NotEngineTurn)?;
        let mv = searcher.request_best_move()?;
        debug!("engine plays {}", mv);
        self.push_coord_move(mv)
    }

    pub fn uci_list(&self) -> UciList<'_> {
        UciList(&self.moves)
    }

    pub fn shutdown(&mut self) -> Result<(), GameError> {
        if let Some(searcher) = self.searcher.as_mut() {
            searcher.shutdown()?;
        }
        Ok(())
    }

    fn record(&mut self, delta: &MoveDelta) -> Result<(), GameError> {
        let mv = self.board.coord_move(&delta.record);
        self.moves.push(mv);
        if let Some(searcher) = self.searcher.as_mut() {
            searcher.notify_move(mv.src, mv.dst)?;
        }
        Ok(())
    }

    fn record_promotion(&mut self, piece: PromotePiece) -> Result<(), GameError> {
        if let Some(last) = self.moves.last_mut() {
            *last = last.with_promote(piece);
        }
        if let Some(searcher) = self.searcher.as_mut() {
            searcher.notify_promotion(piece)?;
        }
        Ok(())
    }
}

pub struct UciList<'a>(&'a [CoordMove]);

impl<'a> fmt::Display for UciList<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        for (i, m) in self.0.iter().enumerate() {
            if i != 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", m)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{EngineConfig, Players};
    use crate::types::{Cell, Color, Orientation, PieceKind, Square};
    use crate::variant::Variant;
    use std::collections::VecDeque;

    #[derive(Default)]
    struct Scripted {
        replies: VecDeque<&'static str>,
        seen: Vec<CoordMove>,
        shut: bool,
    }

    impl Scripted {
        fn new(replies: &[&'static str]) -> Scripted {
            Scripted {
                replies: replies.iter().copied().collect(),
                ..Scripted::default()
            }
        }
    }

    impl MoveSearcher for Scripted {
        fn request_best_move(&mut self) -> Result<CoordMove, EngineError> {
            let reply = self.replies.pop_front().ok_or(EngineError::Eof)?;
            Ok(reply.parse()?)
        }

        fn notify_move(&mut self, src: Square, dst: Square) -> Result<(), EngineError> {
            self.seen.push(CoordMove::new(src, dst));
            Ok(())
        }

        fn notify_promotion(&mut self, piece: PromotePiece) -> Result<(), EngineError> {
            let last = self.seen.last_mut().ok_or(EngineError::NoMoves)?;
            *last = last.with_promote(piece);
            Ok(())
        }

        fn shutdown(&mut self) -> Result<(), EngineError> {
            self.shut = true;
            Ok(())
        }
    }

    fn engine_game(orientation: Orientation, replies: &[&'static str]) -> Game<Scripted> {
        let config = GameConfig {
            orientation,
            players: Players::against_engine(Color::White),
            ..GameConfig::new(Variant::Standard)
        };
        Game::with_searcher(config, Some(Scripted::new(replies))).unwrap()
    }

    fn human<S: MoveSearcher>(g: &mut Game<S>, from: &str, to: &str) -> Option<MoveDelta> {
        let from = g.board().cell_of(from.parse().unwrap()).unwrap();
        let to = g.board().cell_of(to.parse().unwrap()).unwrap();
        g.select(from);
        g.play(to).unwrap()
    }

    fn seen(g: &Game<Scripted>) -> String {
        UciList(&g.searcher().unwrap().seen).to_string()
    }

    #[test]
    fn test_humans() {
        let mut g: Game<Scripted> =
            Game::with_searcher(GameConfig::new(Variant::Standard), None).unwrap();
        assert!(!g.is_engine_turn());
        assert!(human(&mut g, "e2", "e4").is_some());
        assert!(human(&mut g, "e7", "e5").is_some());
        assert!(human(&mut g, "e4", "e5").is_none());
        assert_eq!(g.uci_list().to_string(), "e2e4 e7e5");
        assert_eq!(g.board().ply(), 3);
        assert!(matches!(g.play_engine_move(), Err(GameError::NotEngineTurn)));
        g.shutdown().unwrap();
    }

    #[test]
    fn test_engine_turns() {
        for orientation in [Orientation::WhiteBottom, Orientation::BlackBottom] {
            let mut g = engine_game(orientation, &["e7e5"]);
            human(&mut g, "e2", "e4").unwrap();
            assert!(g.is_engine_turn());
            // the human can't move for the engine
            let e7 = g.board().cell_of("e7".parse().unwrap()).unwrap();
            assert!(g.select(e7).is_empty());

            let d = g.play_engine_move().unwrap();
            assert_eq!(d.record.rule, crate::rules::MoveRule::PawnDoubleForward);
            assert!(!g.is_engine_turn());
            assert_eq!(g.uci_list().to_string(), "e2e4 e7e5");
            assert_eq!(seen(&g), "e2e4 e7e5");
        }
    }

    #[test]
    fn test_promotions() {
        let mut g = engine_game(
            Orientation::WhiteBottom,
            &["h7h5", "h5h4", "h4h3", "h3g2", "g2h1q"],
        );
        for (from, to) in [("a2", "a4"), ("a4", "a5"), ("a5", "a6"), ("a6", "b7")] {
            human(&mut g, from, to).unwrap();
            g.play_engine_move().unwrap();
        }

        let d = human(&mut g, "b7", "a8").unwrap();
        let req = d.promotion.unwrap();
        assert!(!g.is_engine_turn());
        assert!(matches!(g.play_engine_move(), Err(GameError::NotEngineTurn)));
        g.promote(PromotePiece::Queen).unwrap();
        assert_eq!(
            g.board().get(req.coord),
            Cell::from_parts(Color::White, PieceKind::Queen)
        );
        assert!(matches!(
            g.promote(PromotePiece::Queen),
            Err(GameError::Promote(PromoteError::NotPending))
        ));

        assert!(g.is_engine_turn());
        let d = g.play_engine_move().unwrap();
        assert_eq!(d.promotion.map(|r| r.color), Some(Color::Black));
        assert_eq!(g.board().pending_promotion(), None);
        let h1 = g.board().cell_of(Square::new(7, 0)).unwrap();
        assert_eq!(g.board().get(h1), Cell::from_parts(Color::Black, PieceKind::Queen));

        let expected = "a2a4 h7h5 a4a5 h5h4 a5a6 h4h3 a6b7 h3g2 b7a8q g2h1q";
        assert_eq!(g.uci_list().to_string(), expected);
        assert_eq!(seen(&g), expected);
    }

    #[test]
    fn test_bad_engine() {
        let mut g = engine_game(Orientation::WhiteBottom, &["e2e4", "e7e9", "e7e5"]);
        human(&mut g, "d2", "d4").unwrap();
        assert!(matches!(
            g.play_engine_move(),
            Err(GameError::Push(PushError::Illegal(_)))
        ));
        assert!(matches!(
            g.play_engine_move(),
            Err(GameError::Engine(EngineError::BadMove(_)))
        ));
        assert!(g.play_engine_move().is_ok());
        assert!(matches!(
            g.play_engine_move(),
            Err(GameError::NotEngineTurn)
        ));
    }

    #[test]
    fn test_config() {
        let config = GameConfig {
            players: Players::against_engine(Color::Black),
            ..GameConfig::new(Variant::Standard)
        };
        assert!(matches!(
            Game::<Scripted>::with_searcher(config.clone(), None),
            Err(GameError::Config(ConfigError::MissingEngine(Color::White)))
        ));
        assert!(matches!(
            Game::new(config),
            Err(GameError::Config(ConfigError::MissingEngine(Color::White)))
        ));

        let config = GameConfig {
            players: Players::against_engine(Color::Black),
            engine: Some(EngineConfig::new("stockfish")),
            ..GameConfig::new(Variant::Chess960)
        };
        assert!(matches!(
            Game::new(config),
            Err(GameError::Config(ConfigError::UnsupportedVariant(Variant::Chess960)))
        ));
    }

    #[test]
    fn test_engine_opens() {
        let config = GameConfig {
            players: Players::against_engine(Color::Black),
            ..GameConfig::new(Variant::Standard)
        };
        let mut g = Game::with_searcher(config, Some(Scripted::new(&["g1f3"]))).unwrap();
        assert!(g.is_engine_turn());
        g.play_engine_move().unwrap();
        assert!(human(&mut g, "g8", "f6").is_some());
        assert_eq!(seen(&g), "g1f3 g8f6");
        g.shutdown().unwrap();
        assert!(g.searcher().unwrap().shut);
    }

    #[test]
    fn test_uci_list() {
        let mut g: Game<Scripted> =
            Game::with_searcher(GameConfig::new(Variant::Standard), None).unwrap();
        g.push_uci_list("f2f3 e7e5 g2g4 d8h4").unwrap();
        assert_eq!(g.result(), GameResult::BlackWins);
        assert_eq!(g.uci_list().to_string(), "f2f3 e7e5 g2g4 d8h4");

        let mut g: Game<Scripted> =
            Game::with_searcher(GameConfig::new(Variant::Standard), None).unwrap();
        assert!(matches!(
            g.push_uci_list("e2e4 e7e5 g1"),
            Err(GameError::Parse { pos: 2, .. })
        ));
        assert_eq!(g.moves().len(), 2);
    }

    #[test]
    fn test_seeded() {
        let config = GameConfig {
            seed: Some(960),
            ..GameConfig::new(Variant::Chess960)
        };
        let a: Game<Scripted> = Game::with_searcher(config.clone(), None).unwrap();
        let b: Game<Scripted> = Game::with_searcher(config, None).unwrap();
        assert_eq!(a.board().layout(), b.board().layout());
    }
}
