//! Bridge to an external move searcher speaking UCI

use crate::config::EngineConfig;
use crate::notation::{CoordMove, CoordMoveParseError};
use crate::types::{PromotePiece, Square};

use std::io::{self, BufRead, BufReader, Write};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

use log::{debug, info, warn};
use thiserror::Error;

/// Error talking to the engine
#[derive(Debug, Error)]
pub enum EngineError {
    /// I/O error on the engine pipes
    #[error("engine i/o error: {0}")]
    Io(#[from] io::Error),
    /// Engine closed its output
    #[error("engine closed its output")]
    Eof,
    /// `bestmove` line without a move
    #[error("malformed bestmove line {0:?}")]
    BadBestMove(String),
    /// Move returned by the engine cannot be parsed
    #[error("cannot parse engine move: {0}")]
    BadMove(#[from] CoordMoveParseError),
    /// Promotion reported before any move
    #[error("no move to attach the promotion to")]
    NoMoves,
    /// Engine was already shut down
    #[error("engine is shut down")]
    Closed,
}

/// Something which can search for moves
///
/// The searcher is told about every move made in the game, including its own ones, and is
/// asked for a move when it is its turn. Moves are always exchanged in coordinate notation from
/// the standard initial position.
pub trait MoveSearcher {
    /// Blocks until the searcher picks a move in the current position
    fn request_best_move(&mut self) -> Result<CoordMove, EngineError>;

    /// Reports the move from `src` to `dst`
    fn notify_move(&mut self, src: Square, dst: Square) -> Result<(), EngineError>;

    /// Reports that the last move promoted a pawn to `piece`
    fn notify_promotion(&mut self, piece: PromotePiece) -> Result<(), EngineError>;

    fn shutdown(&mut self) -> Result<(), EngineError>;
}

/// UCI engine running as a child process
///
/// Type parameters are the pipes to and from the engine, so the driver can also talk to
/// anything else which speaks UCI.
pub struct UciEngine<W: Write = ChildStdin, R: BufRead = BufReader<ChildStdout>> {
    child: Option<Child>,
    input: W,
    output: R,
    moves: Vec<CoordMove>,
    go_command: String,
    closed: bool,
}

impl UciEngine {
    /// Launches the engine and performs the handshake
    pub fn spawn(config: &EngineConfig) -> Result<UciEngine, EngineError> {
        info!("starting engine {}", config.path.display());
        let mut child = Command::new(&config.path)
            .args(&config.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .spawn()?;
        let input = child.stdin.take().ok_or(EngineError::Closed)?;
        let output = child.stdout.take().ok_or(EngineError::Closed)?;
        let mut engine = UciEngine::from_pipes(input, BufReader::new(output), &config.go_command);
        engine.child = Some(child);
        engine.handshake()?;
        Ok(engine)
    }
}

impl<W: Write, R: BufRead> UciEngine<W, R> {
    /// Wraps already connected pipes, without performing the handshake
    pub fn from_pipes(input: W, output: R, go_command: &str) -> UciEngine<W, R> {
        UciEngine {
            child: None,
            input,
            output,
            moves: Vec::new(),
            go_command: go_command.to_string(),
            closed: false,
        }
    }

    /// Moves reported so far
    pub fn moves(&self) -> &[CoordMove] {
        &self.moves
    }

    /// Pipe to the engine
    pub fn input(&self) -> &W {
        &self.input
    }

    fn send(&mut self, line: &str) -> Result<(), EngineError> {
        if self.closed {
            return Err(EngineError::Closed);
        }
        debug!("engine <- {}", line);
        writeln!(self.input, "{}", line)?;
        self.input.flush()?;
        Ok(())
    }

    fn recv(&mut self) -> Result<String, EngineError> {
        let mut line = String::new();
        if self.output.read_line(&mut line)? == 0 {
            return Err(EngineError::Eof);
        }
        let line = line.trim_end().to_string();
        debug!("engine -> {}", line);
        Ok(line)
    }

    fn wait_for(&mut self, token: &str) -> Result<(), EngineError> {
        loop {
            let line = self.recv()?;
            if line.split_ascii_whitespace().next() == Some(token) {
                return Ok(());
            }
        }
    }

    /// Performs the UCI handshake and starts a new game
    pub fn handshake(&mut self) -> Result<(), EngineError> {
        self.send("uci")?;
        self.wait_for("uciok")?;
        self.send("isready")?;
        self.wait_for("readyok")?;
        self.send("ucinewgame")?;
        Ok(())
    }

    fn send_position(&mut self) -> Result<(), EngineError> {
        let mut cmd = String::from("position startpos");
        if !self.moves.is_empty() {
            cmd.push_str(" moves");
            for mv in &self.moves {
                cmd.push(' ');
                cmd.push_str(&mv.to_string());
            }
        }
        self.send(&cmd)
    }
}

impl<W: Write, R: BufRead> MoveSearcher for UciEngine<W, R> {
    fn request_best_move(&mut self) -> Result<CoordMove, EngineError> {
        let go = self.go_command.clone();
        self.send(&go)?;
        loop {
            let line = self.recv()?;
            let mut tokens = line.split_ascii_whitespace();
            match tokens.next() {
                Some("bestmove") => {
                    let mv = tokens
                        .next()
                        .ok_or_else(|| EngineError::BadBestMove(line.clone()))?;
                    if mv == "(none)" || mv == "0000" {
                        return Err(EngineError::BadBestMove(line.clone()));
                    }
                    return Ok(mv.parse()?);
                }
                Some("info") => {}
                _ => warn!("skipping unexpected engine line {:?}", line),
            }
        }
    }

    fn notify_move(&mut self, src: Square, dst: Square) -> Result<(), EngineError> {
        self.moves.push(CoordMove::new(src, dst));
        self.send_position()
    }

    fn notify_promotion(&mut self, piece: PromotePiece) -> Result<(), EngineError> {
        let last = self.moves.last_mut().ok_or(EngineError::NoMoves)?;
        *last = last.with_promote(piece);
        self.send_position()
    }

    fn shutdown(&mut self) -> Result<(), EngineError> {
        if self.closed {
            return Ok(());
        }
        self.send("quit")?;
        self.closed = true;
        if let Some(mut child) = self.child.take() {
            let status = child.wait()?;
            info!("engine exited with {}", status);
        }
        Ok(())
    }
}

impl<W: Write, R: BufRead> Drop for UciEngine<W, R> {
    fn drop(&mut self) {
        if let Err(e) = self.shutdown() {
            warn!("cannot shut down engine: {}", e);
        }
    }
}
