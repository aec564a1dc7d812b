//! Background AI worker
//!
//! Runs a [`GameSession`] on its own thread so the host can keep a wall-clock
//! limit on every request. A timed-out request is not interrupted; its reply
//! is discarded when it eventually arrives.

use std::sync::mpsc::{channel, Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use log::{debug, warn};
use thiserror::Error;

use crate::board::Stone;
use crate::config::Config;
use crate::error::GameError;
use crate::session::{GameSession, Outcome};

/// Host request to the worker thread
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Request {
    /// Start a new game; Black moves first and is the engine when `ai_first`
    Start { size: usize, ai_first: bool, depth: usize },
    /// Human move followed by the engine's reply
    Move { row: usize, col: usize, depth: usize },
    /// Take back the engine's reply and the human move before it
    Undo,
    /// Finish the game and drop the session
    End,
}

#[derive(Debug, Error)]
pub enum WorkerError {
    #[error("no response within {0:?}")]
    Timeout(Duration),

    #[error("worker thread is gone")]
    Disconnected,

    #[error("no game in progress")]
    NoGame,

    #[error(transparent)]
    Game(#[from] GameError),
}

struct Envelope {
    id: u64,
    request: Request,
}

type Reply = (u64, Result<Outcome, WorkerError>);

/// Handle to the worker thread
pub struct AiWorker {
    sender: Sender<Envelope>,
    receiver: Receiver<Reply>,
    next_id: u64,
    handle: JoinHandle<()>,
}

impl AiWorker {
    /// Spawn the worker thread. Games it starts use `config`.
    pub fn spawn(config: Config) -> Self {
        let (sender, requests) = channel::<Envelope>();
        let (replies, receiver) = channel::<Reply>();

        let handle = thread::spawn(move || {
            let mut session: Option<GameSession> = None;
            for Envelope { id, request } in requests {
                let reply = handle_request(&mut session, &config, request);
                if replies.send((id, reply)).is_err() {
                    break;
                }
            }
            debug!("worker thread exiting");
        });

        Self {
            sender,
            receiver,
            next_id: 0,
            handle,
        }
    }

    /// Send a request and wait up to `timeout` for its reply.
    pub fn request(&mut self, request: Request, timeout: Duration) -> Result<Outcome, WorkerError> {
        let id = self.next_id;
        self.next_id += 1;
        self.sender
            .send(Envelope { id, request })
            .map_err(|_| WorkerError::Disconnected)?;

        let deadline = Instant::now() + timeout;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.receiver.recv_timeout(remaining) {
                Ok((reply_id, reply)) if reply_id == id => return reply,
                Ok((stale, _)) => debug!("dropping late reply to request {stale}"),
                Err(RecvTimeoutError::Timeout) => {
                    warn!("{request:?} timed out after {timeout:?}");
                    return Err(WorkerError::Timeout(timeout));
                }
                Err(RecvTimeoutError::Disconnected) => return Err(WorkerError::Disconnected),
            }
        }
    }

    /// Close the request channel and wait for the thread to finish its
    /// current request.
    pub fn shutdown(self) {
        let Self { sender, handle, .. } = self;
        drop(sender);
        if handle.join().is_err() {
            warn!("worker thread panicked");
        }
    }
}

fn handle_request(
    session: &mut Option<GameSession>,
    config: &Config,
    request: Request,
) -> Result<Outcome, WorkerError> {
    match request {
        Request::Start { size, ai_first, depth } => {
            let mut game = GameSession::new_game(size, Stone::Black, config)?;
            let outcome = if ai_first {
                game.request_ai_move(depth)?
            } else {
                game.outcome()
            };
            *session = Some(game);
            Ok(outcome)
        }
        Request::Move { row, col, depth } => {
            let game = session.as_mut().ok_or(WorkerError::NoGame)?;
            Ok(game.play(row, col, depth)?)
        }
        Request::Undo => {
            let game = session.as_mut().ok_or(WorkerError::NoGame)?;
            Ok(game.undo_last_two_plies()?)
        }
        Request::End => {
            let game = session.take().ok_or(WorkerError::NoGame)?;
            Ok(game.end_game())
        }
    }
}
