use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The board/obstacle configuration can't produce a playable episode.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("not a turn decision: {0}")]
    InvalidTurn(String),
    #[error("episode has terminated; reset before stepping again")]
    Terminated,
    #[error("no free cell left on a {width}x{height} board to place food")]
    NoFreeCell { width: i32, height: i32 },
}
