//! Error kinds returned by the dealer contract, the registry, and the
//! evaluation game. Every fallible operation in this crate returns
//! `Result<_, Error>` -- nothing is retried or swallowed internally.

/// the one error type the public API returns.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unknown dealer {0:?}, expected one of bitmap, fisher_yates, adaptive, perfect")]
    UnknownDealer(String),
    #[error("dealer exhausted: all cards already drawn")]
    Exhausted,
    #[error("episode already over")]
    EpisodeOver,
    #[error("inconsistent dealer state: {0}")]
    Inconsistent(String),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
