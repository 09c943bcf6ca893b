use thiserror::Error;

pub type Result<T, E = Error> = core::result::Result<T, E>;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// The engine only positions boxes incrementally; random-access jumps are never available.
    #[error("{operation} is not supported: the engine only scrolls incrementally")]
    Unsupported { operation: &'static str },
}
