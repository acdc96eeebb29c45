use std::{io, time::Duration};

use crate::resp::parser::RESPParserError;

pub type Result<T> = std::result::Result<T, Error>;

/**
 * Categorised failures of a single command round trip.
 *
 * `Protocol`, `Timeout`, `Io` and `ConnectionClosed` leave the channel in an
 * unknown framing state and the client refuses further calls on it.
 * `Remote`, `Argument` and `DecodeShape` leave the channel usable.
 */
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Malformed frame, unexpected tag or length mismatch on the wire.
    #[error("protocol error: {0}")]
    Protocol(String),

    /// The store answered with an error reply.
    #[error("remote error: {0}")]
    Remote(String),

    /// Parameters rejected before anything was written.
    #[error("invalid argument for {command}: {reason}")]
    Argument {
        command: &'static str,
        reason: String,
    },

    /// A well-formed reply that doesn't fit the shape expected for the command.
    #[error("unexpected reply: expected {expected}, got {actual}")]
    DecodeShape {
        expected: &'static str,
        actual: String,
    },

    #[error("no reply within {0:?}")]
    Timeout(Duration),

    #[error("io error: {0}")]
    Io(#[from] io::Error),

    #[error("connection closed")]
    ConnectionClosed,

    /// A previous call left the channel mid-reply; it has to be discarded.
    #[error("channel is no longer usable, reconnect")]
    ChannelBroken,
}

impl Error {
    pub(crate) fn argument(command: &'static str, reason: impl Into<String>) -> Self {
        Error::Argument { command, reason: reason.into() }
    }

    pub(crate) fn shape(expected: &'static str, actual: impl Into<String>) -> Self {
        Error::DecodeShape { expected, actual: actual.into() }
    }

    /**
     * Whether the channel that produced this error has to be dropped
     */
    pub fn is_channel_fatal(&self) -> bool {
        matches!(
            self,
            Error::Protocol(_)
                | Error::Timeout(_)
                | Error::Io(_)
                | Error::ConnectionClosed
                | Error::ChannelBroken
        )
    }
}

impl From<RESPParserError> for Error {
    fn from(err: RESPParserError) -> Error {
        match err {
            RESPParserError::BadRead(err) => Error::Io(err),
            RESPParserError::EndOfStream => Error::ConnectionClosed,
            other => Error::Protocol(other.to_string()),
        }
    }
}
