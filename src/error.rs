use std::io;
use thiserror::Error;

/// Errors surfaced while building a [`Logger`] or writing a line.
///
/// Misconfiguration is always caught by [`Builder::build`], before any
/// request is handled. The only error that can occur afterwards is
/// [`SinkWrite`], and on the worker path even that never reaches request
/// handlers (see the [`worker` module]).
///
/// [`Logger`]: crate::logger::Logger
/// [`Builder::build`]: crate::builder::Builder::build
/// [`SinkWrite`]: Error::SinkWrite
/// [`worker` module]: crate::worker
#[derive(Debug, Error)]
pub enum Error {
    /// An enabled field names no registered formatter.
    #[error("no formatter is registered under `{0}`")]
    UnknownFormatter(String),

    /// The enabled field list was empty.
    #[error("at least one field must be enabled")]
    NoFields,

    /// The configured datetime template is not valid strftime syntax.
    #[error("invalid datetime template `{0}`")]
    DatetimeFormat(String),

    /// The sink rejected the assembled line.
    #[error("failed writing to the log sink")]
    SinkWrite(#[from] io::Error),
}
