use std::io;

use thiserror::Error;

use crate::dom::Position;

/// Errors produced while parsing, converting, or writing JSON.
///
/// Width overruns are never errors: the layout engine falls back through its
/// rendering tiers instead. Everything surfaced here is either bad input,
/// an unconvertible value, or a failing output sink.
#[derive(Debug, Error)]
pub enum GridJsonError {
    /// The input text isn't valid JSON-with-comments, or uses a feature
    /// (comments, trailing commas) disallowed by the current options.
    #[error("{message} at {pos}")]
    Syntax { message: String, pos: Position },

    /// Like [`GridJsonError::Syntax`], but without a usable source location.
    #[error("{0}")]
    Malformed(String),

    /// The recursion limit was hit while converting a value into a document
    /// tree, which usually means a circular reference.
    #[error("depth limit exceeded while converting value")]
    DepthLimit,

    /// The output sink rejected a write. Propagated immediately; nothing is
    /// retried and the output may be truncated mid-document.
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl GridJsonError {
    pub(crate) fn syntax(message: impl Into<String>, pos: Position) -> Self {
        GridJsonError::Syntax { message: message.into(), pos }
    }
}
