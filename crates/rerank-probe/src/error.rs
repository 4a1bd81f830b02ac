use std::fmt;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RerankError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("rerank service returned status {status}: {body}")]
    Api { status: u16, body: String },

    #[error("response decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("rerank service returned invalid response: {0}")]
    InvalidResponse(String),
}

/// Coarse failure class used when reporting a probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Config,
    Transport,
    Protocol,
    Decode,
}

impl RerankError {
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Config(_) => ErrorKind::Config,
            Self::Transport(_) => ErrorKind::Transport,
            Self::Api { .. } => ErrorKind::Protocol,
            Self::Decode(_) | Self::InvalidResponse(_) => ErrorKind::Decode,
        }
    }

    /// Display text followed by every nested source, joined with `": "`.
    ///
    /// `reqwest` keeps the interesting part (connection refused, timed out)
    /// in the source chain rather than in its own message.
    pub fn chain(&self) -> String {
        error_chain(self)
    }
}

/// A source whose text already ends the accumulated line is skipped, so
/// wrappers that repeat their source (`#[error("...: {0}")]`) print it once.
pub fn error_chain(err: &dyn std::error::Error) -> String {
    let mut text = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let part = cause.to_string();
        if !text.ends_with(&part) {
            text.push_str(": ");
            text.push_str(&part);
        }
        source = cause.source();
    }
    text
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Config => "config",
            Self::Transport => "transport",
            Self::Protocol => "protocol",
            Self::Decode => "decode",
        };
        f.write_str(name)
    }
}
