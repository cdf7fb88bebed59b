use std::io;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong between a `Wordpress` call and its typed result.
#[derive(Debug, Error)]
pub enum Error {
    /// The endpoint URL given at construction could not be parsed.
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(#[from] url::ParseError),

    /// The server answered with an XML-RPC `<fault>`.
    #[error("remote fault {code}: {message}")]
    RemoteFault { code: i32, message: String },

    /// A wire value does not have the shape the entity field expects.
    #[error("type mismatch for '{field}': expected {expected}, found {found}")]
    TypeMismatch {
        field: String,
        expected: &'static str,
        found: &'static str,
    },

    /// A response did not match the shape an operation needs.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// The operation's wire contract was never confirmed, so it is refused locally.
    #[error("operation not implemented: {0}")]
    NotImplemented(&'static str),

    #[error("http transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("http status {status}")]
    Http { status: u16 },

    #[error("xml error: {0}")]
    Xml(#[from] xml::reader::Error),

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl Error {
    pub(crate) fn mismatch(field: &str, expected: &'static str, found: &'static str) -> Error {
        Error::TypeMismatch {
            field: field.to_string(),
            expected,
            found,
        }
    }

    pub(crate) fn malformed<S: Into<String>>(msg: S) -> Error {
        Error::MalformedResponse(msg.into())
    }

    /// `true` when the server itself rejected the call.
    pub fn is_remote_fault(&self) -> bool {
        matches!(self, Error::RemoteFault { .. })
    }
}
