use thiserror::Error;

/// Failure reading the underlying event stream.
///
/// Raised by [`crate::events::EventSource`] implementations and passed
/// through the parser untouched.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("XML error: {0}")]
    Xml(String),
}

impl From<quick_xml::Error> for TransportError {
    fn from(err: quick_xml::Error) -> Self {
        TransportError::Xml(err.to_string())
    }
}

impl From<quick_xml::events::attributes::AttrError> for TransportError {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        TransportError::Xml(err.to_string())
    }
}

/// Why an index parse failed. Any of these means "index unavailable".
#[derive(Debug, Error)]
pub enum IndexesError {
    /// The server embedded an `<error>` element in its response.
    #[error("server error (code {code}): {message}")]
    Stream { code: u32, message: String },
    /// The response ended without the structure every response must have.
    #[error("malformed response: {0}")]
    Structural(String),
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl IndexesError {
    /// Server error code, if the server reported one.
    pub fn server_code(&self) -> Option<u32> {
        match self {
            IndexesError::Stream { code, .. } => Some(*code),
            _ => None,
        }
    }
}
