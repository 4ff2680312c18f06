use thiserror::Error;

use curaios_common::EntityKind;

#[derive(Debug, Error)]
pub enum AuthorityError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Authority API error [{status}]: {message}")]
    Api { status: u16, message: String },
    #[error("Malformed authority response: {0}")]
    Malformed(String),
    #[error("No authority for entity kind '{0}'")]
    Unsupported(EntityKind),
}

impl AuthorityError {
    /// Network failures, 5xx, 429 and unreadable payloads may succeed on a
    /// later call; client errors and unsupported kinds will not.
    pub fn is_transient(&self) -> bool {
        match self {
            AuthorityError::Http(_) => true,
            AuthorityError::Api { status, .. } => *status >= 500 || *status == 429,
            AuthorityError::Malformed(_) => true,
            AuthorityError::Unsupported(_) => false,
        }
    }
}
