//! Error taxonomy shared across the site

use thiserror::Error;

/// Everything that can go wrong while serving a page or forwarding a form
#[derive(Debug, Error)]
pub enum Error {
    /// Unknown post slug, or a slug rejected by the traversal guard
    #[error("not found: {0}")]
    NotFound(String),

    /// Malformed metadata block, field set, date, or body
    #[error("parse error: {0}")]
    Parse(String),

    /// An outbound call to the email provider failed
    #[error("provider error: {0}")]
    Provider(String),

    /// Form input rejected before any provider call was made
    #[error("invalid submission: {0}")]
    Validation(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Template(#[from] tera::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
