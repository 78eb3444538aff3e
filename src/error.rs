use thiserror::Error;

use crate::extractors::Field;
use crate::markup::MarkupError;

/// Errors that can occur while fetching a recipe page
#[derive(Error, Debug)]
pub enum FetchError {
    /// The identifier could not be resolved to a recipe page URL
    #[error("Invalid recipe identifier: {0}")]
    InvalidIdentifier(String),

    /// Transport level failure (connection, timeout, body read)
    #[error("Failed to fetch URL: {0}")]
    Request(#[from] reqwest::Error),

    /// The site answered with a non-success status
    #[error("{url} responded with: {status}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },
}

impl FetchError {
    /// True when the identifier does not resolve to an existing page
    pub fn is_not_found(&self) -> bool {
        match self {
            FetchError::InvalidIdentifier(_) => true,
            FetchError::Status { status, .. } => {
                *status == reqwest::StatusCode::NOT_FOUND || *status == reqwest::StatusCode::GONE
            }
            FetchError::Request(_) => false,
        }
    }
}

/// Errors raised while assembling a [`crate::RecipeParser`]
#[derive(Error, Debug)]
pub enum BuilderError {
    /// The configured base URL is not a valid absolute URL
    #[error("Invalid base URL {url:?}: {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// The HTTP client could not be created
    #[error("Failed to create HTTP client: {0}")]
    Client(#[from] FetchError),
}

/// Errors that abort a single recipe extraction
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// The parser could not be set up
    #[error("Failed to set up recipe parser: {0}")]
    Setup(#[from] BuilderError),

    /// Failed to fetch the recipe page
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The token source reported malformed markup
    #[error("{}", malformed_message(.field, .source))]
    MalformedMarkup {
        field: Option<Field>,
        #[source]
        source: MarkupError,
    },

    /// A field rule matched but the value it captures was not where expected
    #[error("expected {expected} after {field} tag, found {found}")]
    UnexpectedToken {
        field: Field,
        expected: &'static str,
        found: String,
    },
}

impl ExtractionError {
    /// True when the failure means the recipe page does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, ExtractionError::Fetch(err) if err.is_not_found())
    }

    /// Field the walk was capturing when it failed, if any
    pub fn field(&self) -> Option<Field> {
        match self {
            ExtractionError::Setup(_) | ExtractionError::Fetch(_) => None,
            ExtractionError::MalformedMarkup { field, .. } => *field,
            ExtractionError::UnexpectedToken { field, .. } => Some(*field),
        }
    }
}

fn malformed_message(field: &Option<Field>, source: &MarkupError) -> String {
    match field {
        Some(field) => format!("malformed markup while reading {field} text: {source}"),
        None => format!("malformed markup: {source}"),
    }
}
