use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

/// Failure reported by an embedding or generation provider.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProviderError {
    #[error("Provider API error: {0}")]
    Api(String),

    #[error("Malformed provider response: {0}")]
    MalformedResponse(String),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("No documents were provided")]
    NoDocuments,

    #[error("Document '{filename}' could not be read: {reason}")]
    Unreadable { filename: String, reason: String },

    #[error("Invalid chunking parameters: {0}")]
    InvalidChunking(String),

    #[error("Invalid choice '{0}': expected one of A, B, C, D")]
    InvalidChoice(String),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum IndexError {
    #[error("Cannot build an index from an empty chunk set")]
    EmptyInput,

    #[error("Chunk {position} rejected before embedding: {reason}")]
    InvalidChunk { position: usize, reason: String },

    #[error("Embedding failed for chunk {position}: {reason}")]
    EmbeddingFailure { position: usize, reason: String },

    #[error("Embedding the query text failed: {0}")]
    QueryFailure(String),

    #[error("Vector index has not been built")]
    NotBuilt,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SynthesisError {
    #[error("Generated output is not valid JSON: {0}")]
    ParseFailure(String),

    #[error("Generated question violates the schema: {0}")]
    SchemaViolation(String),

    #[error("Generation provider failed: {0}")]
    Upstream(#[from] ProviderError),
}

impl SynthesisError {
    /// Parse and schema failures come from a single bad sample and are worth
    /// another attempt; provider failures are not.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            SynthesisError::ParseFailure(_) | SynthesisError::SchemaViolation(_)
        )
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum BankError {
    #[error("Invalid question count {0}: must be between 1 and 10")]
    InvalidCount(usize),

    #[error("Retrieval failed for question slot {slot}: {source}")]
    Retrieval { slot: usize, source: IndexError },

    #[error("Generation provider failed for question slot {slot}: {source}")]
    Upstream { slot: usize, source: ProviderError },

    #[error("Question slot {slot} failed after {attempts} attempts: {last_error}")]
    SynthesisExhausted {
        slot: usize,
        attempts: u32,
        last_error: String,
    },
}

#[derive(Debug, Clone, Error)]
pub enum AppError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    Index(#[from] IndexError),

    #[error(transparent)]
    Bank(#[from] BankError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("No active quiz session")]
    NoActiveSession,

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Input(_) => "INPUT_ERROR",
            AppError::Index(_) => "INDEX_ERROR",
            AppError::Bank(BankError::InvalidCount(_)) => "INVALID_COUNT",
            AppError::Bank(BankError::SynthesisExhausted { .. }) => "SYNTHESIS_EXHAUSTED",
            AppError::Bank(_) => "GENERATION_ERROR",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::NoActiveSession => "NO_ACTIVE_SESSION",
            AppError::Configuration(_) => "CONFIGURATION_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: &'static str,
    pub status: u16,
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Input(_) | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Bank(BankError::InvalidCount(_)) => StatusCode::BAD_REQUEST,
            AppError::Index(IndexError::EmptyInput | IndexError::InvalidChunk { .. }) => {
                StatusCode::BAD_REQUEST
            }
            AppError::Index(
                IndexError::EmbeddingFailure { .. } | IndexError::QueryFailure(_),
            ) => StatusCode::BAD_GATEWAY,
            AppError::Bank(BankError::Upstream { .. } | BankError::Retrieval { .. }) => {
                StatusCode::BAD_GATEWAY
            }
            AppError::Bank(BankError::SynthesisExhausted { .. }) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            AppError::NoActiveSession => StatusCode::NOT_FOUND,
            AppError::Index(IndexError::NotBuilt)
            | AppError::Configuration(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.to_string(),
            code: self.error_code(),
            status: self.status_code().as_u16(),
        })
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl From<actix_web::error::BlockingError> for AppError {
    fn from(err: actix_web::error::BlockingError) -> Self {
        AppError::Internal(err.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;
