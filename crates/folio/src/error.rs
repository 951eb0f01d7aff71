//! Errors raised by accessors and the statement builders.

use std::error::Error as _;
use thiserror::Error;
use tokio_postgres::types::WrongType;

pub type FolioResult<T> = Result<T, FolioError>;

/// Coarse classification of a [`FolioError`].
///
/// Transports map these onto their own status codes; the error itself never
/// carries one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The caller supplied missing, empty, wrongly-typed or malformed input.
    InvalidArgument,
    /// A statement targeting a specific identifier matched no rows.
    NotFound,
    /// Anything raised by the storage engine or the connection layer.
    Storage,
}

#[derive(Debug, Error)]
pub enum FolioError {
    /// Input rejected before it reached storage.
    #[error("{0}")]
    InvalidArgument(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Query error: {0}")]
    Query(#[from] tokio_postgres::Error),

    /// SQLSTATE class 23 (integrity constraint violation).
    #[error("Constraint violation on '{constraint}': {message}")]
    Constraint { constraint: String, message: String },

    /// A returned column did not match the record type.
    #[error("Decode error on column '{column}': {message}")]
    Decode { column: String, message: String },

    #[cfg(feature = "pool")]
    #[error("Pool error: {0}")]
    Pool(String),

    #[cfg(feature = "migrate")]
    #[error("Migration error: {0}")]
    Migration(String),
}

impl FolioError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn decode(column: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            column: column.into(),
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Self::NotFound(_) => ErrorKind::NotFound,
            _ => ErrorKind::Storage,
        }
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }

    /// Classify an error returned by `tokio-postgres`.
    ///
    /// A value whose type the target column refuses is the caller's fault, so
    /// it becomes `InvalidArgument`; constraint failures keep the constraint
    /// name; everything else is a plain query error.
    pub fn from_postgres(err: tokio_postgres::Error) -> Self {
        if err
            .source()
            .is_some_and(|source| source.downcast_ref::<WrongType>().is_some())
        {
            return Self::invalid_argument("Invalid input type.");
        }

        if let Some(db_err) = err.as_db_error()
            && db_err.code().code().starts_with("23")
        {
            return Self::Constraint {
                constraint: db_err.constraint().unwrap_or("unknown").to_string(),
                message: db_err.message().to_string(),
            };
        }
        Self::Query(err)
    }
}

#[cfg(feature = "pool")]
impl From<deadpool_postgres::PoolError> for FolioError {
    fn from(err: deadpool_postgres::PoolError) -> Self {
        Self::Pool(err.to_string())
    }
}

#[cfg(feature = "migrate")]
impl From<refinery::Error> for FolioError {
    fn from(err: refinery::Error) -> Self {
        Self::Migration(err.to_string())
    }
}
