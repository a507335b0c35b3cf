use std::fmt;
use std::fmt::{Display, Formatter};
use serde::{Deserialize, Serialize};

#[derive(Debug)]
pub enum LibraryError {
    Database {
        message: String,
        reason_code: Option<String>,
        retryable: bool,
    },
    AccessDenied {
        message: String,
        reason_code: Option<String>,
    },
    DuplicateKey {
        message: String,
    },
    DuplicateEmail {
        message: String,
    },
    NotFound {
        message: String,
    },
    AlreadyBorrowed {
        message: String,
    },
    NotBorrowed {
        message: String,
    },
    // This is a retry-able error, which indicates that the record being written has been
    // changed by another call since it was read (its version no longer matches) or that the
    // store is temporarily unable to serve the request.
    // The caller can reload the record and retry with or without a backoff.
    CurrentlyUnavailable {
        message: String,
        reason_code: Option<String>,
        retryable: bool,
    },
    Validation {
        message: String,
        reason_code: Option<String>,
    },
    Serialization {
        message: String,
    },
    Runtime {
        message: String,
        reason_code: Option<String>,
    },
}

impl LibraryError {
    pub fn database(message: &str, reason_code: Option<String>, retryable: bool) -> LibraryError {
        LibraryError::Database { message: message.to_string(), reason_code, retryable }
    }

    pub fn access_denied(message: &str, reason_code: Option<String>) -> LibraryError {
        LibraryError::AccessDenied { message: message.to_string(), reason_code }
    }

    pub fn duplicate_key(message: &str) -> LibraryError {
        LibraryError::DuplicateKey { message: message.to_string() }
    }

    pub fn duplicate_email(message: &str) -> LibraryError {
        LibraryError::DuplicateEmail { message: message.to_string() }
    }

    pub fn not_found(message: &str) -> LibraryError {
        LibraryError::NotFound { message: message.to_string() }
    }

    pub fn already_borrowed(message: &str) -> LibraryError {
        LibraryError::AlreadyBorrowed { message: message.to_string() }
    }

    pub fn not_borrowed(message: &str) -> LibraryError {
        LibraryError::NotBorrowed { message: message.to_string() }
    }

    pub fn unavailable(message: &str, reason_code: Option<String>, retryable: bool) -> LibraryError {
        LibraryError::CurrentlyUnavailable { message: message.to_string(), reason_code, retryable }
    }

    pub fn database_or_unavailable(message: &str, reason: Option<String>, retryable: bool) -> LibraryError {
        if retryable {
            LibraryError::unavailable(
                format!("ddb database unavailable error {:?} {:?}", message, reason).as_str(), reason, true)
        } else if let Some(ref reason_val) = reason {
            if reason_val.as_str().contains("404") {
                LibraryError::not_found(
                    format!("not found error {:?} {:?}", message, reason).as_str())
            } else if reason_val.as_str().contains("400") {
                LibraryError::access_denied(
                    format!("access-denied error {:?} {:?}", message, reason).as_str(), reason)
            } else {
                LibraryError::database(
                    format!("ddb database error {:?} {:?}", message, reason).as_str(), reason, false)
            }
        } else {
            LibraryError::database(
                format!("ddb database error {:?} {:?}", message, reason).as_str(), reason, false)
        }
    }

    pub fn validation(message: &str, reason_code: Option<String>) -> LibraryError {
        LibraryError::Validation { message: message.to_string(), reason_code }
    }

    pub fn serialization(message: &str) -> LibraryError {
        LibraryError::Serialization { message: message.to_string() }
    }

    pub fn runtime(message: &str, reason_code: Option<String>) -> LibraryError {
        LibraryError::Runtime { message: message.to_string(), reason_code }
    }

    pub fn retryable(&self) -> bool {
        match self {
            LibraryError::Database { retryable, .. } => { *retryable }
            LibraryError::AccessDenied { .. } => { false }
            LibraryError::DuplicateKey { .. } => { false }
            LibraryError::DuplicateEmail { .. } => { false }
            LibraryError::NotFound { .. } => { false }
            LibraryError::AlreadyBorrowed { .. } => { false }
            LibraryError::NotBorrowed { .. } => { false }
            LibraryError::CurrentlyUnavailable { retryable, .. } => { *retryable }
            LibraryError::Validation { .. } => { false }
            LibraryError::Serialization { .. } => { false }
            LibraryError::Runtime { .. } => { false }
        }
    }

    // stable, machine-readable code for each kind of error
    pub fn code(&self) -> &'static str {
        match self {
            LibraryError::Database { .. } => "database",
            LibraryError::AccessDenied { .. } => "access_denied",
            LibraryError::DuplicateKey { .. } => "duplicate_key",
            LibraryError::DuplicateEmail { .. } => "duplicate_email",
            LibraryError::NotFound { .. } => "not_found",
            LibraryError::AlreadyBorrowed { .. } => "already_borrowed",
            LibraryError::NotBorrowed { .. } => "not_borrowed",
            LibraryError::CurrentlyUnavailable { .. } => "unavailable",
            LibraryError::Validation { .. } => "validation",
            LibraryError::Serialization { .. } => "serialization",
            LibraryError::Runtime { .. } => "runtime",
        }
    }
}

impl From<std::io::Error> for LibraryError {
    fn from(err: std::io::Error) -> Self {
        LibraryError::runtime(
            format!("serde io {:?}", err).as_str(), None)
    }
}

impl From<serde_json::Error> for LibraryError {
    fn from(err: serde_json::Error) -> Self {
        LibraryError::serialization(
            format!("serde json parsing {:?}", err).as_str())
    }
}

impl From<String> for LibraryError {
    fn from(err: String) -> Self {
        LibraryError::serialization(
            format!("serde parsing {:?}", err).as_str())
    }
}

impl Display for LibraryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            LibraryError::Database { message, reason_code, retryable } => {
                write!(f, "{} {:?} {}", message, reason_code, retryable)
            }
            LibraryError::AccessDenied { message, reason_code } => {
                write!(f, "{} {:?}", message, reason_code)
            }
            LibraryError::DuplicateKey { message } => {
                write!(f, "{}", message)
            }
            LibraryError::DuplicateEmail { message } => {
                write!(f, "{}", message)
            }
            LibraryError::NotFound { message } => {
                write!(f, "{}", message)
            }
            LibraryError::AlreadyBorrowed { message } => {
                write!(f, "{}", message)
            }
            LibraryError::NotBorrowed { message } => {
                write!(f, "{}", message)
            }
            LibraryError::CurrentlyUnavailable { message, reason_code, retryable } => {
                write!(f, "{} {:?} {}", message, reason_code, retryable)
            }
            LibraryError::Validation { message, reason_code } => {
                write!(f, "{} {:?}", message, reason_code)
            }
            LibraryError::Serialization { message } => {
                write!(f, "{}", message)
            }
            LibraryError::Runtime { message, reason_code } => {
                write!(f, "{} {:?}", message, reason_code)
            }
        }
    }
}

impl std::error::Error for LibraryError {}

/// A specialized Result type for the library stores and services.
pub type LibraryResult<T> = Result<T, LibraryError>;

// BookStatus is derived from the borrower reference of a book and never stored.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub enum BookStatus {
    Available,
    Borrowed(i64),
}

impl From<Option<i64>> for BookStatus {
    fn from(borrower_id: Option<i64>) -> Self {
        match borrower_id {
            Some(id) => BookStatus::Borrowed(id),
            None => BookStatus::Available,
        }
    }
}

impl Display for BookStatus {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            BookStatus::Available => write!(f, "Available"),
            BookStatus::Borrowed(id) => write!(f, "Borrowed({})", id),
        }
    }
}
