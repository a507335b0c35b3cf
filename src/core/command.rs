use async_trait::async_trait;
use crate::core::library::LibraryError;

#[derive(Debug)]
pub enum CommandError {
    Access {
        message: String,
        reason_code: Option<String>,
    },
    AlreadyBorrowed {
        message: String,
    },
    Database {
        message: String,
        reason_code: Option<String>,
        retryable: bool,
    },
    DuplicateEmail {
        message: String,
    },
    DuplicateKey {
        message: String,
    },
    NotBorrowed {
        message: String,
    },
    NotFound {
        message: String,
    },
    Runtime {
        message: String,
        reason_code: Option<String>,
        retryable: bool,
    },
    Serialization {
        message: String,
    },
    Validation {
        message: String,
        reason_code: Option<String>,
    },
    Other {
        message: String,
        reason_code: Option<String>,
    },
}

impl CommandError {
    pub fn code(&self) -> &'static str {
        match self {
            CommandError::Access { .. } => "access_denied",
            CommandError::AlreadyBorrowed { .. } => "already_borrowed",
            CommandError::Database { .. } => "database",
            CommandError::DuplicateEmail { .. } => "duplicate_email",
            CommandError::DuplicateKey { .. } => "duplicate_key",
            CommandError::NotBorrowed { .. } => "not_borrowed",
            CommandError::NotFound { .. } => "not_found",
            CommandError::Runtime { .. } => "runtime",
            CommandError::Serialization { .. } => "serialization",
            CommandError::Validation { .. } => "validation",
            CommandError::Other { .. } => "other",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            CommandError::Access { message, .. } => message,
            CommandError::AlreadyBorrowed { message } => message,
            CommandError::Database { message, .. } => message,
            CommandError::DuplicateEmail { message } => message,
            CommandError::DuplicateKey { message } => message,
            CommandError::NotBorrowed { message } => message,
            CommandError::NotFound { message } => message,
            CommandError::Runtime { message, .. } => message,
            CommandError::Serialization { message } => message,
            CommandError::Validation { message, .. } => message,
            CommandError::Other { message, .. } => message,
        }
    }
}

#[async_trait]
pub trait Command<Request, Response> {
    async fn execute(&self, req: Request) -> Result<Response, CommandError>;
}

impl From<LibraryError> for CommandError {
    fn from(other: LibraryError) -> Self {
        match other {
            LibraryError::Database { message, reason_code, retryable } => {
                CommandError::Database { message, reason_code, retryable }
            }
            LibraryError::AccessDenied { message, reason_code } => {
                CommandError::Access { message, reason_code }
            }
            LibraryError::DuplicateKey { message } => {
                CommandError::DuplicateKey { message }
            }
            LibraryError::DuplicateEmail { message } => {
                CommandError::DuplicateEmail { message }
            }
            LibraryError::NotFound { message } => {
                CommandError::NotFound { message }
            }
            LibraryError::AlreadyBorrowed { message } => {
                CommandError::AlreadyBorrowed { message }
            }
            LibraryError::NotBorrowed { message } => {
                CommandError::NotBorrowed { message }
            }
            LibraryError::CurrentlyUnavailable { message, reason_code, retryable } => {
                CommandError::Runtime { message, reason_code, retryable }
            }
            LibraryError::Validation { message, reason_code } => {
                CommandError::Validation { message, reason_code }
            }
            LibraryError::Serialization { message } => {
                CommandError::Serialization { message }
            }
            LibraryError::Runtime { message, reason_code } => {
                CommandError::Runtime { message, reason_code, retryable: true }
            }
        }
    }
}
