#[cfg(feature = "axum-error")]
pub mod axum_error;

use http::StatusCode;
use serde::Serialize;
use serde_json::{json, Value};
use std::{
    error::Error as StdError,
    fmt::{Debug, Formatter, Result as FmtResult},
};
use strum::AsRefStr;
use thiserror::Error as ThisError;

#[derive(ThisError, Clone, Hash, Eq, PartialEq, Serialize, AsRefStr)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "PascalCase")]
pub enum InternalError {
    #[error("An unknown error occurred: {}", .message)]
    UnknownError { message: String },
    #[error("Upstream {} request returned {}: {}", .step, .status, .message)]
    UpstreamError {
        step: String,
        status: u16,
        message: String,
    },
    #[error("A timeout occurred: {}", .message)]
    Timeout { message: String },
    #[error("A connection error occurred: {}", .message)]
    ConnectionError { message: String },
    #[error("Configuration error: {}", .message)]
    ConfigurationError { message: String },
    #[error("Deserialization error: {}", .message)]
    DeserializeError { message: String },
}

impl From<anyhow::Error> for InternalError {
    fn from(error: anyhow::Error) -> Self {
        match error.downcast_ref::<InternalError>() {
            Some(internal_error) => internal_error.clone(),
            None => InternalError::UnknownError {
                message: error.to_string(),
            },
        }
    }
}

impl InternalError {
    pub fn unknown(message: &str) -> SalesapError {
        SalesapError::internal(InternalError::UnknownError {
            message: message.to_string(),
        })
    }

    /// A CRM call answered with a status the pipeline does not accept.
    /// `message` carries the raw response text so it ends up in the logs.
    pub fn upstream(step: &str, status: u16, message: &str) -> SalesapError {
        SalesapError::internal(InternalError::UpstreamError {
            step: step.to_string(),
            status,
            message: message.to_string(),
        })
    }

    pub fn timeout(message: &str) -> SalesapError {
        SalesapError::internal(InternalError::Timeout {
            message: message.to_string(),
        })
    }

    pub fn connection_error(message: &str) -> SalesapError {
        SalesapError::internal(InternalError::ConnectionError {
            message: message.to_string(),
        })
    }

    pub fn configuration_error(message: &str) -> SalesapError {
        SalesapError::internal(InternalError::ConfigurationError {
            message: message.to_string(),
        })
    }

    pub fn deserialize_error(message: &str) -> SalesapError {
        SalesapError::internal(InternalError::DeserializeError {
            message: message.to_string(),
        })
    }
}

impl Debug for InternalError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        writeln!(f, "{}\n", &self)?;
        let mut current = self.source();

        while let Some(cause) = current {
            writeln!(f, "Caused by:\n\t{}", cause)?;
            current = cause.source();
        }

        Ok(())
    }
}

#[derive(ThisError, Debug, Clone, Hash, Eq, PartialEq, Serialize, AsRefStr)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "PascalCase")]
pub enum ApplicationError {
    #[error("Bad Request: {}", .message)]
    BadRequest { message: String },
    #[error("Forbidden: {}", .message)]
    Forbidden { message: String },
    #[error("Not Found: {}", .message)]
    NotFound { message: String },
    #[error("Internal Server Error: {}", .message)]
    InternalServerError { message: String },
}

impl ApplicationError {
    pub fn bad_request(message: &str) -> SalesapError {
        SalesapError::application(ApplicationError::BadRequest {
            message: message.to_string(),
        })
    }

    pub fn forbidden(message: &str) -> SalesapError {
        SalesapError::application(ApplicationError::Forbidden {
            message: message.to_string(),
        })
    }

    pub fn not_found(message: &str) -> SalesapError {
        SalesapError::application(ApplicationError::NotFound {
            message: message.to_string(),
        })
    }

    pub fn message(&self) -> &str {
        match self {
            ApplicationError::BadRequest { message }
            | ApplicationError::Forbidden { message }
            | ApplicationError::NotFound { message }
            | ApplicationError::InternalServerError { message } => message,
        }
    }
}

impl From<InternalError> for ApplicationError {
    fn from(error: InternalError) -> Self {
        match error {
            InternalError::DeserializeError { message } => ApplicationError::BadRequest { message },
            InternalError::UnknownError { .. }
            | InternalError::UpstreamError { .. }
            | InternalError::Timeout { .. }
            | InternalError::ConnectionError { .. }
            | InternalError::ConfigurationError { .. } => ApplicationError::InternalServerError {
                message: "An unknown error occurred".into(),
            },
        }
    }
}

#[derive(ThisError, Debug, Clone, Hash, Eq, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SalesapError {
    #[error(transparent)]
    Internal(InternalError),
    #[error(transparent)]
    Application(ApplicationError),
}

impl SalesapError {
    pub fn internal(error: InternalError) -> Self {
        SalesapError::Internal(error)
    }

    pub fn application(error: ApplicationError) -> Self {
        SalesapError::Application(error)
    }

    pub fn as_application(self) -> ApplicationError {
        match self {
            SalesapError::Internal(e) => e.into(),
            SalesapError::Application(e) => e,
        }
    }

    /// Body sent back to HTTP callers: `{"error": <message>}`.
    pub fn as_json(&self) -> Value {
        json!({ "error": self.clone().as_application().message() })
    }
}

impl AsRef<str> for SalesapError {
    fn as_ref(&self) -> &str {
        match self {
            SalesapError::Internal(e) => e.as_ref(),
            SalesapError::Application(e) => e.as_ref(),
        }
    }
}

impl From<anyhow::Error> for SalesapError {
    fn from(error: anyhow::Error) -> Self {
        match error.downcast_ref::<SalesapError>() {
            Some(salesap_error) => salesap_error.clone(),
            None => SalesapError::Internal(InternalError::from(error)),
        }
    }
}

impl<'a> From<&'a SalesapError> for StatusCode {
    fn from(value: &'a SalesapError) -> Self {
        match value {
            SalesapError::Internal(e) => match e {
                InternalError::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
                InternalError::ConnectionError { .. } | InternalError::UpstreamError { .. } => {
                    StatusCode::BAD_GATEWAY
                }
                InternalError::DeserializeError { .. } => StatusCode::BAD_REQUEST,
                InternalError::UnknownError { .. } | InternalError::ConfigurationError { .. } => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            SalesapError::Application(e) => match e {
                ApplicationError::BadRequest { .. } => StatusCode::BAD_REQUEST,
                ApplicationError::Forbidden { .. } => StatusCode::FORBIDDEN,
                ApplicationError::NotFound { .. } => StatusCode::NOT_FOUND,
                ApplicationError::InternalServerError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}
