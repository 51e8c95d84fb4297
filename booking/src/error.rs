use reqwest::StatusCode;
use thiserror::Error;

use crate::wizard::WizardStep;

/// Failures talking to the lookup or booking service.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("service responded with {status}{}", message_suffix(.message))]
    Status {
        status: StatusCode,
        message: Option<String>,
    },

    #[error("unexpected response body from {url}: {reason}")]
    Decode { url: String, reason: String },
}

fn message_suffix(message: &Option<String>) -> String {
    match message {
        Some(m) => format!(": {m}"),
        None => String::new(),
    }
}

impl ServiceError {
    /// Message the service put in its error body, if any.
    pub fn user_message(&self) -> Option<&str> {
        match self {
            ServiceError::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

#[derive(Error, Debug)]
pub enum BookingError {
    #[error("cannot advance: {0} step is not complete")]
    StepIncomplete(WizardStep),

    #[error("already at the last step, submit instead")]
    NoNextStep,

    #[error("booking can only be submitted from a completed date range step")]
    NotReadyToSubmit,

    #[error("a booking submission is already in flight")]
    SubmissionInFlight,

    #[error("no async runtime available to send the request")]
    NoRuntime,

    #[error("draft is missing {0}")]
    MissingField(&'static str),

    #[error(transparent)]
    Service(#[from] ServiceError),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
}
