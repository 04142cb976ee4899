use std::env;
use std::fmt;

#[derive(Debug)]
pub struct Error {
    pub code: i32,
    pub message: String,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}

impl From<env::VarError> for Error {
    fn from(err: env::VarError) -> Self {
        env_var_error(err)
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        network_error(err)
    }
}

// codes 1..=99 are internal, 100+ carry a message fit for the page
pub fn invalid_input_error(message: impl Into<String>) -> Error {
    Error {
        code: 101,
        message: message.into(),
    }
}

pub fn upstream_error(message: impl Into<String>) -> Error {
    Error {
        code: 102,
        message: message.into(),
    }
}

pub fn env_var_error(_: env::VarError) -> Error {
    Error {
        code: 1,
        message: "environment variable error".into(),
    }
}

pub fn network_error(err: reqwest::Error) -> Error {
    Error {
        code: 3,
        message: format!("network error: {}", err),
    }
}

pub fn provider_error(detail: impl Into<String>) -> Error {
    Error {
        code: 6,
        message: format!("map provider error: {}", detail.into()),
    }
}

pub fn geocode_error(status: impl Into<String>) -> Error {
    Error {
        code: 4,
        message: format!("geocoding failed: {}", status.into()),
    }
}

pub fn unexpected_error() -> Error {
    Error {
        code: 5,
        message: "unexpected error".into(),
    }
}
