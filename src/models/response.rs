use serde::{Deserialize, Serialize};

use crate::constants::messages;

/// Outcome of a mutating operation. Domain failures (not found, duplicate,
/// validation) travel as `flag == false` with a readable message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneralResponse {
    pub flag: bool,
    pub message: String,
}

impl GeneralResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            flag: true,
            message: message.into(),
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            flag: false,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn completed() -> Self {
        Self::ok(messages::PROCESS_COMPLETED)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub flag: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
}

impl LoginResponse {
    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            flag: false,
            message: message.into(),
            token: None,
            refresh_token: None,
        }
    }

    pub fn issued(message: impl Into<String>, token: String, refresh_token: String) -> Self {
        Self {
            flag: true,
            message: message.into(),
            token: Some(token),
            refresh_token: Some(refresh_token),
        }
    }
}
