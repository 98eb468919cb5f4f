use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// First-time setup credentials. The backend enforces 3..=50 chars for the
/// username and 6..=100 for the password.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct InitUserRequest {
    pub username: String,
    pub password: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct TokenResponse {
    pub token: String,
    pub username: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CheckInitResponse {
    pub initialized: bool,
}
