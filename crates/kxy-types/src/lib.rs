pub mod auth;
pub mod database;
pub mod envelope;
pub mod int64;
pub mod segment;

pub use auth::*;
pub use database::*;
pub use envelope::*;
pub use segment::*;

/// Backend health payload served at `/health`.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize, PartialEq)]
pub struct HealthInfo {
    pub version: String,
    pub status: String,
}
