use serde::{Deserialize, Serialize};

/// The only `code` value the backend uses for success.
pub const SUCCESS_CODE: i64 = 0;

/// Response wrapper returned by every backend endpoint.
///
/// `code == 0` marks success; any other value is an application failure
/// whose human readable reason is in `msg`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Envelope<T> {
    pub code: i64,
    #[serde(default)]
    pub msg: String,
    pub data: Option<T>,
    #[serde(rename = "traceId", default, skip_serializing_if = "Option::is_none")]
    pub trace_id: Option<String>,
}

impl<T> Envelope<T> {
    pub fn success(data: T) -> Self {
        Self {
            code: SUCCESS_CODE,
            msg: String::new(),
            data: Some(data),
            trace_id: None,
        }
    }

    pub fn failure(code: i64, msg: impl Into<String>) -> Self {
        Self {
            code,
            msg: msg.into(),
            data: None,
            trace_id: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.code == SUCCESS_CODE
    }

    pub fn into_data(self) -> Option<T> {
        self.data
    }
}
