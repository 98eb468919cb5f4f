use serde::{Deserialize, Serialize};

pub const DEFAULT_SEGMENT_COUNT: i64 = 10_000;

fn default_segment_count() -> i64 {
    DEFAULT_SEGMENT_COUNT
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SegmentRequest {
    pub system_code: String,
    pub db_name: String,
    pub table_name: String,
    pub field_name: String,
    #[serde(default = "default_segment_count")]
    pub segment_count: i64,
}

/// Inclusive id range handed out by the allocator.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SegmentResponse {
    #[serde(deserialize_with = "crate::int64::lenient")]
    pub start: i64,
    #[serde(deserialize_with = "crate::int64::lenient")]
    pub end: i64,
}

impl SegmentResponse {
    /// Number of ids in the range, saturating at `i64::MAX` for bounds no
    /// allocator would hand out.
    pub fn len(&self) -> i64 {
        if self.is_empty() {
            return 0;
        }
        self.end.saturating_sub(self.start).saturating_add(1)
    }

    pub fn is_empty(&self) -> bool {
        self.end < self.start
    }
}
