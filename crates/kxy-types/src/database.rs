use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseType {
    Mysql,
    Postgresql,
    Sqlserver,
    Oracle,
}

impl DatabaseType {
    pub fn label(&self) -> &'static str {
        match self {
            DatabaseType::Mysql => "MySQL",
            DatabaseType::Postgresql => "PostgreSQL",
            DatabaseType::Sqlserver => "SQL Server",
            DatabaseType::Oracle => "Oracle",
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AddDatabaseRequest {
    pub system_code: String,
    pub db_type: DatabaseType,
    /// `host:port`
    pub db_address: String,
    pub db_user: String,
    pub db_password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub db_name: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct DatabaseConfig {
    pub guid: String,
    pub system_code: String,
    pub db_type: DatabaseType,
    pub db_address: String,
    pub db_user: String,
    pub db_password: String,
    #[serde(default)]
    pub db_name: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct InitDatabaseResponse {
    pub initialized_count: u64,
    #[serde(default)]
    pub segments: Vec<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AddConfigRequest {
    pub table_name: String,
    pub field_name: String,
    #[serde(default, deserialize_with = "crate::int64::lenient")]
    pub initial_value: i64,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct DiscoveredTable {
    pub database: String,
    pub table: String,
    pub primary_key: String,
    #[serde(default, deserialize_with = "crate::int64::lenient_opt")]
    pub max_id: Option<i64>,
}
