//! Typed calls for the ID generator backend.

use kxy_types::{
    AddConfigRequest, AddDatabaseRequest, CheckInitResponse, DatabaseConfig, DiscoveredTable,
    Envelope, HealthInfo, InitDatabaseResponse, InitUserRequest, LoginRequest, SegmentRequest,
    SegmentResponse, TokenResponse,
};
use serde_json::Value;

use crate::client::ApiClient;
use crate::error::ApiError;

fn database_path(guid: &str, suffix: &str) -> String {
    format!("/api/database/{}{suffix}", urlencoding::encode(guid))
}

impl ApiClient {
    pub async fn health(&self) -> Result<Envelope<HealthInfo>, ApiError> {
        self.get("/health").await
    }

    pub async fn check_init(&self) -> Result<Envelope<CheckInitResponse>, ApiError> {
        self.get("/api/auth/check-init").await
    }

    pub async fn init_user(&self, request: &InitUserRequest) -> Result<Envelope<Value>, ApiError> {
        self.post("/api/auth/init-user", Some(request)).await
    }

    /// Exchanges credentials for a token. Storing it is up to the caller
    /// (see [`crate::Session::sign_in`]).
    pub async fn login(&self, request: &LoginRequest) -> Result<Envelope<TokenResponse>, ApiError> {
        self.post("/api/auth/login", Some(request)).await
    }

    pub async fn list_databases(&self) -> Result<Envelope<Vec<DatabaseConfig>>, ApiError> {
        self.get("/api/database/list").await
    }

    pub async fn get_database(&self, guid: &str) -> Result<Envelope<DatabaseConfig>, ApiError> {
        self.get(&database_path(guid, "")).await
    }

    pub async fn add_database(
        &self,
        request: &AddDatabaseRequest,
    ) -> Result<Envelope<DatabaseConfig>, ApiError> {
        self.post("/api/database/add", Some(request)).await
    }

    pub async fn update_database(
        &self,
        guid: &str,
        request: &AddDatabaseRequest,
    ) -> Result<Envelope<DatabaseConfig>, ApiError> {
        self.put(&database_path(guid, ""), request).await
    }

    pub async fn delete_database(&self, guid: &str) -> Result<Envelope<Value>, ApiError> {
        self.delete(&database_path(guid, "")).await
    }

    /// Scans every table of the database and seeds its segments.
    pub async fn initialize_database(
        &self,
        guid: &str,
    ) -> Result<Envelope<InitDatabaseResponse>, ApiError> {
        let path = format!("/api/database/initialize/{}", urlencoding::encode(guid));
        self.post::<(), _>(&path, None).await
    }

    pub async fn add_custom_config(
        &self,
        guid: &str,
        request: &AddConfigRequest,
    ) -> Result<Envelope<Value>, ApiError> {
        self.post(&database_path(guid, "/add-config"), Some(request))
            .await
    }

    pub async fn discovered_tables(
        &self,
        guid: &str,
    ) -> Result<Envelope<Vec<DiscoveredTable>>, ApiError> {
        self.get(&database_path(guid, "/discovered-tables")).await
    }

    pub async fn allocate_segment(
        &self,
        request: &SegmentRequest,
    ) -> Result<Envelope<SegmentResponse>, ApiError> {
        self.post("/api/segment/allocate", Some(request)).await
    }

    /// Client-side logout: forget the session and go back to the login page.
    pub fn logout(&self) {
        self.session().clear();
        self.navigator().navigate(crate::routes::LOGIN_PATH);
    }
}

#[cfg(test)]
mod tests {
    use http::Method;
    use kxy_types::DatabaseType;
    use serde_json::json;

    use super::*;
    use crate::client::tests::harness;

    #[test]
    fn guids_are_escaped_as_one_segment() {
        assert_eq!(database_path("3f2a-bc_9.~", ""), "/api/database/3f2a-bc_9.~");
        assert_eq!(database_path("a/b c", ""), "/api/database/a%2Fb%20c");
        assert_eq!(
            database_path("g 1", "/add-config"),
            "/api/database/g%201/add-config"
        );
    }

    #[tokio::test]
    async fn login_posts_credentials_and_decodes_token() {
        let h = harness();
        h.transport.reply(
            200,
            json!({
                "code": 0,
                "msg": "Login successful",
                "data": { "token": "jwt", "username": "admin" }
            }),
        );

        let envelope = h
            .client
            .login(&LoginRequest {
                username: "admin".into(),
                password: "secret1".into(),
            })
            .await
            .unwrap();
        assert_eq!(envelope.msg, "Login successful");
        assert_eq!(
            envelope.data,
            Some(TokenResponse {
                token: "jwt".into(),
                username: "admin".into()
            })
        );

        let sent = h.transport.sent.borrow();
        assert_eq!(sent[0].method(), Method::POST);
        assert_eq!(sent[0].uri().path(), "/api/auth/login");
        let body: Value = serde_json::from_slice(sent[0].body()).unwrap();
        assert_eq!(body, json!({ "username": "admin", "password": "secret1" }));
    }

    #[tokio::test]
    async fn database_calls_use_expected_routes() {
        let h = harness();
        let config = json!({
            "guid": "g1",
            "system_code": "crm",
            "db_type": "mysql",
            "db_address": "db:3306",
            "db_user": "root",
            "db_password": "pw",
            "db_name": null
        });
        h.transport.reply(200, json!({ "code": 0, "data": [config.clone()] }));
        h.transport.reply(200, json!({ "code": 0, "data": config.clone() }));
        h.transport.reply(200, json!({ "code": 0, "data": {} }));
        h.transport.reply(
            200,
            json!({ "code": 0, "data": { "initialized_count": 2, "segments": ["a", "b"] } }),
        );
        h.transport.reply(200, json!({ "code": 0, "data": [] }));

        let list = h.client.list_databases().await.unwrap();
        assert_eq!(list.data.unwrap()[0].db_type, DatabaseType::Mysql);

        let request = AddDatabaseRequest {
            system_code: "crm".into(),
            db_type: DatabaseType::Mysql,
            db_address: "db:3306".into(),
            db_user: "root".into(),
            db_password: "pw".into(),
            db_name: None,
        };
        h.client.update_database("g1", &request).await.unwrap();
        h.client.delete_database("g1").await.unwrap();
        let init = h.client.initialize_database("g1").await.unwrap();
        assert_eq!(init.data.unwrap().initialized_count, 2);
        h.client.discovered_tables("g1").await.unwrap();

        let sent = h.transport.sent.borrow();
        let calls: Vec<(Method, String)> = sent
            .iter()
            .map(|r| (r.method().clone(), r.uri().path().to_string()))
            .collect();
        assert_eq!(
            calls,
            vec![
                (Method::GET, "/api/database/list".to_string()),
                (Method::PUT, "/api/database/g1".to_string()),
                (Method::DELETE, "/api/database/g1".to_string()),
                (Method::POST, "/api/database/initialize/g1".to_string()),
                (Method::GET, "/api/database/g1/discovered-tables".to_string()),
            ]
        );
        assert!(sent[3].body().is_empty());
    }

    #[tokio::test]
    async fn auth_and_setup_calls_use_expected_routes() {
        let h = harness();
        h.transport.reply(
            200,
            json!({ "code": 0, "data": { "version": "1.0.0", "status": "healthy" } }),
        );
        h.transport
            .reply(200, json!({ "code": 0, "data": { "initialized": false } }));
        h.transport.reply(200, json!({ "code": 0 }));
        let config = json!({
            "guid": "g 1",
            "system_code": "crm",
            "db_type": "oracle",
            "db_address": "db:1521",
            "db_user": "sys",
            "db_password": "pw",
            "db_name": "orcl"
        });
        h.transport.reply(200, json!({ "code": 0, "data": config.clone() }));
        h.transport.reply(200, json!({ "code": 0, "data": config }));
        h.transport.reply(200, json!({ "code": 0 }));

        let health = h.client.health().await.unwrap().into_data().unwrap();
        assert_eq!(health.status, "healthy");
        let init = h.client.check_init().await.unwrap().into_data().unwrap();
        assert!(!init.initialized);
        h.client
            .init_user(&InitUserRequest {
                username: "admin".into(),
                password: "secret1".into(),
            })
            .await
            .unwrap();
        let fetched = h.client.get_database("g 1").await.unwrap();
        assert_eq!(fetched.data.unwrap().db_name.as_deref(), Some("orcl"));
        h.client
            .add_database(&AddDatabaseRequest {
                system_code: "crm".into(),
                db_type: DatabaseType::Oracle,
                db_address: "db:1521".into(),
                db_user: "sys".into(),
                db_password: "pw".into(),
                db_name: Some("orcl".into()),
            })
            .await
            .unwrap();
        h.client
            .add_custom_config(
                "g 1",
                &AddConfigRequest {
                    table_name: "orders".into(),
                    field_name: "id".into(),
                    initial_value: 1000,
                },
            )
            .await
            .unwrap();

        let sent = h.transport.sent.borrow();
        let calls: Vec<(Method, String)> = sent
            .iter()
            .map(|r| (r.method().clone(), r.uri().path().to_string()))
            .collect();
        assert_eq!(
            calls,
            vec![
                (Method::GET, "/health".to_string()),
                (Method::GET, "/api/auth/check-init".to_string()),
                (Method::POST, "/api/auth/init-user".to_string()),
                (Method::GET, "/api/database/g%201".to_string()),
                (Method::POST, "/api/database/add".to_string()),
                (Method::POST, "/api/database/g%201/add-config".to_string()),
            ]
        );
        let body: Value = serde_json::from_slice(sent[5].body()).unwrap();
        assert_eq!(body["table_name"], "orders");
    }

    #[tokio::test]
    async fn segment_bounds_accept_stringified_ids() {
        let h = harness();
        h.transport.reply(
            200,
            json!({
                "code": 0,
                "data": { "start": "9007199254740993", "end": "9007199254750992" }
            }),
        );

        let segment = h
            .client
            .allocate_segment(&SegmentRequest {
                system_code: "crm".into(),
                db_name: "crm".into(),
                table_name: "orders".into(),
                field_name: "id".into(),
                segment_count: 10_000,
            })
            .await
            .unwrap()
            .into_data()
            .unwrap();
        assert_eq!(segment.start, 9_007_199_254_740_993);
        assert_eq!(segment.len(), 10_000);
    }

    #[test]
    fn logout_clears_and_navigates_within_the_app() {
        let h = harness();
        h.session.sign_in("abc123", "admin");
        h.client.logout();
        assert!(!h.session.has_token());
        assert_eq!(*h.navigator.navigations.borrow(), vec!["/login"]);
        assert!(h.navigator.reloads.borrow().is_empty());
    }
}
