#![allow(dead_code)]

use std::net::SocketAddr;

use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use uuid::Uuid;

use parlour::config::Config;

pub const ADMIN_EMAIL: &str = "admin@test.com";
pub const PASSWORD: &str = "password123";

/// A running test server instance with a dedicated test database.
pub struct TestApp {
    pub addr: SocketAddr,
    pub pool: PgPool,
    pub client: Client,
    pub db_name: String,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Register the bootstrap user (first user = system admin of the first tenant).
    pub async fn register(&self, email: &str, password: &str, name: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url("/api/Auth/Auth_Register"))
            .json(&json!({ "email": email, "password": password, "name": name }))
            .send()
            .await
            .expect("register request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// Login and return the auth response body + status.
    pub async fn login(&self, email: &str, password: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url("/api/Auth/Auth_Login"))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("login request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// Register bootstrap user, return access token.
    pub async fn bootstrap(&self) -> String {
        let (body, status) = self.register(ADMIN_EMAIL, PASSWORD, "Admin").await;
        assert_eq!(status, StatusCode::OK, "bootstrap register failed: {body}");
        body["accessToken"].as_str().unwrap().to_string()
    }

    /// Create a second tenant with its own admin, return (tenant id, admin token).
    pub async fn create_tenant(&self, sys_token: &str, name: &str, admin_email: &str) -> (String, String) {
        let (body, status) = self
            .post_auth(
                "/api/Tenant/Tenant_Create",
                sys_token,
                &json!({
                    "name": name,
                    "admin": { "email": admin_email, "password": PASSWORD, "name": "Tenant Admin" }
                }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "create tenant failed: {body}");
        let tenant_id = body["tenant"]["id"].as_str().unwrap().to_string();

        let (login, status) = self.login(admin_email, PASSWORD).await;
        assert_eq!(status, StatusCode::OK, "tenant admin login failed: {login}");
        (tenant_id, login["accessToken"].as_str().unwrap().to_string())
    }

    /// Create a member, return the member JSON.
    pub async fn create_member(&self, token: &str, first_name: &str, last_name: &str) -> Value {
        let (body, status) = self
            .post_auth(
                "/api/Member/Member_Create",
                token,
                &json!({ "firstName": first_name, "lastName": last_name }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "create member failed: {body}");
        body
    }

    /// Create a policy, member and claim; return the claim JSON.
    pub async fn create_claim(&self, token: &str, claim_number: &str) -> Value {
        let member = self.create_member(token, "Thabo", "Nkosi").await;
        let (policy, status) = self
            .post_auth(
                "/api/Policy/Policy_Create",
                token,
                &json!({ "name": "Family Plan", "coverageAmount": 30000.0, "premiumAmount": 250.0 }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "create policy failed: {policy}");

        let (claim, status) = self
            .post_auth(
                "/api/Claim/Claim_Create",
                token,
                &json!({
                    "policyId": policy["id"],
                    "memberId": member["id"],
                    "claimNumber": claim_number,
                    "deceasedName": "Sipho Nkosi"
                }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "create claim failed: {claim}");
        claim
    }

    /// Make an authenticated GET request.
    pub async fn get_auth(&self, path: &str, token: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .get(self.url(path))
            .bearer_auth(token)
            .send()
            .await
            .expect("get request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// Authenticated GET scoped to another tenant through `X-Tenant-ID`.
    pub async fn get_as_tenant(&self, path: &str, token: &str, tenant_id: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .get(self.url(path))
            .bearer_auth(token)
            .header("x-tenant-id", tenant_id)
            .send()
            .await
            .expect("get request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// Make an authenticated POST request with JSON body.
    pub async fn post_auth(&self, path: &str, token: &str, body: &Value) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url(path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await
            .expect("post request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// Make an authenticated PUT request with JSON body.
    pub async fn put_auth(&self, path: &str, token: &str, body: &Value) -> (Value, StatusCode) {
        let resp = self
            .client
            .put(self.url(path))
            .bearer_auth(token)
            .json(body)
            .send()
            .await
            .expect("put request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// Make an authenticated DELETE request.
    pub async fn delete_auth(&self, path: &str, token: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .delete(self.url(path))
            .bearer_auth(token)
            .send()
            .await
            .expect("delete request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }
}

fn admin_url(base_url: &str) -> String {
    base_url
        .rsplit_once('/')
        .map(|(base, _)| format!("{base}/postgres"))
        .unwrap_or_else(|| base_url.to_string())
}

/// Create an empty database and return (name, url, pool). No schema yet.
pub async fn create_database() -> (String, String, PgPool) {
    let _ = dotenvy::dotenv();

    let base_url = std::env::var("DATABASE_URL")
        .expect("DATABASE_URL must be set for tests");

    let db_name = format!("parlour_test_{}", Uuid::now_v7().to_string().replace('-', ""));

    let admin_pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&admin_url(&base_url))
        .await
        .expect("Failed to connect to postgres for test DB creation");

    sqlx::query(&format!("CREATE DATABASE \"{db_name}\""))
        .execute(&admin_pool)
        .await
        .expect("Failed to create test database");

    admin_pool.close().await;

    let test_url = base_url
        .rsplit_once('/')
        .map(|(base, _)| format!("{base}/{db_name}"))
        .unwrap_or_else(|| base_url.clone());

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&test_url)
        .await
        .expect("Failed to connect to test database");

    (db_name, test_url, pool)
}

/// Spawn a test app with a fresh temporary database.
pub async fn spawn_app() -> TestApp {
    let (db_name, test_url, pool) = create_database().await;

    parlour::migrate::ensure_schema(&pool)
        .await
        .expect("Failed to create schema on test database");

    let config = Config {
        database_url: test_url,
        db_max_connections: 5,
        jwt_secret: "test-jwt-secret-that-is-long-enough".to_string(),
        token_ttl_minutes: 60,
        host: "127.0.0.1".parse().unwrap(),
        port: 0, // unused, we bind to random port
        max_body_size: 1_048_576,
        log_level: "warn".to_string(),
    };

    let app = parlour::build_app(pool.clone(), config);

    // Bind to random port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server failed");
    });

    let client = Client::builder().build().unwrap();

    TestApp {
        addr,
        pool,
        client,
        db_name,
    }
}

/// Drop a test database by name.
pub async fn drop_database(db_name: &str) {
    let base_url = std::env::var("DATABASE_URL")
        .expect("DATABASE_URL must be set for tests");

    let admin_pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&admin_url(&base_url))
        .await
        .expect("Failed to connect for cleanup");

    let _ = sqlx::query(&format!("DROP DATABASE IF EXISTS \"{db_name}\" WITH (FORCE)"))
        .execute(&admin_pool)
        .await;

    admin_pool.close().await;
}

/// Drop the test database after tests complete.
pub async fn cleanup(app: TestApp) {
    let db_name = app.db_name.clone();
    app.pool.close().await;
    drop_database(&db_name).await;
}
