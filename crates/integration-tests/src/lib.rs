//! Integration tests for the product catalog.
//!
//! Each test starts its own server on an ephemeral port, backed by a fresh
//! in-memory `SQLite` database, and talks to it over HTTP with a cookie-aware
//! client.
//!
//! Run with: `cargo test -p catalog-integration-tests`

#![allow(clippy::expect_used, clippy::missing_panics_doc)]

use std::net::SocketAddr;

use reqwest::{Client, Response, redirect};
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;

use catalog_core::Price;
use catalog_web::config::CatalogConfig;
use catalog_web::db::ProductRepository;
use catalog_web::state::AppState;
use catalog_web::{db, routes};

/// High-entropy secret that passes config validation.
pub const TEST_SESSION_SECRET: &str =
    "aB3$xY9!mK2@nL5#pQ7&rT0*uW4^zC6-dF8+gH1=jM3~kN5?qR7%sV9<tX2>wZ4.";

/// A running catalog server plus a direct handle to its database.
pub struct TestApp {
    pub addr: SocketAddr,
    pub pool: SqlitePool,
}

impl TestApp {
    /// Start a server on `127.0.0.1:0` with an empty database.
    pub async fn spawn() -> Self {
        // One connection: every connection to `sqlite::memory:` is a separate database.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("Failed to open in-memory database");
        db::migrate(&pool).await.expect("Failed to run migrations");

        let config = CatalogConfig::from_lookup(|key| match key {
            "CATALOG_SESSION_SECRET" => Some(TEST_SESSION_SECRET.to_string()),
            "CATALOG_PORT" => Some("0".to_string()),
            _ => None,
        })
        .expect("Failed to build test configuration");

        let listener = tokio::net::TcpListener::bind(config.socket_addr())
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Failed to read local address");

        let state = AppState::new(config, pool.clone()).expect("Failed to build state");
        let app = routes::app(state);

        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Test server error");
        });

        Self { addr, pool }
    }

    /// Absolute URL for a path on this server.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    /// A fresh client with its own cookie jar that does not follow redirects.
    #[must_use]
    pub fn client() -> Client {
        Client::builder()
            .cookie_store(true)
            .redirect(redirect::Policy::none())
            .build()
            .expect("Failed to create HTTP client")
    }

    pub async fn get(&self, client: &Client, path: &str) -> Response {
        client
            .get(self.url(path))
            .send()
            .await
            .expect("GET request failed")
    }

    pub async fn post_form(&self, client: &Client, path: &str, form: &[(&str, &str)]) -> Response {
        client
            .post(self.url(path))
            .form(form)
            .send()
            .await
            .expect("POST request failed")
    }

    pub async fn register(
        &self,
        client: &Client,
        username: &str,
        password: &str,
        confirm_password: &str,
    ) -> Response {
        self.post_form(
            client,
            "/register",
            &[
                ("username", username),
                ("password", password),
                ("confirm_password", confirm_password),
            ],
        )
        .await
    }

    pub async fn login(&self, client: &Client, username: &str, password: &str) -> Response {
        self.post_form(
            client,
            "/login",
            &[("username", username), ("password", password)],
        )
        .await
    }

    pub async fn create_product(
        &self,
        client: &Client,
        name: &str,
        description: &str,
        price: &str,
    ) -> Response {
        self.post_form(
            client,
            "/create_product",
            &[("name", name), ("description", description), ("price", price)],
        )
        .await
    }

    /// Number of stored products.
    pub async fn product_count(&self) -> i64 {
        ProductRepository::new(&self.pool)
            .count()
            .await
            .expect("Failed to count products")
    }

    /// Stored price text for the named product, if any.
    pub async fn stored_price(&self, name: &str) -> Option<String> {
        sqlx::query_scalar("SELECT price FROM products WHERE name = ?")
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .expect("Failed to read product price")
    }

    /// Stored price for the named product, parsed back into a [`Price`].
    pub async fn stored_price_value(&self, name: &str) -> Option<Price> {
        self.stored_price(name)
            .await
            .map(|raw| Price::parse(&raw).expect("Stored price must parse"))
    }
}

/// Read the `Location` header of a redirect.
#[must_use]
pub fn location(response: &Response) -> Option<&str> {
    response
        .headers()
        .get(reqwest::header::LOCATION)
        .and_then(|v| v.to_str().ok())
}
