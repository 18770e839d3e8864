//! Integration tests for listing and creating products.

use catalog_core::Price;
use catalog_integration_tests::{TestApp, location};
use reqwest::StatusCode;

#[tokio::test]
async fn test_health_endpoints() {
    let app = TestApp::spawn().await;
    let client = TestApp::client();

    let resp = app.get(&client, "/health").await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.text().await.expect("body"), "ok");

    let resp = app.get(&client, "/health/ready").await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_empty_catalog_renders() {
    let app = TestApp::spawn().await;
    let client = TestApp::client();

    let resp = app.get(&client, "/").await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.text().await.expect("body").contains("No products yet"));
}

#[tokio::test]
async fn test_forms_render() {
    let app = TestApp::spawn().await;
    let client = TestApp::client();

    for path in ["/login", "/register", "/create_product"] {
        let resp = app.get(&client, path).await;
        assert_eq!(resp.status(), StatusCode::OK, "GET {path}");
        let body = resp.text().await.expect("body");
        assert!(body.contains(&format!("action=\"{path}\"")), "form on {path}");
    }
}

#[tokio::test]
async fn test_created_product_is_listed_with_exact_price() {
    let app = TestApp::spawn().await;
    let client = TestApp::client();

    let resp = app.create_product(&client, "Widget", "A widget", "9.99").await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), Some("/"));

    assert_eq!(app.product_count().await, 1);
    assert_eq!(app.stored_price("Widget").await.as_deref(), Some("9.99"));
    assert_eq!(
        app.stored_price_value("Widget").await,
        Some(Price::parse("9.99").expect("valid price"))
    );

    let body = app.get(&client, "/").await.text().await.expect("body");
    assert!(body.contains("<td>Widget</td>"));
    assert!(body.contains("<td>A widget</td>"));
    assert!(body.contains("<td class=\"price\">9.99</td>"));
}

#[tokio::test]
async fn test_products_are_listed_in_creation_order() {
    let app = TestApp::spawn().await;
    let client = TestApp::client();

    app.create_product(&client, "First", "one", "1").await;
    app.create_product(&client, "Second", "two", "2.5").await;

    let body = app.get(&client, "/").await.text().await.expect("body");
    let first = body.find("First").expect("first listed");
    let second = body.find("Second").expect("second listed");
    assert!(first < second);
    assert!(body.contains("1.00"));
    assert!(body.contains("2.50"));
}

#[tokio::test]
async fn test_non_numeric_price_is_rejected() {
    let app = TestApp::spawn().await;
    let client = TestApp::client();
    app.create_product(&client, "Widget", "A widget", "9.99").await;

    let resp = app.create_product(&client, "Gadget", "A gadget", "abc").await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(resp.text().await.expect("body").contains("price"));

    assert_eq!(app.product_count().await, 1);
    assert_eq!(app.stored_price("Gadget").await, None);
}

#[tokio::test]
async fn test_negative_and_overly_precise_prices_are_rejected() {
    let app = TestApp::spawn().await;
    let client = TestApp::client();

    for price in ["-1", "-0.01", "1.999", "0.001", "", "  "] {
        let resp = app.create_product(&client, "Widget", "A widget", price).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "price {price:?}");
    }

    assert_eq!(app.product_count().await, 0);
}

#[tokio::test]
async fn test_oversized_price_is_rejected_and_catalog_stays_readable() {
    let app = TestApp::spawn().await;
    let client = TestApp::client();
    app.create_product(&client, "Widget", "A widget", "9.99").await;

    for price in [
        "1000000000000000000000000000",
        "79228162514264337593543950335",
        "1000000000000000",
    ] {
        let resp = app.create_product(&client, "Huge", "Too big", price).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "price {price}");
        assert!(resp.text().await.expect("body").contains("at most"));
    }

    assert_eq!(app.product_count().await, 1);
    assert_eq!(app.stored_price("Huge").await, None);

    let resp = app.get(&client, "/").await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.text().await.expect("body").contains("9.99"));

    let max = Price::MAX.to_string();
    let resp = app.create_product(&client, "Dear", "Most expensive", &max).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        app.stored_price_value("Dear").await,
        Some(Price::from_decimal(Price::MAX).expect("max is valid"))
    );
    assert_eq!(app.get(&client, "/").await.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_blank_name_or_description_is_rejected() {
    let app = TestApp::spawn().await;
    let client = TestApp::client();

    let resp = app.create_product(&client, "  ", "A widget", "1").await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = app.create_product(&client, "Widget", "", "1").await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    assert_eq!(app.product_count().await, 0);
}

#[tokio::test]
async fn test_product_text_is_escaped() {
    let app = TestApp::spawn().await;
    let client = TestApp::client();

    app.create_product(&client, "<b>Bold</b>", "<script>x</script>", "1")
        .await;

    let body = app.get(&client, "/").await.text().await.expect("body");
    assert!(!body.contains("<script>x</script>"));
    assert!(body.contains("&lt;b&gt;Bold"));
}

#[tokio::test]
async fn test_security_and_request_id_headers() {
    let app = TestApp::spawn().await;
    let client = TestApp::client();

    let resp = app.get(&client, "/").await;
    let headers = resp.headers();
    assert_eq!(headers.get("x-frame-options").expect("frame"), "DENY");
    assert_eq!(
        headers.get("x-content-type-options").expect("nosniff"),
        "nosniff"
    );
    assert!(headers.get("content-security-policy").is_some());
    assert!(headers.get("x-request-id").is_some());

    let resp = client
        .get(app.url("/health"))
        .header("x-request-id", "upstream-42")
        .send()
        .await
        .expect("request");
    assert_eq!(resp.headers().get("x-request-id").expect("id"), "upstream-42");
}
