//! Integration tests for registration, login and logout.

use catalog_integration_tests::{TestApp, location};
use reqwest::StatusCode;

// ============================================================================
// Registration
// ============================================================================

#[tokio::test]
async fn test_register_redirects_to_login() {
    let app = TestApp::spawn().await;
    let client = TestApp::client();

    let resp = app.register(&client, "alice", "hunter2", "hunter2").await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), Some("/login"));
}

#[tokio::test]
async fn test_duplicate_registration_always_fails() {
    let app = TestApp::spawn().await;
    let client = TestApp::client();

    let first = app.register(&client, "alice", "hunter2", "hunter2").await;
    assert_eq!(first.status(), StatusCode::SEE_OTHER);

    for password in ["hunter2", "different", "another-one"] {
        let resp = app.register(&client, "alice", password, password).await;
        assert_eq!(resp.status(), StatusCode::CONFLICT);
        assert_eq!(
            resp.text().await.expect("body"),
            "Username is already taken"
        );
    }

    // Surrounding whitespace does not make a new username
    let resp = app.register(&client, "  alice ", "x", "x").await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_mismatched_passwords_are_rejected() {
    let app = TestApp::spawn().await;
    let client = TestApp::client();

    for (password, confirm) in [("a", "b"), ("hunter2", "hunter3"), ("secret", "")] {
        let resp = app.register(&client, "bob", password, confirm).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(resp.text().await.expect("body"), "Passwords do not match");
    }

    // None of the attempts created the account
    let resp = app.login(&client, "bob", "a").await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_blank_username_is_rejected() {
    let app = TestApp::spawn().await;
    let client = TestApp::client();

    let resp = app.register(&client, "   ", "pw", "pw").await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_missing_form_field_is_rejected() {
    let app = TestApp::spawn().await;
    let client = TestApp::client();

    let resp = app
        .post_form(&client, "/register", &[("username", "carol"), ("password", "pw")])
        .await;
    assert!(resp.status().is_client_error());
}

// ============================================================================
// Login
// ============================================================================

#[tokio::test]
async fn test_password_verifies_only_with_itself() {
    let app = TestApp::spawn().await;
    let client = TestApp::client();
    app.register(&client, "alice", "correct horse", "correct horse")
        .await;

    for wrong in ["Correct horse", "correct horse ", "", "battery staple"] {
        let resp = app.login(&client, "alice", wrong).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED, "password {wrong:?}");
    }

    let resp = app.login(&client, "alice", "correct horse").await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), Some("/"));
}

#[tokio::test]
async fn test_unknown_user_and_wrong_password_look_the_same() {
    let app = TestApp::spawn().await;
    let client = TestApp::client();
    app.register(&client, "alice", "hunter2", "hunter2").await;

    let wrong_password = app.login(&client, "alice", "nope").await;
    let unknown_user = app.login(&client, "mallory", "hunter2").await;

    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_user.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        wrong_password.text().await.expect("body"),
        unknown_user.text().await.expect("body")
    );
}

#[tokio::test]
async fn test_logged_in_username_is_shown() {
    let app = TestApp::spawn().await;
    let client = TestApp::client();
    app.register(&client, "alice", "hunter2", "hunter2").await;
    app.login(&client, "alice", "hunter2").await;

    let body = app.get(&client, "/").await.text().await.expect("body");
    assert!(body.contains("Signed in as <strong>alice</strong>"));

    let anonymous = TestApp::client();
    let body = app.get(&anonymous, "/").await.text().await.expect("body");
    assert!(!body.contains("Signed in as"));
}

// ============================================================================
// Logout
// ============================================================================

#[tokio::test]
async fn test_second_logout_fails() {
    let app = TestApp::spawn().await;
    let client = TestApp::client();
    app.register(&client, "alice", "hunter2", "hunter2").await;
    let resp = app.login(&client, "alice", "hunter2").await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    let first = app.get(&client, "/logout").await;
    assert_eq!(first.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&first), Some("/"));

    let second = app.get(&client, "/logout").await;
    assert_eq!(second.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(second.text().await.expect("body"), "Login required");
}

#[tokio::test]
async fn test_logout_without_login_fails() {
    let app = TestApp::spawn().await;
    let client = TestApp::client();

    let resp = app.get(&client, "/logout").await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}
