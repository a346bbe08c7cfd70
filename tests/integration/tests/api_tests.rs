//! End-to-end API tests.
//!
//! These tests require running PostgreSQL and Redis instances, configured
//! through the environment (a `.env` file works):
//!
//! ```text
//! DATABASE_URL=postgres://... REDIS_URL=redis://... JWT_SECRET=... \
//!     cargo test -p integration-tests --test api_tests
//! ```
//!
//! Tests skip themselves when the backing services are not configured. Data
//! is never cleaned up; every fixture uses process-unique values so suites
//! can run repeatedly against the same database.

use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use serde_json::Value;

use integration_tests::{
    assert_json, assert_status, check_test_env, create_post, signup, test_config, unique_suffix,
    AuthResponse, CommentResponse, CreateCommentRequest, CreatePostRequest, CurrentUserResponse,
    DetailResponse, ErrorResponse, LoginRequest, PostDetailResponse, PostResponse,
    RefreshTokenRequest, RegisterRequest, SchedulePostRequest, ScheduledPostResponse, TestServer,
    UpdatePostRequest, UpdateUserRequest, UserResponse,
};

// ===== Health Tests =====

#[tokio::test]
async fn test_health_check() {
    if !check_test_env().await {
        return;
    }
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server.get("/health").await.expect("Request failed");
    let body: Value = assert_json(response, StatusCode::OK).await.expect("Bad body");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_readiness_check() {
    if !check_test_env().await {
        return;
    }
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server.get("/health/ready").await.expect("Request failed");
    let body: Value = assert_json(response, StatusCode::OK).await.expect("Bad body");
    assert_eq!(body["status"], "ready");
    assert_eq!(body["checks"]["database"], "healthy");
    assert_eq!(body["checks"]["redis"], "healthy");
}

#[tokio::test]
async fn test_requests_carry_request_id() {
    if !check_test_env().await {
        return;
    }
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server.get("/api/v1/users").await.expect("Request failed");
    assert_status(&response, StatusCode::UNAUTHORIZED);
    assert!(response.headers().contains_key("x-request-id"));
}

// ===== Auth Tests =====

#[tokio::test]
async fn test_register_new_user() {
    if !check_test_env().await {
        return;
    }
    let server = TestServer::start().await.expect("Failed to start server");

    let request = RegisterRequest::unique();
    let response = server
        .post("/api/v1/register", &request)
        .await
        .expect("Request failed");
    let user: UserResponse = assert_json(response, StatusCode::CREATED).await.expect("Bad body");

    assert_eq!(user.email, request.email);
    assert_eq!(Some(user.first_name.as_str()), request.first_name.as_deref());
    assert!(user.photo.is_none());
}

#[tokio::test]
async fn test_register_does_not_issue_tokens() {
    if !check_test_env().await {
        return;
    }
    let server = TestServer::start().await.expect("Failed to start server");

    let request = RegisterRequest::unique();
    let response = server
        .post("/api/v1/register", &request)
        .await
        .expect("Request failed");
    let body: Value = assert_json(response, StatusCode::CREATED).await.expect("Bad body");

    assert_eq!(body["email"], request.email.as_str());
    assert!(body.get("access_token").is_none());
    assert!(body.get("refresh_token").is_none());
}

#[tokio::test]
async fn test_register_duplicate_email() {
    if !check_test_env().await {
        return;
    }
    let server = TestServer::start().await.expect("Failed to start server");

    let request = RegisterRequest::unique();
    let response = server
        .post("/api/v1/register", &request)
        .await
        .expect("Request failed");
    assert_status(&response, StatusCode::CREATED);

    let response = server
        .post("/api/v1/register", &request)
        .await
        .expect("Request failed");
    let error: ErrorResponse = assert_json(response, StatusCode::CONFLICT).await.expect("Bad body");
    assert_eq!(error.code, "EMAIL_ALREADY_EXISTS");
}

#[tokio::test]
async fn test_register_duplicate_email_case_insensitive() {
    if !check_test_env().await {
        return;
    }
    let server = TestServer::start().await.expect("Failed to start server");

    let mut request = RegisterRequest::unique();
    let response = server
        .post("/api/v1/register", &request)
        .await
        .expect("Request failed");
    assert_status(&response, StatusCode::CREATED);

    request.email = request.email.to_uppercase();
    let response = server
        .post("/api/v1/register", &request)
        .await
        .expect("Request failed");
    assert_status(&response, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_register_rejects_invalid_email() {
    if !check_test_env().await {
        return;
    }
    let server = TestServer::start().await.expect("Failed to start server");

    let request = RegisterRequest {
        email: "not-an-email".to_string(),
        password: "TestPass123".to_string(),
        first_name: None,
        last_name: None,
    };
    let response = server
        .post("/api/v1/register", &request)
        .await
        .expect("Request failed");
    let error: ErrorResponse = assert_json(response, StatusCode::BAD_REQUEST)
        .await
        .expect("Bad body");
    assert_eq!(error.code, "VALIDATION_ERROR");
    assert!(error.fields.is_some());
}

#[tokio::test]
async fn test_register_rejects_weak_password() {
    if !check_test_env().await {
        return;
    }
    let server = TestServer::start().await.expect("Failed to start server");

    // Long enough to pass shape validation, but without a digit.
    let mut request = RegisterRequest::unique();
    request.password = "passwordonly".to_string();
    let response = server
        .post("/api/v1/register", &request)
        .await
        .expect("Request failed");
    let error: ErrorResponse = assert_json(response, StatusCode::BAD_REQUEST)
        .await
        .expect("Bad body");
    assert_eq!(error.code, "WEAK_PASSWORD");
}

#[tokio::test]
async fn test_login_returns_token_pair() {
    if !check_test_env().await {
        return;
    }
    let server = TestServer::start().await.expect("Failed to start server");

    let request = RegisterRequest::unique();
    let response = server
        .post("/api/v1/register", &request)
        .await
        .expect("Request failed");
    assert_status(&response, StatusCode::CREATED);

    let response = server
        .post("/api/v1/login", &LoginRequest::from_register(&request))
        .await
        .expect("Request failed");
    let auth: AuthResponse = assert_json(response, StatusCode::OK).await.expect("Bad body");

    assert_eq!(auth.token_type, "Bearer");
    assert!(auth.expires_in > 0);
    assert!(!auth.access_token.is_empty());
    assert!(!auth.refresh_token.is_empty());
    assert_eq!(auth.user.email, request.email);
    assert!(auth.user.subscriptions.is_empty());
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    if !check_test_env().await {
        return;
    }
    let server = TestServer::start().await.expect("Failed to start server");

    let user = signup(&server).await.expect("Failed to sign up");

    let wrong_password = LoginRequest {
        email: user.credentials.email.clone(),
        password: "WrongPass123".to_string(),
    };
    let response = server
        .post("/api/v1/login", &wrong_password)
        .await
        .expect("Request failed");
    let first: ErrorResponse = assert_json(response, StatusCode::UNAUTHORIZED)
        .await
        .expect("Bad body");

    let unknown_email = LoginRequest {
        email: format!("absent{}@example.com", unique_suffix()),
        password: "WrongPass123".to_string(),
    };
    let response = server
        .post("/api/v1/login", &unknown_email)
        .await
        .expect("Request failed");
    let second: ErrorResponse = assert_json(response, StatusCode::UNAUTHORIZED)
        .await
        .expect("Bad body");

    // Unknown email and wrong password must produce the same body.
    assert_eq!(first.detail, second.detail);
    assert_eq!(first.code, second.code);
}

#[tokio::test]
async fn test_refresh_rotates_tokens() {
    if !check_test_env().await {
        return;
    }
    let server = TestServer::start().await.expect("Failed to start server");

    let user = signup(&server).await.expect("Failed to sign up");
    let old_refresh = user.auth.refresh_token.clone();

    let response = server
        .post(
            "/api/v1/refresh",
            &RefreshTokenRequest {
                refresh_token: old_refresh.clone(),
            },
        )
        .await
        .expect("Request failed");
    let rotated: AuthResponse = assert_json(response, StatusCode::OK).await.expect("Bad body");
    assert_ne!(rotated.refresh_token, old_refresh);

    // The freshly issued access token is live.
    let response = server
        .get_auth("/api/v1/users/me", &rotated.access_token)
        .await
        .expect("Request failed");
    assert_status(&response, StatusCode::OK);

    // The consumed refresh token cannot be replayed.
    let response = server
        .post(
            "/api/v1/refresh",
            &RefreshTokenRequest {
                refresh_token: old_refresh,
            },
        )
        .await
        .expect("Request failed");
    assert_status(&response, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_refresh_rejects_garbage_token() {
    if !check_test_env().await {
        return;
    }
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server
        .post(
            "/api/v1/refresh",
            &RefreshTokenRequest {
                refresh_token: "not-a-token".to_string(),
            },
        )
        .await
        .expect("Request failed");
    assert_status(&response, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_revokes_sessions() {
    if !check_test_env().await {
        return;
    }
    let server = TestServer::start().await.expect("Failed to start server");

    let user = signup(&server).await.expect("Failed to sign up");

    let response = server
        .post_auth_empty("/api/v1/logout", user.token())
        .await
        .expect("Request failed");
    let body: DetailResponse = assert_json(response, StatusCode::OK).await.expect("Bad body");
    assert_eq!(body.detail, "Logged out");

    // The access token dies immediately, not at expiry.
    let response = server
        .get_auth("/api/v1/users/me", user.token())
        .await
        .expect("Request failed");
    assert_status(&response, StatusCode::UNAUTHORIZED);

    // Every refresh session is revoked as well.
    let response = server
        .post(
            "/api/v1/refresh",
            &RefreshTokenRequest {
                refresh_token: user.auth.refresh_token.clone(),
            },
        )
        .await
        .expect("Request failed");
    assert_status(&response, StatusCode::UNAUTHORIZED);
}

// ===== Profile Tests =====

#[tokio::test]
async fn test_get_current_user() {
    if !check_test_env().await {
        return;
    }
    let server = TestServer::start().await.expect("Failed to start server");

    let user = signup(&server).await.expect("Failed to sign up");
    let response = server
        .get_auth("/api/v1/users/me", user.token())
        .await
        .expect("Request failed");
    let profile: CurrentUserResponse = assert_json(response, StatusCode::OK).await.expect("Bad body");

    assert_eq!(profile.id, user.id());
    assert_eq!(profile.email, user.credentials.email);
    assert!(!profile.is_staff);
    assert!(!profile.is_superuser);
    assert!(profile.bio.is_none());
}

#[tokio::test]
async fn test_current_user_requires_auth() {
    if !check_test_env().await {
        return;
    }
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server.get("/api/v1/users/me").await.expect("Request failed");
    assert_status(&response, StatusCode::UNAUTHORIZED);

    let response = server
        .get_auth("/api/v1/users/me", "not-a-jwt")
        .await
        .expect("Request failed");
    assert_status(&response, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_update_profile_patch() {
    if !check_test_env().await {
        return;
    }
    let server = TestServer::start().await.expect("Failed to start server");

    let user = signup(&server).await.expect("Failed to sign up");
    let update = UpdateUserRequest {
        first_name: Some("Updated".to_string()),
        bio: Some("Writes tests".to_string()),
        ..UpdateUserRequest::default()
    };
    let response = server
        .patch_auth("/api/v1/users/me", user.token(), &update)
        .await
        .expect("Request failed");
    let profile: CurrentUserResponse = assert_json(response, StatusCode::OK).await.expect("Bad body");

    assert_eq!(profile.first_name, "Updated");
    assert_eq!(profile.bio.as_deref(), Some("Writes tests"));
    // Absent fields are untouched.
    assert_eq!(profile.email, user.credentials.email);

    let response = server
        .get_auth("/api/v1/users/me", user.token())
        .await
        .expect("Request failed");
    let persisted: CurrentUserResponse = assert_json(response, StatusCode::OK).await.expect("Bad body");
    assert_eq!(persisted.first_name, "Updated");
}

#[tokio::test]
async fn test_update_profile_put_has_patch_semantics() {
    if !check_test_env().await {
        return;
    }
    let server = TestServer::start().await.expect("Failed to start server");

    let user = signup(&server).await.expect("Failed to sign up");
    let update = UpdateUserRequest {
        last_name: Some("Renamed".to_string()),
        ..UpdateUserRequest::default()
    };
    let response = server
        .put_auth("/api/v1/users/me", user.token(), &update)
        .await
        .expect("Request failed");
    let profile: CurrentUserResponse = assert_json(response, StatusCode::OK).await.expect("Bad body");

    assert_eq!(profile.last_name, "Renamed");
    assert_eq!(Some(profile.first_name.as_str()), user.credentials.first_name.as_deref());
}

#[tokio::test]
async fn test_update_profile_rejects_taken_email() {
    if !check_test_env().await {
        return;
    }
    let server = TestServer::start().await.expect("Failed to start server");

    let first = signup(&server).await.expect("Failed to sign up");
    let second = signup(&server).await.expect("Failed to sign up");

    let update = UpdateUserRequest {
        email: Some(first.credentials.email.clone()),
        ..UpdateUserRequest::default()
    };
    let response = server
        .patch_auth("/api/v1/users/me", second.token(), &update)
        .await
        .expect("Request failed");
    let error: ErrorResponse = assert_json(response, StatusCode::CONFLICT).await.expect("Bad body");
    assert_eq!(error.code, "EMAIL_ALREADY_EXISTS");
}

#[tokio::test]
async fn test_rejected_update_does_not_rotate_password() {
    if !check_test_env().await {
        return;
    }
    let server = TestServer::start().await.expect("Failed to start server");

    let first = signup(&server).await.expect("Failed to sign up");
    let second = signup(&server).await.expect("Failed to sign up");

    // Combined email + password change, rejected on the taken email.
    let update = UpdateUserRequest {
        email: Some(first.credentials.email.clone()),
        password: Some("RotatedPass456".to_string()),
        ..UpdateUserRequest::default()
    };
    let response = server
        .patch_auth("/api/v1/users/me", second.token(), &update)
        .await
        .expect("Request failed");
    assert_status(&response, StatusCode::CONFLICT);

    // The old password still works and the requested one never took.
    let response = server
        .post("/api/v1/login", &LoginRequest::from_register(&second.credentials))
        .await
        .expect("Request failed");
    let _auth: AuthResponse = assert_json(response, StatusCode::OK).await.expect("Bad body");

    let stale = LoginRequest {
        email: second.credentials.email.clone(),
        password: "RotatedPass456".to_string(),
    };
    let response = server.post("/api/v1/login", &stale).await.expect("Request failed");
    assert_status(&response, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_delete_account() {
    if !check_test_env().await {
        return;
    }
    let server = TestServer::start().await.expect("Failed to start server");

    let user = signup(&server).await.expect("Failed to sign up");
    let response = server
        .delete_auth("/api/v1/users/me", user.token())
        .await
        .expect("Request failed");
    assert_status(&response, StatusCode::NO_CONTENT);

    // Credentials are gone.
    let response = server
        .post("/api/v1/login", &LoginRequest::from_register(&user.credentials))
        .await
        .expect("Request failed");
    assert_status(&response, StatusCode::UNAUTHORIZED);
}

// ===== User Listing Tests =====

#[tokio::test]
async fn test_list_users_email_filter_is_case_insensitive() {
    if !check_test_env().await {
        return;
    }
    let server = TestServer::start().await.expect("Failed to start server");

    let user = signup(&server).await.expect("Failed to sign up");
    let query = format!("/api/v1/users?email={}", user.credentials.email.to_uppercase());
    let response = server
        .get_auth(&query, user.token())
        .await
        .expect("Request failed");
    let users: Vec<UserResponse> = assert_json(response, StatusCode::OK).await.expect("Bad body");

    assert_eq!(users.len(), 1);
    assert_eq!(users[0].id, user.id());
}

#[tokio::test]
async fn test_list_users_name_filter_matches_substring() {
    if !check_test_env().await {
        return;
    }
    let server = TestServer::start().await.expect("Failed to start server");

    let user = signup(&server).await.expect("Failed to sign up");
    // "Fn<suffix>" matched by the lowercased tail "n<suffix>".
    let needle = user.credentials.first_name.as_deref().expect("fixture has first name")
        [1..]
        .to_lowercase();
    let response = server
        .get_auth(&format!("/api/v1/users?first_name={needle}"), user.token())
        .await
        .expect("Request failed");
    let users: Vec<UserResponse> = assert_json(response, StatusCode::OK).await.expect("Bad body");

    assert_eq!(users.len(), 1);
    assert_eq!(users[0].id, user.id());
}

#[tokio::test]
async fn test_get_user_by_id() {
    if !check_test_env().await {
        return;
    }
    let server = TestServer::start().await.expect("Failed to start server");

    let viewer = signup(&server).await.expect("Failed to sign up");
    let target = signup(&server).await.expect("Failed to sign up");

    let response = server
        .get_auth(&format!("/api/v1/users/{}", target.id()), viewer.token())
        .await
        .expect("Request failed");
    let user: UserResponse = assert_json(response, StatusCode::OK).await.expect("Bad body");
    assert_eq!(user.email, target.credentials.email);
}

#[tokio::test]
async fn test_get_unknown_user_is_404() {
    if !check_test_env().await {
        return;
    }
    let server = TestServer::start().await.expect("Failed to start server");

    let viewer = signup(&server).await.expect("Failed to sign up");
    let response = server
        .get_auth("/api/v1/users/999999999999", viewer.token())
        .await
        .expect("Request failed");
    assert_status(&response, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_malformed_user_id_is_400() {
    if !check_test_env().await {
        return;
    }
    let server = TestServer::start().await.expect("Failed to start server");

    let viewer = signup(&server).await.expect("Failed to sign up");
    let response = server
        .get_auth("/api/v1/users/abc", viewer.token())
        .await
        .expect("Request failed");
    assert_status(&response, StatusCode::BAD_REQUEST);
}

// ===== Subscription Tests =====

#[tokio::test]
async fn test_subscribe_lifecycle() {
    if !check_test_env().await {
        return;
    }
    let server = TestServer::start().await.expect("Failed to start server");

    let follower = signup(&server).await.expect("Failed to sign up");
    let target = signup(&server).await.expect("Failed to sign up");
    let subscribe_path = format!("/api/v1/users/{}/subscribe", target.id());
    let unsubscribe_path = format!("/api/v1/users/{}/unsubscribe", target.id());

    // First subscribe creates.
    let response = server
        .post_auth_empty(&subscribe_path, follower.token())
        .await
        .expect("Request failed");
    let body: DetailResponse = assert_json(response, StatusCode::CREATED).await.expect("Bad body");
    assert_eq!(
        body.detail,
        format!("You are now subscribed to {}", target.email())
    );

    // Repeat is a no-op.
    let response = server
        .post_auth_empty(&subscribe_path, follower.token())
        .await
        .expect("Request failed");
    let body: DetailResponse = assert_json(response, StatusCode::OK).await.expect("Bad body");
    assert_eq!(body.detail, "Already subscribed");

    // The subscription shows up on the follower's own profile.
    let response = server
        .get_auth("/api/v1/users/me", follower.token())
        .await
        .expect("Request failed");
    let profile: CurrentUserResponse = assert_json(response, StatusCode::OK).await.expect("Bad body");
    assert!(profile.subscriptions.contains(&target.id().to_string()));

    // Unsubscribe removes it.
    let response = server
        .post_auth_empty(&unsubscribe_path, follower.token())
        .await
        .expect("Request failed");
    let body: DetailResponse = assert_json(response, StatusCode::OK).await.expect("Bad body");
    assert_eq!(
        body.detail,
        format!("You are unsubscribed from {}", target.email())
    );

    // Unsubscribing again reports the absent state, still 200.
    let response = server
        .post_auth_empty(&unsubscribe_path, follower.token())
        .await
        .expect("Request failed");
    let body: DetailResponse = assert_json(response, StatusCode::OK).await.expect("Bad body");
    assert_eq!(
        body.detail,
        format!("You are not subscribed to {}", target.email())
    );
}

#[tokio::test]
async fn test_subscribe_to_self_is_rejected() {
    if !check_test_env().await {
        return;
    }
    let server = TestServer::start().await.expect("Failed to start server");

    let user = signup(&server).await.expect("Failed to sign up");
    let response = server
        .post_auth_empty(&format!("/api/v1/users/{}/subscribe", user.id()), user.token())
        .await
        .expect("Request failed");
    let error: ErrorResponse = assert_json(response, StatusCode::BAD_REQUEST)
        .await
        .expect("Bad body");
    assert_eq!(error.detail, "You cannot subscribe to yourself");
}

#[tokio::test]
async fn test_subscribe_to_unknown_user_is_404() {
    if !check_test_env().await {
        return;
    }
    let server = TestServer::start().await.expect("Failed to start server");

    let user = signup(&server).await.expect("Failed to sign up");
    let response = server
        .post_auth_empty("/api/v1/users/999999999999/subscribe", user.token())
        .await
        .expect("Request failed");
    assert_status(&response, StatusCode::NOT_FOUND);
}

// ===== Post Tests =====

#[tokio::test]
async fn test_create_post_with_tags() {
    if !check_test_env().await {
        return;
    }
    let server = TestServer::start().await.expect("Failed to start server");

    let user = signup(&server).await.expect("Failed to sign up");
    let suffix = unique_suffix();
    let request = CreatePostRequest::with_tags(
        &format!("First post {suffix}"),
        vec![format!("Rust Lang {suffix}"), format!("Async {suffix}")],
    );
    let response = server
        .post_auth("/api/v1/posts", user.token(), &request)
        .await
        .expect("Request failed");
    let post: PostResponse = assert_json(response, StatusCode::CREATED).await.expect("Bad body");

    assert_eq!(post.title, request.title);
    assert_eq!(post.author.id, user.id());
    assert_eq!(post.like_count, 0);
    // Tag names are slugified and come back sorted.
    let names: Vec<&str> = post.tags.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec![
        format!("async-{suffix}").as_str(),
        format!("rust-lang-{suffix}").as_str(),
    ]);
}

#[tokio::test]
async fn test_tags_resolve_to_one_row_per_slug() {
    if !check_test_env().await {
        return;
    }
    let server = TestServer::start().await.expect("Failed to start server");

    let user = signup(&server).await.expect("Failed to sign up");
    let suffix = unique_suffix();

    let request = CreatePostRequest::with_tags(
        &format!("Casing {suffix}"),
        vec![format!("Topic {suffix}")],
    );
    let response = server
        .post_auth("/api/v1/posts", user.token(), &request)
        .await
        .expect("Request failed");
    let first: PostResponse = assert_json(response, StatusCode::CREATED).await.expect("Bad body");

    let request = CreatePostRequest::with_tags(
        &format!("Casing again {suffix}"),
        vec![format!("topic-{suffix}")],
    );
    let response = server
        .post_auth("/api/v1/posts", user.token(), &request)
        .await
        .expect("Request failed");
    let second: PostResponse = assert_json(response, StatusCode::CREATED).await.expect("Bad body");

    // Same slug, same tag row.
    assert_eq!(first.tags[0].id, second.tags[0].id);
    assert_eq!(first.tags[0].name, format!("topic-{suffix}"));
}

#[tokio::test]
async fn test_create_post_rejects_empty_title() {
    if !check_test_env().await {
        return;
    }
    let server = TestServer::start().await.expect("Failed to start server");

    let user = signup(&server).await.expect("Failed to sign up");
    let response = server
        .post_auth("/api/v1/posts", user.token(), &CreatePostRequest::new(""))
        .await
        .expect("Request failed");
    let error: ErrorResponse = assert_json(response, StatusCode::BAD_REQUEST)
        .await
        .expect("Bad body");
    assert_eq!(error.code, "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_posts_listed_in_title_order() {
    if !check_test_env().await {
        return;
    }
    let server = TestServer::start().await.expect("Failed to start server");

    let user = signup(&server).await.expect("Failed to sign up");
    let base = format!("order{}", unique_suffix());
    // Created out of order on purpose.
    create_post(&server, user.token(), &format!("{base} c")).await.expect("Failed to create post");
    create_post(&server, user.token(), &format!("{base} a")).await.expect("Failed to create post");
    create_post(&server, user.token(), &format!("{base} b")).await.expect("Failed to create post");

    let response = server
        .get_auth("/api/v1/posts?my=1", user.token())
        .await
        .expect("Request failed");
    let posts: Vec<PostResponse> = assert_json(response, StatusCode::OK).await.expect("Bad body");

    let titles: Vec<&str> = posts.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec![
        format!("{base} a").as_str(),
        format!("{base} b").as_str(),
        format!("{base} c").as_str(),
    ]);
}

#[tokio::test]
async fn test_equal_titles_tie_break_by_id() {
    if !check_test_env().await {
        return;
    }
    let server = TestServer::start().await.expect("Failed to start server");

    let user = signup(&server).await.expect("Failed to sign up");
    let title = format!("twin {}", unique_suffix());
    let first = create_post(&server, user.token(), &title).await.expect("Failed to create post");
    let second = create_post(&server, user.token(), &title).await.expect("Failed to create post");

    let response = server
        .get_auth("/api/v1/posts?my=1", user.token())
        .await
        .expect("Request failed");
    let posts: Vec<PostResponse> = assert_json(response, StatusCode::OK).await.expect("Bad body");

    assert_eq!(posts.len(), 2);
    assert_eq!(posts[0].id, first.id);
    assert_eq!(posts[1].id, second.id);
}

#[tokio::test]
async fn test_get_post_detail() {
    if !check_test_env().await {
        return;
    }
    let server = TestServer::start().await.expect("Failed to start server");

    let user = signup(&server).await.expect("Failed to sign up");
    let post = create_post(&server, user.token(), &format!("detail {}", unique_suffix()))
        .await
        .expect("Failed to create post");

    let response = server
        .get_auth(&format!("/api/v1/posts/{}", post.id), user.token())
        .await
        .expect("Request failed");
    let detail: PostDetailResponse = assert_json(response, StatusCode::OK).await.expect("Bad body");

    assert_eq!(detail.id, post.id);
    assert_eq!(detail.author.id, user.id());
    assert!(detail.comments.is_empty());
}

#[tokio::test]
async fn test_get_unknown_post_is_404() {
    if !check_test_env().await {
        return;
    }
    let server = TestServer::start().await.expect("Failed to start server");

    let user = signup(&server).await.expect("Failed to sign up");
    let response = server
        .get_auth("/api/v1/posts/999999999999", user.token())
        .await
        .expect("Request failed");
    assert_status(&response, StatusCode::NOT_FOUND);

    let response = server
        .get_auth("/api/v1/posts/xyz", user.token())
        .await
        .expect("Request failed");
    assert_status(&response, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_author_can_update_post() {
    if !check_test_env().await {
        return;
    }
    let server = TestServer::start().await.expect("Failed to start server");

    let user = signup(&server).await.expect("Failed to sign up");
    let post = create_post(&server, user.token(), &format!("before {}", unique_suffix()))
        .await
        .expect("Failed to create post");

    let update = UpdatePostRequest {
        title: Some(format!("after {}", unique_suffix())),
        ..UpdatePostRequest::default()
    };
    let response = server
        .patch_auth(&format!("/api/v1/posts/{}", post.id), user.token(), &update)
        .await
        .expect("Request failed");
    let updated: PostResponse = assert_json(response, StatusCode::OK).await.expect("Bad body");

    assert_eq!(Some(updated.title), update.title);
    assert_eq!(updated.content, post.content);
}

#[tokio::test]
async fn test_update_replaces_tag_set() {
    if !check_test_env().await {
        return;
    }
    let server = TestServer::start().await.expect("Failed to start server");

    let user = signup(&server).await.expect("Failed to sign up");
    let suffix = unique_suffix();
    let request = CreatePostRequest::with_tags(
        &format!("tagged {suffix}"),
        vec![format!("old-{suffix}")],
    );
    let response = server
        .post_auth("/api/v1/posts", user.token(), &request)
        .await
        .expect("Request failed");
    let post: PostResponse = assert_json(response, StatusCode::CREATED).await.expect("Bad body");

    let update = UpdatePostRequest {
        tags: Some(vec![format!("new-{suffix}")]),
        ..UpdatePostRequest::default()
    };
    let response = server
        .put_auth(&format!("/api/v1/posts/{}", post.id), user.token(), &update)
        .await
        .expect("Request failed");
    let updated: PostResponse = assert_json(response, StatusCode::OK).await.expect("Bad body");
    assert_eq!(updated.tags.len(), 1);
    assert_eq!(updated.tags[0].name, format!("new-{suffix}"));

    // An empty list detaches everything.
    let update = UpdatePostRequest {
        tags: Some(Vec::new()),
        ..UpdatePostRequest::default()
    };
    let response = server
        .put_auth(&format!("/api/v1/posts/{}", post.id), user.token(), &update)
        .await
        .expect("Request failed");
    let updated: PostResponse = assert_json(response, StatusCode::OK).await.expect("Bad body");
    assert!(updated.tags.is_empty());
}

#[tokio::test]
async fn test_non_author_update_is_403_not_404() {
    if !check_test_env().await {
        return;
    }
    let server = TestServer::start().await.expect("Failed to start server");

    let author = signup(&server).await.expect("Failed to sign up");
    let stranger = signup(&server).await.expect("Failed to sign up");
    let post = create_post(&server, author.token(), &format!("owned {}", unique_suffix()))
        .await
        .expect("Failed to create post");

    let update = UpdatePostRequest {
        title: Some("hijacked".to_string()),
        ..UpdatePostRequest::default()
    };
    let response = server
        .patch_auth(&format!("/api/v1/posts/{}", post.id), stranger.token(), &update)
        .await
        .expect("Request failed");
    let error: ErrorResponse = assert_json(response, StatusCode::FORBIDDEN).await.expect("Bad body");
    assert_eq!(error.code, "NOT_POST_AUTHOR");

    // A missing post stays distinguishable from a forbidden one.
    let response = server
        .patch_auth("/api/v1/posts/999999999999", stranger.token(), &update)
        .await
        .expect("Request failed");
    assert_status(&response, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_author_can_delete_post() {
    if !check_test_env().await {
        return;
    }
    let server = TestServer::start().await.expect("Failed to start server");

    let user = signup(&server).await.expect("Failed to sign up");
    let post = create_post(&server, user.token(), &format!("doomed {}", unique_suffix()))
        .await
        .expect("Failed to create post");

    let response = server
        .delete_auth(&format!("/api/v1/posts/{}", post.id), user.token())
        .await
        .expect("Request failed");
    assert_status(&response, StatusCode::NO_CONTENT);

    let response = server
        .get_auth(&format!("/api/v1/posts/{}", post.id), user.token())
        .await
        .expect("Request failed");
    assert_status(&response, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_non_author_delete_is_403() {
    if !check_test_env().await {
        return;
    }
    let server = TestServer::start().await.expect("Failed to start server");

    let author = signup(&server).await.expect("Failed to sign up");
    let stranger = signup(&server).await.expect("Failed to sign up");
    let post = create_post(&server, author.token(), &format!("kept {}", unique_suffix()))
        .await
        .expect("Failed to create post");

    let response = server
        .delete_auth(&format!("/api/v1/posts/{}", post.id), stranger.token())
        .await
        .expect("Request failed");
    assert_status(&response, StatusCode::FORBIDDEN);

    // Still there for the author.
    let response = server
        .get_auth(&format!("/api/v1/posts/{}", post.id), author.token())
        .await
        .expect("Request failed");
    assert_status(&response, StatusCode::OK);
}

// ===== Like Tests =====

#[tokio::test]
async fn test_like_lifecycle() {
    if !check_test_env().await {
        return;
    }
    let server = TestServer::start().await.expect("Failed to start server");

    let author = signup(&server).await.expect("Failed to sign up");
    let reader = signup(&server).await.expect("Failed to sign up");
    let post = create_post(&server, author.token(), &format!("likeable {}", unique_suffix()))
        .await
        .expect("Failed to create post");
    let like_path = format!("/api/v1/posts/{}/like", post.id);
    let unlike_path = format!("/api/v1/posts/{}/unlike", post.id);

    let response = server
        .post_auth_empty(&like_path, reader.token())
        .await
        .expect("Request failed");
    let body: DetailResponse = assert_json(response, StatusCode::CREATED).await.expect("Bad body");
    assert_eq!(body.detail, format!("You liked {}", post.title));

    let response = server
        .post_auth_empty(&like_path, reader.token())
        .await
        .expect("Request failed");
    let body: DetailResponse = assert_json(response, StatusCode::OK).await.expect("Bad body");
    assert_eq!(body.detail, "Already liked");

    // The double like counts once.
    let response = server
        .get_auth(&format!("/api/v1/posts/{}", post.id), reader.token())
        .await
        .expect("Request failed");
    let detail: PostDetailResponse = assert_json(response, StatusCode::OK).await.expect("Bad body");
    assert_eq!(detail.like_count, 1);

    let response = server
        .post_auth_empty(&unlike_path, reader.token())
        .await
        .expect("Request failed");
    let body: DetailResponse = assert_json(response, StatusCode::OK).await.expect("Bad body");
    assert_eq!(body.detail, format!("You unliked {}", post.title));

    let response = server
        .post_auth_empty(&unlike_path, reader.token())
        .await
        .expect("Request failed");
    let body: DetailResponse = assert_json(response, StatusCode::OK).await.expect("Bad body");
    assert_eq!(body.detail, format!("You have not liked {}", post.title));
}

#[tokio::test]
async fn test_cannot_like_own_post() {
    if !check_test_env().await {
        return;
    }
    let server = TestServer::start().await.expect("Failed to start server");

    let user = signup(&server).await.expect("Failed to sign up");
    let post = create_post(&server, user.token(), &format!("own {}", unique_suffix()))
        .await
        .expect("Failed to create post");

    let response = server
        .post_auth_empty(&format!("/api/v1/posts/{}/like", post.id), user.token())
        .await
        .expect("Request failed");
    let error: ErrorResponse = assert_json(response, StatusCode::BAD_REQUEST)
        .await
        .expect("Bad body");
    assert_eq!(error.detail, "You cannot like your own post");
}

// ===== Comment Tests =====

#[tokio::test]
async fn test_comments_newest_first() {
    if !check_test_env().await {
        return;
    }
    let server = TestServer::start().await.expect("Failed to start server");

    let author = signup(&server).await.expect("Failed to sign up");
    let reader = signup(&server).await.expect("Failed to sign up");
    let post = create_post(&server, author.token(), &format!("discussed {}", unique_suffix()))
        .await
        .expect("Failed to create post");
    let comments_path = format!("/api/v1/posts/{}/comment", post.id);

    let response = server
        .post_auth(
            &comments_path,
            reader.token(),
            &CreateCommentRequest {
                content: "First!".to_string(),
            },
        )
        .await
        .expect("Request failed");
    let first: CommentResponse = assert_json(response, StatusCode::CREATED).await.expect("Bad body");
    assert_eq!(first.post_id, post.id);
    assert_eq!(first.author.id, reader.id());

    tokio::time::sleep(Duration::from_millis(20)).await;

    let response = server
        .post_auth(
            &comments_path,
            author.token(),
            &CreateCommentRequest {
                content: "Thanks for reading".to_string(),
            },
        )
        .await
        .expect("Request failed");
    let second: CommentResponse = assert_json(response, StatusCode::CREATED).await.expect("Bad body");

    let response = server
        .get_auth(&format!("/api/v1/posts/{}", post.id), reader.token())
        .await
        .expect("Request failed");
    let detail: PostDetailResponse = assert_json(response, StatusCode::OK).await.expect("Bad body");

    assert_eq!(detail.comments.len(), 2);
    assert_eq!(detail.comments[0].id, second.id);
    assert_eq!(detail.comments[1].id, first.id);
}

#[tokio::test]
async fn test_comment_on_unknown_post_is_404() {
    if !check_test_env().await {
        return;
    }
    let server = TestServer::start().await.expect("Failed to start server");

    let user = signup(&server).await.expect("Failed to sign up");
    let response = server
        .post_auth(
            "/api/v1/posts/999999999999/comment",
            user.token(),
            &CreateCommentRequest {
                content: "Anyone here?".to_string(),
            },
        )
        .await
        .expect("Request failed");
    assert_status(&response, StatusCode::NOT_FOUND);
}

// ===== Feed Filter Tests =====

#[tokio::test]
async fn test_feed_filters_compose() {
    if !check_test_env().await {
        return;
    }
    let server = TestServer::start().await.expect("Failed to start server");

    let author = signup(&server).await.expect("Failed to sign up");
    let reader = signup(&server).await.expect("Failed to sign up");
    let suffix = unique_suffix();

    // Author writes two posts, one tagged; reader writes one tagged post.
    let response = server
        .post_auth(
            "/api/v1/posts",
            author.token(),
            &CreatePostRequest::with_tags(&format!("feed {suffix} alpha"), vec![format!("ta-{suffix}")]),
        )
        .await
        .expect("Request failed");
    let liked_post: PostResponse = assert_json(response, StatusCode::CREATED).await.expect("Bad body");
    let author_tag_id = liked_post.tags[0].id.clone();

    create_post(&server, author.token(), &format!("feed {suffix} beta"))
        .await
        .expect("Failed to create post");

    let response = server
        .post_auth(
            "/api/v1/posts",
            reader.token(),
            &CreatePostRequest::with_tags(&format!("feed {suffix} mine"), vec![format!("tb-{suffix}")]),
        )
        .await
        .expect("Request failed");
    let own_post: PostResponse = assert_json(response, StatusCode::CREATED).await.expect("Bad body");
    let reader_tag_id = own_post.tags[0].id.clone();

    let response = server
        .post_auth_empty(&format!("/api/v1/users/{}/subscribe", author.id()), reader.token())
        .await
        .expect("Request failed");
    assert_status(&response, StatusCode::CREATED);

    let response = server
        .post_auth_empty(&format!("/api/v1/posts/{}/like", liked_post.id), reader.token())
        .await
        .expect("Request failed");
    assert_status(&response, StatusCode::CREATED);

    // my=1: only the reader's own post.
    let response = server
        .get_auth("/api/v1/posts?my=1", reader.token())
        .await
        .expect("Request failed");
    let posts: Vec<PostResponse> = assert_json(response, StatusCode::OK).await.expect("Bad body");
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].id, own_post.id);

    // subscriptions=true: both of the author's posts, nothing else.
    let response = server
        .get_auth("/api/v1/posts?subscriptions=true", reader.token())
        .await
        .expect("Request failed");
    let posts: Vec<PostResponse> = assert_json(response, StatusCode::OK).await.expect("Bad body");
    assert_eq!(posts.len(), 2);
    assert!(posts.iter().all(|p| p.author.id == author.id()));

    // liked=1: exactly the liked post.
    let response = server
        .get_auth("/api/v1/posts?liked=1", reader.token())
        .await
        .expect("Request failed");
    let posts: Vec<PostResponse> = assert_json(response, StatusCode::OK).await.expect("Bad body");
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].id, liked_post.id);

    // tags=<author's tag>: the tagged post only.
    let response = server
        .get_auth(&format!("/api/v1/posts?tags={author_tag_id}"), reader.token())
        .await
        .expect("Request failed");
    let posts: Vec<PostResponse> = assert_json(response, StatusCode::OK).await.expect("Bad body");
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].id, liked_post.id);

    // Predicates conjoin: my posts carrying the author's tag is empty.
    let response = server
        .get_auth(&format!("/api/v1/posts?my=1&tags={author_tag_id}"), reader.token())
        .await
        .expect("Request failed");
    let posts: Vec<PostResponse> = assert_json(response, StatusCode::OK).await.expect("Bad body");
    assert!(posts.is_empty());

    let response = server
        .get_auth(&format!("/api/v1/posts?my=1&tags={reader_tag_id}"), reader.token())
        .await
        .expect("Request failed");
    let posts: Vec<PostResponse> = assert_json(response, StatusCode::OK).await.expect("Bad body");
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].id, own_post.id);

    // subscriptions + liked narrows to the intersection.
    let response = server
        .get_auth("/api/v1/posts?subscriptions=1&liked=1", reader.token())
        .await
        .expect("Request failed");
    let posts: Vec<PostResponse> = assert_json(response, StatusCode::OK).await.expect("Bad body");
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].id, liked_post.id);
}

#[tokio::test]
async fn test_feed_flag_off_values_do_not_filter() {
    if !check_test_env().await {
        return;
    }
    let server = TestServer::start().await.expect("Failed to start server");

    let author = signup(&server).await.expect("Failed to sign up");
    let reader = signup(&server).await.expect("Failed to sign up");
    let post = create_post(&server, author.token(), &format!("visible {}", unique_suffix()))
        .await
        .expect("Failed to create post");

    // "0" and arbitrary values leave the predicate inactive, so another
    // user's post remains visible.
    for query in ["/api/v1/posts?my=0", "/api/v1/posts?my=yes", "/api/v1/posts"] {
        let response = server
            .get_auth(query, reader.token())
            .await
            .expect("Request failed");
        let posts: Vec<PostResponse> = assert_json(response, StatusCode::OK).await.expect("Bad body");
        assert!(
            posts.iter().any(|p| p.id == post.id),
            "expected post in {query}"
        );
    }
}

#[tokio::test]
async fn test_feed_rejects_malformed_tag_csv() {
    if !check_test_env().await {
        return;
    }
    let server = TestServer::start().await.expect("Failed to start server");

    let user = signup(&server).await.expect("Failed to sign up");

    let response = server
        .get_auth("/api/v1/posts?tags=1,abc", user.token())
        .await
        .expect("Request failed");
    let error: ErrorResponse = assert_json(response, StatusCode::BAD_REQUEST)
        .await
        .expect("Bad body");
    assert_eq!(error.code, "INVALID_TAG_FILTER");
    assert_eq!(error.detail, "Invalid tag id: abc");

    // Empty tokens are malformed too.
    for query in ["/api/v1/posts?tags=", "/api/v1/posts?tags=1,,2"] {
        let response = server
            .get_auth(query, user.token())
            .await
            .expect("Request failed");
        assert_status(&response, StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
async fn test_feed_unknown_tag_id_yields_empty_set() {
    if !check_test_env().await {
        return;
    }
    let server = TestServer::start().await.expect("Failed to start server");

    let user = signup(&server).await.expect("Failed to sign up");
    create_post(&server, user.token(), &format!("untagged {}", unique_suffix()))
        .await
        .expect("Failed to create post");

    let response = server
        .get_auth("/api/v1/posts?tags=4102444800000", user.token())
        .await
        .expect("Request failed");
    let posts: Vec<PostResponse> = assert_json(response, StatusCode::OK).await.expect("Bad body");
    assert!(posts.is_empty());
}

// ===== Upload Tests =====

fn upload_test_config() -> social_common::AppConfig {
    let mut config = test_config().expect("Failed to load test config");
    let dir = std::env::temp_dir().join(format!("social-uploads-{}", unique_suffix()));
    config.storage.upload_dir = dir.to_string_lossy().into_owned();
    config
}

#[tokio::test]
async fn test_upload_profile_photo() {
    if !check_test_env().await {
        return;
    }
    let server = TestServer::start_with_config(upload_test_config())
        .await
        .expect("Failed to start server");

    let user = signup(&server).await.expect("Failed to sign up");
    let response = server
        .post_multipart_auth(
            "/api/v1/users/me/photo",
            user.token(),
            "photo",
            "avatar.png",
            b"not a real png".to_vec(),
        )
        .await
        .expect("Request failed");
    let profile: CurrentUserResponse = assert_json(response, StatusCode::OK).await.expect("Bad body");

    let photo = profile.photo.expect("photo path missing");
    assert!(photo.starts_with("users/"));
    assert!(photo.ends_with(".png"));

    // The path persists on the profile.
    let response = server
        .get_auth("/api/v1/users/me", user.token())
        .await
        .expect("Request failed");
    let persisted: CurrentUserResponse = assert_json(response, StatusCode::OK).await.expect("Bad body");
    assert_eq!(persisted.photo.as_deref(), Some(photo.as_str()));
}

#[tokio::test]
async fn test_upload_photo_requires_named_field() {
    if !check_test_env().await {
        return;
    }
    let server = TestServer::start_with_config(upload_test_config())
        .await
        .expect("Failed to start server");

    let user = signup(&server).await.expect("Failed to sign up");
    let response = server
        .post_multipart_auth(
            "/api/v1/users/me/photo",
            user.token(),
            "file",
            "avatar.png",
            b"bytes".to_vec(),
        )
        .await
        .expect("Request failed");
    let error: ErrorResponse = assert_json(response, StatusCode::BAD_REQUEST)
        .await
        .expect("Bad body");
    assert!(error.detail.contains("photo"));
}

#[tokio::test]
async fn test_upload_rejects_non_image_extension() {
    if !check_test_env().await {
        return;
    }
    let server = TestServer::start_with_config(upload_test_config())
        .await
        .expect("Failed to start server");

    let user = signup(&server).await.expect("Failed to sign up");
    let response = server
        .post_multipart_auth(
            "/api/v1/users/me/photo",
            user.token(),
            "photo",
            "notes.txt",
            b"plain text".to_vec(),
        )
        .await
        .expect("Request failed");
    let error: ErrorResponse = assert_json(response, StatusCode::BAD_REQUEST)
        .await
        .expect("Bad body");
    assert_eq!(error.code, "UNSUPPORTED_IMAGE_TYPE");
}

#[tokio::test]
async fn test_upload_rejects_oversized_file() {
    if !check_test_env().await {
        return;
    }
    let mut config = upload_test_config();
    config.storage.max_file_size_mb = 1;
    let server = TestServer::start_with_config(config)
        .await
        .expect("Failed to start server");

    let user = signup(&server).await.expect("Failed to sign up");
    let oversized = vec![0u8; 1024 * 1024 + 1];
    let response = server
        .post_multipart_auth(
            "/api/v1/users/me/photo",
            user.token(),
            "photo",
            "big.png",
            oversized,
        )
        .await
        .expect("Request failed");
    let error: ErrorResponse = assert_json(response, StatusCode::BAD_REQUEST)
        .await
        .expect("Bad body");
    assert_eq!(error.code, "FILE_TOO_LARGE");
}

#[tokio::test]
async fn test_post_image_upload_is_author_only() {
    if !check_test_env().await {
        return;
    }
    let server = TestServer::start_with_config(upload_test_config())
        .await
        .expect("Failed to start server");

    let author = signup(&server).await.expect("Failed to sign up");
    let stranger = signup(&server).await.expect("Failed to sign up");
    let post = create_post(&server, author.token(), &format!("pictured {}", unique_suffix()))
        .await
        .expect("Failed to create post");
    let image_path = format!("/api/v1/posts/{}/image", post.id);

    let response = server
        .post_multipart_auth(&image_path, stranger.token(), "image", "pic.jpg", b"jpeg".to_vec())
        .await
        .expect("Request failed");
    assert_status(&response, StatusCode::FORBIDDEN);

    let response = server
        .post_multipart_auth(&image_path, author.token(), "image", "pic.jpg", b"jpeg".to_vec())
        .await
        .expect("Request failed");
    let updated: PostResponse = assert_json(response, StatusCode::OK).await.expect("Bad body");
    let image = updated.image.expect("image path missing");
    assert!(image.starts_with("posts/"));
    assert!(image.ends_with(".jpg"));
}

// ===== Scheduled Publication Tests =====

#[tokio::test]
async fn test_scheduled_post_publishes_with_requested_timestamp() {
    if !check_test_env().await {
        return;
    }
    let mut config = test_config().expect("Failed to load test config");
    config.scheduler.poll_interval_secs = 1;
    let server = TestServer::start_with_config(config)
        .await
        .expect("Failed to start server");

    let user = signup(&server).await.expect("Failed to sign up");
    let suffix = unique_suffix();
    // Whole seconds survive the round trip through the database untouched.
    let publish_at =
        DateTime::<Utc>::from_timestamp(Utc::now().timestamp() - 300, 0).expect("valid timestamp");

    let request = SchedulePostRequest {
        title: format!("deferred {suffix}"),
        content: "Published later".to_string(),
        tags: Some(vec![format!("sched-{suffix}")]),
        created_at: publish_at.to_rfc3339(),
    };
    let response = server
        .post_auth("/api/v1/posts/schedule", user.token(), &request)
        .await
        .expect("Request failed");
    let job: ScheduledPostResponse = assert_json(response, StatusCode::CREATED)
        .await
        .expect("Bad body");

    assert_eq!(job.status, "scheduled");
    assert_eq!(job.title, request.title);
    assert_eq!(job.publish_at, publish_at);

    // The worker polls every second; give it a few cycles.
    let mut published = None;
    for _ in 0..20 {
        tokio::time::sleep(Duration::from_millis(500)).await;
        let response = server
            .get_auth("/api/v1/posts?my=1", user.token())
            .await
            .expect("Request failed");
        let posts: Vec<PostResponse> = assert_json(response, StatusCode::OK).await.expect("Bad body");
        if let Some(post) = posts.into_iter().find(|p| p.title == request.title) {
            published = Some(post);
            break;
        }
    }

    let post = published.expect("scheduled post was never published");
    assert_eq!(post.created_at, publish_at);
    assert_eq!(post.author.id, user.id());
    assert_eq!(post.tags.len(), 1);
    assert_eq!(post.tags[0].name, format!("sched-{suffix}"));
}

#[tokio::test]
async fn test_future_schedule_stays_pending() {
    if !check_test_env().await {
        return;
    }
    let mut config = test_config().expect("Failed to load test config");
    config.scheduler.poll_interval_secs = 1;
    let server = TestServer::start_with_config(config)
        .await
        .expect("Failed to start server");

    let user = signup(&server).await.expect("Failed to sign up");
    let publish_at =
        DateTime::<Utc>::from_timestamp(Utc::now().timestamp() + 3600, 0).expect("valid timestamp");

    let request = SchedulePostRequest {
        title: format!("future {}", unique_suffix()),
        content: "Not yet".to_string(),
        tags: None,
        created_at: publish_at.to_rfc3339(),
    };
    let response = server
        .post_auth("/api/v1/posts/schedule", user.token(), &request)
        .await
        .expect("Request failed");
    assert_status(&response, StatusCode::CREATED);

    // Several poll cycles later the post must still be unpublished.
    tokio::time::sleep(Duration::from_millis(2500)).await;
    let response = server
        .get_auth("/api/v1/posts?my=1", user.token())
        .await
        .expect("Request failed");
    let posts: Vec<PostResponse> = assert_json(response, StatusCode::OK).await.expect("Bad body");
    assert!(posts.iter().all(|p| p.title != request.title));
}
