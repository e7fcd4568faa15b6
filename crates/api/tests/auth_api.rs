//! Integration tests for the bearer-token auth boundary.
//!
//! The verifier is built from a static JWKS document (the RSA key from
//! RFC 7517 appendix A.1) so no network access is needed. Requests carry
//! no valid signature for that key, so everything on the entity surface
//! must come back 401.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, get_with_bearer};
use kanban_api::auth::{AuthMode, TokenVerifier};
use sqlx::PgPool;

const TEST_JWKS: &str = r#"{
  "keys": [
    {
      "kty": "EC",
      "crv": "P-256",
      "x": "MKBCTNIcKUSDii11ySs3526iDZ8AiTo7Tu6KPAqv7D4",
      "y": "4Etl6SRW2YiLUrN5vfvVHuhp7x8PxltmWWlbbM4IFyM",
      "kid": "ec-key-ignored"
    },
    {
      "kty": "RSA",
      "n": "0vx7agoebGcQSuuPiLJXZptN9nndrQmbXEps2aiAFbWhM78LhWx4cbbfAAtVT86zwu1RK7aPFFxuhDR1L6tSoc_BJECPebWKRXjBZCiFV4n3oknjhMstn64tZ_2W-5JsGY4Hc5n9yBXArwl93lqt7_RN5w6Cf0h4QyQ5v-65YGjQR0_FDW2QvzqY368QQMicAtaSqzs8KJZgnYb9c7d0zgdAZHzu6qMQvRL5hajrn1n91CbOpbISD08qNLyrdkt-bFTWhAI4vMQFh6WeZu0fM4lFd2NcRwr3XPksINHaQ-G_xBniIqbw0Ls1jF44-csFCur-kEgU8awapJzKnqDKgw",
      "e": "AQAB",
      "alg": "RS256",
      "kid": "2011-04-29"
    }
  ]
}"#;

fn enabled_auth() -> AuthMode {
    let verifier = TokenVerifier::from_jwks_json(
        TEST_JWKS,
        "https://issuer.example.com/",
        "kanban-api",
    )
    .expect("static JWKS must parse");
    AuthMode::Enabled { verifier }
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_missing_authorization_header_returns_401(pool: PgPool) {
    let app = common::build_test_app_with_auth(pool, enabled_auth());
    let response = get(app, "/boards").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Unauthorized.");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_garbage_token_returns_401(pool: PgPool) {
    let app = common::build_test_app_with_auth(pool, enabled_auth());
    let response = get_with_bearer(app, "/boards", "not-a-jwt").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_unsigned_token_returns_401(pool: PgPool) {
    // Well-formed JWT structure, but not signed by the JWKS key.
    let token = "eyJhbGciOiJSUzI1NiIsInR5cCI6IkpXVCJ9.eyJzdWIiOiJtYWxsb3J5In0.AAAA";
    let app = common::build_test_app_with_auth(pool, enabled_auth());
    let response = get_with_bearer(app, "/boards", token).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_non_bearer_scheme_returns_401(pool: PgPool) {
    let app = common::build_test_app_with_auth(pool.clone(), enabled_auth());
    let request = axum::http::Request::builder()
        .method("GET")
        .uri("/boards")
        .header("authorization", "Basic dXNlcjpwYXNz")
        .body(axum::body::Body::empty())
        .unwrap();
    let response = tower::ServiceExt::oneshot(app, request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_metadata_routes_stay_open_when_auth_enabled(pool: PgPool) {
    for uri in ["/", "/health", "/openapi.json"] {
        let app = common::build_test_app_with_auth(pool.clone(), enabled_auth());
        let response = get(app, uri).await;
        assert_eq!(response.status(), StatusCode::OK, "{uri} should not require auth");
    }
}

#[test]
fn test_jwks_without_rsa_keys_is_rejected() {
    let jwks = r#"{"keys": [{"kty": "EC", "kid": "only-ec"}]}"#;
    let result = TokenVerifier::from_jwks_json(jwks, "https://issuer.example.com/", "aud");
    assert!(result.is_err());
}
