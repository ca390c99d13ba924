//! Shared test fixtures and helper utilities.
//!
//! Provides pre-built JWT tokens with known claims and helpers to sign or
//! hand-assemble tokens for the integration tests.
#![allow(dead_code)]

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

/// The jwt.io example token.
///
/// Header: `{"alg":"HS256","typ":"JWT"}`
/// Payload: `{"sub":"1234567890","name":"John Doe","iat":1516239022}`
/// Secret: `"your-256-bit-secret"`
pub const JWT_IO_TOKEN: &str = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9.\
     eyJzdWIiOiIxMjM0NTY3ODkwIiwibmFtZSI6IkpvaG4gRG9lIiwiaWF0IjoxNTE2MjM5MDIyfQ.\
     SflKxwRJSMeKKF2QT4fwpMeJf36POk6yJV_adQssw5c";

/// Secret that signed [`JWT_IO_TOKEN`].
pub const JWT_IO_SECRET: &str = "your-256-bit-secret";

/// A string with three segments that are not base64url JSON.
pub const NOT_A_JWT: &str = "not.a.jwt!!!";

/// A malformed token with only two parts (missing signature).
pub const MALFORMED_TOKEN_TWO_PARTS: &str = "eyJhbGciOiJIUzI1NiJ9.eyJzdWIiOiIxMjM0NTY3ODkwIn0";

/// Secret used for the scenario tokens.
pub const SCENARIO_SECRET: &str = "secret";

/// Ed25519 key pair used to sign EdDSA tokens, plus an unrelated public key.
pub const ED25519_PRIVATE_KEY: &str = include_str!("../fixtures/ed25519_private.pem");
pub const ED25519_PUBLIC_KEY: &str = include_str!("../fixtures/ed25519_public.pem");
pub const ED25519_OTHER_PUBLIC_KEY: &str = include_str!("../fixtures/ed25519_other_public.pem");

/// Create an HS256-signed token with the given claims.
pub fn create_hs256_token(secret: &str, claims: &serde_json::Value) -> String {
    use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
    let header = Header::new(Algorithm::HS256);
    let key = EncodingKey::from_secret(secret.as_bytes());
    encode(&header, claims, &key).unwrap()
}

/// Create an EdDSA token signed with [`ED25519_PRIVATE_KEY`].
pub fn create_eddsa_token(claims: &serde_json::Value) -> String {
    use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
    let header = Header::new(Algorithm::EdDSA);
    let key = EncodingKey::from_ed_pem(ED25519_PRIVATE_KEY.as_bytes()).unwrap();
    encode(&header, claims, &key).unwrap()
}

/// Assemble a token from raw header and payload JSON, with a dummy signature.
pub fn create_raw_token(header: &str, payload: &str) -> String {
    format!(
        "{}.{}.c2ln",
        URL_SAFE_NO_PAD.encode(header),
        URL_SAFE_NO_PAD.encode(payload)
    )
}

/// Claims used by the scenario tests.
pub fn john_doe_claims() -> serde_json::Value {
    serde_json::json!({
        "sub": "1234567890",
        "name": "John Doe"
    })
}

/// `{"alg":"HS256","typ":"JWT"}` / John Doe signed with [`SCENARIO_SECRET`].
pub fn scenario_token() -> String {
    create_hs256_token(SCENARIO_SECRET, &john_doe_claims())
}
