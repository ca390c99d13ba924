//! JWT decoding logic.
//!
//! Splits a raw JWT into its header and payload segments, base64url-decodes
//! them, and parses each as a JSON object. The header's `alg` field is
//! captured as an [`Algorithm`] which [`decode_claims`] requires, so claims
//! can never be decoded before the algorithm has been determined.

use std::fmt;

use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::{Engine, alphabet};
use chrono::Utc;
use serde_json::{Map, Value};

use crate::core::policy::{self, ClaimPolicy};
use crate::core::validator;
use crate::error::CjwtError;

/// URL-safe alphabet; trailing `=` padding is optional on decode.
const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// A decoded JSON object, keys kept in token order.
pub type JsonMap = Map<String, Value>;

/// The signing algorithm named by a token header.
///
/// Only obtainable through [`parse_header`], which pins verification to
/// whatever the header declares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Algorithm(String);

impl Algorithm {
    #[cfg(test)]
    pub(crate) fn new(name: &str) -> Self {
        Self(name.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A parsed JWT header.
#[derive(Debug, Clone, PartialEq)]
pub struct Header {
    /// Every header field, in token order.
    pub fields: JsonMap,
    /// The algorithm from the `alg` field.
    pub algorithm: Algorithm,
}

/// Decoded claims, tagged with how they were obtained.
///
/// Implements a custom `Debug` that redacts claim values to prevent
/// accidental leakage through debug formatting or logs.
#[derive(Clone, PartialEq)]
pub enum Claims {
    /// The signature and registered claims were checked.
    Verified(JsonMap),
    /// Decoded without any signature check.
    Unverified(JsonMap),
}

impl Claims {
    pub fn is_verified(&self) -> bool {
        matches!(self, Claims::Verified(_))
    }

    pub fn as_map(&self) -> &JsonMap {
        match self {
            Claims::Verified(map) | Claims::Unverified(map) => map,
        }
    }
}

impl fmt::Debug for Claims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let variant = if self.is_verified() {
            "Verified"
        } else {
            "Unverified"
        };
        f.debug_tuple(variant).field(&"[REDACTED]").finish()
    }
}

/// Parse the header of a raw JWT and determine its algorithm.
///
/// # Errors
///
/// Returns [`CjwtError::MalformedToken`] if the token does not have three
/// segments or the header is not base64url-encoded JSON, and
/// [`CjwtError::MissingAlgorithm`] if the header has no `alg`.
pub fn parse_header(token: &str) -> Result<Header, CjwtError> {
    let (encoded_header, _) = split_token(token)?;
    let fields = decode_segment(encoded_header, "header")?;

    let algorithm = match fields.get("alg") {
        None | Some(Value::Null) => return Err(CjwtError::MissingAlgorithm),
        Some(Value::String(alg)) => Algorithm(alg.clone()),
        Some(other) => {
            return Err(CjwtError::malformed(format!(
                "header 'alg' must be a string, found {other}"
            )));
        }
    };

    Ok(Header { fields, algorithm })
}

/// Decode the claims of a raw JWT.
///
/// With a secret, the signature is verified using exactly `algorithm` and
/// the registered claims are checked against `policy` and the current time.
/// Without a secret, the payload is decoded as-is and returned as
/// [`Claims::Unverified`].
///
/// # Errors
///
/// Returns [`CjwtError::MalformedToken`] for structural problems, and any
/// verification or claim error when a secret is supplied.
pub fn decode_claims(
    token: &str,
    secret: Option<&str>,
    algorithm: &Algorithm,
    policy: &ClaimPolicy,
) -> Result<Claims, CjwtError> {
    decode_claims_at(token, secret, algorithm, policy, Utc::now().timestamp())
}

/// [`decode_claims`] evaluated at a fixed Unix timestamp.
pub fn decode_claims_at(
    token: &str,
    secret: Option<&str>,
    algorithm: &Algorithm,
    policy: &ClaimPolicy,
    now: i64,
) -> Result<Claims, CjwtError> {
    let (_, encoded_payload) = split_token(token)?;
    let claims = decode_segment(encoded_payload, "payload")?;

    let Some(secret) = secret else {
        return Ok(Claims::Unverified(claims));
    };

    log::debug!("verifying signature with {algorithm}");
    validator::verify_signature(token, secret, algorithm)?;
    policy::validate_claims(&claims, policy, now)?;

    Ok(Claims::Verified(claims))
}

/// Split a token into its encoded header and payload segments.
fn split_token(token: &str) -> Result<(&str, &str), CjwtError> {
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        return Err(CjwtError::malformed(format!(
            "expected 3 dot-separated segments, found {}",
            parts.len()
        )));
    }

    Ok((parts[0], parts[1]))
}

/// Base64url-decode a segment and parse it as a JSON object.
fn decode_segment(encoded: &str, segment_name: &str) -> Result<JsonMap, CjwtError> {
    let bytes = URL_SAFE_LENIENT
        .decode(encoded)
        .map_err(|_| CjwtError::malformed(format!("{segment_name} is not valid base64url")))?;

    serde_json::from_slice(&bytes)
        .map_err(|e| CjwtError::malformed(format!("{segment_name} is not a JSON object: {e}")))
}
