//! JWT signature validation logic.
//!
//! Verifies a token's signature with a single shared secret, pinned to the
//! algorithm declared in the token header. The cryptography is delegated to
//! `jsonwebtoken::crypto`; this module only chooses the key type for the
//! algorithm family and maps library errors onto [`CjwtError`].
//!
//! Only the raw `header.payload` signing input and the signature segment
//! are handed to the library. The header is never re-parsed into
//! `jsonwebtoken::Header`, so any JSON header accepted by the decoder can
//! be verified.
//!
//! HMAC algorithms use the secret bytes directly. RSA, ECDSA and EdDSA
//! algorithms interpret the secret as a PEM-encoded public key.

use std::str::FromStr;

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm as JwtAlgorithm, DecodingKey, crypto};

use crate::core::decoder::Algorithm;
use crate::error::CjwtError;

/// Prefixes of OpenSSH public key lines.
const SSH_KEY_PREFIXES: [&str; 4] = ["ssh-rsa", "ssh-dss", "ssh-ed25519", "ecdsa-sha2-"];

/// Verify the signature of `token` with `secret` using exactly `algorithm`.
///
/// Registered claims are not checked here; see [`crate::core::policy`].
///
/// # Errors
///
/// Returns [`CjwtError::UnsupportedAlgorithm`] for `none` or unknown
/// algorithms, [`CjwtError::InvalidKey`] if the secret is unusable for the
/// algorithm, and [`CjwtError::SignatureInvalid`] if the signature does not
/// match.
pub fn verify_signature(
    token: &str,
    secret: &str,
    algorithm: &Algorithm,
) -> Result<(), CjwtError> {
    let alg = resolve_algorithm(algorithm)?;
    let key = decoding_key(alg, secret)?;

    let (signing_input, signature) = token
        .rsplit_once('.')
        .ok_or_else(|| CjwtError::malformed("missing signature segment"))?;

    // The library decodes signatures without padding.
    let signature = signature.trim_end_matches('=');

    match crypto::verify(signature, signing_input.as_bytes(), &key, alg) {
        Ok(true) => Ok(()),
        Ok(false) => Err(CjwtError::SignatureInvalid {
            reason: "signature does not match".to_string(),
        }),
        Err(e) => Err(map_jwt_error(e.kind(), algorithm)),
    }
}

/// Map the header's algorithm name onto a `jsonwebtoken` algorithm.
fn resolve_algorithm(algorithm: &Algorithm) -> Result<JwtAlgorithm, CjwtError> {
    let unsupported = || CjwtError::UnsupportedAlgorithm {
        algorithm: algorithm.to_string(),
    };

    if algorithm.as_str() == "none" {
        return Err(unsupported());
    }
    JwtAlgorithm::from_str(algorithm.as_str()).map_err(|_| unsupported())
}

/// Build the decoding key appropriate for the algorithm family.
fn decoding_key(alg: JwtAlgorithm, secret: &str) -> Result<DecodingKey, CjwtError> {
    use JwtAlgorithm::*;

    match alg {
        HS256 | HS384 | HS512 => {
            if looks_like_asymmetric_key(secret) {
                return Err(CjwtError::InvalidKey {
                    reason: "asymmetric key material cannot be used as an HMAC secret"
                        .to_string(),
                });
            }
            Ok(DecodingKey::from_secret(secret.as_bytes()))
        }
        RS256 | RS384 | RS512 | PS256 | PS384 | PS512 => {
            DecodingKey::from_rsa_pem(secret.as_bytes()).map_err(pem_error("RSA"))
        }
        ES256 | ES384 => DecodingKey::from_ec_pem(secret.as_bytes()).map_err(pem_error("EC")),
        EdDSA => DecodingKey::from_ed_pem(secret.as_bytes()).map_err(pem_error("Ed25519")),
        #[allow(unreachable_patterns)]
        _ => Err(CjwtError::UnsupportedAlgorithm {
            algorithm: format!("{alg:?}"),
        }),
    }
}

fn pem_error(family: &'static str) -> impl Fn(jsonwebtoken::errors::Error) -> CjwtError {
    move |_| CjwtError::InvalidKey {
        reason: format!("secret is not a PEM-encoded {family} public key"),
    }
}

/// Whether a secret looks like a PEM block or an OpenSSH public key.
///
/// Using a public key as an HMAC secret is the classic algorithm-confusion
/// attack: anyone holding the public key could forge tokens.
fn looks_like_asymmetric_key(secret: &str) -> bool {
    let trimmed = secret.trim_start();
    trimmed.contains("-----BEGIN ")
        || SSH_KEY_PREFIXES
            .iter()
            .any(|prefix| trimmed.starts_with(prefix))
}

/// Map a `jsonwebtoken` error onto the domain taxonomy.
///
/// Raw library messages are not forwarded.
fn map_jwt_error(kind: &ErrorKind, algorithm: &Algorithm) -> CjwtError {
    match kind {
        ErrorKind::InvalidSignature => CjwtError::SignatureInvalid {
            reason: "signature does not match".to_string(),
        },
        ErrorKind::InvalidAlgorithm => CjwtError::SignatureInvalid {
            reason: "algorithm mismatch between token and key".to_string(),
        },
        ErrorKind::InvalidAlgorithmName => CjwtError::UnsupportedAlgorithm {
            algorithm: algorithm.to_string(),
        },
        ErrorKind::Base64(_) => CjwtError::malformed("signature is not valid base64url"),
        ErrorKind::InvalidKeyFormat => CjwtError::InvalidKey {
            reason: "key is not valid for this algorithm".to_string(),
        },
        _ => CjwtError::SignatureInvalid {
            reason: "unexpected validation error".to_string(),
        },
    }
}
