//! Domain error types for cjwt.
//!
//! All decoding and verification errors are defined here using `thiserror`.
//! They are converted to user-facing messages at the CLI boundary, where
//! `anyhow` adds the line context.

use thiserror::Error;

/// Errors that can occur while decoding or verifying a token.
#[derive(Debug, Error)]
pub enum CjwtError {
    /// The token is not three base64url JSON segments joined by `.`.
    #[error("malformed token: {reason}")]
    MalformedToken {
        /// What was wrong with the token structure.
        reason: String,
    },

    /// The header has no `alg` field.
    #[error("no algorithm found in token header")]
    MissingAlgorithm,

    /// The header names an algorithm there is no verifier for.
    #[error("unsupported algorithm: {algorithm}")]
    UnsupportedAlgorithm {
        /// The algorithm named in the header.
        algorithm: String,
    },

    /// Signature verification was attempted and failed.
    #[error("signature validation failed: {reason}")]
    SignatureInvalid {
        /// Description of why validation failed.
        reason: String,
    },

    /// The secret cannot be used as a key for the header's algorithm.
    #[error("invalid key: {reason}")]
    InvalidKey {
        /// Description of the key problem.
        reason: String,
    },

    /// The `exp` claim lies in the past.
    #[error("token has expired")]
    TokenExpired,

    /// The `nbf` claim lies in the future.
    #[error("token is not yet valid")]
    TokenNotYetValid,

    /// A registered claim has the wrong type or shape.
    #[error("invalid '{claim}' claim: {reason}")]
    InvalidClaim {
        /// Name of the offending claim.
        claim: String,
        /// Description of the problem.
        reason: String,
    },

    /// A claim required by the validation policy is absent.
    #[error("token is missing the '{claim}' claim")]
    MissingClaim {
        /// Name of the missing claim.
        claim: String,
    },

    /// The `aud` claim does not satisfy the expected audience.
    #[error("invalid audience: {reason}")]
    InvalidAudience {
        /// Description of the mismatch.
        reason: String,
    },

    /// The `iss` claim does not match the expected issuer.
    #[error("invalid issuer")]
    InvalidIssuer,

    /// The token input could not be read.
    #[error("failed to read {origin}: {reason}")]
    InputError {
        /// Where the input was coming from (a path or "stdin").
        origin: String,
        /// Description of the read failure.
        reason: String,
    },

    /// The specified environment variable is not set.
    #[error("environment variable '{name}' is not set")]
    EnvVarNotFound {
        /// Name of the missing environment variable.
        name: String,
    },

    /// The environment variable name cannot be looked up.
    #[error("invalid environment variable name '{name}'")]
    InvalidEnvVarName {
        /// The rejected name.
        name: String,
    },
}

impl CjwtError {
    /// Shorthand for a [`CjwtError::MalformedToken`] with the given reason.
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedToken {
            reason: reason.into(),
        }
    }
}
