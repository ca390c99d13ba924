//! Registered claim validation.
//!
//! Checks the temporal claims (`exp`, `nbf`, `iat`) and the optional
//! audience and issuer expectations of a verified token. Only applied after
//! a successful signature check; unverified decoding never runs these.

use serde_json::Value;

use crate::core::decoder::JsonMap;
use crate::error::CjwtError;

/// Expectations applied to the registered claims of a verified token.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClaimPolicy {
    /// Clock skew tolerated by the `exp` and `nbf` checks, in seconds.
    pub leeway: u32,
    /// Audience that must appear in the `aud` claim.
    pub audience: Option<String>,
    /// Exact value required in the `iss` claim.
    pub issuer: Option<String>,
}

/// Validate the registered claims of a verified token at time `now`.
///
/// # Errors
///
/// Returns [`CjwtError::InvalidClaim`] if `iat`, `nbf` or `exp` is not a
/// number, [`CjwtError::TokenNotYetValid`] / [`CjwtError::TokenExpired`]
/// for temporal violations, and audience/issuer errors per the policy.
pub fn validate_claims(claims: &JsonMap, policy: &ClaimPolicy, now: i64) -> Result<(), CjwtError> {
    let leeway = i64::from(policy.leeway);

    numeric_claim(claims, "iat")?;

    if let Some(nbf) = numeric_claim(claims, "nbf")? {
        if nbf > now.saturating_add(leeway) {
            return Err(CjwtError::TokenNotYetValid);
        }
    }

    if let Some(exp) = numeric_claim(claims, "exp")? {
        if exp <= now.saturating_sub(leeway) {
            return Err(CjwtError::TokenExpired);
        }
    }

    validate_audience(claims.get("aud"), policy.audience.as_deref())?;
    validate_issuer(claims.get("iss"), policy.issuer.as_deref())
}

/// Read a NumericDate claim, truncating fractional seconds.
fn numeric_claim(claims: &JsonMap, name: &str) -> Result<Option<i64>, CjwtError> {
    match claims.get(name) {
        None => Ok(None),
        Some(value) => match value.as_i64() {
            Some(seconds) => Ok(Some(seconds)),
            None => value
                .as_f64()
                .map(|seconds| Some(seconds.trunc() as i64))
                .ok_or_else(|| CjwtError::InvalidClaim {
                    claim: name.to_string(),
                    reason: "must be a numeric date".to_string(),
                }),
        },
    }
}

fn validate_audience(claim: Option<&Value>, expected: Option<&str>) -> Result<(), CjwtError> {
    let claim = claim.filter(|value| !is_empty_value(value));

    let Some(expected) = expected else {
        return match claim {
            None => Ok(()),
            Some(_) => Err(CjwtError::InvalidAudience {
                reason: "token has an audience but none was expected".to_string(),
            }),
        };
    };

    let Some(claim) = claim else {
        return Err(CjwtError::MissingClaim {
            claim: "aud".to_string(),
        });
    };

    let audiences: Vec<&str> = match claim {
        Value::String(aud) => vec![aud.as_str()],
        Value::Array(items) => items
            .iter()
            .map(Value::as_str)
            .collect::<Option<Vec<&str>>>()
            .ok_or_else(|| CjwtError::InvalidAudience {
                reason: "claim must be a string or an array of strings".to_string(),
            })?,
        _ => {
            return Err(CjwtError::InvalidAudience {
                reason: "claim must be a string or an array of strings".to_string(),
            });
        }
    };

    if audiences.contains(&expected) {
        Ok(())
    } else {
        Err(CjwtError::InvalidAudience {
            reason: "audience doesn't match".to_string(),
        })
    }
}

fn validate_issuer(claim: Option<&Value>, expected: Option<&str>) -> Result<(), CjwtError> {
    let Some(expected) = expected else {
        return Ok(());
    };

    match claim {
        None => Err(CjwtError::MissingClaim {
            claim: "iss".to_string(),
        }),
        Some(Value::String(iss)) if iss == expected => Ok(()),
        Some(_) => Err(CjwtError::InvalidIssuer),
    }
}

/// Null, `false`, zero, and empty strings/arrays/objects count as absent.
fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}
