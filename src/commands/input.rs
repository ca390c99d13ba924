//! Input resolution for the token stream and the verification secret.
//!
//! Tokens come from a file or stdin. The secret comes from `--secret` or
//! from an environment variable named by `--secret-env`, and is kept in a
//! `Zeroizing` buffer so it is wiped when dropped.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use zeroize::Zeroizing;

use crate::cli::Cli;
use crate::error::CjwtError;

/// Open the token source: the given file, or stdin for `None` and `-`.
///
/// # Errors
///
/// Returns [`CjwtError::InputError`] if the file cannot be opened.
pub fn open_tokens(path: Option<&Path>) -> Result<Box<dyn BufRead>, CjwtError> {
    match path {
        None => Ok(Box::new(io::stdin().lock())),
        Some(path) if path == Path::new("-") => Ok(Box::new(io::stdin().lock())),
        Some(path) => {
            let file = File::open(path).map_err(|e| CjwtError::InputError {
                origin: path.display().to_string(),
                reason: e.to_string(),
            })?;
            Ok(Box::new(BufReader::new(file)))
        }
    }
}

/// A human-readable name for the token source, used in error messages.
pub fn describe_source(path: Option<&Path>) -> String {
    match path {
        Some(path) if path != Path::new("-") => path.display().to_string(),
        _ => "stdin".to_string(),
    }
}

/// Resolve the verification secret from the CLI arguments.
///
/// Returns `None` when no secret was supplied, which selects unverified
/// decoding.
///
/// # Errors
///
/// Returns an error if `--secret-env` names an invalid or unset variable.
pub fn resolve_secret(cli: &Cli) -> Result<Option<Zeroizing<String>>, CjwtError> {
    if let Some(secret) = &cli.secret {
        return Ok(Some(secret.clone()));
    }

    match &cli.secret_env {
        Some(name) => read_env_secret(name).map(Some),
        None => Ok(None),
    }
}

/// Read a secret from the named environment variable.
fn read_env_secret(name: &str) -> Result<Zeroizing<String>, CjwtError> {
    validate_env_var_name(name)?;

    std::env::var(name)
        .map(Zeroizing::new)
        .map_err(|_| CjwtError::EnvVarNotFound {
            name: name.to_string(),
        })
}

/// Reject names that `std::env::var` cannot look up meaningfully.
fn validate_env_var_name(name: &str) -> Result<(), CjwtError> {
    if name.is_empty() || name.contains('=') || name.contains('\0') {
        return Err(CjwtError::InvalidEnvVarName {
            name: name.to_string(),
        });
    }
    Ok(())
}
