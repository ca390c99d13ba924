//! CLI argument definitions for cjwt.
//!
//! Uses `clap` derive macros to define the command-line interface.
//!
//! # Security
//!
//! `Cli` implements a custom `Debug` to redact the secret and prevent
//! accidental leakage through debug formatting, error chains, or logging.

use std::fmt;
use std::path::PathBuf;

use clap::Parser;
use zeroize::Zeroizing;

/// Decode JSON Web Tokens read one per line, and verify their signatures
/// when a secret is given.
#[derive(Parser)]
#[command(name = "cjwt")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// File with one JWT per line. Reads stdin when omitted or "-".
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Shared secret (or PEM public key) used to verify every token.
    ///
    /// Without a secret, tokens are decoded WITHOUT signature verification.
    /// WARNING: Passing secrets via CLI arguments may expose them in shell
    /// history. Prefer --secret-env instead.
    #[arg(
        long,
        value_name = "SECRET",
        value_parser = parse_zeroizing_string,
        conflicts_with = "secret_env"
    )]
    pub secret: Option<Zeroizing<String>>,

    /// Read the verification secret from the specified environment variable.
    #[arg(long, value_name = "VAR_NAME")]
    pub secret_env: Option<String>,

    /// Require this value in the `aud` claim of verified tokens.
    #[arg(long, value_name = "AUD")]
    pub audience: Option<String>,

    /// Require this value in the `iss` claim of verified tokens.
    #[arg(long, value_name = "ISS")]
    pub issuer: Option<String>,

    /// Clock skew tolerated when checking `exp` and `nbf`, in seconds.
    #[arg(long, value_name = "SECONDS", default_value_t = 0)]
    pub leeway: u32,

    /// Print one JSON object per token instead of `key: value` lines.
    #[arg(long)]
    pub json: bool,

    /// Report failing tokens and continue with the next line instead of
    /// stopping at the first failure.
    #[arg(long)]
    pub keep_going: bool,

    /// Enable debug logging on stderr (RUST_LOG takes precedence).
    #[arg(short, long)]
    pub verbose: bool,
}

/// Parse a string into a `Zeroizing<String>` for secure CLI arguments.
fn parse_zeroizing_string(s: &str) -> Result<Zeroizing<String>, std::convert::Infallible> {
    Ok(Zeroizing::new(s.to_string()))
}

/// Custom `Debug` that redacts the secret field.
impl fmt::Debug for Cli {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cli")
            .field("file", &self.file)
            .field("secret", &self.secret.as_ref().map(|_| "[REDACTED]"))
            .field("secret_env", &self.secret_env)
            .field("audience", &self.audience)
            .field("issuer", &self.issuer)
            .field("leeway", &self.leeway)
            .field("json", &self.json)
            .field("keep_going", &self.keep_going)
            .field("verbose", &self.verbose)
            .finish()
    }
}
