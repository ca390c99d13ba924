//! The token inspection loop.
//!
//! Reads tokens line by line, decodes each one (verifying it when a secret
//! is available), and prints the header and claims. By default the first
//! failing token stops the run; with `--keep-going` failures are reported
//! per line and processing continues.

use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};

use crate::cli::Cli;
use crate::commands::input;
use crate::core::decoder::{self, Claims, Header};
use crate::core::policy::ClaimPolicy;
use crate::display::{self, OutputFormat};
use crate::error::CjwtError;

/// Settings shared by every token of a run.
#[derive(Debug)]
pub struct InspectOptions<'a> {
    /// Verification secret; `None` selects unverified decoding.
    pub secret: Option<&'a str>,
    /// Registered claim expectations for verified tokens.
    pub policy: ClaimPolicy,
    /// Output rendering.
    pub format: OutputFormat,
    /// Continue past failing tokens instead of stopping.
    pub keep_going: bool,
    /// Name of the token source for read errors.
    pub source: String,
}

/// Counts of processed tokens.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub decoded: usize,
    pub failed: usize,
}

/// Execute the inspection with the parsed CLI arguments.
///
/// Returns `ExitCode::FAILURE` when any token failed in `--keep-going`
/// mode; in fail-fast mode the first failure is returned as an error.
pub fn execute(cli: &Cli) -> Result<ExitCode> {
    let secret = input::resolve_secret(cli)?;
    if secret.is_none() {
        log::warn!("no secret supplied: tokens are decoded without signature verification");
    }

    let options = InspectOptions {
        secret: secret.as_deref().map(String::as_str),
        policy: ClaimPolicy {
            leeway: cli.leeway,
            audience: cli.audience.clone(),
            issuer: cli.issuer.clone(),
        },
        format: if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::KeyValue
        },
        keep_going: cli.keep_going,
        source: input::describe_source(cli.file.as_deref()),
    };

    let reader = input::open_tokens(cli.file.as_deref())?;
    let mut stdout = io::stdout().lock();
    let mut stderr = io::stderr().lock();

    let summary = process_tokens(reader, &mut stdout, &mut stderr, &options)?;
    log::debug!(
        "processed {} token(s), {} failed",
        summary.decoded + summary.failed,
        summary.failed
    );

    Ok(if summary.failed == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Decode every token in `reader`, writing results to `out`.
///
/// Blank lines are skipped. In `keep_going` mode token failures are
/// written to `errors` and counted; otherwise the first failure is
/// returned with its line number as context.
///
/// # Errors
///
/// Returns an error if reading input or writing output fails, or on the
/// first token failure when not in `keep_going` mode.
pub fn process_tokens<R, W, E>(
    reader: R,
    out: &mut W,
    errors: &mut E,
    options: &InspectOptions<'_>,
) -> Result<Summary>
where
    R: BufRead,
    W: Write,
    E: Write,
{
    let mut summary = Summary::default();

    for (index, line) in reader.lines().enumerate() {
        let line_no = index + 1;
        let line = line.map_err(|e| CjwtError::InputError {
            origin: options.source.clone(),
            reason: e.to_string(),
        })?;

        let token = line.trim();
        if token.is_empty() {
            continue;
        }

        match inspect_token(token, options) {
            Ok((header, claims)) => {
                log::debug!(
                    "line {line_no}: decoded {} token",
                    if claims.is_verified() {
                        "verified"
                    } else {
                        "unverified"
                    }
                );
                display::write_token(out, options.format, &header, &claims)
                    .context("failed to write output")?;
                summary.decoded += 1;
            }
            Err(e) if options.keep_going => {
                writeln!(errors, "Error: line {line_no}: {e}")?;
                summary.failed += 1;
            }
            Err(e) => {
                out.flush()?;
                return Err(anyhow::Error::new(e).context(format!("line {line_no}")));
            }
        }
    }

    out.flush()?;
    Ok(summary)
}

/// Run the decode pipeline on one token: header first, then claims.
pub fn inspect_token(
    token: &str,
    options: &InspectOptions<'_>,
) -> Result<(Header, Claims), CjwtError> {
    let header = decoder::parse_header(token)?;
    let claims =
        decoder::decode_claims(token, options.secret, &header.algorithm, &options.policy)?;
    Ok((header, claims))
}
