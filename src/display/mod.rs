//! Output formatting for decoded tokens.
//!
//! Renders a decoded header and claims either as `key: value` lines for
//! reading in a terminal, or as one JSON object per token for piping.

pub mod json_printer;
pub mod key_value;

use std::io::{self, Write};

use crate::core::decoder::{Claims, Header};

/// How decoded tokens are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Header fields then claim fields, one `key: value` per line.
    KeyValue,
    /// One JSON object per line.
    Json,
}

/// Write a decoded token in the requested format.
pub fn write_token<W: Write>(
    out: &mut W,
    format: OutputFormat,
    header: &Header,
    claims: &Claims,
) -> io::Result<()> {
    match format {
        OutputFormat::KeyValue => {
            key_value::write_mapping(out, &header.fields)?;
            key_value::write_mapping(out, claims.as_map())
        }
        OutputFormat::Json => json_printer::write_record(out, header, claims),
    }
}
