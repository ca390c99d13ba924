//! JSON-lines rendering for machine consumption.

use std::io::{self, Write};

use serde_json::json;

use crate::core::decoder::{Claims, Header};

/// Write one token as a single-line JSON object followed by a newline.
///
/// The object has `header`, `claims` and `verified` fields, so consumers
/// can tell verified claims from merely decoded ones.
pub fn write_record<W: Write>(out: &mut W, header: &Header, claims: &Claims) -> io::Result<()> {
    let record = json!({
        "header": header.fields,
        "claims": claims.as_map(),
        "verified": claims.is_verified(),
    });

    serde_json::to_writer(&mut *out, &record)?;
    writeln!(out)
}
