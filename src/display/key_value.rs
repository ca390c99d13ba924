//! Plain `key: value` rendering of JSON objects.

use std::io::{self, Write};

use serde_json::Value;

use crate::core::decoder::JsonMap;

/// Write each entry of `map` as a `key: value` line, in map order.
pub fn write_mapping<W: Write>(out: &mut W, map: &JsonMap) -> io::Result<()> {
    for (key, value) in map {
        writeln!(out, "{key}: {}", format_value(value))?;
    }
    Ok(())
}

/// Strings print bare; everything else prints as compact JSON.
fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
