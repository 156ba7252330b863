use std::io::{self, Write};

use serde::Serialize;

use crate::error::CliError;

/// Write a JSON document to stdout followed by a newline.
pub fn render<T: Serialize>(value: &T, pretty: bool) -> Result<(), CliError> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    write_json(&mut handle, value, pretty)
}

pub(crate) fn write_json<W: Write, T: Serialize>(out: &mut W, value: &T, pretty: bool) -> Result<(), CliError> {
    if pretty {
        serde_json::to_writer_pretty(&mut *out, value)?;
    } else {
        serde_json::to_writer(&mut *out, value)?;
    }
    writeln!(out)?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compact_output_is_one_line() {
        let mut buffer = Vec::new();
        write_json(&mut buffer, &serde_json::json!({ "rows": 1 }), false).expect("writable");
        assert_eq!(String::from_utf8(buffer).expect("utf8"), "{\"rows\":1}\n");
    }

    #[test]
    fn pretty_output_is_indented() {
        let mut buffer = Vec::new();
        write_json(&mut buffer, &serde_json::json!({ "rows": 1 }), true).expect("writable");
        let text = String::from_utf8(buffer).expect("utf8");
        assert!(text.contains("\n  \"rows\": 1\n"));
    }
}
