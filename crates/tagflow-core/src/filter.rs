//! Removal of connection chatter from captured listener output.

use std::fs;
use std::path::Path;

use crate::{CoreError, Result};

/// Printed by an annotating listener once the broker accepts the connection.
pub const CONNECTION_ACCEPTED: &str = "Connection Accepted.";
/// Printed by an annotating listener once the subscription is acknowledged.
pub const SUBSCRIBED: &str = "Subscribed to topic!";
/// Prefix in front of every payload written by an annotating listener.
pub const POSITIONING_PREFIX: &str = "Positioning update: ";

/// Read a capture file into lines. Line terminators are not retained.
pub fn read_lines(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path).map_err(|source| CoreError::io(path, source))?;
    Ok(content.lines().map(str::to_owned).collect())
}

/// Drop boilerplate and blank lines and strip the positioning prefix from the rest.
pub fn clear_lines<I, S>(lines: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lines
        .into_iter()
        .filter_map(|line| {
            let line = line.as_ref().trim_end_matches(['\r', '\n']);
            if line == CONNECTION_ACCEPTED || line == SUBSCRIBED || line.trim().is_empty() {
                return None;
            }
            Some(line.replace(POSITIONING_PREFIX, ""))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn capture() -> Vec<&'static str> {
        vec![
            "Connection Accepted.\n",
            "Subscribed to topic!",
            r#"Positioning update: [{"success":false,"tagId":"1"}]"#,
            r#"[{"success":false,"tagId":"2"}]"#,
            "",
        ]
    }

    #[test]
    fn removes_phrases_and_prefix() {
        let cleared = clear_lines(capture());
        assert_eq!(
            cleared,
            vec![
                r#"[{"success":false,"tagId":"1"}]"#.to_string(),
                r#"[{"success":false,"tagId":"2"}]"#.to_string(),
            ]
        );
    }

    #[test]
    fn only_exact_phrases_are_dropped() {
        let cleared = clear_lines(["Connection Accepted. (retry)", " Subscribed to topic!"]);
        assert_eq!(cleared.len(), 2);
    }

    #[test]
    fn filtering_is_idempotent() {
        let once = clear_lines(capture());
        let twice = clear_lines(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn reads_lines_from_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("capture.txt");
        std::fs::write(&path, "Connection Accepted.\r\nPositioning update: []\n").expect("write");

        let lines = read_lines(&path).expect("readable");
        assert_eq!(clear_lines(lines), vec!["[]".to_string()]);
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = read_lines(Path::new("/nonexistent/capture.txt")).expect_err("must fail");
        assert!(err.to_string().contains("/nonexistent/capture.txt"));
    }
}
