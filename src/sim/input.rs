use std::{fs, path::Path};

use super::job::ProcessSpec;
use crate::error::{Result, SimError};

/// Parse `pid arrival burst` lines. Blank lines and `#` comments are skipped.
pub fn parse_specs(text: &str) -> Result<Vec<ProcessSpec>> {
    let mut specs = Vec::new();

    for (lineno, raw) in text.lines().enumerate() {
        let line = raw.split('#').next().unwrap_or_default().trim();
        if line.is_empty() {
            continue;
        }
        let lineno = lineno + 1;

        let fields: Vec<&str> = line.split_whitespace().collect();
        let [pid, arrival, burst] = fields.as_slice() else {
            return Err(SimError::parse(
                lineno,
                format!("expected `pid arrival burst`, found {} fields", fields.len()),
            ));
        };

        let pid = pid
            .parse()
            .map_err(|e| SimError::parse(lineno, format!("bad pid {pid:?}: {e}")))?;
        let arrival = arrival
            .parse()
            .map_err(|e| SimError::parse(lineno, format!("bad arrival time {arrival:?}: {e}")))?;
        let burst = burst
            .parse()
            .map_err(|e| SimError::parse(lineno, format!("bad burst time {burst:?}: {e}")))?;

        specs.push(ProcessSpec::new(pid, arrival, burst));
    }

    Ok(specs)
}

pub fn load_specs(path: impl AsRef<Path>) -> Result<Vec<ProcessSpec>> {
    let text = fs::read_to_string(path)?;
    parse_specs(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_lines_and_skips_comments() {
        let text = "# pid arrival burst\n1 0 6\n\n2 2 4  # late\n   3\t4\t2\n";
        let specs = parse_specs(text).unwrap();

        assert_eq!(
            specs,
            vec![
                ProcessSpec::new(1, 0, 6),
                ProcessSpec::new(2, 2, 4),
                ProcessSpec::new(3, 4, 2),
            ]
        );
    }

    #[test]
    fn negative_values_parse_and_are_left_to_validation() {
        let specs = parse_specs("9 -2 -1").unwrap();
        assert_eq!(specs, vec![ProcessSpec::new(9, -2, -1)]);
    }

    #[test]
    fn wrong_field_count_reports_line() {
        let err = parse_specs("1 0 6\n2 2\n").unwrap_err();
        assert!(matches!(err, SimError::Parse { line: 2, .. }));
    }

    #[test]
    fn non_numeric_field_reports_line() {
        let err = parse_specs("\n\nx 0 1").unwrap_err();
        match err {
            SimError::Parse { line, msg } => {
                assert_eq!(line, 3);
                assert!(msg.starts_with("bad pid \"x\""));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_specs("/nonexistent/sjf-model/input.txt").unwrap_err();
        assert!(matches!(err, SimError::Io(_)));
    }
}
