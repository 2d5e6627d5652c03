//! Text input parsing for the CLI.
//!
//! One group per line: `Name: 1.0, 2.0, 3.0`. Values may be separated
//! by commas or whitespace. Blank lines and `#` comments are skipped. A
//! line whose values do not all parse is reported as malformed and
//! excluded — malformed groups never reach the engine.

use tracing::warn;

/// Parsed groups plus the names of lines that failed to parse.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedInput {
    pub groups: Vec<(String, Vec<f64>)>,
    pub malformed: Vec<String>,
}

/// Parse group-per-line text.
pub fn parse_groups(text: &str) -> ParsedInput {
    let mut parsed = ParsedInput::default();

    for (line_no, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((name, rest)) = line.split_once(':') else {
            warn!(line = line_no + 1, "line has no `name:` prefix, skipped");
            parsed.malformed.push(format!("line {}", line_no + 1));
            continue;
        };
        let name = name.trim();

        let tokens: Vec<&str> = rest
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|t| !t.is_empty())
            .collect();
        let values: Result<Vec<f64>, _> = tokens.iter().map(|t| t.parse::<f64>()).collect();

        match values {
            Ok(values) => parsed.groups.push((name.to_string(), values)),
            Err(_) => {
                warn!(group = name, "unparsable numeric value, group excluded");
                parsed.malformed.push(name.to_string());
            }
        }
    }

    parsed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comma_and_whitespace_separators() {
        let parsed = parse_groups("Control: 1.0, 2.0 3.0\nTarget: 4 5,6");
        assert_eq!(parsed.groups.len(), 2);
        assert_eq!(parsed.groups[0].0, "Control");
        assert_eq!(parsed.groups[0].1, [1.0, 2.0, 3.0]);
        assert_eq!(parsed.groups[1].1, [4.0, 5.0, 6.0]);
        assert!(parsed.malformed.is_empty());
    }

    #[test]
    fn test_blank_lines_and_comments_skipped() {
        let parsed = parse_groups("# header\n\nA: 1 2 3\n   \nB: 4 5 6\n");
        assert_eq!(parsed.groups.len(), 2);
        assert!(parsed.malformed.is_empty());
    }

    #[test]
    fn test_bad_token_excludes_whole_group() {
        let parsed = parse_groups("Good: 1 2 3\nBad: 1 two 3");
        assert_eq!(parsed.groups.len(), 1);
        assert_eq!(parsed.malformed, ["Bad"]);
    }

    #[test]
    fn test_line_without_colon_reported() {
        let parsed = parse_groups("1 2 3 4");
        assert!(parsed.groups.is_empty());
        assert_eq!(parsed.malformed, ["line 1"]);
    }

    #[test]
    fn test_negative_and_scientific_notation() {
        let parsed = parse_groups("G: -1.5, 2e3, 0.001");
        assert_eq!(parsed.groups[0].1, [-1.5, 2000.0, 0.001]);
    }
}
