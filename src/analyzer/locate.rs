//! Asterisk locations, line by line

use crate::AsteriskLocation;

/// Every line that contains an asterisk, in order
pub fn locate_asterisks(text: &str) -> Vec<AsteriskLocation> {
    text.lines()
        .enumerate()
        .filter_map(|(zero_indexed, line)| {
            let count = line.matches('*').count();
            (count > 0).then(|| AsteriskLocation {
                line: zero_indexed + 1,
                count,
                text: line.trim().to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_asterisks() {
        assert!(locate_asterisks("").is_empty());
        assert!(locate_asterisks("Plain text.\n\nMore text.").is_empty());
    }

    #[test]
    fn test_reports_line_numbers_and_counts() {
        let text = "Intro line\n  **Step one** do this\nplain\n* bullet";
        let locations = locate_asterisks(text);
        assert_eq!(locations.len(), 2);
        assert_eq!(locations[0].line, 2);
        assert_eq!(locations[0].count, 4);
        assert_eq!(locations[0].text, "**Step one** do this");
        assert_eq!(locations[1].line, 4);
        assert_eq!(locations[1].count, 1);
    }

    #[test]
    fn test_crlf_lines() {
        let locations = locate_asterisks("a\r\n*b*\r\n");
        assert_eq!(locations.len(), 1);
        assert_eq!(locations[0].line, 2);
        assert_eq!(locations[0].text, "*b*");
    }
}
