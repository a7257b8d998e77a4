//! Quote-state tracking across physical lines

/// Tracks whether a quoted field is still open at the end of a physical line
#[derive(Debug, Clone, Copy)]
pub struct QuoteTracker {
    quote_char: char,
}

impl Default for QuoteTracker {
    fn default() -> Self {
        Self::new(b'"')
    }
}

impl QuoteTracker {
    /// Create a tracker for a custom quote character
    pub fn new(quote_char: u8) -> Self {
        Self {
            quote_char: quote_char as char,
        }
    }

    /// Scan one physical line and return the quote state after it
    ///
    /// A doubled quote is a literal and leaves the state unchanged; any other
    /// quote toggles it. Feed each physical line exactly once: rescanning
    /// joined text would pair quotes across the line break.
    pub fn track(&self, line: &str, mut in_quotes: bool) -> bool {
        let mut chars = line.chars().peekable();

        while let Some(ch) = chars.next() {
            if ch != self.quote_char {
                continue;
            }
            if chars.peek() == Some(&self.quote_char) {
                chars.next();
            } else {
                in_quotes = !in_quotes;
            }
        }

        in_quotes
    }
}

/// Quote state after `line` using the default `"` quote character
pub fn track(line: &str, in_quotes: bool) -> bool {
    QuoteTracker::default().track(line, in_quotes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_quotes() {
        assert!(!track("a,b,c", false));
        assert!(track("a,b,c", true));
    }

    #[test]
    fn test_balanced_quotes() {
        assert!(!track(r#""a,b",c"#, false));
    }

    #[test]
    fn test_open_quote() {
        assert!(track(r#"1,"first line"#, false));
        assert!(!track(r#"second line",2"#, true));
    }

    #[test]
    fn test_doubled_quote_is_literal() {
        assert!(track(r#""say ""hi"#, false));
        assert!(!track(r#""say ""hi""""#, false));
        assert!(!track(r#""""#, false));
    }

    #[test]
    fn test_trailing_odd_quote_opens_field() {
        assert!(track(r#"a,""""#, false));
        assert!(!track(r#"a,"""#, false));
    }

    #[test]
    fn test_custom_quote_char() {
        let tracker = QuoteTracker::new(b'\'');
        assert!(tracker.track("'open", false));
        assert!(!tracker.track(r#""ignored"#, false));
        assert!(!tracker.track("'it''s'", false));
    }
}
