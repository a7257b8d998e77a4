//! Field tokenization for one logical record

/// CSV parser splitting a logical record into fields
///
/// Parsing is lenient and never fails: a quote inside an unquoted field is
/// kept as a literal, text between a closing quote and the next delimiter is
/// appended to the field, and a quoted field that never closes runs to the
/// end of the record.
#[derive(Debug, Clone, Copy)]
pub struct CsvParser {
    delimiter: u8,
    quote_char: u8,
}

impl Default for CsvParser {
    fn default() -> Self {
        Self::new(b',', b'"')
    }
}

impl CsvParser {
    /// Create a new CSV parser with custom delimiter and quote character
    pub fn new(delimiter: u8, quote_char: u8) -> Self {
        Self {
            delimiter,
            quote_char,
        }
    }

    /// Parse a logical record into fields
    ///
    /// The record may contain newlines inside quoted fields. A record ending
    /// with the delimiter yields a trailing empty field, and an empty record
    /// yields a single empty field.
    pub fn parse_line(&self, line: &str) -> Vec<String> {
        let delimiter = self.delimiter as char;
        let quote = self.quote_char as char;
        let mut fields = Vec::new();
        let mut chars = line.chars().peekable();

        loop {
            let mut field = String::new();

            if chars.peek() == Some(&quote) {
                chars.next();
                while let Some(ch) = chars.next() {
                    if ch != quote {
                        field.push(ch);
                    } else if chars.peek() == Some(&quote) {
                        // Escaped quote ("")
                        field.push(quote);
                        chars.next();
                    } else {
                        break;
                    }
                }
            }

            // Unquoted span, or stray text after a closing quote
            while let Some(&ch) = chars.peek() {
                if ch == delimiter {
                    break;
                }
                field.push(ch);
                chars.next();
            }

            fields.push(field);

            // Either the delimiter or end of record
            if chars.next().is_none() {
                break;
            }
        }

        fields
    }
}

/// Split a record with the default `,` delimiter and `"` quote
pub fn tokenize(record: &str) -> Vec<String> {
    CsvParser::default().parse_line(record)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple() {
        let parser = CsvParser::new(b',', b'"');
        assert_eq!(parser.parse_line("a,b,c"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_quoted() {
        let parser = CsvParser::new(b',', b'"');
        assert_eq!(parser.parse_line(r#""a,b",c"#), vec!["a,b", "c"]);
    }

    #[test]
    fn test_quoted_comma_is_not_split() {
        assert_eq!(
            tokenize(r#""Mallory, Alice",senior developer"#),
            vec!["Mallory, Alice", "senior developer"]
        );
    }

    #[test]
    fn test_escaped_quotes() {
        let parser = CsvParser::new(b',', b'"');
        assert_eq!(
            parser.parse_line(r#""Say ""Hello""",world"#),
            vec![r#"Say "Hello""#, "world"]
        );
    }

    #[test]
    fn test_empty_fields() {
        let parser = CsvParser::new(b',', b'"');
        assert_eq!(parser.parse_line("a,,c"), vec!["a", "", "c"]);
    }

    #[test]
    fn test_all_empty() {
        let parser = CsvParser::new(b',', b'"');
        assert_eq!(parser.parse_line(",,"), vec!["", "", ""]);
    }

    #[test]
    fn test_trailing_delimiter_keeps_empty_field() {
        assert_eq!(tokenize("a,b,"), vec!["a", "b", ""]);
        assert_eq!(tokenize(","), vec!["", ""]);
        assert_eq!(tokenize(r#""x","#), vec!["x", ""]);
    }

    #[test]
    fn test_quoted_with_newline() {
        let parser = CsvParser::new(b',', b'"');
        assert_eq!(
            parser.parse_line("\"Line 1\nLine 2\",normal"),
            vec!["Line 1\nLine 2", "normal"]
        );
    }

    #[test]
    fn test_mixed_quoted_unquoted() {
        let parser = CsvParser::new(b',', b'"');
        assert_eq!(parser.parse_line(r#"a,"b,c",d"#), vec!["a", "b,c", "d"]);
    }

    #[test]
    fn test_custom_delimiter() {
        let parser = CsvParser::new(b';', b'"');
        assert_eq!(parser.parse_line(r#"a;"b;c";d"#), vec!["a", "b;c", "d"]);
    }

    #[test]
    fn test_custom_quote_char() {
        let parser = CsvParser::new(b',', b'\'');
        assert_eq!(
            parser.parse_line("'it''s, fine',\"raw\""),
            vec!["it's, fine", "\"raw\""]
        );
    }

    #[test]
    fn test_empty_line() {
        let parser = CsvParser::new(b',', b'"');
        assert_eq!(parser.parse_line(""), vec![""]);
    }

    #[test]
    fn test_single_field() {
        let parser = CsvParser::new(b',', b'"');
        assert_eq!(parser.parse_line("hello"), vec!["hello"]);
    }

    #[test]
    fn test_quoted_empty() {
        let parser = CsvParser::new(b',', b'"');
        assert_eq!(parser.parse_line(r#""","""#), vec!["", ""]);
    }

    #[test]
    fn test_stray_quote_in_unquoted_field() {
        assert_eq!(tokenize(r#"a"b,c"#), vec![r#"a"b"#, "c"]);
        assert_eq!(tokenize(r#"5'10",x"#), vec![r#"5'10""#, "x"]);
    }

    #[test]
    fn test_text_after_closing_quote() {
        assert_eq!(tokenize(r#""ab"cd,e"#), vec!["abcd", "e"]);
    }

    #[test]
    fn test_unterminated_quote_runs_to_end() {
        assert_eq!(tokenize(r#"a,"b,c"#), vec!["a", "b,c"]);
    }

    #[test]
    fn test_whitespace_is_preserved() {
        assert_eq!(tokenize(" a , b "), vec![" a ", " b "]);
    }
}
