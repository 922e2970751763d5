//! Line grammar of the certdata dump
//!
//! Values come in two shapes:
//!
//! ```text
//! NAME TYPE VALUE...
//!
//! NAME MULTILINE_OCTAL
//! \060\202...
//! END
//! ```

pub const MULTILINE_OCTAL: &str = "MULTILINE_OCTAL";
pub const UTF8: &str = "UTF8";
pub const END: &str = "END";
pub const BEGINDATA: &str = "BEGINDATA";

/// Grammatical shape of a single line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Blank, comment or `BEGINDATA` marker
    Ignorable,
    /// `NAME TYPE VALUE...`
    SingleValue,
    /// `NAME MULTILINE_OCTAL`
    MultilineHeader,
    /// Octal digits and backslashes only
    MultilineBody,
    /// `END`
    Terminator,
    /// Matches none of the forms above
    Malformed,
}

/// Whether a line carries no data at all
pub fn is_ignored(line: &str) -> bool {
    let line = line.trim_end();
    line.is_empty() || line.starts_with('#') || line == BEGINDATA
}

/// Classify a line against the dump grammar
pub fn classify(line: &str) -> LineKind {
    if is_ignored(line) {
        return LineKind::Ignorable;
    }

    let tokens: Vec<&str> = line.split_whitespace().collect();
    match tokens.as_slice() {
        [_, _, _, ..] => LineKind::SingleValue,
        [_, kind] if *kind == MULTILINE_OCTAL => LineKind::MultilineHeader,
        [token] if *token == END => LineKind::Terminator,
        [token] if *token == BEGINDATA => LineKind::Ignorable,
        [token] if is_octal_body(token) => LineKind::MultilineBody,
        _ => LineKind::Malformed,
    }
}

fn is_octal_body(token: &str) -> bool {
    token.chars().all(|c| matches!(c, '0'..='7' | '\\'))
}

/// Split off the first whitespace-delimited token, returning it and the
/// remainder with leading whitespace removed
pub fn pop_token(line: &str) -> (&str, &str) {
    let line = line.trim_start();
    match line.split_once(char::is_whitespace) {
        Some((token, rest)) => (token, rest.trim_start()),
        None => (line, ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ignored_lines() {
        assert!(is_ignored(""));
        assert!(is_ignored("   "));
        assert!(is_ignored("# This Source Code Form is subject to the terms"));
        assert!(is_ignored("BEGINDATA"));
        assert!(!is_ignored("CKA_CLASS CK_OBJECT_CLASS CKO_CERTIFICATE"));
    }

    #[test]
    fn test_classify_forms() {
        assert_eq!(
            classify("CKA_CLASS CK_OBJECT_CLASS CKO_CERTIFICATE"),
            LineKind::SingleValue
        );
        assert_eq!(
            classify("CKA_LABEL UTF8 \"GlobalSign Root CA\""),
            LineKind::SingleValue
        );
        assert_eq!(classify("CKA_VALUE MULTILINE_OCTAL"), LineKind::MultilineHeader);
        assert_eq!(classify("\\060\\202\\003\\165"), LineKind::MultilineBody);
        assert_eq!(classify("END"), LineKind::Terminator);
        assert_eq!(classify("# comment"), LineKind::Ignorable);
    }

    #[test]
    fn test_classify_malformed() {
        assert_eq!(classify("CKA_TOKEN CK_BBOOL"), LineKind::Malformed);
        assert_eq!(classify("garbage"), LineKind::Malformed);
        assert_eq!(classify("\\060\\x82"), LineKind::Malformed);
    }

    #[test]
    fn test_pop_token() {
        assert_eq!(
            pop_token("CKA_LABEL UTF8 \"Foo Bar\""),
            ("CKA_LABEL", "UTF8 \"Foo Bar\"")
        );
        assert_eq!(pop_token("UTF8   \"Foo\""), ("UTF8", "\"Foo\""));
        assert_eq!(pop_token("END"), ("END", ""));
        assert_eq!(pop_token(""), ("", ""));
    }
}
