//! Number format codes

use ahash::AHashMap;
use once_cell::sync::Lazy;

use crate::error::{Error, Result};

/// First code available to custom number formats
pub const FIRST_CUSTOM_FORMAT: u16 = 164;

/// Longest pattern a FORMAT record can hold
pub const MAX_PATTERN_LEN: usize = 255;

/// Built-in format code for "General"
pub const FORMAT_GENERAL: u16 = 0x00;
/// Built-in format code for "0%"
pub const FORMAT_PERCENT: u16 = 0x09;
/// Built-in format code for "m/d/yy"
pub const FORMAT_DATE: u16 = 0x0E;
/// Built-in format code for "@"
pub const FORMAT_TEXT: u16 = 0x31;

/// Built-in formats, indexed by code. Codes 0x17-0x24 are reserved for
/// locale-specific formats and never match a pattern.
const BUILTIN_FORMATS: [Option<&str>; 50] = [
    Some("General"),                              // 0x00
    Some("0"),                                    // 0x01
    Some("0.00"),                                 // 0x02
    Some("#,##0"),                                // 0x03
    Some("#,##0.00"),                             // 0x04
    Some("\"$\"#,##0_);(\"$\"#,##0)"),            // 0x05
    Some("\"$\"#,##0_);[Red](\"$\"#,##0)"),       // 0x06
    Some("\"$\"#,##0.00_);(\"$\"#,##0.00)"),      // 0x07
    Some("\"$\"#,##0.00_);[Red](\"$\"#,##0.00)"), // 0x08
    Some("0%"),                                   // 0x09
    Some("0.00%"),                                // 0x0A
    Some("0.00E+00"),                             // 0x0B
    Some("# ?/?"),                                // 0x0C
    Some("# ??/??"),                              // 0x0D
    Some("m/d/yy"),                               // 0x0E
    Some("d-mmm-yy"),                             // 0x0F
    Some("d-mmm"),                                // 0x10
    Some("mmm-yy"),                               // 0x11
    Some("h:mm AM/PM"),                           // 0x12
    Some("h:mm:ss AM/PM"),                        // 0x13
    Some("h:mm"),                                 // 0x14
    Some("h:mm:ss"),                              // 0x15
    Some("m/d/yy h:mm"),                          // 0x16
    None,                                         // 0x17
    None,                                         // 0x18
    None,                                         // 0x19
    None,                                         // 0x1A
    None,                                         // 0x1B
    None,                                         // 0x1C
    None,                                         // 0x1D
    None,                                         // 0x1E
    None,                                         // 0x1F
    None,                                         // 0x20
    None,                                         // 0x21
    None,                                         // 0x22
    None,                                         // 0x23
    None,                                         // 0x24
    Some("#,##0_);(#,##0)"),                      // 0x25
    Some("#,##0_);[Red](#,##0)"),                 // 0x26
    Some("#,##0.00_);(#,##0.00)"),                // 0x27
    Some("#,##0.00_);[Red](#,##0.00)"),           // 0x28
    Some("_(* #,##0_);_(* (#,##0);_(* \"-\"_);_(@_)"), // 0x29
    Some("_(\"$\"* #,##0_);_(\"$\"* (#,##0);_(\"$\"* \"-\"_);_(@_)"), // 0x2A
    Some("_(* #,##0.00_);_(* (#,##0.00);_(* \"-\"??_);_(@_)"), // 0x2B
    Some("_(\"$\"* #,##0.00_);_(\"$\"* (#,##0.00);_(\"$\"* \"-\"??_);_(@_)"), // 0x2C
    Some("mm:ss"),                                // 0x2D
    Some("[h]:mm:ss"),                            // 0x2E
    Some("mm:ss.0"),                              // 0x2F
    Some("##0.0E+0"),                             // 0x30
    Some("@"),                                    // 0x31
];

static BUILTIN_LOOKUP: Lazy<AHashMap<&'static str, u16>> = Lazy::new(|| {
    BUILTIN_FORMATS
        .iter()
        .enumerate()
        .filter_map(|(code, pattern)| pattern.map(|p| (p, code as u16)))
        .collect()
});

/// Normalize aliases ("TEXT" is the text format "@")
fn normalize(pattern: &str) -> &str {
    if pattern.eq_ignore_ascii_case("TEXT") {
        "@"
    } else {
        pattern
    }
}

/// Look up the built-in code for a pattern
pub fn builtin_format(pattern: &str) -> Option<u16> {
    BUILTIN_LOOKUP.get(normalize(pattern)).copied()
}

/// Pattern of a built-in code
pub fn builtin_format_string(code: u16) -> Option<&'static str> {
    BUILTIN_FORMATS.get(code as usize).copied().flatten()
}

/// Check that a pattern is well-formed enough to store
///
/// Rejects empty or over-long patterns, more than four sections, and
/// unbalanced quotes or brackets.
pub fn validate_pattern(pattern: &str) -> Result<()> {
    let invalid = |reason: &str| Error::InvalidNumberFormat {
        pattern: pattern.to_string(),
        reason: reason.to_string(),
    };

    if pattern.trim().is_empty() {
        return Err(invalid("pattern is empty"));
    }
    if pattern.chars().count() > MAX_PATTERN_LEN {
        return Err(invalid("pattern is longer than 255 characters"));
    }

    let mut sections = 1;
    let mut in_quotes = false;
    let mut in_brackets = false;
    let mut chars = pattern.chars();
    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                in_quotes = false;
            }
            continue;
        }
        if in_brackets {
            match c {
                ']' => in_brackets = false,
                '[' => return Err(invalid("nested '['")),
                _ => {}
            }
            continue;
        }
        match c {
            '"' => in_quotes = true,
            '[' => in_brackets = true,
            ']' => return Err(invalid("unmatched ']'")),
            ';' => sections += 1,
            // Escapes and padding/fill markers take the next character literally
            '\\' | '_' | '*' => {
                if chars.next().is_none() {
                    return Err(invalid("pattern ends inside an escape"));
                }
            }
            _ => {}
        }
    }

    if in_quotes {
        return Err(invalid("unterminated quoted literal"));
    }
    if in_brackets {
        return Err(invalid("unterminated '['"));
    }
    if sections > 4 {
        return Err(invalid("more than four sections"));
    }
    Ok(())
}

/// Whether a pattern displays a date or time
pub fn is_date_pattern(pattern: &str) -> bool {
    let mut chars = pattern.chars().peekable();
    let mut in_quotes = false;
    while let Some(c) = chars.next() {
        if in_quotes {
            if c == '"' {
                in_quotes = false;
            }
            continue;
        }
        match c {
            '"' => in_quotes = true,
            '\\' | '_' | '*' => {
                chars.next();
            }
            '[' => {
                // Elapsed time ([h], [mm], [ss]) counts; colors and conditions don't
                let mut inner = String::new();
                for c in chars.by_ref() {
                    if c == ']' {
                        break;
                    }
                    inner.push(c);
                }
                let inner = inner.to_ascii_lowercase();
                if !inner.is_empty() && inner.chars().all(|c| matches!(c, 'h' | 'm' | 's')) {
                    return true;
                }
            }
            'y' | 'Y' | 'd' | 'D' | 'h' | 'H' | 's' | 'S' | 'm' | 'M' => return true,
            ';' => return false,
            _ => {}
        }
    }
    false
}

/// Custom number formats registered in a document
#[derive(Debug, Clone, Default)]
pub struct NumberFormats {
    custom: Vec<(u16, String)>,
    lookup: AHashMap<String, u16>,
}

impl NumberFormats {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of custom formats
    pub fn len(&self) -> usize {
        self.custom.len()
    }

    /// Whether no custom format is registered
    pub fn is_empty(&self) -> bool {
        self.custom.is_empty()
    }

    /// Custom formats in registration order
    pub fn custom(&self) -> &[(u16, String)] {
        &self.custom
    }

    /// Resolve a pattern to a code, registering a custom format when needed
    ///
    /// Built-in patterns return their built-in code; identical custom
    /// patterns return the code they were first registered with.
    pub fn get_or_create(&mut self, pattern: &str, limit: usize) -> Result<u16> {
        let pattern = normalize(pattern);
        if let Some(code) = builtin_format(pattern) {
            return Ok(code);
        }
        if let Some(&code) = self.lookup.get(pattern) {
            return Ok(code);
        }

        validate_pattern(pattern)?;
        if self.custom.len() >= limit {
            return Err(Error::FormatLimitExceeded { limit });
        }

        let code = self.next_code(limit)?;
        self.insert(code, pattern.to_string());
        Ok(code)
    }

    /// Register a format under a known code (as read from a FORMAT record)
    pub fn insert(&mut self, code: u16, pattern: String) {
        self.lookup.entry(pattern.clone()).or_insert(code);
        match self.custom.iter_mut().find(|(c, _)| *c == code) {
            Some(entry) => entry.1 = pattern,
            None => self.custom.push((code, pattern)),
        }
    }

    /// Pattern for a code, built-in or custom
    pub fn format_string(&self, code: u16) -> Option<&str> {
        self.custom
            .iter()
            .find(|(c, _)| *c == code)
            .map(|(_, p)| p.as_str())
            .or_else(|| builtin_format_string(code))
    }

    /// Whether a code displays a date or time
    pub fn is_date_format(&self, code: u16) -> bool {
        match code {
            0x0E..=0x16 | 0x2D..=0x2F => true,
            _ => self
                .custom
                .iter()
                .find(|(c, _)| *c == code)
                .map(|(_, p)| is_date_pattern(p))
                .unwrap_or(false),
        }
    }

    // Codes are 16 bits; nothing is allocated past a format read at 0xFFFF.
    fn next_code(&self, limit: usize) -> Result<u16> {
        let mut next = FIRST_CUSTOM_FORMAT;
        for (code, _) in &self.custom {
            let after = code
                .checked_add(1)
                .ok_or(Error::FormatLimitExceeded { limit })?;
            next = next.max(after);
        }
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_lookup() {
        assert_eq!(builtin_format("General"), Some(0));
        assert_eq!(builtin_format("0%"), Some(FORMAT_PERCENT));
        assert_eq!(builtin_format("m/d/yy"), Some(FORMAT_DATE));
        assert_eq!(builtin_format("TEXT"), Some(FORMAT_TEXT));
        assert_eq!(builtin_format("text"), Some(FORMAT_TEXT));
        assert_eq!(builtin_format("0.000"), None);
        assert_eq!(builtin_format_string(0x17), None);
        assert_eq!(builtin_format_string(0x2E), Some("[h]:mm:ss"));
    }

    #[test]
    fn test_get_or_create_dedupes() {
        let mut formats = NumberFormats::new();
        assert_eq!(formats.get_or_create("0%", 10).unwrap(), 9);
        assert!(formats.is_empty());

        let a = formats.get_or_create("0.000", 10).unwrap();
        let b = formats.get_or_create("#,##0.0", 10).unwrap();
        assert_eq!(a, FIRST_CUSTOM_FORMAT);
        assert_eq!(b, FIRST_CUSTOM_FORMAT + 1);
        assert_eq!(formats.get_or_create("0.000", 10).unwrap(), a);
        assert_eq!(formats.len(), 2);
        assert_eq!(formats.format_string(b), Some("#,##0.0"));
    }

    #[test]
    fn test_format_limit() {
        let mut formats = NumberFormats::new();
        formats.get_or_create("0.0", 1).unwrap();
        let err = formats.get_or_create("0.000", 1).unwrap_err();
        assert!(matches!(err, Error::FormatLimitExceeded { limit: 1 }));
        // Existing patterns still resolve at capacity
        assert!(formats.get_or_create("0.0", 1).is_ok());
    }

    /// Test that a format read at the last code leaves no room for new ones
    #[test]
    fn test_code_space_exhausted() {
        let mut formats = NumberFormats::new();
        formats.insert(u16::MAX, "0.0".to_string());
        let err = formats.get_or_create("0.000", 10).unwrap_err();
        assert!(err.is_capacity_error());
        assert_eq!(formats.len(), 1);
        // Already registered patterns still resolve
        assert_eq!(formats.get_or_create("0.0", 10).unwrap(), u16::MAX);
    }

    #[test]
    fn test_validate_pattern() {
        assert!(validate_pattern("0.00;[Red]-0.00").is_ok());
        assert!(validate_pattern("\"a;b\" 0").is_ok());
        assert!(validate_pattern("").is_err());
        assert!(validate_pattern("\"open").is_err());
        assert!(validate_pattern("[Red 0").is_err());
        assert!(validate_pattern("0]").is_err());
        assert!(validate_pattern("0;0;0;0;0").is_err());
        assert!(validate_pattern(&"0".repeat(256)).is_err());
    }

    #[test]
    fn test_insert_keeps_code() {
        let mut formats = NumberFormats::new();
        formats.insert(170, "yyyy-mm-dd".to_string());
        assert_eq!(formats.get_or_create("yyyy-mm-dd", 10).unwrap(), 170);
        assert_eq!(formats.get_or_create("0.0000", 10).unwrap(), 171);
        assert!(formats.is_date_format(170));
        assert!(!formats.is_date_format(171));
    }

    #[test]
    fn test_is_date_pattern() {
        assert!(is_date_pattern("yyyy-mm-dd"));
        assert!(is_date_pattern("[h]:mm"));
        assert!(!is_date_pattern("[Red]0.00"));
        assert!(!is_date_pattern("\"day\" 0"));
        assert!(!is_date_pattern("0.00E+00"));
    }
}
