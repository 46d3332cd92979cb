//! Code extraction and set-body encoding

use regex::Regex;

use crate::config::FormEncoding;

/// First run of six ASCII digits, unanchored
pub const CODE_PATTERN: &str = "[0-9]{6}";

pub fn code_pattern() -> Regex {
    Regex::new(CODE_PATTERN).expect("code pattern is valid")
}

/// Leftmost six-digit run in `body`, if any
pub fn extract_code<'a>(pattern: &Regex, body: &'a str) -> Option<&'a str> {
    pattern.find(body).map(|m| m.as_str())
}

/// Build the POST body for a password update
pub fn encode_set_body(password: &str, secret: &str, encoding: FormEncoding) -> String {
    match encoding {
        // Missing `=` after `secret` and trailing `&` are what the router has always received.
        FormEncoding::Legacy => format!("password={}&secret{}&", password, secret),
        FormEncoding::Standard => url::form_urlencoded::Serializer::new(String::new())
            .append_pair("password", password)
            .append_pair("secret", secret)
            .finish(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(body: &str) -> Option<&str> {
        extract_code(&code_pattern(), body)
    }

    #[test]
    fn test_extract_surrounded_by_text() {
        assert_eq!(extract("code: 482913 valid"), Some("482913"));
        assert_eq!(extract("<td>pw</td><td>905112</td>"), Some("905112"));
    }

    #[test]
    fn test_extract_no_match() {
        assert_eq!(extract("no code here"), None);
        assert_eq!(extract("12345"), None);
        assert_eq!(extract("12 34 56 78 90 12"), None);
        assert_eq!(extract(""), None);
    }

    #[test]
    fn test_extract_leftmost() {
        assert_eq!(extract("111111 222222"), Some("111111"));
        assert_eq!(extract("12345 678901 234567"), Some("678901"));
    }

    #[test]
    fn test_extract_long_run_takes_first_six() {
        assert_eq!(extract("1234567"), Some("123456"));
        assert_eq!(extract("id=00012345678"), Some("000123"));
    }

    #[test]
    fn test_extract_ignores_non_ascii_digits() {
        // Fullwidth digits are not [0-9]
        assert_eq!(extract("１２３４５６"), None);
        assert_eq!(extract("密码：３３３333444"), Some("333444"));
    }

    #[test]
    fn test_legacy_encoding() {
        assert_eq!(
            encode_set_body("abc", "def", FormEncoding::Legacy),
            "password=abc&secretdef&"
        );
        assert_eq!(
            encode_set_body("a b", "x&y", FormEncoding::Legacy),
            "password=a b&secretx&y&"
        );
    }

    #[test]
    fn test_standard_encoding() {
        assert_eq!(
            encode_set_body("abc", "def", FormEncoding::Standard),
            "password=abc&secret=def"
        );
        assert_eq!(
            encode_set_body("a b", "x&y=z", FormEncoding::Standard),
            "password=a+b&secret=x%26y%3Dz"
        );
    }
}
