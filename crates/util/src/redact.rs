use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static SENSITIVE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)(authorization:\s*(?:bearer\s+)?)([\w\-\.=:/+~]+)",
        r"(?i)(bearer\s+)([\w\-\.=:/+~]+)",
        r"(?i)([A-Z0-9_]*?(KEY|TOKEN|SECRET|PASSWORD)=)([^\s]+)",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("redaction pattern compiles"))
    .collect()
});

/// Redacts values that look like secrets in a string.
pub fn redact_sensitive(input: &str) -> String {
    let mut redacted = input.to_string();
    for pattern in SENSITIVE_PATTERNS.iter() {
        redacted = pattern
            .replace_all(&redacted, |caps: &Captures| {
                let prefix = caps.get(1).map(|m| m.as_str()).unwrap_or("");
                format!("{prefix}<redacted>")
            })
            .to_string();
    }
    redacted
}

#[cfg(test)]
mod tests {
    use super::redact_sensitive;

    #[test]
    fn redacts_bearer_headers() {
        assert_eq!(redact_sensitive("authorization: Bearer abc123"), "authorization: Bearer <redacted>");
        assert_eq!(redact_sensitive("Bearer abc123"), "Bearer <redacted>");
    }

    #[test]
    fn redacts_token_assignments() {
        assert_eq!(redact_sensitive("VERDANT_API_TOKEN=abc123 rest"), "VERDANT_API_TOKEN=<redacted> rest");
    }

    #[test]
    fn leaves_plain_text_alone() {
        assert_eq!(redact_sensitive("GET /products/most-popular"), "GET /products/most-popular");
    }
}
