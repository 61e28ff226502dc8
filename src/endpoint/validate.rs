use crate::error::{Result, RsketchError};
use url::Url;

/// Accepts `http(s)://host[:port][/path]`. Returns the trimmed input on
/// success so callers store exactly what was typed.
pub fn validate_base_url(raw: &str) -> Result<String> {
    let candidate = raw.trim();
    if candidate.is_empty() {
        return Err(RsketchError::InvalidUrl("URL is empty".into()));
    }

    let parsed = Url::parse(candidate)
        .map_err(|e| RsketchError::InvalidUrl(format!("'{}': {}", candidate, e)))?;

    match parsed.scheme() {
        "http" | "https" => {}
        other => {
            return Err(RsketchError::InvalidUrl(format!(
                "'{}': unsupported scheme '{}', expected http or https",
                candidate, other
            )))
        }
    }

    match parsed.host_str() {
        Some(host) if !host.is_empty() => {}
        _ => {
            return Err(RsketchError::InvalidUrl(format!(
                "'{}': missing host",
                candidate
            )))
        }
    }

    if parsed.query().is_some() || parsed.fragment().is_some() {
        return Err(RsketchError::InvalidUrl(format!(
            "'{}': query strings and fragments are not allowed in a base URL",
            candidate
        )));
    }

    Ok(candidate.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_tunnel_and_local_urls() {
        for url in [
            "https://abc123.example.com",
            "https://9ca1342d4666.ngrok-free.app",
            "http://localhost:8000",
            "http://127.0.0.1:7860/api",
        ] {
            assert_eq!(validate_base_url(url).unwrap(), url);
        }
    }

    #[test]
    fn test_trims_whitespace() {
        assert_eq!(
            validate_base_url("  https://abc.example.com \n").unwrap(),
            "https://abc.example.com"
        );
    }

    #[test]
    fn test_rejects_malformed() {
        for url in ["", "   ", "not-a-url", "ftp://files.example.com", "localhost:8000", "https://", "https://x.example.com/?a=1"] {
            let err = validate_base_url(url).unwrap_err();
            assert!(err.is_invalid_url(), "{url} should be rejected");
        }
    }
}
