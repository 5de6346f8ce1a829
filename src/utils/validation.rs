use crate::utils::error::{Result, SiteError};
use regex::Regex;
use std::net::SocketAddr;
use std::sync::LazyLock;
use url::Url;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_'+\-.]+@([A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$")
        .expect("email pattern is a valid regex")
});

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(SiteError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(SiteError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(SiteError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_email(field_name: &str, value: &str) -> Result<()> {
    let local_part_ok = value
        .split('@')
        .next()
        .map(|local| !local.starts_with('.') && !local.ends_with('.'))
        .unwrap_or(false);

    if !EMAIL_RE.is_match(value) || value.contains("..") || !local_part_ok {
        return Err(SiteError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Invalid email address".to_string(),
        });
    }
    Ok(())
}

pub fn validate_socket_addr(field_name: &str, value: &str) -> Result<SocketAddr> {
    value
        .parse::<SocketAddr>()
        .map_err(|e| SiteError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Invalid socket address: {}", e),
        })
}

pub fn validate_positive_number(field_name: &str, value: u64, min_value: u64) -> Result<()> {
    if value < min_value {
        return Err(SiteError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(SiteError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// Rejects only the empty string; whitespace counts as content.
pub fn validate_present(field_name: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(SiteError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: String::new(),
            reason: "Value cannot be empty".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(SiteError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("linkedin", "https://example.com").is_ok());
        assert!(validate_url("linkedin", "http://example.com/in/me").is_ok());
        assert!(validate_url("linkedin", "").is_err());
        assert!(validate_url("linkedin", "not-a-url").is_err());
        assert!(validate_url("linkedin", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("email", "jane.doe@example.com").is_ok());
        assert!(validate_email("email", "jane+site@mail.example.org").is_ok());
        assert!(validate_email("email", "invalid-email").is_err());
        assert!(validate_email("email", "").is_err());
        assert!(validate_email("email", "jane@localhost").is_err());
        assert!(validate_email("email", ".jane@example.com").is_err());
        assert!(validate_email("email", "jane..doe@example.com").is_err());
    }

    #[test]
    fn test_validate_socket_addr() {
        assert!(validate_socket_addr("bind", "127.0.0.1:3000").is_ok());
        assert!(validate_socket_addr("bind", "[::1]:8080").is_ok());
        assert!(validate_socket_addr("bind", "localhost").is_err());
    }

    #[test]
    fn test_validate_present_accepts_whitespace() {
        assert!(validate_present("phone", "+33 6 00 00 00 00").is_ok());
        assert!(validate_present("phone", " ").is_ok());
        assert!(validate_present("phone", "").is_err());
        assert!(validate_non_empty_string("public_dir", " ").is_err());
    }

    #[test]
    fn test_validate_positive_number_and_range() {
        assert!(validate_positive_number("revalidate_secs", 5, 1).is_ok());
        assert!(validate_positive_number("revalidate_secs", 0, 1).is_err());
        assert!(validate_range("request_timeout_secs", 10, 1, 120).is_ok());
        assert!(validate_range("request_timeout_secs", 500, 1, 120).is_err());
    }
}
