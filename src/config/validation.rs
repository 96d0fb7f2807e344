//! Configuration validation logic.

use crate::api::site::ProfileTarget;
use crate::config::loader::{Config, ProxyConfig};
use crate::config::modes::RunMode;
use crate::error::{Error, Result};
use regex::Regex;

/// Validate the entire configuration for the selected run mode.
pub fn validate_config(config: &Config) -> Result<()> {
    validate_proxy(&config.proxy)?;

    match config.options.mode {
        RunMode::Full | RunMode::Fetch => {
            validate_profile_urls(&config.target.profile_urls)?;
            validate_range(&config.options.range)?;
        }
        RunMode::Download => {
            if config.options.listing_path.is_none() {
                return Err(Error::MissingConfig(
                    "listing_path (the posts JSON written by a previous fetch)".to_string(),
                ));
            }
        }
        RunMode::ResetLedger => {}
    }

    Ok(())
}

/// Validate the configured profile URLs.
pub fn validate_profile_urls<S: AsRef<str>, I: IntoIterator<Item = S>>(urls: I) -> Result<()> {
    let urls: Vec<_> = urls.into_iter().collect();

    if urls.is_empty() {
        return Err(Error::MissingConfig(
            "profile_urls (at least one profile URL required)".to_string(),
        ));
    }

    for url in urls {
        let url = url.as_ref();
        ProfileTarget::parse(url).map_err(|e| match e {
            Error::UnsupportedDomain(_) => e,
            other => Error::ConfigValidation {
                field: "profile_urls".to_string(),
                message: format!("'{}' is not a profile URL: {}", url, other),
            },
        })?;
    }

    Ok(())
}

/// Reject obviously malformed range expressions before any network traffic.
///
/// Whether numeric bounds are offsets or post ids depends on the profile's
/// post count, so only the shape is checked here.
pub fn validate_range(range: &str) -> Result<()> {
    let range_pattern = Regex::new(r"^(all|\d+|(start|\d+)-(end|\d+))$")
        .map_err(|e| Error::Config(format!("Invalid range pattern: {}", e)))?;

    if range_pattern.is_match(range.trim()) {
        Ok(())
    } else {
        Err(Error::InvalidRangeExpression(range.to_string()))
    }
}

/// Validate the proxy section.
pub fn validate_proxy(proxy: &ProxyConfig) -> Result<()> {
    if let Some(endpoint) = proxy.endpoint() {
        url::Url::parse(&endpoint).map_err(|e| Error::ConfigValidation {
            field: "proxy.url".to_string(),
            message: format!("'{}' is not a valid proxy address: {}", endpoint, e),
        })?;
    }

    let has_user = proxy.username.as_deref().is_some_and(|u| !u.is_empty());
    let has_pass = proxy.password.as_deref().is_some_and(|p| !p.is_empty());
    if has_user != has_pass {
        return Err(Error::ConfigValidation {
            field: "proxy".to_string(),
            message: "Proxy username and password must be set together".to_string(),
        });
    }

    Ok(())
}

/// Extract a post ID from a post URL or a bare ID.
pub fn parse_post_ref(input: &str) -> Result<String> {
    let input = input.trim();

    let id_pattern = Regex::new(r"^[A-Za-z0-9_-]+$")
        .map_err(|e| Error::Config(format!("Invalid post id pattern: {}", e)))?;

    // If it's a URL, extract the post ID
    if input.starts_with("http://") || input.starts_with("https://") {
        // Pattern: https://kemono.su/patreon/user/123/post/456
        let post_pattern = Regex::new(r"/post/([^/?#]+)")
            .map_err(|e| Error::Config(format!("Invalid post URL pattern: {}", e)))?;

        if let Some(id) = post_pattern.captures(input).and_then(|c| c.get(1)) {
            if id_pattern.is_match(id.as_str()) {
                return Ok(id.as_str().to_string());
            }
        }

        return Err(Error::ConfigValidation {
            field: "post".to_string(),
            message: format!("Could not extract post ID from URL: {}", input),
        });
    }

    // Anything else with a slash: take the last segment
    let candidate = input.rsplit('/').next().unwrap_or(input);
    if id_pattern.is_match(candidate) {
        return Ok(candidate.to_string());
    }

    Err(Error::ConfigValidation {
        field: "post".to_string(),
        message: format!("Invalid post ID: '{}'", input),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_profile_urls() {
        assert!(validate_profile_urls(["https://kemono.su/patreon/user/12345"]).is_ok());
        assert!(validate_profile_urls(["https://coomer.su/onlyfans/user/someone"]).is_ok());
    }

    #[test]
    fn test_profile_urls_required() {
        let empty: [&str; 0] = [];
        assert!(matches!(
            validate_profile_urls(empty),
            Err(Error::MissingConfig(_))
        ));
    }

    #[test]
    fn test_profile_url_unsupported_domain() {
        assert!(matches!(
            validate_profile_urls(["https://example.com/patreon/user/1"]),
            Err(Error::UnsupportedDomain(_))
        ));
    }

    #[test]
    fn test_validate_range_shapes() {
        for ok in ["all", "0", "150", "12345678", "0-100", "start-end", "100-end", "1-99999999"] {
            assert!(validate_range(ok).is_ok(), "{ok} should be accepted");
        }
        for bad in ["", "everything", "1-2-3", "-5", "a-b", "10-"] {
            assert!(validate_range(bad).is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn test_download_mode_needs_listing() {
        let mut config = Config::default();
        config.options.mode = RunMode::Download;
        assert!(matches!(validate_config(&config), Err(Error::MissingConfig(_))));

        config.options.listing_path = Some("posts.json".into());
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_proxy_credentials_must_pair() {
        let proxy = ProxyConfig {
            url: Some("127.0.0.1:3128".into()),
            username: Some("user".into()),
            password: None,
        };
        assert!(validate_proxy(&proxy).is_err());
    }

    #[test]
    fn test_parse_post_ref_direct() {
        assert_eq!(parse_post_ref("98765432").unwrap(), "98765432");
        assert_eq!(parse_post_ref(" 98765432 ").unwrap(), "98765432");
    }

    #[test]
    fn test_parse_post_ref_url() {
        let url = "https://kemono.su/patreon/user/123/post/98765432";
        assert_eq!(parse_post_ref(url).unwrap(), "98765432");
        let url = "https://kemono.su/patreon/user/123/post/98765432?q=1";
        assert_eq!(parse_post_ref(url).unwrap(), "98765432");
    }

    #[test]
    fn test_parse_post_ref_invalid() {
        assert!(parse_post_ref("").is_err());
        assert!(parse_post_ref("https://kemono.su/patreon/user/123").is_err());
        assert!(parse_post_ref("not a post").is_err());
    }
}
