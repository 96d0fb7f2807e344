//! Supported sites and profile URL parsing.

use url::Url;

use crate::error::{Error, Result};

/// Hosts whose profiles can be downloaded.
pub const SUPPORTED_HOSTS: [&str; 2] = ["kemono.su", "coomer.su"];

/// A creator profile on one of the supported sites.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileTarget {
    /// Host name, e.g. `kemono.su`.
    pub host: String,
    /// Origin serving both the API and the site, e.g. `https://kemono.su`.
    pub server: String,
    /// Service the creator publishes through (`patreon`, `fanbox`, ...).
    pub service: String,
    /// Creator id on that service.
    pub user_id: String,
}

impl ProfileTarget {
    /// Parse `https://{host}/{service}/user/{user_id}`.
    ///
    /// The host is checked against [`SUPPORTED_HOSTS`]; service and user id
    /// are taken positionally from the end of the path.
    pub fn parse(profile_url: &str) -> Result<Self> {
        let url = Url::parse(profile_url.trim())?;
        let host = url
            .host_str()
            .ok_or_else(|| Error::UnsupportedDomain(profile_url.to_string()))?;

        if !SUPPORTED_HOSTS.contains(&host) {
            return Err(Error::UnsupportedDomain(host.to_string()));
        }

        let segments: Vec<&str> = url
            .path_segments()
            .map(|s| s.filter(|seg| !seg.is_empty()).collect())
            .unwrap_or_default();

        if segments.len() < 3 {
            return Err(Error::ConfigValidation {
                field: "profile_url".to_string(),
                message: format!(
                    "Expected https://{}/<service>/user/<id>, got '{}'",
                    host, profile_url
                ),
            });
        }

        Ok(Self {
            host: host.to_string(),
            server: format!("https://{}", host),
            service: segments[segments.len() - 3].to_string(),
            user_id: segments[segments.len() - 1].to_string(),
        })
    }

    /// Build a target against an explicit origin, bypassing the host allow-list.
    ///
    /// Used for mirrors and local test servers.
    pub fn with_server(server: &str, service: &str, user_id: &str) -> Result<Self> {
        let url = Url::parse(server)?;
        let host = url.host_str().unwrap_or("localhost").to_string();

        Ok(Self {
            host,
            server: server.trim_end_matches('/').to_string(),
            service: service.to_string(),
            user_id: user_id.to_string(),
        })
    }

    /// Folder name for the site: the first label of the host (`kemono`, `coomer`).
    pub fn site_dir(&self) -> &str {
        self.host.split('.').next().unwrap_or(&self.host)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_kemono_profile() {
        let target = ProfileTarget::parse("https://kemono.su/patreon/user/12345").unwrap();
        assert_eq!(target.host, "kemono.su");
        assert_eq!(target.server, "https://kemono.su");
        assert_eq!(target.service, "patreon");
        assert_eq!(target.user_id, "12345");
        assert_eq!(target.site_dir(), "kemono");
    }

    #[test]
    fn test_parse_coomer_profile_with_trailing_slash() {
        let target = ProfileTarget::parse("https://coomer.su/onlyfans/user/somebody/").unwrap();
        assert_eq!(target.service, "onlyfans");
        assert_eq!(target.user_id, "somebody");
        assert_eq!(target.site_dir(), "coomer");
    }

    #[test]
    fn test_unsupported_domain() {
        let err = ProfileTarget::parse("https://example.com/patreon/user/1").unwrap_err();
        assert!(matches!(err, Error::UnsupportedDomain(host) if host == "example.com"));
    }

    #[test]
    fn test_too_short_path() {
        assert!(ProfileTarget::parse("https://kemono.su/patreon").is_err());
    }

    #[test]
    fn test_with_server_trims_slash() {
        let target = ProfileTarget::with_server("http://127.0.0.1:8080/", "patreon", "1").unwrap();
        assert_eq!(target.server, "http://127.0.0.1:8080");
        assert_eq!(target.host, "127.0.0.1");
    }
}
