//! Backend routes

use cooler_core::prelude::*;
use url::Url;

/// Every route the dashboard reads from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Stat,
    Log,
    SysInfo,
    ActuatorSysInfo,
    ValveStatus,
    Flow,
    /// Server-push stream
    Event,
}

impl Endpoint {
    pub const ALL: [Endpoint; 7] = [
        Endpoint::Stat,
        Endpoint::Log,
        Endpoint::SysInfo,
        Endpoint::ActuatorSysInfo,
        Endpoint::ValveStatus,
        Endpoint::Flow,
        Endpoint::Event,
    ];

    /// Path relative to the API base, without a leading slash
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Stat => "stat",
            Endpoint::Log => "proxy/json/api/log_view",
            Endpoint::SysInfo => "sysinfo",
            Endpoint::ActuatorSysInfo => "proxy/json/api/sysinfo",
            Endpoint::ValveStatus => "proxy/json/api/valve_status",
            Endpoint::Flow => "proxy/json/api/get_flow",
            Endpoint::Event => "proxy/event/api/event",
        }
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "/{}", self.path())
    }
}

/// Base URL of the backend API, e.g. `http://cooler.local/unit_cooler/api/`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiBase {
    base: Url,
}

impl ApiBase {
    /// Parse and normalize a base URL.
    ///
    /// Only `http` and `https` are accepted. A trailing slash is added so
    /// that endpoint paths are appended instead of replacing the last
    /// segment.
    pub fn parse(base: &str) -> Result<Self> {
        let mut url =
            Url::parse(base.trim()).map_err(|e| Error::invalid_url(format!("{base}: {e}")))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::invalid_url(format!(
                "{base}: unsupported scheme `{}`",
                url.scheme()
            )));
        }

        url.set_query(None);
        url.set_fragment(None);
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }

        Ok(Self { base: url })
    }

    pub fn as_str(&self) -> &str {
        self.base.as_str()
    }

    /// Absolute URL of an endpoint
    pub fn url(&self, endpoint: Endpoint) -> Result<Url> {
        self.base
            .join(endpoint.path())
            .map_err(|e| Error::invalid_url(format!("{}{}: {e}", self.base, endpoint.path())))
    }
}

impl std::fmt::Display for ApiBase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_without_trailing_slash() {
        let base = ApiBase::parse("http://cooler.local/unit_cooler/api").unwrap();
        assert_eq!(
            base.url(Endpoint::Stat).unwrap().as_str(),
            "http://cooler.local/unit_cooler/api/stat"
        );
    }

    #[test]
    fn test_join_all_endpoints() {
        let base = ApiBase::parse("http://127.0.0.1:5000/unit_cooler/api/").unwrap();
        for endpoint in Endpoint::ALL {
            let url = base.url(endpoint).unwrap();
            assert!(url.as_str().starts_with("http://127.0.0.1:5000/unit_cooler/api/"));
            assert!(url.as_str().ends_with(endpoint.path()));
        }
        assert_eq!(
            base.url(Endpoint::Event).unwrap().path(),
            "/unit_cooler/api/proxy/event/api/event"
        );
    }

    #[test]
    fn test_root_base() {
        let base = ApiBase::parse("https://example.com").unwrap();
        assert_eq!(
            base.url(Endpoint::SysInfo).unwrap().as_str(),
            "https://example.com/sysinfo"
        );
    }

    #[test]
    fn test_rejects_bad_urls() {
        assert!(!ApiBase::parse("not a url").unwrap_err().is_recoverable());
        assert!(ApiBase::parse("ftp://example.com/api").is_err());
    }

    #[test]
    fn test_query_is_dropped() {
        let base = ApiBase::parse("http://host/api?x=1#frag").unwrap();
        assert_eq!(base.as_str(), "http://host/api/");
    }
}
