//! Base URL of an inbound request, used to build published port links.

use std::fmt;

/// Host used when a request carries no `Host` header.
const FALLBACK_HOST: &str = "localhost";

/// Scheme and host the client used to reach the dashboard, minus the
/// dashboard's own listen port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseUrl(String);

impl BaseUrl {
    /// Derive the base URL from the request's `Host` header.
    ///
    /// A trailing `:<listen_port>` is removed from the host so that container
    /// ports can be appended to it. The port is never stripped from the middle.
    pub fn new(secure: bool, host: &str, listen_port: u16) -> Self {
        let scheme = if secure { "https" } else { "http" };
        let host = if host.is_empty() { FALLBACK_HOST } else { host };
        let suffix = format!(":{}", listen_port);
        let host = host.strip_suffix(&suffix).unwrap_or(host);

        Self(format!("{}://{}", scheme, host))
    }

    /// Same as [`BaseUrl::new`] for an optional `Host` header.
    pub fn from_host_header(secure: bool, host: Option<&str>, listen_port: u16) -> Self {
        Self::new(secure, host.unwrap_or_default(), listen_port)
    }

    /// Scheme and host, e.g. `http://nas.local`.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
