use okitakoy_common::{Error, Result};
use std::fmt;
use url::{Host, Url};

/// URL scheme accepted for an API origin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scheme {
    Http,
    Https,
}

impl Scheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Scheme::Http => "http",
            Scheme::Https => "https",
        }
    }

    pub fn default_port(&self) -> u16 {
        match self {
            Scheme::Http => 80,
            Scheme::Https => 443,
        }
    }
}

/// Network origin (scheme + host + port) the frontend treats as its backend.
///
/// The string form is the browser serialization of the origin: lowercase,
/// IDNA-encoded host, default port omitted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Origin {
    scheme: Scheme,
    host: String,
    port: u16,
    serialized: String,
}

impl Origin {
    /// Parse `scheme://host[:port]`, tolerating a trailing slash
    pub fn parse(input: &str) -> Result<Self> {
        let invalid = |reason: &str| Error::InvalidOrigin(format!("{:?}: {}", input, reason));

        let url = Url::parse(input.trim()).map_err(|e| invalid(&e.to_string()))?;

        let scheme = match url.scheme() {
            "http" => Scheme::Http,
            "https" => Scheme::Https,
            _ => return Err(invalid("scheme must be http or https")),
        };

        if !url.username().is_empty() || url.password().is_some() {
            return Err(invalid("origin must not carry credentials"));
        }
        if url.path() != "/" || url.query().is_some() || url.fragment().is_some() {
            return Err(invalid("origin must not carry a path or query"));
        }

        match url.host() {
            Some(Host::Domain(domain)) => {
                let valid_label = |label: &str| {
                    !label.is_empty()
                        && label.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-')
                };
                if !domain.split('.').all(valid_label) {
                    return Err(invalid("host is not a valid domain name"));
                }
            }
            Some(Host::Ipv4(_)) | Some(Host::Ipv6(_)) => {}
            None => return Err(invalid("empty host")),
        }

        let port = url
            .port_or_known_default()
            .unwrap_or_else(|| scheme.default_port());
        if port == 0 {
            return Err(invalid("port must be 1-65535"));
        }

        let host = url
            .host_str()
            .ok_or_else(|| invalid("empty host"))?
            .to_string();

        Ok(Self {
            scheme,
            host,
            port,
            serialized: url.origin().ascii_serialization(),
        })
    }

    /// Origin of a locally bound listener.
    ///
    /// Wildcard bind addresses are not reachable by name, so they are
    /// reported as `localhost`. Port 0 is rejected: the origin would not
    /// name the port the listener ends up on.
    pub fn from_bind(host: &str, port: u16, tls: bool) -> Result<Self> {
        let scheme = if tls { Scheme::Https } else { Scheme::Http };

        let host = match host {
            "" | "0.0.0.0" | "::" | "[::]" => "localhost".to_string(),
            h if h.contains(':') && !h.starts_with('[') => format!("[{}]", h),
            h => h.to_string(),
        };

        Self::parse(&format!("{}://{}:{}", scheme.as_str(), host, port))
    }

    pub fn scheme(&self) -> Scheme {
        self.scheme
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    /// Effective port, filling in the scheme default
    pub fn port(&self) -> u16 {
        self.port
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.serialized)
    }
}
