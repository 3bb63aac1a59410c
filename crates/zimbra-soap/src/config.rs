//! Connection configuration types.

use std::time::Duration;

/// Default path of the admin SOAP service.
pub const DEFAULT_PATH: &str = "/service/admin/soap";

/// Transport security mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Security {
    /// Plain HTTP. **Not recommended for production.**
    Http,
    /// HTTPS. **Recommended.**
    #[default]
    Https,
}

impl Security {
    /// Returns the default admin port for this security mode.
    #[must_use]
    pub const fn default_port(self) -> u16 {
        match self {
            Self::Http => 7070,
            Self::Https => 7071,
        }
    }

    /// Returns the URL scheme.
    #[must_use]
    pub const fn scheme(self) -> &'static str {
        match self {
            Self::Http => "http",
            Self::Https => "https",
        }
    }
}

/// Admin endpoint configuration.
#[derive(Clone)]
pub struct Config {
    /// Server hostname.
    pub host: String,
    /// Server port.
    pub port: u16,
    /// Security mode.
    pub security: Security,
    /// Path of the SOAP service.
    pub path: String,
    /// Admin account name used for `AuthRequest`.
    pub admin_name: String,
    /// Admin account password.
    pub admin_password: String,
    /// Whole-request timeout.
    pub timeout: Duration,
    /// Connection timeout.
    pub connect_timeout: Duration,
    /// Accept self-signed certificates (common on admin ports).
    pub accept_invalid_certs: bool,
}

impl Config {
    /// Creates a configuration using HTTPS on the admin port.
    #[must_use]
    pub fn new(
        host: impl Into<String>,
        admin_name: impl Into<String>,
        admin_password: impl Into<String>,
    ) -> Self {
        ConfigBuilder::new(host, admin_name, admin_password).build()
    }

    /// Creates a configuration builder.
    #[must_use]
    pub fn builder(
        host: impl Into<String>,
        admin_name: impl Into<String>,
        admin_password: impl Into<String>,
    ) -> ConfigBuilder {
        ConfigBuilder::new(host, admin_name, admin_password)
    }

    /// Returns the full SOAP endpoint URL.
    #[must_use]
    pub fn endpoint(&self) -> String {
        format!(
            "{}://{}:{}{}",
            self.security.scheme(),
            self.host,
            self.port,
            self.path
        )
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("security", &self.security)
            .field("path", &self.path)
            .field("admin_name", &self.admin_name)
            .field("admin_password", &"<redacted>")
            .field("timeout", &self.timeout)
            .field("connect_timeout", &self.connect_timeout)
            .field("accept_invalid_certs", &self.accept_invalid_certs)
            .finish()
    }
}

/// Builder for endpoint configuration.
#[derive(Clone)]
pub struct ConfigBuilder {
    host: String,
    port: Option<u16>,
    security: Security,
    path: String,
    admin_name: String,
    admin_password: String,
    timeout: Duration,
    connect_timeout: Duration,
    accept_invalid_certs: bool,
}

impl ConfigBuilder {
    /// Creates a new builder with the given hostname and admin credentials.
    #[must_use]
    pub fn new(
        host: impl Into<String>,
        admin_name: impl Into<String>,
        admin_password: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            port: None,
            security: Security::Https,
            path: DEFAULT_PATH.to_string(),
            admin_name: admin_name.into(),
            admin_password: admin_password.into(),
            timeout: Duration::from_secs(60),
            connect_timeout: Duration::from_secs(30),
            accept_invalid_certs: false,
        }
    }

    /// Sets the port.
    #[must_use]
    pub const fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Sets the security mode.
    #[must_use]
    pub const fn security(mut self, security: Security) -> Self {
        self.security = security;
        self
    }

    /// Sets the service path.
    #[must_use]
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Sets the whole-request timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the connection timeout.
    #[must_use]
    pub const fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Accepts invalid (e.g. self-signed) certificates.
    #[must_use]
    pub const fn accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }

    /// Builds the configuration.
    #[must_use]
    pub fn build(self) -> Config {
        Config {
            host: self.host,
            port: self.port.unwrap_or_else(|| self.security.default_port()),
            security: self.security,
            path: self.path,
            admin_name: self.admin_name,
            admin_password: self.admin_password,
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
            accept_invalid_certs: self.accept_invalid_certs,
        }
    }
}
