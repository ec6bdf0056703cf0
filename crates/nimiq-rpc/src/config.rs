//! Client configuration.

use std::env;
use std::fmt;
use std::time::Duration;

use crate::error::Error;

/// Endpoint of a locally running node.
pub const DEFAULT_RPC_URL: &str = "http://localhost:8648";

pub const ENV_RPC_URL: &str = "NIMIQ_RPC_URL";
pub const ENV_RPC_USER: &str = "NIMIQ_RPC_USER";
pub const ENV_RPC_PASS: &str = "NIMIQ_RPC_PASS";
pub const ENV_RPC_TIMEOUT_SECS: &str = "NIMIQ_RPC_TIMEOUT_SECS";

/// HTTP basic-auth credentials attached to every request.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Settings for [`HttpTransport`](crate::rpc::HttpTransport).
///
/// Timeouts default to `None`: the transport then waits as long as the
/// HTTP stack does and never retries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub url: String,
    pub credentials: Option<Credentials>,
    pub connect_timeout: Option<Duration>,
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_RPC_URL.to_owned(),
            credentials: None,
            connect_timeout: None,
            timeout: None,
        }
    }
}

impl ClientConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.credentials = Some(Credentials::new(username, password));
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Build a configuration from `NIMIQ_RPC_*` environment variables,
    /// falling back to the defaults for anything unset.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, Error> {
        let url = lookup(ENV_RPC_URL).unwrap_or_else(|| DEFAULT_RPC_URL.to_owned());
        let credentials = resolve_credentials(
            lookup(ENV_RPC_USER).as_deref(),
            lookup(ENV_RPC_PASS).as_deref(),
        )?;
        let timeout = lookup(ENV_RPC_TIMEOUT_SECS)
            .map(|raw| {
                raw.trim()
                    .parse::<u64>()
                    .map(Duration::from_secs)
                    .map_err(|e| Error::Config(format!("invalid {ENV_RPC_TIMEOUT_SECS}: {e}")))
            })
            .transpose()?;

        Ok(Self {
            url,
            credentials,
            connect_timeout: None,
            timeout,
        })
    }
}

/// Pair up an optional username and password.
pub fn resolve_credentials(
    user: Option<&str>,
    pass: Option<&str>,
) -> Result<Option<Credentials>, Error> {
    match (user, pass) {
        (Some(u), Some(p)) => Ok(Some(Credentials::new(u, p))),
        (Some(_), None) | (None, Some(_)) => Err(Error::Config(
            "both rpc user and rpc pass must be set together".to_owned(),
        )),
        (None, None) => Ok(None),
    }
}
