use std::fmt;
use std::time::Duration;

use secrecy::SecretString;
use url::Url;

use crate::error::Result;

pub const DEFAULT_USER_AGENT: &str = concat!("wordpress-xmlrpc/", env!("CARGO_PKG_VERSION"));
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Where and how to reach the blog's XML-RPC endpoint (usually `<blog url>/xmlrpc.php`).
#[derive(Debug, Clone)]
pub struct Config {
    pub endpoint: Url,
    pub user_agent: String,
    pub timeout: Duration,
}

impl Config {
    pub fn new(endpoint: &str) -> Result<Config> {
        Ok(Config {
            endpoint: Url::parse(endpoint)?,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: DEFAULT_TIMEOUT,
        })
    }

    pub fn user_agent(mut self, user_agent: &str) -> Config {
        self.user_agent = user_agent.to_string();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Config {
        self.timeout = timeout;
        self
    }
}

/// Username and password sent with every privileged call.
pub struct Credentials {
    username: String,
    password: SecretString,
}

impl Credentials {
    pub fn new(username: &str, password: &str) -> Credentials {
        Credentials {
            username: username.to_string(),
            password: SecretString::from(password.to_string()),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &SecretString {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Mutable state of one logical session.
#[derive(Debug)]
pub struct Session {
    credentials: Credentials,
}

impl Session {
    pub fn new(credentials: Credentials) -> Session {
        Session { credentials }
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Takes effect from the next call on.
    pub fn set_credentials(&mut self, credentials: Credentials) {
        debug!("Session credentials replaced");
        self.credentials = credentials;
    }
}
