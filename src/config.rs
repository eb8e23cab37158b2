//! Configuration types for deck generation.
//!
//! All generation behaviour is controlled through [`GenerationConfig`],
//! built via its [`GenerationConfigBuilder`]. Credentials are an explicit
//! struct handed to the fetcher rather than ambient environment lookups
//! scattered through the code — the environment is consulted in exactly one
//! place ([`RedditCredentials::from_env`]) and only as a fallback, which
//! keeps the fetcher constructible in tests without touching process state.

use crate::error::Reddit2PptxError;
use std::env;
use std::fmt;
use std::path::PathBuf;

/// Environment variable names recognised by [`RedditCredentials::from_env`].
///
/// Lowercase on purpose: existing deployments already export them this
/// way, and renaming them would break every configured environment.
pub const CLIENT_ID_VAR: &str = "client_id";
pub const CLIENT_SECRET_VAR: &str = "client_secret";
pub const USER_AGENT_VAR: &str = "user_agent";

/// Credentials for the Reddit OAuth2 client-credentials flow.
#[derive(Clone)]
pub struct RedditCredentials {
    /// Application client id from <https://www.reddit.com/prefs/apps>.
    pub client_id: String,
    /// Application client secret.
    pub client_secret: String,
    /// User-agent string sent with every request. Reddit throttles or
    /// rejects clients with missing or generic user agents.
    pub user_agent: String,
}

impl RedditCredentials {
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        user_agent: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            user_agent: user_agent.into(),
        }
    }

    /// Read credentials from the `client_id`, `client_secret`, and
    /// `user_agent` environment variables.
    ///
    /// A missing variable is an authentication failure: the run could not
    /// possibly authenticate, so it fails with the same error kind a
    /// rejected handshake would produce.
    pub fn from_env() -> Result<Self, Reddit2PptxError> {
        let read = |var: &str| {
            env::var(var).map_err(|_| Reddit2PptxError::AuthenticationFailed {
                detail: format!("environment variable '{var}' is not set"),
            })
        };
        Ok(Self {
            client_id: read(CLIENT_ID_VAR)?,
            client_secret: read(CLIENT_SECRET_VAR)?,
            user_agent: read(USER_AGENT_VAR)?,
        })
    }
}

impl fmt::Debug for RedditCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedditCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

/// Configuration for a deck generation run.
///
/// Built via [`GenerationConfig::builder()`] or [`GenerationConfig::default()`].
///
/// # Example
/// ```rust
/// use reddit2pptx::GenerationConfig;
///
/// let config = GenerationConfig::builder()
///     .title("Cat tax")
///     .description("the newest cats")
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct GenerationConfig {
    /// Explicit Reddit credentials. If `None`, [`RedditCredentials::from_env`]
    /// is consulted when the run starts.
    pub credentials: Option<RedditCredentials>,

    /// Deck title, also the output file stem (`<title>.pptx`).
    /// If `None`, the subreddit name is used.
    pub title: Option<String>,

    /// Text for the title slide's subtitle placeholder. Default: empty.
    pub description: String,

    /// Directory the deck is written to. If `None`, the current working
    /// directory. Exists so tests can target a temp directory; the CLI
    /// never sets it.
    pub output_dir: Option<PathBuf>,

    /// Timeout for Reddit API requests (token + listing) in seconds. Default: 30.
    ///
    /// A bound changes no success-path behaviour, it only converts an
    /// indefinite hang on a stalled connection into an error.
    pub api_timeout_secs: u64,

    /// Timeout per image download in seconds. Default: 60.
    pub download_timeout_secs: u64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            credentials: None,
            title: None,
            description: String::new(),
            output_dir: None,
            api_timeout_secs: 30,
            download_timeout_secs: 60,
        }
    }
}

impl GenerationConfig {
    /// Create a new builder for `GenerationConfig`.
    pub fn builder() -> GenerationConfigBuilder {
        GenerationConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`GenerationConfig`].
#[derive(Debug)]
pub struct GenerationConfigBuilder {
    config: GenerationConfig,
}

impl GenerationConfigBuilder {
    pub fn credentials(mut self, credentials: RedditCredentials) -> Self {
        self.config.credentials = Some(credentials);
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.config.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.config.description = description.into();
        self
    }

    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.output_dir = Some(dir.into());
        self
    }

    pub fn api_timeout_secs(mut self, secs: u64) -> Self {
        self.config.api_timeout_secs = secs;
        self
    }

    pub fn download_timeout_secs(mut self, secs: u64) -> Self {
        self.config.download_timeout_secs = secs;
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<GenerationConfig, Reddit2PptxError> {
        let c = &self.config;
        if c.api_timeout_secs == 0 || c.download_timeout_secs == 0 {
            return Err(Reddit2PptxError::InvalidConfig(
                "Timeouts must be ≥ 1 second".into(),
            ));
        }
        if let Some(ref title) = c.title {
            if title.is_empty() {
                return Err(Reddit2PptxError::InvalidConfig(
                    "Title must not be empty".into(),
                ));
            }
        }
        Ok(self.config)
    }
}
