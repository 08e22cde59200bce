//! Command execution context
//!
//! Loads configuration and wires the API client to the on-disk session and
//! an in-memory navigator, so handlers only deal with their own command.

use std::path::PathBuf;
use std::sync::Arc;

use log::debug;

use crate::cli::{GlobalOptions, OutputFormat};
use veritas_client::config::Config;
use veritas_client::{FileSessionStore, MemoryNavigator, Navigator, Result, SessionStore, VeritasClient, View};

/// Context for command execution containing config, client, and runtime options.
pub struct CommandContext {
    /// Loaded configuration (defaults when no file exists)
    pub config: Config,
    /// Resolved config file location
    pub config_path: PathBuf,
    /// API client wired to the persisted session
    pub client: VeritasClient,
    /// Persisted session token
    pub session: Arc<FileSessionStore>,
    /// Records views the client navigates to
    pub navigator: Arc<MemoryNavigator>,
    /// Effective API base URL
    pub base_url: String,
    /// Output format preference
    pub format: OutputFormat,
}

impl CommandContext {
    /// Create a new command context.
    ///
    /// No network traffic happens here; a missing config file means defaults.
    pub fn new(opts: &GlobalOptions) -> Result<Self> {
        let config_path = Config::resolve_path(opts.config_ref())?;
        let config = Config::load_or_default_at(opts.config_ref())?;
        let session = Arc::new(FileSessionStore::new(config.session_path()?));

        let initial = if session.get().is_some() {
            View::Dashboard
        } else {
            View::Login
        };
        let navigator = Arc::new(MemoryNavigator::new(initial));

        let base_url = config.base_url(opts.api_host_ref());
        debug!("Using API at {}", base_url);

        let client = VeritasClient::builder()
            .base_url(&base_url)
            .timeout(config.timeout())
            .session(session.clone())
            .navigator(navigator.clone())
            .build()?;

        Ok(Self {
            config,
            config_path,
            client,
            session,
            navigator,
            base_url,
            format: opts.format,
        })
    }

    /// Whether the client switched to the offline view during this command
    pub fn is_offline(&self) -> bool {
        self.navigator.current() == View::Offline
    }
}
