//! Desk configuration
//!
//! Read from the environment (and `.env`), then overridden by command line
//! flags.

use anyhow::{Context, bail};
use kansa_admin::{EditorConfig, RegistrationState, SubmitRelease};
use kansa_client::ClientConfig;
use kansa_router::{DEFAULT_HUGO_ADMIN_ROOT, RouterConfig};

pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeskConfig {
    /// Membership API base URL (env: KANSA_API_URL)
    pub api_url: String,
    /// Bearer token (env: KANSA_API_TOKEN)
    pub api_token: Option<String>,
    /// Request timeout in seconds (env: KANSA_API_TIMEOUT)
    pub api_timeout: u64,
    /// Badge printer as `unit#name` (env: KANSA_PRINTER)
    pub printer: Option<String>,
    /// Locked desks cannot view logs, upgrade or invoice (env: KANSA_LOCKED)
    pub locked: bool,
    /// External hugo admin location (env: KANSA_HUGO_ADMIN_ROOT)
    pub hugo_admin_root: String,
    /// Commit guard release policy (env: KANSA_SUBMIT_RELEASE)
    pub submit_release: SubmitRelease,
}

impl Default for DeskConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_token: None,
            api_timeout: 30,
            printer: None,
            locked: false,
            hugo_admin_root: DEFAULT_HUGO_ADMIN_ROOT.to_string(),
            submit_release: SubmitRelease::default(),
        }
    }
}

impl DeskConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through `lookup`; empty values count as unset
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        Ok(Self {
            api_url: var("KANSA_API_URL").unwrap_or(defaults.api_url),
            api_token: var("KANSA_API_TOKEN"),
            api_timeout: match var("KANSA_API_TIMEOUT") {
                Some(v) => v
                    .trim()
                    .parse()
                    .with_context(|| format!("KANSA_API_TIMEOUT must be seconds, got {v:?}"))?,
                None => defaults.api_timeout,
            },
            printer: var("KANSA_PRINTER"),
            locked: match var("KANSA_LOCKED") {
                Some(v) => parse_flag(&v).context("KANSA_LOCKED")?,
                None => defaults.locked,
            },
            hugo_admin_root: var("KANSA_HUGO_ADMIN_ROOT").unwrap_or(defaults.hugo_admin_root),
            submit_release: match var("KANSA_SUBMIT_RELEASE") {
                Some(v) => v
                    .parse()
                    .map_err(anyhow::Error::msg)
                    .context("KANSA_SUBMIT_RELEASE")?,
                None => defaults.submit_release,
            },
        })
    }

    pub fn client_config(&self) -> ClientConfig {
        let config = ClientConfig::new(&self.api_url).with_timeout(self.api_timeout);
        match &self.api_token {
            Some(token) => config.with_token(token),
            None => config,
        }
    }

    pub fn registration(&self) -> RegistrationState {
        RegistrationState::new(self.locked, self.printer.as_deref())
    }

    pub fn editor_config(&self) -> EditorConfig {
        EditorConfig::default().with_submit_release(self.submit_release)
    }

    pub fn router_config(&self) -> RouterConfig {
        RouterConfig::default().with_hugo_admin_root(&self.hugo_admin_root)
    }
}

fn parse_flag(value: &str) -> anyhow::Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => bail!("expected a boolean, got {other:?}"),
    }
}
