use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File, Map};
use serde::Deserialize;
use std::env;
use std::net::SocketAddr;

use crate::extractors::RuleSet;

/// Environment variable the original deployment used for the listen address
pub const LEGACY_LISTEN_ADDR_ENV: &str = "ALRECIPE_PARSER_LISTEN_ADDR";

/// Service configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServiceConfig {
    /// Address the HTTP server binds; a leading ':' means all interfaces
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
    /// Site that bare recipe identifiers are resolved against
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    #[serde(default)]
    pub user_agent: Option<String>,
    /// Log every captured field at debug level
    #[serde(default = "default_trace_captures")]
    pub trace_captures: bool,
    /// Overrides the built-in allrecipes rule set
    #[serde(default)]
    pub rules: Option<RuleSet>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            base_url: default_base_url(),
            timeout: default_timeout(),
            user_agent: None,
            trace_captures: default_trace_captures(),
            rules: None,
        }
    }
}

// Default value functions
fn default_listen_addr() -> String {
    ":4007".to_string()
}

fn default_base_url() -> String {
    "https://www.allrecipes.com".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_trace_captures() -> bool {
    true
}

impl ServiceConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. ALRECIPE_PARSER_LISTEN_ADDR for the listen address
    /// 2. Environment variables with ALLRECIPES__ prefix
    /// 3. allrecipes.toml file in current directory
    /// 4. Default values
    ///
    /// Environment variable format: ALLRECIPES__BASE_URL
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }

    /// Parse `listen_addr`, expanding the `:port` shorthand to all interfaces.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let addr = if self.listen_addr.starts_with(':') {
            format!("0.0.0.0{}", self.listen_addr)
        } else {
            self.listen_addr.clone()
        };
        addr.parse().map_err(|e| {
            ConfigError::Message(format!("invalid listen address {:?}: {}", self.listen_addr, e))
        })
    }

    pub fn rules(&self) -> RuleSet {
        self.rules.clone().unwrap_or_default()
    }
}

/// Load configuration; see [`ServiceConfig::load`].
pub fn load_config() -> Result<ServiceConfig, ConfigError> {
    let builder = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("allrecipes").required(false));

    with_environment(builder, env::vars().collect())
}

/// Layer the environment in `vars` over `builder` and deserialize the result.
fn with_environment(
    builder: ConfigBuilder<DefaultState>,
    vars: Map<String, String>,
) -> Result<ServiceConfig, ConfigError> {
    let legacy_listen_addr = vars
        .get(LEGACY_LISTEN_ADDR_ENV)
        .filter(|addr| !addr.is_empty())
        .cloned();

    let mut builder = builder.add_source(
        Environment::with_prefix("ALLRECIPES")
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true)
            .source(Some(vars)),
    );

    if let Some(addr) = legacy_listen_addr {
        builder = builder.set_override("listen_addr", addr)?;
    }

    builder.build()?.try_deserialize()
}
