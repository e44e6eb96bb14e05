//! Configuration for wireprobe
//!
//! Centralized configuration with sensible defaults.

/// Read timeout applied to every new connection (milliseconds)
pub const DEFAULT_READ_TIMEOUT_MS: u64 = 200;

/// Bound on a single reachability probe (milliseconds)
pub const DEFAULT_PING_TIMEOUT_MS: u64 = 1500;

/// Bound on establishing a connection (milliseconds)
pub const DEFAULT_CONNECT_TIMEOUT_MS: u64 = 5000;

pub const DEFAULT_PROMPT: &str = "client> ";

/// Main configuration for a wireprobe session
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Connection Configuration
    // -------------------------------------------------------------------------
    /// Read timeout set on each freshly established connection (milliseconds)
    /// 0 means reads block until data arrives
    pub default_read_timeout_ms: u64,

    /// Connect timeout per resolved address (milliseconds, 0 = OS default)
    pub connect_timeout_ms: u64,

    /// Reachability probe timeout used by `ping` (milliseconds)
    pub ping_timeout_ms: u64,

    // -------------------------------------------------------------------------
    // REPL Configuration
    // -------------------------------------------------------------------------
    /// Prompt printed before each input line
    pub prompt: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_read_timeout_ms: DEFAULT_READ_TIMEOUT_MS,
            connect_timeout_ms: DEFAULT_CONNECT_TIMEOUT_MS,
            ping_timeout_ms: DEFAULT_PING_TIMEOUT_MS,
            prompt: DEFAULT_PROMPT.to_string(),
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the read timeout for new connections (in milliseconds)
    pub fn default_read_timeout_ms(mut self, ms: u64) -> Self {
        self.config.default_read_timeout_ms = ms;
        self
    }

    /// Set the connect timeout (in milliseconds)
    pub fn connect_timeout_ms(mut self, ms: u64) -> Self {
        self.config.connect_timeout_ms = ms;
        self
    }

    /// Set the ping probe timeout (in milliseconds)
    pub fn ping_timeout_ms(mut self, ms: u64) -> Self {
        self.config.ping_timeout_ms = ms;
        self
    }

    pub fn prompt(mut self, prompt: impl Into<String>) -> Self {
        self.config.prompt = prompt.into();
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
