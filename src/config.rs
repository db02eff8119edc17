use clap::{Parser, Subcommand};
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::chat::message::{DEFAULT_WELCOME_SUGGESTIONS, DEFAULT_WELCOME_TEXT};
use crate::chat::{ChatError, HttpChatTransport};
use crate::terminal::{DEFAULT_PROMPT, TerminalEntry, TypingTiming, default_entries};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file path
    #[arg(short, long, env = "CONFIG_FILE")]
    pub config: Option<String>,

    /// Port to listen on
    #[arg(long, env = "PORT")]
    pub port: Option<u16>,

    /// Address to bind
    #[arg(long, env = "HOST")]
    pub host: Option<String>,

    /// Portfolio data file (projects and skills)
    #[arg(long, env = "DATA_FILE")]
    pub data_file: Option<String>,

    /// Chat endpoint used by the `chat` command
    #[arg(long, env = "CHAT_ENDPOINT")]
    pub chat_endpoint: Option<String>,

    /// Disable timeout middleware
    #[arg(long, env = "TIMEOUT_DISABLED")]
    pub timeout_disabled: Option<bool>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Serve the portfolio site (default)
    Serve,
    /// Play the terminal widget animation on stdout
    Terminal,
    /// Chat with the portfolio assistant from the terminal
    Chat,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub content: ContentConfig,
    pub terminal: TerminalConfig,
    pub scroll: ScrollConfig,
    pub chat: ChatConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
    pub static_dir: String,
    pub timeout_disabled: bool,
    pub request_timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ContentConfig {
    pub data_file: String,
    pub site_title: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TerminalConfig {
    pub prompt: String,
    pub char_delay_ms: u64,
    pub line_delay_ms: u64,
    #[serde(default = "default_entries")]
    pub entries: Vec<TerminalEntry>,
}

impl TerminalConfig {
    pub fn timing(&self) -> TypingTiming {
        TypingTiming::from_millis(self.char_delay_ms, self.line_delay_ms)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ScrollConfig {
    pub threshold: f64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChatConfig {
    /// Remote chat endpoint. Unset unless configured.
    pub endpoint: Option<String>,
    pub title: String,
    pub placeholder: String,
    pub welcome_text: String,
    #[serde(default = "default_welcome_suggestions")]
    pub welcome_suggestions: Vec<String>,
}

fn default_welcome_suggestions() -> Vec<String> {
    DEFAULT_WELCOME_SUGGESTIONS.map(String::from).to_vec()
}

impl ChatConfig {
    /// Transport for the configured endpoint, `None` when unset.
    pub fn transport(&self) -> Result<Option<HttpChatTransport>, ChatError> {
        self.endpoint
            .as_deref()
            .map(HttpChatTransport::new)
            .transpose()
    }
}

impl AppConfig {
    pub fn load_from_args<I, T>(args: I) -> Result<Self, config::ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let cli =
            Cli::try_parse_from(args).map_err(|e| config::ConfigError::Message(e.to_string()))?;
        Self::from_cli(&cli)
    }

    /// Layer defaults, config file, `PORTFOLIO_` env vars and CLI flags.
    ///
    /// Priority: CLI flag > CLI env var > `PORTFOLIO_*` env > config file > defaults.
    pub fn from_cli(cli: &Cli) -> Result<Self, config::ConfigError> {
        let mut builder = Config::builder();

        // 1. Defaults
        builder = builder
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.static_dir", "static")?
            .set_default("server.timeout_disabled", false)?
            .set_default("server.request_timeout_secs", 30)?
            .set_default("content.data_file", "portfolio.json")?
            .set_default("content.site_title", "Portfolio")?
            .set_default("terminal.prompt", DEFAULT_PROMPT)?
            .set_default("terminal.char_delay_ms", 50)?
            .set_default("terminal.line_delay_ms", 500)?
            .set_default("scroll.threshold", crate::scroll::DEFAULT_THRESHOLD)?
            .set_default("chat.title", "Portfolio Assistant")?
            .set_default("chat.placeholder", "Ask me about the portfolio...")?
            .set_default("chat.welcome_text", DEFAULT_WELCOME_TEXT)?;

        // 2. Config file: explicit path must exist, ./config.* is optional
        builder = match &cli.config {
            Some(path) => builder.add_source(File::from(Path::new(path)).required(true)),
            None => builder.add_source(File::with_name("config").required(false)),
        };

        // 3. Environment variables, e.g. PORTFOLIO_SERVER__PORT=8000
        builder = builder.add_source(
            Environment::with_prefix("PORTFOLIO")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        // 4. CLI overrides (clap also fills these from their bound env vars)
        if let Some(port) = cli.port {
            builder = builder.set_override("server.port", port)?;
        }
        if let Some(host) = &cli.host {
            builder = builder.set_override("server.host", host.as_str())?;
        }
        if let Some(td) = cli.timeout_disabled {
            builder = builder.set_override("server.timeout_disabled", td)?;
        }
        if let Some(data_file) = &cli.data_file {
            builder = builder.set_override("content.data_file", data_file.as_str())?;
        }
        if let Some(endpoint) = &cli.chat_endpoint {
            builder = builder.set_override("chat.endpoint", endpoint.as_str())?;
        }

        let cfg = builder.build()?;
        cfg.try_deserialize()
    }

    /// Address the server binds to.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
