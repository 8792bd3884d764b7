use crate::config::parser::parse_scope;
use crate::config::validation::validate;
use crate::ConfigResult;
use serde::Deserialize;
use url::Url;

/// Immutable configuration for one crawl run
///
/// Every check receives the same `RunArguments` at construction and only
/// ever reads from it.
#[derive(Debug, Clone)]
pub struct RunArguments {
    /// Base URL defining the boundary of the site being crawled
    pub scope: Url,

    /// HTTP Basic Authentication username
    pub username: Option<String>,

    /// HTTP Basic Authentication password
    pub password: Option<String>,

    /// Skip slow checks
    pub fast: bool,

    /// Do not show warnings in the results
    pub errors_only: bool,

    /// Suppress all output, returning only an exit code
    pub silent: bool,

    /// Verbose action output, no visual effects
    pub debug: bool,

    /// Render the report as CSV
    pub csv: bool,

    pub http: HttpConfig,

    pub crawl: CrawlConfig,
}

impl RunArguments {
    /// Creates run arguments for a scope with every other setting at its default
    pub fn new(scope: Url) -> Self {
        Self {
            scope,
            username: None,
            password: None,
            fast: false,
            errors_only: false,
            silent: false,
            debug: false,
            csv: false,
            http: HttpConfig::default(),
            crawl: CrawlConfig::default(),
        }
    }

    /// Sets the HTTP Basic Authentication credentials
    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    /// Returns the credentials if both username and password are configured
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (&self.username, &self.password) {
            (Some(username), Some(password)) => Some((username, password)),
            _ => None,
        }
    }

    /// Returns the report format selected by the mode flags
    ///
    /// Silent wins over CSV, CSV wins over debug.
    pub fn output_format(&self) -> OutputFormat {
        if self.silent {
            OutputFormat::Silent
        } else if self.csv {
            OutputFormat::Csv
        } else if self.debug {
            OutputFormat::Debug
        } else {
            OutputFormat::Human
        }
    }
}

/// How the final report is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Human,
    Csv,
    Debug,
    Silent,
}

/// HTTP client configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct HttpConfig {
    /// Total timeout per request (seconds)
    pub timeout_secs: u64,

    /// Connection establishment timeout (seconds)
    pub connect_timeout_secs: u64,

    /// User-Agent header sent with every request
    pub user_agent: String,

    /// Maximum number of link status lookups in flight per page
    pub max_concurrent_requests: usize,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            connect_timeout_secs: 5,
            user_agent: format!("awacs/{}", env!("CARGO_PKG_VERSION")),
            max_concurrent_requests: 8,
        }
    }
}

/// Crawl limits
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct CrawlConfig {
    /// Maximum number of pages fetched and checked in one run
    pub max_pages: usize,

    /// Maximum link distance from the scope page
    pub max_depth: u32,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            max_pages: 500,
            max_depth: 10,
        }
    }
}

/// Contents of an optional TOML configuration file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub scope: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub crawl: CrawlConfig,
}

/// Values given on the command line; each one overrides the file
#[derive(Debug, Clone, Default)]
pub struct ArgumentOverrides {
    pub scope: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub fast: bool,
    pub errors_only: bool,
    pub silent: bool,
    pub debug: bool,
    pub csv: bool,
}

impl FileConfig {
    /// Merges command line overrides into this file configuration
    ///
    /// The resulting arguments are validated before they are returned.
    pub fn into_arguments(self, overrides: ArgumentOverrides) -> ConfigResult<RunArguments> {
        let raw_scope = overrides.scope.or(self.scope).ok_or_else(|| {
            crate::ConfigError::Validation(
                "a scope is required, either on the command line or in the config file"
                    .to_string(),
            )
        })?;

        let arguments = RunArguments {
            scope: parse_scope(&raw_scope)?,
            username: overrides.username.or(self.username),
            password: overrides.password.or(self.password),
            fast: overrides.fast,
            errors_only: overrides.errors_only,
            silent: overrides.silent,
            debug: overrides.debug,
            csv: overrides.csv,
            http: self.http,
            crawl: self.crawl,
        };

        validate(&arguments)?;

        Ok(arguments)
    }
}
