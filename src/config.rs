use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub filter: FilterConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_db_path")]
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

fn default_db_path() -> String {
    match std::env::var("HOME") {
        Ok(home) if !home.is_empty() => format!("{}/.local/var/netledger/db", home),
        _ => "./netledger.db".into(),
    }
}

/// Filter defaults; command-line flags override each field independently.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilterConfig {
    #[serde(default)]
    pub include: Vec<String>,
    #[serde(default)]
    pub exclude: Vec<String>,
    #[serde(default)]
    pub exclude_docker: bool,
}

impl AppConfig {
    /// Reads NETLEDGER_CONFIG (default `netledger.toml`). A missing file is
    /// not an error; built-in defaults apply.
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("NETLEDGER_CONFIG").unwrap_or_else(|_| "netledger.toml".into());
        match std::fs::read_to_string(&path) {
            Ok(s) => Self::load_from_str(&s),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            !self.database.path.is_empty(),
            "database.path must be non-empty"
        );
        anyhow::ensure!(
            self.filter.include.iter().all(|n| !n.is_empty()),
            "filter.include must not contain empty names"
        );
        anyhow::ensure!(
            self.filter.exclude.iter().all(|n| !n.is_empty()),
            "filter.exclude must not contain empty names"
        );
        Ok(())
    }
}
