use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::net::{IpAddr, SocketAddr};

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 3000;

fn default_max_file_size() -> usize {
    // 10 MB in bytes
    10 * 1024 * 1024
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub max_file_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: DEFAULT_PORT,
            max_file_size: default_max_file_size(),
        }
    }
}

impl Config {
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Builds a config from a variable lookup, so tests don't touch the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("SHEET_CHARTS_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let host: IpAddr = host
            .parse()
            .with_context(|| format!("Invalid SHEET_CHARTS_HOST: {}", host))?;

        let port = match lookup("SHEET_CHARTS_PORT") {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("Invalid SHEET_CHARTS_PORT: {}", raw))?,
            None => DEFAULT_PORT,
        };

        let max_file_size = match lookup("SHEET_CHARTS_MAX_FILE_SIZE") {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("Invalid SHEET_CHARTS_MAX_FILE_SIZE: {}", raw))?,
            None => default_max_file_size(),
        };

        Ok(Config {
            host,
            port,
            max_file_size,
        })
    }
}

pub fn load_config() -> Result<Config> {
    // Load .env file first
    dotenv().ok();

    Config::from_lookup(|key| std::env::var(key).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_when_unset() {
        let config = Config::from_lookup(|_| None).unwrap();
        assert_eq!(config.addr().to_string(), "127.0.0.1:3000");
        assert_eq!(config.max_file_size, 10 * 1024 * 1024);
    }

    #[test]
    fn reads_overrides() {
        let vars: HashMap<&str, &str> = [
            ("SHEET_CHARTS_HOST", "0.0.0.0"),
            ("SHEET_CHARTS_PORT", "8080"),
            ("SHEET_CHARTS_MAX_FILE_SIZE", "1024"),
        ]
        .into_iter()
        .collect();
        let config = Config::from_lookup(|k| vars.get(k).map(|v| v.to_string())).unwrap();
        assert_eq!(config.addr().to_string(), "0.0.0.0:8080");
        assert_eq!(config.max_file_size, 1024);
    }

    #[test]
    fn rejects_bad_port() {
        let err = Config::from_lookup(|k| (k == "SHEET_CHARTS_PORT").then(|| "http".to_string()))
            .unwrap_err();
        assert!(err.to_string().contains("SHEET_CHARTS_PORT"));
    }
}
