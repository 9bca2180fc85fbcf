use anyhow::Result;
use clap::Parser;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "bookshelf")]
#[command(about = "Runs the bookshelf catalog service", long_about = None)]
pub struct Cli {
    #[arg(short = 'c', long = "config")]
    pub config_path: Option<String>,
}

pub fn default_config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".bookshelf")
}

pub fn default_config_path() -> PathBuf {
    default_config_dir().join("config.yaml")
}

#[derive(Debug, Deserialize, Clone)]
pub struct App {
    #[serde(default = "default_database")]
    database: String,
    #[serde(default = "default_host")]
    host: String,
    #[serde(default = "default_port")]
    port: u16,
    #[serde(default)]
    pub turso_url: Option<String>,
    #[serde(default)]
    pub turso_auth_token: Option<String>,
    #[serde(default = "default_sync_interval")]
    pub sync_interval_seconds: u64,
}

fn default_database() -> String {
    "books.db".to_string()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_sync_interval() -> u64 {
    60
}

impl Default for App {
    fn default() -> Self {
        App {
            database: default_database(),
            host: default_host(),
            port: default_port(),
            turso_url: None,
            turso_auth_token: None,
            sync_interval_seconds: default_sync_interval(),
        }
    }
}

impl App {
    pub fn get_db(&self) -> &str {
        &self.database
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub app: App,
}

impl Config {
    pub fn new(path: &str) -> Result<Self> {
        let yaml_str = fs::read_to_string(path)?;
        Config::from_yaml(&yaml_str)
    }

    pub fn from_yaml(yaml_str: &str) -> Result<Config> {
        let yaml_with_env = Config::substitute_env_vars(yaml_str)?;
        let mut config: Config = serde_yaml::from_str(&yaml_with_env)?;
        config.app.turso_url = config.app.turso_url.filter(|s| !s.is_empty());
        config.app.turso_auth_token = config.app.turso_auth_token.filter(|s| !s.is_empty());
        Ok(config)
    }

    fn substitute_env_vars(yaml_str: &str) -> Result<String> {
        let mut result = yaml_str.to_string();
        let mut offset = 0;

        while let Some(start) = result[offset..].find("${") {
            let actual_start = offset + start;
            if let Some(end) = result[actual_start..].find("}") {
                let var_name = &result[actual_start + 2..actual_start + end];

                // ${VAR:-default}
                let env_value = if let Some(default_start) = var_name.find(":-") {
                    let actual_var = &var_name[..default_start];
                    let default_val = &var_name[default_start + 2..];
                    env::var(actual_var).unwrap_or_else(|_| default_val.to_string())
                } else {
                    env::var(var_name).unwrap_or_else(|_| {
                        tracing::warn!("environment variable '{}' not found", var_name);
                        String::new()
                    })
                };

                result.replace_range(actual_start..actual_start + end + 1, &env_value);
                offset = actual_start + env_value.len();
            } else {
                break;
            }
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_app_section_uses_defaults() {
        let cfg = Config::from_yaml("app: {}\n").unwrap();
        assert_eq!(cfg.app.get_db(), "books.db");
        assert_eq!(cfg.app.address(), "0.0.0.0:8000");
        assert!(cfg.app.turso_url.is_none());
    }

    #[test]
    fn substitutes_defaults_for_unset_vars() {
        let yaml = "app:\n  database: ${BOOKSHELF_TEST_UNSET_DB:-catalog.db}\n  port: 9001\n";
        let cfg = Config::from_yaml(yaml).unwrap();
        assert_eq!(cfg.app.get_db(), "catalog.db");
        assert_eq!(cfg.app.address(), "0.0.0.0:9001");
    }

    #[test]
    fn substitutes_set_vars_and_stops_at_unclosed_reference() {
        let Ok(path) = env::var("PATH") else { return };
        let out = Config::substitute_env_vars("a: ${PATH}\nb: ${UNCLOSED").unwrap();
        assert_eq!(out, format!("a: {path}\nb: ${{UNCLOSED"));
    }

    #[test]
    fn unset_replica_settings_are_treated_as_absent() {
        let yaml = "app:\n  turso_url: ${BOOKSHELF_TEST_UNSET_URL}\n  turso_auth_token: ${BOOKSHELF_TEST_UNSET_TOKEN}\n";
        let cfg = Config::from_yaml(yaml).unwrap();
        assert!(cfg.app.turso_url.is_none());
        assert!(cfg.app.turso_auth_token.is_none());
    }
}
