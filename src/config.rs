use clap::{Parser, ValueHint};
use dirs_next::home_dir;
use serde::{Deserialize, Serialize};
use std::{fs, path::{Path, PathBuf}};
use thiserror::Error;

/// Error type for config loading/validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Daemon-local bootstrap configuration. Only what must exist before the
/// host is reachable lives here; everything the brewer tunes (mode, refresh,
/// kettle, sensor type) is in the host config store, editable from the web
/// UI. See `settings`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// e.g. "info" | "debug"
    pub log_level: Option<String>,
    /// CraftBeerPi base URL, e.g. "http://127.0.0.1:8000"
    pub host_url: Option<String>,
    /// I2C bus device, e.g. "/dev/i2c-1"
    pub i2c_bus: Option<String>,
    /// 7-bit panel address; overrides the host LCD_Address setting
    pub i2c_address: Option<u8>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            log_level: None,
            host_url: Some("http://127.0.0.1:8000".to_string()),
            i2c_bus: Some("/dev/i2c-1".to_string()),
            i2c_address: None,
        }
    }
}

/// CLI overrides. All fields are Options so we can layer them over YAML.
#[derive(Debug, Parser, Clone)]
#[command(name = "braulcd", about = "CraftBeerPi 20x4 LCD monitor", disable_help_flag = false)]
pub struct Cli {
    /// Path to a YAML config file (overrides search)
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub log_level: Option<String>,
    /// CraftBeerPi base URL
    #[arg(long)]
    pub host_url: Option<String>,
    /// I2C bus device path
    #[arg(long)]
    pub i2c_bus: Option<String>,
    /// 7-bit I2C address, decimal (39 = 0x27)
    #[arg(long)]
    pub i2c_address: Option<u8>,
    /// dump fully merged config (after overrides) and exit
    #[arg(long, action = clap::ArgAction::SetTrue)]
    pub dump_config: bool,
}

/// Public entry point: parse CLI, read YAML, merge, validate.
pub fn load() -> Result<Config, ConfigError> {
    let cli = Cli::parse();
    load_with(cli)
}

fn load_with(cli: Cli) -> Result<Config, ConfigError> {
    // 1) defaults (from `Default` impl)
    let mut cfg = Config::default();

    // 2) YAML file (explicit path or search)
    if let Some(p) = cli.config.as_ref() {
        if p.exists() {
            let y = read_yaml(p)?;
            merge(&mut cfg, y);
        } else {
            return Err(ConfigError::Validation(format!(
                "Config file not found: {}",
                p.display()
            )));
        }
    } else if let Some(p) = find_config_file() {
        let y = read_yaml(&p)?;
        merge(&mut cfg, y);
    }

    // 3) CLI overrides (highest precedence)
    apply_cli_overrides(&mut cfg, &cli);

    // 4) Validate
    validate(&cfg)?;

    if cli.dump_config {
        let s = serde_yaml::to_string(&cfg)?;
        println!("{s}");
        std::process::exit(0);
    }

    Ok(cfg)
}

/// Try common locations in order (first hit wins).
fn find_config_file() -> Option<PathBuf> {
    // XDG-style: ~/.config/braulcd/config.yaml
    if let Some(home) = home_dir() {
        let p = home.join(".config/braulcd/config.yaml");
        if p.exists() { return Some(p) }
        let p = home.join(".config/braulcd.yaml");
        if p.exists() { return Some(p) }
    }
    // project local
    for candidate in &["braulcd.yaml", "config.yaml"] {
        let p = PathBuf::from(candidate);
        if p.exists() { return Some(p) }
    }
    None
}

fn read_yaml(path: &Path) -> Result<Config, ConfigError> {
    let s = fs::read_to_string(path)?;
    let cfg: Config = serde_yaml::from_str(&s)?;
    Ok(cfg)
}

/// Shallow merge `src` into `dst`, Option-by-Option.
fn merge(dst: &mut Config, src: Config) {
    if src.log_level.is_some()   { dst.log_level = src.log_level; }
    if src.host_url.is_some()    { dst.host_url = src.host_url; }
    if src.i2c_bus.is_some()     { dst.i2c_bus = src.i2c_bus; }
    if src.i2c_address.is_some() { dst.i2c_address = src.i2c_address; }
}

fn apply_cli_overrides(cfg: &mut Config, cli: &Cli) {
    if cli.log_level.is_some()   { cfg.log_level = cli.log_level.clone(); }
    if cli.host_url.is_some()    { cfg.host_url = cli.host_url.clone(); }
    if cli.i2c_bus.is_some()     { cfg.i2c_bus = cli.i2c_bus.clone(); }
    if cli.i2c_address.is_some() { cfg.i2c_address = cli.i2c_address; }
}

/// Put any invariants here (required fields, ranges, etc.)
fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if let Some(url) = cfg.host_url.as_ref() {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ConfigError::Validation(format!(
                "host_url must start with http:// or https://, got '{}'",
                url
            )));
        }
    }
    if let Some(addr) = cfg.i2c_address {
        if addr > 0x7f {
            return Err(ConfigError::Validation(
                "i2c_address must be a 7-bit address (<= 0x7f)".into(),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_point_at_localhost() {
        let cfg = Config::default();
        assert_eq!(cfg.host_url.as_deref(), Some("http://127.0.0.1:8000"));
        assert_eq!(cfg.i2c_bus.as_deref(), Some("/dev/i2c-1"));
    }

    #[test]
    fn test_merge_keeps_unset_fields() {
        let mut cfg = Config::default();
        let overlay = Config {
            log_level: Some("debug".to_string()),
            host_url: None,
            i2c_bus: None,
            i2c_address: Some(0x3f),
        };
        merge(&mut cfg, overlay);
        assert_eq!(cfg.log_level.as_deref(), Some("debug"));
        assert_eq!(cfg.host_url.as_deref(), Some("http://127.0.0.1:8000"));
        assert_eq!(cfg.i2c_address, Some(0x3f));
    }

    #[test]
    fn test_validate_rejects_bad_url_and_address() {
        let cfg = Config { host_url: Some("ftp://x".to_string()), ..Config::default() };
        assert!(validate(&cfg).is_err());
        let cfg = Config { i2c_address: Some(0x80), ..Config::default() };
        assert!(validate(&cfg).is_err());
        assert!(validate(&Config::default()).is_ok());
    }
}
