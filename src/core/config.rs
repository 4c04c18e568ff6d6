//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.phosphor/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.
//!
//! Pacing numbers are tuning constants, not requirements — they ship with
//! the values the product was tuned to, and the `[pacing]` table overrides
//! any of them individually.

use log::{debug, info, warn};
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::PathBuf;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct PhosphorConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub pacing: PacingTable,
}

#[derive(Debug, Default, Deserialize)]
pub struct GeneralConfig {
    /// URL of the menu-tree resource fetched at boot.
    pub data_url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PacingTable {
    pub char_delay_ms: Option<u64>,
    pub chunk_size: Option<usize>,
    pub fast_char_delay_ms: Option<u64>,
    pub fast_chunk_size: Option<usize>,
    pub punct_multiplier: Option<u32>,
    pub markup_punct_multiplier: Option<u32>,
    pub line_settle_ms: Option<u64>,
    pub pause_divisor: Option<u32>,
    pub code_char_delay_ms: Option<u64>,
    pub code_line_delay_ms: Option<u64>,
    pub code_settle_ms: Option<u64>,
    pub image_settle_ms: Option<u64>,
    pub fast_image_settle_ms: Option<u64>,
    pub image_timeout_secs: Option<u64>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_DATA_URL: &str = "http://localhost:8000/contents/data.json";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub data_url: String,
    pub pacing: PacingConfig,
}

/// Every delay and chunk size the incremental renderer uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PacingConfig {
    /// Per-step delay for normal typewriter output.
    pub char_delay_ms: u64,
    /// Characters emitted per step under the normal profile.
    pub chunk_size: usize,
    pub fast_char_delay_ms: u64,
    pub fast_chunk_size: usize,
    /// Delay multiplier when a chunk ends on terminal punctuation.
    pub punct_multiplier: u32,
    /// Same, inside markup lines.
    pub markup_punct_multiplier: u32,
    /// Settle delay after each full line.
    pub line_settle_ms: u64,
    /// `[[PAUSE:n]]` durations divide by this under the fast profile.
    pub pause_divisor: u32,
    pub code_char_delay_ms: u64,
    pub code_line_delay_ms: u64,
    pub code_settle_ms: u64,
    /// Reveal settle after a successful image load.
    pub image_settle_ms: u64,
    pub fast_image_settle_ms: u64,
    /// Image preload deadline; a slower load counts as a failure.
    pub image_timeout_secs: u64,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            char_delay_ms: 5,
            chunk_size: 2,
            fast_char_delay_ms: 1,
            fast_chunk_size: 8,
            punct_multiplier: 4,
            markup_punct_multiplier: 5,
            line_settle_ms: 30,
            pause_divisor: 4,
            code_char_delay_ms: 2,
            code_line_delay_ms: 10,
            code_settle_ms: 100,
            image_settle_ms: 3000,
            fast_image_settle_ms: 300,
            image_timeout_secs: 10,
        }
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.phosphor/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".phosphor").join("config.toml"))
}

/// Load config from `~/.phosphor/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `PhosphorConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<PhosphorConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(PhosphorConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(PhosphorConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config: PhosphorConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &PathBuf) {
    let default_content = r#"# Phosphor Configuration
# All settings are optional — defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# data_url = "http://localhost:8000/contents/data.json"

# [pacing]            # all values are tuning constants
# char_delay_ms = 5
# chunk_size = 2
# fast_char_delay_ms = 1
# fast_chunk_size = 8
# punct_multiplier = 4
# markup_punct_multiplier = 5
# line_settle_ms = 30
# pause_divisor = 4
# code_char_delay_ms = 2
# code_line_delay_ms = 10
# code_settle_ms = 100
# image_settle_ms = 3000
# fast_image_settle_ms = 300
# image_timeout_secs = 10
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
///
/// `cli_data_url` comes from the `--data-url` flag (None = not specified).
pub fn resolve(config: &PhosphorConfig, cli_data_url: Option<&str>) -> ResolvedConfig {
    // Data URL: CLI → env → config → default
    let data_url = cli_data_url
        .map(|s| s.to_string())
        .or_else(|| std::env::var("PHOSPHOR_DATA_URL").ok())
        .or_else(|| config.general.data_url.clone())
        .unwrap_or_else(|| DEFAULT_DATA_URL.to_string());

    let d = PacingConfig::default();
    let t = &config.pacing;
    let pacing = PacingConfig {
        char_delay_ms: t.char_delay_ms.unwrap_or(d.char_delay_ms),
        chunk_size: t.chunk_size.unwrap_or(d.chunk_size).max(1),
        fast_char_delay_ms: t.fast_char_delay_ms.unwrap_or(d.fast_char_delay_ms),
        fast_chunk_size: t.fast_chunk_size.unwrap_or(d.fast_chunk_size).max(1),
        punct_multiplier: t.punct_multiplier.unwrap_or(d.punct_multiplier),
        markup_punct_multiplier: t
            .markup_punct_multiplier
            .unwrap_or(d.markup_punct_multiplier),
        line_settle_ms: t.line_settle_ms.unwrap_or(d.line_settle_ms),
        pause_divisor: t.pause_divisor.unwrap_or(d.pause_divisor).max(1),
        code_char_delay_ms: t.code_char_delay_ms.unwrap_or(d.code_char_delay_ms),
        code_line_delay_ms: t.code_line_delay_ms.unwrap_or(d.code_line_delay_ms),
        code_settle_ms: t.code_settle_ms.unwrap_or(d.code_settle_ms),
        image_settle_ms: t.image_settle_ms.unwrap_or(d.image_settle_ms),
        fast_image_settle_ms: t.fast_image_settle_ms.unwrap_or(d.fast_image_settle_ms),
        image_timeout_secs: t.image_timeout_secs.unwrap_or(d.image_timeout_secs),
    };

    ResolvedConfig { data_url, pacing }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config = PhosphorConfig::default();
        assert!(config.general.data_url.is_none());
        assert!(config.pacing.char_delay_ms.is_none());
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let config = PhosphorConfig::default();
        let resolved = resolve(&config, None);
        assert_eq!(resolved.pacing, PacingConfig::default());
        // data_url may come from the environment in CI shells; only check
        // the default when the env var is absent
        if std::env::var("PHOSPHOR_DATA_URL").is_err() {
            assert_eq!(resolved.data_url, DEFAULT_DATA_URL);
        }
    }

    #[test]
    fn test_resolve_cli_data_url_wins() {
        let config = PhosphorConfig {
            general: GeneralConfig {
                data_url: Some("http://from-config/data.json".to_string()),
            },
            ..Default::default()
        };
        let resolved = resolve(&config, Some("http://from-cli/data.json"));
        assert_eq!(resolved.data_url, "http://from-cli/data.json");
    }

    #[test]
    fn test_sparse_toml_parses() {
        // Only override one thing — everything else stays default
        let toml_str = r#"
[pacing]
pause_divisor = 8
"#;
        let config: PhosphorConfig = toml::from_str(toml_str).unwrap();
        let resolved = resolve(&config, None);
        assert_eq!(resolved.pacing.pause_divisor, 8);
        assert_eq!(resolved.pacing.chunk_size, PacingConfig::default().chunk_size);
    }

    #[test]
    fn test_chunk_size_and_divisor_floors() {
        let toml_str = r#"
[pacing]
chunk_size = 0
pause_divisor = 0
"#;
        let config: PhosphorConfig = toml::from_str(toml_str).unwrap();
        let resolved = resolve(&config, None);
        assert_eq!(resolved.pacing.chunk_size, 1);
        assert_eq!(resolved.pacing.pause_divisor, 1);
    }

    #[test]
    fn test_full_toml_round_trip() {
        let toml_str = r#"
[general]
data_url = "http://example.com/data.json"

[pacing]
char_delay_ms = 7
fast_chunk_size = 16
image_timeout_secs = 3
"#;
        let config: PhosphorConfig = toml::from_str(toml_str).unwrap();
        let resolved = resolve(&config, None);
        assert_eq!(resolved.data_url, "http://example.com/data.json");
        assert_eq!(resolved.pacing.char_delay_ms, 7);
        assert_eq!(resolved.pacing.fast_chunk_size, 16);
        assert_eq!(resolved.pacing.image_timeout_secs, 3);
    }
}
