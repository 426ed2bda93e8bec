/// External configuration loader.
///
/// Reads `config.toml` from the executable's directory (or CWD).
/// Falls back to sensible defaults if the file is missing or incomplete.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

// ── Errors ──

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("config.toml parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

// ── Public Config Struct ──

#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    pub speed: SpeedConfig,
    pub timing: TimingConfig,
    pub scoring: ScoringConfig,
    pub lives: u32,
    pub demo_secs: f32,
    pub realtime: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SpeedConfig {
    pub player: f32,     // cells per second
    pub adversary: f32,  // cells per second, before the mode multiplier
    pub tick_rate_ms: u64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TimingConfig {
    pub scared_secs: f32,
    pub dying_secs: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ScoringConfig {
    pub pickup: u32,
    pub power_pickup: u32,
    pub adversary_base: u32, // doubled per catch in one power window, up to x16
}

// ── TOML Schema (with serde defaults) ──

#[derive(Deserialize, Debug, Default)]
struct TomlConfig {
    #[serde(default)]
    speed: TomlSpeed,
    #[serde(default)]
    timing: TomlTiming,
    #[serde(default)]
    scoring: TomlScoring,
    #[serde(default)]
    general: TomlGeneral,
}

#[derive(Deserialize, Debug)]
struct TomlSpeed {
    #[serde(default = "default_player_speed")]
    player: f32,
    #[serde(default = "default_adversary_speed")]
    adversary: f32,
    #[serde(default = "default_tick_rate")]
    tick_rate_ms: u64,
}

#[derive(Deserialize, Debug)]
struct TomlTiming {
    #[serde(default = "default_scared_secs")]
    scared_secs: f32,
    #[serde(default = "default_dying_secs")]
    dying_secs: f32,
}

#[derive(Deserialize, Debug)]
struct TomlScoring {
    #[serde(default = "default_pickup")]
    pickup: u32,
    #[serde(default = "default_power_pickup")]
    power_pickup: u32,
    #[serde(default = "default_adversary_base")]
    adversary_base: u32,
}

#[derive(Deserialize, Debug)]
struct TomlGeneral {
    #[serde(default = "default_lives")]
    lives: u32,
    #[serde(default = "default_demo_secs")]
    demo_secs: f32,
    #[serde(default)]
    realtime: bool,
}

// ── Defaults ──

fn default_player_speed() -> f32 { 6.0 }
fn default_adversary_speed() -> f32 { 5.0 }
fn default_tick_rate() -> u64 { 16 }     // ~60 Hz
fn default_scared_secs() -> f32 { 8.0 }
fn default_dying_secs() -> f32 { 1.5 }
fn default_pickup() -> u32 { 10 }
fn default_power_pickup() -> u32 { 50 }
fn default_adversary_base() -> u32 { 100 } // 200, 400, 800, 1600
fn default_lives() -> u32 { 3 }
fn default_demo_secs() -> f32 { 120.0 }

impl Default for TomlSpeed {
    fn default() -> Self {
        TomlSpeed {
            player: default_player_speed(),
            adversary: default_adversary_speed(),
            tick_rate_ms: default_tick_rate(),
        }
    }
}

impl Default for TomlTiming {
    fn default() -> Self {
        TomlTiming {
            scared_secs: default_scared_secs(),
            dying_secs: default_dying_secs(),
        }
    }
}

impl Default for TomlScoring {
    fn default() -> Self {
        TomlScoring {
            pickup: default_pickup(),
            power_pickup: default_power_pickup(),
            adversary_base: default_adversary_base(),
        }
    }
}

impl Default for TomlGeneral {
    fn default() -> Self {
        TomlGeneral {
            lives: default_lives(),
            demo_secs: default_demo_secs(),
            realtime: false,
        }
    }
}

impl From<TomlConfig> for GameConfig {
    fn from(toml_cfg: TomlConfig) -> Self {
        GameConfig {
            speed: SpeedConfig {
                player: toml_cfg.speed.player,
                adversary: toml_cfg.speed.adversary,
                tick_rate_ms: toml_cfg.speed.tick_rate_ms,
            },
            timing: TimingConfig {
                scared_secs: toml_cfg.timing.scared_secs,
                dying_secs: toml_cfg.timing.dying_secs,
            },
            scoring: ScoringConfig {
                pickup: toml_cfg.scoring.pickup,
                power_pickup: toml_cfg.scoring.power_pickup,
                adversary_base: toml_cfg.scoring.adversary_base,
            },
            lives: toml_cfg.general.lives,
            demo_secs: toml_cfg.general.demo_secs,
            realtime: toml_cfg.general.realtime,
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        TomlConfig::default().into()
    }
}

// ── Loading ──

impl GameConfig {
    /// Load config from `config.toml`.
    /// Search order: (1) exe directory, (2) current working directory.
    /// Missing file, missing keys, or a broken file all fall back to defaults.
    pub fn load() -> Self {
        for dir in candidate_dirs() {
            let path = dir.join("config.toml");
            if !path.exists() {
                continue;
            }
            match Self::from_file(&path) {
                Ok(cfg) => {
                    debug!(path = %path.display(), "loaded config");
                    return cfg;
                }
                Err(e) => {
                    warn!("{e}; using default settings");
                    return GameConfig::default();
                }
            }
        }
        GameConfig::default()
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let cfg: TomlConfig = toml::from_str(text)?;
        Ok(cfg.into())
    }

    /// Fixed simulation step in seconds.
    pub fn tick_secs(&self) -> f32 {
        self.speed.tick_rate_ms as f32 / 1000.0
    }
}

/// Candidate directories to search: exe dir + CWD (deduplicated).
fn candidate_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![];

    if let Ok(exe) = std::env::current_exe() {
        let resolved = exe.canonicalize().unwrap_or(exe);
        if let Some(parent) = resolved.parent() {
            dirs.push(parent.to_path_buf());
        }
    }

    if let Ok(cwd) = std::env::current_dir() {
        if !dirs.iter().any(|d| d == &cwd) {
            dirs.push(cwd);
        }
    }

    if dirs.is_empty() {
        dirs.push(PathBuf::from("."));
    }

    dirs
}
