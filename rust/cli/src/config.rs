use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;

use thirteen_engine::player::{BASE_ATTACK, BASE_DEFENSE, CombatStats, INITIAL_HP};

pub const CONFIG_ENV: &str = "THIRTEEN_CONFIG";
pub const SEED_ENV: &str = "THIRTEEN_SEED";
pub const NODE_ENV: &str = "THIRTEEN_NODE";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub seed: Option<u64>,
    pub player_hp: u32,
    pub player_attack: u32,
    pub player_defense: u32,
    pub node: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: None,
            player_hp: INITIAL_HP,
            player_attack: BASE_ATTACK,
            player_defense: BASE_DEFENSE,
            node: None,
        }
    }
}

impl Config {
    pub fn player_stats(&self) -> CombatStats {
        CombatStats {
            hp: self.player_hp,
            attack: self.player_attack,
            defense: self.player_defense,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueSource {
    Default,
    File,
    Env,
}

#[derive(Debug, Clone, Copy)]
pub struct ConfigSources {
    pub seed: ValueSource,
    pub player_hp: ValueSource,
    pub player_attack: ValueSource,
    pub player_defense: ValueSource,
    pub node: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            seed: ValueSource::Default,
            player_hp: ValueSource::Default,
            player_attack: ValueSource::Default,
            player_defense: ValueSource::Default,
            node: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: Config,
    pub sources: ConfigSources,
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Invalid(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}
impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError::Parse(e)
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "cannot read config file: {}", e),
            ConfigError::Parse(e) => write!(f, "cannot parse config file: {}", e),
            ConfigError::Invalid(msg) => f.write_str(msg),
        }
    }
}

/// Non-empty value of an environment variable.
fn env_value(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

/// Defaults, then the `THIRTEEN_CONFIG` TOML file, then environment overrides.
pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Some(path) = env_value(CONFIG_ENV) {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
        if let Some(v) = f.player_hp {
            cfg.player_hp = v;
            sources.player_hp = ValueSource::File;
        }
        if let Some(v) = f.player_attack {
            cfg.player_attack = v;
            sources.player_attack = ValueSource::File;
        }
        if let Some(v) = f.player_defense {
            cfg.player_defense = v;
            sources.player_defense = ValueSource::File;
        }
        if let Some(v) = f.node {
            cfg.node = Some(v);
            sources.node = ValueSource::File;
        }
    }

    if let Some(seed) = env_value(SEED_ENV) {
        cfg.seed = Some(
            seed.parse()
                .map_err(|_| ConfigError::Invalid(format!("Invalid seed: {}", seed)))?,
        );
        sources.seed = ValueSource::Env;
    }
    if let Some(node) = env_value(NODE_ENV) {
        cfg.node = Some(node);
        sources.node = ValueSource::Env;
    }

    validate(&cfg)?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    player_hp: Option<u32>,
    #[serde(default)]
    player_attack: Option<u32>,
    #[serde(default)]
    player_defense: Option<u32>,
    #[serde(default)]
    node: Option<String>,
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if cfg.player_hp == 0 {
        return Err(ConfigError::Invalid(
            "Invalid configuration: player_hp must be >0".into(),
        ));
    }
    Ok(())
}
