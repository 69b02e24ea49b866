//! Layered configuration: defaults, then a TOML file named by
//! `SPIDER_CONFIG`, then `SPIDER_*` environment variables. Command-line
//! flags are applied on top by each command.

use serde::{Deserialize, Serialize};
use std::fs;

use spider_ai::AI_NAMES;
use spider_engine::deck::Difficulty;

pub const ENV_CONFIG: &str = "SPIDER_CONFIG";
pub const ENV_SEED: &str = "SPIDER_SEED";
pub const ENV_DIFFICULTY: &str = "SPIDER_DIFFICULTY";
pub const ENV_AI: &str = "SPIDER_AI";
pub const ENV_MAX_MOVES: &str = "SPIDER_MAX_MOVES";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub seed: Option<u64>,
    pub difficulty: Difficulty,
    /// Automatic player used by `sim` and for hints
    pub ai: String,
    /// Cap on actions per simulated game
    pub max_moves: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: None,
            difficulty: Difficulty::OneSuit,
            ai: "baseline".into(),
            max_moves: 1_000,
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
    pub difficulty: ValueSource,
    pub ai: ValueSource,
    pub max_moves: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            seed: ValueSource::Default,
            difficulty: ValueSource::Default,
            ai: ValueSource::Default,
            max_moves: ValueSource::Default,
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

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "cannot read config file: {}", e),
            ConfigError::Parse(e) => write!(f, "cannot parse config file: {}", e),
            ConfigError::Invalid(msg) => f.write_str(msg),
        }
    }
}

pub fn load() -> Result<Config, ConfigError> {
    load_with_sources().map(|resolved| resolved.config)
}

pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();

    if let Ok(path) = std::env::var(ENV_CONFIG)
        && !path.is_empty()
    {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
        if let Some(v) = f.difficulty {
            cfg.difficulty = parse_difficulty(v)?;
            sources.difficulty = ValueSource::File;
        }
        if let Some(v) = f.ai {
            cfg.ai = v;
            sources.ai = ValueSource::File;
        }
        if let Some(v) = f.max_moves {
            cfg.max_moves = v;
            sources.max_moves = ValueSource::File;
        }
    }

    if let Ok(seed) = std::env::var(ENV_SEED)
        && !seed.is_empty()
    {
        cfg.seed = Some(
            seed.parse()
                .map_err(|_| ConfigError::Invalid("Invalid seed".into()))?,
        );
        sources.seed = ValueSource::Env;
    }
    if let Ok(difficulty) = std::env::var(ENV_DIFFICULTY)
        && !difficulty.is_empty()
    {
        let n: u8 = difficulty
            .parse()
            .map_err(|_| ConfigError::Invalid("Invalid difficulty".into()))?;
        cfg.difficulty = parse_difficulty(n)?;
        sources.difficulty = ValueSource::Env;
    }
    if let Ok(ai) = std::env::var(ENV_AI)
        && !ai.is_empty()
    {
        cfg.ai = ai;
        sources.ai = ValueSource::Env;
    }
    if let Ok(max) = std::env::var(ENV_MAX_MOVES)
        && !max.is_empty()
    {
        cfg.max_moves = max
            .parse()
            .map_err(|_| ConfigError::Invalid("Invalid max_moves".into()))?;
        sources.max_moves = ValueSource::Env;
    }

    validate(&cfg)?;
    Ok(ConfigResolved {
        config: cfg,
        sources,
    })
}

#[derive(Debug, Deserialize)]
struct FileConfig {
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    difficulty: Option<u8>,
    #[serde(default)]
    ai: Option<String>,
    #[serde(default)]
    max_moves: Option<u32>,
}

fn parse_difficulty(n: u8) -> Result<Difficulty, ConfigError> {
    Difficulty::try_from(n).map_err(|_| {
        ConfigError::Invalid(format!("difficulty must be 1, 2 or 4 (got {})", n))
    })
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if cfg.max_moves == 0 {
        return Err(ConfigError::Invalid("max_moves must be >0".into()));
    }
    if !AI_NAMES.contains(&cfg.ai.as_str()) {
        return Err(ConfigError::Invalid(format!(
            "unknown ai '{}' (expected one of {})",
            cfg.ai,
            AI_NAMES.join(", ")
        )));
    }
    Ok(())
}
