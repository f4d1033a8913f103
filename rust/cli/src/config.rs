use serde::{Deserialize, Serialize};
use shopbingo_engine::announce::Language;
use shopbingo_engine::pattern::WinningPattern;
use std::fs;

pub const CONFIG_ENV: &str = "SHOPBINGO_CONFIG";

/// Shop-level defaults for a round. Command-line flags override these per run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub bet_per_card: u32,
    pub commission_rate: f64,
    pub interval_ms: u64,
    pub pattern: WinningPattern,
    pub language: Language,
    pub seed: Option<u64>,
    pub shop_id: Option<String>,
    pub cards_dir: Option<String>,
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
    pub bet_per_card: ValueSource,
    pub commission_rate: ValueSource,
    pub interval_ms: ValueSource,
    pub pattern: ValueSource,
    pub language: ValueSource,
    pub seed: ValueSource,
    pub shop_id: ValueSource,
    pub cards_dir: ValueSource,
}

impl Default for ConfigSources {
    fn default() -> Self {
        Self {
            bet_per_card: ValueSource::Default,
            commission_rate: ValueSource::Default,
            interval_ms: ValueSource::Default,
            pattern: ValueSource::Default,
            language: ValueSource::Default,
            seed: ValueSource::Default,
            shop_id: ValueSource::Default,
            cards_dir: ValueSource::Default,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigResolved {
    pub config: Config,
    pub sources: ConfigSources,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bet_per_card: 10,
            commission_rate: 0.2,
            interval_ms: 12_000,
            pattern: WinningPattern::All,
            language: Language::Amharic,
            seed: None,
            shop_id: None,
            cards_dir: None,
        }
    }
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

/// Resolves defaults, then the TOML file named by `SHOPBINGO_CONFIG`, then `SHOPBINGO_*`
/// environment variables.
pub fn load_with_sources() -> Result<ConfigResolved, ConfigError> {
    load_from(|key| std::env::var(key).ok())
}

/// Same as [`load_with_sources`] with an injected environment lookup.
pub fn load_from<F>(env: F) -> Result<ConfigResolved, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut cfg = Config::default();
    let mut sources = ConfigSources::default();
    let var = |key: &str| env(key).filter(|v| !v.trim().is_empty());

    if let Some(path) = var(CONFIG_ENV) {
        let s = fs::read_to_string(path)?;
        let f: FileConfig = toml::from_str(&s)?;
        if let Some(v) = f.bet_per_card {
            cfg.bet_per_card = v;
            sources.bet_per_card = ValueSource::File;
        }
        if let Some(v) = f.commission_rate {
            cfg.commission_rate = v;
            sources.commission_rate = ValueSource::File;
        }
        if let Some(v) = f.interval_ms {
            cfg.interval_ms = v;
            sources.interval_ms = ValueSource::File;
        }
        if let Some(v) = f.pattern {
            cfg.pattern = parse_pattern(&v)?;
            sources.pattern = ValueSource::File;
        }
        if let Some(v) = f.language {
            cfg.language = parse_language(&v)?;
            sources.language = ValueSource::File;
        }
        if let Some(v) = f.seed {
            cfg.seed = Some(v);
            sources.seed = ValueSource::File;
        }
        if let Some(v) = f.shop_id {
            cfg.shop_id = Some(v);
            sources.shop_id = ValueSource::File;
        }
        if let Some(v) = f.cards_dir {
            cfg.cards_dir = Some(v);
            sources.cards_dir = ValueSource::File;
        }
    }

    if let Some(bet) = var("SHOPBINGO_BET") {
        cfg.bet_per_card = bet
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid("Invalid bet".into()))?;
        sources.bet_per_card = ValueSource::Env;
    }
    if let Some(rate) = var("SHOPBINGO_COMMISSION") {
        cfg.commission_rate = rate
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid("Invalid commission".into()))?;
        sources.commission_rate = ValueSource::Env;
    }
    if let Some(ms) = var("SHOPBINGO_INTERVAL_MS") {
        cfg.interval_ms = ms
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid("Invalid interval".into()))?;
        sources.interval_ms = ValueSource::Env;
    }
    if let Some(p) = var("SHOPBINGO_PATTERN") {
        cfg.pattern = parse_pattern(&p)?;
        sources.pattern = ValueSource::Env;
    }
    if let Some(lang) = var("SHOPBINGO_LANGUAGE") {
        cfg.language = parse_language(&lang)?;
        sources.language = ValueSource::Env;
    }
    if let Some(seed) = var("SHOPBINGO_SEED") {
        cfg.seed = Some(
            seed.trim()
                .parse()
                .map_err(|_| ConfigError::Invalid("Invalid seed".into()))?,
        );
        sources.seed = ValueSource::Env;
    }
    if let Some(shop) = var("SHOPBINGO_SHOP_ID") {
        cfg.shop_id = Some(shop);
        sources.shop_id = ValueSource::Env;
    }
    if let Some(dir) = var("SHOPBINGO_CARDS_DIR") {
        cfg.cards_dir = Some(dir);
        sources.cards_dir = ValueSource::Env;
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
    bet_per_card: Option<u32>,
    #[serde(default)]
    commission_rate: Option<f64>,
    #[serde(default)]
    interval_ms: Option<u64>,
    #[serde(default)]
    pattern: Option<String>,
    #[serde(default)]
    language: Option<String>,
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    shop_id: Option<String>,
    #[serde(default)]
    cards_dir: Option<String>,
}

fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if cfg.bet_per_card == 0 {
        return Err(ConfigError::Invalid(
            "Invalid configuration: bet_per_card must be >0".into(),
        ));
    }
    if !(0.0..=1.0).contains(&cfg.commission_rate) {
        return Err(ConfigError::Invalid(
            "Invalid configuration: commission_rate must be within 0..=1".into(),
        ));
    }
    if cfg.interval_ms == 0 {
        return Err(ConfigError::Invalid(
            "Invalid configuration: interval_ms must be >0".into(),
        ));
    }
    Ok(())
}

fn parse_pattern(s: &str) -> Result<WinningPattern, ConfigError> {
    s.parse()
        .map_err(|e: shopbingo_engine::errors::PatternParseError| {
            ConfigError::Invalid(e.to_string())
        })
}

fn parse_language(s: &str) -> Result<Language, ConfigError> {
    s.parse().map_err(ConfigError::Invalid)
}
