// Configuration loading and parsing (config/lineup.toml).

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::formation::geometry::{Rect, Size};
use crate::formation::lineup::PitchGeometry;

/// Names used when the config file has no `[roster]` table.
pub const DEFAULT_ROSTER: &[&str] = &[
    "Benji P",
    "Alex",
    "Max M",
    "Toby",
    "Cameron A",
    "Lucas A",
    "Adam",
    "Elliot",
    "Cameron H",
    "Cade",
    "James",
    "Joshua",
    "Lucas R",
    "Liam",
    "Hugh",
    "Max G",
];

const CONFIG_FILE: &str = "lineup.toml";
const DEFAULT_DB_FILE: &str = "lineup.db";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// Top-level assembled Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Config {
    /// Player names, in bench order for a fresh roster.
    pub roster: Vec<String>,
    pub geometry: PitchGeometry,
    /// SQLite database path, already resolved against the platform data
    /// directory when the file leaves it unset.
    pub db_path: String,
}

// ---------------------------------------------------------------------------
// lineup.toml structs
// ---------------------------------------------------------------------------

/// Raw deserialization target for the entire lineup.toml file.
#[derive(Debug, Clone, Deserialize)]
struct LineupFile {
    #[serde(default)]
    roster: RosterSection,
    pitch: PitchSection,
    token: TokenSection,
    #[serde(default)]
    storage: StorageSection,
}

#[derive(Debug, Clone, Deserialize)]
struct RosterSection {
    names: Vec<String>,
}

impl Default for RosterSection {
    fn default() -> Self {
        RosterSection {
            names: DEFAULT_ROSTER.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct PitchSection {
    width: f64,
    height: f64,
    gk_zone: ZoneSection,
}

#[derive(Debug, Clone, Deserialize)]
struct ZoneSection {
    left: f64,
    top: f64,
    width: f64,
    height: f64,
}

#[derive(Debug, Clone, Deserialize)]
struct TokenSection {
    width: f64,
    height: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct StorageSection {
    path: Option<String>,
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate configuration from `config/lineup.toml` relative to
/// `base_dir`. Does not copy defaults; see `load_config()`.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let path = base_dir.join("config").join(CONFIG_FILE);
    let text = read_file(&path)?;
    parse_config(&text, &path)
}

/// Parse and validate the contents of a lineup.toml. `path` is only used
/// in error messages.
pub fn parse_config(text: &str, path: &Path) -> Result<Config, ConfigError> {
    let file: LineupFile = toml::from_str(text).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })?;

    let geometry = PitchGeometry {
        pitch: Size::new(file.pitch.width, file.pitch.height),
        gk_zone: Rect::new(
            file.pitch.gk_zone.left,
            file.pitch.gk_zone.top,
            file.pitch.gk_zone.width,
            file.pitch.gk_zone.height,
        ),
        token: Size::new(file.token.width, file.token.height),
    };

    let db_path = match file.storage.path {
        Some(p) if !p.trim().is_empty() => p,
        _ => default_db_path(),
    };

    let config = Config {
        roster: file.roster.names,
        geometry,
        db_path,
    };

    validate(&config)?;

    Ok(config)
}

/// Copy `defaults/lineup.toml` to `config/lineup.toml` if the latter is
/// missing. Returns the copied paths.
pub fn ensure_config_files(base_dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let defaults_dir = base_dir.join("defaults");
    let config_dir = base_dir.join("config");
    let source = defaults_dir.join(CONFIG_FILE);
    let target = config_dir.join(CONFIG_FILE);

    if !source.is_file() {
        if !target.is_file() {
            return Err(ConfigError::DefaultsCopyError {
                message: format!(
                    "neither defaults/{CONFIG_FILE} nor config/{CONFIG_FILE} found in {}; \
                     run from the project root or ensure defaults/ is present",
                    base_dir.display()
                ),
            });
        }
        return Ok(vec![]);
    }

    std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to create config directory: {e}"),
    })?;

    match std::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&target)
    {
        Ok(mut dest) => {
            let content = std::fs::read(&source).map_err(|e| ConfigError::DefaultsCopyError {
                message: format!("failed to read {}: {e}", source.display()),
            })?;
            std::io::Write::write_all(&mut dest, &content).map_err(|e| {
                ConfigError::DefaultsCopyError {
                    message: format!("failed to write {}: {e}", target.display()),
                }
            })?;
            Ok(vec![target])
        }
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => Ok(vec![]),
        Err(e) => Err(ConfigError::DefaultsCopyError {
            message: format!("failed to create {}: {e}", target.display()),
        }),
    }
}

/// Convenience wrapper: loads config relative to the current working
/// directory, copying defaults first.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    ensure_config_files(&cwd)?;
    load_config_from(&cwd)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

/// `lineup.db` in the platform data directory, or in the working directory
/// when no home directory can be determined.
fn default_db_path() -> String {
    directories::ProjectDirs::from("", "", "lineup")
        .map(|dirs| dirs.data_dir().join(DEFAULT_DB_FILE))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_FILE))
        .to_string_lossy()
        .into_owned()
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.roster.is_empty() {
        return Err(ConfigError::ValidationError {
            field: "roster.names".into(),
            message: "must list at least one player".into(),
        });
    }

    for (i, name) in config.roster.iter().enumerate() {
        if name.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                field: format!("roster.names[{i}]"),
                message: "must not be blank".into(),
            });
        }
        if config.roster[..i].contains(name) {
            return Err(ConfigError::ValidationError {
                field: format!("roster.names[{i}]"),
                message: format!("duplicate name {name:?}"),
            });
        }
    }

    let geo = &config.geometry;
    let dims: &[(&str, f64)] = &[
        ("pitch.width", geo.pitch.width),
        ("pitch.height", geo.pitch.height),
        ("pitch.gk_zone.width", geo.gk_zone.width),
        ("pitch.gk_zone.height", geo.gk_zone.height),
        ("token.width", geo.token.width),
        ("token.height", geo.token.height),
    ];
    for (name, val) in dims {
        if !(val.is_finite() && *val > 0.0) {
            return Err(ConfigError::ValidationError {
                field: name.to_string(),
                message: format!("must be > 0, got {val}"),
            });
        }
    }

    if geo.token.width > geo.pitch.width || geo.token.height > geo.pitch.height {
        return Err(ConfigError::ValidationError {
            field: "token".into(),
            message: format!(
                "token {}x{} does not fit on a {}x{} pitch",
                geo.token.width, geo.token.height, geo.pitch.width, geo.pitch.height
            ),
        });
    }

    if !geo.pitch_rect().encloses(&geo.gk_zone) {
        return Err(ConfigError::ValidationError {
            field: "pitch.gk_zone".into(),
            message: "must lie inside the pitch".into(),
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
