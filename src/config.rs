//! Configuration file, data directory resolution and key bindings.
//!
//! ```toml
//! data_dir = "/home/me/.local/share/flashcards"
//! theme = "light"
//!
//! [keys]
//! "x" = "delete"
//! "space" = "flip"
//! ```

use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use clap::ValueEnum;
use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};

pub const CONFIG_ENV: &str = "FLASHCARDS_CONFIG";
pub const DATA_ENV: &str = "FLASHCARDS_DATA";
const APP_DIR: &str = "flashcards";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeKind {
    #[default]
    Dark,
    Light,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub data_dir: Option<PathBuf>,
    pub theme: ThemeKind,
    /// Single character (or `"space"`) -> action name.
    pub keys: HashMap<String, String>,
}

impl Config {
    pub fn from_toml(path: &Path, content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            source: Box::new(e),
        })
    }

    /// Read the first config file found; defaults when there is none.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let env = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
        let cwd = std::env::current_dir().ok();
        let Some(path) = locate(explicit, env, cwd, dirs::config_dir()) else {
            debug!("no config file, using defaults");
            return Ok(Self::default());
        };
        let content = fs::read_to_string(&path).map_err(|e| Error::storage(&path, e))?;
        debug!(path = %path.display(), "loaded config");
        Self::from_toml(&path, &content)
    }

    pub fn keymap(&self) -> HashMap<char, KeyAction> {
        parse_keymap(&self.keys)
    }
}

/// An explicit path is returned even if it does not exist, so that a typo
/// surfaces as a read error instead of silently falling back.
fn locate(
    explicit: Option<&Path>,
    env: Option<PathBuf>,
    cwd: Option<PathBuf>,
    config_dir: Option<PathBuf>,
) -> Option<PathBuf> {
    if let Some(p) = explicit {
        return Some(p.to_path_buf());
    }
    if let Some(p) = env {
        return Some(p);
    }
    let mut candidates = Vec::new();
    if let Some(cwd) = cwd {
        candidates.push(cwd.join("flashcards.toml"));
    }
    if let Some(dir) = config_dir {
        candidates.push(dir.join(APP_DIR).join("config.toml"));
    }
    candidates.into_iter().find(|c| c.exists())
}

/// `--data-dir` > `$FLASHCARDS_DATA` > config file > platform data dir >
/// `./.flashcards`.
pub fn resolve_data_dir(
    cli: Option<PathBuf>,
    env: Option<PathBuf>,
    config: Option<PathBuf>,
    platform: Option<PathBuf>,
) -> PathBuf {
    cli.or(env)
        .or(config)
        .or_else(|| platform.map(|p| p.join(APP_DIR)))
        .unwrap_or_else(|| PathBuf::from(".flashcards"))
}

// ---------------- Keymap ----------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    Up,
    Down,
    Open,
    New,
    Delete,
    StartStudy,
    Flip,
    Prev,
    Next,
    Back,
    Reload,
    Quit,
}

pub fn action_from_str(s: &str) -> Option<KeyAction> {
    use KeyAction::*;
    Some(match s {
        "up" => Up,
        "down" => Down,
        "open" => Open,
        "new" => New,
        "delete" => Delete,
        "start_study" => StartStudy,
        "flip" => Flip,
        "prev" => Prev,
        "next" => Next,
        "back" => Back,
        "reload" => Reload,
        "quit" => Quit,
        _ => return None,
    })
}

fn key_from_str(k: &str) -> Option<char> {
    if k.eq_ignore_ascii_case("space") {
        return Some(' ');
    }
    let mut chars = k.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => Some(ch),
        _ => None,
    }
}

/// Defaults with the valid overrides applied on top.
pub fn parse_keymap(map: &HashMap<String, String>) -> HashMap<char, KeyAction> {
    let mut out = default_keymap();
    for (k, v) in map {
        if let (Some(ch), Some(act)) = (key_from_str(k), action_from_str(v)) {
            out.insert(ch, act);
        }
    }
    out
}

pub fn default_keymap() -> HashMap<char, KeyAction> {
    use KeyAction::*;
    let mut m = HashMap::new();
    m.insert('k', Up);
    m.insert('j', Down);
    m.insert('o', Open);
    m.insert('n', New);
    m.insert('d', Delete);
    m.insert('s', StartStudy);
    m.insert(' ', Flip);
    m.insert('h', Prev);
    m.insert('l', Next);
    m.insert('b', Back);
    m.insert('R', Reload);
    m.insert('q', Quit);
    m
}
