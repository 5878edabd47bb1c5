//! Configuration types for livefilter.
//!
//! [`Config::load`] reads `~/.config/livefilter/config.toml`, creating it with
//! hardcoded defaults if it does not yet exist. [`Config::defaults`] returns
//! the same defaults without touching the filesystem (useful in tests).

use crate::profile::{FilterProfile, KeyPolicy, Normalization, SelectionPolicy};
use serde::Deserialize;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[filter]
input_id     = "userSearch"
selection    = "marker"
container    = "ul"
child        = "li"
marker_class = "event-item"
key          = "annotation"
annotation   = "search"
trim         = true

[ui]
theme             = "default"
highlight_matches = true
show_counts       = true
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level application configuration, loaded from `~/.config/livefilter/config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub filter: FilterConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionKind {
    Generic,
    Marker,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyKind {
    Text,
    Annotation,
}

/// `[filter]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct FilterConfig {
    #[serde(default = "default_input_id")]
    pub input_id: String,
    #[serde(default = "default_selection")]
    pub selection: SelectionKind,
    #[serde(default = "default_container")]
    pub container: String,
    #[serde(default = "default_child")]
    pub child: String,
    #[serde(default = "default_marker_class")]
    pub marker_class: String,
    #[serde(default = "default_key")]
    pub key: KeyKind,
    #[serde(default = "default_annotation")]
    pub annotation: String,
    #[serde(default = "default_trim")]
    pub trim: bool,
}

fn default_input_id() -> String { "userSearch".to_string() }
fn default_selection() -> SelectionKind { SelectionKind::Marker }
fn default_container() -> String { crate::profile::DEFAULT_CONTAINER.to_string() }
fn default_child() -> String { crate::profile::DEFAULT_CHILD.to_string() }
fn default_marker_class() -> String { crate::profile::DEFAULT_MARKER_CLASS.to_string() }
fn default_key() -> KeyKind { KeyKind::Annotation }
fn default_annotation() -> String { crate::profile::DEFAULT_ANNOTATION.to_string() }
fn default_trim() -> bool { true }

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            input_id: default_input_id(),
            selection: default_selection(),
            container: default_container(),
            child: default_child(),
            marker_class: default_marker_class(),
            key: default_key(),
            annotation: default_annotation(),
            trim: default_trim(),
        }
    }
}

impl FilterConfig {
    /// Assemble the [`FilterProfile`] described by this section.
    pub fn profile(&self) -> FilterProfile {
        let selection = match self.selection {
            SelectionKind::Generic => SelectionPolicy::Generic {
                container: self.container.clone(),
                child: self.child.clone(),
            },
            SelectionKind::Marker => SelectionPolicy::Marker {
                class: self.marker_class.clone(),
            },
        };
        let key = match self.key {
            KeyKind::Text => KeyPolicy::RenderedText,
            KeyKind::Annotation => KeyPolicy::Annotation {
                name: self.annotation.clone(),
            },
        };
        let normalization = if self.trim {
            Normalization::LowercaseTrim
        } else {
            Normalization::Lowercase
        };
        FilterProfile {
            selection,
            key,
            normalization,
        }
    }
}

/// `[ui]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_highlight_matches")]
    pub highlight_matches: bool,
    #[serde(default = "default_show_counts")]
    pub show_counts: bool,
}

fn default_theme() -> String { "default".to_string() }
fn default_highlight_matches() -> bool { true }
fn default_show_counts() -> bool { true }

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            highlight_matches: default_highlight_matches(),
            show_counts: default_show_counts(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load from `~/.config/livefilter/config.toml`, layered on top of the
    /// built-in defaults. Creates the file with defaults if it does not exist.
    pub fn load() -> anyhow::Result<Self> {
        let path = config_path();

        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, DEFAULT_CONFIG.trim_start())?;
        }

        Self::load_from(&path)
    }

    /// Load `path` layered on top of the built-in defaults. A missing file
    /// yields the defaults.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path).required(false))
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("livefilter")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
