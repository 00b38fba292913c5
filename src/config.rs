//! Configuration module for `snlists`

use crate::core::EditorConfig;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;

/// Default CLI configuration loaded based on build profile.
/// Uses release defaults in release mode, debug defaults in debug mode.
#[cfg(not(debug_assertions))]
const CONFIG_DEFAULTS: &str = include_str!("../assets/DefaultCLIConfigRelease.toml");

#[cfg(debug_assertions)]
const CONFIG_DEFAULTS: &str = include_str!("../assets/DefaultCLIConfigDebug.toml");

#[cfg(not(debug_assertions))]
const CONFIG_FILE_NAME: &str = "config.toml";

#[cfg(debug_assertions)]
const CONFIG_FILE_NAME: &str = "dconfig.toml";

/// Placeholder for the `snlists` config directory
const CONFIG_DIR_VAR: &str = "$SN_LISTS";

/// Environment variable naming the CoCo installation root
pub const COCO_ROOT_ENV: &str = "COCO_ROOT_DIR";

/// Logging configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug)
    #[serde(default)]
    pub level: String,
    /// Log file path
    #[serde(default)]
    pub file: String,
    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,
}

/// Paths configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory holding the per-supernova `.list` files
    #[serde(default)]
    pub list_dir: String,
}

/// Editor behaviour
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditorSettings {
    /// Rewrite list files through a temporary file and rename
    #[serde(default = "default_atomic_write")]
    pub atomic_write: bool,
}

const fn default_atomic_write() -> bool {
    true
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            atomic_write: default_atomic_write(),
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Path settings
    #[serde(default)]
    pub paths: PathsConfig,
    /// Editor settings
    #[serde(default)]
    pub editor: EditorSettings,
}

/// Optional CLI overrides for configuration values
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Override logging level
    pub level: Option<String>,
    /// Override log file path
    pub file: Option<String>,
    /// Override verbose flag
    pub verbose: Option<bool>,
    /// Override the list directory
    pub list_dir: Option<String>,
    /// Override atomic writes
    pub atomic_write: Option<bool>,
}

impl Config {
    /// Get the `$SN_LISTS` directory path
    ///
    /// Returns:
    /// - Linux: `~/.config/snlists`
    /// - macOS: `~/Library/Application Support/snlists`
    /// - Windows: `%APPDATA%\snlists`
    #[must_use]
    pub fn get_snlists_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("snlists")
    }

    /// Merge missing fields from defaults into this config
    ///
    /// Only fields that are empty here and non-empty in `defaults` are filled in,
    /// so upgrading picks up new settings without clobbering user choices.
    ///
    /// # Returns
    ///
    /// `true` if any fields were added/changed, `false` otherwise
    #[allow(clippy::useless_let_if_seq)]
    pub fn merge_defaults(&mut self, defaults: &Self) -> bool {
        let mut changed = false;

        if self.logging.level.is_empty() && !defaults.logging.level.is_empty() {
            self.logging.level.clone_from(&defaults.logging.level);
            changed = true;
        }
        if self.logging.file.is_empty() && !defaults.logging.file.is_empty() {
            self.logging.file.clone_from(&defaults.logging.file);
            changed = true;
        }

        if self.paths.list_dir.is_empty() && !defaults.paths.list_dir.is_empty() {
            self.paths.list_dir.clone_from(&defaults.paths.list_dir);
            changed = true;
        }

        changed
    }

    /// Apply CLI-provided overrides onto the loaded configuration
    ///
    /// Overrides last for this run only; nothing is written to disk. Only
    /// non-`None` values replace config values.
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let mut config = Config::load();
    /// config.apply_overrides(&ConfigOverrides {
    ///     list_dir: Some("/tmp/lists".to_string()),
    ///     ..Default::default()
    /// });
    /// ```
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(level) = &overrides.level {
            self.logging.level.clone_from(level);
        }
        if let Some(file) = &overrides.file {
            self.logging.file.clone_from(file);
        }
        if let Some(verbose) = overrides.verbose {
            self.logging.verbose = verbose;
        }
        if let Some(list_dir) = &overrides.list_dir {
            self.paths.list_dir.clone_from(list_dir);
        }
        if let Some(atomic_write) = overrides.atomic_write {
            self.editor.atomic_write = atomic_write;
        }
    }

    /// Get the user config file path
    ///
    /// `config.toml` for release builds, `dconfig.toml` for debug builds, inside
    /// [`get_snlists_dir`](Self::get_snlists_dir).
    #[must_use]
    pub fn get_config_file_path() -> PathBuf {
        Self::get_snlists_dir().join(CONFIG_FILE_NAME)
    }

    /// Expand `$SN_LISTS` and `$COCO_ROOT_DIR` in a string
    ///
    /// `$SN_LISTS` becomes the config directory. `$COCO_ROOT_DIR` becomes the value
    /// of that environment variable and is left as-is when the variable is unset,
    /// so a missing root shows up verbatim in the resolved path.
    #[must_use]
    pub fn expand_variables(value: &str) -> String {
        let mut expanded = value.to_string();
        if expanded.contains(CONFIG_DIR_VAR) {
            let dir = Self::get_snlists_dir();
            expanded = expanded.replace(CONFIG_DIR_VAR, dir.to_str().unwrap_or("."));
        }
        let coco_var = format!("${COCO_ROOT_ENV}");
        if expanded.contains(&coco_var) {
            if let Ok(root) = std::env::var(COCO_ROOT_ENV) {
                expanded = expanded.replace(&coco_var, &root);
            }
        }
        expanded
    }

    /// Initialize config from a TOML string
    ///
    /// Missing sections and fields fall back to their serde defaults. Values are
    /// kept as written, variables included, so saving the config never freezes
    /// `$COCO_ROOT_DIR` to the value it had on one run. Use
    /// [`resolved_list_dir`](Self::resolved_list_dir) and
    /// [`resolved_log_file`](Self::resolved_log_file) for expanded paths.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML cannot be parsed or doesn't match the expected schema
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    /// Load configuration from embedded defaults
    ///
    /// Debug builds use `DefaultCLIConfigDebug.toml`, release builds use
    /// `DefaultCLIConfigRelease.toml`.
    ///
    /// # Panics
    /// Panics if the embedded default configuration is invalid TOML. The defaults
    /// are compiled in, so this only happens if the asset itself is broken.
    #[must_use]
    pub fn from_defaults() -> Self {
        Self::from_toml(CONFIG_DEFAULTS).expect("Failed to parse compiled-in default configuration")
    }

    /// Load configuration from file, or create from defaults if not found
    ///
    /// - If the config file exists: load it, merge missing fields from defaults, save if anything was added
    /// - On first run: create the config directory and write the defaults
    ///
    /// Falls back to defaults if the file exists but cannot be read or parsed.
    #[must_use]
    pub fn load() -> Self {
        let config_file = Self::get_config_file_path();
        let defaults = Self::from_defaults();

        if config_file.exists() {
            if let Ok(content) = fs::read_to_string(&config_file) {
                if let Ok(mut config) = Self::from_toml(&content) {
                    if config.merge_defaults(&defaults) {
                        let _ = config.save();
                    }
                    return config;
                }
            }
        } else {
            if let Some(parent) = config_file.parent() {
                let _ = fs::create_dir_all(parent);
            }
            let _ = defaults.save();
            return defaults;
        }

        defaults
    }

    /// Save configuration to file
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be created or the file cannot be written
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let config_file = Self::get_config_file_path();
        if let Some(parent) = config_file.parent() {
            fs::create_dir_all(parent)?;
        }
        let toml_str = toml::to_string_pretty(self)?;
        fs::write(&config_file, toml_str)?;
        Ok(())
    }

    /// Get a configuration value by key
    ///
    /// Supported keys: `level`, `file`, `verbose`, `list_dir`, `atomic_write`.
    /// Dashed spellings (`list-dir`, `atomic-write`) are accepted too.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "level" => Some(self.logging.level.clone()),
            "file" => Some(self.logging.file.clone()),
            "verbose" => Some(self.logging.verbose.to_string()),
            "list_dir" | "list-dir" => Some(self.paths.list_dir.clone()),
            "atomic_write" | "atomic-write" => Some(self.editor.atomic_write.to_string()),
            _ => None,
        }
    }

    /// Set a configuration value by key
    ///
    /// Updates the in-memory config only; call [`save()`](Config::save) to persist.
    ///
    /// # Errors
    /// Returns an error if the key is unknown or a boolean value cannot be parsed
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        match key {
            "level" => self.logging.level = value.to_string(),
            "file" => self.logging.file = value.to_string(),
            "verbose" => self.logging.verbose = parse_bool(key, value)?,
            "list_dir" | "list-dir" => self.paths.list_dir = value.to_string(),
            "atomic_write" | "atomic-write" => self.editor.atomic_write = parse_bool(key, value)?,
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Unset a configuration value by key (reset to default)
    ///
    /// # Errors
    /// Returns an error if the key is not recognized.
    pub fn unset(&mut self, key: &str, defaults: &Self) -> Result<(), String> {
        match key {
            "level" => self.logging.level.clone_from(&defaults.logging.level),
            "file" => self.logging.file.clone_from(&defaults.logging.file),
            "verbose" => self.logging.verbose = defaults.logging.verbose,
            "list_dir" | "list-dir" => self.paths.list_dir.clone_from(&defaults.paths.list_dir),
            "atomic_write" | "atomic-write" => {
                self.editor.atomic_write = defaults.editor.atomic_write;
            }
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Reset all configuration to defaults
    ///
    /// Deletes the config file so the next [`load()`](Config::load) recreates it.
    /// Succeeds without doing anything if there is no file.
    ///
    /// # Errors
    /// Returns an error if the config file exists but cannot be deleted
    pub fn reset() -> Result<(), std::io::Error> {
        let config_file = Self::get_config_file_path();
        if config_file.exists() {
            fs::remove_file(config_file)?;
        }
        Ok(())
    }

    /// List directory with variables expanded against the current environment
    #[must_use]
    pub fn resolved_list_dir(&self) -> PathBuf {
        PathBuf::from(Self::expand_variables(&self.paths.list_dir))
    }

    /// Log file path with variables expanded, or `None` when file logging is off
    #[must_use]
    pub fn resolved_log_file(&self) -> Option<PathBuf> {
        (!self.logging.file.is_empty())
            .then(|| PathBuf::from(Self::expand_variables(&self.logging.file)))
    }

    /// Build the editor settings for this configuration
    #[must_use]
    pub fn editor_config(&self) -> EditorConfig {
        EditorConfig::new(self.resolved_list_dir()).with_atomic_write(self.editor.atomic_write)
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, String> {
    value
        .parse::<bool>()
        .map_err(|_| format!("Invalid boolean value for '{key}': '{value}'"))
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[logging]")?;
        writeln!(f, "  level = \"{}\"", self.logging.level)?;
        writeln!(f, "  file = \"{}\"", self.logging.file)?;
        writeln!(f, "  verbose = {}", self.logging.verbose)?;

        writeln!(f, "\n[paths]")?;
        writeln!(f, "  list_dir = \"{}\"", self.paths.list_dir)?;

        writeln!(f, "\n[editor]")?;
        writeln!(f, "  atomic_write = {}", self.editor.atomic_write)?;

        Ok(())
    }
}
