use crate::grid::settings::PreferencesDoc;
use anyhow::{anyhow, Context, Result};
use std::path::{Path, PathBuf};

pub const PREFERENCES_FILE_NAME: &str = "golden_grid.ini";
pub const APP_FOLDER_NAME: &str = "golden_grid";

/// Typed access to the persisted preferences.
pub trait Preferences {
    fn load(&self) -> Result<PreferencesDoc>;
    fn save(&mut self, doc: &PreferencesDoc) -> Result<()>;
}

pub fn preferences_path_from_config_dir(config_dir: &Path) -> PathBuf {
    config_dir.join(APP_FOLDER_NAME).join(PREFERENCES_FILE_NAME)
}

pub fn preferences_path_from_exe_path(exe_path: &Path) -> Result<PathBuf> {
    let parent = exe_path
        .parent()
        .ok_or_else(|| anyhow!("executable path has no parent: {}", exe_path.display()))?;
    Ok(parent.join(PREFERENCES_FILE_NAME))
}

/// Per-user config folder, or next to the executable when the platform has none.
pub fn resolve_preferences_path() -> Result<PathBuf> {
    if let Some(config_dir) = dirs_next::config_dir() {
        return Ok(preferences_path_from_config_dir(&config_dir));
    }
    let exe_path = std::env::current_exe().context("resolve current executable")?;
    preferences_path_from_exe_path(&exe_path)
}

/// INI-like `[Section] Key = value` file, stored as TOML.
#[derive(Debug, Clone)]
pub struct PreferencesFile {
    path: PathBuf,
}

impl PreferencesFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn open_default() -> Result<Self> {
        Ok(Self::new(resolve_preferences_path()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `<file>.bak` next to the preferences file.
    pub fn backup_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".bak");
        PathBuf::from(name)
    }

    /// Copies the current file to [`Self::backup_path`] so a later save cannot destroy
    /// content that failed to load. Returns `None` when there is no file to keep.
    pub fn back_up(&self) -> Result<Option<PathBuf>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let backup = self.backup_path();
        std::fs::copy(&self.path, &backup).with_context(|| {
            format!(
                "back up preferences file {} to {}",
                self.path.display(),
                backup.display()
            )
        })?;
        Ok(Some(backup))
    }

    /// Loads the document, falling back to defaults with a warning.
    pub fn load_or_default(&self) -> PreferencesDoc {
        match self.load() {
            Ok(doc) => doc,
            Err(err) => {
                tracing::warn!(error = ?err, path = %self.path.display(), "using default preferences");
                PreferencesDoc::default()
            }
        }
    }
}

impl Preferences for PreferencesFile {
    fn load(&self) -> Result<PreferencesDoc> {
        Ok(load_from_path(&self.path)?.unwrap_or_default())
    }

    fn save(&mut self, doc: &PreferencesDoc) -> Result<()> {
        save_to_path(&self.path, doc)
    }
}

/// Keeps the document in memory; every save is recorded.
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferences {
    pub current: PreferencesDoc,
    pub saves: Vec<PreferencesDoc>,
}

impl MemoryPreferences {
    pub fn new(current: PreferencesDoc) -> Self {
        Self {
            current,
            saves: Vec::new(),
        }
    }
}

impl Preferences for MemoryPreferences {
    fn load(&self) -> Result<PreferencesDoc> {
        Ok(self.current.clone())
    }

    fn save(&mut self, doc: &PreferencesDoc) -> Result<()> {
        self.current = doc.clone();
        self.saves.push(doc.clone());
        Ok(())
    }
}

fn load_from_path(path: &Path) -> Result<Option<PreferencesDoc>> {
    if !path.exists() {
        return Ok(None);
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("read preferences file {}", path.display()))?;

    if content.trim().is_empty() {
        return Ok(Some(PreferencesDoc::default()));
    }

    let mut loaded: PreferencesDoc = toml::from_str(&content)
        .with_context(|| format!("parse preferences file {}", path.display()))?;
    if loaded.sanitize() {
        tracing::debug!(path = %path.display(), "preferences adjusted while loading");
    }
    Ok(Some(loaded))
}

fn save_to_path(path: &Path, doc: &PreferencesDoc) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create preferences folder {}", parent.display()))?;
    }

    let mut sanitized = doc.clone();
    sanitized.sanitize();
    let text = toml::to_string_pretty(&sanitized).context("serialize preferences")?;
    std::fs::write(path, text)
        .with_context(|| format!("write preferences file {}", path.display()))
}
