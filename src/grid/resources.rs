use anyhow::{Context, Result};
use image::imageops::FilterType;
use std::path::{Path, PathBuf};

pub const ICON_SIZE: u32 = 32;
pub const RES_DIR_ENV: &str = "GOLDEN_GRID_RES_DIR";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

/// Finds toolbar icons by name.
pub trait ResourceLocator {
    fn icon(&self, name: &str) -> Option<IconImage>;
}

/// No files at all; the toolbar paints its built-in glyphs.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinResources;

impl ResourceLocator for BuiltinResources {
    fn icon(&self, _name: &str) -> Option<IconImage> {
        None
    }
}

/// Searches resource folders in order for `icons/<name>.png`.
#[derive(Debug, Clone, Default)]
pub struct FileResources {
    roots: Vec<PathBuf>,
}

impl FileResources {
    pub fn with_roots(roots: Vec<PathBuf>) -> Self {
        Self { roots }
    }

    /// `$GOLDEN_GRID_RES_DIR`, `<exe>/res`, `<exe>/../share/golden_grid/res`,
    /// `<data dir>/golden_grid/res`.
    pub fn discover() -> Self {
        let mut roots = Vec::new();
        if let Some(dir) = std::env::var_os(RES_DIR_ENV) {
            roots.push(PathBuf::from(dir));
        }
        if let Some(exe_dir) = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
        {
            roots.push(exe_dir.join("res"));
            roots.push(exe_dir.join("..").join("share").join("golden_grid").join("res"));
        }
        if let Some(data_dir) = dirs_next::data_dir() {
            roots.push(data_dir.join("golden_grid").join("res"));
        }
        tracing::debug!(?roots, "resource search path");
        Self { roots }
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    pub fn find_icon(&self, name: &str) -> Option<PathBuf> {
        self.roots
            .iter()
            .map(|root| root.join("icons").join(format!("{name}.png")))
            .find(|path| path.is_file())
    }
}

impl ResourceLocator for FileResources {
    fn icon(&self, name: &str) -> Option<IconImage> {
        let Some(path) = self.find_icon(name) else {
            tracing::debug!(name, "icon not found; using built-in glyph");
            return None;
        };
        match load_icon(&path) {
            Ok(icon) => Some(icon),
            Err(err) => {
                tracing::warn!(error = ?err, "failed to load toolbar icon");
                None
            }
        }
    }
}

/// Decodes an image file and scales it to the toolbar icon size.
pub fn load_icon(path: &Path) -> Result<IconImage> {
    let img = image::open(path).with_context(|| format!("decode icon {}", path.display()))?;
    let scaled = img
        .resize_exact(ICON_SIZE, ICON_SIZE, FilterType::Triangle)
        .to_rgba8();
    Ok(IconImage {
        width: scaled.width(),
        height: scaled.height(),
        rgba: scaled.into_raw(),
    })
}
