//! Icon section of the browser extension manifest
//!
//! The extension's `manifest.json` lists its icons twice: under the top-level
//! `icons` key and under `action.default_icon`. Both map the edge length (as a
//! string) to the PNG file name. This module writes that fragment next to the
//! generated icons so it can be pasted into the manifest.

use crate::icon_gen::icon_file_name;
use anyhow::{Context, Result};
use serde::Serialize;
use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

pub const MANIFEST_FILE_NAME: &str = "manifest-icons.json";

/// Size to file name; integer keys keep numeric order and serialize as strings
pub type IconMap = BTreeMap<u32, String>;

#[derive(Serialize, Debug, Clone, Default)]
pub struct ManifestIcons {
    pub icons: IconMap,

    pub action: Action,
}

#[derive(Serialize, Debug, Clone, Default)]
pub struct Action {
    pub default_icon: IconMap,
}

impl ManifestIcons {
    pub fn from_sizes(sizes: &[u32]) -> Self {
        let mut manifest = Self::default();
        for &size in sizes {
            manifest.add_icon(size);
        }
        manifest
    }

    pub fn add_icon(&mut self, size: u32) {
        self.icons.insert(size, icon_file_name(size));
        self.action.default_icon.insert(size, icon_file_name(size));
    }
}

/// Write `manifest-icons.json` for `sizes` into `out_dir`
pub fn write_manifest(out_dir: &Path, sizes: &[u32]) -> Result<PathBuf> {
    let manifest = ManifestIcons::from_sizes(sizes);
    let json =
        serde_json::to_string_pretty(&manifest).context("Failed to serialize manifest icons")?;

    let path = out_dir.join(MANIFEST_FILE_NAME);
    std::fs::write(&path, json).with_context(|| format!("Failed to write {}", path.display()))?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_sizes_map_to_icon_files() {
        let manifest = ManifestIcons::from_sizes(&[16, 48, 128]);
        assert_eq!(manifest.icons.len(), 3);
        assert_eq!(manifest.icons[&16], "icon16.png");
        assert_eq!(manifest.icons[&128], "icon128.png");
        assert_eq!(manifest.icons, manifest.action.default_icon);
    }

    #[test]
    fn test_keys_serialize_in_numeric_order() {
        let manifest = ManifestIcons::from_sizes(&[128, 16, 48]);
        let json = serde_json::to_string(&manifest).unwrap();

        assert_eq!(
            json,
            r#"{"icons":{"16":"icon16.png","48":"icon48.png","128":"icon128.png"},"action":{"default_icon":{"16":"icon16.png","48":"icon48.png","128":"icon128.png"}}}"#
        );
    }

    #[test]
    fn test_duplicate_sizes_collapse() {
        let manifest = ManifestIcons::from_sizes(&[48, 48]);
        assert_eq!(manifest.icons.len(), 1);
    }

    #[test]
    fn test_write_manifest() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_manifest(temp_dir.path(), &[16, 48, 128]).unwrap();
        assert_eq!(path, temp_dir.path().join(MANIFEST_FILE_NAME));

        let parsed: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed["icons"]["48"], "icon48.png");
        assert_eq!(parsed["action"]["default_icon"]["16"], "icon16.png");
    }
}
