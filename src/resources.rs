//! Bundled data lookup.
//!
//! The application ships its icons and the face-detection cascades next to the
//! executable. Paths are resolved relative to a root folder so that a packaged
//! build and a development checkout both find them.

use crate::constants::WINDOW_ICON_FILE;
use crate::logger::log;
use eframe::egui::IconData;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Named resource categories shipped with the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    /// Icons and about-box artwork
    Media,
    /// Haar cascade classifiers used by the processor for face detection
    Haarcascades,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(get_data(*self))
    }
}

/// Relative location of a resource category
pub fn get_data(kind: ResourceKind) -> &'static str {
    match kind {
        ResourceKind::Media => "media",
        ResourceKind::Haarcascades => "haarcascades",
    }
}

/// Resolve a resource category against the application root folder
pub fn resource_path(root: &Path, kind: ResourceKind) -> PathBuf {
    root.join(get_data(kind))
}

/// Decode the bundled window icon.
///
/// Returns `None` when the media folder has no usable icon; the window then
/// opens with the platform default.
pub fn load_window_icon(root: &Path) -> Option<IconData> {
    let path = resource_path(root, ResourceKind::Media).join(WINDOW_ICON_FILE);
    let bytes = match fs::read(&path) {
        Ok(bytes) => bytes,
        Err(e) => {
            log::warn!("No window icon at {}: {}", path.display(), e);
            return None;
        }
    };

    match image::load_from_memory(&bytes) {
        Ok(icon) => {
            let rgba = icon.into_rgba8();
            let (width, height) = rgba.dimensions();
            Some(IconData {
                rgba: rgba.into_raw(),
                width,
                height,
            })
        }
        Err(e) => {
            log::warn!("Failed to decode window icon {}: {}", path.display(), e);
            None
        }
    }
}
