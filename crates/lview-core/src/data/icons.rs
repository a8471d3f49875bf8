//! Icon loading.
//!
//! Icons are flat directories of PNG files named after the unit or spell they
//! depict. The actual GPU upload belongs to the overlay backend, which plugs in
//! through [`TextureLoader`].

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{Error, Result};

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1A, b'\n'];

/// Handle to a texture owned by the overlay backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TextureHandle {
    pub id: u64,
    pub width: u32,
    pub height: u32,
}

/// Loads an image file into a texture resource
pub trait TextureLoader {
    fn load_texture(&mut self, path: &Path) -> Result<TextureHandle>;
}

/// Loader that validates PNG headers and hands out sequential ids.
///
/// Used when no rendering device is attached (CLI checks, tests).
#[derive(Debug, Default)]
pub struct PngTextureLoader {
    next_id: u64,
}

impl PngTextureLoader {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TextureLoader for PngTextureLoader {
    fn load_texture(&mut self, path: &Path) -> Result<TextureHandle> {
        let bytes = fs::read(path)?;
        let (width, height) = parse_png_dimensions(&bytes)
            .ok_or_else(|| Error::Texture(format!("{} is not a valid PNG", path.display())))?;

        self.next_id += 1;
        Ok(TextureHandle {
            id: self.next_id,
            width,
            height,
        })
    }
}

/// Read width and height from the IHDR chunk that must follow the signature
pub fn parse_png_dimensions(bytes: &[u8]) -> Option<(u32, u32)> {
    // signature (8) + chunk length (4) + "IHDR" (4) + width (4) + height (4)
    if bytes.len() < 24 || bytes[..8] != PNG_SIGNATURE || &bytes[12..16] != b"IHDR" {
        return None;
    }

    let width = u32::from_be_bytes([bytes[16], bytes[17], bytes[18], bytes[19]]);
    let height = u32::from_be_bytes([bytes[20], bytes[21], bytes[22], bytes[23]]);
    if width == 0 || height == 0 {
        return None;
    }

    Some((width, height))
}

/// Load every `*.png` in `folder` into `images`, keyed by the lowercased file stem.
///
/// Returns the number of images that failed to load. A missing folder is
/// logged and treated as empty.
pub fn load_icons<L: TextureLoader + ?Sized>(
    folder: &Path,
    loader: &mut L,
    images: &mut HashMap<String, TextureHandle>,
) -> usize {
    let entries = match fs::read_dir(folder) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("Can't read icon folder {}: {}", folder.display(), e);
            return 0;
        }
    };

    let mut failed = 0;
    for entry in entries.flatten() {
        let path = entry.path();
        let is_png = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("png"));
        if !is_png || !path.is_file() {
            continue;
        }

        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            warn!("Skipping icon with non UTF-8 name: {}", path.display());
            failed += 1;
            continue;
        };

        match loader.load_texture(&path) {
            Ok(texture) => {
                debug!("Loaded icon {} ({}x{})", stem, texture.width, texture.height);
                images.insert(stem.to_lowercase(), texture);
            }
            Err(e) => {
                warn!("Failed to load: {} ({})", path.display(), e);
                failed += 1;
            }
        }
    }

    failed
}
