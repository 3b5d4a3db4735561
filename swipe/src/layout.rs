//! Keyboard layout geometry.
//!
//! The UI layer owns the real key rectangles; this core only needs key
//! centers in normalized `[0,1]x[0,1]` coordinates plus the pixel bounds used
//! to normalize raw touch samples. Layouts load from JSON produced by the
//! keyboard's layout editor, or from the built-in QWERTY used in tests.

use ahash::AHashMap;
use anyhow::{ensure, Context, Result};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One key-center entry in a layout JSON file, in pixel coordinates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyPosition {
    pub ch: char,
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LayoutFile {
    name: String,
    width: f32,
    height: f32,
    keys: Vec<KeyPosition>,
}

/// Key-center geometry for one keyboard layout.
#[derive(Debug, Clone)]
pub struct KeyboardLayout {
    name: String,
    width: f32,
    height: f32,
    centers: AHashMap<char, (f32, f32)>,
}

impl KeyboardLayout {
    /// Build a layout from pixel-space key centers and pixel bounds.
    pub fn from_keys(name: &str, width: f32, height: f32, keys: &[KeyPosition]) -> Result<Self> {
        ensure!(width > 0.0 && height > 0.0, "layout bounds must be positive");
        ensure!(!keys.is_empty(), "layout has no keys");
        let mut centers = AHashMap::with_capacity(keys.len());
        for key in keys {
            centers.insert(key.ch, (key.x / width, key.y / height));
        }
        Ok(Self {
            name: name.to_string(),
            width,
            height,
            centers,
        })
    }

    /// Parse a layout from its JSON representation.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let file: LayoutFile = serde_json::from_str(json).context("parse layout json")?;
        Self::from_keys(&file.name, file.width, file.height, &file.keys)
    }

    /// Load a layout JSON file.
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("open layout {}", path.display()))?;
        Self::from_json_str(&text)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Normalized key center for `ch`, if the layout has that key.
    pub fn key_center(&self, ch: char) -> Option<(f32, f32)> {
        self.centers.get(&ch).copied()
    }

    /// The key whose center is closest to a normalized point.
    pub fn nearest_key(&self, x: f32, y: f32) -> Option<char> {
        self.centers
            .iter()
            .map(|(&ch, &(kx, ky))| {
                let dx = x - kx;
                let dy = y - ky;
                (ch, dx * dx + dy * dy)
            })
            .min_by(|a, b| {
                a.1.partial_cmp(&b.1)
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then(a.0.cmp(&b.0))
            })
            .map(|(ch, _)| ch)
    }

    /// Map a raw device-space sample into the unit square.
    pub fn normalize_point(&self, x: f32, y: f32) -> (f32, f32) {
        ((x / self.width).clamp(0.0, 1.0), (y / self.height).clamp(0.0, 1.0))
    }

    pub fn key_count(&self) -> usize {
        self.centers.len()
    }
}

static QWERTY: Lazy<KeyboardLayout> = Lazy::new(|| {
    let rows: [(&str, f32, f32); 3] = [
        ("qwertyuiop", 0.0, 1.0 / 6.0),
        ("asdfghjkl", 0.05, 0.5),
        ("zxcvbnm", 0.15, 5.0 / 6.0),
    ];
    let mut centers = AHashMap::new();
    for (chars, indent, y) in rows {
        for (i, ch) in chars.chars().enumerate() {
            centers.insert(ch, ((i as f32 + 0.5) / 10.0 + indent, y));
        }
    }
    KeyboardLayout {
        name: "qwerty".to_string(),
        width: 1.0,
        height: 1.0,
        centers,
    }
});

/// The built-in US QWERTY layout in normalized units.
pub fn qwerty() -> KeyboardLayout {
    QWERTY.clone()
}
