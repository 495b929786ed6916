// this_file: crates/glyphmesh-cli/src/commands/mod.rs

//! Command implementations

pub mod glyph;
pub mod info;
pub mod mesh;

use std::path::Path;

use anyhow::{Context, Result};
use glyphmesh::{Font, LoadOptions};

/// Load a font with options taken from the environment.
pub fn load_font(path: &Path) -> Result<Font> {
    let options = LoadOptions::from_env();
    Font::open_with_options(path, &options)
        .with_context(|| format!("failed to load font {}", path.display()))
}
