// this_file: crates/glyphmesh-cli/src/commands/glyph.rs

//! Glyph command implementation

use anyhow::{bail, Result};

use super::load_font;
use crate::cli::GlyphArgs;

pub fn run(args: &GlyphArgs) -> Result<()> {
    let font = load_font(&args.font)?;
    let Some(glyph) = font.glyph_for_char(args.character) else {
        bail!(
            "no glyph for {:?} (U+{:04X}) in {}",
            args.character,
            args.character as u32,
            args.font.display()
        );
    };

    println!("Character {:?} (U+{:04X})", args.character, args.character as u32);
    println!("  Glyph index:        {}", glyph.index());
    println!("  Advance width:      {}", glyph.advance_width());
    println!("  Left side bearing:  {}", glyph.left_side_bearing());
    println!("  Vertices:           {}", glyph.vertices().len());
    println!("  Triangles:          {}", glyph.triangle_count());
    println!("  Curve triangles:    {}", glyph.curve_triangle_count());

    Ok(())
}
