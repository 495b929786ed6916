// this_file: crates/glyphmesh-cli/src/commands/info.rs

//! Info command implementation
//!
//! Displays font-wide metrics and anything that went wrong while loading.

use anyhow::Result;

use super::load_font;
use crate::cli::InfoArgs;

pub fn run(args: &InfoArgs) -> Result<()> {
    let font = load_font(&args.font)?;

    println!("Font: {}", args.font.display());
    println!("  Units per em:   {}", font.units_per_em());
    println!("  Glyphs:         {}", font.glyph_count());
    println!("  Characters:     {}", font.chars().count());
    println!("  Kerning pairs:  {}", font.kerning_pairs());

    let triangles: usize = (0..font.glyph_count())
        .filter_map(|index| font.glyph(index))
        .map(|glyph| glyph.triangle_count())
        .sum();
    println!("  Triangles:      {triangles}");

    if args.chars {
        let chars: String = font.chars().filter(|c| !c.is_control()).collect();
        println!();
        println!("Characters:");
        println!("  {chars}");
    }

    let warnings = font.warnings();
    if !warnings.is_empty() {
        println!();
        println!("Warnings ({}):", warnings.len());
        for warning in warnings {
            println!("  - {warning}");
        }
    }

    Ok(())
}
