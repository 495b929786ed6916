// this_file: crates/glyphmesh-cli/src/cli.rs

//! CLI argument definitions using Clap v4

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// glyphmesh - TrueType glyphs as triangle meshes
#[derive(Parser, Debug)]
#[command(name = "glyphmesh")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Raise log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Display font-wide metrics, mapped characters and load warnings
    #[command(alias = "i")]
    Info(InfoArgs),

    /// Display metrics and triangle counts for one character
    #[command(alias = "g")]
    Glyph(GlyphArgs),

    /// Lay out text and write its mesh as JSON
    #[command(alias = "m")]
    Mesh(MeshArgs),
}

/// Arguments for the info command
#[derive(Parser, Debug)]
pub struct InfoArgs {
    /// Font file path (.ttf)
    pub font: PathBuf,

    /// Also list every mapped character
    #[arg(long)]
    pub chars: bool,
}

/// Arguments for the glyph command
#[derive(Parser, Debug)]
pub struct GlyphArgs {
    /// Font file path (.ttf)
    pub font: PathBuf,

    /// Character to inspect
    pub character: char,
}

/// Arguments for the mesh command
#[derive(Parser, Debug)]
pub struct MeshArgs {
    /// Font file path (.ttf)
    pub font: PathBuf,

    /// Text to lay out
    pub text: String,

    /// Pixels per em; vertices stay in font units when omitted
    #[arg(short, long)]
    pub size: Option<f32>,

    /// Output file (stdout when omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Write compact instead of pretty-printed JSON
    #[arg(long)]
    pub compact: bool,
}

impl Cli {
    /// Log filter for the requested verbosity.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}
