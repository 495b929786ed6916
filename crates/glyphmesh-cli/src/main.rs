// this_file: crates/glyphmesh-cli/src/main.rs

//! glyphmesh CLI - inspect fonts and export glyph meshes

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(cli.log_level()))
        .init();

    match &cli.command {
        Commands::Info(args) => commands::info::run(args),
        Commands::Glyph(args) => commands::glyph::run(args),
        Commands::Mesh(args) => commands::mesh::run(args),
    }
}
