//! CLI definitions and command dispatch.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::points::print_points;

#[derive(Parser)]
#[command(name = "stemfit")]
#[command(about = "Inspect glyph outlines for hint authoring")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print a glyph's outline points with the labels hints use
    Points {
        /// Font file (TrueType outlines)
        font: PathBuf,
        /// Glyph id, single character, or postscript name
        glyph: String,
        /// Print only points carrying a symbolic name
        #[arg(long)]
        named: bool,
    },
}

impl Commands {
    pub fn run(self) -> Result<()> {
        match self {
            Commands::Points { font, glyph, named } => {
                print_points(&font, &glyph, named)?;
            }
        }
        Ok(())
    }
}
