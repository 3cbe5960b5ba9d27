//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "engine", about = "Build, inspect and convert engine object and texture files")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Save a demo object with a camera, a light and a scripted rigid body
    Demo {
        /// Where to write the object file
        #[arg(short, long, default_value = "demo.object")]
        out: PathBuf,
    },

    /// Load an object file and print it as JSON
    Inspect {
        /// Object file to read
        file: PathBuf,

        /// Fail on component tags this build does not know
        #[arg(long)]
        strict: bool,
    },

    /// Load an object file, save it again and compare the bytes
    Roundtrip {
        /// Object file to read
        file: PathBuf,

        /// Write the re-saved object here instead of discarding it
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Import a PNG or JPEG image and save it as an engine texture
    Texture {
        /// Image to import
        image: PathBuf,

        /// Texture file to write (defaults to the image path with a
        /// `.texture` extension)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}
