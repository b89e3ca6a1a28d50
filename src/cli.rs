use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// emx-link - greppable source-location links for plain-text notes
///
/// # Quick Reference
///
/// ```bash
/// emx-link copy src/main.rs --line 42     # Remember src/main.rs line 42
/// emx-link paste notes.txt                # Append #[...:L42] to notes.txt
/// emx-link paste notes.txt --line 3 --yes # Insert before line 3, add root without asking
/// emx-link links notes.txt                # List links in a note
/// emx-link follow notes.txt --line 3      # Print <path>:<line> of the link on line 3
/// emx-link root src/main.rs               # Print the detected project root
/// ```
///
/// ## Link Syntax
///
/// - `#[src/main.rs:L42]`: a line in a file, relative or absolute
/// - `#[:meta:root:/home/me/project/]`: project root for relative links in
///   this note (the first one in the note wins)
///
/// ## Environment Variables
///
/// - `EMX_LINK_CONFIG`: config file (default: <config dir>/emx-link/config.yaml)
/// - `EMX_LINK_STORE`: clipboard file (default: <data dir>/emx-link/clipboard.json)
/// - `EMX_LINK_LOG`: log filter, e.g. `debug` (default: warn)
#[derive(Parser, Debug)]
#[command(name = "emx-link")]
#[command(version)]
#[command(about = "Greppable source-location links for plain-text notes")]
pub struct Cli {
    /// Config file (default: $EMX_LINK_CONFIG or the platform config dir)
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the links in a note
    #[command(alias = "ls")]
    Links {
        /// Note file
        note: PathBuf,
    },

    /// Follow the link at a position in a note
    #[command(alias = "f")]
    Follow {
        /// Note file
        note: PathBuf,

        /// 1-based line holding the link
        #[arg(short, long)]
        line: usize,

        /// 0-based byte column inside the line (default: first link on the line)
        #[arg(short, long)]
        column: Option<usize>,
    },

    /// Capture a file location into the clipboard
    #[command(alias = "c")]
    Copy {
        /// Source file
        file: PathBuf,

        /// 1-based line to capture
        #[arg(short, long, default_value_t = 1)]
        line: usize,
    },

    /// Insert the captured location into a note
    #[command(alias = "p")]
    Paste {
        /// Note file (created when missing)
        note: PathBuf,

        /// Insert before this 1-based line (default: end of note)
        #[arg(short, long)]
        line: Option<usize>,

        /// Add a root declaration without asking
        #[arg(short, long, conflicts_with = "no_root")]
        yes: bool,

        /// Never add a root declaration
        #[arg(long)]
        no_root: bool,
    },

    /// Print the project root detected for a file
    Root {
        /// File inside a project
        file: PathBuf,
    },
}
