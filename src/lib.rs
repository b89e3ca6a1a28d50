pub mod activation;
pub mod cli;
pub mod config;
pub mod constants;
pub mod decorate;
pub mod document;
pub mod edit;
pub mod engine;
pub mod error;
pub mod grammar;
pub mod location;
pub mod navigate;
pub mod resolve;
pub mod util;

pub use activation::{auto_activate, should_activate};
pub use cli::{Cli, Command};
pub use config::Config;
pub use decorate::{Decoration, Decorator};
pub use document::Document;
pub use edit::{Applied, EditOp, ValidationError};
pub use engine::{LinkEngine, MetalinkPrompt, PasteOutcome};
pub use error::{LinkError, Result};
pub use grammar::{
    has_link, parse_location_link, parse_metalink_root, scan_links, serialize_location,
    serialize_metalink, LinkKind, LinkSpan,
};
pub use location::{FileStore, Location, LocationStore, MemoryStore};
pub use navigate::{FileOpener, FsOpener, Jump, JumpHook, NavState, Navigator};
pub use resolve::{install_metalink, resolve, MarkerRootDetector, RootDetector};
