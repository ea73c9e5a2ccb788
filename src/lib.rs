//! L-system geometry for the terminal.
//!
//! The core pipeline is pure and allocation-only:
//!
//! ```text
//! rule text -> RuleTable -> generate() -> Turtle::interpret() -> FitTransform::compute()
//! ```
//!
//! `raster`, `terminal`, `viewer` and friends are the terminal front-end built on top of it.

pub mod colors;
pub mod config;
pub mod error;
pub mod fit;
pub mod grammar;
pub mod help;
pub mod raster;
pub mod rules;
pub mod settings;
pub mod terminal;
pub mod turtle;
pub mod viewer;

pub use config::{LSystemConfig, Preset};
pub use error::{LsysError, Result};
pub use fit::{FitTransform, Viewport};
pub use grammar::{expanded_len, generate, LSystem};
pub use rules::RuleTable;
pub use turtle::{Bounds, DrawParams, Drawing, Point, Segment, Turtle, TurtleState};

/// Initialize tracing to stderr. `RUST_LOG` overrides the default `lsysart=warn`.
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("lsysart=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
