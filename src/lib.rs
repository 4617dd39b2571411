pub mod config;
pub mod error;
pub mod fixtures;
pub mod geometry;
pub mod ir;
pub mod logo;
pub mod random;
pub mod render;
pub mod theme;
pub mod tree_dump;

#[cfg(feature = "cli")]
pub mod cli;
#[cfg(feature = "cli")]
pub mod logging;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, Icon, LogoConfig, Variant, load_config};
pub use error::{Error, Result};
pub use ir::{Document, Gradient, Node, NodeKind};
pub use logo::build_logo;
pub use random::{RandomSource, make_rng};
pub use render::{render_svg, write_output};
pub use theme::Theme;
