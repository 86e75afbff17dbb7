//! Rendering: connectors, HTML assembly, outline export, and debug
//! artifacts.

mod assemble;
mod connector;
pub mod debug;
mod html;
mod options;
mod outline;

pub use assemble::{assemble, assemble_to_file};
pub use connector::{compute_connectors, Connector, CurvePath};
pub use debug::{render_debug_artifacts, render_overlay, render_page_overlay, write_preview_html};
pub use options::RenderOptions;
pub use outline::{render_outline, render_outline_to_file};
