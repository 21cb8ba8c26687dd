pub mod render;
pub mod style;

pub use render::{render_dossier, render_entry};
