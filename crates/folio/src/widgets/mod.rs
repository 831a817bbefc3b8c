//! Small rendering helpers shared by the page sections.

pub mod text_field;
pub mod wrap;

pub use text_field::TextField;
pub use wrap::{display_width, wrap, wrapped_height};
