pub mod html;
pub mod text;


pub use html::parse_meta;
pub use text::parse_lines;
