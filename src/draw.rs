pub mod painter;
pub mod text;
