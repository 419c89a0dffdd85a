pub mod json;
pub mod terminal;
pub mod text;
