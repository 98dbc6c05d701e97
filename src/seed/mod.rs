pub mod data;
pub mod status;
pub mod text;

pub use data::*;
pub use status::*;
pub use text::*;
