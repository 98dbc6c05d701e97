pub mod fixtures;
pub mod memory;
pub mod traits;

pub use fixtures::*;
pub use memory::*;
pub use traits::*;
