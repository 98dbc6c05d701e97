pub mod activity;
pub mod common;
pub mod database;
pub mod task;
pub mod workspace;

pub use activity::*;
pub use common::*;
pub use database::*;
pub use task::*;
pub use workspace::*;
