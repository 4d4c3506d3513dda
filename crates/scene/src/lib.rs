pub mod components;
pub mod diff;
pub mod entity;
pub mod pool;

pub use diff::*;
pub use entity::*;
pub use pool::*;
