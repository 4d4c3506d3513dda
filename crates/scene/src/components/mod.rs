pub mod drawable2d;
pub mod path;
pub mod transform;
pub mod visibility;

pub use drawable2d::*;
pub use path::*;
pub use transform::*;
pub use visibility::*;
