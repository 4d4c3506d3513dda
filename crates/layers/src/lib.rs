pub mod imagery;
pub mod layer;
pub mod symbology;

pub use layer::*;
