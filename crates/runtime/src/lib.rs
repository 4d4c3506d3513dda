pub mod coalesce;
pub mod event_bus;
pub mod signal;
pub mod transition;

pub use coalesce::*;
pub use event_bus::*;
pub use signal::*;
pub use transition::*;
