pub mod busy;
pub mod logging;

pub use busy::BusyGuard;
