pub mod analysis;
pub mod logging;
