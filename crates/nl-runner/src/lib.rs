pub mod config;
pub mod display;
pub mod orchestrator;
pub mod presenter;
pub mod sample;

pub use config::*;
pub use display::*;
pub use orchestrator::*;
pub use presenter::*;
pub use sample::*;
