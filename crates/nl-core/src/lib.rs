//! Functional core: puzzle/solution model, workflow state machine and the
//! seat renderer. No I/O lives here.

pub mod error;
pub mod ids;
pub mod model;
pub mod seating;
pub mod workflow;

pub use error::*;
pub use ids::*;
pub use model::*;
pub use seating::*;
pub use workflow::*;
