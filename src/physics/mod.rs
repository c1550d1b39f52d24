pub mod obstacles;
pub mod sensor;
pub mod types;

pub use obstacles::*;
pub use sensor::*;
pub use types::*;
