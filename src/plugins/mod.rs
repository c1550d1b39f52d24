pub mod level_loader;

pub use level_loader::*;
