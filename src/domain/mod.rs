pub mod analysis;
pub mod reddit;
pub mod strategy;

pub use analysis::*;
pub use reddit::*;
pub use strategy::*;
