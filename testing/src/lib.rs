pub mod core;
#[cfg(feature = "repo")]
pub mod repo;

mod utils;
pub use utils::*;
