pub mod asset;
pub mod branch;
pub mod error;
pub mod repo;
pub mod stage;
pub mod workspace;

mod util;
