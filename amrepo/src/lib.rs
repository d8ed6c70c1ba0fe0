pub mod backend;
pub mod handle;
mod util;

#[macro_use]
extern crate log;

pub use backend::GitBackend;
pub use handle::GitHandle;
