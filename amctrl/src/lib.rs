pub mod error;
pub mod handle;
pub mod policy;
pub mod registry;
pub mod reply;
#[cfg(test)]
mod testing;
