pub mod traits;

pub use traits::{
    RepoBackend,
    RepoHandle,
};
