pub mod real;
pub mod traits;

pub use real::{MemoryFileSystem, RealFileSystem};
pub use traits::FileSystem;
