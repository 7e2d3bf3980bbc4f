pub mod deferred;
pub mod generate;

pub use deferred::{deferred_signatures, run_deferred};
pub use generate::{generate, run_generate, GenerationSummary, Mode};
