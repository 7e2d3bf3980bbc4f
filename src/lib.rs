//! Binding generator for native tensor-library function schemas.
//!
//! Reads a YAML schema of native function declarations and emits the C++
//! glue that registers each function on one of three surfaces: free
//! functions, tensor methods, and neural-network operators.
//!
//! ```rust
//! use nativegen::namespace::Namespace;
//! use nativegen::pipeline::{classify, stages::ExclusionRules};
//! use nativegen::schema::parse_schema;
//!
//! let entries = parse_schema(
//!     "- func: argmax(Tensor self, int? dim=None, bool keepdim=False) -> Tensor\n",
//! )
//! .unwrap();
//! let classification = classify(&entries, &ExclusionRules::default());
//!
//! let names: Vec<String> = classification
//!     .entries(Namespace::Torch)
//!     .iter()
//!     .map(|e| e.binding_name())
//!     .collect();
//! assert_eq!(names, vec!["_argmax_dim", "_argmax"]);
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod emit;
pub mod errors;
pub mod io;
pub mod namespace;
pub mod pipeline;
pub mod render;
pub mod schema;

pub use crate::commands::{generate, run_generate, GenerationSummary, Mode};
pub use crate::config::Settings;
pub use crate::errors::GenError;
pub use crate::namespace::Namespace;
pub use crate::pipeline::{classify, Classification};
pub use crate::render::RenderedBinding;
pub use crate::schema::{load_schema, ArgType, Schema, SchemaEntry};
