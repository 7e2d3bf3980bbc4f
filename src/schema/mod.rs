//! Schema entries: decoded function declarations and their metadata.

pub mod arg_type;
pub mod entry;
pub mod loader;
pub mod signature;

pub use arg_type::ArgType;
pub use entry::{SchemaEntry, Variants, NN_MODULE};
pub use loader::{load_schema, parse_schema, RawRecord, Schema};
pub use signature::{Argument, Signature, SignatureError};
