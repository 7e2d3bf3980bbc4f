//! Schema file decoding.
//!
//! The schema is a YAML sequence of mapping records. Only `func`, `variants`
//! and `python_module` are read; every other key belongs to other consumers
//! of the file and is ignored.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use super::entry::{SchemaEntry, Variants};
use super::signature::Signature;
use crate::errors::GenError;
use crate::io::FileSystem;

/// One record as it appears in the schema file.
#[derive(Debug, Clone, Deserialize)]
pub struct RawRecord {
    pub func: String,
    #[serde(default)]
    pub variants: Option<String>,
    #[serde(default)]
    pub python_module: Option<String>,
}

impl RawRecord {
    fn decode(self, index: usize) -> Result<SchemaEntry, GenError> {
        let signature: Signature = self
            .func
            .parse()
            .map_err(|e| GenError::schema_at_record(format!("{}", e), index))?;
        Ok(SchemaEntry::new(
            signature,
            Variants::parse(self.variants.as_deref()),
            self.python_module,
        ))
    }
}

/// The decoded schema. Loaded once per run and handed to every stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    pub path: PathBuf,
    pub entries: Vec<SchemaEntry>,
}

impl Schema {
    pub fn entries(&self) -> &[SchemaEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Decode schema entries from YAML text, keeping file order.
pub fn parse_schema(contents: &str) -> Result<Vec<SchemaEntry>, GenError> {
    let records: Vec<RawRecord> = serde_yaml::from_str(contents)
        .map_err(|e| GenError::schema(format!("Failed to parse schema: {}", e)))?;

    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| record.decode(index))
        .collect()
}

/// Read and decode the schema at `path`.
///
/// A missing file is reported as a schema error since no run can proceed without it.
pub fn load_schema<F: FileSystem + ?Sized>(fs: &F, path: &Path) -> Result<Schema, GenError> {
    let contents = fs
        .read_to_string(path)
        .map_err(|e| GenError::schema(e.message()).in_schema_file(path))?;

    let entries = parse_schema(&contents).map_err(|e| e.in_schema_file(path))?;
    log::debug!("Loaded {} schema entries from {}", entries.len(), path.display());

    Ok(Schema {
        path: path.to_path_buf(),
        entries,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::MemoryFileSystem;
    use crate::schema::ArgType;
    use indoc::indoc;

    const SCHEMA: &str = indoc! {"
        - func: add.Tensor(Tensor self, Tensor other, *, Scalar alpha=1) -> Tensor
          variants: function, method
          dispatch:
            CPU: add_cpu
        - func: mse_loss(Tensor self, Tensor target, int reduction=Mean) -> Tensor
          python_module: nn
        - func: seed() -> int
    "};

    #[test]
    fn test_parse_schema_keeps_order_and_metadata() {
        let entries = parse_schema(SCHEMA).unwrap();
        assert_eq!(entries.len(), 3);

        assert_eq!(entries[0].binding_name(), "_add_tensor");
        assert!(entries[0].variants.function);
        assert!(entries[0].variants.method);

        assert!(entries[1].is_nn());
        assert_eq!(entries[1].arguments()[2].ty, ArgType::Int);

        assert!(entries[2].variants.function);
        assert!(!entries[2].variants.method);
    }

    #[test]
    fn test_malformed_yaml_is_schema_error() {
        let err = parse_schema("- func: [unterminated").unwrap_err();
        assert_eq!(err.category(), "Schema");
    }

    #[test]
    fn test_missing_func_key_is_schema_error() {
        let err = parse_schema("- variants: function\n").unwrap_err();
        assert_eq!(err.category(), "Schema");
    }

    #[test]
    fn test_bad_signature_reports_record_index() {
        let contents = indoc! {"
            - func: relu(Tensor self) -> Tensor
            - func: broken(Tensor self)
        "};
        let err = parse_schema(contents).unwrap_err();
        assert!(matches!(
            err,
            GenError::SchemaError {
                record: Some(1),
                ..
            }
        ));
    }

    #[test]
    fn test_load_schema_missing_file() {
        let fs = MemoryFileSystem::new();
        let err = load_schema(&fs, Path::new("native_functions.yaml")).unwrap_err();
        assert_eq!(err.category(), "Schema");
        assert_eq!(err.path(), Some(&PathBuf::from("native_functions.yaml")));
    }

    #[test]
    fn test_load_schema_from_fs() {
        let fs = MemoryFileSystem::with_file("native_functions.yaml", SCHEMA);
        let schema = load_schema(&fs, Path::new("native_functions.yaml")).unwrap();
        assert_eq!(schema.len(), 3);
        assert_eq!(schema.path, PathBuf::from("native_functions.yaml"));
    }
}
