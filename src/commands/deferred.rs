//! The `deferred` command: list declared bindings left for a later pass.

use crate::config::Settings;
use crate::errors::GenError;
use crate::io::FileSystem;
use crate::pipeline::classify;
use crate::schema::{load_schema, Schema};

/// Declared signatures of every deferred entry, in schema order.
pub fn deferred_signatures(schema: &Schema, settings: &Settings) -> Vec<String> {
    classify(schema.entries(), &settings.exclusion_rules())
        .deferred
        .iter()
        .map(|entry| entry.declared_signature())
        .collect()
}

pub fn run_deferred<F: FileSystem + ?Sized>(
    fs: &F,
    settings: &Settings,
) -> Result<Vec<String>, GenError> {
    let schema = load_schema(fs, &settings.schema_path)?;
    Ok(deferred_signatures(&schema, settings))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::MemoryFileSystem;
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_lists_only_deferred_entries() {
        let fs = MemoryFileSystem::with_file(
            "schema.yaml",
            indoc! {"
                - func: empty(int[] size, *, Layout? layout=None) -> Tensor
                - func: abs(Tensor self) -> Tensor
                - func: _empty_affine(int[] size, *, Layout? layout=None) -> Tensor
                - func: clamp(Tensor self, Scalar? min=None, Scalar? max=None) -> Tensor
            "},
        );
        let settings = Settings {
            schema_path: "schema.yaml".into(),
            ..Settings::default()
        };

        assert_eq!(
            run_deferred(&fs, &settings).unwrap(),
            vec![
                "empty(int[] size, *, Layout? layout=None) -> Tensor",
                "clamp(Tensor self, Scalar? min=None, Scalar? max=None) -> Tensor",
            ]
        );
    }
}
