//! The `generate` command: schema in, six files out.

use std::fmt;
use std::path::PathBuf;

use crate::config::Settings;
use crate::emit::{emit_namespace, stale_files, write_namespace};
use crate::errors::GenError;
use crate::io::FileSystem;
use crate::namespace::Namespace;
use crate::pipeline::{classify, Classification};
use crate::schema::{load_schema, Schema};

/// Counts reported after a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationSummary {
    pub schema_entries: usize,
    pub excluded: usize,
    pub deferred: usize,
    pub withheld: usize,
    /// Entries replaced by a synthesized overload pair.
    pub split: usize,
    pub bindings: Vec<(Namespace, usize)>,
    pub files: Vec<PathBuf>,
}

impl GenerationSummary {
    fn new(schema: &Schema, classification: &Classification) -> Self {
        Self {
            schema_entries: schema.len(),
            excluded: classification.excluded.len(),
            deferred: classification.deferred.len(),
            withheld: classification.withheld.len(),
            split: classification.split.len(),
            ..Self::default()
        }
    }

    pub fn total_bindings(&self) -> usize {
        self.bindings.iter().map(|(_, n)| n).sum()
    }

    /// Single-line form of the run counts for the log.
    pub fn log_line(&self) -> String {
        let per_namespace = self
            .bindings
            .iter()
            .map(|(namespace, count)| format!("{}={}", namespace.name(), count))
            .collect::<Vec<_>>()
            .join(" ");
        format!(
            "Generated {} bindings from {} schema entries ({} excluded, {} deferred, {} withheld, {} split) [{}]",
            self.total_bindings(),
            self.schema_entries,
            self.excluded,
            self.deferred,
            self.withheld,
            self.split,
            per_namespace
        )
    }
}

impl fmt::Display for GenerationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} schema entries: {} excluded, {} deferred, {} withheld, {} split into overloads",
            self.schema_entries, self.excluded, self.deferred, self.withheld, self.split
        )?;
        for (namespace, count) in &self.bindings {
            writeln!(f, "  {:<7} {} bindings", namespace.name(), count)?;
        }
        Ok(())
    }
}

/// Whether to write the output files or only compare them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Write,
    Check,
}

/// Generate every namespace from an already loaded schema.
pub fn generate<F: FileSystem + ?Sized>(
    fs: &F,
    schema: &Schema,
    settings: &Settings,
    mode: Mode,
) -> Result<GenerationSummary, GenError> {
    let classification = classify(schema.entries(), &settings.exclusion_rules());
    let mut summary = GenerationSummary::new(schema, &classification);
    let mut stale = Vec::new();

    if mode == Mode::Write {
        fs.create_dir_all(&settings.output_dir)?;
    }

    for namespace in Namespace::ALL {
        let _span = tracing::info_span!("emit", namespace = namespace.name()).entered();
        let output = emit_namespace(
            namespace,
            classification.entries(namespace),
            &settings.output_dir,
        );

        match mode {
            Mode::Write => write_namespace(fs, &output)?,
            Mode::Check => stale.extend(stale_files(fs, &output)),
        }

        summary.bindings.push((namespace, output.binding_count));
        summary
            .files
            .extend(output.files().into_iter().map(|file| file.path.clone()));
    }

    if !stale.is_empty() {
        return Err(GenError::stale(stale));
    }

    log::info!("{}", summary.log_line());
    Ok(summary)
}

/// Load the schema named in `settings` and generate from it.
pub fn run_generate<F: FileSystem + ?Sized>(
    fs: &F,
    settings: &Settings,
    mode: Mode,
) -> Result<GenerationSummary, GenError> {
    let schema = load_schema(fs, &settings.schema_path)?;
    generate(fs, &schema, settings, mode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::MemoryFileSystem;
    use indoc::indoc;
    use std::path::Path;

    const SCHEMA: &str = indoc! {"
        - func: abs(Tensor self) -> Tensor
          variants: function, method
        - func: relu_backward(Tensor grad, Tensor self) -> Tensor
        - func: empty(int[] size, *, Layout? layout=None) -> Tensor
        - func: mse_loss(Tensor self, Tensor target, int reduction=Mean) -> Tensor
          python_module: nn
    "};

    fn settings() -> Settings {
        Settings {
            schema_path: PathBuf::from("native_functions.yaml"),
            output_dir: PathBuf::from("ext/torch"),
            skip_bindings: Vec::new(),
        }
    }

    #[test]
    fn test_generate_writes_six_files() {
        let fs = MemoryFileSystem::with_file("native_functions.yaml", SCHEMA);
        let summary = run_generate(&fs, &settings(), Mode::Write).unwrap();

        assert_eq!(summary.schema_entries, 4);
        assert_eq!(summary.excluded, 1);
        assert_eq!(summary.deferred, 1);
        assert_eq!(
            summary.bindings,
            vec![(Namespace::Torch, 1), (Namespace::Tensor, 1), (Namespace::Nn, 1)]
        );
        assert_eq!(summary.files.len(), 6);
        for path in &summary.files {
            assert!(fs.exists(path), "{} not written", path.display());
        }
        assert!(fs
            .read_to_string(Path::new("ext/torch/tensor_functions.cpp"))
            .unwrap()
            .contains("return self.abs();"));
    }

    #[test]
    fn test_check_mode_reports_missing_files_without_writing() {
        let fs = MemoryFileSystem::with_file("native_functions.yaml", SCHEMA);
        let err = run_generate(&fs, &settings(), Mode::Check).unwrap_err();

        match err {
            GenError::StaleOutput { paths } => assert_eq!(paths.len(), 6),
            other => panic!("expected stale output, got {other}"),
        }
        assert_eq!(fs.paths(), vec![PathBuf::from("native_functions.yaml")]);
    }

    #[test]
    fn test_check_mode_passes_after_generate() {
        let fs = MemoryFileSystem::with_file("native_functions.yaml", SCHEMA);
        run_generate(&fs, &settings(), Mode::Write).unwrap();
        assert!(run_generate(&fs, &settings(), Mode::Check).is_ok());
    }

    #[test]
    fn test_schema_error_aborts_before_output() {
        let fs = MemoryFileSystem::with_file("native_functions.yaml", "- func: broken\n");
        let err = run_generate(&fs, &settings(), Mode::Write).unwrap_err();
        assert_eq!(err.category(), "Schema");
        assert_eq!(fs.paths().len(), 1);
    }

    #[test]
    fn test_summary_display() {
        let summary = GenerationSummary {
            schema_entries: 10,
            excluded: 2,
            deferred: 3,
            withheld: 1,
            split: 1,
            bindings: vec![(Namespace::Torch, 4)],
            files: Vec::new(),
        };
        assert_eq!(
            summary.to_string(),
            "10 schema entries: 2 excluded, 3 deferred, 1 withheld, 1 split into overloads\n  torch   4 bindings\n"
        );
    }

    #[test]
    fn test_log_line_carries_split_and_namespace_counts() {
        let summary = GenerationSummary {
            schema_entries: 10,
            excluded: 2,
            deferred: 3,
            withheld: 1,
            split: 1,
            bindings: vec![(Namespace::Torch, 4), (Namespace::Tensor, 3), (Namespace::Nn, 0)],
            files: Vec::new(),
        };
        assert_eq!(
            summary.log_line(),
            "Generated 7 bindings from 10 schema entries (2 excluded, 3 deferred, 1 withheld, 1 split) [torch=4 tensor=3 nn=0]"
        );
    }
}
