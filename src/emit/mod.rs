//! Output file emission.
//!
//! Each namespace produces a declaration file and a definition file. Both are
//! rendered completely in memory before anything is written, and the content
//! depends only on the sorted entry list.

use std::path::{Path, PathBuf};

use crate::errors::GenError;
use crate::io::FileSystem;
use crate::namespace::Namespace;
use crate::render::RenderedBinding;
use crate::schema::SchemaEntry;

/// First lines of every generated file.
pub const GENERATED_HEADER: &str = "// generated by nativegen\n// do not edit by hand\n";

/// One file to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub path: PathBuf,
    pub contents: String,
}

/// Both files for one namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceOutput {
    pub namespace: Namespace,
    pub binding_count: usize,
    pub declaration: GeneratedFile,
    pub definition: GeneratedFile,
}

impl NamespaceOutput {
    pub fn files(&self) -> [&GeneratedFile; 2] {
        [&self.declaration, &self.definition]
    }
}

/// Entries ordered by binding name.
pub fn sorted_entries(entries: &[SchemaEntry]) -> Vec<&SchemaEntry> {
    let mut sorted: Vec<&SchemaEntry> = entries.iter().collect();
    sorted.sort_by_cached_key(|entry| entry.binding_name());
    sorted
}

pub fn render_declaration(namespace: Namespace) -> String {
    format!(
        "{header}\n#pragma once\n\nvoid add_{ns}_functions(Module m);\n",
        header = GENERATED_HEADER,
        ns = namespace.name()
    )
}

pub fn render_definition(namespace: Namespace, statements: &[String]) -> String {
    format!(
        "{header}\n\
         #include <torch/torch.h>\n\
         #include <rice/Module.hpp>\n\
         #include \"templates.hpp\"\n\
         \n\
         void add_{ns}_functions(Module m) {{\n  \
         m\n  \
         {functions};\n\
         }}\n",
        header = GENERATED_HEADER,
        ns = namespace.name(),
        functions = statements.join("\n  ")
    )
}

/// Render both files for `namespace` under `output_dir`.
pub fn emit_namespace(
    namespace: Namespace,
    entries: &[SchemaEntry],
    output_dir: &Path,
) -> NamespaceOutput {
    let statements: Vec<String> = sorted_entries(entries)
        .into_iter()
        .map(|entry| RenderedBinding::new(entry, namespace).registration(namespace))
        .collect();

    NamespaceOutput {
        namespace,
        binding_count: statements.len(),
        declaration: GeneratedFile {
            path: output_dir.join(namespace.declaration_file_name()),
            contents: render_declaration(namespace),
        },
        definition: GeneratedFile {
            path: output_dir.join(namespace.definition_file_name()),
            contents: render_definition(namespace, &statements),
        },
    }
}

/// Write both files, replacing whatever was there.
pub fn write_namespace<F: FileSystem + ?Sized>(
    fs: &F,
    output: &NamespaceOutput,
) -> Result<(), GenError> {
    for file in output.files() {
        fs.write(&file.path, &file.contents)?;
        log::debug!("Wrote {}", file.path.display());
    }
    Ok(())
}

/// Files whose current contents differ from `output`. Missing files count as different.
pub fn stale_files<F: FileSystem + ?Sized>(fs: &F, output: &NamespaceOutput) -> Vec<PathBuf> {
    output
        .files()
        .into_iter()
        .filter(|file| {
            fs.read_to_string(&file.path)
                .map(|current| current != file.contents)
                .unwrap_or(true)
        })
        .map(|file| file.path.clone())
        .collect()
}
