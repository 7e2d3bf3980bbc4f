//! End-to-end generation against a real directory.

use indoc::indoc;
use nativegen::commands::{run_generate, Mode};
use nativegen::io::RealFileSystem;
use nativegen::{GenError, Namespace, Settings};
use pretty_assertions::assert_eq;
use std::fs;
use tempfile::TempDir;

const SCHEMA: &str = indoc! {"
    - func: add.Tensor(Tensor self, Tensor other, *, Scalar alpha=1) -> Tensor
      variants: function, method
    - func: add.out(Tensor self, Tensor other, *, Scalar alpha=1, Tensor(a!) out) -> Tensor(a!)
    - func: _internal(Tensor self) -> Tensor
    - func: relu_backward(Tensor grad_output, Tensor self) -> Tensor
    - func: sum.dim_IntList(Tensor self, int[1] dim, bool keepdim=False, *, ScalarType? dtype=None) -> Tensor
      variants: function, method
    - func: argmax(Tensor self, int? dim=None, bool keepdim=False) -> Tensor
      variants: function, method
    - func: max.dim(Tensor self, int dim, bool keepdim=False) -> (Tensor values, Tensor indices)
      variants: function, method
    - func: mse_loss(Tensor self, Tensor target, int reduction=Mean) -> Tensor
      python_module: nn
    - func: bernoulli(Tensor self, *, Generator? generator=None) -> Tensor
      variants: function, method
    - func: empty(int[] size, *, Layout? layout=None) -> Tensor
    - func: align_to(Tensor(a) self, Dimname[] names) -> Tensor(a)
      variants: method
"};

struct Workspace {
    dir: TempDir,
    settings: Settings,
}

impl Workspace {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let schema_path = dir.path().join("native_functions.yaml");
        fs::write(&schema_path, SCHEMA).unwrap();
        let settings = Settings {
            schema_path,
            output_dir: dir.path().join("ext").join("torch"),
            skip_bindings: Vec::new(),
        };
        Self { dir, settings }
    }

    fn read(&self, file: &str) -> String {
        fs::read_to_string(self.settings.output_dir.join(file)).unwrap()
    }

    fn generate(&self, mode: Mode) -> Result<nativegen::GenerationSummary, GenError> {
        run_generate(&RealFileSystem::new(), &self.settings, mode)
    }
}

#[test]
fn test_free_function_definition_file() {
    let ws = Workspace::new();
    ws.generate(Mode::Write).unwrap();

    assert_eq!(
        ws.read("torch_functions.cpp"),
        indoc! {r#"
            // generated by nativegen
            // do not edit by hand

            #include <torch/torch.h>
            #include <rice/Module.hpp>
            #include "templates.hpp"

            void add_torch_functions(Module m) {
              m
              .define_singleton_method(
                "_add_out",
                *[](const Tensor &self, const Tensor &other, Scalar alpha, Tensor &out) {
                  return torch::add_out(out, self, other, alpha);
                })
              .define_singleton_method(
                "_add_tensor",
                *[](const Tensor &self, const Tensor &other, Scalar alpha) {
                  return torch::add(self, other, alpha);
                })
              .define_singleton_method(
                "_argmax",
                *[](const Tensor &self) {
                  return torch::argmax(self);
                })
              .define_singleton_method(
                "_argmax_dim",
                *[](const Tensor &self, int64_t dim, bool keepdim) {
                  return torch::argmax(self, dim, keepdim);
                })
              .define_singleton_method(
                "_bernoulli",
                *[](const Tensor &self) {
                  return torch::bernoulli(self);
                })
              .define_singleton_method(
                "_max_dim",
                *[](const Tensor &self, int64_t dim, bool keepdim) {
                  return tensor_tuple(torch::max(self, dim, keepdim));
                })
              .define_singleton_method(
                "_sum_dim_intlist",
                *[](const Tensor &self, IntArrayRef dim, bool keepdim, OptionalScalarType dtype) {
                  return torch::sum(self, dim, keepdim, dtype);
                });
            }
        "#}
    );
}

#[test]
fn test_operator_namespace_files() {
    let ws = Workspace::new();
    ws.generate(Mode::Write).unwrap();

    assert_eq!(
        ws.read("nn_functions.hpp"),
        indoc! {"
            // generated by nativegen
            // do not edit by hand

            #pragma once

            void add_nn_functions(Module m);
        "}
    );
    assert_eq!(
        ws.read("nn_functions.cpp"),
        indoc! {r#"
            // generated by nativegen
            // do not edit by hand

            #include <torch/torch.h>
            #include <rice/Module.hpp>
            #include "templates.hpp"

            void add_nn_functions(Module m) {
              m
              .define_singleton_method(
                "_mse_loss",
                *[](const Tensor &self, const Tensor &target, MyReduction reduction) {
                  return torch::mse_loss(self, target, reduction);
                });
            }
        "#}
    );
}

#[test]
fn test_method_namespace_uses_receiver() {
    let ws = Workspace::new();
    ws.generate(Mode::Write).unwrap();
    let cpp = ws.read("tensor_functions.cpp");

    assert!(cpp.contains(".define_method(\n    \"_add_tensor\""));
    assert!(cpp.contains("return self.add(other, alpha);"));
    assert!(cpp.contains("return self.argmax();"));
    assert!(cpp.contains("return self.argmax(dim, keepdim);"));
    assert!(cpp.contains("return tensor_tuple(self.max(dim, keepdim));"));
    assert!(!cpp.contains("_add_out"));
    assert!(!cpp.contains("define_singleton_method"));
}

#[test]
fn test_excluded_and_deferred_entries_never_emitted() {
    let ws = Workspace::new();
    let summary = ws.generate(Mode::Write).unwrap();
    assert_eq!(summary.excluded, 3);
    assert_eq!(summary.deferred, 1);
    assert_eq!(summary.split, 1);

    for ns in Namespace::ALL {
        let cpp = ws.read(&ns.definition_file_name());
        for name in ["\"_internal\"", "\"_relu_backward\"", "\"_align_to\"", "\"_empty\""] {
            assert!(!cpp.contains(name), "{name} leaked into {ns}");
        }
    }
}

#[test]
fn test_every_binding_appears_once_per_namespace() {
    let ws = Workspace::new();
    let summary = ws.generate(Mode::Write).unwrap();
    assert_eq!(
        summary.bindings,
        vec![(Namespace::Torch, 7), (Namespace::Tensor, 6), (Namespace::Nn, 1)]
    );

    let cpp = ws.read("tensor_functions.cpp");
    for name in [
        "_add_tensor",
        "_argmax",
        "_argmax_dim",
        "_bernoulli",
        "_max_dim",
        "_sum_dim_intlist",
    ] {
        assert_eq!(cpp.matches(&format!("\"{name}\"")).count(), 1, "{name}");
    }
}

#[test]
fn test_two_runs_are_byte_identical() {
    let ws = Workspace::new();
    ws.generate(Mode::Write).unwrap();
    let first: Vec<String> = Namespace::ALL
        .iter()
        .flat_map(|ns| [ws.read(&ns.declaration_file_name()), ws.read(&ns.definition_file_name())])
        .collect();

    ws.generate(Mode::Write).unwrap();
    let second: Vec<String> = Namespace::ALL
        .iter()
        .flat_map(|ns| [ws.read(&ns.declaration_file_name()), ws.read(&ns.definition_file_name())])
        .collect();

    assert_eq!(first, second);
}

#[test]
fn test_regeneration_overwrites_stale_files() {
    let ws = Workspace::new();
    ws.generate(Mode::Write).unwrap();
    let path = ws.settings.output_dir.join("torch_functions.cpp");
    fs::write(&path, "// hand edit").unwrap();

    assert!(matches!(
        ws.generate(Mode::Check),
        Err(GenError::StaleOutput { ref paths }) if paths == &vec![path.clone()]
    ));

    ws.generate(Mode::Write).unwrap();
    assert!(ws.generate(Mode::Check).is_ok());
    assert!(ws.dir.path().join("ext").join("torch").join("nn_functions.hpp").exists());
}

#[test]
fn test_missing_schema_aborts_run() {
    let ws = Workspace::new();
    fs::remove_file(&ws.settings.schema_path).unwrap();

    let err = ws.generate(Mode::Write).unwrap_err();
    assert_eq!(err.category(), "Schema");
    assert!(!ws.settings.output_dir.exists());
}
