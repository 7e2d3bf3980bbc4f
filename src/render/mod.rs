//! Signature rendering.
//!
//! Maps schema argument types to C++ parameter types and assembles the call
//! expression each binding dispatches to. Random-state (`Generator?`)
//! arguments are never exposed and never passed.

use crate::namespace::Namespace;
use crate::schema::{ArgType, Argument, SchemaEntry};

/// Argument name that gets the dedicated reduction-mode type.
pub const REDUCTION_ARG: &str = "reduction";

/// Helper that turns a two-element native tuple into a host tuple.
pub const TUPLE_HELPER: &str = "tensor_tuple";

/// C++ parameter type for a schema type.
pub fn map_type(ty: &ArgType) -> String {
    match ty {
        ArgType::Tensor => "const Tensor &".to_string(),
        ArgType::OptionalTensor => "OptionalTensor".to_string(),
        ArgType::OptionalScalarType => "OptionalScalarType".to_string(),
        ArgType::TensorList => "TensorList".to_string(),
        ArgType::Int => "int64_t".to_string(),
        ArgType::Float => "double".to_string(),
        ArgType::IntArray(_) => "IntArrayRef".to_string(),
        ArgType::TensorAlias(_) => "Tensor &".to_string(),
        ArgType::OptionalInt
        | ArgType::OptionalGenerator
        | ArgType::DimnameRef(_)
        | ArgType::Unsupported(_)
        | ArgType::OptionalOther(_)
        | ArgType::Other(_) => ty.to_string(),
    }
}

/// Parameter type for one argument, including the reduction override.
pub fn parameter_type(arg: &Argument) -> String {
    if arg.name == REDUCTION_ARG && arg.ty == ArgType::Int {
        "MyReduction".to_string()
    } else {
        map_type(&arg.ty)
    }
}

/// `"{type} {name}"` with a trailing reference glued to the name (`const Tensor &self`).
pub fn render_parameter(arg: &Argument) -> String {
    format!("{} {}", parameter_type(arg), arg.name).replacen("& ", "&", 1)
}

/// Arguments that appear in the generated signature.
pub fn exposed_arguments(entry: &SchemaEntry) -> impl Iterator<Item = &Argument> {
    entry.arguments().iter().filter(|a| !a.ty.is_generator())
}

/// Names passed to the dispatched function, in call order.
///
/// Output slots are declared last but passed first; only trailing output
/// slots move. The method namespace drops `self`, which is the receiver.
pub fn call_arguments(entry: &SchemaEntry, namespace: Namespace) -> Vec<&str> {
    let exposed: Vec<&Argument> = exposed_arguments(entry).collect();
    let mut names: Vec<&str> = exposed.iter().map(|a| a.name.as_str()).collect();

    if entry.is_out() {
        let trailing_slots = exposed
            .iter()
            .rev()
            .take_while(|a| a.ty.is_output_slot())
            .count();
        names.rotate_right(entry.output_arity().min(trailing_slots));
    }
    if namespace.has_receiver() {
        names.retain(|name| *name != "self");
    }

    names
}

/// Call expression returned from the binding body.
pub fn call_expression(entry: &SchemaEntry, namespace: Namespace) -> String {
    let call = format!(
        "{}{}({})",
        namespace.call_prefix(),
        entry.internal_name(),
        call_arguments(entry, namespace).join(", ")
    );

    if entry.return_arity() == 2 {
        format!("{}({})", TUPLE_HELPER, call)
    } else {
        call
    }
}

/// Everything needed to emit one binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedBinding {
    pub binding_name: String,
    pub parameters: Vec<String>,
    pub body: String,
}

impl RenderedBinding {
    pub fn new(entry: &SchemaEntry, namespace: Namespace) -> Self {
        Self {
            binding_name: entry.binding_name(),
            parameters: exposed_arguments(entry).map(render_parameter).collect(),
            body: call_expression(entry, namespace),
        }
    }

    /// Registration statement for this binding.
    pub fn registration(&self, namespace: Namespace) -> String {
        format!(
            ".{}(\n    \"{}\",\n    *[]({}) {{\n      return {};\n    }})",
            namespace.registration_method(),
            self.binding_name,
            self.parameters.join(", "),
            self.body
        )
    }
}
