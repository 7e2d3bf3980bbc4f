use super::signature::{Argument, Signature};

/// Module tag that routes an entry to the operator namespace.
pub const NN_MODULE: &str = "nn";

/// Calling styles a declaration asks to be exposed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Variants {
    pub function: bool,
    pub method: bool,
}

impl Variants {
    /// Parse a comma-separated variant list; absent lists mean `function`.
    pub fn parse(raw: Option<&str>) -> Self {
        let raw = raw.unwrap_or("function");
        raw.split(',').map(str::trim).fold(Self::default(), |acc, v| match v {
            "function" => Self { function: true, ..acc },
            "method" => Self { method: true, ..acc },
            _ => acc,
        })
    }
}

/// One schema declaration plus its routing metadata.
///
/// Entries are values: classification stages build new entries rather than
/// editing the ones decoded from the schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaEntry {
    pub signature: Signature,
    pub variants: Variants,
    pub python_module: Option<String>,
}

impl SchemaEntry {
    pub fn new(signature: Signature, variants: Variants, python_module: Option<String>) -> Self {
        Self {
            signature,
            variants,
            python_module,
        }
    }

    /// Same metadata, different signature.
    pub fn with_signature(&self, signature: Signature) -> Self {
        Self {
            signature,
            variants: self.variants,
            python_module: self.python_module.clone(),
        }
    }

    pub fn declared_signature(&self) -> String {
        self.signature.to_string()
    }

    /// Caller-visible name before overload qualification, e.g. `add` for `add.Tensor`.
    pub fn base_name(&self) -> &str {
        &self.signature.base_name
    }

    /// Identifier registered in generated code, e.g. `_add_tensor` for `add.Tensor`.
    pub fn binding_name(&self) -> String {
        format!("_{}", self.signature.full_name().to_lowercase().replacen('.', "_", 1))
    }

    /// Writes into caller-supplied output slots. In-place variants (trailing
    /// `_`) mutate their receiver instead and don't count.
    pub fn is_out(&self) -> bool {
        self.output_arity() > 0 && !self.base_name().ends_with('_')
    }

    /// Identifier invoked inside the generated body.
    pub fn internal_name(&self) -> String {
        if self.is_out() {
            format!("{}_out", self.base_name())
        } else {
            self.base_name().to_string()
        }
    }

    pub fn arguments(&self) -> &[Argument] {
        &self.signature.arguments
    }

    pub fn output_arity(&self) -> usize {
        self.signature.output_arity()
    }

    pub fn return_arity(&self) -> usize {
        self.signature.return_arity()
    }

    pub fn is_nn(&self) -> bool {
        self.python_module.as_deref() == Some(NN_MODULE)
    }
}
