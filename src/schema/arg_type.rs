//! Decoded argument types.
//!
//! Schema type strings are decoded once, when a signature is parsed, so the
//! classifier and the renderer match on variants instead of probing strings.

use std::fmt;

/// Substrings naming argument types the renderer cannot express yet.
pub const UNSUPPORTED_TYPE_MARKERS: &[&str] = &[
    "bool[3]",
    "MemoryFormat",
    "Layout",
    "Storage",
    "ConstQuantizerPtr",
];

/// Substring marking a name-based dimension reference.
pub const DIMNAME_MARKER: &str = "Dimname";

/// Type of one schema argument.
///
/// Variants that carry a `String` keep the schema spelling verbatim so every
/// type prints back exactly as it was declared.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ArgType {
    Tensor,
    OptionalTensor,
    TensorList,
    /// Aliased tensor annotation such as `Tensor(a)` or `Tensor(a!)`.
    TensorAlias(String),
    Int,
    OptionalInt,
    /// Integer array of any arity, `int[]` or `int[2]`.
    IntArray(String),
    Float,
    OptionalScalarType,
    OptionalGenerator,
    /// Any type mentioning a named dimension.
    DimnameRef(String),
    /// Complex types listed in [`UNSUPPORTED_TYPE_MARKERS`].
    Unsupported(String),
    /// Nullable types outside the supported set.
    OptionalOther(String),
    /// Everything else, rendered as written.
    Other(String),
}

impl ArgType {
    /// Decode a schema type string.
    pub fn parse(raw: &str) -> Self {
        if raw.contains(DIMNAME_MARKER) {
            return Self::DimnameRef(raw.to_string());
        }
        if UNSUPPORTED_TYPE_MARKERS.iter().any(|m| raw.contains(m)) {
            return Self::Unsupported(raw.to_string());
        }

        match raw {
            "Tensor" => Self::Tensor,
            "Tensor?" => Self::OptionalTensor,
            "Tensor[]" => Self::TensorList,
            "int" => Self::Int,
            "int?" => Self::OptionalInt,
            "float" => Self::Float,
            "ScalarType?" => Self::OptionalScalarType,
            "Generator?" => Self::OptionalGenerator,
            _ if raw.contains('?') => Self::OptionalOther(raw.to_string()),
            _ if raw.starts_with("int[") => Self::IntArray(raw.to_string()),
            _ if has_alias_annotation(raw) => Self::TensorAlias(raw.to_string()),
            _ => Self::Other(raw.to_string()),
        }
    }

    /// Whether the type carries the optionality marker.
    pub fn is_nullable(&self) -> bool {
        matches!(
            self,
            Self::OptionalTensor
                | Self::OptionalInt
                | Self::OptionalScalarType
                | Self::OptionalGenerator
                | Self::OptionalOther(_)
        )
    }

    /// Whether an entry with an argument of this type must wait for a later pass.
    pub fn needs_deferral(&self) -> bool {
        matches!(self, Self::OptionalOther(_) | Self::Unsupported(_))
    }

    pub fn is_generator(&self) -> bool {
        matches!(self, Self::OptionalGenerator)
    }

    /// Mutable alias such as `Tensor(a!)`, the shape of an output slot.
    pub fn is_output_slot(&self) -> bool {
        matches!(self, Self::TensorAlias(raw) if raw.contains('!'))
    }
}

impl From<&str> for ArgType {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

impl fmt::Display for ArgType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let spelled = match self {
            Self::Tensor => "Tensor",
            Self::OptionalTensor => "Tensor?",
            Self::TensorList => "Tensor[]",
            Self::Int => "int",
            Self::OptionalInt => "int?",
            Self::Float => "float",
            Self::OptionalScalarType => "ScalarType?",
            Self::OptionalGenerator => "Generator?",
            Self::TensorAlias(raw)
            | Self::IntArray(raw)
            | Self::DimnameRef(raw)
            | Self::Unsupported(raw)
            | Self::OptionalOther(raw)
            | Self::Other(raw) => raw,
        };
        f.write_str(spelled)
    }
}

/// Matches `Tensor(` + one non-space character + optional `!` + `)` anywhere in `raw`.
fn has_alias_annotation(raw: &str) -> bool {
    raw.match_indices("Tensor(").any(|(idx, open)| {
        let mut rest = raw[idx + open.len()..].chars();
        match rest.next() {
            Some(c) if !c.is_whitespace() => {}
            _ => return false,
        }
        match rest.next() {
            Some(')') => true,
            Some('!') => rest.next() == Some(')'),
            _ => false,
        }
    })
}
