//! Declared function signatures.
//!
//! A schema `func` string looks like
//! `name.overload(Type a, Type b=default, *, Type c) -> Returns`. It is parsed
//! into a [`Signature`] once and printed back with `Display`; the two are
//! inverse for every well-formed declaration.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::arg_type::ArgType;

/// Separator between the argument list and the return declaration.
const RETURN_MARKER: &str = ") ->";

/// Failure to parse a `func` declaration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignatureError {
    #[error("missing '(' in `{0}`")]
    MissingArgumentList(String),

    #[error("missing ') ->' return marker in `{0}`")]
    MissingReturnMarker(String),

    #[error("empty function name in `{0}`")]
    EmptyName(String),

    #[error("argument `{arg}` has no name in `{func}`")]
    UnnamedArgument { arg: String, func: String },
}

/// One declared argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Argument {
    pub name: String,
    pub ty: ArgType,
    /// Default value as written in the schema, e.g. `None` or `1`.
    pub default: Option<String>,
    /// Declared after the `*` marker.
    pub keyword_only: bool,
}

impl Argument {
    pub fn new(ty: ArgType, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty,
            default: None,
            keyword_only: false,
        }
    }

    fn parse(raw: &str, keyword_only: bool, func: &str) -> Result<Self, SignatureError> {
        let (ty, name_part) = raw
            .rsplit_once(' ')
            .ok_or_else(|| SignatureError::UnnamedArgument {
                arg: raw.to_string(),
                func: func.to_string(),
            })?;

        let (name, default) = match name_part.split_once('=') {
            Some((name, default)) => (name, Some(default.to_string())),
            None => (name_part, None),
        };

        if name.is_empty() || ty.is_empty() {
            return Err(SignatureError::UnnamedArgument {
                arg: raw.to_string(),
                func: func.to_string(),
            });
        }

        Ok(Self {
            name: name.to_string(),
            ty: ArgType::parse(ty),
            default,
            keyword_only,
        })
    }
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.ty, self.name)?;
        if let Some(default) = &self.default {
            write!(f, "={}", default)?;
        }
        Ok(())
    }
}

/// Structured form of a `func` declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    /// Function name before any overload qualifier.
    pub base_name: String,
    /// Overload qualifier after the first `.`, if any.
    pub overload: Option<String>,
    pub arguments: Vec<Argument>,
    /// Return declaration, verbatim.
    pub returns: String,
}

impl Signature {
    /// `base.overload`, or just `base` for unqualified declarations.
    pub fn full_name(&self) -> String {
        match &self.overload {
            Some(overload) => format!("{}.{}", self.base_name, overload),
            None => self.base_name.clone(),
        }
    }

    pub fn is_qualified(&self) -> bool {
        self.overload.is_some()
    }

    /// Number of returned values written into caller-supplied storage.
    pub fn output_arity(&self) -> usize {
        self.returns.matches('!').count()
    }

    pub fn return_arity(&self) -> usize {
        self.returns.split(", ").count()
    }
}

impl FromStr for Signature {
    type Err = SignatureError;

    fn from_str(func: &str) -> Result<Self, Self::Err> {
        let (name, rest) = func
            .split_once('(')
            .ok_or_else(|| SignatureError::MissingArgumentList(func.to_string()))?;
        if name.is_empty() {
            return Err(SignatureError::EmptyName(func.to_string()));
        }

        let (args_str, returns) = rest
            .split_once(RETURN_MARKER)
            .ok_or_else(|| SignatureError::MissingReturnMarker(func.to_string()))?;

        let (base_name, overload) = match name.split_once('.') {
            Some((base, overload)) => (base.to_string(), Some(overload.to_string())),
            None => (name.to_string(), None),
        };

        let mut arguments = Vec::new();
        let mut keyword_only = false;
        for raw in args_str.split(", ").filter(|a| !a.is_empty()) {
            if raw == "*" {
                keyword_only = true;
                continue;
            }
            arguments.push(Argument::parse(raw, keyword_only, func)?);
        }

        Ok(Self {
            base_name,
            overload,
            arguments,
            returns: returns.trim().to_string(),
        })
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.full_name())?;
        let mut in_keywords = false;
        for (i, arg) in self.arguments.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            if arg.keyword_only && !in_keywords {
                f.write_str("*, ")?;
                in_keywords = true;
            }
            write!(f, "{}", arg)?;
        }
        write!(f, ") -> {}", self.returns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sig(func: &str) -> Signature {
        func.parse().unwrap()
    }

    #[test]
    fn test_parse_qualified_signature() {
        let s = sig("add.Tensor(Tensor self, Tensor other, *, Scalar alpha=1) -> Tensor");
        assert_eq!(s.base_name, "add");
        assert_eq!(s.overload.as_deref(), Some("Tensor"));
        assert_eq!(s.full_name(), "add.Tensor");
        assert_eq!(s.arguments.len(), 3);
        assert_eq!(s.arguments[2].name, "alpha");
        assert_eq!(s.arguments[2].default.as_deref(), Some("1"));
        assert!(s.arguments[2].keyword_only);
        assert!(!s.arguments[1].keyword_only);
        assert_eq!(s.returns, "Tensor");
    }

    #[test]
    fn test_output_and_return_arity() {
        let s = sig(
            "max.dim_max(Tensor self, int dim, bool keepdim=False, *, Tensor(a!) max, Tensor(b!) max_values) -> (Tensor(a!) values, Tensor(b!) indices)",
        );
        assert_eq!(s.output_arity(), 2);
        assert_eq!(s.return_arity(), 2);

        let s = sig("relu(Tensor self) -> Tensor");
        assert_eq!(s.output_arity(), 0);
        assert_eq!(s.return_arity(), 1);
    }

    #[test]
    fn test_empty_argument_list() {
        let s = sig("seed() -> int");
        assert!(s.arguments.is_empty());
        assert_eq!(s.to_string(), "seed() -> int");
    }

    #[test]
    fn test_display_round_trips() {
        for func in [
            "add.Tensor(Tensor self, Tensor other, *, Scalar alpha=1) -> Tensor",
            "empty(int[] size, *, Layout? layout=None, bool? pin_memory=None) -> Tensor",
            "add_.Tensor(Tensor(a!) self, Tensor other, *, Scalar alpha=1) -> Tensor(a!)",
            "argmax(Tensor self, int? dim=None, bool keepdim=False) -> Tensor",
            "rand(*, Generator? generator) -> Tensor",
        ] {
            assert_eq!(sig(func).to_string(), func);
        }
    }

    #[test]
    fn test_malformed_signatures() {
        assert_eq!(
            "relu".parse::<Signature>(),
            Err(SignatureError::MissingArgumentList("relu".into()))
        );
        assert!(matches!(
            "relu(Tensor self)".parse::<Signature>(),
            Err(SignatureError::MissingReturnMarker(_))
        ));
        assert!(matches!(
            "(Tensor self) -> Tensor".parse::<Signature>(),
            Err(SignatureError::EmptyName(_))
        ));
        assert!(matches!(
            "relu(Tensor) -> Tensor".parse::<Signature>(),
            Err(SignatureError::UnnamedArgument { .. })
        ));
    }
}
