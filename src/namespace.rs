use std::fmt;

/// Generated-code surfaces a schema entry can be exposed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Namespace {
    /// Free functions (`torch.add(a, b)`)
    Torch,
    /// Instance methods (`a.add(b)`)
    Tensor,
    /// Neural-network operators
    Nn,
}

impl Namespace {
    /// Generation order.
    pub const ALL: [Namespace; 3] = [Namespace::Torch, Namespace::Tensor, Namespace::Nn];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Torch => "torch",
            Self::Tensor => "tensor",
            Self::Nn => "nn",
        }
    }

    /// Registration call used in the definition file.
    pub const fn registration_method(self) -> &'static str {
        match self {
            Self::Tensor => "define_method",
            Self::Torch | Self::Nn => "define_singleton_method",
        }
    }

    /// Whether bindings receive the tensor as an implicit receiver.
    pub const fn has_receiver(self) -> bool {
        matches!(self, Self::Tensor)
    }

    /// Prefix placed before the dispatched function name.
    pub const fn call_prefix(self) -> &'static str {
        if self.has_receiver() {
            "self."
        } else {
            "torch::"
        }
    }

    pub fn declaration_file_name(self) -> String {
        format!("{}_functions.hpp", self.name())
    }

    pub fn definition_file_name(self) -> String {
        format!("{}_functions.cpp", self.name())
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
