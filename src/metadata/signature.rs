//! Catalog keys.

use std::any::{type_name, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};

/// The kind of operation a strategy performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    /// Ordering a sequence.
    Sort,
    /// Locating a value in a sequence.
    Search,
    /// Graph traversal or path finding.
    Graph,
    /// Dynamic programming problems.
    DynamicProgramming,
    /// String matching and processing.
    StringProcessing,
    /// Any other operation, identified by name.
    Custom(&'static str),
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperationKind::Sort => f.write_str("sort"),
            OperationKind::Search => f.write_str("search"),
            OperationKind::Graph => f.write_str("graph"),
            OperationKind::DynamicProgramming => f.write_str("dp"),
            OperationKind::StringProcessing => f.write_str("string"),
            OperationKind::Custom(name) => f.write_str(name),
        }
    }
}

/// A Rust type identity paired with its readable name.
///
/// Equality and hashing use only the [`TypeId`]; the name is for messages.
#[derive(Debug, Clone, Copy)]
pub struct TypeTag {
    id: TypeId,
    name: &'static str,
}

impl TypeTag {
    /// Tag for `T`.
    pub fn of<T: 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
        }
    }

    /// The compiler-provided type name.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for TypeTag {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeTag {}

impl Hash for TypeTag {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// `(operation kind, input type, output type)`: the key strategies are
/// grouped under.
///
/// Signatures are derived from the strategy's generic parameters, so a
/// strategy can never be filed under a signature whose I/O types it does
/// not implement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OperationSignature {
    kind: OperationKind,
    input: TypeTag,
    output: TypeTag,
}

impl OperationSignature {
    /// Signature for an operation from `I` to `O`.
    pub fn of<I: 'static, O: 'static>(kind: OperationKind) -> Self {
        Self {
            kind,
            input: TypeTag::of::<I>(),
            output: TypeTag::of::<O>(),
        }
    }

    /// The operation kind.
    pub fn kind(&self) -> OperationKind {
        self.kind
    }

    /// The input type tag.
    pub fn input(&self) -> TypeTag {
        self.input
    }

    /// The output type tag.
    pub fn output(&self) -> TypeTag {
        self.output
    }
}

impl fmt::Display for OperationSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}<{} -> {}>",
            self.kind,
            self.input.name(),
            self.output.name()
        )
    }
}
