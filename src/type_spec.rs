use smol_str::SmolStr;

use crate::error::BufError;

// ─── TypeSpec ───────────────────────────────────────────────────────────────

/// Recursive description of a packed data shape.
///
/// `Bit(w)` is a leaf of exactly `w` bits (`w == 0` is legal). `Struct` and
/// `Tuple` own their members outright, so cloning a spec deep-copies the
/// whole tree and independently built trees never interfere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeSpec {
    Bit(usize),
    Struct(StructSpec),
    Tuple(TupleSpec),
}

impl TypeSpec {
    /// Total width in bits, summed over all leaves.
    pub fn bitwidth(&self) -> usize {
        match self {
            TypeSpec::Bit(width) => *width,
            TypeSpec::Struct(spec) => spec.bitwidth(),
            TypeSpec::Tuple(spec) => spec.bitwidth(),
        }
    }

    /// Whether this node has members of its own.
    pub fn has_members(&self) -> bool {
        !matches!(self, TypeSpec::Bit(_))
    }

    /// Read-only view of a struct member, `None` if absent or not a struct.
    pub fn view(&self, name: &str) -> Option<&TypeSpec> {
        match self {
            TypeSpec::Struct(spec) => spec.view(name),
            _ => None,
        }
    }

    /// Read-only view of a tuple member by index.
    pub fn view_index(&self, index: usize) -> Option<&TypeSpec> {
        match self {
            TypeSpec::Tuple(spec) => spec.get(index),
            _ => None,
        }
    }
}

// ─── StructSpec ─────────────────────────────────────────────────────────────

/// Ordered, uniquely-named members. Insertion order is preserved and is the
/// traversal order used by the layout engine; nothing downstream reorders
/// fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StructSpec {
    bitwidth: usize,
    members: Vec<(SmolStr, TypeSpec)>,
}

impl StructSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a member, consuming its tree. Fails on a reused name.
    pub fn add(&mut self, name: impl Into<SmolStr>, spec: TypeSpec) -> Result<(), BufError> {
        let name = name.into();
        if self.members.iter().any(|(n, _)| *n == name) {
            return Err(BufError::DuplicateMember(name));
        }
        self.bitwidth += spec.bitwidth();
        self.members.push((name, spec));
        Ok(())
    }

    /// Appends a `Bit(width)` member.
    pub fn add_bit(&mut self, name: impl Into<SmolStr>, width: usize) -> Result<(), BufError> {
        self.add(name, TypeSpec::Bit(width))
    }

    #[inline]
    pub fn bitwidth(&self) -> usize {
        self.bitwidth
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Member `(name, spec)` pairs in insertion order.
    pub fn members(&self) -> impl Iterator<Item = (&str, &TypeSpec)> {
        self.members.iter().map(|(name, spec)| (name.as_str(), spec))
    }

    /// Read-only view of one member.
    pub fn view(&self, name: &str) -> Option<&TypeSpec> {
        self.members
            .iter()
            .find(|(n, _)| n.as_str() == name)
            .map(|(_, spec)| spec)
    }
}

impl From<StructSpec> for TypeSpec {
    fn from(spec: StructSpec) -> Self {
        TypeSpec::Struct(spec)
    }
}

// ─── TupleSpec ──────────────────────────────────────────────────────────────

/// Ordered, 0-indexed members.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TupleSpec {
    bitwidth: usize,
    members: Vec<TypeSpec>,
}

impl TupleSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a member, consuming its tree.
    pub fn add(&mut self, spec: TypeSpec) {
        self.bitwidth += spec.bitwidth();
        self.members.push(spec);
    }

    #[inline]
    pub fn bitwidth(&self) -> usize {
        self.bitwidth
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&TypeSpec> {
        self.members.get(index)
    }

    /// Members in declaration order.
    pub fn members(&self) -> impl Iterator<Item = &TypeSpec> {
        self.members.iter()
    }
}

impl From<TupleSpec> for TypeSpec {
    fn from(spec: TupleSpec) -> Self {
        TypeSpec::Tuple(spec)
    }
}
