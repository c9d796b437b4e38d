use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use crate::error::BufError;
use crate::type_spec::TypeSpec;

// ─── Layout ─────────────────────────────────────────────────────────────────

/// Rule mapping successive field widths to byte/bit offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Layout {
    /// No inter-field padding; the bit cursor advances by exactly each
    /// field's width.
    Compact,
    /// Every leaf starts on a fresh byte, trading up to 7 wasted bits per
    /// field for byte-addressable fields.
    ByteAligned,
}

// ─── FieldEntry ─────────────────────────────────────────────────────────────

/// One flattened leaf: '/'-joined path plus its resolved position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldEntry {
    pub path: SmolStr,
    pub byte_offset: usize,
    /// Bit offset within the first byte, always in `0..8`.
    pub bit_offset: u8,
    pub bitwidth: usize,
}

// ─── Schema ─────────────────────────────────────────────────────────────────

/// Flattened, immutable field table for one `(TypeSpec, Layout)` pair.
/// Built once, then reused to size and address any number of buffers of the
/// same shape.
#[derive(Debug, Clone)]
pub struct Schema {
    layout: Layout,
    bytewidth: usize,
    fields: Vec<FieldEntry>,
    index: FxHashMap<SmolStr, usize>,
}

impl Schema {
    /// Flattens `spec` depth-first, pre-order, in declaration order. The
    /// root is visited with the empty name and every composite appends
    /// `name + "/"`, so leaves of a struct root read `/s0/a`, `/c`; tuple
    /// members use decimal indices. A bare `Bit` root yields one entry with
    /// the empty path.
    pub fn new(spec: &TypeSpec, layout: Layout) -> Self {
        let mut fields = Vec::new();
        let mut prefix = String::new();
        let mut cursor = 0usize;
        flatten(spec, "", layout, &mut prefix, &mut cursor, &mut fields);

        let index = fields
            .iter()
            .enumerate()
            .map(|(i, entry)| (entry.path.clone(), i))
            .collect();

        Schema {
            layout,
            bytewidth: cursor.div_ceil(8),
            fields,
            index,
        }
    }

    #[inline]
    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Bytes needed to hold every field under this layout.
    #[inline]
    pub fn bytewidth(&self) -> usize {
        self.bytewidth
    }

    /// Number of flattened leaves.
    #[inline]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Entries in layout order.
    pub fn fields(&self) -> impl Iterator<Item = &FieldEntry> {
        self.fields.iter()
    }

    /// Looks up one entry by path.
    pub fn field(&self, path: &str) -> Result<&FieldEntry, BufError> {
        self.index
            .get(path)
            .map(|&i| &self.fields[i])
            .ok_or_else(|| BufError::FieldNotFound(path.into()))
    }
}

/// Depth-first visit. `cursor` is the running position in bits; under
/// `ByteAligned` it rounds up to the next byte boundary after every leaf,
/// so leaves always start with `bit_offset == 0`.
fn flatten(
    spec: &TypeSpec,
    name: &str,
    layout: Layout,
    prefix: &mut String,
    cursor: &mut usize,
    fields: &mut Vec<FieldEntry>,
) {
    match spec {
        TypeSpec::Bit(width) => {
            fields.push(FieldEntry {
                path: SmolStr::from(format!("{prefix}{name}")),
                byte_offset: *cursor / 8,
                bit_offset: (*cursor % 8) as u8,
                bitwidth: *width,
            });
            *cursor += *width;
            if layout == Layout::ByteAligned {
                *cursor = cursor.next_multiple_of(8);
            }
        }
        TypeSpec::Struct(spec) => {
            let saved = prefix.len();
            prefix.push_str(name);
            prefix.push('/');
            for (member, child) in spec.members() {
                flatten(child, member, layout, prefix, cursor, fields);
            }
            prefix.truncate(saved);
        }
        TypeSpec::Tuple(spec) => {
            let saved = prefix.len();
            prefix.push_str(name);
            prefix.push('/');
            for (index, child) in spec.members().enumerate() {
                flatten(child, &index.to_string(), layout, prefix, cursor, fields);
            }
            prefix.truncate(saved);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::type_spec::{StructSpec, TupleSpec};

    /// struct { struct { bit<1> a; bit<2> b; } s0; bit<3> c; bit<4> d; }
    fn nested_spec() -> TypeSpec {
        let mut s0 = StructSpec::new();
        s0.add_bit("a", 1).unwrap();
        s0.add_bit("b", 2).unwrap();

        let mut root = StructSpec::new();
        root.add("s0", s0.into()).unwrap();
        root.add_bit("c", 3).unwrap();
        root.add_bit("d", 4).unwrap();
        root.into()
    }

    fn entry(schema: &Schema, path: &str) -> (usize, u8, usize) {
        let f = schema.field(path).unwrap();
        (f.byte_offset, f.bit_offset, f.bitwidth)
    }

    #[test]
    fn test_compact_layout_packs_without_padding() {
        let schema = Schema::new(&nested_spec(), Layout::Compact);

        assert_eq!(schema.layout(), Layout::Compact);
        assert_eq!(schema.bytewidth(), 2);
        assert_eq!(schema.len(), 4);

        assert_eq!(entry(&schema, "/s0/a"), (0, 0, 1));
        assert_eq!(entry(&schema, "/s0/b"), (0, 1, 2));
        assert_eq!(entry(&schema, "/c"), (0, 3, 3));
        assert_eq!(entry(&schema, "/d"), (0, 6, 4));
    }

    #[test]
    fn test_byte_aligned_layout_starts_fresh_bytes() {
        let schema = Schema::new(&nested_spec(), Layout::ByteAligned);

        assert_eq!(schema.bytewidth(), 4);
        assert_eq!(entry(&schema, "/s0/a"), (0, 0, 1));
        assert_eq!(entry(&schema, "/s0/b"), (1, 0, 2));
        assert_eq!(entry(&schema, "/c"), (2, 0, 3));
        assert_eq!(entry(&schema, "/d"), (3, 0, 4));
    }

    #[test]
    fn test_field_order_matches_declaration_order() {
        let schema = Schema::new(&nested_spec(), Layout::Compact);
        let paths: Vec<&str> = schema.fields().map(|f| f.path.as_str()).collect();
        assert_eq!(paths, ["/s0/a", "/s0/b", "/c", "/d"]);
    }

    #[test]
    fn test_bytewidth_rounds_up_bit_total() {
        let mut root = StructSpec::new();
        root.add_bit("x", 13).unwrap();
        let spec = TypeSpec::from(root);

        assert_eq!(Schema::new(&spec, Layout::Compact).bytewidth(), 2);
        assert_eq!(Schema::new(&spec, Layout::ByteAligned).bytewidth(), 2);
    }

    #[test]
    fn test_entry_widths_match_declared_leaf_widths() {
        let spec = nested_spec();
        for layout in [Layout::Compact, Layout::ByteAligned] {
            let schema = Schema::new(&spec, layout);
            assert_eq!(schema.field("/s0/a").unwrap().bitwidth, 1);
            assert_eq!(schema.field("/s0/b").unwrap().bitwidth, 2);
            assert_eq!(schema.field("/c").unwrap().bitwidth, 3);
            assert_eq!(schema.field("/d").unwrap().bitwidth, 4);
        }
    }

    #[test]
    fn test_bare_bit_root_has_empty_path() {
        let schema = Schema::new(&TypeSpec::Bit(12), Layout::Compact);
        assert_eq!(schema.len(), 1);
        assert_eq!(schema.bytewidth(), 2);
        assert_eq!(entry(&schema, ""), (0, 0, 12));
    }

    #[test]
    fn test_tuple_members_use_decimal_indices() {
        let mut pair = TupleSpec::new();
        pair.add(TypeSpec::Bit(3));
        pair.add(TypeSpec::Bit(5));

        let mut root = StructSpec::new();
        root.add_bit("tag", 4).unwrap();
        root.add("t", pair.into()).unwrap();

        let schema = Schema::new(&root.into(), Layout::Compact);
        assert_eq!(schema.bytewidth(), 2);
        assert_eq!(entry(&schema, "/tag"), (0, 0, 4));
        assert_eq!(entry(&schema, "/t/0"), (0, 4, 3));
        assert_eq!(entry(&schema, "/t/1"), (0, 7, 5));
    }

    #[test]
    fn test_zero_width_leaf_consumes_nothing() {
        let mut root = StructSpec::new();
        root.add_bit("empty", 0).unwrap();
        root.add_bit("x", 3).unwrap();

        let schema = Schema::new(&root.into(), Layout::Compact);
        assert_eq!(entry(&schema, "/empty"), (0, 0, 0));
        assert_eq!(entry(&schema, "/x"), (0, 0, 3));
        assert_eq!(schema.bytewidth(), 1);
    }

    #[test]
    fn test_empty_struct_yields_empty_schema() {
        let schema = Schema::new(&StructSpec::new().into(), Layout::Compact);
        assert!(schema.is_empty());
        assert_eq!(schema.bytewidth(), 0);
    }

    #[test]
    fn test_unknown_path_fails_lookup() {
        let schema = Schema::new(&nested_spec(), Layout::Compact);
        assert_eq!(
            schema.field("/nope").unwrap_err(),
            BufError::FieldNotFound("/nope".into())
        );
    }
}
