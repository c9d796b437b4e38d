//! Bit-level data layout for P4-style `bit<W>` payloads.
//!
//! Fields of arbitrary bit width pack into byte buffers with no required
//! byte alignment. A [TypeSpec] describes the nested shape, [Schema]
//! flattens it into named field offsets under a [Layout] policy, and
//! [StructuredBuffer] binds a schema to a concrete buffer for
//! path-addressed get/set. [BitSpan] is the underlying view type for
//! arbitrary-offset, arbitrary-width reads and writes.
//!
//! ```
//! use p4buf::{Layout, Schema, StructSpec, StructuredBuffer};
//! use std::sync::Arc;
//!
//! let mut s0 = StructSpec::new();
//! s0.add_bit("a", 1).unwrap();
//! s0.add_bit("b", 2).unwrap();
//!
//! let mut root = StructSpec::new();
//! root.add("s0", s0.into()).unwrap();
//! root.add_bit("c", 3).unwrap();
//! root.add_bit("d", 4).unwrap();
//!
//! let schema = Arc::new(Schema::new(&root.into(), Layout::Compact));
//! let mut data = StructuredBuffer::new(schema);
//! data.set("/s0/a", 1).unwrap();
//! data.set("/d", 9).unwrap();
//! assert_eq!(data.get_u64("/d").unwrap(), 9);
//! ```

pub mod bits;
pub mod buffer;
pub mod defs;
pub mod error;
pub mod schema;
pub mod span;
pub mod structured;
pub mod type_spec;

pub use buffer::{Buffer, SharedBuffer};
pub use defs::TypeSpecDef;
pub use error::BufError;
pub use schema::{FieldEntry, Layout, Schema};
pub use span::BitSpan;
pub use structured::StructuredBuffer;
pub use type_spec::{StructSpec, TupleSpec, TypeSpec};
