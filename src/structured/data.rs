use std::rc::Rc;
use std::sync::Arc;

use crate::buffer::{Buffer, SharedBuffer};
use crate::schema::Schema;

// ─── StructuredBuffer ───────────────────────────────────────────────────────

/// Binds a shared [Schema] to one concrete buffer and exposes
/// path-addressed field access. Any number of instances share one schema;
/// each owns its bytes.
#[derive(Debug)]
pub struct StructuredBuffer {
    schema: Arc<Schema>,
    buffer: SharedBuffer,
}

impl StructuredBuffer {
    /// Creates an instance over a zero-initialized buffer of the schema's
    /// byte width.
    pub fn new(schema: Arc<Schema>) -> Self {
        let buffer = Buffer::new(schema.bytewidth()).into_shared();
        Self { schema, buffer }
    }

    /// Same, with every byte set to `fill`.
    pub fn with_fill(schema: Arc<Schema>, fill: u8) -> Self {
        let buffer = Buffer::filled(schema.bytewidth(), fill).into_shared();
        Self { schema, buffer }
    }

    /// Swaps in a fresh zeroed buffer of the same shape. Spans handed out
    /// earlier keep the old buffer alive and untouched.
    pub fn reset(&mut self) {
        self.reset_with(0);
    }

    /// Swaps in a fresh buffer filled with `fill`.
    pub fn reset_with(&mut self, fill: u8) {
        self.buffer = Buffer::filled(self.schema.bytewidth(), fill).into_shared();
    }

    #[inline]
    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    /// Shared handle to the underlying storage.
    #[inline]
    pub fn buffer(&self) -> SharedBuffer {
        Rc::clone(&self.buffer)
    }

    /// Snapshot of the underlying bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.buffer.borrow().as_slice().to_vec()
    }
}
