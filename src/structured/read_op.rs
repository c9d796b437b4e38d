use super::data::StructuredBuffer;
use crate::error::BufError;
use crate::span::BitSpan;

impl StructuredBuffer {
    /// Path-addressed view of one field, usable for reading or as either
    /// side of a span assignment. Fails with [BufError::FieldNotFound] on
    /// an unknown path.
    pub fn span(&self, path: &str) -> Result<BitSpan, BufError> {
        let entry = self.schema().field(path)?;
        let offset = entry.byte_offset * 8 + entry.bit_offset as usize;
        BitSpan::new(self.buffer(), offset, entry.bitwidth)
    }

    /// Field value, right-aligned. Fields wider than 64 bits fail with
    /// [BufError::WidthOver64]; read those through
    /// [StructuredBuffer::span] and [BitSpan::to_bytes].
    pub fn get_u64(&self, path: &str) -> Result<u64, BufError> {
        self.span(path)?.read_u64()
    }
}
