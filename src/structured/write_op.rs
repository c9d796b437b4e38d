use super::data::StructuredBuffer;
use crate::error::BufError;
use crate::span::BitSpan;

impl StructuredBuffer {
    /// Writes `value` into the field at `path`, right-aligned: a value
    /// wider than the field silently keeps only its low-order `bitwidth`
    /// bits. Fields wider than 64 bits have only their low 64 bits
    /// overwritten; use [StructuredBuffer::set_bytes] to fill them whole.
    pub fn set(&mut self, path: &str, value: u64) -> Result<(), BufError> {
        let mut dst = self.span(path)?;
        dst.copy_from(&BitSpan::from(value));
        Ok(())
    }

    /// Writes a literal byte sequence into the field, right-aligned under
    /// the same truncation rule as [StructuredBuffer::set].
    pub fn set_bytes(&mut self, path: &str, bytes: &[u8]) -> Result<(), BufError> {
        let mut dst = self.span(path)?;
        dst.copy_from(&BitSpan::from_bytes(bytes));
        Ok(())
    }

    /// Cross-field assignment: `self[dst_path] = self[src_path]`,
    /// right-aligned. Safe when the two fields overlap byte-wise in the
    /// one underlying buffer; the source reads as it was before the write.
    pub fn copy(&mut self, dst_path: &str, src_path: &str) -> Result<(), BufError> {
        let src = self.span(src_path)?;
        let mut dst = self.span(dst_path)?;
        dst.copy_from(&src);
        Ok(())
    }
}
