use std::rc::Rc;

use crate::bits;
use crate::buffer::{Buffer, SharedBuffer};
use crate::error::BufError;

// ─── BitSpan ────────────────────────────────────────────────────────────────

/// A (buffer, bit offset, bit width) view. Never owns storage; any number of
/// spans may alias one buffer. Cloning a span yields another view of the same
/// bytes, not a copy of them.
#[derive(Debug, Clone)]
pub struct BitSpan {
    buffer: SharedBuffer,
    offset: usize,
    width: usize,
}

impl BitSpan {
    /// Creates a span over `buffer`, checked against its bit length.
    pub fn new(buffer: SharedBuffer, offset: usize, width: usize) -> Result<Self, BufError> {
        let bit_len = buffer.borrow().bit_len();
        match offset.checked_add(width) {
            Some(end) if end <= bit_len => Ok(Self {
                buffer,
                offset,
                width,
            }),
            _ => Err(BufError::SpanOutOfBounds {
                offset,
                width,
                bit_len,
            }),
        }
    }

    /// Span covering the whole buffer.
    pub fn of_buffer(buffer: SharedBuffer) -> Self {
        let width = buffer.borrow().bit_len();
        Self {
            buffer,
            offset: 0,
            width,
        }
    }

    /// Literal span over a copy of `bytes`, full natural width.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self::of_buffer(Buffer::from_bytes(bytes).into_shared())
    }

    /// Literal span selecting the right-most `width` bits of `bytes`. A
    /// `width` beyond the natural width is ignored and the full natural
    /// width is used.
    pub fn from_bytes_trunc(bytes: &[u8], width: usize) -> Self {
        let natural = bytes.len() * 8;
        let span = Self::from_bytes(bytes);
        if width >= natural {
            return span;
        }
        Self {
            buffer: span.buffer,
            offset: natural - width,
            width,
        }
    }

    /// Shared handle to the underlying buffer.
    #[inline]
    pub fn buffer(&self) -> &SharedBuffer {
        &self.buffer
    }

    /// Offset in bits from the start of the buffer.
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Width in bits.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0
    }

    /// Copies `min(self.width, src.width)` bits from `src`, right-aligned:
    ///
    /// ```text
    /// 00000 = 101      => 00101
    /// 00000 = 10100101 => 00101
    /// ```
    ///
    /// A wider source contributes only its low-order bits; a narrower one
    /// overwrites only the destination's low-order bits and leaves its
    /// high-order bits untouched. When both spans alias one buffer the copy
    /// stages each source byte before the matching destination byte is
    /// written, so overlapping ranges stay intact.
    pub fn copy_from(&mut self, src: &BitSpan) {
        // Zero-width on either side is a no-op.
        if self.width == 0 || src.width == 0 {
            return;
        }

        // Right-align the two ranges.
        let width = self.width.min(src.width);
        let dst_offset = self.offset + self.width - width;
        let src_offset = src.offset + src.width - width;

        if Rc::ptr_eq(&self.buffer, &src.buffer) {
            let mut buf = self.buffer.borrow_mut();
            bits::copy_bits_within(buf.as_mut_slice(), dst_offset, src_offset, width);
        } else {
            let src_buf = src.buffer.borrow();
            let mut dst_buf = self.buffer.borrow_mut();
            bits::copy_bits(
                dst_buf.as_mut_slice(),
                dst_offset,
                src_buf.as_slice(),
                src_offset,
                width,
            );
        }
    }

    /// The span's value, right-aligned into a u64.
    pub fn read_u64(&self) -> Result<u64, BufError> {
        if self.width > 64 {
            return Err(BufError::WidthOver64 { width: self.width });
        }

        let buf = self.buffer.borrow();
        let bytes = buf.as_slice();
        let mut value = 0u64;
        for pos in self.offset..self.offset + self.width {
            let bit = (bytes[pos / 8] >> (7 - pos % 8)) & 1;
            value = (value << 1) | bit as u64;
        }
        Ok(value)
    }

    /// The span's bits, right-aligned into `ceil(width / 8)` fresh bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        let n = self.width.div_ceil(8);
        let mut out = vec![0u8; n];
        let buf = self.buffer.borrow();
        bits::copy_bits(&mut out, n * 8 - self.width, buf.as_slice(), self.offset, self.width);
        out
    }
}

// Fixed-width literals serialize big-endian, matching network convention.

impl From<u8> for BitSpan {
    fn from(value: u8) -> Self {
        Self::from_bytes(&[value])
    }
}

impl From<u16> for BitSpan {
    fn from(value: u16) -> Self {
        Self::from_bytes(&value.to_be_bytes())
    }
}

impl From<u32> for BitSpan {
    fn from(value: u32) -> Self {
        Self::from_bytes(&value.to_be_bytes())
    }
}

impl From<u64> for BitSpan {
    fn from(value: u64) -> Self {
        Self::from_bytes(&value.to_be_bytes())
    }
}
