// ─── Error ──────────────────────────────────────────────────────────────────
use smol_str::SmolStr;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BufError {
    #[error("byte index {index} out of range for {len}-byte buffer")]
    OutOfRange { index: usize, len: usize },
    #[error("bit span {offset}+{width} exceeds buffer bit length {bit_len}")]
    SpanOutOfBounds {
        offset: usize,
        width: usize,
        bit_len: usize,
    },
    #[error("duplicate struct member: {0}")]
    DuplicateMember(SmolStr),
    #[error("field not found: {0}")]
    FieldNotFound(SmolStr),
    #[error("field is {width} bits wide, scalar reads cap at 64")]
    WidthOver64 { width: usize },
}
