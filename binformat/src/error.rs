use thiserror::Error;

/// The ways a BigSize value can break the canonical encoding rule.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum BigSizeViolation {
    #[error("value {value} encoded with prefix {prefix:#04x} is not minimal")]
    NotMinimal { prefix: u8, value: u64 },
    #[error("truncated, needed {needed} bytes, {remaining} remaining")]
    Truncated { needed: usize, remaining: usize },
}

#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum WireError {
    #[error("cannot read data, needed {needed} bytes, {remaining} remaining")]
    Underflow { needed: usize, remaining: usize },
    #[error("bigsize canonical encoding violated: {0}")]
    BigSize(#[from] BigSizeViolation),
    #[error("tlv record type {current} does not follow type {previous}")]
    TlvOrder { previous: u64, current: u64 },
    #[error("unknown even tlv record type {0}")]
    UnknownEvenTlv(u64),
    #[error("runtime type: `{0}` is unknown")]
    UnknownMessageType(u16),
    #[error("length {length} exceeds the limit {limit}")]
    LengthOverflow { length: usize, limit: usize },
    #[error("invalid {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

impl WireError {
    pub fn invalid<R: ToString>(field: &'static str, reason: R) -> Self {
        WireError::InvalidValue {
            field,
            reason: reason.to_string(),
        }
    }

    /// True when the error comes from a non-minimal or truncated BigSize.
    pub fn is_canonical_violation(&self) -> bool {
        match self {
            WireError::BigSize(_) => true,
            _ => false,
        }
    }
}
