// Execution mode word
//
// Layout of the 32-byte mode, most significant byte first:
//
//   | call type | exec type | unused  | selector | payload  |
//   | 1 byte    | 1 byte    | 4 bytes | 4 bytes  | 22 bytes |
//
// Decoding is total: every word yields raw tags. Whether a tag is supported
// is decided separately by `CallKind::try_from` / `FailurePolicy::try_from`.

use std::fmt;

use alloy_primitives::B256;
use delegate_error::DispatchError;

const CALL_TYPE_OFFSET: usize = 0;
const EXEC_TYPE_OFFSET: usize = 1;
const UNUSED_RANGE: std::ops::Range<usize> = 2..6;
const SELECTOR_RANGE: std::ops::Range<usize> = 6..10;
const PAYLOAD_RANGE: std::ops::Range<usize> = 10..32;

/// Raw call-type tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CallType(pub u8);

impl CallType {
    pub const SINGLE: CallType = CallType(0x00);
    pub const BATCH: CallType = CallType(0x01);
    /// Named for completeness; not executed here
    pub const STATIC: CallType = CallType(0xfe);
    /// Named for completeness; not executed here
    pub const DELEGATECALL: CallType = CallType(0xff);
}

/// Raw exec-type tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExecType(pub u8);

impl ExecType {
    pub const DEFAULT: ExecType = ExecType(0x00);
    pub const TRY: ExecType = ExecType(0x01);
}

/// Four-byte mode selector (reserved, not consumed by the dispatcher)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ModeSelector(pub [u8; 4]);

/// Twenty-two byte mode payload (reserved, not consumed by the dispatcher)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ModePayload(pub [u8; 22]);

/// Encoded execution mode as supplied by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ModeCode(pub B256);

impl ModeCode {
    /// Pack a mode word from its parts. The unused bytes are zero.
    pub fn encode(
        call_type: CallType,
        exec_type: ExecType,
        selector: ModeSelector,
        payload: ModePayload,
    ) -> Self {
        let mut word = [0u8; 32];
        word[CALL_TYPE_OFFSET] = call_type.0;
        word[EXEC_TYPE_OFFSET] = exec_type.0;
        word[SELECTOR_RANGE].copy_from_slice(&selector.0);
        word[PAYLOAD_RANGE].copy_from_slice(&payload.0);
        Self(B256::from(word))
    }

    /// Shorthand for a mode with default selector and empty payload
    pub fn new(call_type: CallType, exec_type: ExecType) -> Self {
        Self::encode(call_type, exec_type, ModeSelector::default(), ModePayload::default())
    }

    /// Decode every field of the word
    pub fn decode(&self) -> Mode {
        let word = self.0.as_slice();
        let mut unused = [0u8; 4];
        unused.copy_from_slice(&word[UNUSED_RANGE]);
        let mut selector = [0u8; 4];
        selector.copy_from_slice(&word[SELECTOR_RANGE]);
        let mut payload = [0u8; 22];
        payload.copy_from_slice(&word[PAYLOAD_RANGE]);

        Mode {
            call_type: CallType(word[CALL_TYPE_OFFSET]),
            exec_type: ExecType(word[EXEC_TYPE_OFFSET]),
            unused,
            selector: ModeSelector(selector),
            payload: ModePayload(payload),
        }
    }
}

impl From<B256> for ModeCode {
    fn from(word: B256) -> Self {
        Self(word)
    }
}

impl From<[u8; 32]> for ModeCode {
    fn from(word: [u8; 32]) -> Self {
        Self(B256::from(word))
    }
}

impl fmt::Display for ModeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Decoded mode word
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mode {
    pub call_type: CallType,
    pub exec_type: ExecType,
    pub unused: [u8; 4],
    pub selector: ModeSelector,
    pub payload: ModePayload,
}

/// Supported call encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallKind {
    /// Packed `target || value || data`
    Single,
    /// ABI-encoded array of calls
    Batch,
}

impl TryFrom<CallType> for CallKind {
    type Error = DispatchError;

    fn try_from(call_type: CallType) -> Result<Self, Self::Error> {
        match call_type {
            CallType::SINGLE => Ok(CallKind::Single),
            CallType::BATCH => Ok(CallKind::Batch),
            CallType(other) => Err(DispatchError::UnsupportedCallType(other)),
        }
    }
}

/// Supported failure policies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailurePolicy {
    /// First failing call aborts the whole dispatch
    Revert,
    /// Failing calls are reported and the dispatch continues
    Try,
}

impl TryFrom<ExecType> for FailurePolicy {
    type Error = DispatchError;

    fn try_from(exec_type: ExecType) -> Result<Self, Self::Error> {
        match exec_type {
            ExecType::DEFAULT => Ok(FailurePolicy::Revert),
            ExecType::TRY => Ok(FailurePolicy::Try),
            ExecType(other) => Err(DispatchError::UnsupportedExecType(other)),
        }
    }
}

impl Mode {
    /// Resolve both tags, call-type first.
    pub fn resolve(&self) -> Result<(CallKind, FailurePolicy), DispatchError> {
        let kind = CallKind::try_from(self.call_type)?;
        let policy = FailurePolicy::try_from(self.exec_type)?;
        Ok((kind, policy))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_reads_each_field_at_its_offset() {
        let mut word = [0u8; 32];
        word[0] = 0x01;
        word[1] = 0x01;
        word[2..6].copy_from_slice(&[0xaa; 4]);
        word[6..10].copy_from_slice(&[1, 2, 3, 4]);
        word[10..32].copy_from_slice(&[0x55; 22]);

        let mode = ModeCode::from(word).decode();
        assert_eq!(mode.call_type, CallType::BATCH);
        assert_eq!(mode.exec_type, ExecType::TRY);
        assert_eq!(mode.unused, [0xaa; 4]);
        assert_eq!(mode.selector, ModeSelector([1, 2, 3, 4]));
        assert_eq!(mode.payload, ModePayload([0x55; 22]));
    }

    #[test]
    fn test_encode_places_tags_in_leading_bytes() {
        let code = ModeCode::encode(
            CallType::SINGLE,
            ExecType::TRY,
            ModeSelector([9, 9, 9, 9]),
            ModePayload([7; 22]),
        );
        let bytes = code.0.as_slice();
        assert_eq!(bytes[0], 0x00);
        assert_eq!(bytes[1], 0x01);
        assert_eq!(&bytes[2..6], &[0, 0, 0, 0]);
        assert_eq!(&bytes[6..10], &[9, 9, 9, 9]);

        let mode = code.decode();
        assert_eq!(mode.selector, ModeSelector([9, 9, 9, 9]));
        assert_eq!(mode.payload, ModePayload([7; 22]));
    }

    #[test]
    fn test_any_word_decodes() {
        let mode = ModeCode::from([0xff; 32]).decode();
        assert_eq!(mode.call_type, CallType::DELEGATECALL);
        assert_eq!(mode.exec_type, ExecType(0xff));
    }

    #[test]
    fn test_resolve_rejects_unknown_call_type_before_exec_type() {
        let mode = ModeCode::new(CallType::STATIC, ExecType(0x07)).decode();
        assert_eq!(mode.resolve(), Err(DispatchError::UnsupportedCallType(0xfe)));
    }

    #[test]
    fn test_resolve_rejects_unknown_exec_type() {
        let mode = ModeCode::new(CallType::BATCH, ExecType(0x02)).decode();
        assert_eq!(mode.resolve(), Err(DispatchError::UnsupportedExecType(0x02)));
    }

    #[test]
    fn test_resolve_known_pairs() {
        let cases = [
            (CallType::SINGLE, ExecType::DEFAULT, CallKind::Single, FailurePolicy::Revert),
            (CallType::SINGLE, ExecType::TRY, CallKind::Single, FailurePolicy::Try),
            (CallType::BATCH, ExecType::DEFAULT, CallKind::Batch, FailurePolicy::Revert),
            (CallType::BATCH, ExecType::TRY, CallKind::Batch, FailurePolicy::Try),
        ];
        for (call_type, exec_type, kind, policy) in cases {
            let mode = ModeCode::new(call_type, exec_type).decode();
            assert_eq!(mode.resolve(), Ok((kind, policy)));
        }
    }
}
