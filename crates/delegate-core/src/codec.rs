// Execution calldata codec
//
// Single calls are packed as `target (20) || value (32) || data (rest)`.
// Batches are the standard ABI encoding of `(address,uint256,bytes)[]`.

use alloy_primitives::{Address, Bytes, U256};
use alloy_sol_types::{sol_data, SolType};

use delegate_error::{CodecError, CodecResult};
use delegate_types::Call;

use crate::abi::Execution;

const TARGET_LEN: usize = 20;
const VALUE_LEN: usize = 32;
const SINGLE_HEADER_LEN: usize = TARGET_LEN + VALUE_LEN;

type ExecutionBatch = sol_data::Array<Execution>;

/// Decode a packed single call
pub fn decode_single(payload: &[u8]) -> CodecResult<Call> {
    if payload.len() < SINGLE_HEADER_LEN {
        return Err(CodecError::SingleCallTooShort { len: payload.len() });
    }
    let target = Address::from_slice(&payload[..TARGET_LEN]);
    let value = U256::from_be_slice(&payload[TARGET_LEN..SINGLE_HEADER_LEN]);
    let data = Bytes::copy_from_slice(&payload[SINGLE_HEADER_LEN..]);
    Ok(Call::new(target, value, data))
}

/// Encode a call in the packed single layout
pub fn encode_single(call: &Call) -> Bytes {
    let mut out = Vec::with_capacity(SINGLE_HEADER_LEN + call.data.len());
    out.extend_from_slice(call.target.as_slice());
    out.extend_from_slice(&call.value.to_be_bytes::<VALUE_LEN>());
    out.extend_from_slice(&call.data);
    Bytes::from(out)
}

/// Decode an ABI-encoded batch, preserving order.
///
/// Bytes past the encoded array are ignored, as calldata decoding does.
/// Offsets and lengths that point outside the payload are still rejected.
pub fn decode_batch(payload: &[u8]) -> CodecResult<Vec<Call>> {
    let executions = ExecutionBatch::abi_decode(payload, false)
        .map_err(|err| CodecError::malformed_batch(err.to_string()))?;
    Ok(executions.into_iter().map(Call::from).collect())
}

/// ABI-encode a batch of calls
pub fn encode_batch(calls: &[Call]) -> Bytes {
    let executions: Vec<Execution> = calls.iter().map(Execution::from).collect();
    Bytes::from(ExecutionBatch::abi_encode(&executions))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;

    fn sample_calls() -> Vec<Call> {
        vec![
            Call::new(address!("00000000000000000000000000000000000000a1"), U256::ZERO, vec![0xaa]),
            Call::new(address!("00000000000000000000000000000000000000b2"), U256::from(7), Vec::new()),
            Call::new(address!("00000000000000000000000000000000000000c3"), U256::MAX, vec![1, 2, 3, 4, 5]),
        ]
    }

    #[test]
    fn test_single_layout_is_packed() {
        let call = Call::new(
            address!("1111111111111111111111111111111111111111"),
            U256::from(0x0102),
            vec![0xde, 0xad],
        );
        let encoded = encode_single(&call);

        assert_eq!(encoded.len(), 54);
        assert_eq!(&encoded[..20], &[0x11; 20]);
        assert_eq!(&encoded[50..52], &[0x01, 0x02]);
        assert_eq!(&encoded[52..], &[0xde, 0xad]);
        assert_eq!(decode_single(&encoded).unwrap(), call);
    }

    #[test]
    fn test_single_without_data_is_accepted() {
        let call = Call::transfer(address!("2222222222222222222222222222222222222222"), U256::from(1));
        let decoded = decode_single(&encode_single(&call)).unwrap();
        assert!(decoded.data.is_empty());
    }

    #[test]
    fn test_single_too_short_is_rejected() {
        assert_eq!(
            decode_single(&[0u8; 51]),
            Err(CodecError::SingleCallTooShort { len: 51 })
        );
        assert_eq!(decode_single(&[]), Err(CodecError::SingleCallTooShort { len: 0 }));
    }

    #[test]
    fn test_batch_preserves_order() {
        let calls = sample_calls();
        let decoded = decode_batch(&encode_batch(&calls)).unwrap();
        assert_eq!(decoded, calls);
    }

    #[test]
    fn test_empty_batch_decodes_to_nothing() {
        let encoded = encode_batch(&[]);
        // offset word followed by a zero length
        assert_eq!(encoded.len(), 64);
        assert!(decode_batch(&encoded).unwrap().is_empty());
    }

    #[test]
    fn test_truncated_batch_is_rejected() {
        let encoded = encode_batch(&sample_calls());
        let truncated = &encoded[..encoded.len() - 40];
        assert!(matches!(decode_batch(truncated), Err(CodecError::MalformedBatch(_))));
    }

    #[test]
    fn test_batch_with_out_of_range_offset_is_rejected() {
        let mut encoded = encode_batch(&sample_calls()).to_vec();
        encoded[..32].copy_from_slice(&U256::from(0xffff_ffffu64).to_be_bytes::<32>());
        assert!(matches!(decode_batch(&encoded), Err(CodecError::MalformedBatch(_))));
    }

    #[test]
    fn test_batch_with_trailing_bytes_is_accepted() {
        let calls = sample_calls();
        let mut encoded = encode_batch(&calls).to_vec();
        encoded.extend_from_slice(&[0u8; 32]);
        assert_eq!(decode_batch(&encoded).unwrap(), calls);
    }

    #[test]
    fn test_empty_payload_is_not_a_batch() {
        assert!(matches!(decode_batch(&[]), Err(CodecError::MalformedBatch(_))));
    }
}
