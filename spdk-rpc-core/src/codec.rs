//! Encoding and decoding of JSON-RPC messages
//!
//! Requests are written as single JSON objects. Replies are read from a
//! stream on which the daemon writes JSON values back to back without any
//! line framing, so the decoder works on a growing byte buffer: it pops one
//! complete value from the front and leaves whatever follows for the next
//! call.
//!
//! # Examples
//!
//! ```rust
//! use spdk_rpc_core::{codec, Id, JsonRpcRequest};
//!
//! let request = JsonRpcRequest::new("spdk_get_version", None, Id::Number(1));
//! let json = codec::encode_request(&request).unwrap();
//! assert!(json.contains("\"method\":\"spdk_get_version\""));
//!
//! let mut buffer = br#"{"jsonrpc":"2.0","id":1,"result":{"version":"v24.09"}}"#.to_vec();
//! let response = codec::decode_next_response(&mut buffer).unwrap().unwrap();
//! assert_eq!(response.id, Id::Number(1));
//! assert!(buffer.is_empty());
//! ```

use crate::error::TransportError;
use crate::types::{JsonRpcRequest, JsonRpcResponse};
use serde::Serialize;

/// Encode any serializable message to a JSON string
pub fn encode<T: Serialize>(msg: &T) -> Result<String, TransportError> {
    serde_json::to_string(msg).map_err(|e| TransportError::Serialization(e.to_string()))
}

/// Encode a JSON-RPC request to a JSON string
pub fn encode_request(req: &JsonRpcRequest) -> Result<String, TransportError> {
    encode(req)
}

/// Pop one complete response from the front of `buffer`
///
/// Returns `Ok(None)` when the buffer holds only whitespace or a value that
/// has not fully arrived yet; the buffer is left untouched so more bytes can
/// be appended. On success the consumed bytes are drained from the buffer.
///
/// # Errors
///
/// Returns `TransportError::Serialization` when the buffered bytes can never
/// become a valid response. A well-formed JSON value of the wrong shape is
/// drained on its own; after a syntax error the whole buffer is discarded,
/// since there is no reliable point to resume from. Either way the next call
/// starts on fresh bytes.
pub fn decode_next_response(buffer: &mut Vec<u8>) -> Result<Option<JsonRpcResponse>, TransportError> {
    let (next, consumed) = {
        let mut stream = serde_json::Deserializer::from_slice(buffer).into_iter::<serde_json::Value>();
        let next = stream.next();
        (next, stream.byte_offset())
    };

    match next {
        None => Ok(None),
        Some(Ok(value)) => {
            buffer.drain(..consumed);
            serde_json::from_value(value)
                .map(Some)
                .map_err(|e| TransportError::Serialization(e.to_string()))
        }
        Some(Err(e)) if e.is_eof() => Ok(None),
        Some(Err(e)) => {
            buffer.clear();
            Err(TransportError::Serialization(e.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Id;
    use serde_json::json;

    #[test]
    fn test_encode_request() {
        let request = JsonRpcRequest::new("bdev_malloc_delete", Some(json!({"name": "Malloc0"})), Id::Number(5));
        let json = encode_request(&request).unwrap();

        assert!(json.contains("\"jsonrpc\":\"2.0\""));
        assert!(json.contains("\"method\":\"bdev_malloc_delete\""));
        assert!(json.contains("\"params\":{\"name\":\"Malloc0\"}"));
        assert!(json.contains("\"id\":5"));
    }

    #[test]
    fn test_decode_next_waits_for_complete_value() {
        let full = br#"{"jsonrpc":"2.0","id":1,"result":[1,2,3]}"#;
        let (head, tail) = full.split_at(17);

        let mut buffer = head.to_vec();
        assert!(decode_next_response(&mut buffer).unwrap().is_none());
        assert_eq!(buffer.len(), 17);

        buffer.extend_from_slice(tail);
        let response = decode_next_response(&mut buffer).unwrap().unwrap();
        assert_eq!(response.result, Some(json!([1, 2, 3])));
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_decode_next_leaves_following_values() {
        let mut buffer = br#"{"jsonrpc":"2.0","id":1,"result":1} {"jsonrpc":"2.0","id":2,"result":2}"#.to_vec();

        let first = decode_next_response(&mut buffer).unwrap().unwrap();
        assert_eq!(first.id, Id::Number(1));

        let second = decode_next_response(&mut buffer).unwrap().unwrap();
        assert_eq!(second.id, Id::Number(2));

        assert!(decode_next_response(&mut buffer).unwrap().is_none());
    }

    #[test]
    fn test_decode_next_whitespace_only() {
        let mut buffer = b"  \n".to_vec();
        assert!(decode_next_response(&mut buffer).unwrap().is_none());
    }

    #[test]
    fn test_decode_next_rejects_garbage() {
        let mut buffer = br#"] {"jsonrpc":"2.0","id":1,"result":1}"#.to_vec();
        assert!(matches!(
            decode_next_response(&mut buffer),
            Err(TransportError::Serialization(_))
        ));
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_decode_next_rejects_wrong_shape() {
        let mut buffer = br#"{"jsonrpc":"2.0","result":1}"#.to_vec();
        assert!(matches!(
            decode_next_response(&mut buffer),
            Err(TransportError::Serialization(_))
        ));
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_decode_next_after_wrong_shape_reads_following_value() {
        let mut buffer = br#"{"jsonrpc":"2.0","result":1}{"jsonrpc":"2.0","id":2,"result":2}"#.to_vec();

        assert!(decode_next_response(&mut buffer).is_err());
        let response = decode_next_response(&mut buffer).unwrap().unwrap();
        assert_eq!(response.id, Id::Number(2));
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_decode_error_response() {
        let mut buffer =
            br#"{"jsonrpc":"2.0","id":3,"error":{"code":-19,"message":"No such device"}}"#.to_vec();
        let response = decode_next_response(&mut buffer).unwrap().unwrap();

        assert!(response.is_error());
        assert_eq!(response.error.unwrap().code, -19);
    }
}
