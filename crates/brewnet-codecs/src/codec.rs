//! Serialization delegate interface

use crate::error::CodecResult;
use bytes::Bytes;
use serde_json::Value;

/// A concrete serialization format a form codec delegates to
pub trait Codec: Send + Sync {
	/// Media type this codec is registered under
	fn media_type(&self) -> &str;

	/// Short format name, also used as the media type suffix
	fn format(&self) -> &str;

	fn marshal(&self, value: &Value) -> CodecResult<Bytes>;

	fn unmarshal(&self, data: &[u8]) -> CodecResult<Value>;
}
