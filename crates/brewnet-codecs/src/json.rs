use bytes::Bytes;
use serde_json::Value;

use crate::codec::Codec;
use crate::error::{CodecError, CodecResult};

/// JSON codec
#[derive(Debug, Clone, Default)]
pub struct JsonCodec {
	/// Whether to indent the output
	pub pretty: bool,
}

impl JsonCodec {
	/// Creates a compact JSON codec
	///
	/// # Examples
	///
	/// ```
	/// use brewnet_codecs::JsonCodec;
	///
	/// let codec = JsonCodec::new();
	/// assert!(!codec.pretty);
	/// ```
	pub fn new() -> Self {
		Self::default()
	}

	pub fn pretty(mut self, pretty: bool) -> Self {
		self.pretty = pretty;
		self
	}
}

impl Codec for JsonCodec {
	fn media_type(&self) -> &str {
		"application/json"
	}

	fn format(&self) -> &str {
		"json"
	}

	fn marshal(&self, value: &Value) -> CodecResult<Bytes> {
		let encoded = if self.pretty {
			serde_json::to_vec_pretty(value)
		} else {
			serde_json::to_vec(value)
		}
		.map_err(|e| CodecError::DelegateMarshal(e.to_string()))?;

		Ok(Bytes::from(encoded))
	}

	fn unmarshal(&self, data: &[u8]) -> CodecResult<Value> {
		serde_json::from_slice(data).map_err(|e| CodecError::DelegateUnmarshal(e.to_string()))
	}
}
