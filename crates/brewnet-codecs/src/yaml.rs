use bytes::Bytes;
use serde_json::Value;

use crate::codec::Codec;
use crate::error::{CodecError, CodecResult};

/// YAML codec
///
/// Encodes the descriptor value as a YAML document.
#[derive(Debug, Clone, Default)]
pub struct YamlCodec;

impl YamlCodec {
	pub fn new() -> Self {
		Self
	}
}

impl Codec for YamlCodec {
	fn media_type(&self) -> &str {
		"application/yaml"
	}

	fn format(&self) -> &str {
		"yaml"
	}

	fn marshal(&self, value: &Value) -> CodecResult<Bytes> {
		let yaml_string =
			serde_yaml::to_string(value).map_err(|e| CodecError::DelegateMarshal(e.to_string()))?;

		Ok(Bytes::from(yaml_string))
	}

	fn unmarshal(&self, data: &[u8]) -> CodecResult<Value> {
		serde_yaml::from_slice(data).map_err(|e| CodecError::DelegateUnmarshal(e.to_string()))
	}
}
