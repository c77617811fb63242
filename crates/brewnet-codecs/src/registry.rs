//! Serialization delegate registry

use crate::codec::Codec;
use crate::error::{CodecError, CodecResult};
use crate::json::JsonCodec;
use crate::yaml::YamlCodec;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Codecs keyed by the media type they serve
pub struct CodecRegistry {
	codecs: RwLock<HashMap<String, Arc<dyn Codec>>>,
}

impl CodecRegistry {
	/// Creates an empty registry
	pub fn new() -> Self {
		Self {
			codecs: RwLock::new(HashMap::new()),
		}
	}

	/// Creates a registry with the JSON and YAML codecs
	///
	/// # Examples
	///
	/// ```
	/// use brewnet_codecs::CodecRegistry;
	///
	/// let registry = CodecRegistry::with_defaults();
	/// assert!(registry.contains("application/json"));
	/// assert!(registry.contains("application/yaml"));
	/// ```
	pub fn with_defaults() -> Self {
		let registry = Self::new();
		registry.register(JsonCodec::new());
		registry.register(YamlCodec::new());
		registry
	}

	/// Registers a codec under its own media type, replacing any previous one
	pub fn register<C: Codec + 'static>(&self, codec: C) {
		let media_type = codec.media_type().to_string();
		self.register_as(media_type, Arc::new(codec));
	}

	/// Registers a codec under an explicit media type
	pub fn register_as(&self, media_type: impl Into<String>, codec: Arc<dyn Codec>) {
		let media_type = media_type.into().to_ascii_lowercase();
		debug!(media_type = %media_type, format = codec.format(), "Registering codec");
		self.codecs.write().insert(media_type, codec);
	}

	/// Looks up the codec for a media type, ignoring case
	pub fn resolve(&self, media_type: &str) -> CodecResult<Arc<dyn Codec>> {
		self.codecs
			.read()
			.get(&media_type.to_ascii_lowercase())
			.cloned()
			.ok_or_else(|| CodecError::DelegateResolution {
				media_type: media_type.to_string(),
			})
	}

	pub fn contains(&self, media_type: &str) -> bool {
		self.codecs
			.read()
			.contains_key(&media_type.to_ascii_lowercase())
	}

	/// Registered media types, sorted
	pub fn media_types(&self) -> Vec<String> {
		let mut media_types: Vec<String> = self.codecs.read().keys().cloned().collect();
		media_types.sort();
		media_types
	}
}

impl Default for CodecRegistry {
	fn default() -> Self {
		Self::with_defaults()
	}
}

impl std::fmt::Debug for CodecRegistry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("CodecRegistry")
			.field("media_types", &self.media_types())
			.finish()
	}
}

// Global registry instance
static DEFAULT_REGISTRY: Lazy<RwLock<Arc<CodecRegistry>>> =
	Lazy::new(|| RwLock::new(Arc::new(CodecRegistry::with_defaults())));

/// Process-wide registry, created with the default codecs on first use
pub fn default_registry() -> Arc<CodecRegistry> {
	DEFAULT_REGISTRY.read().clone()
}

/// Replace the process-wide registry
pub fn set_default_registry(registry: Arc<CodecRegistry>) {
	*DEFAULT_REGISTRY.write() = registry;
}
