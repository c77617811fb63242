//! Codec errors

use brewnet_forms::FormError;
use thiserror::Error;

/// Result type for codec operations
pub type CodecResult<T> = Result<T, CodecError>;

#[derive(Debug, Error)]
pub enum CodecError {
	/// Deriving the form descriptor failed
	#[error(transparent)]
	Form(#[from] FormError),

	#[error("{0} is currently a stub")]
	NotImplemented(&'static str),

	/// No serialization delegate is registered for the media type
	#[error("No codec registered for media type `{media_type}`")]
	DelegateResolution { media_type: String },

	#[error("Serialization failed: {0}")]
	DelegateMarshal(String),

	#[error("Deserialization failed: {0}")]
	DelegateUnmarshal(String),

	#[error("Invalid media type: {0}")]
	InvalidMediaType(String),

	#[error("Invalid settings: {0}")]
	Settings(String),
}
