//! Error types for form derivation

use crate::kind::ValueKind;
use thiserror::Error;

/// Result type for form derivation
pub type FormResult<T> = Result<T, FormError>;

/// Errors raised while deriving a form descriptor from a record type
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormError {
	/// A field (or the value-type substitute it declares) has no input mapping
	#[error("Field `{path}` has unsupported kind `{kind}`")]
	UnsupportedKind { path: String, kind: ValueKind },

	/// The described value does not resolve to a record
	#[error("Cannot derive form fields from `{type_name}`: top-level value is not a structure")]
	NonStructureTopLevel { type_name: String },

	/// An embedded field does not resolve to a record or a field declaration
	#[error("Embedded field `{path}` does not resolve to a structure (found {found})")]
	InvalidEmbed { path: String, found: String },

	/// A record type appears inside itself without a declaration breaking the cycle
	#[error("Record `{type_name}` at `{path}` contains itself")]
	CyclicRecord { path: String, type_name: String },

	/// Nesting went deeper than the configured limit
	#[error("Form derivation at `{path}` exceeds the maximum depth of {limit}")]
	DepthExceeded { path: String, limit: usize },
}

impl FormError {
	/// Path of the offending field, if the error is tied to one
	pub fn path(&self) -> Option<&str> {
		match self {
			FormError::UnsupportedKind { path, .. }
			| FormError::InvalidEmbed { path, .. }
			| FormError::CyclicRecord { path, .. }
			| FormError::DepthExceeded { path, .. } => Some(path),
			FormError::NonStructureTopLevel { .. } => None,
		}
	}
}
