//! Form codec settings
//!
//! Settings can be built in code or loaded from TOML. Every key is optional:
//!
//! ```toml
//! domain = "https://api.example.com"
//! default_method = "POST"
//! default_format = "json"
//! max_depth = 32
//! ```

use crate::error::{CodecError, CodecResult};
use brewnet_forms::{DEFAULT_MAX_DEPTH, DEFAULT_METHOD};
use serde::{Deserialize, Serialize};

/// Configuration for [`FormCodec`](crate::FormCodec)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormSettings {
	/// Base URL prepended to request paths when computing a form's action
	pub domain: String,
	/// Method used when neither the caller nor the media type specify one
	pub default_method: String,
	/// Suffix of the media type served when none was negotiated
	pub default_format: String,
	/// Nesting limit for record expansion
	pub max_depth: usize,
}

impl Default for FormSettings {
	fn default() -> Self {
		Self {
			domain: String::new(),
			default_method: DEFAULT_METHOD.to_string(),
			default_format: "json".to_string(),
			max_depth: DEFAULT_MAX_DEPTH,
		}
	}
}

impl FormSettings {
	/// Creates settings for a domain
	///
	/// # Examples
	///
	/// ```
	/// use brewnet_codecs::FormSettings;
	///
	/// let settings = FormSettings::new("https://api.example.com/").with_default_method("PUT");
	/// assert_eq!(settings.domain, "https://api.example.com/");
	/// assert_eq!(settings.default_method, "PUT");
	/// assert_eq!(settings.default_format, "json");
	/// ```
	pub fn new(domain: impl Into<String>) -> Self {
		Self {
			domain: domain.into(),
			..Default::default()
		}
	}

	/// Loads settings from a TOML document
	///
	/// # Examples
	///
	/// ```
	/// use brewnet_codecs::FormSettings;
	///
	/// let settings = FormSettings::from_toml_str("domain = \"https://example.com\"\nmax_depth = 8").unwrap();
	/// assert_eq!(settings.domain, "https://example.com");
	/// assert_eq!(settings.max_depth, 8);
	/// assert_eq!(settings.default_method, "POST");
	/// ```
	pub fn from_toml_str(source: &str) -> CodecResult<Self> {
		let settings: Self =
			toml::from_str(source).map_err(|e| CodecError::Settings(e.to_string()))?;
		settings.validate()?;
		Ok(settings)
	}

	pub fn with_default_method(mut self, method: impl Into<String>) -> Self {
		self.default_method = method.into();
		self
	}

	pub fn with_default_format(mut self, format: impl Into<String>) -> Self {
		self.default_format = format.into();
		self
	}

	pub fn with_max_depth(mut self, max_depth: usize) -> Self {
		self.max_depth = max_depth;
		self
	}

	/// Domain with one trailing `/` removed
	pub fn trimmed_domain(&self) -> &str {
		self.domain.strip_suffix('/').unwrap_or(&self.domain)
	}

	/// Checks that the method, format and depth are usable
	pub fn validate(&self) -> CodecResult<()> {
		if self.default_method.trim().is_empty() {
			return Err(CodecError::Settings(
				"default_method must not be empty".to_string(),
			));
		}
		if self.default_format.trim().is_empty() {
			return Err(CodecError::Settings(
				"default_format must not be empty".to_string(),
			));
		}
		if self.max_depth == 0 {
			return Err(CodecError::Settings(
				"max_depth must be greater than zero".to_string(),
			));
		}
		Ok(())
	}
}
