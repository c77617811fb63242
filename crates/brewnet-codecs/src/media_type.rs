//! Media type parsing
//!
//! Media types are kept case-preserving; comparisons that need to ignore case
//! do so explicitly.

use indexmap::IndexMap;
use std::fmt;

/// A parsed media type such as `application/vnd.brewnet.form+json; q=0.8`
#[derive(Debug, Clone, PartialEq)]
pub struct MediaType {
	pub type_: String,
	/// Full subtype, including any `+suffix`
	pub subtype: String,
	pub parameters: IndexMap<String, String>,
	/// Value of the `q` parameter, 1.0 when absent
	pub quality: f32,
}

impl MediaType {
	/// Creates a media type without parameters
	///
	/// # Examples
	///
	/// ```
	/// use brewnet_codecs::MediaType;
	///
	/// let media_type = MediaType::new("application", "vnd.brewnet.form+json");
	/// assert_eq!(media_type.suffix(), Some("json"));
	/// assert_eq!(media_type.to_string(), "application/vnd.brewnet.form+json");
	/// ```
	pub fn new(type_: impl Into<String>, subtype: impl Into<String>) -> Self {
		Self {
			type_: type_.into(),
			subtype: subtype.into(),
			parameters: IndexMap::new(),
			quality: 1.0,
		}
	}

	/// Parses a single media type.
	///
	/// Returns `None` when the value is not of the form `type/subtype`.
	///
	/// # Examples
	///
	/// ```
	/// use brewnet_codecs::MediaType;
	///
	/// let media_type = MediaType::parse("application/vnd.brewnet.form+yaml; method=PUT; q=0.5").unwrap();
	/// assert_eq!(media_type.type_, "application");
	/// assert_eq!(media_type.base_subtype(), "vnd.brewnet.form");
	/// assert_eq!(media_type.parameter("method"), Some("PUT"));
	/// assert_eq!(media_type.quality, 0.5);
	///
	/// assert!(MediaType::parse("not a media type").is_none());
	/// ```
	pub fn parse(value: &str) -> Option<Self> {
		let mut parts = value.split(';');
		let essence = parts.next()?.trim();
		let (type_, subtype) = essence.split_once('/')?;
		let (type_, subtype) = (type_.trim(), subtype.trim());
		if type_.is_empty() || subtype.is_empty() || subtype.contains('/') {
			return None;
		}

		let mut media_type = Self::new(type_, subtype);
		for parameter in parts {
			let Some((key, raw)) = parameter.split_once('=') else {
				continue;
			};
			let key = key.trim().to_ascii_lowercase();
			let raw = raw.trim().trim_matches('"');
			if key == "q" {
				if let Ok(quality) = raw.parse::<f32>() {
					media_type.quality = quality.clamp(0.0, 1.0);
				}
			} else {
				media_type.parameters.insert(key, raw.to_string());
			}
		}

		Some(media_type)
	}

	pub fn with_parameter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.parameters.insert(key.into(), value.into());
		self
	}

	pub fn parameter(&self, key: &str) -> Option<&str> {
		self.parameters.get(key).map(String::as_str)
	}

	/// Subtype without the structured-syntax suffix
	pub fn base_subtype(&self) -> &str {
		self.subtype
			.split_once('+')
			.map_or(self.subtype.as_str(), |(base, _)| base)
	}

	/// Structured-syntax suffix, e.g. `json` in `vnd.brewnet.form+json`
	pub fn suffix(&self) -> Option<&str> {
		self.subtype.split_once('+').map(|(_, suffix)| suffix)
	}

	/// `type/subtype` without parameters
	pub fn essence(&self) -> String {
		format!("{}/{}", self.type_, self.subtype)
	}

	/// Whether this (possibly wildcard) type accepts `other`
	pub fn matches(&self, other: &MediaType) -> bool {
		let type_matches = self.type_ == "*" || self.type_.eq_ignore_ascii_case(&other.type_);
		let subtype_matches =
			self.subtype == "*" || self.subtype.eq_ignore_ascii_case(&other.subtype);
		type_matches && subtype_matches
	}
}

impl fmt::Display for MediaType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}/{}", self.type_, self.subtype)?;
		for (key, value) in &self.parameters {
			write!(f, "; {}={}", key, value)?;
		}
		Ok(())
	}
}
