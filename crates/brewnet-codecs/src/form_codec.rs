//! Content-negotiating form codec
//!
//! [`FormCodec`] serves `application/vnd.brewnet.form+<format>`: it derives a
//! form descriptor from a record and hands the descriptor to the delegate
//! codec registered for `application/<format>`.
//!
//! ```
//! use brewnet_codecs::{FormCodec, FormSettings, MarshalOptions};
//! use brewnet_forms::Form;
//!
//! #[derive(Form)]
//! struct Signup {
//! 	#[request("email,required")]
//! 	email: String,
//! }
//!
//! let codec = FormCodec::new(FormSettings::new("https://api.example.com/")).unwrap();
//! let signup = Signup { email: String::new() };
//! let body = codec
//! 	.marshal(&signup, &MarshalOptions::new("/signup"))
//! 	.unwrap();
//!
//! let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
//! assert_eq!(value["action"], "https://api.example.com/signup");
//! assert_eq!(value["method"], "POST");
//! assert_eq!(value["fields"]["email"]["required"], true);
//! ```

use crate::accept::AcceptHeader;
use crate::codec::Codec;
use crate::error::{CodecError, CodecResult};
use crate::media_type::MediaType;
use crate::registry::{CodecRegistry, default_registry};
use crate::settings::FormSettings;
use brewnet_forms::{
	AssembleOptions, DeriveOptions, FieldDescriptor, FormDescriptor, FormTarget, InputKind,
	assemble,
};
use bytes::Bytes;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// Media type served by the form codec, without a format suffix
pub const BASE_MIME_TYPE: &str = "application/vnd.brewnet.form";

/// File extension of serialized form descriptors
pub const FILE_EXTENSION: &str = ".brewform";

/// Media type parameter that selects the submission method
pub const METHOD_PARAMETER: &str = "method";

const MIME_CATEGORY: &str = "application";
const BASE_SUBTYPE: &str = "vnd.brewnet.form";

/// Per-call marshal options
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarshalOptions {
	/// Path of the request being answered, appended to the configured domain
	pub request_path: String,
	/// Submission method; overrides every other source
	pub http_method: Option<String>,
	/// Media type negotiated for the response
	pub matched_type: Option<String>,
	/// Nesting limit; defaults to the codec settings
	pub max_depth: Option<usize>,
}

impl MarshalOptions {
	pub fn new(request_path: impl Into<String>) -> Self {
		Self {
			request_path: request_path.into(),
			..Default::default()
		}
	}

	pub fn with_http_method(mut self, method: impl Into<String>) -> Self {
		self.http_method = Some(method.into());
		self
	}

	pub fn with_matched_type(mut self, media_type: impl Into<String>) -> Self {
		self.matched_type = Some(media_type.into());
		self
	}

	pub fn with_max_depth(mut self, max_depth: usize) -> Self {
		self.max_depth = Some(max_depth);
		self
	}
}

/// Codec for brewnet form descriptors
#[derive(Debug, Clone)]
pub struct FormCodec {
	settings: FormSettings,
	registry: Arc<CodecRegistry>,
}

impl Default for FormCodec {
	fn default() -> Self {
		Self {
			settings: FormSettings::default(),
			registry: default_registry(),
		}
	}
}

impl FormCodec {
	/// Creates a codec backed by the process-wide default registry
	///
	/// Fails with [`CodecError::Settings`] when the settings are invalid.
	///
	/// # Examples
	///
	/// ```
	/// use brewnet_codecs::{CodecError, FormCodec, FormSettings};
	///
	/// assert!(FormCodec::new(FormSettings::default()).is_ok());
	/// assert!(matches!(
	/// 	FormCodec::new(FormSettings::default().with_max_depth(0)),
	/// 	Err(CodecError::Settings(_))
	/// ));
	/// ```
	pub fn new(settings: FormSettings) -> CodecResult<Self> {
		settings.validate()?;
		Ok(Self {
			settings,
			registry: default_registry(),
		})
	}

	/// Uses an explicit registry instead of the default one
	pub fn with_registry(mut self, registry: Arc<CodecRegistry>) -> Self {
		self.registry = registry;
		self
	}

	pub fn settings(&self) -> &FormSettings {
		&self.settings
	}

	pub fn registry(&self) -> &Arc<CodecRegistry> {
		&self.registry
	}

	/// Full media type served when nothing else was negotiated
	///
	/// # Examples
	///
	/// ```
	/// use brewnet_codecs::FormCodec;
	///
	/// assert_eq!(FormCodec::default().content_type(), "application/vnd.brewnet.form+json");
	/// ```
	pub fn content_type(&self) -> String {
		format!("{}+{}", BASE_MIME_TYPE, self.settings.default_format)
	}

	pub fn file_extension(&self) -> &'static str {
		FILE_EXTENSION
	}

	/// Media types this codec can produce, the default first
	pub fn supported_types(&self) -> Vec<String> {
		let default = self.content_type();
		let mut types = vec![default.clone()];
		for media_type in self.registry.media_types() {
			let Some(format) = media_type.strip_prefix("application/") else {
				continue;
			};
			let candidate = format!("{}+{}", BASE_MIME_TYPE, format);
			if candidate != default {
				types.push(candidate);
			}
		}
		types
	}

	/// Whether a content type names this codec, whatever its format suffix.
	///
	/// The comparison is exact and case-sensitive.
	///
	/// # Examples
	///
	/// ```
	/// use brewnet_codecs::FormCodec;
	///
	/// let codec = FormCodec::default();
	/// assert!(codec.content_type_supported("application/vnd.brewnet.form+json"));
	/// assert!(codec.content_type_supported("application/vnd.brewnet.form"));
	/// assert!(!codec.content_type_supported("application/json"));
	/// ```
	pub fn content_type_supported(&self, content_type: &str) -> bool {
		let base = content_type
			.split_once('+')
			.map_or(content_type, |(base, _)| base);
		base == BASE_MIME_TYPE
	}

	/// Whether a negotiated media type can be served
	///
	/// The category must be `application` and the subtype either `*` or
	/// `vnd.brewnet.form` with any suffix.
	pub fn accepts(&self, media_type: &MediaType) -> bool {
		media_type.type_.eq_ignore_ascii_case(MIME_CATEGORY)
			&& (media_type.subtype == "*"
				|| media_type.base_subtype().eq_ignore_ascii_case(BASE_SUBTYPE))
	}

	/// Resolves the delegate codec for a negotiated media type
	///
	/// The suffix selects `application/<suffix>`; without a suffix, or with a
	/// wildcard, the configured default format is used.
	pub fn delegate_for(&self, media_type: &MediaType) -> CodecResult<Arc<dyn Codec>> {
		let format = match media_type.suffix() {
			Some(suffix) if !suffix.is_empty() && suffix != "*" => suffix,
			_ => self.settings.default_format.as_str(),
		};
		let delegate_type = format!("{}/{}", MIME_CATEGORY, format);
		debug!(media_type = %media_type, delegate = %delegate_type, "Resolving form delegate");
		self.registry.resolve(&delegate_type)
	}

	/// Picks the media type to serve for an Accept header
	///
	/// Returns the first acceptable entry, by quality, that has a registered
	/// delegate. A wildcard subtype is replaced by the default content type
	/// while keeping its parameters.
	pub fn negotiate(&self, accept_header: &str) -> Option<MediaType> {
		AcceptHeader::parse(accept_header)
			.media_types
			.into_iter()
			.filter(|accepted| accepted.quality > 0.0 && self.accepts(accepted))
			.map(|accepted| self.concrete(accepted))
			.find(|candidate| self.delegate_for(candidate).is_ok())
	}

	/// Derives the form descriptor that [`FormCodec::marshal`] would encode
	pub fn describe<T: FormTarget + ?Sized>(
		&self,
		value: &T,
		options: &MarshalOptions,
	) -> CodecResult<FormDescriptor> {
		let matched = self.matched_type(options)?;
		self.descriptor(value, options, &matched)
	}

	/// Derives the form descriptor for `value` and encodes it with the
	/// delegate selected by `options.matched_type`
	pub fn marshal<T: FormTarget + ?Sized>(
		&self,
		value: &T,
		options: &MarshalOptions,
	) -> CodecResult<Bytes> {
		let matched = self.matched_type(options)?;
		let delegate = self.delegate_for(&matched)?;
		let descriptor = self.descriptor(value, options, &matched)?;
		debug!(
			media_type = %matched,
			action = %descriptor.action,
			method = %descriptor.method,
			fields = descriptor.fields.len(),
			"Marshaling form descriptor"
		);
		delegate.marshal(&descriptor.to_value())
	}

	/// Decoding form descriptors back into values is not supported
	pub fn unmarshal(&self, _data: &[u8]) -> CodecResult<Value> {
		Err(CodecError::NotImplemented("Unmarshal"))
	}

	/// A sample descriptor documenting the output format
	pub fn example() -> FormDescriptor {
		FormDescriptor::new("https://path/to/endpoint", "POST")
			.with_field(
				"name",
				FieldDescriptor::new("Name", InputKind::Text).required(true),
			)
			.with_field(
				"address.street1",
				FieldDescriptor::new("Address Line 1", InputKind::Text),
			)
			.with_field(
				"address.street2",
				FieldDescriptor::new("Address Line 2", InputKind::Text),
			)
	}

	fn matched_type(&self, options: &MarshalOptions) -> CodecResult<MediaType> {
		let matched = match &options.matched_type {
			Some(raw) => MediaType::parse(raw)
				.ok_or_else(|| CodecError::InvalidMediaType(raw.clone()))?,
			None => MediaType::new(
				MIME_CATEGORY,
				format!("{}+{}", BASE_SUBTYPE, self.settings.default_format),
			),
		};
		if !self.accepts(&matched) {
			return Err(CodecError::InvalidMediaType(matched.to_string()));
		}
		Ok(matched)
	}

	fn concrete(&self, accepted: MediaType) -> MediaType {
		if accepted.subtype != "*" {
			return accepted;
		}
		let mut concrete = MediaType::new(
			MIME_CATEGORY,
			format!("{}+{}", BASE_SUBTYPE, self.settings.default_format),
		);
		concrete.parameters = accepted.parameters;
		concrete.quality = accepted.quality;
		concrete
	}

	fn descriptor<T: FormTarget + ?Sized>(
		&self,
		value: &T,
		options: &MarshalOptions,
		matched: &MediaType,
	) -> CodecResult<FormDescriptor> {
		let method = options
			.http_method
			.clone()
			.or_else(|| matched.parameter(METHOD_PARAMETER).map(str::to_string))
			.unwrap_or_else(|| self.settings.default_method.clone());
		let action = format!("{}{}", self.settings.trimmed_domain(), options.request_path);
		let derive = DeriveOptions::default()
			.with_max_depth(options.max_depth.unwrap_or(self.settings.max_depth));

		let assemble_options = AssembleOptions {
			action,
			method,
			derive,
		};
		Ok(assemble(value, &assemble_options)?)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use brewnet_forms::Form;
	use rstest::{fixture, rstest};

	#[derive(Form)]
	struct Ping {
		#[request("message,required")]
		message: String,
	}

	#[fixture]
	fn codec() -> FormCodec {
		FormCodec::new(FormSettings::new("https://api.example.com/"))
			.unwrap()
			.with_registry(Arc::new(CodecRegistry::with_defaults()))
	}

	#[rstest]
	#[case(FormSettings::default().with_max_depth(0))]
	#[case(FormSettings::default().with_default_format(""))]
	#[case(FormSettings::default().with_default_method("  "))]
	fn test_new_rejects_invalid_settings(#[case] settings: FormSettings) {
		// Act
		let result = FormCodec::new(settings);

		// Assert
		assert!(matches!(result, Err(CodecError::Settings(_))));
	}

	#[rstest]
	fn test_constants(codec: FormCodec) {
		assert_eq!(codec.content_type(), "application/vnd.brewnet.form+json");
		assert_eq!(codec.file_extension(), ".brewform");
	}

	#[rstest]
	fn test_supported_types_lists_default_first(codec: FormCodec) {
		assert_eq!(
			codec.supported_types(),
			vec![
				"application/vnd.brewnet.form+json",
				"application/vnd.brewnet.form+yaml",
			]
		);
	}

	#[rstest]
	#[case("application/vnd.brewnet.form+json", true)]
	#[case("application/vnd.brewnet.form+yaml", true)]
	#[case("application/vnd.brewnet.form", true)]
	#[case("application/vnd.brewnet.form+json; charset=utf-8", true)]
	#[case("Application/vnd.brewnet.form+json", false)]
	#[case("application/vnd.brewnet.form; charset=utf-8", false)]
	#[case("application/json", false)]
	fn test_content_type_supported(
		codec: FormCodec,
		#[case] content_type: &str,
		#[case] expected: bool,
	) {
		assert_eq!(codec.content_type_supported(content_type), expected);
	}

	#[rstest]
	#[case("application/*", true)]
	#[case("application/vnd.brewnet.form+json", true)]
	#[case("application/vnd.brewnet.form+yaml", true)]
	#[case("*/*", false)]
	#[case("text/vnd.brewnet.form+json", false)]
	#[case("application/json", false)]
	fn test_accepts(codec: FormCodec, #[case] raw: &str, #[case] expected: bool) {
		let media_type = MediaType::parse(raw).unwrap();

		assert_eq!(codec.accepts(&media_type), expected);
	}

	#[rstest]
	#[case("application/vnd.brewnet.form+json", "json")]
	#[case("application/vnd.brewnet.form+yaml", "yaml")]
	#[case("application/vnd.brewnet.form", "json")]
	#[case("application/*", "json")]
	#[case("application/vnd.brewnet.form+*", "json")]
	fn test_delegate_for(codec: FormCodec, #[case] raw: &str, #[case] format: &str) {
		let media_type = MediaType::parse(raw).unwrap();

		let delegate = codec.delegate_for(&media_type).unwrap();

		assert_eq!(delegate.format(), format);
	}

	#[rstest]
	fn test_delegate_for_unknown_suffix(codec: FormCodec) {
		let media_type = MediaType::parse("application/vnd.brewnet.form+xml").unwrap();

		let result = codec.delegate_for(&media_type);

		assert!(matches!(
			result,
			Err(CodecError::DelegateResolution { media_type }) if media_type == "application/xml"
		));
	}

	#[rstest]
	#[case("application/vnd.brewnet.form+yaml", Some("vnd.brewnet.form+yaml"))]
	#[case("application/vnd.brewnet.form+xml, application/vnd.brewnet.form+yaml;q=0.2", Some("vnd.brewnet.form+yaml"))]
	#[case("text/html, application/*;q=0.5", Some("vnd.brewnet.form+json"))]
	#[case("application/vnd.brewnet.form+yaml;q=0, application/json", None)]
	#[case("text/html, */*", None)]
	fn test_negotiate(codec: FormCodec, #[case] accept: &str, #[case] expected: Option<&str>) {
		let negotiated = codec.negotiate(accept);

		assert_eq!(negotiated.as_ref().map(|m| m.subtype.as_str()), expected);
	}

	#[rstest]
	fn test_negotiate_keeps_parameters_of_wildcard(codec: FormCodec) {
		let negotiated = codec.negotiate("application/*; method=PUT").unwrap();

		assert_eq!(negotiated.parameter("method"), Some("PUT"));
		assert_eq!(negotiated.essence(), "application/vnd.brewnet.form+json");
	}

	#[rstest]
	fn test_unmarshal_is_not_implemented(codec: FormCodec) {
		let result = codec.unmarshal(br#"{"action":"/x"}"#);

		let Err(error) = result else {
			panic!("unmarshal must fail");
		};
		assert!(matches!(error, CodecError::NotImplemented(_)));
		assert_eq!(error.to_string(), "Unmarshal is currently a stub");
	}

	#[rstest]
	fn test_example_shape() {
		let value = FormCodec::example().to_value();

		assert_eq!(value["action"], "https://path/to/endpoint");
		assert_eq!(value["fields"]["name"]["required"], true);
		assert_eq!(value["fields"]["address.street2"]["label"], "Address Line 2");
	}

	#[rstest]
	#[case("application/json")]
	#[case("not-a-media-type")]
	fn test_marshal_rejects_foreign_matched_type(codec: FormCodec, #[case] raw: &str) {
		// Arrange
		let options = MarshalOptions::new("/x").with_matched_type(raw);

		// Act
		let result = codec.marshal(&Ping { message: String::new() }, &options);

		// Assert
		assert!(matches!(result, Err(CodecError::InvalidMediaType(_))));
	}
}
