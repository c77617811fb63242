//! Field annotation parsing
//!
//! A field annotation is a comma-separated string: the first segment is the
//! field's exposed name and every following segment is either a bare flag
//! (`required`) or a `key=value` pair (`label=Address Line 1`).
//!
//! ```
//! use brewnet_forms::annotation::{FieldMetadata, OptionValue};
//!
//! let metadata = FieldMetadata::parse("street1,required,label=Address Line 1");
//! assert_eq!(metadata.name, "street1");
//! assert_eq!(metadata.options.get("required"), Some(&OptionValue::Flag(true)));
//! assert_eq!(metadata.label(), Some("Address Line 1"));
//! ```

use indexmap::IndexMap;
use serde::Serialize;

/// Annotation name that excludes a field from the form
pub const SKIP: &str = "-";

/// Option that overrides the auto-generated label
pub const LABEL_OPTION: &str = "label";

/// Option that marks a field as required
pub const REQUIRED_OPTION: &str = "required";

/// Options that map onto dedicated descriptor properties
pub const RESERVED_OPTIONS: [&str; 3] = [LABEL_OPTION, REQUIRED_OPTION, "type"];

/// Value of a single annotation option
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum OptionValue {
	/// Bare segment such as `required`
	Flag(bool),
	/// `key=value` segment
	Text(String),
}

impl OptionValue {
	/// Interpret the option as a boolean.
	///
	/// Text values `false`, `0`, `no` and `off` read as `false`; any other
	/// text reads as `true`.
	pub fn as_bool(&self) -> bool {
		match self {
			OptionValue::Flag(flag) => *flag,
			OptionValue::Text(text) => !matches!(
				text.trim().to_ascii_lowercase().as_str(),
				"false" | "0" | "no" | "off"
			),
		}
	}

	pub fn as_text(&self) -> Option<&str> {
		match self {
			OptionValue::Text(text) => Some(text),
			OptionValue::Flag(_) => None,
		}
	}
}

/// Ordered option map parsed from an annotation
pub type AnnotationOptions = IndexMap<String, OptionValue>;

/// Raw annotation strings attached to a record field
///
/// An empty string means the annotation is absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldAnnotations {
	/// Request annotation, the primary source of name and options
	pub request: &'static str,
	/// Response annotation, a name fallback
	pub response: &'static str,
	/// Persistence annotation, a name fallback
	pub db: &'static str,
}

/// Name and options parsed from a field annotation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMetadata {
	pub name: String,
	pub options: AnnotationOptions,
}

impl FieldMetadata {
	/// Parse a raw annotation string.
	///
	/// Empty segments after the name are dropped. A repeated key keeps its
	/// first position and its last value.
	pub fn parse(annotation: &str) -> Self {
		let mut segments = annotation.split(',');
		let name = segments.next().unwrap_or_default().to_string();

		let mut options = AnnotationOptions::new();
		for segment in segments {
			if segment.is_empty() {
				continue;
			}
			match segment.split_once('=') {
				Some((key, value)) => {
					options.insert(key.to_string(), OptionValue::Text(value.to_string()));
				}
				None => {
					options.insert(segment.to_string(), OptionValue::Flag(true));
				}
			}
		}

		Self { name, options }
	}

	/// Resolve the metadata of a record field from all of its annotations.
	///
	/// The request annotation supplies the options. When it does not name the
	/// field, the name falls back to the response annotation, then the db
	/// annotation, then the lowercased identifier; the first candidate whose
	/// name segment is neither empty nor `-` wins.
	///
	/// # Examples
	///
	/// ```
	/// use brewnet_forms::annotation::{FieldAnnotations, FieldMetadata};
	///
	/// let annotations = FieldAnnotations {
	/// 	request: ",required",
	/// 	response: "-",
	/// 	db: "user_email",
	/// };
	/// let metadata = FieldMetadata::resolve("Email", &annotations);
	/// assert_eq!(metadata.name, "user_email");
	/// assert!(metadata.required());
	/// ```
	pub fn resolve(ident: &str, annotations: &FieldAnnotations) -> Self {
		let mut metadata = Self::parse(annotations.request);
		if !metadata.name.is_empty() {
			return metadata;
		}

		let lowered = ident.trim_start_matches("r#").to_lowercase();
		for candidate in [annotations.response, annotations.db, lowered.as_str()] {
			if candidate.is_empty() {
				continue;
			}
			metadata.name = name_segment(candidate).to_string();
			if !metadata.name.is_empty() && metadata.name != SKIP {
				break;
			}
		}
		metadata
	}

	/// Whether the field is excluded from the form
	pub fn is_skipped(&self) -> bool {
		self.name == SKIP
	}

	/// Explicit label, ignoring a valueless `label` flag
	pub fn label(&self) -> Option<&str> {
		self.options.get(LABEL_OPTION).and_then(OptionValue::as_text)
	}

	pub fn required(&self) -> bool {
		self.options
			.get(REQUIRED_OPTION)
			.is_some_and(OptionValue::as_bool)
	}

	/// Options without a dedicated descriptor property
	pub fn extensions(&self) -> impl Iterator<Item = (&String, &OptionValue)> {
		self.options
			.iter()
			.filter(|(key, _)| !RESERVED_OPTIONS.contains(&key.as_str()))
	}
}

fn name_segment(annotation: &str) -> &str {
	annotation
		.split_once(',')
		.map_or(annotation, |(name, _)| name)
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_parse_name_and_options() {
		// Act
		let metadata = FieldMetadata::parse("street1,required,label=Address Line 1");

		// Assert
		assert_eq!(metadata.name, "street1");
		assert_eq!(metadata.options.len(), 2);
		assert_eq!(metadata.options["required"], OptionValue::Flag(true));
		assert_eq!(
			metadata.options["label"],
			OptionValue::Text("Address Line 1".to_string())
		);
	}

	#[rstest]
	fn test_parse_splits_on_first_equals() {
		let metadata = FieldMetadata::parse("query,pattern=a=b");

		assert_eq!(
			metadata.options["pattern"],
			OptionValue::Text("a=b".to_string())
		);
	}

	#[rstest]
	#[case("", "")]
	#[case("-", "-")]
	#[case(",required", "")]
	#[case("name", "name")]
	fn test_parse_name_segment(#[case] annotation: &str, #[case] expected: &str) {
		assert_eq!(FieldMetadata::parse(annotation).name, expected);
	}

	#[rstest]
	fn test_parse_drops_empty_segments() {
		let metadata = FieldMetadata::parse("name,,required,");

		assert_eq!(metadata.options.len(), 1);
		assert!(metadata.required());
	}

	#[rstest]
	fn test_parse_repeated_key_keeps_last_value() {
		let metadata = FieldMetadata::parse("name,label=First,placeholder,label=Second");

		let keys: Vec<_> = metadata.options.keys().map(String::as_str).collect();
		assert_eq!(keys, vec!["label", "placeholder"]);
		assert_eq!(metadata.label(), Some("Second"));
	}

	#[rstest]
	#[case(FieldAnnotations { request: "given", response: "resp", db: "col" }, "given")]
	#[case(FieldAnnotations { request: ",required", response: "resp,omitempty", db: "col" }, "resp")]
	#[case(FieldAnnotations { request: "", response: "-", db: "col" }, "col")]
	#[case(FieldAnnotations { request: "", response: ",omitempty", db: "" }, "nickname")]
	#[case(FieldAnnotations { request: "", response: "", db: "-" }, "nickname")]
	#[case(FieldAnnotations::default(), "nickname")]
	fn test_resolve_name_fallback(#[case] annotations: FieldAnnotations, #[case] expected: &str) {
		// Act
		let metadata = FieldMetadata::resolve("NickName", &annotations);

		// Assert
		assert_eq!(metadata.name, expected);
	}

	#[rstest]
	fn test_resolve_keeps_request_options_with_fallback_name() {
		let annotations = FieldAnnotations {
			request: ",required,label=Nick",
			..Default::default()
		};

		let metadata = FieldMetadata::resolve("nick", &annotations);

		assert_eq!(metadata.name, "nick");
		assert!(metadata.required());
		assert_eq!(metadata.label(), Some("Nick"));
	}

	#[rstest]
	fn test_resolve_strips_raw_identifier_prefix() {
		let metadata = FieldMetadata::resolve("r#Type", &FieldAnnotations::default());

		assert_eq!(metadata.name, "type");
	}

	#[rstest]
	fn test_request_skip_is_not_overridden() {
		let annotations = FieldAnnotations {
			request: "-",
			response: "visible",
			..Default::default()
		};

		assert!(FieldMetadata::resolve("secret", &annotations).is_skipped());
	}

	#[rstest]
	#[case("name,required", true)]
	#[case("name,required=true", true)]
	#[case("name,required=yes", true)]
	#[case("name,required=false", false)]
	#[case("name,required=0", false)]
	#[case("name,required=Off", false)]
	#[case("name", false)]
	fn test_required_option(#[case] annotation: &str, #[case] expected: bool) {
		assert_eq!(FieldMetadata::parse(annotation).required(), expected);
	}

	#[rstest]
	fn test_valueless_label_is_ignored() {
		let metadata = FieldMetadata::parse("name,label");

		assert_eq!(metadata.label(), None);
	}

	#[rstest]
	fn test_extensions_exclude_reserved_options() {
		// Arrange
		let metadata =
			FieldMetadata::parse("email,required,label=E-mail,type=password,placeholder=you@host");

		// Act
		let extensions: Vec<_> = metadata.extensions().collect();

		// Assert
		assert_eq!(extensions.len(), 1);
		assert_eq!(extensions[0].0, "placeholder");
		assert_eq!(extensions[0].1, &OptionValue::Text("you@host".to_string()));
	}
}
