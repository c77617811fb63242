//! Form and field descriptors

use crate::annotation::{AnnotationOptions, FieldMetadata, OptionValue, RESERVED_OPTIONS};
use crate::kind::InputKind;
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Map, Value};

/// Flattened field paths mapped to their descriptors, in derivation order
pub type FieldMap = IndexMap<String, FieldDescriptor>;

/// Input metadata for a single form field
///
/// Extension options from the field annotation are serialized inline next
/// to `label`, `required` and `type`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldDescriptor {
	pub label: String,
	pub required: bool,
	#[serde(rename = "type")]
	pub input_type: InputKind,
	#[serde(flatten)]
	pub options: AnnotationOptions,
}

impl FieldDescriptor {
	/// Create a descriptor with no extension options
	///
	/// # Examples
	///
	/// ```
	/// use brewnet_forms::{FieldDescriptor, InputKind};
	///
	/// let field = FieldDescriptor::new("Name", InputKind::Text).required(true);
	/// assert_eq!(field.label, "Name");
	/// assert!(field.required);
	/// ```
	pub fn new(label: impl Into<String>, input_type: InputKind) -> Self {
		Self {
			label: label.into(),
			required: false,
			input_type,
			options: AnnotationOptions::new(),
		}
	}

	/// Build the descriptor of a field found at `path`
	pub fn from_metadata(path: &str, metadata: &FieldMetadata, input_type: InputKind) -> Self {
		let label = metadata
			.label()
			.map(str::to_string)
			.unwrap_or_else(|| auto_label(path));
		let options = metadata
			.extensions()
			.map(|(key, value)| (key.clone(), value.clone()))
			.collect();

		Self {
			label,
			required: metadata.required(),
			input_type,
			options,
		}
	}

	pub fn required(mut self, required: bool) -> Self {
		self.required = required;
		self
	}

	/// Adds an extension option.
	///
	/// `label`, `required` and `type` have dedicated fields and are ignored
	/// here.
	///
	/// # Examples
	///
	/// ```
	/// use brewnet_forms::{FieldDescriptor, InputKind, OptionValue};
	///
	/// let field = FieldDescriptor::new("Bio", InputKind::Text)
	/// 	.with_option("maxlength", OptionValue::Text("500".to_string()))
	/// 	.with_option("type", OptionValue::Text("textarea".to_string()));
	/// assert_eq!(field.options.len(), 1);
	/// assert_eq!(field.input_type, InputKind::Text);
	/// ```
	pub fn with_option(mut self, key: impl Into<String>, value: OptionValue) -> Self {
		let key = key.into();
		if !RESERVED_OPTIONS.contains(&key.as_str()) {
			self.options.insert(key, value);
		}
		self
	}

	pub fn to_value(&self) -> Value {
		let mut object = Map::new();
		object.insert("label".to_string(), Value::String(self.label.clone()));
		object.insert("required".to_string(), Value::Bool(self.required));
		object.insert(
			"type".to_string(),
			Value::String(self.input_type.as_str().to_string()),
		);
		for (key, value) in &self.options {
			let value = match value {
				OptionValue::Flag(flag) => Value::Bool(*flag),
				OptionValue::Text(text) => Value::String(text.clone()),
			};
			object.entry(key.clone()).or_insert(value);
		}
		Value::Object(object)
	}
}

/// A complete form: target endpoint, method and its fields
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormDescriptor {
	pub action: String,
	pub method: String,
	pub fields: FieldMap,
}

impl FormDescriptor {
	pub fn new(action: impl Into<String>, method: impl Into<String>) -> Self {
		Self {
			action: action.into(),
			method: method.into(),
			fields: FieldMap::new(),
		}
	}

	pub fn with_field(mut self, path: impl Into<String>, field: FieldDescriptor) -> Self {
		self.fields.insert(path.into(), field);
		self
	}

	pub fn field(&self, path: &str) -> Option<&FieldDescriptor> {
		self.fields.get(path)
	}

	/// Convert into the generic value handed to serialization delegates.
	///
	/// Field order is preserved.
	pub fn to_value(&self) -> Value {
		let fields = self
			.fields
			.iter()
			.map(|(path, field)| (path.clone(), field.to_value()))
			.collect::<Map<String, Value>>();

		let mut object = Map::new();
		object.insert("action".to_string(), Value::String(self.action.clone()));
		object.insert("method".to_string(), Value::String(self.method.clone()));
		object.insert("fields".to_string(), Value::Object(fields));
		Value::Object(object)
	}
}

/// Human-readable label derived from a field path.
///
/// Underscores become spaces, then the first letter of every word is
/// uppercased. A word starts after any character that is not a letter, digit
/// or underscore, so `.` also starts a new word.
///
/// # Examples
///
/// ```
/// use brewnet_forms::descriptor::auto_label;
///
/// assert_eq!(auto_label("first_name"), "First Name");
/// assert_eq!(auto_label("address.street1"), "Address.Street1");
/// ```
pub fn auto_label(path: &str) -> String {
	let spaced = path.replace('_', " ");
	let mut label = String::with_capacity(spaced.len());
	let mut previous = ' ';
	for c in spaced.chars() {
		if starts_word(previous) {
			label.extend(c.to_uppercase());
		} else {
			label.push(c);
		}
		previous = c;
	}
	label
}

fn starts_word(previous: char) -> bool {
	if previous.is_ascii() {
		return !(previous.is_ascii_alphanumeric() || previous == '_');
	}
	if previous.is_alphabetic() || previous.is_numeric() {
		return false;
	}
	previous.is_whitespace()
}
