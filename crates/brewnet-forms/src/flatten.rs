//! Record flattening
//!
//! Walks a [`RecordShape`] and produces one [`FieldDescriptor`] per leaf,
//! keyed by its dotted path. Nested records extend the path prefix, embedded
//! records merge into the enclosing one, and declarations short-circuit the
//! walk wherever they appear.

use crate::annotation::FieldMetadata;
use crate::assemble::DeriveOptions;
use crate::descriptor::{FieldDescriptor, FieldMap};
use crate::error::{FormError, FormResult};
use crate::kind::{ValueKind, input_kind};
use crate::shape::{Declaration, FieldShape, RecordShape, Shape};
use indexmap::map::Entry;
use std::collections::HashSet;
use tracing::{trace, warn};

/// Flatten a record into its field map, prefixing every path with `prefix`.
pub fn flatten_record(
	prefix: &str,
	record: &RecordShape,
	options: &DeriveOptions,
) -> FormResult<FieldMap> {
	Flattener::new(options).record(prefix, record)
}

struct Flattener<'a> {
	options: &'a DeriveOptions,
	/// Record types currently being expanded, outermost first
	ancestors: Vec<&'static str>,
}

impl<'a> Flattener<'a> {
	fn new(options: &'a DeriveOptions) -> Self {
		Self {
			options,
			ancestors: Vec::new(),
		}
	}

	fn record(&mut self, prefix: &str, record: &RecordShape) -> FormResult<FieldMap> {
		let path = prefix.trim_end_matches('.');
		if self.ancestors.contains(&record.type_name) {
			return Err(FormError::CyclicRecord {
				path: path.to_string(),
				type_name: record.type_name.to_string(),
			});
		}
		if self.ancestors.len() >= self.options.max_depth {
			return Err(FormError::DepthExceeded {
				path: path.to_string(),
				limit: self.options.max_depth,
			});
		}

		self.ancestors.push(record.type_name);
		let fields = self.fields(prefix, record);
		self.ancestors.pop();
		fields
	}

	fn fields(&mut self, prefix: &str, record: &RecordShape) -> FormResult<FieldMap> {
		let mut merged = Merge::default();

		for field in &record.fields {
			if field.embedded {
				let inherited = self.embedded(prefix, field)?;
				merged.inherit(inherited);
				continue;
			}

			let metadata = FieldMetadata::resolve(field.ident, &field.annotations);
			if metadata.is_skipped() {
				trace!(record = record.type_name, field = field.ident, "Skipping form field");
				continue;
			}

			let path = format!("{prefix}{}", metadata.name);
			self.field(&path, &metadata, (field.shape)(), &mut merged)?;
		}

		Ok(merged.fields)
	}

	/// Expand an embedded field under the enclosing prefix
	fn embedded(&mut self, prefix: &str, field: &FieldShape) -> FormResult<FieldMap> {
		let path = format!("{prefix}{}", field.ident.trim_start_matches("r#"));
		let mut shape = (field.shape)();
		let mut steps = 0;

		loop {
			match shape {
				Shape::Declared(Declaration::Fields(declare)) => return Ok(declare(prefix)),
				Shape::Record(record) => return self.record(prefix, &record),
				Shape::Indirect(next) => {
					self.step(&path, &mut steps)?;
					shape = next();
				}
				other => {
					return Err(FormError::InvalidEmbed {
						path,
						found: other.describe(),
					});
				}
			}
		}
	}

	fn field(
		&mut self,
		path: &str,
		metadata: &FieldMetadata,
		mut shape: Shape,
		merged: &mut Merge,
	) -> FormResult<()> {
		let mut steps = 0;

		loop {
			match shape {
				Shape::Declared(Declaration::Fields(declare)) => {
					for (nested_path, descriptor) in declare(&format!("{path}.")) {
						merged.insert(nested_path, descriptor);
					}
					return Ok(());
				}
				Shape::Declared(Declaration::ValueType(substitute)) => {
					let kind = self.substitute_kind(path, substitute())?;
					return self.leaf(path, metadata, kind, merged);
				}
				Shape::Indirect(next) => {
					self.step(path, &mut steps)?;
					shape = next();
				}
				Shape::Record(record) => {
					let nested = self.record(&format!("{path}."), &record)?;
					for (nested_path, descriptor) in nested {
						merged.insert(nested_path, descriptor);
					}
					return Ok(());
				}
				Shape::Leaf(kind) => return self.leaf(path, metadata, kind, merged),
			}
		}
	}

	fn leaf(
		&self,
		path: &str,
		metadata: &FieldMetadata,
		kind: ValueKind,
		merged: &mut Merge,
	) -> FormResult<()> {
		let input_type = input_kind(kind).map_err(|e| FormError::UnsupportedKind {
			path: path.to_string(),
			kind: e.kind,
		})?;
		trace!(path, kind = %kind, input_type = input_type.as_str(), "Derived form field");
		merged.insert(
			path.to_string(),
			FieldDescriptor::from_metadata(path, metadata, input_type),
		);
		Ok(())
	}

	/// Dereference a value-type substitute down to its primitive kind
	fn substitute_kind(&self, path: &str, mut shape: Shape) -> FormResult<ValueKind> {
		let mut steps = 0;

		loop {
			match shape {
				Shape::Leaf(kind) => return Ok(kind),
				Shape::Indirect(next) | Shape::Declared(Declaration::ValueType(next)) => {
					self.step(path, &mut steps)?;
					shape = next();
				}
				Shape::Record(record) => {
					return Err(FormError::UnsupportedKind {
						path: path.to_string(),
						kind: ValueKind::Opaque(record.type_name),
					});
				}
				Shape::Declared(Declaration::Fields(_)) => {
					return Err(FormError::UnsupportedKind {
						path: path.to_string(),
						kind: ValueKind::Opaque("field declaration"),
					});
				}
			}
		}
	}

	/// Count one dereference, bounded by the depth limit
	fn step(&self, path: &str, steps: &mut usize) -> FormResult<()> {
		*steps += 1;
		if *steps > self.options.max_depth {
			return Err(FormError::DepthExceeded {
				path: path.to_string(),
				limit: self.options.max_depth,
			});
		}
		Ok(())
	}
}

/// Field map under construction for one record
///
/// Fields declared directly on the record take precedence over fields merged
/// in from embedded records, whatever their order. Among direct fields the
/// first one to claim a path keeps it; among embedded fields likewise.
#[derive(Default)]
struct Merge {
	fields: FieldMap,
	inherited: HashSet<String>,
}

impl Merge {
	fn insert(&mut self, path: String, descriptor: FieldDescriptor) {
		if self.inherited.remove(&path) {
			self.fields.insert(path, descriptor);
			return;
		}
		match self.fields.entry(path) {
			Entry::Occupied(entry) => {
				warn!(path = %entry.key(), "Duplicate form field path, keeping the first declaration");
			}
			Entry::Vacant(entry) => {
				entry.insert(descriptor);
			}
		}
	}

	fn inherit(&mut self, fields: FieldMap) {
		for (path, descriptor) in fields {
			if let Entry::Vacant(entry) = self.fields.entry(path) {
				self.inherited.insert(entry.key().clone());
				entry.insert(descriptor);
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::kind::InputKind;
	use crate::shape::{FieldShape, FormValue};
	use rstest::{fixture, rstest};

	struct Address;

	impl FormValue for Address {
		fn form_shape() -> Shape {
			Shape::Record(
				RecordShape::new("Address")
					.field(
						FieldShape::new("street", <String as FormValue>::form_shape)
							.request("street1,required,label=Address Line 1"),
					)
					.field(FieldShape::new("zip_code", <Option<u32> as FormValue>::form_shape)),
			)
		}
	}

	struct Node;

	impl FormValue for Node {
		fn form_shape() -> Shape {
			Shape::Record(
				RecordShape::new("Node")
					.field(FieldShape::new("value", <i64 as FormValue>::form_shape))
					.field(FieldShape::new("next", <Option<Box<Node>> as FormValue>::form_shape)),
			)
		}
	}

	#[fixture]
	fn options() -> DeriveOptions {
		DeriveOptions::default()
	}

	fn record_of<T: FormValue>() -> RecordShape {
		match T::form_shape() {
			Shape::Record(record) => record,
			other => panic!("expected record, got {other:?}"),
		}
	}

	#[rstest]
	fn test_nested_record_uses_dotted_paths(options: DeriveOptions) {
		// Arrange
		let record = RecordShape::new("Person")
			.field(FieldShape::new("name", <String as FormValue>::form_shape).request("name,required"))
			.field(FieldShape::new("address", <Address as FormValue>::form_shape));

		// Act
		let fields = flatten_record("", &record, &options).unwrap();

		// Assert
		let paths: Vec<_> = fields.keys().map(String::as_str).collect();
		assert_eq!(paths, vec!["name", "address.street1", "address.zip_code"]);
		assert_eq!(fields["address.street1"].label, "Address Line 1");
		assert!(fields["address.street1"].required);
		assert_eq!(fields["address.zip_code"].label, "Address.Zip Code");
		assert_eq!(fields["address.zip_code"].input_type, InputKind::Number);
	}

	#[rstest]
	fn test_prefix_is_prepended(options: DeriveOptions) {
		let fields = flatten_record("billing.", &record_of::<Address>(), &options).unwrap();

		assert!(fields.contains_key("billing.street1"));
		assert_eq!(fields["billing.zip_code"].label, "Billing.Zip Code");
	}

	#[rstest]
	fn test_skipped_field_is_absent(options: DeriveOptions) {
		let record = RecordShape::new("Account")
			.field(FieldShape::new("login", <String as FormValue>::form_shape))
			.field(FieldShape::new("password_hash", <String as FormValue>::form_shape).request("-"));

		let fields = flatten_record("", &record, &options).unwrap();

		assert_eq!(fields.len(), 1);
		assert!(fields.contains_key("login"));
	}

	#[rstest]
	fn test_unsupported_kind_reports_path(options: DeriveOptions) {
		// Arrange
		let record = RecordShape::new("Post")
			.field(FieldShape::new("title", <String as FormValue>::form_shape))
			.field(FieldShape::new("tags", <Vec<String> as FormValue>::form_shape));

		// Act
		let result = flatten_record("", &record, &options);

		// Assert
		assert_eq!(
			result,
			Err(FormError::UnsupportedKind {
				path: "tags".to_string(),
				kind: ValueKind::Sequence,
			})
		);
	}

	#[rstest]
	fn test_embedded_fields_lose_to_own_fields(options: DeriveOptions) {
		// Arrange
		let record = RecordShape::new("Shipment")
			.field(FieldShape::new("street", <bool as FormValue>::form_shape).request("street1"))
			.field(FieldShape::new("address", <Address as FormValue>::form_shape).embedded());

		// Act
		let fields = flatten_record("", &record, &options).unwrap();

		// Assert
		let paths: Vec<_> = fields.keys().map(String::as_str).collect();
		assert_eq!(paths, vec!["street1", "zip_code"]);
		assert_eq!(fields["street1"].input_type, InputKind::Checkbox);
	}

	#[rstest]
	fn test_own_field_after_embed_replaces_inherited(options: DeriveOptions) {
		let record = RecordShape::new("Shipment")
			.field(FieldShape::new("address", <Address as FormValue>::form_shape).embedded())
			.field(FieldShape::new("zip", <String as FormValue>::form_shape).request("zip_code"));

		let fields = flatten_record("", &record, &options).unwrap();

		assert_eq!(fields.len(), 2);
		assert_eq!(fields["zip_code"].input_type, InputKind::Text);
	}

	#[rstest]
	fn test_duplicate_own_paths_keep_first(options: DeriveOptions) {
		let record = RecordShape::new("Dup")
			.field(FieldShape::new("first", <bool as FormValue>::form_shape).request("value"))
			.field(FieldShape::new("second", <String as FormValue>::form_shape).request("value"));

		let fields = flatten_record("", &record, &options).unwrap();

		assert_eq!(fields.len(), 1);
		assert_eq!(fields["value"].input_type, InputKind::Checkbox);
	}

	#[rstest]
	fn test_embedding_a_leaf_is_rejected(options: DeriveOptions) {
		let record = RecordShape::new("Bad")
			.field(FieldShape::new("count", <u8 as FormValue>::form_shape).embedded());

		let result = flatten_record("", &record, &options);

		assert_eq!(
			result,
			Err(FormError::InvalidEmbed {
				path: "count".to_string(),
				found: "kind `u8`".to_string(),
			})
		);
	}

	#[rstest]
	fn test_self_referential_record_is_cyclic(options: DeriveOptions) {
		// Act
		let result = flatten_record("", &record_of::<Node>(), &options);

		// Assert
		assert_eq!(
			result,
			Err(FormError::CyclicRecord {
				path: "next".to_string(),
				type_name: "Node".to_string(),
			})
		);
	}

	#[rstest]
	fn test_depth_limit() {
		// Arrange
		let options = DeriveOptions::default().with_max_depth(1);
		let record = RecordShape::new("Person")
			.field(FieldShape::new("address", <Address as FormValue>::form_shape));

		// Act
		let result = flatten_record("", &record, &options);

		// Assert
		assert_eq!(
			result,
			Err(FormError::DepthExceeded {
				path: "address".to_string(),
				limit: 1,
			})
		);
	}

	#[rstest]
	fn test_declared_fields_receive_prefix(options: DeriveOptions) {
		// Arrange
		fn coordinates(prefix: &str) -> FieldMap {
			let mut fields = FieldMap::new();
			fields.insert(
				format!("{prefix}lat"),
				FieldDescriptor::new("Latitude", InputKind::Number),
			);
			fields
		}
		let record = RecordShape::new("Place").field(FieldShape::new("position", || {
			Shape::Declared(Declaration::Fields(coordinates))
		}));

		// Act
		let fields = flatten_record("", &record, &options).unwrap();

		// Assert
		assert_eq!(fields.keys().collect::<Vec<_>>(), vec!["position.lat"]);
		assert_eq!(fields["position.lat"].label, "Latitude");
	}

	#[rstest]
	fn test_value_type_substitute_is_dereferenced(options: DeriveOptions) {
		let record = RecordShape::new("Profile").field(FieldShape::new("email", || {
			Shape::Declared(Declaration::ValueType(<Option<String> as FormValue>::form_shape))
		}));

		let fields = flatten_record("", &record, &options).unwrap();

		assert_eq!(fields["email"].input_type, InputKind::Text);
	}

	#[rstest]
	fn test_value_type_substitute_must_be_primitive(options: DeriveOptions) {
		let record = RecordShape::new("Profile").field(FieldShape::new("tags", || {
			Shape::Declared(Declaration::ValueType(<Vec<String> as FormValue>::form_shape))
		}));

		let result = flatten_record("", &record, &options);

		assert_eq!(
			result,
			Err(FormError::UnsupportedKind {
				path: "tags".to_string(),
				kind: ValueKind::Sequence,
			})
		);
	}
}
