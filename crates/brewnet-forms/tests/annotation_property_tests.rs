//! Annotation property-based tests
//!
//! Property-based tests for annotation parsing and label generation.

use brewnet_forms::annotation::{FieldAnnotations, FieldMetadata, OptionValue};
use brewnet_forms::auto_label;
use proptest::prelude::*;

// ============================================================================
// Property-Based Tests: FieldMetadata::parse
// ============================================================================

proptest! {
	/// Test: parsing never panics
	///
	/// Category: Fuzz
	#[test]
	fn prop_parse_arbitrary_input(input in ".*") {
		let metadata = FieldMetadata::parse(&input);

		prop_assert!(input.starts_with(&metadata.name));
		prop_assert!(!metadata.name.contains(','));
	}

	/// Test: name and options are recovered from a well-formed annotation
	///
	/// Category: Property
	#[test]
	fn prop_parse_well_formed(
		name in "[a-z_]{1,12}",
		flags in prop::collection::btree_set("[a-z]{1,8}", 0..4),
		values in prop::collection::btree_map("[A-Z]{1,8}", "[a-zA-Z0-9 ]{0,12}", 0..4),
	) {
		let mut annotation = name.clone();
		for flag in &flags {
			annotation.push(',');
			annotation.push_str(flag);
		}
		for (key, value) in &values {
			annotation.push_str(&format!(",{key}={value}"));
		}

		let metadata = FieldMetadata::parse(&annotation);

		prop_assert_eq!(&metadata.name, &name);
		prop_assert_eq!(metadata.options.len(), flags.len() + values.len());
		for flag in &flags {
			prop_assert_eq!(metadata.options.get(flag), Some(&OptionValue::Flag(true)));
		}
		for (key, value) in &values {
			prop_assert_eq!(metadata.options.get(key), Some(&OptionValue::Text(value.clone())));
		}
	}

	/// Test: a resolved name is never empty or the skip marker unless requested
	///
	/// Category: Property
	#[test]
	fn prop_resolve_falls_back_to_identifier(
		ident in "[A-Za-z][A-Za-z0-9_]{0,12}",
		response in prop_oneof![Just(""), Just("-"), Just(",omitempty")],
		db in prop_oneof![Just(""), Just("-"), Just(",pk")],
	) {
		let annotations = FieldAnnotations {
			request: "",
			response,
			db,
		};

		let metadata = FieldMetadata::resolve(&ident, &annotations);

		prop_assert_eq!(metadata.name, ident.to_lowercase());
	}
}

// ============================================================================
// Property-Based Tests: auto_label
// ============================================================================

proptest! {
	/// Test: labels keep the character count of paths without underscores
	///
	/// Category: Property
	#[test]
	fn prop_label_preserves_ascii_length(path in "[a-z0-9_.]{0,30}") {
		let label = auto_label(&path);

		prop_assert_eq!(label.len(), path.len());
		prop_assert!(!label.contains('_'));
	}

	/// Test: every dotted segment starts with an uppercase letter
	///
	/// Category: Property
	#[test]
	fn prop_label_capitalizes_segments(segments in prop::collection::vec("[a-z]{1,8}", 1..5)) {
		let path = segments.join(".");

		let label = auto_label(&path);

		for segment in label.split('.') {
			let first = segment.chars().next().unwrap();
			prop_assert!(first.is_ascii_uppercase());
		}
	}
}
