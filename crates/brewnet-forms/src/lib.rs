//! Form descriptor derivation for brewnet
//!
//! This crate turns an annotated record type into a [`FormDescriptor`]: the
//! endpoint a form submits to, the method it uses, and one input descriptor
//! per leaf field, keyed by its dotted path.
//!
//! ## Field annotations
//!
//! - `#[request("name,required,label=Text")]` names the field and sets its options
//! - `#[response("name")]` and `#[db("name")]` are fallbacks for the name
//! - `#[request("-")]` removes the field from the form
//! - `#[form(embed)]` merges a nested record's fields into the enclosing one
//!
//! ## Example
//!
//! ```
//! use brewnet_forms::{AssembleOptions, Form, InputKind, assemble};
//!
//! #[derive(Form)]
//! struct Address {
//! 	#[request("street1,required,label=Address Line 1")]
//! 	street: String,
//! }
//!
//! #[derive(Form)]
//! struct Person {
//! 	#[request("name,required")]
//! 	name: String,
//! 	#[request("address")]
//! 	address: Address,
//! }
//!
//! let person = Person {
//! 	name: "Ada".to_string(),
//! 	address: Address { street: "1 Loop".to_string() },
//! };
//! let form = assemble(&person, &AssembleOptions::new("/submit")).unwrap();
//!
//! assert_eq!(form.action, "/submit");
//! assert_eq!(form.method, "POST");
//! assert_eq!(form.fields["name"].label, "Name");
//! assert_eq!(form.fields["address.street1"].label, "Address Line 1");
//! assert_eq!(form.fields["address.street1"].input_type, InputKind::Text);
//! ```

extern crate self as brewnet_forms;

pub mod annotation;
pub mod assemble;
pub mod descriptor;
pub mod error;
pub mod flatten;
pub mod kind;
pub mod shape;

pub use annotation::{FieldAnnotations, FieldMetadata, OptionValue};
pub use assemble::{
	AssembleOptions, DEFAULT_MAX_DEPTH, DEFAULT_METHOD, DeriveOptions, assemble, derive_fields,
	describe,
};
pub use descriptor::{FieldDescriptor, FieldMap, FormDescriptor, auto_label};
pub use error::{FormError, FormResult};
pub use flatten::flatten_record;
pub use kind::{InputKind, UnsupportedKindError, ValueKind, input_kind};
pub use shape::{
	Declaration, DeclareFieldsFn, FieldShape, FormTarget, FormValue, RecordShape, Shape, ShapeFn,
};

/// Derive [`FormValue`] (and [`FormTarget`] unless `#[form(custom_path)]`)
pub use brewnet_forms_macros::Form;
