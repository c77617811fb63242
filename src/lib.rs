//! # Brewnet
//!
//! Form descriptors derived from typed records, served through
//! content-negotiated codecs.
//!
//! A record type annotated with `#[derive(Form)]` describes a form: every
//! leaf field becomes an input keyed by its dotted path, with a label, a
//! required flag and an input type. The [`codecs::FormCodec`] wraps the
//! descriptor with its submission endpoint and method and encodes it for
//! `application/vnd.brewnet.form+json` (or any other registered format).
//!
//! ## Feature Flags
//!
//! - `forms` - Form derivation ([`forms`])
//! - `codecs` - Content negotiation and encoding ([`codecs`]), implies `forms`
//! - `full` (default) - Everything
//!
//! ## Quick Example
//!
//! ```
//! use brewnet::prelude::*;
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
//! 	address: Address,
//! }
//!
//! let person = Person {
//! 	name: "Ada".to_string(),
//! 	address: Address { street: "1 Loop".to_string() },
//! };
//!
//! let codec = FormCodec::new(FormSettings::new("https://api.example.com")).unwrap();
//! let body = codec.marshal(&person, &MarshalOptions::new("/people")).unwrap();
//! let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
//!
//! assert_eq!(value["action"], "https://api.example.com/people");
//! assert_eq!(value["fields"]["address.street1"]["label"], "Address Line 1");
//! ```

#[cfg(feature = "forms")]
pub use brewnet_forms as forms;

#[cfg(feature = "codecs")]
pub use brewnet_codecs as codecs;

#[cfg(feature = "forms")]
pub use brewnet_forms::Form;

/// Commonly used types
pub mod prelude {
	#[cfg(feature = "forms")]
	pub use brewnet_forms::{
		AssembleOptions, DeriveOptions, FieldDescriptor, Form, FormDescriptor, FormError,
		FormResult, FormTarget, FormValue, InputKind, assemble, describe,
	};

	#[cfg(feature = "codecs")]
	pub use brewnet_codecs::{
		Codec, CodecError, CodecRegistry, CodecResult, FormCodec, FormSettings, MarshalOptions,
		MediaType,
	};
}
