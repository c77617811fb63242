//! Procedural macros for brewnet form derivation
//!
//! - `#[derive(Form)]` - Describe a struct's fields for form derivation

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod crate_paths;
mod form_derive;

/// Derive `FormValue` and `FormTarget` for a struct with named fields
///
/// # Example
///
/// ```ignore
/// use brewnet_forms::Form;
///
/// #[derive(Form)]
/// struct Address {
///     #[request("street1,required,label=Address Line 1")]
///     street: String,
///     #[request("-")]
///     internal_id: u64,
/// }
/// ```
///
/// # Field attributes
///
/// - `#[request("name,opt,key=value")]` - Exposed name and options
/// - `#[response("name")]` - Name fallback
/// - `#[db("name")]` - Name fallback
/// - `#[form(embed)]` - Merge the nested record's fields into this one
///
/// # Container attributes
///
/// - `#[form(custom_path)]` - Do not generate `FormTarget`; implement it by
///   hand to supply an action path
#[proc_macro_derive(Form, attributes(request, response, db, form))]
pub fn derive_form(input: TokenStream) -> TokenStream {
	let input = parse_macro_input!(input as DeriveInput);

	form_derive::form_derive_impl(input)
		.unwrap_or_else(|e| e.to_compile_error())
		.into()
}
