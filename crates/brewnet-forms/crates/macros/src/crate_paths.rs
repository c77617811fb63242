//! Crate path resolution for generated code

use proc_macro2::{Span, TokenStream};
use quote::quote;

/// Path to `brewnet_forms`, reached directly or through the `brewnet` facade
pub(crate) fn get_brewnet_forms_crate() -> syn::Result<TokenStream> {
	use proc_macro_crate::{FoundCrate, crate_name};

	match crate_name("brewnet-forms") {
		Ok(FoundCrate::Itself) => Ok(quote!(::brewnet_forms)),
		Ok(FoundCrate::Name(name)) => {
			let ident = syn::Ident::new(&name, Span::call_site());
			Ok(quote!(::#ident))
		}
		Err(_) => match crate_name("brewnet") {
			Ok(FoundCrate::Itself) => Ok(quote!(::brewnet::forms)),
			Ok(FoundCrate::Name(name)) => {
				let ident = syn::Ident::new(&name, Span::call_site());
				Ok(quote!(::#ident::forms))
			}
			Err(e) => Err(syn::Error::new(
				Span::call_site(),
				format!(
					"failed to resolve `brewnet-forms` crate: {}. Ensure `brewnet-forms` or `brewnet` is listed in Cargo.toml dependencies.",
					e
				),
			)),
		},
	}
}
