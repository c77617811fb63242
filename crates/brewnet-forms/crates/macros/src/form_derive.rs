//! `#[derive(Form)]` implementation

use crate::crate_paths::get_brewnet_forms_crate;
use proc_macro2::TokenStream;
use quote::quote;
use syn::{
	Attribute, Data, DeriveInput, Error, Expr, ExprLit, Fields, GenericParam, Ident, Lit, LitStr,
	Meta, Result, Token, Type, ext::IdentExt, parse_quote, punctuated::Punctuated,
};

/// Options from `#[form(...)]` on the container
#[derive(Debug, Default)]
struct ContainerAttrs {
	custom_path: bool,
}

/// Annotations collected from a single field
#[derive(Debug, Default)]
struct FieldAttrs {
	request: Option<LitStr>,
	response: Option<LitStr>,
	db: Option<LitStr>,
	embed: bool,
}

struct FormField<'a> {
	ident: &'a Ident,
	ty: &'a Type,
	attrs: FieldAttrs,
}

pub(crate) fn form_derive_impl(input: DeriveInput) -> Result<TokenStream> {
	let krate = get_brewnet_forms_crate()?;
	let container = parse_container_attrs(&input.attrs)?;

	let named = match &input.data {
		Data::Struct(data) => match &data.fields {
			Fields::Named(named) => named,
			_ => {
				return Err(Error::new_spanned(
					&input.ident,
					"Form can only be derived for structs with named fields",
				));
			}
		},
		_ => {
			return Err(Error::new_spanned(
				&input.ident,
				"Form can only be derived for structs",
			));
		}
	};

	let fields = named
		.named
		.iter()
		.map(|field| {
			let ident = field
				.ident
				.as_ref()
				.ok_or_else(|| Error::new_spanned(field, "expected a named field"))?;
			Ok(FormField {
				ident,
				ty: &field.ty,
				attrs: parse_field_attrs(&field.attrs)?,
			})
		})
		.collect::<Result<Vec<_>>>()?;

	let name = &input.ident;
	let mut generics = input.generics.clone();
	for param in generics.params.iter_mut() {
		if let GenericParam::Type(type_param) = param {
			type_param.bounds.push(parse_quote!(#krate::FormValue));
		}
	}
	let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

	let field_shapes = fields.iter().map(|field| field_shape(&krate, field));

	let target_impl = if container.custom_path {
		quote! {}
	} else {
		quote! {
			impl #impl_generics #krate::FormTarget for #name #ty_generics #where_clause {}
		}
	};

	Ok(quote! {
		impl #impl_generics #krate::FormValue for #name #ty_generics #where_clause {
			fn form_shape() -> #krate::Shape {
				#krate::Shape::Record(
					#krate::RecordShape::new(::core::any::type_name::<Self>())
						#(.field(#field_shapes))*
				)
			}
		}

		#target_impl
	})
}

fn field_shape(krate: &TokenStream, field: &FormField<'_>) -> TokenStream {
	let ident = field.ident.unraw().to_string();
	let ty = field.ty;

	let request = field.attrs.request.as_ref().map(|lit| quote!(.request(#lit)));
	let response = field
		.attrs
		.response
		.as_ref()
		.map(|lit| quote!(.response(#lit)));
	let db = field.attrs.db.as_ref().map(|lit| quote!(.db(#lit)));
	let embed = field.attrs.embed.then(|| quote!(.embedded()));

	quote! {
		#krate::FieldShape::new(#ident, <#ty as #krate::FormValue>::form_shape)
			#request
			#response
			#db
			#embed
	}
}

fn parse_container_attrs(attrs: &[Attribute]) -> Result<ContainerAttrs> {
	let mut result = ContainerAttrs::default();

	for attr in attrs {
		if !attr.path().is_ident("form") {
			continue;
		}
		for flag in form_flags(attr)? {
			match flag.to_string().as_str() {
				"custom_path" => {
					if result.custom_path {
						return Err(Error::new(flag.span(), "duplicate `custom_path` attribute"));
					}
					result.custom_path = true;
				}
				"embed" => {
					return Err(Error::new(
						flag.span(),
						"`embed` applies to fields, not to the struct",
					));
				}
				_ => {
					return Err(Error::new(
						flag.span(),
						format!("unknown form attribute `{}`", flag),
					));
				}
			}
		}
	}

	Ok(result)
}

fn parse_field_attrs(attrs: &[Attribute]) -> Result<FieldAttrs> {
	let mut result = FieldAttrs::default();

	for attr in attrs {
		let slot = if attr.path().is_ident("request") {
			&mut result.request
		} else if attr.path().is_ident("response") {
			&mut result.response
		} else if attr.path().is_ident("db") {
			&mut result.db
		} else if attr.path().is_ident("form") {
			for flag in form_flags(attr)? {
				match flag.to_string().as_str() {
					"embed" => {
						if result.embed {
							return Err(Error::new(flag.span(), "duplicate `embed` attribute"));
						}
						result.embed = true;
					}
					"custom_path" => {
						return Err(Error::new(
							flag.span(),
							"`custom_path` applies to the struct, not to fields",
						));
					}
					_ => {
						return Err(Error::new(
							flag.span(),
							format!("unknown form attribute `{}`", flag),
						));
					}
				}
			}
			continue;
		} else {
			continue;
		};

		if slot.is_some() {
			return Err(Error::new_spanned(attr, "duplicate annotation"));
		}
		*slot = Some(annotation_literal(attr)?);
	}

	Ok(result)
}

/// Accept both `#[request("...")]` and `#[request = "..."]`
fn annotation_literal(attr: &Attribute) -> Result<LitStr> {
	match &attr.meta {
		Meta::List(_) => attr.parse_args::<LitStr>(),
		Meta::NameValue(name_value) => match &name_value.value {
			Expr::Lit(ExprLit {
				lit: Lit::Str(lit), ..
			}) => Ok(lit.clone()),
			other => Err(Error::new_spanned(other, "expected a string literal")),
		},
		Meta::Path(path) => Err(Error::new_spanned(
			path,
			"expected an annotation string, e.g. `#[request(\"name,required\")]`",
		)),
	}
}

fn form_flags(attr: &Attribute) -> Result<Punctuated<Ident, Token![,]>> {
	attr.parse_args_with(Punctuated::<Ident, Token![,]>::parse_terminated)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_parse_field_attrs_collects_annotations() {
		let field: syn::Field = parse_quote! {
			#[request("street1,required")]
			#[db = "street_1"]
			#[form(embed)]
			street: String
		};

		let attrs = parse_field_attrs(&field.attrs).unwrap();

		assert_eq!(attrs.request.unwrap().value(), "street1,required");
		assert!(attrs.response.is_none());
		assert_eq!(attrs.db.unwrap().value(), "street_1");
		assert!(attrs.embed);
	}

	#[test]
	fn test_duplicate_request_is_rejected() {
		let field: syn::Field = parse_quote! {
			#[request("a")]
			#[request("b")]
			street: String
		};

		let error = parse_field_attrs(&field.attrs).unwrap_err();

		assert_eq!(error.to_string(), "duplicate annotation");
	}

	#[test]
	fn test_unknown_form_flag_is_rejected() {
		let input: DeriveInput = parse_quote! {
			#[form(hidden)]
			struct Login { user: String }
		};

		let error = parse_container_attrs(&input.attrs).unwrap_err();

		assert_eq!(error.to_string(), "unknown form attribute `hidden`");
	}

	#[test]
	fn test_custom_path_flag() {
		let input: DeriveInput = parse_quote! {
			#[form(custom_path)]
			struct Login { user: String }
		};

		assert!(parse_container_attrs(&input.attrs).unwrap().custom_path);
	}

	#[test]
	fn test_field_shape_uses_unraw_ident() {
		let krate = quote!(::brewnet_forms);
		let field: syn::Field = parse_quote! { r#type: String };
		let form_field = FormField {
			ident: field.ident.as_ref().unwrap(),
			ty: &field.ty,
			attrs: FieldAttrs::default(),
		};

		let tokens = field_shape(&krate, &form_field).to_string();

		assert!(tokens.contains("\"type\""));
		assert!(!tokens.contains("r#type\""));
	}
}
