//! Form descriptor assembly

use crate::descriptor::{FieldMap, FormDescriptor};
use crate::error::{FormError, FormResult};
use crate::flatten::flatten_record;
use crate::shape::{Declaration, FormTarget, FormValue, Shape};
use tracing::debug;

/// Default nesting limit for record expansion
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// Default submission method
pub const DEFAULT_METHOD: &str = "POST";

/// Options controlling field derivation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeriveOptions {
	/// Maximum number of nested records and dereference steps
	pub max_depth: usize,
}

impl Default for DeriveOptions {
	fn default() -> Self {
		Self {
			max_depth: DEFAULT_MAX_DEPTH,
		}
	}
}

impl DeriveOptions {
	pub fn with_max_depth(mut self, max_depth: usize) -> Self {
		self.max_depth = max_depth;
		self
	}
}

/// Options for assembling a complete form descriptor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssembleOptions {
	/// Endpoint used unless the value supplies its own
	pub action: String,
	pub method: String,
	pub derive: DeriveOptions,
}

impl Default for AssembleOptions {
	fn default() -> Self {
		Self {
			action: String::new(),
			method: DEFAULT_METHOD.to_string(),
			derive: DeriveOptions::default(),
		}
	}
}

impl AssembleOptions {
	pub fn new(action: impl Into<String>) -> Self {
		Self {
			action: action.into(),
			..Default::default()
		}
	}

	pub fn with_method(mut self, method: impl Into<String>) -> Self {
		self.method = method.into();
		self
	}

	pub fn with_max_depth(mut self, max_depth: usize) -> Self {
		self.derive.max_depth = max_depth;
		self
	}
}

/// Derive the field map of a type.
///
/// The type must resolve, through any number of indirections, to a record
/// or a field declaration.
///
/// # Examples
///
/// ```
/// use brewnet_forms::{DeriveOptions, Form, describe};
///
/// #[derive(Form)]
/// struct Login {
/// 	#[request("username,required")]
/// 	user: String,
/// 	remember_me: bool,
/// }
///
/// let fields = describe::<Login>(&DeriveOptions::default()).unwrap();
/// assert_eq!(fields["username"].label, "Username");
/// assert_eq!(fields["remember_me"].label, "Remember Me");
/// ```
pub fn describe<T: FormValue + ?Sized>(options: &DeriveOptions) -> FormResult<FieldMap> {
	derive_fields(T::form_shape(), std::any::type_name::<T>(), options)
}

/// Derive the field map of an arbitrary top-level shape
pub fn derive_fields(
	shape: Shape,
	type_name: &str,
	options: &DeriveOptions,
) -> FormResult<FieldMap> {
	debug!(type_name, max_depth = options.max_depth, "Deriving form fields");
	let mut shape = shape;
	let mut steps = 0;

	loop {
		match shape {
			Shape::Declared(Declaration::Fields(declare)) => return Ok(declare("")),
			Shape::Record(record) => return flatten_record("", &record, options),
			Shape::Indirect(next) if steps < options.max_depth => {
				steps += 1;
				shape = next();
			}
			Shape::Indirect(_) => {
				return Err(FormError::DepthExceeded {
					path: String::new(),
					limit: options.max_depth,
				});
			}
			Shape::Leaf(_) | Shape::Declared(Declaration::ValueType(_)) => {
				return Err(FormError::NonStructureTopLevel {
					type_name: type_name.to_string(),
				});
			}
		}
	}
}

/// Assemble the complete form descriptor for `value`.
///
/// The action comes from [`FormTarget::action_path`] when the value supplies
/// one, otherwise from `options.action`.
pub fn assemble<T: FormTarget + ?Sized>(
	value: &T,
	options: &AssembleOptions,
) -> FormResult<FormDescriptor> {
	debug!(
		type_name = std::any::type_name::<T>(),
		action = %options.action,
		method = %options.method,
		"Assembling form descriptor"
	);
	let fields = describe::<T>(&options.derive)?;
	let action = match value.action_path() {
		Some(custom) => {
			debug!(action = %custom, "Using action path supplied by the form value");
			custom
		}
		None => options.action.clone(),
	};

	Ok(FormDescriptor {
		action,
		method: options.method.clone(),
		fields,
	})
}
