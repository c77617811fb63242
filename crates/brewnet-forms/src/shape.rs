//! Type descriptions consumed by form derivation
//!
//! A type takes part in form derivation by implementing [`FormValue`], which
//! returns a [`Shape`]: a primitive leaf, an indirection to another type, a
//! record with annotated fields, or a declaration that overrides derivation.
//! Records are normally described by `#[derive(Form)]`; the implementations
//! below cover the standard library.
//!
//! Nested shapes are referenced through [`ShapeFn`] pointers so that
//! self-referential types can be described without recursing at
//! construction time.

use crate::annotation::FieldAnnotations;
use crate::descriptor::FieldMap;
use crate::kind::ValueKind;
use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::rc::Rc;
use std::sync::Arc;
use std::sync::mpsc::{Receiver, Sender, SyncSender};

/// Lazily produced shape of a type
pub type ShapeFn = fn() -> Shape;

/// Field producer of a [`Declaration::Fields`]; receives the path prefix
pub type DeclareFieldsFn = fn(&str) -> FieldMap;

/// Structural description of a type
#[derive(Debug, Clone)]
pub enum Shape {
	/// A primitive value
	Leaf(ValueKind),
	/// An optional or owning pointer to another type
	Indirect(ShapeFn),
	/// A record whose fields are flattened into the form
	Record(RecordShape),
	/// A type that takes over its own derivation
	Declared(Declaration),
}

impl Shape {
	/// Short description used in error messages
	pub fn describe(&self) -> String {
		match self {
			Shape::Leaf(kind) => format!("kind `{kind}`"),
			Shape::Indirect(_) => "pointer".to_string(),
			Shape::Record(record) => format!("record `{}`", record.type_name),
			Shape::Declared(Declaration::Fields(_)) => "field declaration".to_string(),
			Shape::Declared(Declaration::ValueType(_)) => "value-type declaration".to_string(),
		}
	}
}

/// Capability a type declares to override derivation
#[derive(Debug, Clone, Copy)]
pub enum Declaration {
	/// The type supplies its own field map, given the path prefix it sits under
	Fields(DeclareFieldsFn),
	/// The type is classified as the given primitive substitute
	ValueType(ShapeFn),
}

/// A record type and its fields in declaration order
#[derive(Debug, Clone)]
pub struct RecordShape {
	pub type_name: &'static str,
	pub fields: Vec<FieldShape>,
}

impl RecordShape {
	pub fn new(type_name: &'static str) -> Self {
		Self {
			type_name,
			fields: Vec::new(),
		}
	}

	pub fn field(mut self, field: FieldShape) -> Self {
		self.fields.push(field);
		self
	}
}

/// One field of a record
#[derive(Debug, Clone)]
pub struct FieldShape {
	/// Source identifier of the field
	pub ident: &'static str,
	pub annotations: FieldAnnotations,
	/// Embedded fields are merged into the enclosing record
	pub embedded: bool,
	pub shape: ShapeFn,
}

impl FieldShape {
	pub fn new(ident: &'static str, shape: ShapeFn) -> Self {
		Self {
			ident,
			annotations: FieldAnnotations::default(),
			embedded: false,
			shape,
		}
	}

	pub fn request(mut self, annotation: &'static str) -> Self {
		self.annotations.request = annotation;
		self
	}

	pub fn response(mut self, annotation: &'static str) -> Self {
		self.annotations.response = annotation;
		self
	}

	pub fn db(mut self, annotation: &'static str) -> Self {
		self.annotations.db = annotation;
		self
	}

	pub fn embedded(mut self) -> Self {
		self.embedded = true;
		self
	}
}

/// A type that can be described for form derivation
///
/// # Examples
///
/// Overriding derivation with a value-type substitute:
///
/// ```
/// use brewnet_forms::{Declaration, FormValue, Shape};
///
/// struct Email(String);
///
/// impl FormValue for Email {
/// 	fn form_shape() -> Shape {
/// 		Shape::Declared(Declaration::ValueType(<String as FormValue>::form_shape))
/// 	}
/// }
/// ```
pub trait FormValue {
	fn form_shape() -> Shape;
}

/// A top-level value a form can be derived from
///
/// Implemented by `#[derive(Form)]` unless the container is marked
/// `#[form(custom_path)]`, in which case the type implements it by hand and
/// overrides [`FormTarget::action_path`].
pub trait FormTarget: FormValue {
	/// Action endpoint that replaces the one computed by the caller
	fn action_path(&self) -> Option<String> {
		None
	}
}

impl<T: FormTarget + ?Sized> FormTarget for &T {
	fn action_path(&self) -> Option<String> {
		(**self).action_path()
	}
}

impl<T: FormTarget + ?Sized> FormTarget for Box<T> {
	fn action_path(&self) -> Option<String> {
		(**self).action_path()
	}
}

impl<T: FormTarget + ?Sized> FormTarget for Arc<T> {
	fn action_path(&self) -> Option<String> {
		(**self).action_path()
	}
}

macro_rules! leaf {
	($($ty:ty => $kind:ident),* $(,)?) => {
		$(
			impl FormValue for $ty {
				fn form_shape() -> Shape {
					Shape::Leaf(ValueKind::$kind)
				}
			}
		)*
	};
}

leaf! {
	bool => Bool,
	i8 => I8,
	i16 => I16,
	i32 => I32,
	i64 => I64,
	i128 => I128,
	isize => Isize,
	u8 => U8,
	u16 => U16,
	u32 => U32,
	u64 => U64,
	u128 => U128,
	usize => Usize,
	f32 => F32,
	f64 => F64,
	char => Char,
	str => Str,
	String => Str,
	() => Unit,
}

impl FormValue for Cow<'_, str> {
	fn form_shape() -> Shape {
		Shape::Leaf(ValueKind::Str)
	}
}

macro_rules! indirect {
	($($ty:ty),* $(,)?) => {
		$(
			impl<T: FormValue + ?Sized> FormValue for $ty {
				fn form_shape() -> Shape {
					Shape::Indirect(T::form_shape)
				}
			}
		)*
	};
}

indirect!(Box<T>, Rc<T>, Arc<T>, &T, &mut T);

impl<T: FormValue> FormValue for Option<T> {
	fn form_shape() -> Shape {
		Shape::Indirect(T::form_shape)
	}
}

macro_rules! collection {
	($kind:ident => $($ty:ty),* $(,)?) => {
		$(
			impl<T> FormValue for $ty {
				fn form_shape() -> Shape {
					Shape::Leaf(ValueKind::$kind)
				}
			}
		)*
	};
}

collection!(Sequence => Vec<T>, VecDeque<T>, [T]);
collection!(Set => HashSet<T>, BTreeSet<T>);
collection!(Channel => Sender<T>, SyncSender<T>, Receiver<T>);

impl<T, const N: usize> FormValue for [T; N] {
	fn form_shape() -> Shape {
		Shape::Leaf(ValueKind::Sequence)
	}
}

impl<K, V> FormValue for HashMap<K, V> {
	fn form_shape() -> Shape {
		Shape::Leaf(ValueKind::Map)
	}
}

impl<K, V> FormValue for BTreeMap<K, V> {
	fn form_shape() -> Shape {
		Shape::Leaf(ValueKind::Map)
	}
}

macro_rules! tuple {
	($($name:ident),+) => {
		impl<$($name),+> FormValue for ($($name,)+) {
			fn form_shape() -> Shape {
				Shape::Leaf(ValueKind::Tuple)
			}
		}
	};
}

tuple!(A);
tuple!(A, B);
tuple!(A, B, C);
tuple!(A, B, C, D);
tuple!(A, B, C, D, E);
tuple!(A, B, C, D, E, F);

macro_rules! callable {
	($($arg:ident),*) => {
		impl<R, $($arg),*> FormValue for fn($($arg),*) -> R {
			fn form_shape() -> Shape {
				Shape::Leaf(ValueKind::Callable)
			}
		}
	};
}

callable!();
callable!(A);
callable!(A, B);
callable!(A, B, C);
