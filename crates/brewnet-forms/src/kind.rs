//! Value kinds and the form-input types they map to
//!
//! Every leaf of a record description carries a [`ValueKind`]. Only booleans,
//! numbers and strings have an HTML-style input representation; everything
//! else is rejected by [`input_kind`].

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Primitive kind of a leaf value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
	Bool,
	I8,
	I16,
	I32,
	I64,
	I128,
	Isize,
	U8,
	U16,
	U32,
	U64,
	U128,
	Usize,
	F32,
	F64,
	Char,
	Str,
	Complex,
	Sequence,
	Set,
	Map,
	Tuple,
	Unit,
	Callable,
	Channel,
	/// Any other kind, named by the implementor
	Opaque(&'static str),
}

impl ValueKind {
	pub fn as_str(&self) -> &'static str {
		match self {
			ValueKind::Bool => "bool",
			ValueKind::I8 => "i8",
			ValueKind::I16 => "i16",
			ValueKind::I32 => "i32",
			ValueKind::I64 => "i64",
			ValueKind::I128 => "i128",
			ValueKind::Isize => "isize",
			ValueKind::U8 => "u8",
			ValueKind::U16 => "u16",
			ValueKind::U32 => "u32",
			ValueKind::U64 => "u64",
			ValueKind::U128 => "u128",
			ValueKind::Usize => "usize",
			ValueKind::F32 => "f32",
			ValueKind::F64 => "f64",
			ValueKind::Char => "char",
			ValueKind::Str => "string",
			ValueKind::Complex => "complex",
			ValueKind::Sequence => "sequence",
			ValueKind::Set => "set",
			ValueKind::Map => "map",
			ValueKind::Tuple => "tuple",
			ValueKind::Unit => "unit",
			ValueKind::Callable => "callable",
			ValueKind::Channel => "channel",
			ValueKind::Opaque(name) => name,
		}
	}

	pub fn is_integer(&self) -> bool {
		matches!(
			self,
			ValueKind::I8
				| ValueKind::I16
				| ValueKind::I32
				| ValueKind::I64
				| ValueKind::I128
				| ValueKind::Isize
				| ValueKind::U8
				| ValueKind::U16
				| ValueKind::U32
				| ValueKind::U64
				| ValueKind::U128
				| ValueKind::Usize
		)
	}

	pub fn is_float(&self) -> bool {
		matches!(self, ValueKind::F32 | ValueKind::F64)
	}
}

impl fmt::Display for ValueKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Semantic input type of a form field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
	Checkbox,
	Number,
	Text,
}

impl InputKind {
	pub fn as_str(&self) -> &'static str {
		match self {
			InputKind::Checkbox => "checkbox",
			InputKind::Number => "number",
			InputKind::Text => "text",
		}
	}
}

impl fmt::Display for InputKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// A value kind with no input mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("No form input type for kind `{kind}`")]
pub struct UnsupportedKindError {
	pub kind: ValueKind,
}

/// Map a primitive kind to its form-input type.
///
/// # Examples
///
/// ```
/// use brewnet_forms::{InputKind, ValueKind, input_kind};
///
/// assert_eq!(input_kind(ValueKind::Bool), Ok(InputKind::Checkbox));
/// assert_eq!(input_kind(ValueKind::U16), Ok(InputKind::Number));
/// assert!(input_kind(ValueKind::Map).is_err());
/// ```
pub fn input_kind(kind: ValueKind) -> Result<InputKind, UnsupportedKindError> {
	match kind {
		ValueKind::Bool => Ok(InputKind::Checkbox),
		k if k.is_integer() || k.is_float() => Ok(InputKind::Number),
		ValueKind::Str | ValueKind::Char => Ok(InputKind::Text),
		kind => Err(UnsupportedKindError { kind }),
	}
}

impl TryFrom<ValueKind> for InputKind {
	type Error = UnsupportedKindError;

	fn try_from(kind: ValueKind) -> Result<Self, Self::Error> {
		input_kind(kind)
	}
}
