//! Resource types shared by all brewnet codecs
//!
//! Including these in a response value tells a codec what it is looking at,
//! so that each codec can render links, images and titles in the way its
//! media type expects.

use brewnet_forms::Form;
use serde::{Deserialize, Serialize};

/// A link to another resource
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Form)]
pub struct Link {
	/// Location of the linked resource
	pub location: String,

	/// How the linked resource relates to the containing value, lower case
	/// words separated by `-`
	pub relationship: String,

	/// Human-readable description; see [`Link::display_title`]
	pub title: String,

	/// Between 0 (always embed the linked resource) and 1 (always a plain
	/// link); values in between are left to the client
	pub distance: f32,
}

impl Link {
	/// Creates a link
	///
	/// # Examples
	///
	/// ```
	/// use brewnet_codecs::Link;
	///
	/// let link = Link::new("/users/7", "created-by").with_distance(0.8);
	/// assert_eq!(link.display_title(), "Created by");
	/// ```
	pub fn new(location: impl Into<String>, relationship: impl Into<String>) -> Self {
		Self {
			location: location.into(),
			relationship: relationship.into(),
			..Default::default()
		}
	}

	pub fn with_title(mut self, title: impl Into<String>) -> Self {
		self.title = title.into();
		self
	}

	/// Clamped to `0.0..=1.0`
	pub fn with_distance(mut self, distance: f32) -> Self {
		self.distance = distance.clamp(0.0, 1.0);
		self
	}

	/// The title, or one generated from the relationship when it is empty
	pub fn display_title(&self) -> String {
		if !self.title.is_empty() {
			return self.title.clone();
		}

		let spaced = self.relationship.replace('-', " ");
		let mut chars = spaced.chars();
		match chars.next() {
			Some(first) => first.to_uppercase().chain(chars).collect(),
			None => String::new(),
		}
	}
}

/// A link to an image
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Form)]
pub struct Image {
	#[serde(flatten)]
	#[form(embed)]
	pub link: Link,

	/// MIME type of the linked image
	pub mime: String,
}

/// A string with a rank; rank 0 is the most prominent
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Form)]
pub struct Title {
	pub value: String,
	pub rank: i32,
}
