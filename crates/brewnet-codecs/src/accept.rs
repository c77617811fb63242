//! Accept header parsing

use crate::media_type::MediaType;

/// Represents an Accept header
#[derive(Debug, Clone)]
pub struct AcceptHeader {
	pub media_types: Vec<MediaType>,
}

impl AcceptHeader {
	/// Parses an Accept header string, ordering entries by quality
	///
	/// Entries with equal quality keep their header order. Malformed entries
	/// are dropped.
	///
	/// # Examples
	///
	/// ```
	/// use brewnet_codecs::AcceptHeader;
	///
	/// let accept = AcceptHeader::parse("application/json; q=0.5, application/vnd.brewnet.form+yaml");
	/// assert_eq!(accept.media_types.len(), 2);
	/// assert_eq!(accept.media_types[0].subtype, "vnd.brewnet.form+yaml");
	/// assert_eq!(accept.media_types[1].quality, 0.5);
	/// ```
	pub fn parse(header: &str) -> Self {
		let mut media_types: Vec<MediaType> = header
			.split(',')
			.filter_map(|s| MediaType::parse(s.trim()))
			.collect();

		media_types.sort_by(|a, b| b.quality.total_cmp(&a.quality));

		Self { media_types }
	}

	pub fn empty() -> Self {
		Self {
			media_types: Vec::new(),
		}
	}

	/// Finds the first available media type the header accepts
	///
	/// # Examples
	///
	/// ```
	/// use brewnet_codecs::{AcceptHeader, MediaType};
	///
	/// let accept = AcceptHeader::parse("application/yaml, application/*; q=0.1");
	/// let available = vec![
	/// 	MediaType::new("application", "json"),
	/// 	MediaType::new("application", "yaml"),
	/// ];
	/// let best = accept.find_best_match(&available).unwrap();
	/// assert_eq!(best.subtype, "yaml");
	/// ```
	pub fn find_best_match(&self, available: &[MediaType]) -> Option<MediaType> {
		self.media_types.iter().find_map(|accepted| {
			available
				.iter()
				.find(|candidate| accepted.matches(candidate))
				.cloned()
		})
	}
}
