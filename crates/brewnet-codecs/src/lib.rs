//! Content-negotiating codecs for brewnet
//!
//! The [`FormCodec`] answers requests for `application/vnd.brewnet.form+<format>`
//! by deriving a form descriptor from a record type and encoding it with the
//! delegate codec registered for `application/<format>`. JSON and YAML
//! delegates are registered by default.
//!
//! ## Negotiation
//!
//! ```
//! use brewnet_codecs::FormCodec;
//!
//! let codec = FormCodec::default();
//! let negotiated = codec
//! 	.negotiate("text/html, application/vnd.brewnet.form+yaml; q=0.9")
//! 	.unwrap();
//! assert_eq!(negotiated.suffix(), Some("yaml"));
//! ```

pub mod accept;
pub mod codec;
pub mod error;
pub mod form_codec;
pub mod json;
pub mod media_type;
pub mod registry;
pub mod settings;
pub mod types;
pub mod yaml;

pub use accept::AcceptHeader;
pub use codec::Codec;
pub use error::{CodecError, CodecResult};
pub use form_codec::{BASE_MIME_TYPE, FILE_EXTENSION, FormCodec, MarshalOptions};
pub use json::JsonCodec;
pub use media_type::MediaType;
pub use registry::{CodecRegistry, default_registry, set_default_registry};
pub use settings::FormSettings;
pub use types::{Image, Link, Title};
pub use yaml::YamlCodec;
