//! The frame registry
//!
//! The registry is the single source of truth for which frames this codec can
//! produce and consume. It maps a human-facing key (`"title"`) to the wire
//! identifiers used on disk (`"TIT2"` for ID3v2.3/4, `"TT2"` for ID3v2.2) and to
//! the handler responsible for the frame body.
//!
//! A registry is immutable once constructed. Build it once at startup and pass it
//! by reference into [`Tag`](crate::tag::Tag) operations; it is safe to share
//! across any number of concurrent readers.

use crate::frame::FrameValue;
use crate::header::Id3Version;

/// The encode/decode capability registered for a frame identifier
///
/// Handlers only produce and consume raw frame bodies. Richer per-frame semantics
/// (text encodings, picture metadata, ...) are deliberately outside this codec.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum FrameHandler {
	/// A "T..." text information frame
	Text,
	/// A "W..." URL link frame
	Url,
	/// Anything whose body is carried as opaque bytes (pictures, lyrics, unknown data)
	Binary,
}

impl FrameHandler {
	/// Produce a frame body from a value
	pub fn encode_body(self, value: &FrameValue) -> Vec<u8> {
		match value {
			FrameValue::Text(text) => text.as_bytes().to_vec(),
			FrameValue::Binary(data) => data.clone(),
		}
	}

	/// Produce a value from a frame body
	///
	/// Text and URL bodies that aren't valid UTF-8 fall back to
	/// [`FrameValue::Binary`] rather than being rejected.
	pub fn decode_body(self, body: &[u8]) -> FrameValue {
		match self {
			Self::Text | Self::Url => match std::str::from_utf8(body) {
				Ok(text) => FrameValue::Text(text.trim_end_matches('\0').to_owned()),
				Err(_) => FrameValue::Binary(body.to_vec()),
			},
			Self::Binary => FrameValue::Binary(body.to_vec()),
		}
	}
}

/// One registry mapping: key, wire identifiers, handler
#[derive(Copy, Clone, Debug)]
pub struct RegistryEntry {
	/// The human-facing frame key
	pub key: &'static str,
	/// The ID3v2.3/ID3v2.4 frame identifier
	pub id: &'static str,
	/// The ID3v2.2 frame identifier
	pub id_v2: &'static str,
	/// The body handler for this frame
	pub handler: FrameHandler,
}

impl RegistryEntry {
	/// The wire identifier at the width appropriate for `version`
	pub fn id_for(&self, version: Id3Version) -> &'static str {
		match version {
			Id3Version::V2 => self.id_v2,
			Id3Version::V3 | Id3Version::V4 => self.id,
		}
	}

	/// Whether `id` is one of this entry's wire identifiers, at either width
	pub fn has_id(&self, id: &str) -> bool {
		self.id == id || self.id_v2 == id
	}
}

// This is used to create the key/identifier/handler table.
//
// Each line maps a frame key to its ID3v2.3/4 identifier, its ID3v2.2
// identifier, and the handler variant responsible for the frame body.
macro_rules! frame_map {
	(
		$NAME:ident;

		$(
			$key:literal => ($id:literal, $id_v2:literal, $handler:ident)
		),+ $(,)?
	) => {
		static $NAME: &[RegistryEntry] = &[
			$(
				RegistryEntry {
					key: $key,
					id: $id,
					id_v2: $id_v2,
					handler: FrameHandler::$handler,
				},
			)+
		];
	};
}

frame_map!(
	DEFAULT_FRAME_MAP;

	"title"                => ("TIT2", "TT2", Text),
	"subtitle"             => ("TIT3", "TT3", Text),
	"artist"               => ("TPE1", "TP1", Text),
	"performerInfo"        => ("TPE2", "TP2", Text),
	"album"                => ("TALB", "TAL", Text),
	"year"                 => ("TYER", "TYE", Text),
	"genre"                => ("TCON", "TCO", Text),
	"trackNumber"          => ("TRCK", "TRK", Text),
	"composer"             => ("TCOM", "TCM", Text),
	"copyright"            => ("TCOP", "TCR", Text),
	"encodedBy"            => ("TENC", "TEN", Text),
	"language"             => ("TLAN", "TLA", Text),
	"length"               => ("TLEN", "TLE", Text),
	"bpm"                  => ("TBPM", "TBP", Text),
	"fileUrl"              => ("WOAF", "WAF", Url),
	"artistUrl"            => ("WOAR", "WAR", Url),
	"image"                => ("APIC", "PIC", Binary),
	"unsynchronisedLyrics" => ("USLT", "ULT", Binary),
	"comment"              => ("COMM", "COM", Binary),
);

/// Maps frame keys to wire identifiers and body handlers
///
/// # Examples
///
/// ```rust
/// use id3rw::registry::{FrameHandler, FrameRegistry};
/// use id3rw::header::Id3Version;
///
/// let registry = FrameRegistry::default();
///
/// assert_eq!(registry.resolve_key("title", Id3Version::V4), Some("TIT2"));
/// assert_eq!(registry.resolve_key("title", Id3Version::V2), Some("TT2"));
/// assert_eq!(registry.resolve_handler("TIT2"), Some(FrameHandler::Text));
///
/// // Unknown keys and identifiers resolve to `None`, they are never an error
/// assert_eq!(registry.resolve_key("watermark", Id3Version::V4), None);
/// assert_eq!(registry.resolve_handler("ZZZZ"), None);
/// ```
#[derive(Copy, Clone, Debug)]
pub struct FrameRegistry {
	entries: &'static [RegistryEntry],
}

impl Default for FrameRegistry {
	fn default() -> Self {
		Self {
			entries: DEFAULT_FRAME_MAP,
		}
	}
}

impl FrameRegistry {
	/// Create a registry from a custom set of entries
	#[must_use]
	pub const fn new(entries: &'static [RegistryEntry]) -> Self {
		Self { entries }
	}

	/// Look up the full entry for a frame key
	pub fn entry_for_key(&self, key: &str) -> Option<&RegistryEntry> {
		self.entries.iter().find(|entry| entry.key == key)
	}

	/// Look up the full entry for a wire identifier (of either width)
	pub fn entry_for_id(&self, id: &str) -> Option<&RegistryEntry> {
		self.entries.iter().find(|entry| entry.has_id(id))
	}

	/// Look up the wire identifier for a frame key
	///
	/// Returns the identifier width appropriate for `version`. Unknown keys
	/// resolve to `None`.
	pub fn resolve_key(&self, key: &str, version: Id3Version) -> Option<&'static str> {
		self.entry_for_key(key).map(|entry| entry.id_for(version))
	}

	/// Look up the handler registered for a wire identifier (of either width)
	///
	/// Unknown identifiers resolve to `None`; callers skip those frames rather
	/// than failing the whole tag.
	pub fn resolve_handler(&self, id: &str) -> Option<FrameHandler> {
		self.entry_for_id(id).map(|entry| entry.handler)
	}

	/// Iterate over every registered entry
	pub fn entries(&self) -> impl Iterator<Item = &RegistryEntry> {
		self.entries.iter()
	}
}

#[cfg(test)]
mod tests {
	use super::{FrameHandler, FrameRegistry};
	use crate::frame::FrameValue;
	use crate::header::Id3Version;

	#[test_log::test]
	fn resolve_both_identifier_widths() {
		let registry = FrameRegistry::default();

		assert_eq!(registry.resolve_key("artist", Id3Version::V3), Some("TPE1"));
		assert_eq!(registry.resolve_key("artist", Id3Version::V2), Some("TP1"));

		assert_eq!(registry.resolve_handler("TPE1"), Some(FrameHandler::Text));
		assert_eq!(registry.resolve_handler("TP1"), Some(FrameHandler::Text));
	}

	#[test_log::test]
	fn entry_lookup_by_key_or_identifier() {
		let registry = FrameRegistry::default();

		let by_key = registry.entry_for_key("title").unwrap();
		assert_eq!(by_key.id_for(Id3Version::V4), "TIT2");
		assert_eq!(by_key.id_for(Id3Version::V2), "TT2");

		assert!(registry.entry_for_id("TIT2").unwrap().has_id("TT2"));
		assert!(registry.entry_for_id("TT2").unwrap().has_id("TIT2"));
	}

	#[test_log::test]
	fn unknown_resolutions_are_none() {
		let registry = FrameRegistry::default();

		assert_eq!(registry.resolve_key("mood", Id3Version::V4), None);
		assert_eq!(registry.resolve_handler("TMOO"), None);
	}

	#[test_log::test]
	fn text_body_roundtrip() {
		let value = FrameValue::Text(String::from("Foo title"));
		let body = FrameHandler::Text.encode_body(&value);

		assert_eq!(FrameHandler::Text.decode_body(&body), value);
	}

	#[test_log::test]
	fn text_decode_strips_trailing_nul() {
		assert_eq!(
			FrameHandler::Text.decode_body(b"Bar artist\0"),
			FrameValue::Text(String::from("Bar artist"))
		);
	}

	#[test_log::test]
	fn invalid_utf8_falls_back_to_binary() {
		let body = [0xFF, 0xFE, 0x00];
		assert_eq!(
			FrameHandler::Text.decode_body(&body),
			FrameValue::Binary(body.to_vec())
		);
	}
}
