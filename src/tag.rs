//! The ID3v2 tag
//!
//! A [`Tag`] owns its header fields (version, flags, size) and an ordered
//! collection of frames. It is a plain value: create one empty, fill it with
//! [`Tag::insert`], and serialize it on demand with [`Tag::create_buffer`]; or
//! extract one out of an arbitrary byte buffer with [`Tag::from_buffer`].

use crate::error::Result;
use crate::frame::read::ParsedFrame;
use crate::frame::{Frame, FrameValue, write};
use crate::header::{HEADER_LEN, Id3Version, TagFlags, TagHeader};
use crate::macros::err;
use crate::registry::FrameRegistry;

/// An ID3v2 tag
///
/// # Examples
///
/// ```rust
/// use id3rw::header::{Id3Version, TagFlags};
/// use id3rw::registry::FrameRegistry;
/// use id3rw::tag::Tag;
///
/// # fn main() -> id3rw::error::Result<()> {
/// let registry = FrameRegistry::default();
///
/// let mut tag = Tag::new(Id3Version::V4, TagFlags::default());
/// tag.insert("title", "Foo title");
/// tag.insert("artist", "Bar artist");
///
/// let buffer = tag.create_buffer(&registry)?;
///
/// let parsed = Tag::from_buffer(&buffer, &registry).expect("valid tag");
/// assert_eq!(
/// 	parsed.get(&registry, "title").and_then(|v| v.text()),
/// 	Some("Foo title")
/// );
/// # Ok(()) }
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tag {
	version: Id3Version,
	flags: TagFlags,
	frames: Vec<Frame>,
}

impl Default for Tag {
	/// An empty ID3v2.3 tag with no flags set
	fn default() -> Self {
		Self::new(Id3Version::V3, TagFlags::default())
	}
}

impl Tag {
	/// Create an empty tag
	#[must_use]
	pub const fn new(version: Id3Version, flags: TagFlags) -> Self {
		Self {
			version,
			flags,
			frames: Vec::new(),
		}
	}

	/// Create a tag from a mapping of frame keys to values
	///
	/// Later pairs replace earlier ones with the same key.
	pub fn with_frames<K, V, I>(version: Id3Version, flags: TagFlags, frames: I) -> Self
	where
		K: Into<String>,
		V: Into<FrameValue>,
		I: IntoIterator<Item = (K, V)>,
	{
		let mut tag = Self::new(version, flags);
		for (key, value) in frames {
			tag.insert(key, value);
		}

		tag
	}

	/// The tag's ID3v2 version
	pub fn version(&self) -> Id3Version {
		self.version
	}

	/// The tag's flags
	pub fn flags(&self) -> TagFlags {
		self.flags
	}

	/// The number of frames in the tag
	pub fn len(&self) -> usize {
		self.frames.len()
	}

	/// Whether the tag has no frames
	pub fn is_empty(&self) -> bool {
		self.frames.is_empty()
	}

	/// Iterate over the tag's frames in write-collector order
	pub fn frames(&self) -> impl Iterator<Item = &Frame> {
		self.frames.iter()
	}

	/// Insert a frame value under a key, replacing any existing value
	///
	/// The key is not resolved here; a key the registry cannot resolve is
	/// silently dropped at serialization time instead.
	pub fn insert(&mut self, key: impl Into<String>, value: impl Into<FrameValue>) {
		self.insert_frame(Frame::new(key, value));
	}

	/// Get the value stored under a frame key or wire identifier
	///
	/// After a parse, frames are keyed by wire identifier, so a human-facing key
	/// is resolved through `registry` (at both identifier widths) before the
	/// lookup.
	pub fn get(&self, registry: &FrameRegistry, key: &str) -> Option<&FrameValue> {
		self.frames
			.iter()
			.find(|frame| Self::key_matches(registry, key, &frame.id))
			.map(Frame::value)
	}

	/// Remove and return the value stored under a frame key or wire identifier
	pub fn remove(&mut self, registry: &FrameRegistry, key: &str) -> Option<FrameValue> {
		let pos = self
			.frames
			.iter()
			.position(|frame| Self::key_matches(registry, key, &frame.id))?;

		Some(self.frames.remove(pos).value)
	}

	fn key_matches(registry: &FrameRegistry, key: &str, frame_id: &str) -> bool {
		if frame_id == key {
			return true;
		}

		registry
			.entry_for_key(key)
			.or_else(|| registry.entry_for_id(key))
			.is_some_and(|entry| entry.has_id(frame_id))
	}

	fn insert_frame(&mut self, frame: Frame) {
		match self.frames.iter_mut().find(|f| f.id == frame.id) {
			// Keys are unique within a tag
			Some(existing) => {
				log::warn!("Replacing frame with ID \"{}\"", frame.id);
				*existing = frame;
			},
			None => self.frames.push(frame),
		}
	}

	/// Serialize the tag: a fresh 10-byte header followed by every resolvable
	/// frame in turn
	///
	/// Frames the registry cannot resolve are skipped, not errored.
	///
	/// # Errors
	///
	/// The combined frame content exceeds the representable 28-bit tag size
	pub fn create_buffer(&self, registry: &FrameRegistry) -> Result<Vec<u8>> {
		let mut body = Vec::new();
		for frame in &self.frames {
			if let Some(bytes) = write::encode(&frame.id, &frame.value, self.version, registry)? {
				body.extend_from_slice(&bytes);
			}
		}

		let Ok(size) = u32::try_from(body.len()) else {
			err!(TooMuchData);
		};

		let header = TagHeader {
			version: self.version,
			flags: self.flags,
			size,
		};

		let mut buffer = Vec::with_capacity(HEADER_LEN + body.len());
		buffer.extend_from_slice(&header.as_bytes()?);
		buffer.extend_from_slice(&body);

		Ok(buffer)
	}

	/// Whether `buffer` opens with a valid 10-byte ID3v2 tag header
	///
	/// Valid means: at least 10 bytes, `b"ID3"` magic, a major version in
	/// (2, 3, 4), a zero revision byte, and no size byte with its high bit set.
	pub fn is_valid_header(buffer: &[u8]) -> bool {
		TagHeader::is_valid(buffer)
	}

	/// Parse a tag out of an arbitrary byte buffer
	///
	/// The buffer may contain leading and trailing non-tag data; the first valid
	/// header found wins, and spurious `"ID3"` sequences are searched past.
	/// Returns `None` if no valid header exists anywhere in the buffer.
	///
	/// Frame scanning stops at the first padding byte, at buffer exhaustion, or
	/// at a frame that fails to decode; a corrupt remainder still yields every
	/// frame decoded before it.
	pub fn from_buffer(buffer: &[u8], registry: &FrameRegistry) -> Option<Self> {
		let (pos, header) = TagHeader::find(buffer)?;

		let body_start = pos + HEADER_LEN;
		// Guard against a buffer shorter than header + declared size
		let body_end = std::cmp::min(body_start + header.size as usize, buffer.len());
		let body = &buffer[body_start..body_end];

		let mut tag = Tag::new(header.version, header.flags);

		let mut cursor = 0;
		while cursor < body.len() {
			match ParsedFrame::read(&body[cursor..], header.version, registry) {
				ParsedFrame::Next { frame, len } => {
					tag.insert_frame(frame);
					cursor += len;
				},
				ParsedFrame::Skip { len } => cursor += len,
				ParsedFrame::Eof => break,
			}
		}

		Some(tag)
	}
}
