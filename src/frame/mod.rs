//! ID3v2 frames
//!
//! A frame is one key/value record inside a tag body: identifier + size + flags
//! (ID3v2.3/4 only) + body. The body is raw bytes whose interpretation belongs to
//! the [`FrameHandler`](crate::registry::FrameHandler) registered for the
//! identifier.

pub(crate) mod read;
pub(crate) mod write;

use crate::error::{ErrorKind, Id3Error, Result};

/// The decoded value of a frame body
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum FrameValue {
	/// Text content
	Text(String),
	/// Opaque bytes
	Binary(Vec<u8>),
}

impl FrameValue {
	/// Returns the text content, if this is a text value
	pub fn text(&self) -> Option<&str> {
		match self {
			Self::Text(text) => Some(text),
			Self::Binary(_) => None,
		}
	}
}

impl From<String> for FrameValue {
	fn from(value: String) -> Self {
		Self::Text(value)
	}
}

impl From<&str> for FrameValue {
	fn from(value: &str) -> Self {
		Self::Text(value.to_owned())
	}
}

impl From<Vec<u8>> for FrameValue {
	fn from(value: Vec<u8>) -> Self {
		Self::Binary(value)
	}
}

/// One frame owned by a [`Tag`](crate::tag::Tag)
///
/// Before a tag is serialized, a frame's `id` is the human-facing key it was
/// inserted under (`"title"`). After a parse, it is the wire identifier the frame
/// was stored under (`"TIT2"`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
	pub(crate) id: String,
	pub(crate) value: FrameValue,
}

impl Frame {
	/// Create a new frame
	pub fn new(id: impl Into<String>, value: impl Into<FrameValue>) -> Self {
		Self {
			id: id.into(),
			value: value.into(),
		}
	}

	/// The frame key or wire identifier
	pub fn id(&self) -> &str {
		&self.id
	}

	/// The frame value
	pub fn value(&self) -> &FrameValue {
		&self.value
	}
}

/// Verify that a wire identifier only contains `'A'..='Z'` and `'0'..='9'`
pub(crate) fn verify_id(id: &str) -> Result<()> {
	for c in id.chars() {
		if !c.is_ascii_uppercase() && !c.is_ascii_digit() {
			return Err(Id3Error::new(ErrorKind::BadFrameId(
				id.as_bytes().to_vec(),
			)));
		}
	}

	Ok(())
}
