//! Contains the errors that can arise within id3rw
//!
//! The primary error is [`Id3Error`]. The type of error is determined by [`ErrorKind`],
//! which can be extended at any time.

use std::fmt::{Debug, Display, Formatter};

/// Alias for `Result<T, Id3Error>`
pub type Result<T> = std::result::Result<T, Id3Error>;

/// The types of errors that can occur
#[derive(Debug)]
#[non_exhaustive]
pub enum ErrorKind {
	// Tag data related errors
	/// Attempting to encode a size that does not fit in a synchsafe integer
	TooMuchData,
	/// Arises when a tag is expected (Ex. found an "ID3" byte sequence), but isn't found
	FakeTag,
	/// Arises when an invalid ID3v2 version is found
	BadVersion(u8, u8),

	// Frame related errors
	/// Arises when a frame ID contains invalid characters (must be within `'A'..'Z'` or `'0'..'9'`)
	BadFrameId(Vec<u8>),

	// Conversions for external errors
	/// Represents all cases of [`std::io::Error`].
	Io(std::io::Error),
}

/// Errors that could occur within id3rw
pub struct Id3Error {
	pub(crate) kind: ErrorKind,
}

impl Id3Error {
	/// Create an `Id3Error` from an [`ErrorKind`]
	///
	/// # Examples
	///
	/// ```rust
	/// use id3rw::error::{ErrorKind, Id3Error};
	///
	/// let fake_tag = Id3Error::new(ErrorKind::FakeTag);
	/// ```
	#[must_use]
	pub const fn new(kind: ErrorKind) -> Self {
		Self { kind }
	}

	/// Returns the [`ErrorKind`]
	///
	/// # Examples
	///
	/// ```rust
	/// use id3rw::error::{ErrorKind, Id3Error};
	///
	/// let fake_tag = Id3Error::new(ErrorKind::FakeTag);
	/// if let ErrorKind::FakeTag = fake_tag.kind() {
	/// 	println!("Where's the tag?");
	/// }
	/// ```
	pub fn kind(&self) -> &ErrorKind {
		&self.kind
	}
}

impl std::error::Error for Id3Error {}

impl Debug for Id3Error {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{:?}", self.kind)
	}
}

impl From<std::io::Error> for Id3Error {
	fn from(input: std::io::Error) -> Self {
		Self {
			kind: ErrorKind::Io(input),
		}
	}
}

impl Display for Id3Error {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self.kind {
			// Conversions
			ErrorKind::Io(ref err) => write!(f, "{err}"),

			ErrorKind::TooMuchData => write!(
				f,
				"Attempted to encode a size that does not fit in 28 bits"
			),
			ErrorKind::FakeTag => write!(f, "Reading: Expected a tag, found invalid data"),
			ErrorKind::BadVersion(major, revision) => write!(
				f,
				"Found an invalid version (v{major}.{revision}), expected any major revision in: \
				 (2, 3, 4)"
			),
			ErrorKind::BadFrameId(ref frame_id) => {
				write!(f, "Failed to parse a frame ID: 0x{frame_id:x?}")
			},
		}
	}
}
