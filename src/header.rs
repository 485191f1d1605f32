//! The 10-byte ID3v2 tag header

use crate::error::{ErrorKind, Id3Error, Result};
use crate::macros::err;
use crate::util::synchsafe::{decode_size, encode_size};

/// The magic bytes that open every ID3v2 tag
pub(crate) const TAG_MARKER: [u8; 3] = *b"ID3";

/// The byte length of the tag header
pub(crate) const HEADER_LEN: usize = 10;

/// The ID3v2 version
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum Id3Version {
	/// ID3v2.2
	V2,
	/// ID3v2.3
	V3,
	/// ID3v2.4
	V4,
}

impl Id3Version {
	/// The byte length of a frame identifier for this version
	pub(crate) fn frame_id_len(self) -> usize {
		match self {
			Self::V2 => 3,
			Self::V3 | Self::V4 => 4,
		}
	}

	/// The byte length of a full frame header (identifier + size + flags) for this version
	pub(crate) fn frame_header_len(self) -> usize {
		match self {
			Self::V2 => 6,
			Self::V3 | Self::V4 => 10,
		}
	}

	pub(crate) fn as_u8(self) -> u8 {
		match self {
			Self::V2 => 2,
			Self::V3 => 3,
			Self::V4 => 4,
		}
	}
}

/// Flags that apply to the entire tag
#[derive(Default, Copy, Clone, Debug, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct TagFlags {
	/// Whether or not all frames are unsynchronised
	///
	/// This is carried verbatim; the codec does not apply byte stuffing itself.
	pub unsynchronisation: bool,
	/// Indicates that an extended header follows the tag header
	pub extended_header: bool,
	/// Indicates if the tag is in an experimental stage
	pub experimental: bool,
	/// Indicates that the tag includes a footer
	pub footer: bool,
}

impl TagFlags {
	/// Get the byte representation of the flags
	pub fn as_byte(self) -> u8 {
		let mut byte = 0;

		if self.unsynchronisation {
			byte |= 0x80;
		}

		if self.extended_header {
			byte |= 0x40;
		}

		if self.experimental {
			byte |= 0x20;
		}

		if self.footer {
			byte |= 0x10;
		}

		byte
	}

	/// Parse the flags from the tag header flag byte
	pub fn from_byte(byte: u8) -> Self {
		Self {
			unsynchronisation: byte & 0x80 == 0x80,
			extended_header: byte & 0x40 == 0x40,
			experimental: byte & 0x20 == 0x20,
			footer: byte & 0x10 == 0x10,
		}
	}
}

#[derive(Copy, Clone, Debug)]
pub(crate) struct TagHeader {
	pub version: Id3Version,
	pub flags: TagFlags,
	/// The size of the tag contents (**DOES NOT INCLUDE THE HEADER**)
	pub size: u32,
}

impl TagHeader {
	/// Parse and validate a 10-byte tag header
	///
	/// A valid header starts with `b"ID3"`, has a major version in (2, 3, 4), a zero
	/// revision byte, and a size field with every high bit clear.
	pub(crate) fn parse(header: &[u8]) -> Result<Self> {
		if header.len() < HEADER_LEN {
			err!(FakeTag);
		}

		if header[..3] != TAG_MARKER {
			err!(FakeTag);
		}

		// Version is stored as [major, revision]; any nonzero revision is rejected
		let version = match (header[3], header[4]) {
			(2, 0) => Id3Version::V2,
			(3, 0) => Id3Version::V3,
			(4, 0) => Id3Version::V4,
			(major, revision) => {
				return Err(Id3Error::new(ErrorKind::BadVersion(major, revision)));
			},
		};

		// The size bytes are the authoritative guard against corrupt headers, so
		// stray high bits reject the whole candidate rather than being masked off.
		if header[6..10].iter().any(|b| b & 0x80 != 0) {
			err!(FakeTag);
		}

		Ok(TagHeader {
			version,
			flags: TagFlags::from_byte(header[5]),
			size: decode_size([header[6], header[7], header[8], header[9]]),
		})
	}

	/// Whether `header` opens with a valid 10-byte ID3v2 tag header
	pub(crate) fn is_valid(header: &[u8]) -> bool {
		Self::parse(header).is_ok()
	}

	/// Search `buffer` for the first valid tag header
	///
	/// Every `b"ID3"` occurrence is a candidate; a candidate whose surrounding 10
	/// bytes fail validation sends the search on to the next occurrence.
	pub(crate) fn find(buffer: &[u8]) -> Option<(usize, Self)> {
		log::debug!("Searching for an ID3v2 tag");

		let mut pos = 0;
		while pos + TAG_MARKER.len() <= buffer.len() {
			if buffer[pos..pos + TAG_MARKER.len()] == TAG_MARKER {
				if let Ok(header) = Self::parse(&buffer[pos..]) {
					log::debug!("Found an ID3v2 tag at offset: {pos}");
					return Some((pos, header));
				}
			}

			pos += 1;
		}

		None
	}

	/// Get the 10-byte representation of the header
	pub(crate) fn as_bytes(&self) -> Result<[u8; 10]> {
		let mut header = [0; 10];

		header[..3].copy_from_slice(&TAG_MARKER);
		header[3] = self.version.as_u8();
		// header[4] stays 0, the revision this codec writes
		header[5] = self.flags.as_byte();
		header[6..].copy_from_slice(&encode_size(self.size)?);

		Ok(header)
	}
}

#[cfg(test)]
mod tests {
	use super::{Id3Version, TagFlags, TagHeader};

	// Version 3, no flags, body size 10
	const VALID: [u8; 10] = [0x49, 0x44, 0x33, 0x03, 0x00, 0x00, 0x00, 0x00, 0x00, 0x0A];

	#[test_log::test]
	fn parse_valid_header() {
		let header = TagHeader::parse(&VALID).unwrap();

		assert_eq!(header.version, Id3Version::V3);
		assert_eq!(header.flags, TagFlags::default());
		assert_eq!(header.size, 10);
	}

	#[test_log::test]
	fn reject_bad_magic() {
		let mut header = VALID;
		header[0] = b'X';

		assert!(!TagHeader::is_valid(&header));
	}

	#[test_log::test]
	fn reject_bad_version() {
		let mut header = VALID;
		header[3] = 5;

		assert!(!TagHeader::is_valid(&header));
	}

	#[test_log::test]
	fn reject_nonzero_revision() {
		let mut header = VALID;
		header[4] = 1;

		assert!(!TagHeader::is_valid(&header));
	}

	#[test_log::test]
	fn reject_unsynchsafe_size() {
		for i in 6..10 {
			let mut header = VALID;
			header[i] |= 0x80;

			assert!(!TagHeader::is_valid(&header));
		}
	}

	#[test_log::test]
	fn reject_truncated_header() {
		assert!(!TagHeader::is_valid(&VALID[..9]));
	}

	#[test_log::test]
	fn find_skips_false_positives() {
		// A spurious "ID3" with an invalid header, then the genuine tag
		let mut buffer = b"ID3 is an audio tagging format".to_vec();
		let genuine = buffer.len();
		buffer.extend_from_slice(&VALID);

		let (pos, header) = TagHeader::find(&buffer).unwrap();
		assert_eq!(pos, genuine);
		assert_eq!(header.size, 10);
	}

	#[test_log::test]
	fn find_nothing() {
		assert!(TagHeader::find(b"no tag in here").is_none());
	}

	#[test_log::test]
	fn flag_byte_roundtrip() {
		let flags = TagFlags {
			unsynchronisation: true,
			extended_header: false,
			experimental: true,
			footer: false,
		};

		assert_eq!(flags.as_byte(), 0xA0);
		assert_eq!(TagFlags::from_byte(0xA0), flags);
	}
}
