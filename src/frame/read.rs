use super::{Frame, verify_id};
use crate::header::Id3Version;
use crate::registry::FrameRegistry;
use crate::util::synchsafe::SynchsafeInteger;

use byteorder::{BigEndian, ByteOrder};

/// The result of scanning one frame out of a tag body
pub(crate) enum ParsedFrame {
	/// A frame this codec understands; `len` is the full encoded length
	/// (version-dependent header + body)
	Next { frame: Frame, len: usize },
	/// A well-formed frame with no registry entry; advance `len` bytes and keep
	/// scanning (forward compatibility with frame types we don't understand)
	Skip { len: usize },
	/// Padding, truncation, or corruption; stop scanning without failing the tag
	Eof,
}

impl ParsedFrame {
	pub(crate) fn read(cursor: &[u8], version: Id3Version, registry: &FrameRegistry) -> Self {
		// A zero byte where an identifier should start marks the padding
		if cursor.is_empty() || cursor[0] == 0 {
			return Self::Eof;
		}

		let header_len = version.frame_header_len();
		if cursor.len() < header_len {
			return Self::Eof;
		}

		let id_len = version.frame_id_len();
		let id = match std::str::from_utf8(&cursor[..id_len]) {
			Ok(id) if verify_id(id).is_ok() => id,
			_ => {
				log::warn!("Encountered an invalid frame ID, assuming the remainder is corrupt");
				return Self::Eof;
			},
		};

		let size = match version {
			Id3Version::V2 => u32::from_be_bytes([0, cursor[3], cursor[4], cursor[5]]),
			Id3Version::V3 => BigEndian::read_u32(&cursor[4..8]),
			Id3Version::V4 => BigEndian::read_u32(&cursor[4..8]).unsynch(),
		};

		// The two ID3v2.3/4 flag bytes (cursor[8..10]) are read past and written
		// back as zero; none of the flagged features survive a round trip.

		let size = size as usize;
		if size > cursor.len() - header_len {
			log::warn!(
				"Frame \"{id}\" declares a size of {size} with only {} bytes remaining",
				cursor.len() - header_len
			);
			return Self::Eof;
		}

		let len = header_len + size;

		let Some(handler) = registry.resolve_handler(id) else {
			log::debug!("Skipping unknown frame: {id}");
			return Self::Skip { len };
		};

		let body = &cursor[header_len..len];
		let frame = Frame {
			id: id.to_owned(),
			value: handler.decode_body(body),
		};

		Self::Next { frame, len }
	}
}

#[cfg(test)]
mod tests {
	use super::ParsedFrame;
	use crate::frame::FrameValue;
	use crate::header::Id3Version;
	use crate::registry::FrameRegistry;

	fn v3_frame(id: &str, body: &[u8]) -> Vec<u8> {
		let mut bytes = id.as_bytes().to_vec();
		bytes.extend_from_slice(&u32::to_be_bytes(body.len() as u32));
		bytes.extend_from_slice(&[0, 0]);
		bytes.extend_from_slice(body);
		bytes
	}

	#[test_log::test]
	fn read_v3_text_frame() {
		let registry = FrameRegistry::default();
		let bytes = v3_frame("TIT2", b"Foo title");

		let ParsedFrame::Next { frame, len } =
			ParsedFrame::read(&bytes, Id3Version::V3, &registry)
		else {
			panic!("expected a frame");
		};

		assert_eq!(len, bytes.len());
		assert_eq!(frame.id(), "TIT2");
		assert_eq!(frame.value(), &FrameValue::Text(String::from("Foo title")));
	}

	#[test_log::test]
	fn read_v2_frame() {
		let registry = FrameRegistry::default();

		// TT2, 3-byte size, no flags
		let mut bytes = b"TT2".to_vec();
		bytes.extend_from_slice(&[0, 0, 3]);
		bytes.extend_from_slice(b"Foo");

		let ParsedFrame::Next { frame, len } =
			ParsedFrame::read(&bytes, Id3Version::V2, &registry)
		else {
			panic!("expected a frame");
		};

		assert_eq!(len, 9);
		assert_eq!(frame.id(), "TT2");
		assert_eq!(frame.value(), &FrameValue::Text(String::from("Foo")));
	}

	#[test_log::test]
	fn read_v4_synchsafe_size() {
		let registry = FrameRegistry::default();

		let body = vec![b'x'; 200];
		let mut bytes = b"TIT2".to_vec();
		// 200 -> synchsafe 0x01 0x48
		bytes.extend_from_slice(&[0, 0, 0x01, 0x48]);
		bytes.extend_from_slice(&[0, 0]);
		bytes.extend_from_slice(&body);

		let ParsedFrame::Next { frame, len } =
			ParsedFrame::read(&bytes, Id3Version::V4, &registry)
		else {
			panic!("expected a frame");
		};

		assert_eq!(len, 210);
		assert_eq!(frame.value(), &FrameValue::Text("x".repeat(200)));
	}

	#[test_log::test]
	fn unknown_frame_is_skipped_not_fatal() {
		let registry = FrameRegistry::default();
		let bytes = v3_frame("TMOO", b"Mellow");

		let ParsedFrame::Skip { len } = ParsedFrame::read(&bytes, Id3Version::V3, &registry)
		else {
			panic!("expected a skip");
		};

		assert_eq!(len, bytes.len());
	}

	#[test_log::test]
	fn padding_is_eof() {
		let registry = FrameRegistry::default();

		assert!(matches!(
			ParsedFrame::read(&[0, 0, 0, 0], Id3Version::V3, &registry),
			ParsedFrame::Eof
		));
		assert!(matches!(
			ParsedFrame::read(&[], Id3Version::V3, &registry),
			ParsedFrame::Eof
		));
	}

	#[test_log::test]
	fn oversized_declaration_is_eof() {
		let registry = FrameRegistry::default();

		let mut bytes = v3_frame("TIT2", b"Foo title");
		// Lie about the body length
		bytes[7] = 0xFF;

		assert!(matches!(
			ParsedFrame::read(&bytes, Id3Version::V3, &registry),
			ParsedFrame::Eof
		));
	}

	#[test_log::test]
	fn truncated_header_is_eof() {
		let registry = FrameRegistry::default();

		assert!(matches!(
			ParsedFrame::read(b"TIT2\x00\x00", Id3Version::V3, &registry),
			ParsedFrame::Eof
		));
	}

	#[test_log::test]
	fn invalid_id_is_eof() {
		let registry = FrameRegistry::default();
		let bytes = v3_frame("T+T2", b"Foo");

		assert!(matches!(
			ParsedFrame::read(&bytes, Id3Version::V3, &registry),
			ParsedFrame::Eof
		));
	}
}
