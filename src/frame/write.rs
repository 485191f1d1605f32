use crate::error::Result;
use crate::frame::FrameValue;
use crate::header::Id3Version;
use crate::macros::err;
use crate::registry::FrameRegistry;
use crate::util::synchsafe::SynchsafeInteger;

use byteorder::{BigEndian, WriteBytesExt};

/// Encode one frame: identifier + size + flags (ID3v2.3/4) + body
///
/// `key` may be a human-facing frame key or a wire identifier of either width;
/// the latter is what frames accumulated by a parse are stored under. Either
/// way the identifier is emitted at the width appropriate for `version`.
///
/// Returns `Ok(None)` when `key` has no registry entry; the caller drops the
/// frame silently, it is never fatal for the whole tag.
pub(crate) fn encode(
	key: &str,
	value: &FrameValue,
	version: Id3Version,
	registry: &FrameRegistry,
) -> Result<Option<Vec<u8>>> {
	let entry = registry
		.entry_for_key(key)
		.or_else(|| registry.entry_for_id(key));

	let Some(entry) = entry else {
		log::warn!("No frame ID available for key \"{key}\", dropping");
		return Ok(None);
	};

	let id = entry.id_for(version);
	let body = entry.handler.encode_body(value);

	let mut bytes = Vec::with_capacity(version.frame_header_len() + body.len());
	bytes.extend_from_slice(id.as_bytes());

	match version {
		Id3Version::V2 => {
			// 3-byte big-endian size
			if body.len() > 0xFF_FFFF {
				err!(TooMuchData);
			}
			bytes.write_u24::<BigEndian>(body.len() as u32)?;
		},
		Id3Version::V3 => {
			let Ok(len) = u32::try_from(body.len()) else {
				err!(TooMuchData);
			};
			bytes.write_u32::<BigEndian>(len)?;
			bytes.write_u16::<BigEndian>(0)?;
		},
		Id3Version::V4 => {
			let Ok(len) = u32::try_from(body.len()) else {
				err!(TooMuchData);
			};
			bytes.write_u32::<BigEndian>(len.synch()?)?;
			bytes.write_u16::<BigEndian>(0)?;
		},
	}

	bytes.extend_from_slice(&body);

	Ok(Some(bytes))
}
