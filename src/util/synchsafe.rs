//! Utilities for working with synchsafe integers
//!
//! Tag and frame sizes are stored as synchsafe integers: every byte keeps its most
//! significant bit clear, so the size field can never contain a byte sequence that
//! looks like an MPEG audio sync marker. A parser can therefore always skip the
//! whole tag unambiguously.

use crate::error::Result;
use crate::macros::err;

use byteorder::{BigEndian, ByteOrder};

/// The largest value representable in a 4-byte synchsafe integer (28 usable bits)
pub const MAX_SYNCHSAFE_U32: u32 = 0x0FFF_FFFF;

/// An integer that can be converted to and from its synchsafe representation
pub trait SynchsafeInteger: Sized {
	/// Create a synchsafe integer
	///
	/// # Errors
	///
	/// `self` doesn't fit in 28 bits
	///
	/// # Examples
	///
	/// ```rust
	/// use id3rw::util::synchsafe::SynchsafeInteger;
	///
	/// # fn main() -> id3rw::error::Result<()> {
	/// // Maximum value we can represent in a synchsafe u32
	/// let unsynch_number = 0xFFF_FFFF_u32;
	/// let synch_number = unsynch_number.synch()?;
	///
	/// // Each byte should have 7 set bits and an MSB of 0
	/// assert_eq!(synch_number, 0b01111111_01111111_01111111_01111111_u32);
	/// # Ok(()) }
	/// ```
	fn synch(self) -> Result<Self>;

	/// Unsynchronise a synchsafe integer
	///
	/// # Examples
	///
	/// ```rust
	/// use id3rw::util::synchsafe::SynchsafeInteger;
	///
	/// # fn main() -> id3rw::error::Result<()> {
	/// let unsynch_number = 0xFFF_FFFF_u32;
	/// let synch_number = unsynch_number.synch()?;
	///
	/// // Our re-unsynchronized number should match our original
	/// assert_eq!(synch_number.unsynch(), unsynch_number);
	/// # Ok(()) }
	/// ```
	fn unsynch(self) -> Self;
}

impl SynchsafeInteger for u32 {
	fn synch(self) -> Result<Self> {
		if self > MAX_SYNCHSAFE_U32 {
			err!(TooMuchData);
		}

		Ok((self & 0x7F)
			| ((self & (0x7F << 7)) << 1)
			| ((self & (0x7F << 14)) << 2)
			| ((self & (0x7F << 21)) << 3))
	}

	fn unsynch(self) -> Self {
		((self & 0x7F00_0000) >> 3) | ((self & 0x7F_0000) >> 2) | ((self & 0x7F00) >> 1) | (self & 0x7F)
	}
}

/// Encode a size as a 4-byte synchsafe integer, most significant group first
///
/// # Errors
///
/// `size` doesn't fit in 28 bits
pub fn encode_size(size: u32) -> Result<[u8; 4]> {
	let mut bytes = [0; 4];
	BigEndian::write_u32(&mut bytes, size.synch()?);
	Ok(bytes)
}

/// Decode a 4-byte synchsafe integer
///
/// Stray high bits are ignored by the reconstruction; rejecting them is the
/// responsibility of the header validator.
pub fn decode_size(bytes: [u8; 4]) -> u32 {
	BigEndian::read_u32(&bytes).unsynch()
}

#[cfg(test)]
mod tests {
	use super::{MAX_SYNCHSAFE_U32, SynchsafeInteger, decode_size, encode_size};

	macro_rules! synchsafe_integer_tests {
		(
			$($name:ident => {
				synch: $original:literal, $new:literal;
				unsynch: $original_unsync:literal, $new_unsynch:literal;
			});+
		) => {
			$(
				paste::paste! {
					#[test_log::test]
					fn [<$name _synch>]() {
						assert_eq!($original.synch().unwrap(), $new);
					}

					#[test_log::test]
					fn [<$name _unsynch>]() {
						assert_eq!($original_unsync.unsynch(), $new_unsynch);
					}
				}
			)+
		};
	}

	synchsafe_integer_tests! {
		zero => {
			synch:   0x0000_0000_u32, 0x0000_0000_u32;
			unsynch: 0x0000_0000_u32, 0x0000_0000_u32;
		};
		small => {
			synch:   0x0000_00FF_u32, 0x0000_017F_u32;
			unsynch: 0x0000_017F_u32, 0x0000_00FF_u32;
		};
		maximum => {
			synch:   0xFFF_FFFF_u32, 0x7F7F_7F7F_u32;
			unsynch: 0x7F7F_7F7F_u32, 0xFFF_FFFF_u32;
		}
	}

	#[test_log::test]
	fn u32_synch_too_large() {
		assert!((MAX_SYNCHSAFE_U32 + 1).synch().is_err());
		assert!(u32::MAX.synch().is_err());
	}

	#[test_log::test]
	fn size_roundtrip() {
		for size in [0_u32, 1, 127, 128, 0x3FFF, 0x4000, 257, MAX_SYNCHSAFE_U32] {
			let encoded = encode_size(size).unwrap();
			assert!(encoded.iter().all(|b| b & 0x80 == 0));
			assert_eq!(decode_size(encoded), size);
		}
	}

	#[test_log::test]
	fn size_encoding_splits_into_septets() {
		// 257 = 0b10_0000001 -> 0x00 0x00 0x02 0x01
		assert_eq!(encode_size(257).unwrap(), [0x00, 0x00, 0x02, 0x01]);
	}

	#[test_log::test]
	fn size_encoding_rejects_out_of_range() {
		assert!(encode_size(MAX_SYNCHSAFE_U32 + 1).is_err());
	}
}
