//! Read and write ID3v2 metadata tags.
//!
//! The core of this crate is the binary codec: translating between the ID3v2
//! wire format and an in-memory [`Tag`]. Per-frame semantics (text encodings,
//! picture layouts, ...) are deliberately out of scope; frames are produced and
//! consumed through the handlers registered in a [`FrameRegistry`].
//!
//! # Examples
//!
//! ## Creating a tag
//!
//! ```rust
//! use id3rw::header::{Id3Version, TagFlags};
//! use id3rw::registry::FrameRegistry;
//! use id3rw::tag::Tag;
//!
//! # fn main() -> id3rw::error::Result<()> {
//! let registry = FrameRegistry::default();
//!
//! let mut tag = Tag::new(Id3Version::V3, TagFlags::default());
//! tag.insert("title", "Foo title");
//! tag.insert("artist", "Bar artist");
//!
//! let buffer = tag.create_buffer(&registry)?;
//! assert_eq!(&buffer[..3], b"ID3");
//! # Ok(()) }
//! ```
//!
//! ## Parsing a tag out of arbitrary bytes
//!
//! The buffer may contain leading and trailing non-tag data; the codec searches
//! for the first valid header.
//!
//! ```rust,no_run
//! use id3rw::read_from_path;
//! use id3rw::registry::FrameRegistry;
//!
//! # fn main() -> id3rw::error::Result<()> {
//! let registry = FrameRegistry::default();
//!
//! if let Some(tag) = read_from_path("test.mp3", &registry)? {
//! 	println!("title: {:?}", tag.get(&registry, "title"));
//! }
//! # Ok(()) }
//! ```

pub mod error;
pub mod frame;
pub mod header;
mod macros;
pub mod registry;
pub mod tag;
pub mod util;

pub use frame::{Frame, FrameValue};
pub use header::{Id3Version, TagFlags};
pub use registry::{FrameHandler, FrameRegistry};
pub use tag::Tag;

use crate::error::Result;

use std::io::Read;
use std::path::Path;

/// Read a tag from a reader
///
/// This is a thin convenience wrapper: the reader is drained into memory and
/// handed to [`Tag::from_buffer`]. There is no streaming or partial decode.
///
/// # Errors
///
/// The reader fails
pub fn read_from<R>(reader: &mut R, registry: &FrameRegistry) -> Result<Option<Tag>>
where
	R: Read,
{
	let mut buffer = Vec::new();
	reader.read_to_end(&mut buffer)?;

	Ok(Tag::from_buffer(&buffer, registry))
}

/// Read a tag from a path
///
/// # Errors
///
/// The file cannot be read
pub fn read_from_path(path: impl AsRef<Path>, registry: &FrameRegistry) -> Result<Option<Tag>> {
	let buffer = std::fs::read(path)?;

	Ok(Tag::from_buffer(&buffer, registry))
}
