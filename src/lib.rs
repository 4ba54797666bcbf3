//! # huffpack
//!
//! Huffman compression for text.
//!
//! Text is counted into a frequency table, merged into a binary tree, turned
//! into a prefix-free code and packed MSB-first behind a one-byte padding
//! header. Two artifact formats are available:
//!
//! - raw ([`Session::compress`]): header and bits only, decodable by the
//!   session that produced it;
//! - container ([`container::pack`]): the frequency table is embedded, so any
//!   process can decode it.
//!
//! ```
//! use huffpack::{Session, container};
//!
//! let text = "abracadabra";
//! let session = Session::analyze(text)?;
//! let raw = session.compress(text)?;
//! assert_eq!(session.decompress(&raw)?, text);
//!
//! let packed = container::pack(text)?;
//! assert_eq!(container::unpack(&packed)?, text);
//! # Ok::<(), huffpack::HuffError>(())
//! ```

pub mod bitstream;
pub mod codes;
pub mod container;
pub mod driver;
pub mod error;
pub mod frequency;
pub mod journal;
pub mod session;
pub mod tree;

pub use codes::CodeTable;
pub use error::{HuffError, Result};
pub use frequency::{FrequencyMap, count_symbols, prepare_text};
pub use session::Session;
pub use tree::{MergeNode, MergeTree};
