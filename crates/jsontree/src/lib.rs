//! An in-memory JSON document library: parsing, serialization, tree
//! mutation, [RFC 6901] JSON Pointer, [RFC 6902] JSON Patch, and [RFC 7386]
//! JSON Merge Patch.
//!
//! [RFC 6901]: https://datatracker.ietf.org/doc/html/rfc6901
//! [RFC 6902]: https://datatracker.ietf.org/doc/html/rfc6902
//! [RFC 7386]: https://datatracker.ietf.org/doc/html/rfc7386
//!
//! ```rust
//! use jsontree::{parse, serialize, SerializeOptions};
//!
//! let doc = parse(br#"{"a":1,"b":[2,3]}"#).unwrap();
//! assert_eq!(serialize(&doc, SerializeOptions::default()), r#"{"a":1,"b":[2,3]}"#);
//! ```

#![deny(missing_docs)]

mod alloc_hooks;
mod compare;
mod error;
mod escape;
mod merge_patch;
mod minify;
mod number;
mod options;
mod parser;
mod patch;
mod pointer;
mod serializer;
mod value;

pub use alloc_hooks::{Allocator, DefaultAllocator};
pub use compare::{equal, equal_unordered, sort_array_of_strings, sort_object_keys};
pub use error::{DuplicationLimitExceeded, ParseError, ParseErrorKind, PatchError, PointerError, last_parse_error};
pub use merge_patch::{apply_merge_patch, diff_merge_patch};
pub use minify::minify;
pub use number::Number;
pub use options::{DuplicateOptions, Format, MinifyOptions, ParserOptions, SerializeOptions};
pub use parser::{parse, parse_prefix, parse_with_options};
pub use patch::{apply_patch, diff};
pub use pointer::{Pointer, Token, pointer_to};
pub use serializer::{serialize, serialize_into};
pub use value::{Array, Object, Value, ValueKind};
