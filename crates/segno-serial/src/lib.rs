//! Segno Serial - Serialization visitors for Segno documents.
//!
//! Two parallel codecs over the same model types:
//!
//! - **Binary** - A compact, ordered, big-endian stream form used for
//!   document persistence and command payloads
//! - **JSON** - A structured keyed form for interchange and debugging
//!
//! The two are kept behaviorally identical: for every core type,
//! writing and reading back yields an equal value in either form.
//! Cross-form conversion goes through the model types.

pub mod binary;
pub mod document;
pub mod errors;
mod model;

pub use binary::{BinRead, BinWrite, BinaryReader, BinaryWriter};
pub use document::{
    document_from_json, document_to_json, load_document, save_document, FORMAT_VERSION, MAGIC,
};
pub use errors::{Result, SerializationFormatError};
