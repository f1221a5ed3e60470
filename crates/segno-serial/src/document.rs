//! The persisted document formats.
//!
//! The binary form is a magic/version header followed by the root object
//! through the binary visitor. The JSON form mirrors it as nested keyed
//! objects; unknown fields are ignored on read so documents survive
//! forward-compatible schema growth, but identifiers and kind tags are
//! mandatory and fail the whole read when absent.

use serde::{Deserialize, Serialize};

use segno_model::Document;

use crate::binary::{BinRead, BinWrite, BinaryReader, BinaryWriter};
use crate::errors::{Result, SerializationFormatError};

/// File magic for binary Segno documents.
pub const MAGIC: [u8; 4] = *b"SGNO";

/// Current format version, bumped on any wire-layout change.
pub const FORMAT_VERSION: u32 = 1;

/// Serialize a document to the binary file form.
pub fn save_document(doc: &Document) -> Result<Vec<u8>> {
    let mut w = BinaryWriter::new();
    w.write_raw(&MAGIC);
    w.write_u32(FORMAT_VERSION)?;
    doc.write(&mut w)?;
    Ok(w.into_bytes())
}

/// Load a document from the binary file form.
///
/// Fails as a whole on bad magic, unsupported version or any decode
/// error; no partially-built document escapes.
pub fn load_document(bytes: &[u8]) -> Result<Document> {
    let mut r = BinaryReader::new(bytes);
    let found = r.read_raw(4)?;
    if found != MAGIC {
        let mut found_arr = [0u8; 4];
        found_arr.copy_from_slice(&found);
        return Err(SerializationFormatError::BadMagic {
            expected: MAGIC,
            found: found_arr,
        });
    }
    let version = r.read_u32()?;
    if version != FORMAT_VERSION {
        return Err(SerializationFormatError::UnsupportedVersion(version));
    }
    let doc = Document::read(&mut r)?;
    if r.remaining() != 0 {
        return Err(SerializationFormatError::TrailingBytes(r.remaining()));
    }
    log::debug!(
        "loaded document '{}': {} intervals, {} events, {} cables",
        doc.name,
        doc.intervals.len(),
        doc.events.len(),
        doc.cables.len()
    );
    Ok(doc)
}

/// JSON mirror of the binary file: version plus the root object.
#[derive(Serialize, Deserialize)]
struct DocumentFile {
    version: u32,
    document: Document,
}

/// Serialize a document to the structured JSON form.
pub fn document_to_json(doc: &Document) -> Result<String> {
    let file = DocumentFile {
        version: FORMAT_VERSION,
        document: doc.clone(),
    };
    Ok(serde_json::to_string_pretty(&file)?)
}

/// Load a document from the structured JSON form.
pub fn document_from_json(json: &str) -> Result<Document> {
    let file: DocumentFile = serde_json::from_str(json)?;
    if file.version != FORMAT_VERSION {
        return Err(SerializationFormatError::UnsupportedVersion(file.version));
    }
    Ok(file.document)
}
