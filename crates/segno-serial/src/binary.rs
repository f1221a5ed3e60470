//! The compact binary stream form.
//!
//! Big-endian throughout. Strings are u32-length-prefixed UTF-8,
//! sequences are u32-length-prefixed and order-preserving, optionals are
//! a presence byte. Reader and writer are exact mirrors; for every type
//! `read(write(x)) == x`.

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use std::io::Read;

use crate::errors::{Result, SerializationFormatError};

/// Writer half of the binary visitor pair.
#[derive(Default)]
pub struct BinaryWriter {
    buf: Vec<u8>,
}

impl BinaryWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn write_u8(&mut self, value: u8) -> Result<()> {
        self.buf.write_u8(value)?;
        Ok(())
    }

    pub fn write_bool(&mut self, value: bool) -> Result<()> {
        self.write_u8(u8::from(value))
    }

    pub fn write_u32(&mut self, value: u32) -> Result<()> {
        self.buf.write_u32::<BigEndian>(value)?;
        Ok(())
    }

    pub fn write_i64(&mut self, value: i64) -> Result<()> {
        self.buf.write_i64::<BigEndian>(value)?;
        Ok(())
    }

    pub fn write_f64(&mut self, value: f64) -> Result<()> {
        self.buf.write_f64::<BigEndian>(value)?;
        Ok(())
    }

    pub fn write_str(&mut self, value: &str) -> Result<()> {
        let bytes = value.as_bytes();
        self.write_u32(bytes.len() as u32)?;
        self.buf.extend_from_slice(bytes);
        Ok(())
    }

    /// Raw bytes with a length prefix, for nested payload blobs.
    pub fn write_bytes(&mut self, value: &[u8]) -> Result<()> {
        self.write_u32(value.len() as u32)?;
        self.buf.extend_from_slice(value);
        Ok(())
    }

    /// Raw bytes without a prefix (magic headers).
    pub fn write_raw(&mut self, value: &[u8]) {
        self.buf.extend_from_slice(value);
    }
}

/// Reader half of the binary visitor pair.
pub struct BinaryReader<'a> {
    data: &'a [u8],
}

impl<'a> BinaryReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    /// Bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.data.len()
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        self.data.read_u8().map_err(map_eof)
    }

    pub fn read_bool(&mut self) -> Result<bool> {
        match self.read_u8()? {
            0 => Ok(false),
            1 => Ok(true),
            tag => Err(SerializationFormatError::InvalidTag { what: "bool", tag }),
        }
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        self.data.read_u32::<BigEndian>().map_err(map_eof)
    }

    pub fn read_i64(&mut self) -> Result<i64> {
        self.data.read_i64::<BigEndian>().map_err(map_eof)
    }

    pub fn read_f64(&mut self) -> Result<f64> {
        self.data.read_f64::<BigEndian>().map_err(map_eof)
    }

    pub fn read_str(&mut self) -> Result<String> {
        let bytes = self.read_bytes()?;
        String::from_utf8(bytes).map_err(|_| SerializationFormatError::InvalidUtf8)
    }

    pub fn read_bytes(&mut self) -> Result<Vec<u8>> {
        let len = self.read_u32()? as usize;
        self.read_raw(len)
    }

    pub fn read_raw(&mut self, len: usize) -> Result<Vec<u8>> {
        if self.data.len() < len {
            return Err(SerializationFormatError::UnexpectedEof);
        }
        let mut buf = vec![0u8; len];
        self.data.read_exact(&mut buf).map_err(map_eof)?;
        Ok(buf)
    }
}

fn map_eof(err: std::io::Error) -> SerializationFormatError {
    if err.kind() == std::io::ErrorKind::UnexpectedEof {
        SerializationFormatError::UnexpectedEof
    } else {
        SerializationFormatError::Io(err)
    }
}

/// A type with a binary stream form.
pub trait BinWrite {
    fn write(&self, w: &mut BinaryWriter) -> Result<()>;

    fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut w = BinaryWriter::new();
        self.write(&mut w)?;
        Ok(w.into_bytes())
    }
}

/// Mirror of [`BinWrite`].
pub trait BinRead: Sized {
    fn read(r: &mut BinaryReader<'_>) -> Result<Self>;

    fn from_bytes(data: &[u8]) -> Result<Self> {
        let mut r = BinaryReader::new(data);
        let value = Self::read(&mut r)?;
        if r.remaining() != 0 {
            return Err(SerializationFormatError::TrailingBytes(r.remaining()));
        }
        Ok(value)
    }
}

impl BinWrite for String {
    fn write(&self, w: &mut BinaryWriter) -> Result<()> {
        w.write_str(self)
    }
}

impl BinRead for String {
    fn read(r: &mut BinaryReader<'_>) -> Result<Self> {
        r.read_str()
    }
}

impl BinWrite for i64 {
    fn write(&self, w: &mut BinaryWriter) -> Result<()> {
        w.write_i64(*self)
    }
}

impl BinRead for i64 {
    fn read(r: &mut BinaryReader<'_>) -> Result<Self> {
        r.read_i64()
    }
}

impl BinWrite for f64 {
    fn write(&self, w: &mut BinaryWriter) -> Result<()> {
        w.write_f64(*self)
    }
}

impl BinRead for f64 {
    fn read(r: &mut BinaryReader<'_>) -> Result<Self> {
        r.read_f64()
    }
}

impl BinWrite for bool {
    fn write(&self, w: &mut BinaryWriter) -> Result<()> {
        w.write_bool(*self)
    }
}

impl BinRead for bool {
    fn read(r: &mut BinaryReader<'_>) -> Result<Self> {
        r.read_bool()
    }
}

impl<T: BinWrite> BinWrite for Option<T> {
    fn write(&self, w: &mut BinaryWriter) -> Result<()> {
        match self {
            Some(value) => {
                w.write_u8(1)?;
                value.write(w)
            }
            None => w.write_u8(0),
        }
    }
}

impl<T: BinRead> BinRead for Option<T> {
    fn read(r: &mut BinaryReader<'_>) -> Result<Self> {
        match r.read_u8()? {
            0 => Ok(None),
            1 => Ok(Some(T::read(r)?)),
            tag => Err(SerializationFormatError::InvalidTag { what: "option", tag }),
        }
    }
}

impl<T: BinWrite> BinWrite for Vec<T> {
    fn write(&self, w: &mut BinaryWriter) -> Result<()> {
        w.write_u32(self.len() as u32)?;
        for item in self {
            item.write(w)?;
        }
        Ok(())
    }
}

impl<T: BinRead> BinRead for Vec<T> {
    fn read(r: &mut BinaryReader<'_>) -> Result<Self> {
        let len = r.read_u32()? as usize;
        let mut items = Vec::with_capacity(len.min(4096));
        for _ in 0..len {
            items.push(T::read(r)?);
        }
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitive_round_trip() {
        let mut w = BinaryWriter::new();
        w.write_i64(-42).unwrap();
        w.write_f64(0.25).unwrap();
        w.write_bool(true).unwrap();
        w.write_str("héllo").unwrap();
        let bytes = w.into_bytes();

        let mut r = BinaryReader::new(&bytes);
        assert_eq!(r.read_i64().unwrap(), -42);
        assert_eq!(r.read_f64().unwrap(), 0.25);
        assert!(r.read_bool().unwrap());
        assert_eq!(r.read_str().unwrap(), "héllo");
        assert_eq!(r.remaining(), 0);
    }

    #[test]
    fn test_big_endian_layout() {
        let mut w = BinaryWriter::new();
        w.write_u32(2).unwrap();
        assert_eq!(w.into_bytes(), [0, 0, 0, 2]);
    }

    #[test]
    fn test_truncated_read_fails() {
        let mut r = BinaryReader::new(&[0, 0]);
        assert!(matches!(
            r.read_u32().unwrap_err(),
            SerializationFormatError::UnexpectedEof
        ));
    }

    #[test]
    fn test_bad_bool_tag() {
        let mut r = BinaryReader::new(&[7]);
        assert!(matches!(
            r.read_bool().unwrap_err(),
            SerializationFormatError::InvalidTag { what: "bool", tag: 7 }
        ));
    }

    #[test]
    fn test_option_and_vec_round_trip() {
        let values: Vec<Option<String>> = vec![None, Some("x".to_string())];
        let bytes = values.to_bytes().unwrap();
        let back = Vec::<Option<String>>::from_bytes(&bytes).unwrap();
        assert_eq!(values, back);
    }

    #[test]
    fn test_trailing_bytes_rejected() {
        let mut bytes = true.to_bytes().unwrap();
        bytes.push(0xff);
        assert!(matches!(
            bool::from_bytes(&bytes).unwrap_err(),
            SerializationFormatError::TrailingBytes(1)
        ));
    }

    #[test]
    fn test_oversized_length_prefix_fails() {
        // Claims 1000 bytes, provides 2.
        let mut w = BinaryWriter::new();
        w.write_u32(1000).unwrap();
        w.write_raw(&[1, 2]);
        let bytes = w.into_bytes();
        let mut r = BinaryReader::new(&bytes);
        assert!(matches!(
            r.read_bytes().unwrap_err(),
            SerializationFormatError::UnexpectedEof
        ));
    }
}
