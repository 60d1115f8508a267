//! Seek-and-read primitives for fixed-layout binary files
//!
//! All values are little-endian, matching the byte order the DE430 binary
//! distribution is produced with. No endianness detection is attempted.

use std::io::{ErrorKind, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use byteorder::{LittleEndian, ReadBytesExt};

use crate::jplephem::errors::{io_err, JplephemError, Result};
use crate::jplephem::layout::{FieldLayout, DOUBLE_SIZE, MAX_TEXT_WIDTH, WORD_SIZE};

/// Random-access reader over a binary source
pub struct BinarySource<R> {
    /// Path (or label) used in error messages
    path: PathBuf,
    inner: R,
}

impl<R: Read + Seek> BinarySource<R> {
    /// Wrap a reader, using `path` to identify it in errors
    pub fn new(inner: R, path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            inner,
        }
    }

    /// Path or label of the underlying source
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Total length of the source in bytes
    pub fn len(&mut self) -> Result<u64> {
        self.inner
            .seek(SeekFrom::End(0))
            .map_err(|e| io_err(&self.path, e))
    }

    /// Whether the source holds no bytes at all
    pub fn is_empty(&mut self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    fn seek_to(&mut self, offset: u64) -> Result<()> {
        self.inner
            .seek(SeekFrom::Start(offset))
            .map_err(|e| io_err(&self.path, e))?;
        Ok(())
    }

    /// Map a failed read, turning EOF into a truncation error
    fn read_err(&self, offset: u64, wanted: usize, err: std::io::Error) -> JplephemError {
        if err.kind() == ErrorKind::UnexpectedEof {
            JplephemError::Truncated {
                path: self.path.clone(),
                offset,
                wanted,
            }
        } else {
            io_err(&self.path, err)
        }
    }

    /// Read a 4-byte unsigned integer at `offset`
    pub fn read_u32_at(&mut self, offset: u64) -> Result<u32> {
        self.seek_to(offset)?;
        self.inner
            .read_u32::<LittleEndian>()
            .map_err(|e| self.read_err(offset, WORD_SIZE, e))
    }

    /// Read an 8-byte IEEE-754 double at `offset`
    pub fn read_f64_at(&mut self, offset: u64) -> Result<f64> {
        self.seek_to(offset)?;
        self.inner
            .read_f64::<LittleEndian>()
            .map_err(|e| self.read_err(offset, DOUBLE_SIZE, e))
    }

    /// Read `count` consecutive 4-byte unsigned integers starting at `offset`
    pub fn read_u32_list(&mut self, offset: u64, count: usize) -> Result<Vec<u32>> {
        self.seek_to(offset)?;
        let mut values = vec![0u32; count];
        self.inner
            .read_u32_into::<LittleEndian>(&mut values)
            .map_err(|e| self.read_err(offset, count * WORD_SIZE, e))?;
        Ok(values)
    }

    /// Read `count` consecutive doubles starting at `offset`
    pub fn read_f64_list(&mut self, offset: u64, count: usize) -> Result<Vec<f64>> {
        self.seek_to(offset)?;
        let mut values = vec![0.0f64; count];
        self.inner
            .read_f64_into::<LittleEndian>(&mut values)
            .map_err(|e| self.read_err(offset, count * DOUBLE_SIZE, e))?;
        Ok(values)
    }

    /// Read `count` fixed-width text items of `width` bytes starting at `offset`
    ///
    /// Trailing blanks and NUL padding are removed from each item; leading
    /// and embedded spaces are kept.
    pub fn read_text_list(&mut self, offset: u64, width: usize, count: usize) -> Result<Vec<String>> {
        if width > MAX_TEXT_WIDTH {
            return Err(JplephemError::InvalidFormat(format!(
                "Text field width {} exceeds {} bytes",
                width, MAX_TEXT_WIDTH
            )));
        }

        self.seek_to(offset)?;
        let mut buf = [0u8; MAX_TEXT_WIDTH];
        let mut items = Vec::with_capacity(count);
        for i in 0..count {
            let item = &mut buf[..width];
            self.inner
                .read_exact(item)
                .map_err(|e| self.read_err(offset + (i * width) as u64, width, e))?;
            items.push(decode_text(item));
        }
        Ok(items)
    }

    /// Read a u32 field described by `field`
    pub fn read_u32_field(&mut self, field: &FieldLayout) -> Result<Vec<u32>> {
        self.read_u32_list(field.offset, field.count)
    }

    /// Read an f64 field described by `field`
    pub fn read_f64_field(&mut self, field: &FieldLayout) -> Result<Vec<f64>> {
        self.read_f64_list(field.offset, field.count)
    }

    /// Read a text field described by `field`
    pub fn read_text_field(&mut self, field: &FieldLayout) -> Result<Vec<String>> {
        self.read_text_list(field.offset, field.width, field.count)
    }
}

/// Decode a fixed-width text item, trimming only trailing padding
pub fn decode_text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes)
        .trim_end_matches(|c: char| c == '\0' || c.is_whitespace())
        .to_string()
}
