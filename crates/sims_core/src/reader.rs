use std::io::{self, ErrorKind};

/// Cursor over an in-memory byte buffer. Every read advances the position
/// and fails with `UnexpectedEof` when the buffer runs out; offset
/// arithmetic past that point cannot be trusted, so callers propagate the
/// error rather than resynchronize.
#[derive(Debug)]
pub struct SliceReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> SliceReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    fn take(&mut self, n: usize) -> io::Result<&'a [u8]> {
        let end = self
            .pos
            .checked_add(n)
            .filter(|&end| end <= self.buf.len())
            .ok_or_else(|| {
                io::Error::new(
                    ErrorKind::UnexpectedEof,
                    format!(
                        "read of {n} bytes at offset {} overruns buffer of {} bytes",
                        self.pos,
                        self.buf.len()
                    ),
                )
            })?;
        let bytes = &self.buf[self.pos..end];
        self.pos = end;
        Ok(bytes)
    }

    pub fn read_u8(&mut self) -> io::Result<u8> {
        Ok(self.take(1)?[0])
    }

    pub fn read_i16_le(&mut self) -> io::Result<i16> {
        let b = self.take(2)?;
        Ok(i16::from_le_bytes([b[0], b[1]]))
    }

    pub fn read_u16_le(&mut self) -> io::Result<u16> {
        let b = self.take(2)?;
        Ok(u16::from_le_bytes([b[0], b[1]]))
    }

    pub fn read_i32_le(&mut self) -> io::Result<i32> {
        let b = self.take(4)?;
        Ok(i32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    pub fn read_u32_le(&mut self) -> io::Result<u32> {
        let b = self.take(4)?;
        Ok(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    pub fn read_i16_vec_le(&mut self, n: usize) -> io::Result<Vec<i16>> {
        let mut result = Vec::with_capacity(n);
        for _ in 0..n {
            result.push(self.read_i16_le()?);
        }
        Ok(result)
    }

    /// Read a 4-byte tag verbatim.
    pub fn read_tag(&mut self) -> io::Result<[u8; 4]> {
        let b = self.take(4)?;
        Ok([b[0], b[1], b[2], b[3]])
    }

    /// Read bytes up to (and consuming) the next null terminator. The
    /// terminator is not included in the returned slice.
    pub fn read_cstring_bytes(&mut self) -> io::Result<&'a [u8]> {
        let start = self.pos;
        let terminator = self.buf[start..].iter().position(|&b| b == 0).ok_or_else(|| {
            io::Error::new(
                ErrorKind::UnexpectedEof,
                format!("unterminated string at offset {start}"),
            )
        })?;
        self.pos = start + terminator + 1;
        Ok(&self.buf[start..start + terminator])
    }

    pub fn skip(&mut self, n: usize) -> io::Result<()> {
        self.take(n)?;
        Ok(())
    }
}

/// Decode a byte string leniently; stray non-UTF-8 bytes become replacement
/// characters rather than errors.
pub fn decode_ascii(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}
