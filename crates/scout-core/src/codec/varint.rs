//! Unsigned LEB128 varints over a byte cursor.

use super::DecodeError;
use crate::primitives::MAX_VARINT_BYTES;

/// Forward-only cursor over decoded deck code bytes.
pub(crate) struct ByteReader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    pub(crate) fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    /// Read one raw byte. `context` names the field for error messages.
    pub(crate) fn read_byte(&mut self, context: &'static str) -> Result<u8, DecodeError> {
        let byte = *self
            .bytes
            .get(self.pos)
            .ok_or(DecodeError::UnexpectedEnd { context })?;
        self.pos += 1;
        Ok(byte)
    }

    /// Read one varint.
    ///
    /// The tenth byte may only contribute the 64th bit; anything wider, or an
    /// eleventh continuation byte, is an overflow.
    pub(crate) fn read_varint(&mut self, context: &'static str) -> Result<u64, DecodeError> {
        let mut value: u64 = 0;
        for i in 0..MAX_VARINT_BYTES {
            let byte = self.read_byte(context)?;
            let payload = u64::from(byte & 0x7F);
            if i == MAX_VARINT_BYTES - 1 && payload > 1 {
                return Err(DecodeError::VarintOverflow { context });
            }
            value |= payload << (7 * i);
            if byte & 0x80 == 0 {
                return Ok(value);
            }
        }
        Err(DecodeError::VarintOverflow { context })
    }
}

/// Append `value` as a varint.
pub(crate) fn write_varint(out: &mut Vec<u8>, mut value: u64) {
    loop {
        let byte = (value & 0x7F) as u8;
        value >>= 7;
        if value == 0 {
            out.push(byte);
            return;
        }
        out.push(byte | 0x80);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encoded(value: u64) -> Vec<u8> {
        let mut out = Vec::new();
        write_varint(&mut out, value);
        out
    }

    #[test]
    fn small_values_are_one_byte() {
        assert_eq!(encoded(0), vec![0x00]);
        assert_eq!(encoded(127), vec![0x7F]);
    }

    #[test]
    fn multi_byte_layout() {
        assert_eq!(encoded(128), vec![0x80, 0x01]);
        assert_eq!(encoded(300), vec![0xAC, 0x02]);
    }

    #[test]
    fn reads_max_u64() {
        let bytes = encoded(u64::MAX);
        assert_eq!(bytes.len(), MAX_VARINT_BYTES);
        let mut reader = ByteReader::new(&bytes);
        assert_eq!(reader.read_varint("value").expect("read"), u64::MAX);
        assert!(reader.is_empty());
    }

    #[test]
    fn eleven_bytes_overflow() {
        let bytes = [0xFF; 11];
        let mut reader = ByteReader::new(&bytes);
        assert!(matches!(
            reader.read_varint("value"),
            Err(DecodeError::VarintOverflow { context: "value" })
        ));
    }

    #[test]
    fn wide_tenth_byte_overflows() {
        let mut bytes = vec![0xFF; 9];
        bytes.push(0x02);
        let mut reader = ByteReader::new(&bytes);
        assert!(matches!(
            reader.read_varint("value"),
            Err(DecodeError::VarintOverflow { .. })
        ));
    }

    #[test]
    fn truncated_varint_reports_context() {
        let bytes = [0x80];
        let mut reader = ByteReader::new(&bytes);
        assert!(matches!(
            reader.read_varint("card number"),
            Err(DecodeError::UnexpectedEnd {
                context: "card number"
            })
        ));
    }
}
