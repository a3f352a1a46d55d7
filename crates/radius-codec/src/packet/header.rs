use super::{Code, PacketError};
use crate::auth::AUTHENTICATOR_LENGTH;
use std::fmt;

/// The fixed 20-byte RADIUS header
///
/// ```text
///  0                   1                   2                   3
///  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |     Code      |  Identifier   |            Length             |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                                                               |
/// |                         Authenticator                         |
/// |                                                               |
/// |                                                               |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
///
/// `length` covers the header plus all attributes. Outgoing headers get it
/// from [`Packet::header`](super::Packet::header), which derives it from the
/// attributes; it is never set by hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PacketHeader {
    pub code: Code,
    pub identifier: u8,
    pub length: u16,
    pub authenticator: [u8; AUTHENTICATOR_LENGTH],
}

impl PacketHeader {
    /// Encoded header size
    pub const SIZE: usize = 20;

    /// Read the header fields from the first 20 bytes of `data`
    pub fn parse(data: &[u8]) -> Result<Self, PacketError> {
        let bytes: &[u8; Self::SIZE] = data
            .get(..Self::SIZE)
            .and_then(|head| head.try_into().ok())
            .ok_or(PacketError::ShortHeader(data.len()))?;

        let mut authenticator = [0u8; AUTHENTICATOR_LENGTH];
        authenticator.copy_from_slice(&bytes[4..]);

        Ok(PacketHeader {
            code: Code::from_u8(bytes[0]),
            identifier: bytes[1],
            length: u16::from_be_bytes([bytes[2], bytes[3]]),
            authenticator,
        })
    }

    /// Append the header in wire order (Length big-endian)
    pub fn write_to(&self, buffer: &mut Vec<u8>) {
        buffer.push(self.code.as_u8());
        buffer.push(self.identifier);
        buffer.extend_from_slice(&self.length.to_be_bytes());
        buffer.extend_from_slice(&self.authenticator);
    }
}

impl fmt::Display for PacketHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Type: '{}' Identifier: {} Length: {} Authenticator: {}",
            self.code,
            self.identifier,
            self.length,
            hex::encode(self.authenticator)
        )
    }
}
