use super::AttributeType;
use crate::auth::{self, AUTHENTICATOR_LENGTH};
use crate::packet::PacketError;
use std::fmt;
use std::io::{Cursor, Read};
use tracing::{trace, warn};

/// RADIUS Attribute structure as defined in RFC 2865 Section 5
///
/// ```text
///  0                   1                   2
///  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |     Type      |    Length     |  Value ...
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
///
/// The Length octet is never stored: it is derived from `value` every time
/// the attribute is serialized, so editing `value` in place is always safe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Attribute type (1 byte)
    pub attr_type: u8,
    /// Attribute value (0-253 bytes on the wire)
    pub value: Vec<u8>,
}

impl Attribute {
    /// Minimum attribute length (type + length fields = 2 bytes)
    pub const MIN_LENGTH: usize = 2;
    /// Maximum attribute length (255 bytes including type and length)
    pub const MAX_LENGTH: usize = 255;
    /// Maximum value length (253 bytes)
    pub const MAX_VALUE_LENGTH: usize = 253;
    /// Longest User-Password whose 16-byte padded form still fits a value
    pub const MAX_PASSWORD_LENGTH: usize = 240;

    /// Create an attribute, rejecting values that cannot fit the Length octet
    pub fn new(attr_type: u8, value: Vec<u8>) -> Result<Self, PacketError> {
        if value.len() > Self::MAX_VALUE_LENGTH {
            return Err(PacketError::AttributeTooLarge(value.len()));
        }
        Ok(Attribute { attr_type, value })
    }

    /// Create a string attribute
    pub fn string(attr_type: u8, value: impl Into<String>) -> Result<Self, PacketError> {
        Self::new(attr_type, value.into().into_bytes())
    }

    /// Create an integer attribute (32-bit big-endian)
    pub fn integer(attr_type: u8, value: u32) -> Result<Self, PacketError> {
        Self::new(attr_type, value.to_be_bytes().to_vec())
    }

    /// Create an IP address attribute
    pub fn ipv4(attr_type: u8, value: [u8; 4]) -> Result<Self, PacketError> {
        Self::new(attr_type, value.to_vec())
    }

    /// Get the encoded length of this attribute
    pub fn encoded_length(&self) -> usize {
        Self::MIN_LENGTH + self.value.len()
    }

    /// Encode attribute to bytes
    pub fn encode(&self) -> Result<Vec<u8>, PacketError> {
        let mut buffer = Vec::with_capacity(self.encoded_length());
        write_tlv(&mut buffer, self.attr_type, &self.value)?;
        Ok(buffer)
    }

    /// Encode attribute to bytes, obfuscating User-Password values
    ///
    /// The obfuscated value lives only in the returned buffer; `self` is
    /// left untouched.
    pub fn encode_with_password(
        &self,
        secret: &[u8],
        authenticator: &[u8; AUTHENTICATOR_LENGTH],
    ) -> Result<Vec<u8>, PacketError> {
        if self.attr_type != AttributeType::UserPassword.as_u8() {
            return self.encode();
        }
        if self.value.len() > Self::MAX_PASSWORD_LENGTH {
            return Err(PacketError::PasswordTooLong(self.value.len()));
        }

        let hidden = auth::obfuscate(secret, authenticator, &self.value);
        let mut buffer = Vec::with_capacity(Self::MIN_LENGTH + hidden.len());
        write_tlv(&mut buffer, self.attr_type, &hidden)?;
        Ok(buffer)
    }

    /// Read the next attribute from `cursor`
    ///
    /// Returns `Ok(None)` once the input cannot supply a type and length
    /// octet; that is the normal end of the attribute region. User-Password
    /// values are de-obfuscated before they are returned, and a recovered
    /// password longer than [`Self::MAX_PASSWORD_LENGTH`] is rejected with
    /// [`PacketError::PasswordTooLong`] since it could not be encoded again.
    pub fn parse_one(
        cursor: &mut Cursor<&[u8]>,
        secret: &[u8],
        authenticator: &[u8; AUTHENTICATOR_LENGTH],
    ) -> Result<Option<Self>, PacketError> {
        let start = cursor.position() as usize;

        let mut header = [0u8; 2];
        if cursor.read_exact(&mut header).is_err() {
            let left = cursor.get_ref().len().saturating_sub(start);
            if left > 0 {
                trace!(left, "dangling byte after last attribute");
            }
            return Ok(None);
        }
        let [attr_type, length] = header;

        if attr_type == 0 {
            warn!(offset = start, length, "attribute type 0 in packet");
        }

        if usize::from(length) < Self::MIN_LENGTH {
            return Err(PacketError::InvalidAttributeLength(length));
        }

        let available = cursor.get_ref().len().saturating_sub(start);
        if available < usize::from(length) {
            return Err(PacketError::TruncatedAttribute {
                declared: usize::from(length),
                available,
            });
        }

        let mut value = vec![0u8; usize::from(length) - Self::MIN_LENGTH];
        cursor
            .read_exact(&mut value)
            .map_err(|_| PacketError::TruncatedAttribute {
                declared: usize::from(length),
                available,
            })?;

        if attr_type == AttributeType::UserPassword.as_u8() {
            value = auth::deobfuscate(secret, &value, authenticator);
            if value.len() > Self::MAX_PASSWORD_LENGTH {
                return Err(PacketError::PasswordTooLong(value.len()));
            }
        }

        trace!(attr_type, length, "parsed attribute");
        Ok(Some(Attribute { attr_type, value }))
    }

    /// Try to interpret value as a string
    pub fn as_string(&self) -> Result<String, std::string::FromUtf8Error> {
        String::from_utf8(self.value.clone())
    }

    /// Try to interpret value as an integer (32-bit big-endian)
    pub fn as_integer(&self) -> Option<u32> {
        let bytes: [u8; 4] = self.value.as_slice().try_into().ok()?;
        Some(u32::from_be_bytes(bytes))
    }

    /// Try to interpret value as an IPv4 address
    pub fn as_ipv4(&self) -> Option<[u8; 4]> {
        self.value.as_slice().try_into().ok()
    }
}

fn write_tlv(buffer: &mut Vec<u8>, attr_type: u8, value: &[u8]) -> Result<(), PacketError> {
    let length = Attribute::MIN_LENGTH + value.len();
    if length > Attribute::MAX_LENGTH {
        return Err(PacketError::AttributeTooLarge(value.len()));
    }

    buffer.push(attr_type);
    buffer.push(length as u8);
    buffer.extend_from_slice(value);
    Ok(())
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match AttributeType::from_u8(self.attr_type) {
            Some(AttributeType::UserPassword) => {
                write!(f, "{}: <hidden>", AttributeType::UserPassword.name())
            }
            Some(known) => write!(f, "{}: {}", known.name(), hex::encode(&self.value)),
            None => write!(f, "Attribute-{}: {}", self.attr_type, hex::encode(&self.value)),
        }
    }
}
