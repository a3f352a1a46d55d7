use super::{Code, PacketError, PacketHeader};
use crate::attributes::{Attribute, AttributeType, VendorSpecific};
use crate::auth::AUTHENTICATOR_LENGTH;
use crate::dictionary::Dictionary;
use std::fmt;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::warn;

/// RADIUS Packet structure as defined in RFC 2865 Section 3
///
/// Attributes are kept in insertion order, which is also wire order.
/// Repeated attribute types are legal and each instance is kept.
///
/// Attribute values are stored in the clear: a User-Password value is the
/// plaintext password, and is only obfuscated inside
/// [`encode`](Packet::encode).
#[derive(Debug, Clone)]
pub struct Packet {
    /// Packet type (1 byte)
    pub code: Code,
    /// Packet identifier for matching requests/responses (1 byte)
    pub identifier: u8,
    /// Request Authenticator (16 bytes)
    pub authenticator: [u8; AUTHENTICATOR_LENGTH],
    /// List of attributes
    pub attributes: Vec<Attribute>,
    /// Where the packet came from or is going to; opaque to the codec
    pub peer_addr: Option<SocketAddr>,
    dictionary: Arc<Dictionary>,
}

impl Packet {
    /// Minimum RADIUS packet size (20 bytes: 1 code + 1 id + 2 length + 16 authenticator)
    pub const MIN_PACKET_SIZE: usize = PacketHeader::SIZE;
    /// Maximum RADIUS packet size (4096 bytes as per RFC 2865)
    pub const MAX_PACKET_SIZE: usize = 4096;

    pub fn new(
        code: Code,
        identifier: u8,
        authenticator: [u8; AUTHENTICATOR_LENGTH],
        dictionary: Arc<Dictionary>,
    ) -> Self {
        Packet {
            code,
            identifier,
            authenticator,
            attributes: Vec::new(),
            peer_addr: None,
            dictionary,
        }
    }

    pub(crate) fn from_parts(
        header: PacketHeader,
        attributes: Vec<Attribute>,
        dictionary: Arc<Dictionary>,
    ) -> Self {
        Packet {
            code: header.code,
            identifier: header.identifier,
            authenticator: header.authenticator,
            attributes,
            peer_addr: None,
            dictionary,
        }
    }

    /// Attach the transport peer address
    pub fn with_peer_addr(mut self, peer_addr: SocketAddr) -> Self {
        self.peer_addr = Some(peer_addr);
        self
    }

    pub fn dictionary(&self) -> &Arc<Dictionary> {
        &self.dictionary
    }

    /// Append an attribute by dictionary name
    ///
    /// Fails with [`PacketError::UnknownAttribute`] and leaves the packet
    /// untouched if the name is not in the dictionary.
    pub fn add_attribute(&mut self, name: &str, value: impl Into<Vec<u8>>) -> Result<(), PacketError> {
        let code = self
            .dictionary
            .code(name)
            .ok_or_else(|| PacketError::UnknownAttribute(name.to_string()))?;
        self.add_attribute_by_code(code, value);
        Ok(())
    }

    /// Append an attribute by numeric type, without name resolution
    ///
    /// Size limits are enforced when the packet is encoded.
    pub fn add_attribute_by_code(&mut self, code: u8, value: impl Into<Vec<u8>>) {
        self.attributes.push(Attribute {
            attr_type: code,
            value: value.into(),
        });
    }

    /// Append an already built attribute
    pub fn push_attribute(&mut self, attribute: Attribute) {
        self.attributes.push(attribute);
    }

    /// Values of every attribute called `name`, in packet order
    ///
    /// Vendor-Specific attributes are unwrapped to their vendor payload.
    /// Unknown names yield nothing.
    pub fn get_attributes(&self, name: &str) -> Vec<&[u8]> {
        let Some(code) = self.dictionary.code(name) else {
            return Vec::new();
        };

        let matches = self.find_all_attributes(code).into_iter();
        if code != AttributeType::VendorSpecific.as_u8() {
            return matches.map(|attr| attr.value.as_slice()).collect();
        }

        matches
            .filter_map(|attr| match VendorSpecific::parse(&attr.value) {
                Some(vsa) => Some(vsa.payload),
                None => {
                    warn!(len = attr.value.len(), "Vendor-Specific value too short to unwrap");
                    None
                }
            })
            .collect()
    }

    /// First value of the attribute called `name`
    pub fn get_first_attribute(&self, name: &str) -> Option<&[u8]> {
        self.get_attributes(name).into_iter().next()
    }

    /// First value of the attribute called `name`, decoded as (lossy) UTF-8
    pub fn get_first_attribute_as_text(&self, name: &str) -> Option<String> {
        self.get_first_attribute(name)
            .map(|value| String::from_utf8_lossy(value).into_owned())
    }

    /// Find first attribute by type
    pub fn find_attribute(&self, attr_type: u8) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.attr_type == attr_type)
    }

    /// Find all attributes by type
    pub fn find_all_attributes(&self, attr_type: u8) -> Vec<&Attribute> {
        self.attributes
            .iter()
            .filter(|a| a.attr_type == attr_type)
            .collect()
    }

    /// Deep copy of header fields, attributes and peer address
    ///
    /// The copy shares only the (immutable) dictionary with `self`, so it
    /// can be edited and re-encoded, e.g. under another secret, without
    /// touching the original.
    pub fn duplicate(&self) -> Packet {
        Packet {
            code: self.code,
            identifier: self.identifier,
            authenticator: self.authenticator,
            attributes: self.attributes.to_vec(),
            peer_addr: self.peer_addr,
            dictionary: Arc::clone(&self.dictionary),
        }
    }

    /// Get the length of the encoded packet
    ///
    /// User-Password values count at their obfuscated size.
    pub fn length(&self) -> usize {
        Self::MIN_PACKET_SIZE + self.attributes.iter().map(wire_size).sum::<usize>()
    }

    /// Header as it would be encoded, with Length derived from the attributes
    pub fn header(&self) -> PacketHeader {
        PacketHeader {
            code: self.code,
            identifier: self.identifier,
            length: u16::try_from(self.length()).unwrap_or(u16::MAX),
            authenticator: self.authenticator,
        }
    }
}

/// Wire size of `attr` inside an encoded packet
fn wire_size(attr: &Attribute) -> usize {
    if attr.attr_type == AttributeType::UserPassword.as_u8() {
        Attribute::MIN_LENGTH + attr.value.len().div_ceil(16).max(1) * 16
    } else {
        attr.encoded_length()
    }
}

impl fmt::Display for Packet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RadiusPacket{{{} [", self.header())?;
        for (i, attr) in self.attributes.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            let name = self.dictionary.display_name(attr.attr_type);
            if attr.attr_type == AttributeType::UserPassword.as_u8() {
                write!(f, "{}: <hidden>", name)?;
            } else {
                write!(f, "{}: {}", name, hex::encode(&attr.value))?;
            }
        }
        f.write_str("]}")
    }
}
