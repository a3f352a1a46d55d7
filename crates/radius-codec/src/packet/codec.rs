use super::{Packet, PacketError, PacketHeader};
use crate::attributes::Attribute;
use crate::config::CodecConfig;
use crate::dictionary::Dictionary;
use std::io::Cursor;
use std::sync::Arc;
use tracing::{debug, trace, warn};

impl Packet {
    /// Encode packet to bytes with the default [`CodecConfig`]
    ///
    /// User-Password values are obfuscated with `secret` and this packet's
    /// authenticator.
    pub fn encode(&self, secret: &[u8]) -> Result<Vec<u8>, PacketError> {
        self.encode_with(secret, &CodecConfig::default())
    }

    /// Encode packet to bytes
    pub fn encode_with(&self, secret: &[u8], config: &CodecConfig) -> Result<Vec<u8>, PacketError> {
        let mut attr_data = Vec::new();
        for attr in &self.attributes {
            let encoded = attr.encode_with_password(secret, &self.authenticator)?;
            attr_data.extend_from_slice(&encoded);
        }

        let total_length = Self::MIN_PACKET_SIZE + attr_data.len();
        if total_length > config.max_packet_size {
            return Err(PacketError::PacketTooLarge(total_length));
        }
        let length =
            u16::try_from(total_length).map_err(|_| PacketError::PacketTooLarge(total_length))?;

        let header = PacketHeader {
            code: self.code,
            identifier: self.identifier,
            length,
            authenticator: self.authenticator,
        };

        let mut buffer = Vec::with_capacity(total_length);
        header.write_to(&mut buffer);
        buffer.extend_from_slice(&attr_data);

        debug!(
            code = %self.code,
            identifier = self.identifier,
            length,
            attributes = self.attributes.len(),
            "encoded packet"
        );
        Ok(buffer)
    }

    /// Decode packet from bytes with the default [`CodecConfig`]
    pub fn decode(
        data: &[u8],
        secret: &[u8],
        dictionary: Arc<Dictionary>,
    ) -> Result<Self, PacketError> {
        Self::decode_with(data, secret, dictionary, &CodecConfig::default())
    }

    /// Decode packet from bytes
    ///
    /// User-Password values are de-obfuscated with `secret` and the
    /// packet's own authenticator. Attributes with codes missing from the
    /// dictionary are kept under their raw code.
    pub fn decode_with(
        data: &[u8],
        secret: &[u8],
        dictionary: Arc<Dictionary>,
        config: &CodecConfig,
    ) -> Result<Self, PacketError> {
        let header = PacketHeader::parse(data)?;
        let declared = usize::from(header.length);

        let end = if config.enforce_header_length {
            if declared < Self::MIN_PACKET_SIZE || declared > data.len() {
                return Err(PacketError::LengthMismatch {
                    declared,
                    actual: data.len(),
                });
            }
            if declared < data.len() {
                debug!(
                    ignored = data.len() - declared,
                    "ignoring bytes past header length"
                );
            }
            declared
        } else {
            if declared != data.len() {
                warn!(declared, actual = data.len(), "header length does not match packet size");
            }
            data.len()
        };

        let mut cursor = Cursor::new(&data[Self::MIN_PACKET_SIZE..end]);
        let mut attributes = Vec::new();

        while let Some(attr) = Attribute::parse_one(&mut cursor, secret, &header.authenticator)? {
            if attr.attr_type == 0 && config.reject_zero_attribute_type {
                return Err(PacketError::ZeroAttributeType);
            }
            trace!(
                name = %dictionary.display_name(attr.attr_type),
                len = attr.value.len(),
                "decoded attribute"
            );
            attributes.push(attr);
        }

        debug!(
            code = %header.code,
            identifier = header.identifier,
            length = declared,
            attributes = attributes.len(),
            "decoded packet"
        );
        Ok(Packet::from_parts(header, attributes, dictionary))
    }
}
