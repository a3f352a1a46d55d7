//! Vendor-Specific attribute (type 26) sub-layout, RFC 2865 Section 5.26
//!
//! ```text
//!  0                   1                   2                   3
//!  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |     Type      |  Length       |            Vendor-Id
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//!      Vendor-Id (cont)           | Vendor type   | Vendor length |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |    Attribute-Specific...
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! ```

use super::{Attribute, AttributeType};
use crate::packet::PacketError;

/// Borrowed view over the value of a Vendor-Specific attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VendorSpecific<'a> {
    /// IANA Private Enterprise Number, big-endian on the wire
    pub vendor_id: u32,
    /// Vendor-local attribute type
    pub vendor_type: u8,
    /// Vendor length octet as received (payload + 2)
    pub vendor_length: u8,
    /// Vendor payload, bounded by `vendor_length` and the enclosing value
    pub payload: &'a [u8],
}

impl<'a> VendorSpecific<'a> {
    /// Vendor-Id (4) + vendor type (1) + vendor length (1)
    pub const HEADER_LENGTH: usize = 6;
    /// Largest payload that still fits a single attribute
    pub const MAX_PAYLOAD_LENGTH: usize = Attribute::MAX_VALUE_LENGTH - Self::HEADER_LENGTH;

    /// Parse the vendor sub-header out of an attribute value
    ///
    /// Returns `None` if the value is too short to hold the sub-header. A
    /// vendor length that overruns the value is clamped to what is present.
    pub fn parse(value: &'a [u8]) -> Option<Self> {
        if value.len() < Self::HEADER_LENGTH {
            return None;
        }

        let vendor_id = u32::from_be_bytes([value[0], value[1], value[2], value[3]]);
        let vendor_type = value[4];
        let vendor_length = value[5];

        let rest = &value[Self::HEADER_LENGTH..];
        let payload_len = usize::from(vendor_length).saturating_sub(2).min(rest.len());

        Some(VendorSpecific {
            vendor_id,
            vendor_type,
            vendor_length,
            payload: &rest[..payload_len],
        })
    }

    /// Build the value bytes of a Vendor-Specific attribute
    pub fn encode_value(
        vendor_id: u32,
        vendor_type: u8,
        payload: &[u8],
    ) -> Result<Vec<u8>, PacketError> {
        if payload.len() > Self::MAX_PAYLOAD_LENGTH {
            return Err(PacketError::AttributeTooLarge(
                payload.len() + Self::HEADER_LENGTH,
            ));
        }

        let mut value = Vec::with_capacity(Self::HEADER_LENGTH + payload.len());
        value.extend_from_slice(&vendor_id.to_be_bytes());
        value.push(vendor_type);
        value.push((payload.len() + 2) as u8);
        value.extend_from_slice(payload);
        Ok(value)
    }
}

impl Attribute {
    /// Create a Vendor-Specific attribute wrapping a single vendor sub-attribute
    pub fn vendor_specific(
        vendor_id: u32,
        vendor_type: u8,
        payload: &[u8],
    ) -> Result<Self, PacketError> {
        let value = VendorSpecific::encode_value(vendor_id, vendor_type, payload)?;
        Self::new(AttributeType::VendorSpecific.as_u8(), value)
    }

    /// Vendor view of this attribute, if it is a well-formed Vendor-Specific one
    pub fn as_vendor_specific(&self) -> Option<VendorSpecific<'_>> {
        if self.attr_type != AttributeType::VendorSpecific.as_u8() {
            return None;
        }
        VendorSpecific::parse(&self.value)
    }
}
