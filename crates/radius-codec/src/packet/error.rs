use thiserror::Error;

/// Errors raised while building, encoding or decoding RADIUS packets
#[derive(Error, Debug)]
pub enum PacketError {
    #[error("Unknown attribute: {0}")]
    UnknownAttribute(String),
    #[error("Attribute value too long: {0} bytes (max 253)")]
    AttributeTooLarge(usize),
    #[error("User-Password value too long: {0} bytes (max 240)")]
    PasswordTooLong(usize),
    #[error("Packet shorter than the 20 byte header: {0} bytes")]
    ShortHeader(usize),
    #[error("Truncated attribute: declared {declared} bytes, {available} available")]
    TruncatedAttribute { declared: usize, available: usize },
    #[error("Invalid attribute length: {0}")]
    InvalidAttributeLength(u8),
    #[error("Header length {declared} does not match packet size {actual}")]
    LengthMismatch { declared: usize, actual: usize },
    #[error("Attribute type 0 is not allowed")]
    ZeroAttributeType,
    #[error("Packet too large: {0} bytes")]
    PacketTooLarge(usize),
    #[error("Random source unavailable: {0}")]
    RandomSourceUnavailable(String),
}
