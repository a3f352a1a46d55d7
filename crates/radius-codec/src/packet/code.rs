use std::fmt;

/// RADIUS packet codes as defined in RFC 2865 Section 4
///
/// Codes outside the assigned set are kept as [`Code::Unknown`] so that a
/// decoded packet re-encodes with the same code byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Code {
    /// Access-Request (1)
    AccessRequest,
    /// Access-Accept (2)
    AccessAccept,
    /// Access-Reject (3)
    AccessReject,
    /// Accounting-Request (4) - RFC 2866
    AccountingRequest,
    /// Accounting-Response (5) - RFC 2866
    AccountingResponse,
    /// Access-Challenge (11)
    AccessChallenge,
    /// Status-Server (12) - RFC 5997
    StatusServer,
    /// Status-Client (13) - RFC 5997
    StatusClient,
    /// Disconnect-Request (40) - RFC 5176
    DisconnectRequest,
    /// Disconnect-ACK (41) - RFC 5176
    DisconnectAck,
    /// Disconnect-NAK (42) - RFC 5176
    DisconnectNak,
    /// CoA-Request (43) - RFC 5176
    CoaRequest,
    /// CoA-ACK (44) - RFC 5176
    CoaAck,
    /// CoA-NAK (45) - RFC 5176
    CoaNak,
    /// Any other code byte
    Unknown(u8),
}

impl Code {
    pub fn from_u8(value: u8) -> Self {
        match value {
            1 => Code::AccessRequest,
            2 => Code::AccessAccept,
            3 => Code::AccessReject,
            4 => Code::AccountingRequest,
            5 => Code::AccountingResponse,
            11 => Code::AccessChallenge,
            12 => Code::StatusServer,
            13 => Code::StatusClient,
            40 => Code::DisconnectRequest,
            41 => Code::DisconnectAck,
            42 => Code::DisconnectNak,
            43 => Code::CoaRequest,
            44 => Code::CoaAck,
            45 => Code::CoaNak,
            other => Code::Unknown(other),
        }
    }

    pub fn as_u8(self) -> u8 {
        match self {
            Code::AccessRequest => 1,
            Code::AccessAccept => 2,
            Code::AccessReject => 3,
            Code::AccountingRequest => 4,
            Code::AccountingResponse => 5,
            Code::AccessChallenge => 11,
            Code::StatusServer => 12,
            Code::StatusClient => 13,
            Code::DisconnectRequest => 40,
            Code::DisconnectAck => 41,
            Code::DisconnectNak => 42,
            Code::CoaRequest => 43,
            Code::CoaAck => 44,
            Code::CoaNak => 45,
            Code::Unknown(value) => value,
        }
    }

    /// Display name, e.g. `"Access-Request"`
    pub fn name(self) -> &'static str {
        match self {
            Code::AccessRequest => "Access-Request",
            Code::AccessAccept => "Access-Accept",
            Code::AccessReject => "Access-Reject",
            Code::AccountingRequest => "Accounting-Request",
            Code::AccountingResponse => "Accounting-Response",
            Code::AccessChallenge => "Access-Challenge",
            Code::StatusServer => "Status-Server",
            Code::StatusClient => "Status-Client",
            Code::DisconnectRequest => "Disconnect-Request",
            Code::DisconnectAck => "Disconnect-ACK",
            Code::DisconnectNak => "Disconnect-NAK",
            Code::CoaRequest => "CoA-Request",
            Code::CoaAck => "CoA-ACK",
            Code::CoaNak => "CoA-NAK",
            Code::Unknown(_) => "Unknown",
        }
    }
}

impl From<u8> for Code {
    fn from(value: u8) -> Self {
        Code::from_u8(value)
    }
}

impl From<Code> for u8 {
    fn from(code: Code) -> Self {
        code.as_u8()
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Code::Unknown(value) => write!(f, "Unknown({})", value),
            known => f.write_str(known.name()),
        }
    }
}
