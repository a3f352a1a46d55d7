mod code;
mod codec;
mod error;
mod header;
#[allow(clippy::module_inception)]
mod packet;

pub use code::Code;
pub use error::PacketError;
pub use header::PacketHeader;
pub use packet::Packet;
