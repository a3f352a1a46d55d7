//! RADIUS Protocol Codec
//!
//! This crate turns RADIUS packets (RFC 2865, 2866) into their exact wire
//! representation and back. It does no network I/O: callers hand it bytes
//! and a shared secret, and get bytes or a [`Packet`] back.
//!
//! # Features
//!
//! - Packet encoding and decoding with derived Length fields
//! - Attribute lookup by dictionary name, with an injectable [`Dictionary`]
//! - Vendor-Specific attribute unwrapping
//! - MD5-based User-Password obfuscation (RFC 2865 Section 5.2)
//! - Request Authenticator generation from the OS random source
//!
//! # Example
//!
//! ```rust
//! use radius_codec::{generate_authenticator, Code, Dictionary, Packet};
//! use std::sync::Arc;
//!
//! let dictionary = Arc::new(Dictionary::standard());
//! let req_auth = generate_authenticator().unwrap();
//!
//! // Create an Access-Request packet
//! let mut packet = Packet::new(Code::AccessRequest, 1, req_auth, dictionary.clone());
//! packet.add_attribute("User-Name", "alice").unwrap();
//!
//! // Stored in the clear, obfuscated on encode
//! packet.add_attribute("User-Password", "password").unwrap();
//!
//! let bytes = packet.encode(b"testing123").unwrap();
//! let decoded = Packet::decode(&bytes, b"testing123", dictionary).unwrap();
//! assert_eq!(decoded.get_first_attribute_as_text("User-Name").as_deref(), Some("alice"));
//! assert_eq!(decoded.get_first_attribute("User-Password"), Some(&b"password"[..]));
//! ```

pub mod attributes;
pub mod auth;
pub mod config;
pub mod dictionary;
pub mod packet;

pub use attributes::{Attribute, AttributeType, VendorSpecific};
pub use auth::{deobfuscate, generate_authenticator, obfuscate, AUTHENTICATOR_LENGTH};
pub use config::{CodecConfig, ConfigError};
pub use dictionary::{Dictionary, DictionaryEntry};
pub use packet::{Code, Packet, PacketError, PacketHeader};
