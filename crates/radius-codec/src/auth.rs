//! User-Password obfuscation (RFC 2865 Section 5.2) and Request
//! Authenticator generation.
//!
//! The password is zero-padded to a multiple of 16 bytes and XORed with an
//! MD5 keystream:
//!
//! ```text
//! b1 = MD5(S + RA)       c(1) = p1 xor b1
//! b2 = MD5(S + c(1))     c(2) = p2 xor b2
//!        .                       .
//! bi = MD5(S + c(i-1))   c(i) = pi xor bi
//! ```
//!
//! Passwords of up to 16 bytes therefore produce exactly one block keyed by
//! `MD5(secret + authenticator)`.

use crate::packet::PacketError;
use rand::rngs::OsRng;
use rand::TryRngCore;

/// Size of the Request/Response Authenticator in bytes
pub const AUTHENTICATOR_LENGTH: usize = 16;

const BLOCK_SIZE: usize = 16;

/// Generate a random Request Authenticator (16 bytes) per RFC 2865 Section 3
///
/// Reads directly from the operating system CSPRNG. A predictable
/// authenticator would make the password keystream predictable, so callers
/// must treat [`PacketError::RandomSourceUnavailable`] as fatal.
pub fn generate_authenticator() -> Result<[u8; AUTHENTICATOR_LENGTH], PacketError> {
    let mut authenticator = [0u8; AUTHENTICATOR_LENGTH];
    OsRng
        .try_fill_bytes(&mut authenticator)
        .map_err(|e| PacketError::RandomSourceUnavailable(e.to_string()))?;
    Ok(authenticator)
}

fn keystream_block(secret: &[u8], salt: &[u8]) -> [u8; BLOCK_SIZE] {
    let mut ctx = md5::Context::new();
    ctx.consume(secret);
    ctx.consume(salt);
    ctx.compute().0
}

/// Obfuscate a User-Password value
///
/// The output is always a non-empty multiple of 16 bytes; an empty password
/// becomes a single block of keystream.
pub fn obfuscate(
    secret: &[u8],
    authenticator: &[u8; AUTHENTICATOR_LENGTH],
    password: &[u8],
) -> Vec<u8> {
    let blocks = password.len().div_ceil(BLOCK_SIZE).max(1);
    let mut padded = password.to_vec();
    padded.resize(blocks * BLOCK_SIZE, 0);

    let mut output = Vec::with_capacity(padded.len());
    let mut previous = *authenticator;

    for chunk in padded.chunks(BLOCK_SIZE) {
        let key = keystream_block(secret, &previous);
        for (i, byte) in chunk.iter().enumerate() {
            previous[i] = byte ^ key[i];
        }
        output.extend_from_slice(&previous);
    }

    output
}

/// Recover a User-Password value obfuscated with [`obfuscate`]
///
/// Zero bytes are padding: the result is cut at the first zero byte unless
/// that byte is the very first one, in which case the whole buffer is
/// returned. Ciphertext shorter than a block is decoded into a zeroed
/// 16-byte buffer, so the unfilled tail reads as padding. Longer ciphertext
/// never yields more bytes than it holds.
pub fn deobfuscate(
    secret: &[u8],
    ciphertext: &[u8],
    authenticator: &[u8; AUTHENTICATOR_LENGTH],
) -> Vec<u8> {
    let mut plain = vec![0u8; ciphertext.len().max(BLOCK_SIZE)];
    let mut salt: &[u8] = authenticator;

    for (n, chunk) in ciphertext.chunks(BLOCK_SIZE).enumerate() {
        let key = keystream_block(secret, salt);
        let offset = n * BLOCK_SIZE;
        for (i, byte) in chunk.iter().enumerate() {
            plain[offset + i] = byte ^ key[i];
        }
        salt = chunk;
    }

    if let Some(idx) = plain.iter().position(|&b| b == 0) {
        if idx > 0 {
            plain.truncate(idx);
        }
    }

    plain
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_authenticator() {
        let auth1 = generate_authenticator().unwrap();
        let auth2 = generate_authenticator().unwrap();
        // Should be random
        assert_ne!(auth1, auth2);
    }

    #[test]
    fn test_password_round_trip() {
        let secret = b"testing123";
        let authenticator = [0u8; 16];

        let hidden = obfuscate(secret, &authenticator, b"password");
        assert_eq!(hidden.len(), 16);
        assert_ne!(&hidden[..8], b"password");

        let recovered = deobfuscate(secret, &hidden, &authenticator);
        assert_eq!(recovered, b"password");
    }

    #[test]
    fn test_single_block_matches_md5_keystream() {
        let secret = b"sharedsecret";
        let authenticator = [7u8; 16];

        let mut keyed = secret.to_vec();
        keyed.extend_from_slice(&authenticator);
        let key = md5::compute(&keyed).0;

        let hidden = obfuscate(secret, &authenticator, b"abc");
        assert_eq!(hidden[0], b'a' ^ key[0]);
        assert_eq!(hidden[1], b'b' ^ key[1]);
        assert_eq!(hidden[2], b'c' ^ key[2]);
        // Padding bytes expose the raw keystream
        assert_eq!(&hidden[3..], &key[3..]);
    }

    #[test]
    fn test_full_block_without_padding() {
        let secret = b"s3cr3t";
        let authenticator = [0x42u8; 16];
        let password = b"exactly16bytes!!";

        let hidden = obfuscate(secret, &authenticator, password);
        assert_eq!(hidden.len(), 16);
        assert_eq!(deobfuscate(secret, &hidden, &authenticator), password);
    }

    #[test]
    fn test_long_password_chains_blocks() {
        let secret = b"sharedsecret";
        let authenticator = [1u8; 16];
        let password = b"this password spans more than one block";

        let hidden = obfuscate(secret, &authenticator, password);
        assert_eq!(hidden.len(), 48);

        // Second block is keyed by the first ciphertext block
        let mut keyed = secret.to_vec();
        keyed.extend_from_slice(&hidden[..16]);
        let key = md5::compute(&keyed).0;
        assert_eq!(hidden[16], password[16] ^ key[0]);

        assert_eq!(deobfuscate(secret, &hidden, &authenticator), password);
    }

    #[test]
    fn test_empty_password_is_one_block() {
        let secret = b"sharedsecret";
        let authenticator = [1u8; 16];

        let hidden = obfuscate(secret, &authenticator, b"");
        assert_eq!(hidden.len(), 16);

        // Leading zero is not treated as a terminator
        assert_eq!(deobfuscate(secret, &hidden, &authenticator), vec![0u8; 16]);
    }

    #[test]
    fn test_wrong_secret_does_not_recover() {
        let authenticator = [9u8; 16];
        let hidden = obfuscate(b"right", &authenticator, b"password");
        assert_ne!(deobfuscate(b"wrong", &hidden, &authenticator), b"password");
    }

    #[test]
    fn test_short_ciphertext_reads_tail_as_padding() {
        let secret = b"testing123";
        let authenticator = [3u8; 16];
        let hidden = obfuscate(secret, &authenticator, b"pass");

        let recovered = deobfuscate(secret, &hidden[..4], &authenticator);
        assert_eq!(recovered, b"pass");
    }

    #[test]
    fn test_partial_final_block_keeps_ciphertext_length() {
        let secret = b"testing123";
        let authenticator = [8u8; 16];
        let mut password = vec![0u8];
        password.extend_from_slice(&[b'x'; 19]);

        let hidden = obfuscate(secret, &authenticator, &password);
        assert_eq!(hidden.len(), 32);

        // Leading zero disables truncation; the result still stops at 20 bytes
        let recovered = deobfuscate(secret, &hidden[..20], &authenticator);
        assert_eq!(recovered, password);
    }

    #[test]
    fn test_long_ciphertext_never_grows() {
        let secret = b"testing123";
        let authenticator = [2u8; 16];
        let mut password = vec![0u8];
        password.extend_from_slice(&[b'a'; 249]);

        let hidden = obfuscate(secret, &authenticator, &password);
        let recovered = deobfuscate(secret, &hidden[..250], &authenticator);
        assert_eq!(recovered.len(), 250);
        assert_eq!(recovered, password);

        let unpadded = obfuscate(secret, &authenticator, &[b'a'; 253]);
        assert_eq!(deobfuscate(secret, &unpadded[..253], &authenticator).len(), 253);
    }
}
