use k256::ecdsa::SigningKey;
use k256::elliptic_curve::sec1::ToEncodedPoint;
use k256::PublicKey;
use sha3::{Digest, Keccak256};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

pub const SECRET_KEY_LEN: usize = 32;
const ADDRESS_LEN: usize = 20;

/// Why a credential string was rejected. Never carries the input itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialFormatError {
    WrongLength(usize),
    NotHex,
    OutOfRange,
}

impl fmt::Display for CredentialFormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CredentialFormatError::WrongLength(len) => write!(
                f,
                "expected {} hex characters, found {len}",
                SECRET_KEY_LEN * 2
            ),
            CredentialFormatError::NotHex => write!(f, "not a hex string"),
            CredentialFormatError::OutOfRange => {
                write!(f, "not a valid secp256k1 private key")
            }
        }
    }
}

/// A secp256k1 signing key held for the lifetime of a descriptor.
///
/// The key bytes are zeroed on drop and never appear in `Debug` or
/// `Display`; both show only the derived account address.
#[derive(Clone, ZeroizeOnDrop)]
pub struct SigningCredential {
    secret: [u8; SECRET_KEY_LEN],
    #[zeroize(skip)]
    address: String,
}

impl SigningCredential {
    /// Parse a 32-byte private key written as hex, with or without `0x`
    pub fn from_hex(input: &str) -> Result<Self, CredentialFormatError> {
        let trimmed = input.trim();
        let digits = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);
        if digits.len() != SECRET_KEY_LEN * 2 {
            return Err(CredentialFormatError::WrongLength(digits.len()));
        }

        let mut secret = [0u8; SECRET_KEY_LEN];
        if hex::decode_to_slice(digits, &mut secret).is_err() {
            secret.zeroize();
            return Err(CredentialFormatError::NotHex);
        }
        Self::from_bytes(secret)
    }

    pub fn from_bytes(mut secret: [u8; SECRET_KEY_LEN]) -> Result<Self, CredentialFormatError> {
        let address = match SigningKey::from_slice(&secret) {
            Ok(key) => account_address(&key),
            Err(_) => {
                secret.zeroize();
                return Err(CredentialFormatError::OutOfRange);
            }
        };
        Ok(SigningCredential { secret, address })
    }

    /// Generate a fresh random key
    pub fn generate() -> Self {
        let key = SigningKey::random(&mut rand::thread_rng());
        let mut secret = [0u8; SECRET_KEY_LEN];
        secret.copy_from_slice(&key.to_bytes());
        let address = account_address(&key);
        SigningCredential { secret, address }
    }

    /// EIP-55 checksummed account address
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Hex form of the private key (use carefully)
    pub fn expose_secret_hex(&self) -> Zeroizing<String> {
        Zeroizing::new(hex::encode(self.secret))
    }
}

impl fmt::Debug for SigningCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningCredential")
            .field("address", &self.address)
            .finish()
    }
}

impl fmt::Display for SigningCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.address)
    }
}

impl PartialEq for SigningCredential {
    fn eq(&self, other: &Self) -> bool {
        self.address == other.address
    }
}

impl Eq for SigningCredential {}

fn account_address(key: &SigningKey) -> String {
    let public_key = PublicKey::from(key.verifying_key());
    let point = public_key.to_encoded_point(false);
    // skip the 0x04 uncompressed tag
    let hash = Keccak256::digest(&point.as_bytes()[1..]);
    to_checksum_address(&hash[hash.len() - ADDRESS_LEN..])
}

/// Mixed-case checksum encoding of a 20-byte address
pub fn to_checksum_address(bytes: &[u8]) -> String {
    let lower = hex::encode(bytes);
    let hash = Keccak256::digest(lower.as_bytes());

    let mut out = String::with_capacity(lower.len() + 2);
    out.push_str("0x");
    for (i, c) in lower.chars().enumerate() {
        let nibble = if i % 2 == 0 {
            hash[i / 2] >> 4
        } else {
            hash[i / 2] & 0x0f
        };
        if c.is_ascii_alphabetic() && nibble >= 8 {
            out.push(c.to_ascii_uppercase());
        } else {
            out.push(c);
        }
    }
    out
}
