//! Keccak-256 hashing and the secp256k1 signing backend

use crate::traits::{FeedError, FeedSigner};
use crate::types::{Address, Digest32, RecoverableSignature};
use secp256k1::ecdsa::RecoveryId;
use secp256k1::{Message, PublicKey, Secp256k1, SecretKey};
use sha2::Sha256;
use sha3::{Digest, Keccak256};

/// Keccak-256 of the input. This is the legacy Keccak padding, not
/// NIST SHA3-256; the two are not interchangeable and every verifier
/// of these feeds expects Keccak.
pub fn keccak256(data: &[u8]) -> Digest32 {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Derive the 20-byte address of a public key: Keccak-256 of the
/// uncompressed point without its 0x04 prefix, last 20 bytes.
pub fn derive_address(public_key: &PublicKey) -> Address {
    let uncompressed = public_key.serialize_uncompressed();
    let digest = keccak256(&uncompressed[1..]);
    let mut address = [0u8; 20];
    address.copy_from_slice(&digest[12..]);
    address
}

/// Recover the signer address from a digest and (v, r, s). Accepts both
/// the bare recovery id (0..=3) and the 27/28 chain form for v.
pub fn recover_signer(
    digest: &Digest32,
    signature: &RecoverableSignature,
) -> Result<Address, FeedError> {
    let id = if signature.v >= 27 {
        signature.v - 27
    } else {
        signature.v
    };
    let recovery_id = RecoveryId::from_i32(id as i32).map_err(|_| FeedError::InvalidSignature)?;

    let mut compact = [0u8; 64];
    compact[..32].copy_from_slice(&signature.r);
    compact[32..].copy_from_slice(&signature.s);
    let recoverable =
        secp256k1::ecdsa::RecoverableSignature::from_compact(&compact, recovery_id)
            .map_err(|_| FeedError::InvalidSignature)?;

    let message = Message::from_slice(digest).map_err(|_| FeedError::InvalidSignature)?;
    let secp = Secp256k1::new();
    let public_key = secp
        .recover_ecdsa(&message, &recoverable)
        .map_err(|_| FeedError::InvalidSignature)?;
    Ok(derive_address(&public_key))
}

/// Signing backend holding one secp256k1 private key
pub struct Secp256k1Signer {
    secret: SecretKey,
    address: Address,
}

impl Secp256k1Signer {
    /// Build a signer from raw key bytes. Zero and values at or above
    /// the curve order are rejected.
    pub fn from_bytes(bytes: &[u8; 32]) -> Result<Self, FeedError> {
        let secret = SecretKey::from_slice(bytes).map_err(|_| FeedError::InvalidKey)?;
        let secp = Secp256k1::new();
        let address = derive_address(&PublicKey::from_secret_key(&secp, &secret));
        Ok(Self { secret, address })
    }

    /// Build a signer from a hex-encoded key, with or without 0x prefix
    pub fn from_hex(text: &str) -> Result<Self, FeedError> {
        let digits = text.trim().trim_start_matches("0x");
        let raw = hex::decode(digits).map_err(|_| FeedError::InvalidKey)?;
        let bytes: [u8; 32] = raw.as_slice().try_into().map_err(|_| FeedError::InvalidKey)?;
        Self::from_bytes(&bytes)
    }

    /// Brainwallet-style derivation: the key is SHA-256 of the passphrase
    pub fn from_passphrase(passphrase: &str) -> Result<Self, FeedError> {
        let digest: [u8; 32] = Sha256::digest(passphrase.as_bytes()).into();
        Self::from_bytes(&digest)
    }

    /// Generate a fresh random keypair
    pub fn random() -> Self {
        let secret = SecretKey::new(&mut secp256k1::rand::thread_rng());
        let secp = Secp256k1::new();
        let address = derive_address(&PublicKey::from_secret_key(&secp, &secret));
        Self { secret, address }
    }

    pub fn public_key(&self) -> PublicKey {
        let secp = Secp256k1::new();
        PublicKey::from_secret_key(&secp, &self.secret)
    }

    /// Raw key bytes, for keygen output. Handle with care.
    pub fn secret_bytes(&self) -> [u8; 32] {
        self.secret.secret_bytes()
    }
}

// Keeps the key itself out of debug output and logs
impl std::fmt::Debug for Secp256k1Signer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Secp256k1Signer")
            .field("address", &hex::encode(self.address))
            .finish_non_exhaustive()
    }
}

impl FeedSigner for Secp256k1Signer {
    fn sign_digest(&self, digest: &Digest32) -> Result<RecoverableSignature, FeedError> {
        let message =
            Message::from_slice(digest).map_err(|e| FeedError::SigningError(e.to_string()))?;
        let secp = Secp256k1::new();
        let signature = secp.sign_ecdsa_recoverable(&message, &self.secret);
        let (recovery_id, compact) = signature.serialize_compact();

        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&compact[..32]);
        s.copy_from_slice(&compact[32..]);

        // libsecp256k1 emits low-s only, so (r, s) is already canonical
        Ok(RecoverableSignature {
            v: 27 + recovery_id.to_i32() as u8,
            r,
            s,
        })
    }

    fn address(&self) -> Address {
        self.address
    }
}
