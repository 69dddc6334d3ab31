use base64::engine::general_purpose::STANDARD_NO_PAD;
use base64::Engine;
use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

use super::CryptoError;

pub const PBKDF2_ITERATIONS: u32 = 600_000;
pub const KEY_LENGTH: usize = 32;
pub const SALT_LENGTH: usize = 16;

const SCHEME: &str = "pbkdf2-sha256";

/// Derive a key from password + salt using PBKDF2-SHA256. Zeroed on drop.
fn derive(password: &str, salt: &[u8], iterations: u32) -> Zeroizing<[u8; KEY_LENGTH]> {
    let mut key = Zeroizing::new([0u8; KEY_LENGTH]);
    pbkdf2_hmac::<Sha256>(password.as_bytes(), salt, iterations, &mut key[..]);
    key
}

/// Generate a cryptographically random salt
pub fn generate_salt() -> [u8; SALT_LENGTH] {
    use rand::RngCore;
    let mut salt = [0u8; SALT_LENGTH];
    rand::thread_rng().fill_bytes(&mut salt);
    salt
}

/// Hash a password into the self-describing storage form
/// `pbkdf2-sha256$<iterations>$<salt>$<key>` (base64, unpadded).
pub fn hash_password(password: &str, iterations: u32) -> String {
    let salt = generate_salt();
    let key = derive(password, &salt, iterations);
    format!(
        "{SCHEME}${iterations}${}${}",
        STANDARD_NO_PAD.encode(salt),
        STANDARD_NO_PAD.encode(&key[..])
    )
}

/// Check a password against a stored hash in constant time.
pub fn verify_password(password: &str, stored: &str) -> Result<(), CryptoError> {
    let mut parts = stored.split('$');
    let (Some(scheme), Some(iterations), Some(salt), Some(expected), None) = (
        parts.next(),
        parts.next(),
        parts.next(),
        parts.next(),
        parts.next(),
    ) else {
        return Err(CryptoError::HashFormat);
    };
    if scheme != SCHEME {
        return Err(CryptoError::HashFormat);
    }
    let iterations: u32 = iterations.parse().map_err(|_| CryptoError::HashFormat)?;
    if iterations == 0 {
        return Err(CryptoError::HashFormat);
    }
    let salt = STANDARD_NO_PAD.decode(salt).map_err(|_| CryptoError::HashFormat)?;
    let expected = STANDARD_NO_PAD
        .decode(expected)
        .map_err(|_| CryptoError::HashFormat)?;
    if expected.len() != KEY_LENGTH {
        return Err(CryptoError::HashFormat);
    }

    let key = derive(password, &salt, iterations);
    if bool::from(key[..].ct_eq(expected.as_slice())) {
        Ok(())
    } else {
        Err(CryptoError::WrongPassword)
    }
}
