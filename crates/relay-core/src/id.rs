use rand::rngs::OsRng;
use rand::RngCore;

/// Number of random bytes behind every action ID.
pub const ID_BYTES: usize = 8;

/// Generate a fresh action ID: 8 bytes from the OS CSPRNG, hex-encoded.
///
/// Collisions are not checked against the registry.
pub fn generate_id() -> String {
    let mut bytes = [0u8; ID_BYTES];
    OsRng.fill_bytes(&mut bytes);
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}
