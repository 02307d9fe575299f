//! Credential verification seam.
//!
//! The application inherits a plaintext-comparison credential scheme. It is
//! preserved here as an explicit, clearly-labeled insecure baseline behind a
//! trait, so a real deployment swaps in a salted-hash verifier without
//! touching the identity store or the handlers.

/// Compares a presented credential against a stored one.
pub trait PasswordVerifier: Send + Sync {
    fn verify(&self, stored: &str, presented: &str) -> bool;
}

/// INSECURE baseline: exact byte-for-byte equality against the stored
/// plaintext credential. No hashing, no salting, not constant-time.
///
/// Kept only because the inherited data model stores plaintext passwords.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlaintextVerifier;

impl PasswordVerifier for PlaintextVerifier {
    fn verify(&self, stored: &str, presented: &str) -> bool {
        stored == presented
    }
}
