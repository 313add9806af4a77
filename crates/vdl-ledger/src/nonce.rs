use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use alloy_primitives::Address;
use tokio::sync::OwnedMutexGuard;

/// Per-account serialization of nonce acquisition and use.
///
/// An account's nonce must increase monotonically across submitted
/// transactions; two in-flight notarizations signing with the same account
/// would otherwise race the `nonce_for` query and collide on chain. Holding
/// the guard returned by [`NonceAllocator::lock`] across the
/// fetch-nonce → sign → submit window serializes that critical section per
/// account while leaving other accounts unaffected.
pub struct NonceAllocator {
    locks: Mutex<HashMap<Address, Arc<tokio::sync::Mutex<()>>>>,
}

impl NonceAllocator {
    pub fn new() -> Self {
        Self {
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Acquire the submission lock for an account.
    pub async fn lock(&self, account: Address) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().expect("nonce map poisoned");
            Arc::clone(locks.entry(account).or_default())
        };
        lock.lock_owned().await
    }
}

impl Default for NonceAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for NonceAllocator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NonceAllocator")
            .field("accounts", &self.locks.lock().expect("nonce map poisoned").len())
            .finish()
    }
}
