//! Process-wide registry of buffers holding secret material.
//!
//! Every heap buffer that carries secret bytes between engine steps is
//! registered here for the lifetime of the operation. Releasing a handle
//! (or dropping it) overwrites the buffer before the memory returns to the
//! allocator; [`teardown`] sweeps anything still registered and then asks
//! the host collector, if one was installed, for a pass.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use zeroize::Zeroize;

struct Entry {
    id: u64,
    buffer: Arc<Mutex<Vec<u8>>>,
}

static REGISTRY: Mutex<Vec<Entry>> = Mutex::new(Vec::new());
static NEXT_ID: AtomicU64 = AtomicU64::new(1);
static COLLECTOR: Mutex<Option<fn()>> = Mutex::new(None);

fn registry_lock() -> MutexGuard<'static, Vec<Entry>> {
    REGISTRY.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Owning handle to a registered sensitive buffer.
///
/// The buffer is wiped when the handle is released or dropped, and again by
/// [`teardown`] if a handle somehow survives its operation. Releasing twice
/// is a no-op: the registry entry is removed by id on the first release.
pub struct SensitiveBytes {
    id: u64,
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl SensitiveBytes {
    /// Take ownership of `bytes` and add them to the registry.
    pub fn register(bytes: Vec<u8>) -> Self {
        let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
        let buffer = Arc::new(Mutex::new(bytes));
        registry_lock().push(Entry {
            id,
            buffer: Arc::clone(&buffer),
        });
        SensitiveBytes { id, buffer }
    }

    /// Scoped access to the bytes.
    pub fn with<R>(&self, f: impl FnOnce(&mut [u8]) -> R) -> R {
        let mut guard = self.buffer.lock().unwrap_or_else(PoisonError::into_inner);
        f(guard.as_mut_slice())
    }

    /// Overwrite the buffer and drop the registry entry.
    pub fn release(self) {}
}

impl Drop for SensitiveBytes {
    fn drop(&mut self) {
        self.buffer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .zeroize();
        registry_lock().retain(|entry| entry.id != self.id);
    }
}

/// Number of live registered buffers. Registrations are balanced with
/// releases, so this is zero whenever no operation is in flight.
pub fn outstanding() -> usize {
    registry_lock().len()
}

/// Install the host collector hook, invoked after a teardown sweep. No-op
/// when never called.
pub fn set_collector_hook(hook: fn()) {
    *COLLECTOR.lock().unwrap_or_else(PoisonError::into_inner) = Some(hook);
}

/// Overwrite every registered buffer, drain the registry, then request a
/// collector pass. Returns how many buffers were swept.
pub fn teardown() -> usize {
    let mut registry = registry_lock();
    let swept = registry.len();
    for entry in registry.drain(..) {
        entry
            .buffer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .zeroize();
    }
    drop(registry);
    if let Some(hook) = *COLLECTOR.lock().unwrap_or_else(PoisonError::into_inner) {
        hook();
    }
    swept
}
