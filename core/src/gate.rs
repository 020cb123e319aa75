//! Randomness gate: the single indirection between the engine and its
//! entropy source.
//!
//! Production binds the gate to the operating-system CSPRNG at `init` and
//! refuses later changes; tests may install a deterministic source before
//! the gate is sealed. There is no user-space PRNG and no fallback — if the
//! OS source fails, the operation fails.

use std::sync::{Mutex, PoisonError};

use rand::TryRngCore;

use crate::error::{RandomnessFault, Result};

/// Fill a buffer with bytes from a randomness source.
pub type SourceFn = fn(&mut [u8]) -> std::result::Result<(), RandomnessFault>;

const SAMPLE_LEN: usize = 32;
const SAMPLE_COUNT: usize = 3;
const MIN_DISTINCT_BYTES: usize = 16;

fn os_source(buffer: &mut [u8]) -> std::result::Result<(), RandomnessFault> {
    rand::rngs::OsRng
        .try_fill_bytes(buffer)
        .map_err(|_| RandomnessFault::SourceUnavailable)
}

struct Gate {
    source: SourceFn,
    sealed: bool,
}

static GATE: Mutex<Gate> = Mutex::new(Gate {
    source: os_source,
    sealed: false,
});

fn current_source() -> SourceFn {
    GATE.lock().unwrap_or_else(PoisonError::into_inner).source
}

/// Replace the randomness source. Intended for tests; refused (returning
/// `false`) once the gate has been sealed by `init`.
pub fn install_source(source: SourceFn) -> bool {
    let mut gate = GATE.lock().unwrap_or_else(PoisonError::into_inner);
    if gate.sealed {
        return false;
    }
    gate.source = source;
    true
}

/// Bind the gate to the operating-system source and refuse later changes.
pub(crate) fn seal_to_os() {
    let mut gate = GATE.lock().unwrap_or_else(PoisonError::into_inner);
    gate.source = os_source;
    gate.sealed = true;
}

/// Fill `buffer` from the bound source.
pub fn fill(buffer: &mut [u8]) -> Result<()> {
    current_source()(buffer).map_err(Into::into)
}

/// Draw `count` fresh bytes from the bound source.
pub fn random_bytes(count: usize) -> Result<Vec<u8>> {
    let mut buffer = vec![0u8; count];
    fill(&mut buffer)?;
    Ok(buffer)
}

/// Self-check for catastrophic source failure: stuck output, zeroed source,
/// disabled syscall. Not a statistical test. Runs at `init` and again before
/// every split.
pub fn verify() -> Result<()> {
    verify_source(current_source())
}

fn verify_source(source: SourceFn) -> Result<()> {
    let mut samples = [[0u8; SAMPLE_LEN]; SAMPLE_COUNT];
    for sample in &mut samples {
        source(sample)?;
    }
    for i in 0..samples.len() {
        for j in i + 1..samples.len() {
            if samples[i] == samples[j] {
                return Err(RandomnessFault::StuckOutput.into());
            }
        }
    }
    for sample in &samples {
        if distinct_byte_count(sample) < MIN_DISTINCT_BYTES {
            return Err(RandomnessFault::LowDiversity.into());
        }
    }
    let mut single = [0u8; 1];
    source(&mut single)?;
    Ok(())
}

fn distinct_byte_count(sample: &[u8]) -> usize {
    let mut seen = [false; 256];
    let mut count = 0;
    for &byte in sample {
        if !seen[byte as usize] {
            seen[byte as usize] = true;
            count += 1;
        }
    }
    count
}
