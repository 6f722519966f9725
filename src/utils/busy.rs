//! Single-flight flag shared by the session and the PDF exporter

use std::sync::atomic::{AtomicBool, Ordering};

/// Holds a busy flag set; clears it when dropped, including when the owning
/// future is cancelled mid-await
pub struct BusyGuard<'a>(&'a AtomicBool);

impl<'a> BusyGuard<'a> {
    /// Sets the flag, or returns `None` when it is already set
    pub fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| BusyGuard(flag))
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}
