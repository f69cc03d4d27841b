//! Credit metering shared by all simulated providers
//!
//! Every provider owns one [`CreditMeter`] constructed with a fixed cap.
//! Deductions clamp at zero and never fail; exhaustion does not block
//! further calls. The counter must stay consistent when several pending
//! calls deduct before any of them resolves, so the decrement is an atomic
//! read-modify-write.

use std::sync::atomic::{AtomicU32, Ordering};
use tracing::debug;

/// Monotonically-decreasing credit counter, floor-clamped at zero
#[derive(Debug)]
pub struct CreditMeter {
    provider: &'static str,
    cap: u32,
    balance: AtomicU32,
}

impl CreditMeter {
    /// Create a meter with a full balance of `cap` credits
    pub fn new(provider: &'static str, cap: u32) -> Self {
        Self {
            provider,
            cap,
            balance: AtomicU32::new(cap),
        }
    }

    /// Deduct `amount` credits, clamping at zero.
    ///
    /// Returns the remaining balance. Deducting from an empty meter is not
    /// an error; the balance simply stays at zero.
    pub fn deduct(&self, amount: u32) -> u32 {
        let mut current = self.balance.load(Ordering::Acquire);
        loop {
            let next = current.saturating_sub(amount);
            match self.balance.compare_exchange_weak(
                current,
                next,
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => {
                    debug!(
                        provider = self.provider,
                        amount,
                        remaining = next,
                        "credits deducted"
                    );
                    return next;
                }
                Err(actual) => current = actual,
            }
        }
    }

    /// Current balance; read-only, no side effects
    pub fn balance(&self) -> u32 {
        self.balance.load(Ordering::Acquire)
    }

    /// The cap this meter was constructed with
    pub fn cap(&self) -> u32 {
        self.cap
    }
}
