//! # Session Handoff
//!
//! A one-shot slot for passing a payload between checkout stages. The
//! cart snapshot is put at checkout start and taken by the payment
//! stage; the invoice is put at confirmation and taken by the receipt
//! renderer. Taking consumes the payload: a refreshed receipt page
//! cannot double-render, it sees an empty slot and must bail out.

use std::sync::Mutex;

/// A session-scoped slot holding at most one payload.
///
/// `put` replaces any previous payload; `take` consumes it.
#[derive(Debug, Default)]
pub struct Handoff<T> {
    slot: Mutex<Option<T>>,
}

impl<T> Handoff<T> {
    pub fn new() -> Self {
        Handoff {
            slot: Mutex::new(None),
        }
    }

    /// Stores a payload, replacing whatever was there.
    pub fn put(&self, value: T) {
        *self.slot.lock().expect("Handoff mutex poisoned") = Some(value);
    }

    /// Takes the payload out, leaving the slot empty.
    pub fn take(&self) -> Option<T> {
        self.slot.lock().expect("Handoff mutex poisoned").take()
    }

    /// True if a payload is waiting.
    pub fn is_loaded(&self) -> bool {
        self.slot.lock().expect("Handoff mutex poisoned").is_some()
    }
}
