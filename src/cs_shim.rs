//! `critical-section` 1.x provider for ESP-IDF builds.
//!
//! [`SharedLed`](crate::app::shared::SharedLed) locks through
//! `CriticalSectionRawMutex`, which links against the two symbols below.
//! Backed by one process-wide std mutex; nested acquires on the same
//! thread only bump a depth counter.

use core::cell::{Cell, RefCell};
use std::sync::{Mutex, MutexGuard, PoisonError};

static SECTION: Mutex<()> = Mutex::new(());

thread_local! {
    static DEPTH: Cell<u8> = const { Cell::new(0) };
    static HELD: RefCell<Option<MutexGuard<'static, ()>>> = const { RefCell::new(None) };
}

#[unsafe(no_mangle)]
pub extern "C" fn _critical_section_1_0_acquire() -> u8 {
    let depth = DEPTH.get();
    if depth == 0 {
        let guard = SECTION.lock().unwrap_or_else(PoisonError::into_inner);
        HELD.with(|held| *held.borrow_mut() = Some(guard));
    }
    let depth = depth.saturating_add(1);
    DEPTH.set(depth);
    depth
}

#[unsafe(no_mangle)]
pub extern "C" fn _critical_section_1_0_release(_token: u8) {
    let depth = DEPTH.get();
    if depth == 0 {
        return;
    }
    DEPTH.set(depth - 1);
    if depth == 1 {
        HELD.with(|held| *held.borrow_mut() = None);
    }
}
