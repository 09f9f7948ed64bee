//! Thread affinity checks.
//!
//! Key dispatch runs on the toolkit's event-dispatch thread only. Types that
//! hold dispatch state record the thread that created them in a
//! [`ThreadAffinity`] and assert against it on entry:
//!
//! ```
//! use horizon_keys_core::ThreadAffinity;
//!
//! struct Engine {
//!     affinity: ThreadAffinity,
//! }
//!
//! impl Engine {
//!     fn on_key(&mut self) {
//!         self.affinity.assert_same_thread();
//!         // ... mutate dispatch state ...
//!     }
//! }
//!
//! let mut engine = Engine { affinity: ThreadAffinity::current() };
//! engine.on_key();
//! ```

use std::thread::ThreadId;

/// Records the thread an object belongs to.
#[derive(Debug, Clone, Copy)]
pub struct ThreadAffinity {
    thread_id: ThreadId,
}

impl Default for ThreadAffinity {
    fn default() -> Self {
        Self::current()
    }
}

impl ThreadAffinity {
    /// Bind to the calling thread.
    #[inline]
    pub fn current() -> Self {
        Self {
            thread_id: std::thread::current().id(),
        }
    }

    /// Whether the calling thread is the bound one.
    #[inline]
    pub fn is_same_thread(&self) -> bool {
        std::thread::current().id() == self.thread_id
    }

    /// Panic unless called from the bound thread. Checked in release builds too.
    #[inline]
    pub fn assert_same_thread(&self) {
        if !self.is_same_thread() {
            self.wrong_thread();
        }
    }

    #[cold]
    #[inline(never)]
    fn wrong_thread(&self) -> ! {
        let current = std::thread::current();
        panic!(
            "key dispatch state owned by thread {:?} was touched from \"{}\" ({:?})",
            self.thread_id,
            current.name().unwrap_or("<unnamed>"),
            current.id()
        );
    }
}
