//! Chunked execution of a derivation session with callback delivery.
//!
//! A long derivation must not run as one unbroken unit inside a cooperative
//! single-threaded host, so the scheduler advances the session by a bounded
//! chunk of iterations at a time and hands control back through an
//! injectable yield hook between chunks. Progress and completion are two
//! distinct channels: the progress callback fires after every chunk with a
//! non-decreasing percent, and the result callback fires exactly once, after
//! the final progress value of 100.
//!
//! Chunking never changes the derived key, only the scheduling granularity.

use crate::pbkdf2::{Progress, Session};
use crate::types::{DEFAULT_CHUNK_SIZE, HexCase, KdfError};

/// Drives a [`Session`] to completion in bounded chunks.
pub struct Scheduler {
    session: Session,
    chunk_size: u32,
    hex_case: HexCase,
}

impl Scheduler {
    /// Wrap a session with the default chunk size and lowercase hex output.
    pub fn new(session: Session) -> Self {
        Self {
            session,
            chunk_size: DEFAULT_CHUNK_SIZE,
            hex_case: HexCase::default(),
        }
    }

    /// Set the number of iterations per chunk. `0` selects the default.
    pub fn with_chunk_size(mut self, chunk_size: u32) -> Self {
        self.chunk_size = if chunk_size == 0 {
            DEFAULT_CHUNK_SIZE
        } else {
            chunk_size
        };
        self
    }

    /// Set the hex casing of the delivered key.
    pub fn with_hex_case(mut self, case: HexCase) -> Self {
        self.hex_case = case;
        self
    }

    /// Run to completion without a yield hook (plain synchronous loop).
    pub fn run<P, R>(self, on_progress: P, on_result: R) -> Result<(), KdfError>
    where
        P: FnMut(f64),
        R: FnOnce(String),
    {
        self.run_with_yield(on_progress, on_result, || {})
    }

    /// Run to completion, invoking `yield_point` between chunks.
    ///
    /// The hook is where a cooperative host lends the thread out (e.g.
    /// `std::thread::yield_now`, a task-queue reschedule, or an async
    /// yield shim). It is not called after the final chunk.
    pub fn run_with_yield<P, R, Y>(
        mut self,
        mut on_progress: P,
        on_result: R,
        mut yield_point: Y,
    ) -> Result<(), KdfError>
    where
        P: FnMut(f64),
        R: FnOnce(String),
        Y: FnMut(),
    {
        loop {
            match self.session.step(self.chunk_size)? {
                Progress::Working(pct) => {
                    on_progress(pct);
                    yield_point();
                }
                Progress::Finished => {
                    on_progress(100.0);
                    on_result(self.session.key_hex(self.hex_case));
                    return Ok(());
                }
            }
        }
    }
}
