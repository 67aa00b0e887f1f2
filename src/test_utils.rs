//! Common test utilities.
//!
//! [`Probe`] hands out [`io::Write`] outputs and observes what has been
//! written into them, and how many of them have been released.

use std::{cell::RefCell, io, rc::Rc};

#[derive(Debug, Default)]
struct State {
    buffer: Vec<u8>,
    writes: usize,
    flushes: usize,
    releases: usize,
}

/// Observer of the [`ProbeOutput`]s it creates.
#[derive(Clone, Debug, Default)]
pub struct Probe {
    state: Rc<RefCell<State>>,
}

impl Probe {
    /// Creates a new [`Probe`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an output recording everything written into it.
    #[must_use]
    pub fn output(&self) -> ProbeOutput {
        ProbeOutput {
            state: Rc::clone(&self.state),
            fail_on: None,
        }
    }

    /// Creates an output rejecting any write containing the given `marker`.
    #[must_use]
    pub fn failing_on(&self, marker: &'static str) -> ProbeOutput {
        ProbeOutput {
            state: Rc::clone(&self.state),
            fail_on: Some(marker),
        }
    }

    /// Everything written so far.
    #[must_use]
    pub fn contents(&self) -> String {
        String::from_utf8(self.state.borrow().buffer.clone())
            .expect("output is not UTF-8")
    }

    /// Number of successful write calls.
    #[must_use]
    pub fn writes(&self) -> usize {
        self.state.borrow().writes
    }

    /// Number of flush calls.
    #[must_use]
    pub fn flushes(&self) -> usize {
        self.state.borrow().flushes
    }

    /// Number of dropped outputs.
    #[must_use]
    pub fn releases(&self) -> usize {
        self.state.borrow().releases
    }
}

/// [`io::Write`] implementor observed by a [`Probe`].
#[derive(Debug)]
pub struct ProbeOutput {
    state: Rc<RefCell<State>>,
    fail_on: Option<&'static str>,
}

impl io::Write for ProbeOutput {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if let Some(marker) = self.fail_on {
            if String::from_utf8_lossy(buf).contains(marker) {
                return Err(io::Error::new(
                    io::ErrorKind::Other,
                    format!("refused to write `{marker}`"),
                ));
            }
        }
        let mut state = self.state.borrow_mut();
        state.buffer.extend_from_slice(buf);
        state.writes += 1;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.state.borrow_mut().flushes += 1;
        Ok(())
    }
}

impl Drop for ProbeOutput {
    fn drop(&mut self) {
        self.state.borrow_mut().releases += 1;
    }
}
