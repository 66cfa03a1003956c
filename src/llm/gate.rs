use std::cell::Cell;
use std::rc::Rc;

/// Lets one chat request run at a time, whichever control started it
#[derive(Clone, Debug, Default)]
pub struct RequestGate {
    busy: Rc<Cell<bool>>,
}

/// Held for the lifetime of one request; the gate reopens when it drops
#[derive(Debug)]
pub struct RequestPermit {
    busy: Rc<Cell<bool>>,
}

impl RequestGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// `None` while another request is still in flight
    pub fn try_acquire(&self) -> Option<RequestPermit> {
        if self.busy.replace(true) {
            return None;
        }
        Some(RequestPermit {
            busy: self.busy.clone(),
        })
    }

    #[cfg(test)]
    pub fn is_busy(&self) -> bool {
        self.busy.get()
    }
}

impl Drop for RequestPermit {
    fn drop(&mut self) {
        self.busy.set(false);
    }
}
