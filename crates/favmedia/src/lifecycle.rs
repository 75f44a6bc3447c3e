//! Host integration handles
//!
//! Integration code registers hooks with its host and gets back something
//! that undoes each one. `Registrations` owns those undo handles so they can
//! be released together on shutdown instead of living in a global.

/// Undoes one registration
pub type Unregister = Box<dyn FnOnce() + Send>;

/// Owned collection of pending unregister handles
#[derive(Default)]
pub struct Registrations {
    handles: Vec<Unregister>,
}

impl Registrations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, unregister: impl FnOnce() + Send + 'static) {
        self.handles.push(Box::new(unregister));
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Run every handle once, newest first, and empty the collection
    ///
    /// Returns how many handles ran.
    pub fn shutdown(&mut self) -> usize {
        let count = self.handles.len();
        while let Some(unregister) = self.handles.pop() {
            unregister();
        }
        if count > 0 {
            log::debug!("favmedia: released {} registrations", count);
        }
        count
    }
}

impl Drop for Registrations {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl std::fmt::Debug for Registrations {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registrations")
            .field("pending", &self.handles.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    fn recorder() -> (Arc<Mutex<Vec<u32>>>, impl Fn(u32) -> Box<dyn FnOnce() + Send>) {
        let log = Arc::new(Mutex::new(Vec::new()));
        let handle = log.clone();
        let make = move |id: u32| {
            let log = handle.clone();
            Box::new(move || log.lock().push(id)) as Box<dyn FnOnce() + Send>
        };
        (log, make)
    }

    #[test]
    fn test_shutdown_runs_newest_first() {
        let (log, make) = recorder();
        let mut regs = Registrations::new();
        regs.push(make(1));
        regs.push(make(2));
        regs.push(make(3));
        assert_eq!(regs.len(), 3);

        assert_eq!(regs.shutdown(), 3);
        assert_eq!(*log.lock(), vec![3, 2, 1]);
        assert!(regs.is_empty());
    }

    #[test]
    fn test_shutdown_runs_each_once() {
        let (log, make) = recorder();
        let mut regs = Registrations::new();
        regs.push(make(1));

        regs.shutdown();
        assert_eq!(regs.shutdown(), 0);
        drop(regs);
        assert_eq!(*log.lock(), vec![1]);
    }

    #[test]
    fn test_drop_releases_pending() {
        let (log, make) = recorder();
        {
            let mut regs = Registrations::new();
            regs.push(make(7));
        }
        assert_eq!(*log.lock(), vec![7]);
    }
}
