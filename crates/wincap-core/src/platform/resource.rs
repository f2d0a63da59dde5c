//! Scoped ownership of native capture resources.
//!
//! Each native handle is wrapped the moment it is acquired. A guard only
//! exists for a handle that was acquired successfully, and it releases that
//! handle exactly once when dropped. Guards declared in acquisition order
//! drop in reverse order, on success and on every early error return.

use tracing::trace;

use crate::capture::CaptureError;

pub struct Scoped<T: Copy, F: FnMut(T)> {
    handle: T,
    resource: &'static str,
    release: F,
}

impl<T: Copy, F: FnMut(T)> Scoped<T, F> {
    /// Wrap a freshly acquired handle.
    ///
    /// Fails with `ResourceCreationFailed` naming `resource` when `is_valid`
    /// rejects the handle. Nothing is released in that case.
    pub fn acquire(
        handle: T,
        resource: &'static str,
        is_valid: impl FnOnce(&T) -> bool,
        release: F,
    ) -> Result<Self, CaptureError> {
        if !is_valid(&handle) {
            return Err(CaptureError::ResourceCreationFailed { resource });
        }
        trace!(event = "core.platform.resource_acquired", resource = resource);
        Ok(Self {
            handle,
            resource,
            release,
        })
    }

    pub fn get(&self) -> T {
        self.handle
    }
}

impl<T: Copy, F: FnMut(T)> Drop for Scoped<T, F> {
    fn drop(&mut self) {
        (self.release)(self.handle);
        trace!(
            event = "core.platform.resource_released",
            resource = self.resource
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn test_released_once_on_drop() {
        let released = RefCell::new(Vec::new());
        {
            let guard = Scoped::acquire(7u32, "handle", |h| *h != 0, |h| {
                released.borrow_mut().push(h)
            })
            .unwrap();
            assert_eq!(guard.get(), 7);
        }
        assert_eq!(*released.borrow(), vec![7]);
    }

    #[test]
    fn test_invalid_handle_is_not_released() {
        let released = RefCell::new(Vec::new());
        let result = Scoped::acquire(0u32, "device context", |h| *h != 0, |h| {
            released.borrow_mut().push(h)
        });

        assert!(matches!(
            result,
            Err(CaptureError::ResourceCreationFailed {
                resource: "device context"
            })
        ));
        assert!(released.borrow().is_empty());
    }

    #[test]
    fn test_release_order_is_reverse_of_acquisition() {
        let released = RefCell::new(Vec::new());
        let release = |h: u32| released.borrow_mut().push(h);
        {
            let _first = Scoped::acquire(1u32, "first", |_| true, release).unwrap();
            let _second = Scoped::acquire(2u32, "second", |_| true, release).unwrap();
            let _third = Scoped::acquire(3u32, "third", |_| true, release).unwrap();
        }
        assert_eq!(*released.borrow(), vec![3, 2, 1]);
    }

    #[test]
    fn test_early_failure_releases_only_acquired() {
        let released = RefCell::new(Vec::new());
        let release = |h: u32| released.borrow_mut().push(h);

        let sequence = || -> Result<(), CaptureError> {
            let _dc = Scoped::acquire(1u32, "device context", |_| true, release)?;
            let _mem = Scoped::acquire(2u32, "memory device context", |_| true, release)?;
            let _bitmap = Scoped::acquire(0u32, "compatible bitmap", |h| *h != 0, release)?;
            Ok(())
        };

        let err = sequence().unwrap_err();
        assert!(matches!(
            err,
            CaptureError::ResourceCreationFailed {
                resource: "compatible bitmap"
            }
        ));
        assert_eq!(*released.borrow(), vec![2, 1]);
    }
}
