/// Holds the revocable preview handle (an object URL in the browser) for the
/// image currently on screen. The previous handle is dropped, and therefore
/// released, whenever it is replaced or cleared.
#[derive(Debug)]
pub struct PreviewSlot<H> {
    handle: Option<H>,
}

impl<H> Default for PreviewSlot<H> {
    fn default() -> Self {
        Self { handle: None }
    }
}

impl<H> PreviewSlot<H> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Option<&H> {
        self.handle.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.handle.is_none()
    }

    pub fn replace(&mut self, handle: H) {
        if self.handle.replace(handle).is_some() {
            log::debug!("Released previous preview handle");
        }
    }

    pub fn clear(&mut self) {
        if self.handle.take().is_some() {
            log::debug!("Released preview handle");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    struct Handle {
        released: Rc<Cell<u32>>,
    }

    impl Drop for Handle {
        fn drop(&mut self) {
            self.released.set(self.released.get() + 1);
        }
    }

    #[test]
    fn replace_releases_previous_handle_once() {
        let released = Rc::new(Cell::new(0));
        let mut slot = PreviewSlot::new();

        slot.replace(Handle { released: released.clone() });
        assert_eq!(released.get(), 0);

        slot.replace(Handle { released: released.clone() });
        assert_eq!(released.get(), 1);
        assert!(!slot.is_empty());

        slot.clear();
        assert_eq!(released.get(), 2);
        assert!(slot.get().is_none());

        slot.clear();
        assert_eq!(released.get(), 2);
    }
}
