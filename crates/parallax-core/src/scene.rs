//! Holder for the one live plane surface.
//!
//! A surface owns its GPU resources and releases them on drop, so replacing
//! it is a single swap: build the new one, put it in the slot, drop the old
//! one. The slot is never empty once the first surface lands and never
//! holds two.

#[derive(Debug)]
pub struct SceneSlot<S> {
    live: Option<S>,
    generation: u64,
}

impl<S> Default for SceneSlot<S> {
    fn default() -> Self {
        Self {
            live: None,
            generation: 0,
        }
    }
}

impl<S> SceneSlot<S> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn live(&self) -> Option<&S> {
        self.live.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_none()
    }

    /// Number of surfaces attached so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Attach `next` and release the previous surface.
    pub fn replace(&mut self, next: S) {
        let previous = self.live.replace(next);
        self.generation += 1;
        if previous.is_some() {
            log::debug!("[scene] released surface before #{}", self.generation);
        }
        drop(previous);
    }

    /// Build a replacement and swap it in. On error the current surface
    /// stays attached.
    pub fn rebuild<E>(&mut self, build: impl FnOnce() -> Result<S, E>) -> Result<(), E> {
        let next = build()?;
        self.replace(next);
        Ok(())
    }
}
