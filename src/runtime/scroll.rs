use std::{cell::Cell, rc::Rc};

/// Host side of the scroll signal. Only this type can write.
#[derive(Debug)]
pub struct ScrollSignal {
    value: Rc<Cell<f64>>,
}

impl ScrollSignal {
    pub fn new(initial: f64) -> Self {
        Self {
            value: Rc::new(Cell::new(initial)),
        }
    }

    /// Publish a new depth. Range is not enforced here; readers clamp.
    pub fn set(&self, value: f64) {
        self.value.set(value);
    }

    pub fn get(&self) -> f64 {
        self.value.get()
    }

    pub fn reader(&self) -> ScrollReader {
        ScrollReader {
            value: Rc::clone(&self.value),
        }
    }
}

impl Default for ScrollSignal {
    fn default() -> Self {
        Self::new(0.0)
    }
}

/// Read-only view of a [`ScrollSignal`].
#[derive(Clone, Debug)]
pub struct ScrollReader {
    value: Rc<Cell<f64>>,
}

impl ScrollReader {
    /// A reader with no host behind it, pinned to `value`.
    pub fn detached(value: f64) -> Self {
        Self {
            value: Rc::new(Cell::new(value)),
        }
    }

    /// Raw value as published by the host; may be out of range or NaN.
    pub fn get(&self) -> f64 {
        self.value.get()
    }
}
