use crate::foundation::core::Rect;

/// Default pre-trigger margin so the loop is warm slightly before the element scrolls in.
pub const DEFAULT_ROOT_MARGIN_PX: f64 = 100.0;

/// Last known answer from one observer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Observation {
    /// The host cannot observe this signal. Counts as visible.
    Unavailable,
    Visible,
    Hidden,
}

impl Observation {
    fn from_bool(visible: bool) -> Self {
        if visible { Self::Visible } else { Self::Hidden }
    }

    /// Fail open: only an explicit `Hidden` blocks the gate.
    pub fn allows(self) -> bool {
        !matches!(self, Self::Hidden)
    }
}

/// Which observation APIs the host exposes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ObserverSupport {
    pub intersection: bool,
    pub page_visibility: bool,
}

impl ObserverSupport {
    pub fn all() -> Self {
        Self {
            intersection: true,
            page_visibility: true,
        }
    }

    pub fn none() -> Self {
        Self {
            intersection: false,
            page_visibility: false,
        }
    }
}

/// Result of feeding one observation into the gate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GateTransition {
    Opened,
    Closed,
    Unchanged,
}

/// Combined viewport and tab visibility.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct VisibilityGate {
    viewport: Observation,
    tab: Observation,
}

impl VisibilityGate {
    /// A supported intersection observer starts `Hidden` until its first callback. A supported
    /// page-visibility API starts `Visible` since mounting implies the document is rendering.
    pub fn new(support: ObserverSupport) -> Self {
        Self {
            viewport: if support.intersection {
                Observation::Hidden
            } else {
                Observation::Unavailable
            },
            tab: if support.page_visibility {
                Observation::Visible
            } else {
                Observation::Unavailable
            },
        }
    }

    /// Gate with both observers unavailable, i.e. always open.
    pub fn always_open() -> Self {
        Self::new(ObserverSupport::none())
    }

    pub fn is_open(&self) -> bool {
        self.viewport.allows() && self.tab.allows()
    }

    pub fn viewport(&self) -> Observation {
        self.viewport
    }

    pub fn tab(&self) -> Observation {
        self.tab
    }

    pub fn set_viewport_visible(&mut self, visible: bool) -> GateTransition {
        self.update(|g| g.viewport = Observation::from_bool(visible))
    }

    pub fn set_tab_visible(&mut self, visible: bool) -> GateTransition {
        self.update(|g| g.tab = Observation::from_bool(visible))
    }

    fn update(&mut self, f: impl FnOnce(&mut Self)) -> GateTransition {
        let was_open = self.is_open();
        f(self);
        match (was_open, self.is_open()) {
            (false, true) => GateTransition::Opened,
            (true, false) => GateTransition::Closed,
            _ => GateTransition::Unchanged,
        }
    }
}

impl Default for VisibilityGate {
    fn default() -> Self {
        Self::new(ObserverSupport::all())
    }
}

/// Geometry half of the viewport observer, for hosts that report rectangles instead of
/// intersection callbacks.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ViewportObserver {
    pub root_margin_px: f64,
}

impl ViewportObserver {
    pub fn new(root_margin_px: f64) -> Self {
        Self {
            root_margin_px: if root_margin_px.is_finite() {
                root_margin_px.max(0.0)
            } else {
                0.0
            },
        }
    }

    /// Whether `element` overlaps `viewport` grown by the root margin on every side.
    pub fn intersects(&self, element: Rect, viewport: Rect) -> bool {
        let v = viewport.inflate(self.root_margin_px, self.root_margin_px);
        element.x0 < v.x1 && element.x1 > v.x0 && element.y0 < v.y1 && element.y1 > v.y0
    }
}

impl Default for ViewportObserver {
    fn default() -> Self {
        Self::new(DEFAULT_ROOT_MARGIN_PX)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/gate/visibility.rs"]
mod tests;
