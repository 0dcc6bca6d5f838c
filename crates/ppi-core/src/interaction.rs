#![forbid(unsafe_code)]

//! Hover/tooltip state machine.
//!
//! Two states: `Idle` (no tooltip) and `Shown` (tooltip bound to one
//! entity plus the pointer's screen position). Pointer-enter moves to
//! `Shown`, pointer-leave back to `Idle`. Clicks are routed to the host's
//! callback and never touch hover state.

/// Hover state over entities of type `T` (usually an index into the
/// widget's backing collection).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverState<T> {
    Idle,
    Shown {
        entity: T,
        /// Pointer column at the time of entry.
        x: u16,
        /// Pointer row at the time of entry.
        y: u16,
    },
}

// Idle regardless of whether `T` itself has a default.
impl<T> Default for HoverState<T> {
    fn default() -> Self {
        Self::Idle
    }
}

impl<T: Copy> HoverState<T> {
    /// Pointer entered an interactive element with backing data.
    pub fn pointer_enter(&mut self, entity: T, x: u16, y: u16) {
        *self = Self::Shown { entity, x, y };
    }

    /// Pointer left the element (or the widget).
    pub fn pointer_leave(&mut self) {
        *self = Self::Idle;
    }

    pub fn is_shown(&self) -> bool {
        matches!(self, Self::Shown { .. })
    }

    /// The hovered entity, if any.
    pub fn entity(&self) -> Option<T> {
        match self {
            Self::Idle => None,
            Self::Shown { entity, .. } => Some(*entity),
        }
    }

    /// The tooltip anchor position, if shown.
    pub fn position(&self) -> Option<(u16, u16)> {
        match self {
            Self::Idle => None,
            Self::Shown { x, y, .. } => Some((*x, *y)),
        }
    }
}
