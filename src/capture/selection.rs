//! Selection geometry and the drag gesture state machine
//!
//! This module is free of any toolkit types so the overlay logic can be
//! exercised without a display.

use log::debug;
use thiserror::Error;

/// A rectangle spanned by a drag, in absolute screen coordinates
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rectangle {
    pub start_x: i32,
    pub start_y: i32,
    pub end_x: i32,
    pub end_y: i32,
}

impl Rectangle {
    pub fn new(start_x: i32, start_y: i32, end_x: i32, end_y: i32) -> Self {
        Self {
            start_x,
            start_y,
            end_x,
            end_y,
        }
    }

    /// Create a zero-area rectangle anchored at the given point
    pub fn at(x: i32, y: i32) -> Self {
        Self::new(x, y, x, y)
    }

    /// Move the end corner of the rectangle
    pub fn update_end(&mut self, end_x: i32, end_y: i32) {
        self.end_x = end_x;
        self.end_y = end_y;
    }

    /// Minimum corner first, regardless of drag direction
    pub fn normalized(&self) -> Self {
        Self {
            start_x: self.start_x.min(self.end_x),
            start_y: self.start_y.min(self.end_y),
            end_x: self.start_x.max(self.end_x),
            end_y: self.start_y.max(self.end_y),
        }
    }

    pub fn origin(&self) -> (i32, i32) {
        (self.start_x.min(self.end_x), self.start_y.min(self.end_y))
    }

    pub fn width(&self) -> u32 {
        self.start_x.abs_diff(self.end_x)
    }

    pub fn height(&self) -> u32 {
        self.start_y.abs_diff(self.end_y)
    }

    /// Degenerate rectangles are valid captures, they just hold no pixels
    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GestureError {
    #[error("A capture overlay is already active")]
    AlreadyActive,
}

#[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
enum GestureState {
    #[default]
    Idle,
    Armed,
    Dragging(Rectangle),
    /// Released; the overlay is tearing down and the region is being grabbed
    Settling,
}

/// Tracks the single press/drag/release gesture of one capture overlay.
///
/// `Idle -> Armed -> Dragging -> Settling -> Idle`. Only one gesture can be
/// active at a time, which keeps a second overlay from opening over the first
/// or landing in the snapshot of the first. The overlay calls
/// [`abandon`](Self::abandon) once the selection has been delivered.
#[derive(Default, Debug)]
pub struct SelectionGesture {
    state: GestureState,
}

impl SelectionGesture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the gesture for a freshly opened overlay
    pub fn arm(&mut self) -> Result<(), GestureError> {
        if self.state != GestureState::Idle {
            return Err(GestureError::AlreadyActive);
        }
        self.state = GestureState::Armed;
        Ok(())
    }

    #[cfg(test)]
    pub fn is_active(&self) -> bool {
        self.state != GestureState::Idle
    }

    /// Primary button pressed: anchor a new selection, dropping any previous outline
    pub fn press(&mut self, x: i32, y: i32) -> bool {
        match self.state {
            GestureState::Idle | GestureState::Settling => false,
            GestureState::Armed | GestureState::Dragging(_) => {
                debug!("Selection anchored at ({}, {})", x, y);
                self.state = GestureState::Dragging(Rectangle::at(x, y));
                true
            }
        }
    }

    /// Pointer moved with the button held; returns the outline to draw
    pub fn motion(&mut self, x: i32, y: i32) -> Option<Rectangle> {
        if let GestureState::Dragging(ref mut rect) = self.state {
            rect.update_end(x, y);
            return Some(rect.normalized());
        }
        None
    }

    /// Primary button released; returns the finalized, normalized rectangle
    pub fn release(&mut self, x: i32, y: i32) -> Option<Rectangle> {
        if let GestureState::Dragging(mut rect) = self.state {
            rect.update_end(x, y);
            self.state = GestureState::Settling;
            let rect = rect.normalized();
            debug!("Selection finalized: {:?}", rect);
            return Some(rect);
        }
        None
    }

    /// The outline currently on screen, if a drag is in progress
    pub fn outline(&self) -> Option<Rectangle> {
        match self.state {
            GestureState::Dragging(rect) => Some(rect.normalized()),
            _ => None,
        }
    }

    /// Drop back to idle, after delivery or when the overlay goes away without a release
    pub fn abandon(&mut self) {
        if self.state != GestureState::Idle {
            debug!("Selection gesture abandoned");
        }
        self.state = GestureState::Idle;
    }
}
