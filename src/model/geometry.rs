// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-VisionNote-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of VisionNote and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Screen-space geometry for the image panel: crop rectangles and the pan/zoom transform.

use serde::{Deserialize, Serialize};

pub const DEFAULT_ZOOM: f64 = 1.0;
pub const ZOOM_STEP: f64 = 0.1;
pub const MIN_ZOOM: f64 = 0.1;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl std::ops::Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Size of an image as laid out on screen, or as stored in its file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn is_empty(self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

/// A crop rectangle in displayed-image coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CropSelection {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl CropSelection {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Maps the selection into the pixel space of the source image.
    ///
    /// `natural` is the stored image size and `displayed` the on-screen size; each axis is scaled
    /// by their ratio. The result is truncated to whole pixels and clipped to the source bounds,
    /// so it may come back empty.
    pub fn to_source_pixels(&self, natural: Size, displayed: Size) -> PixelRect {
        if displayed.is_empty() || natural.is_empty() {
            return PixelRect::default();
        }
        let scale_x = natural.width / displayed.width;
        let scale_y = natural.height / displayed.height;

        let x0 = (self.x * scale_x).clamp(0.0, natural.width);
        let y0 = (self.y * scale_y).clamp(0.0, natural.height);
        let x1 = ((self.x + self.width) * scale_x).clamp(0.0, natural.width);
        let y1 = ((self.y + self.height) * scale_y).clamp(0.0, natural.height);

        let x = x0 as u32;
        let y = y0 as u32;
        PixelRect {
            x,
            y,
            width: (x1 - x0).max(0.0) as u32,
            height: (y1 - y0).max(0.0) as u32,
        }
    }
}

/// An integer rectangle in source-image pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Zoom and pan applied to the image on screen. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewTransform {
    zoom: f64,
    offset: Point,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self { zoom: DEFAULT_ZOOM, offset: Point::default() }
    }
}

impl ViewTransform {
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn offset(&self) -> Point {
        self.offset
    }

    pub fn zoom_in(&mut self) {
        self.zoom += ZOOM_STEP;
    }

    pub fn zoom_out(&mut self) {
        self.zoom = (self.zoom - ZOOM_STEP).max(MIN_ZOOM);
    }

    pub fn set_offset(&mut self, offset: Point) {
        self.offset = offset;
    }

    /// CSS `transform` value the image element is drawn with.
    pub fn css_transform(&self) -> String {
        format!("translate({}px, {}px) scale({})", self.offset.x, self.offset.y, self.zoom)
    }
}

/// Tracks a pointer/touch drag so the image follows the pointer without jumping.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DragGesture {
    anchor: Option<Point>,
}

impl DragGesture {
    pub fn is_dragging(&self) -> bool {
        self.anchor.is_some()
    }

    pub fn start(&mut self, pointer: Point, transform: &ViewTransform) {
        self.anchor = Some(pointer - transform.offset());
    }

    /// Moves the pan offset with the pointer. Returns `false` when no drag is active.
    pub fn update(&self, pointer: Point, transform: &mut ViewTransform) -> bool {
        let Some(anchor) = self.anchor else {
            return false;
        };
        transform.set_offset(pointer - anchor);
        true
    }

    pub fn end(&mut self) {
        self.anchor = None;
    }
}
