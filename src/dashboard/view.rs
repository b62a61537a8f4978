// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-VisionNote-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of VisionNote and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde::{Deserialize, Serialize};

use crate::model::CropSelection;

/// Load state of the image panel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageSlot {
    #[default]
    Idle,
    Loading,
    Loaded,
    /// The panel shows a placeholder instead of the image.
    Failed,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitDirection {
    #[default]
    Horizontal,
    Vertical,
}

impl SplitDirection {
    pub fn toggled(self) -> Self {
        match self {
            Self::Horizontal => Self::Vertical,
            Self::Vertical => Self::Horizontal,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Horizontal => "horizontal",
            Self::Vertical => "vertical",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(crate) struct CropState {
    pub(crate) active: bool,
    pub(crate) selection: Option<CropSelection>,
}

/// Outcome of toggling crop mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CropToggle {
    Started,
    /// Left crop mode without inserting anything.
    Cancelled,
    /// Left crop mode and inserted the cropped region as an image block.
    Inserted,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_direction_flips() {
        let direction = SplitDirection::default();
        assert_eq!(direction.as_str(), "horizontal");
        assert_eq!(direction.toggled(), SplitDirection::Vertical);
        assert_eq!(direction.toggled().toggled(), direction);
    }
}
