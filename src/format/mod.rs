// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-VisionNote-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of VisionNote and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Wire formats: base64 data URLs and the workflow's "next image" payload.

pub mod data_url;
pub mod next_image;

pub use data_url::{decode_data_url, encode_data_url, DataUrl, DataUrlError};
pub use next_image::{
    decode_next_image, decode_next_image_slice, DecodeError, NextImage, RestoredContent,
    SavedContent, SavedStateError,
};
