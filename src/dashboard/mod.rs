// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-VisionNote-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of VisionNote and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Headless view model for the annotation dashboard.
//!
//! [`Dashboard`] owns everything the dashboard page keeps client-side: the image cursor and the
//! image panel's load state, the block editor, crop mode, pan/zoom and the panel layout. The
//! host drives it with user actions and renders from its accessors.

use std::sync::Arc;

use tokio::time::Instant;

use crate::format::{NextImage, SavedContent};
use crate::model::{
    Block, CropSelection, DragGesture, ImageIndex, ImageSourcePolicy, Point, Session, Size,
    ViewTransform,
};
use crate::render::render_markdown;
use crate::workflow::{NextImageRequest, SavePayload, WorkflowError, WorkflowService};

mod crop;
mod editor;
mod save;
mod view;

pub use crop::{crop_to_data_url, CropError, SourceImage, CROP_JPEG_QUALITY, CROP_MIME};
pub use editor::{
    EditorConfig, EditorInstance, ImageEndpoints, ToolConfig, ToolSet, EDITOR_MIN_HEIGHT,
    EDITOR_PLACEHOLDER,
};
pub use save::{
    derive_file_id, MarkdownExport, PublishPayload, SaveError, SaveIndicator, EXPORT_CONTENT_TYPE,
    EXPORT_FILE_NAME, SAVE_CONFIRMATION,
};
pub use view::{CropToggle, ImageSlot, SplitDirection};

use view::CropState;

/// Identifies one image load; responses for superseded loads are discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
    index: ImageIndex,
}

impl LoadTicket {
    pub fn index(&self) -> ImageIndex {
        self.index
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded,
    Failed,
    /// A newer load was started before this one finished; nothing changed.
    Stale,
}

pub struct Dashboard {
    service: Arc<dyn WorkflowService>,
    session: Option<Session>,
    policy: ImageSourcePolicy,
    editor_config: EditorConfig,
    editor: Option<EditorInstance>,
    index: ImageIndex,
    slot: ImageSlot,
    image_url: Option<String>,
    generation: u64,
    saving: bool,
    indicator: SaveIndicator,
    crop: CropState,
    view: ViewTransform,
    drag: DragGesture,
    split: SplitDirection,
}

impl std::fmt::Debug for Dashboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dashboard")
            .field("session", &self.session)
            .field("index", &self.index)
            .field("slot", &self.slot)
            .field("image_url", &self.image_url)
            .field("generation", &self.generation)
            .field("mounted", &self.editor.is_some())
            .field("saving", &self.saving)
            .finish_non_exhaustive()
    }
}

impl Dashboard {
    pub fn new(service: Arc<dyn WorkflowService>, session: Option<Session>) -> Self {
        Self {
            service,
            session,
            policy: ImageSourcePolicy::default(),
            editor_config: EditorConfig::default(),
            editor: None,
            index: ImageIndex::FIRST,
            slot: ImageSlot::Idle,
            image_url: None,
            generation: 0,
            saving: false,
            indicator: SaveIndicator::default(),
            crop: CropState::default(),
            view: ViewTransform::default(),
            drag: DragGesture::default(),
            split: SplitDirection::default(),
        }
    }

    pub fn with_image_policy(mut self, policy: ImageSourcePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_editor_config(mut self, config: EditorConfig) -> Self {
        self.editor_config = config;
        self
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn index(&self) -> ImageIndex {
        self.index
    }

    pub fn slot(&self) -> ImageSlot {
        self.slot
    }

    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.slot == ImageSlot::Loading
    }

    pub fn has_error(&self) -> bool {
        self.slot == ImageSlot::Failed
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    pub fn save_confirmation_visible(&self) -> bool {
        self.indicator.is_visible(Instant::now())
    }

    pub fn editor(&self) -> Option<&EditorInstance> {
        self.editor.as_ref()
    }

    pub fn editor_mut(&mut self) -> Option<&mut EditorInstance> {
        self.editor.as_mut()
    }

    pub fn view(&self) -> &ViewTransform {
        &self.view
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    pub fn split_direction(&self) -> SplitDirection {
        self.split
    }

    pub fn is_cropping(&self) -> bool {
        self.crop.active
    }

    pub fn crop_selection(&self) -> Option<CropSelection> {
        self.crop.selection
    }

    /// Constructs the editor. Returns `false` if it already exists.
    pub fn mount(&mut self) -> bool {
        if self.editor.is_some() {
            return false;
        }
        self.editor = Some(EditorInstance::new(self.editor_config.clone()));
        true
    }

    /// Destroys the editor. Returns `false` if none was mounted.
    pub fn unmount(&mut self) -> bool {
        self.editor.take().is_some()
    }

    /// Mounts the editor and loads the image at the current index.
    pub async fn open(&mut self) -> LoadOutcome {
        self.mount();
        self.load().await
    }

    pub fn next_image_request(&self) -> NextImageRequest {
        let user_id = self.session.as_ref().map(|session| session.user_id().clone());
        NextImageRequest { user_id }
    }

    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation += 1;
        self.slot = ImageSlot::Loading;
        tracing::debug!(index = %self.index, generation = self.generation, "loading image");
        LoadTicket { generation: self.generation, index: self.index }
    }

    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<NextImage, WorkflowError>,
    ) -> LoadOutcome {
        if ticket.generation != self.generation {
            tracing::debug!(
                index = %ticket.index,
                generation = ticket.generation,
                current = self.generation,
                "discarding stale image response"
            );
            return LoadOutcome::Stale;
        }

        let next = match result {
            Ok(next) => next,
            Err(err) => {
                tracing::warn!(index = %ticket.index, error = %err, "image load failed");
                self.slot = ImageSlot::Failed;
                return LoadOutcome::Failed;
            }
        };
        if let Err(err) = self.policy.check(&next.image) {
            tracing::warn!(index = %ticket.index, error = %err, "image source rejected");
            self.slot = ImageSlot::Failed;
            return LoadOutcome::Failed;
        }

        self.image_url = Some(next.image);
        self.slot = ImageSlot::Loaded;
        self.apply_saved_content(next.saved);
        LoadOutcome::Loaded
    }

    fn apply_saved_content(&mut self, saved: SavedContent) {
        let Some(editor) = self.editor.as_mut() else {
            if !matches!(saved, SavedContent::Absent) {
                tracing::debug!("editor not mounted; ignoring saved content");
            }
            return;
        };
        match saved {
            SavedContent::Absent => {}
            SavedContent::Restore(content) => editor.restore(content),
            SavedContent::Malformed(err) => {
                tracing::warn!(error = %err, "failed to parse saved editor data");
            }
            SavedContent::Unusable(err) => {
                editor.clear();
                tracing::warn!(error = %err, "saved editor data is unusable; editor cleared");
            }
        }
    }

    /// Fetches the image at the current index and applies the response.
    pub async fn load(&mut self) -> LoadOutcome {
        let ticket = self.begin_load();
        let request = self.next_image_request();
        let result = self.service.next_image(&request).await;
        self.finish_load(ticket, result)
    }

    pub fn can_go_previous(&self) -> bool {
        !self.index.is_first() && !self.is_loading()
    }

    pub fn can_go_next(&self) -> bool {
        !self.is_loading()
    }

    /// Steps back one image. Does nothing at the first index.
    pub async fn previous(&mut self) -> Option<LoadOutcome> {
        if self.index.is_first() {
            return None;
        }
        self.index = self.index.previous();
        Some(self.load().await)
    }

    pub async fn next(&mut self) -> LoadOutcome {
        self.index = self.index.next();
        self.load().await
    }

    /// Stores the current annotation with the workflow service.
    pub async fn save(&mut self) -> Result<(), SaveError> {
        let session = self.session.as_ref().ok_or(SaveError::SignedOut)?;
        let editor = self.editor.as_ref().ok_or(SaveError::EditorNotReady)?;

        let snapshot = editor.save();
        let payload = SavePayload {
            user_id: session.user_id().clone(),
            context: render_markdown(&snapshot),
            file_id: self.image_url.as_deref().and_then(save::derive_file_id),
            saved_data: snapshot,
            page_index: self.index,
        };

        self.saving = true;
        self.indicator.hide();
        let result = self.service.save(&payload).await;
        self.saving = false;

        match result {
            Ok(()) => {
                tracing::info!(
                    page_index = %payload.page_index,
                    file_id = payload.file_id.as_ref().map(|id| id.as_str()),
                    "annotation saved"
                );
                self.indicator.show(Instant::now());
                Ok(())
            }
            Err(err) => {
                tracing::error!(error = %err, "save failed");
                Err(SaveError::Workflow(err))
            }
        }
    }

    pub fn export_markdown(&self) -> Result<MarkdownExport, SaveError> {
        let editor = self.editor.as_ref().ok_or(SaveError::EditorNotReady)?;
        Ok(MarkdownExport::new(render_markdown(&editor.save())))
    }

    pub fn publish(&self) -> Result<PublishPayload, SaveError> {
        let editor = self.editor.as_ref().ok_or(SaveError::EditorNotReady)?;
        let payload = PublishPayload { content: editor.save(), current_image_index: self.index };
        match serde_json::to_string(&payload) {
            Ok(json) => tracing::info!(payload = %json, "publishing annotation"),
            Err(err) => tracing::warn!(error = %err, "failed to serialize publish payload"),
        }
        Ok(payload)
    }

    /// Updates the selection while crop mode is active. Ignored otherwise.
    pub fn set_crop_selection(&mut self, selection: Option<CropSelection>) -> bool {
        if !self.crop.active {
            return false;
        }
        self.crop.selection = selection;
        true
    }

    /// Enters crop mode, or leaves it and inserts the selected region into the editor.
    ///
    /// Leaving always clears the selection, including when cropping fails.
    pub fn toggle_cropping(
        &mut self,
        source: Option<&SourceImage>,
    ) -> Result<CropToggle, CropError> {
        if !self.crop.active {
            self.crop.active = true;
            return Ok(CropToggle::Started);
        }

        self.crop.active = false;
        let selection = self.crop.selection.take();
        let (Some(selection), Some(source), Some(editor)) =
            (selection, source, self.editor.as_mut())
        else {
            return Ok(CropToggle::Cancelled);
        };
        let url = crop_to_data_url(source, &selection)?;
        editor.insert(Block::image(url));
        Ok(CropToggle::Inserted)
    }

    /// Fetches and decodes the current image for cropping.
    pub async fn load_source_image(&self, displayed: Size) -> Result<SourceImage, CropError> {
        let url = self.image_url.as_deref().ok_or(CropError::NoImage)?;
        let fetched = self.service.fetch_image(url).await.map_err(CropError::Fetch)?;
        SourceImage::decode(&fetched.bytes, displayed)
    }

    pub fn zoom_in(&mut self) {
        self.view.zoom_in();
    }

    pub fn zoom_out(&mut self) {
        self.view.zoom_out();
    }

    pub fn drag_start(&mut self, pointer: Point) {
        self.drag.start(pointer, &self.view);
    }

    pub fn drag_move(&mut self, pointer: Point) -> bool {
        self.drag.update(pointer, &mut self.view)
    }

    pub fn drag_end(&mut self) {
        self.drag.end();
    }

    pub fn toggle_split_direction(&mut self) -> SplitDirection {
        self.split = self.split.toggled();
        self.split
    }
}
