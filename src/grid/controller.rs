use crate::grid::host::FrameHost;
use crate::grid::input::{DragEnd, DragUpdate, Interaction};
use crate::grid::layout::LayoutRects;
use crate::grid::messages::{ExitReason, FrameEvent};
use crate::grid::model::{Point, Rect, Size, MAX_CLIENT_DIM, MIN_CLIENT_DIM, SENTINEL_COLOR};
use crate::grid::render::{paint_handles, render_mask, MaskBitmap};
use crate::grid::resources::ResourceLocator;
use crate::grid::settings::{AspectRatioState, GridConfig, LogPrefs, PreferencesDoc};
use crate::grid::settings_store::Preferences;
use crate::grid::shape::apply_shape;
use crate::grid::toolbar::{ToolEvent, ToolId, Toolbar};
use crate::gui::{DialogOutcome, GridOptionsValues, OptionsDialogs};

pub const INITIAL_CLIENT_WIDTH: i32 = 400;

/// The overlay window's brain: owns configuration, the cached mask and the
/// interaction state, and reacts to [`FrameEvent`]s from the host.
pub struct GridFrame {
    preferences: Box<dyn Preferences>,
    dialogs: Box<dyn OptionsDialogs>,
    config: GridConfig,
    aspect: AspectRatioState,
    log: LogPrefs,
    toolbar: Toolbar,
    layout: Option<LayoutRects>,
    mask: Option<MaskBitmap>,
    mask_invalid: bool,
    interaction: Interaction,
    running: bool,
    exit_reason: Option<ExitReason>,
}

impl GridFrame {
    pub fn new(
        mut doc: PreferencesDoc,
        preferences: Box<dyn Preferences>,
        dialogs: Box<dyn OptionsDialogs>,
        resources: &dyn ResourceLocator,
    ) -> Self {
        doc.sanitize();
        let mut toolbar = Toolbar::new(resources);
        toolbar.set_tool_checked(ToolId::LockAspectRatio, doc.size.locked);
        toolbar.set_tool_checked(ToolId::ShowGrid, doc.grid.show_grid);
        toolbar.set_tool_checked(ToolId::ShowGoldenLines, doc.grid.show_golden_lines);
        toolbar.set_tool_checked(ToolId::ShowFrame, doc.grid.show_frame);

        Self {
            preferences,
            dialogs,
            config: doc.grid,
            aspect: doc.size,
            log: doc.log,
            toolbar,
            layout: None,
            mask: None,
            mask_invalid: true,
            interaction: Interaction::new(),
            running: true,
            exit_reason: None,
        }
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn aspect(&self) -> AspectRatioState {
        self.aspect
    }

    pub fn toolbar(&self) -> &Toolbar {
        &self.toolbar
    }

    pub fn layout(&self) -> Option<&LayoutRects> {
        self.layout.as_ref()
    }

    pub fn mask(&self) -> Option<&MaskBitmap> {
        self.mask.as_ref()
    }

    pub fn interaction(&self) -> &Interaction {
        &self.interaction
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn exit_reason(&self) -> Option<ExitReason> {
        self.exit_reason
    }

    pub fn document(&self) -> PreferencesDoc {
        PreferencesDoc {
            size: self.aspect,
            grid: self.config.clone(),
            log: self.log,
        }
    }

    /// Client size the window should open with: the area below the toolbar follows the
    /// stored ratio at the default width.
    pub fn initial_client_size(&self) -> Size {
        let ratio = AspectRatioState::clamp_ratio(self.aspect.ratio).unwrap_or(1.0);
        let toolbar_height = self.toolbar.height();
        let max_area_height = (MAX_CLIENT_DIM - toolbar_height).max(MIN_CLIENT_DIM);
        let area_height = (INITIAL_CLIENT_WIDTH as f64 / ratio)
            .round()
            .min(max_area_height as f64) as i32;
        Size::new(
            INITIAL_CLIENT_WIDTH,
            area_height.clamp(MIN_CLIENT_DIM, max_area_height) + toolbar_height,
        )
    }

    /// First render: paints the mask, shapes and shows the window.
    pub fn create_shaped_frame(&mut self, host: &mut dyn FrameHost) -> bool {
        self.mask_invalid = true;
        self.on_paint(host)
    }

    pub fn handle_event(&mut self, host: &mut dyn FrameHost, event: FrameEvent) {
        if !self.running {
            return;
        }
        match event {
            FrameEvent::PointerDown { pos } => self.on_pointer_down(host, pos),
            FrameEvent::PointerMove { pos, left_down } => {
                self.on_pointer_move(host, pos, left_down)
            }
            FrameEvent::PointerUp { pos } => self.on_pointer_up(host, pos),
            FrameEvent::CaptureLost | FrameEvent::FocusLost => self.on_capture_lost(host),
            // A size change makes the cached mask stale on its own.
            FrameEvent::Paint | FrameEvent::Resized => {
                self.on_paint(host);
            }
            FrameEvent::CloseRequested => self.on_quit(host, ExitReason::CloseRequested),
        }
    }

    pub fn invalidate(&mut self) {
        self.mask_invalid = true;
    }

    /// Re-renders and re-shapes when the mask is stale, then presents it.
    /// Returns `false` only when shaping was attempted and failed.
    pub fn on_paint(&mut self, host: &mut dyn FrameHost) -> bool {
        let client = host.client_size();
        let stale = self.mask_invalid || self.mask.as_ref().map(MaskBitmap::size) != Some(client);
        let mut shaped = true;
        if stale {
            match self.render(client) {
                Some((mask, layout)) => {
                    shaped = apply_shape(host, &mask, SENTINEL_COLOR);
                    self.mask = Some(mask);
                    self.layout = Some(layout);
                    self.mask_invalid = false;
                }
                None => {
                    tracing::debug!(?client, "skipping render for degenerate client size");
                }
            }
        }
        if let Some(mask) = self.mask.as_ref() {
            host.present(mask);
        }
        shaped
    }

    fn render(&self, client: Size) -> Option<(MaskBitmap, LayoutRects)> {
        let rendered = render_mask(
            client,
            &self.config,
            self.toolbar.height(),
            self.toolbar.buttons_extent(),
        )?;
        let mut bitmap = rendered.bitmap;
        self.toolbar.paint(&mut bitmap, self.config.toolbar_color);
        // The top handle reaches into the toolbar band and stays on top of the buttons.
        paint_handles(&mut bitmap, &rendered.layout);
        Some((bitmap, rendered.layout))
    }

    fn current_layout(&mut self, host: &mut dyn FrameHost) -> Option<LayoutRects> {
        if self.layout.is_none() || self.mask_invalid {
            self.on_paint(host);
        }
        self.layout
    }

    fn on_pointer_down(&mut self, host: &mut dyn FrameHost, pos: Point) {
        let layout = self.current_layout(host);
        let on_handle = layout.is_some_and(|layout| layout.handle_at(pos).is_some());
        if self.interaction.is_idle() && !on_handle && self.toolbar.press(pos) {
            self.invalidate();
            self.on_paint(host);
            return;
        }
        if let Some(layout) = layout {
            self.interaction.pointer_down(host, &layout, pos);
        }
    }

    fn on_pointer_move(&mut self, host: &mut dyn FrameHost, pos: Point, left_down: bool) {
        if self.toolbar.pressed().is_some() {
            return;
        }
        let Some(layout) = self.current_layout(host) else {
            return;
        };
        let update = self.interaction.pointer_move(
            host,
            &layout,
            pos,
            left_down,
            &self.aspect,
            self.toolbar.height(),
        );
        if let DragUpdate::Resized(_) = update {
            self.invalidate();
            self.on_paint(host);
        }
    }

    fn on_pointer_up(&mut self, host: &mut dyn FrameHost, pos: Point) {
        if self.toolbar.pressed().is_some() {
            let fired = self.toolbar.release(pos);
            self.invalidate();
            self.on_paint(host);
            if let Some(event) = fired {
                self.on_tool(host, event);
            }
            return;
        }
        let ended = self.interaction.pointer_up(host);
        self.finish_drag(host, ended);
    }

    fn on_capture_lost(&mut self, host: &mut dyn FrameHost) {
        if self.toolbar.pressed().is_some() {
            self.toolbar.cancel_press();
            self.invalidate();
            self.on_paint(host);
        }
        let ended = self.interaction.cancel(host);
        self.finish_drag(host, ended);
    }

    fn finish_drag(&mut self, host: &mut dyn FrameHost, ended: DragEnd) {
        if let DragEnd::Resized(edge) = ended {
            if !self.aspect.locked {
                self.aspect.ratio = self.compute_aspect_ratio(host);
                tracing::debug!(?edge, ratio = self.aspect.ratio, "aspect ratio recomputed");
            }
            self.invalidate();
            self.on_paint(host);
        }
    }

    pub fn on_tool(&mut self, host: &mut dyn FrameHost, event: ToolEvent) {
        tracing::debug!(tool = ?event.id, checked = event.checked, "tool clicked");
        match event.id {
            ToolId::GridOptions => self.on_tool_grid_options(host),
            ToolId::SetAspectRatio => self.on_tool_set_aspect_ratio(host),
            ToolId::LockAspectRatio => self.lock_aspect_ratio(host, event.checked),
            ToolId::ShowGrid => {
                self.config.show_grid = event.checked;
                self.refresh(host);
            }
            ToolId::ShowGoldenLines => {
                self.config.show_golden_lines = event.checked;
                self.refresh(host);
            }
            ToolId::ShowFrame => {
                self.config.show_frame = event.checked;
                self.refresh(host);
            }
            ToolId::Quit => self.on_quit(host, ExitReason::UserRequest),
        }
    }

    fn refresh(&mut self, host: &mut dyn FrameHost) {
        self.invalidate();
        self.on_paint(host);
    }

    fn on_tool_grid_options(&mut self, host: &mut dyn FrameHost) {
        let current = GridOptionsValues::from_config(&self.config);
        match self.dialogs.grid_options(&current) {
            DialogOutcome::Accepted(values) => {
                values.apply_to(&mut self.config);
                tracing::info!(segments = self.config.segments, "grid options updated");
                self.refresh(host);
                self.persist();
            }
            DialogOutcome::Cancelled => {}
        }
    }

    fn on_tool_set_aspect_ratio(&mut self, host: &mut dyn FrameHost) {
        let current = self.compute_aspect_ratio(host);
        match self.dialogs.aspect_ratio(current) {
            DialogOutcome::Accepted(ratio) => {
                tracing::info!(ratio, "new aspect ratio");
                self.change_and_lock_aspect_ratio(host, ratio);
                self.persist();
            }
            DialogOutcome::Cancelled => {}
        }
    }

    /// Stores and locks `ratio`, then shrinks (never enlarges) the window so the area
    /// below the toolbar has that ratio.
    pub fn change_and_lock_aspect_ratio(&mut self, host: &mut dyn FrameHost, ratio: f64) {
        let Some(ratio) = AspectRatioState::clamp_ratio(ratio) else {
            tracing::warn!(ratio, "ignoring invalid aspect ratio");
            return;
        };
        self.aspect.ratio = ratio;
        self.aspect.locked = true;
        self.toolbar.set_tool_checked(ToolId::LockAspectRatio, true);

        let frame = host.frame_rect();
        let toolbar_height = self.toolbar.height();
        let area = Size::new(frame.width, frame.height - toolbar_height);
        let width_from_height = (area.height as f64 * ratio).min(MAX_CLIENT_DIM as f64) as i32;
        let height_from_width = (area.width as f64 / ratio).min(MAX_CLIENT_DIM as f64) as i32;
        let (width, area_height) = if width_from_height <= area.width {
            (width_from_height, area.height)
        } else {
            (area.width, height_from_width)
        };
        let next = Rect::new(
            frame.x,
            frame.y,
            width.max(MIN_CLIENT_DIM),
            area_height.max(MIN_CLIENT_DIM) + toolbar_height,
        );
        if next != frame {
            host.set_frame_rect(next);
        }
        self.refresh(host);
    }

    /// Locking snapshots the current ratio; unlocking keeps it.
    pub fn lock_aspect_ratio(&mut self, host: &mut dyn FrameHost, locked: bool) {
        if !self.aspect.locked && locked {
            self.aspect.ratio = self.compute_aspect_ratio(host);
        }
        self.aspect.locked = locked;
        self.toolbar.set_tool_checked(ToolId::LockAspectRatio, locked);
        self.refresh(host);
    }

    /// Width / height of the area below the toolbar.
    pub fn compute_aspect_ratio(&self, host: &dyn FrameHost) -> f64 {
        let client = host.client_size();
        AspectRatioState::ratio_from_area(Size::new(
            client.width,
            client.height - self.toolbar.height(),
        ))
    }

    pub fn persist(&mut self) {
        let doc = self.document();
        if let Err(err) = self.preferences.save(&doc) {
            tracing::warn!(error = ?err, "failed to save preferences");
        }
    }

    pub fn on_quit(&mut self, host: &mut dyn FrameHost, reason: ExitReason) {
        tracing::info!(?reason, "quitting");
        self.interaction.cancel(host);
        self.persist();
        host.close();
        self.running = false;
        self.exit_reason = Some(reason);
    }
}
