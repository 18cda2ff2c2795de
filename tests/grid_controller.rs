
use golden_grid::grid::controller::GridFrame;
use golden_grid::grid::host::CursorShape;
use golden_grid::grid::input::InteractionState;
use golden_grid::grid::messages::{ExitReason, FrameEvent};
use golden_grid::grid::model::{
    Point, Rect, ResizeEdge, Size, MAX_CLIENT_DIM, NEAR_SENTINEL_COLOR, SENTINEL_COLOR,
};
use golden_grid::grid::resources::BuiltinResources;
use golden_grid::grid::settings::{PreferencesDoc, MIN_RATIO};
use golden_grid::grid::toolbar::{ToolEvent, ToolId, TOOLBAR_HEIGHT};
use golden_grid::gui::{DialogOutcome, GridOptionsValues};
use mock_host::{RecordingHost, ScriptedDialogs, SharedPreferences};

fn frame_with(doc: PreferencesDoc, dialogs: ScriptedDialogs) -> (GridFrame, SharedPreferences) {
    let prefs = SharedPreferences::default();
    let frame = GridFrame::new(
        doc,
        Box::new(prefs.clone()),
        Box::new(dialogs),
        &BuiltinResources,
    );
    (frame, prefs)
}

fn started(doc: PreferencesDoc, dialogs: ScriptedDialogs) -> (GridFrame, RecordingHost, SharedPreferences) {
    let (mut frame, prefs) = frame_with(doc, dialogs);
    let size = frame.initial_client_size();
    let mut host = RecordingHost::new(Rect::new(100, 100, size.width, size.height));
    assert!(frame.create_shaped_frame(&mut host));
    (frame, host, prefs)
}

fn click(frame: &mut GridFrame, host: &mut RecordingHost, pos: Point) {
    frame.handle_event(host, FrameEvent::PointerDown { pos });
    frame.handle_event(host, FrameEvent::PointerUp { pos });
}

fn drag(frame: &mut GridFrame, host: &mut RecordingHost, from: Point, to: Point) {
    frame.handle_event(host, FrameEvent::PointerDown { pos: from });
    frame.handle_event(host, FrameEvent::PointerMove { pos: to, left_down: true });
    frame.handle_event(host, FrameEvent::PointerUp { pos: to });
}

fn tool_center(frame: &GridFrame, id: ToolId) -> Point {
    let rect = frame.toolbar().button_rect(id).unwrap();
    Point::new(rect.x + rect.width / 2, rect.y + rect.height / 2)
}

#[test]
fn startup_renders_shapes_and_presents() {
    let (frame, host, _) = started(PreferencesDoc::default(), ScriptedDialogs::default());
    assert_eq!(frame.initial_client_size(), Size::new(400, 400 + TOOLBAR_HEIGHT));
    assert_eq!(host.shape_calls, 1);
    assert_eq!(host.presented, vec![Size::new(400, 452)]);
    assert_eq!(frame.mask().unwrap().size(), Size::new(400, 452));
    assert!(frame.toolbar().is_tool_checked(ToolId::ShowGrid));
    assert!(!frame.toolbar().is_tool_checked(ToolId::LockAspectRatio));
}

#[test]
fn initial_size_follows_stored_ratio() {
    let mut doc = PreferencesDoc::default();
    doc.size.ratio = 2.0;
    let (frame, _) = frame_with(doc, ScriptedDialogs::default());
    assert_eq!(frame.initial_client_size(), Size::new(400, 200 + TOOLBAR_HEIGHT));
}

#[test]
fn failed_shaping_still_presents() {
    let (mut frame, _) = frame_with(PreferencesDoc::default(), ScriptedDialogs::default());
    let mut host = RecordingHost::new(Rect::new(0, 0, 400, 452));
    host.fail_shape = true;
    assert!(!frame.create_shaped_frame(&mut host));
    assert_eq!(host.presented.len(), 1);
}

#[test]
fn black_colors_are_remapped_on_load() {
    let mut doc = PreferencesDoc::default();
    doc.grid.line_color = SENTINEL_COLOR;
    doc.grid.toolbar_color = SENTINEL_COLOR;
    let (frame, _) = frame_with(doc, ScriptedDialogs::default());
    assert_eq!(frame.config().line_color, NEAR_SENTINEL_COLOR);
    assert_eq!(frame.config().toolbar_color, NEAR_SENTINEL_COLOR);
}

#[test]
fn right_handle_drag_resizes_and_recomputes_ratio() {
    let (mut frame, mut host, _) = started(PreferencesDoc::default(), ScriptedDialogs::default());

    frame.handle_event(&mut host, FrameEvent::PointerDown { pos: Point::new(395, 252) });
    assert!(matches!(
        frame.interaction().state(),
        InteractionState::Resizing { edge: ResizeEdge::Right, .. }
    ));
    assert!(host.captured);

    frame.handle_event(
        &mut host,
        FrameEvent::PointerMove { pos: Point::new(445, 252), left_down: true },
    );
    assert_eq!(host.frame, Rect::new(100, 100, 450, 452));
    assert_eq!(frame.mask().unwrap().size(), Size::new(450, 452));

    frame.handle_event(&mut host, FrameEvent::PointerUp { pos: Point::new(445, 252) });
    assert!(frame.interaction().is_idle());
    assert!(!host.captured);
    assert!((frame.aspect().ratio - 450.0 / 400.0).abs() < 1e-9);
}

#[test]
fn unlocked_bottom_drag_recomputes_ratio() {
    let (mut frame, mut host, _) = started(PreferencesDoc::default(), ScriptedDialogs::default());
    drag(&mut frame, &mut host, Point::new(200, 448), Point::new(200, 498));
    assert_eq!(host.frame, Rect::new(100, 100, 400, 502));
    assert!((frame.aspect().ratio - 400.0 / 450.0).abs() < 1e-9);
}

#[test]
fn locked_resize_keeps_ratio() {
    let (mut frame, mut host, _) = started(PreferencesDoc::default(), ScriptedDialogs::default());
    frame.on_tool(&mut host, ToolEvent { id: ToolId::LockAspectRatio, checked: true });
    assert!(frame.aspect().locked);
    assert!((frame.aspect().ratio - 1.0).abs() < 1e-9);

    drag(&mut frame, &mut host, Point::new(395, 252), Point::new(495, 252));
    let area_w = host.frame.width as f64;
    let area_h = (host.frame.height - TOOLBAR_HEIGHT) as f64;
    assert_eq!(host.frame.width, 500);
    assert!((area_w / area_h - 1.0).abs() < 1e-2);
    assert!((frame.aspect().ratio - 1.0).abs() < 1e-9);
}

#[test]
fn left_drag_keeps_right_edge() {
    let (mut frame, mut host, _) = started(PreferencesDoc::default(), ScriptedDialogs::default());
    drag(&mut frame, &mut host, Point::new(3, 252), Point::new(-47, 252));
    assert_eq!(host.frame, Rect::new(50, 100, 450, 452));
}

#[test]
fn resize_never_goes_below_minimum() {
    let (mut frame, mut host, _) = started(PreferencesDoc::default(), ScriptedDialogs::default());
    drag(&mut frame, &mut host, Point::new(395, 252), Point::new(-1000, 252));
    assert_eq!(host.frame.width, 20);
    drag(&mut frame, &mut host, Point::new(10, 448), Point::new(10, -1000));
    assert_eq!(host.frame.height, TOOLBAR_HEIGHT + 20);
}

#[test]
fn move_handle_drag_moves_window() {
    let (mut frame, mut host, _) = started(PreferencesDoc::default(), ScriptedDialogs::default());
    frame.handle_event(&mut host, FrameEvent::PointerDown { pos: Point::new(360, 20) });
    assert!(matches!(frame.interaction().state(), InteractionState::Moving { .. }));
    assert_eq!(host.last_cursor(), Some(CursorShape::Move));

    frame.handle_event(
        &mut host,
        FrameEvent::PointerMove { pos: Point::new(380, 30), left_down: true },
    );
    assert_eq!(host.frame, Rect::new(120, 110, 400, 452));

    frame.handle_event(&mut host, FrameEvent::PointerUp { pos: Point::new(360, 20) });
    assert!(frame.interaction().is_idle());
    assert!(!host.captured);
    assert!((frame.aspect().ratio - 1.0).abs() < 1e-9);
}

#[test]
fn press_elsewhere_starts_hover_tracking() {
    let (mut frame, mut host, _) = started(PreferencesDoc::default(), ScriptedDialogs::default());
    frame.handle_event(&mut host, FrameEvent::PointerDown { pos: Point::new(200, 200) });
    assert!(frame.interaction().is_idle());
    assert!(frame.interaction().hover_captured());
    assert!(host.captured);
    assert_eq!(host.last_cursor(), Some(CursorShape::Arrow));
}

#[test]
fn hover_over_handles_sets_resize_cursors() {
    let (mut frame, mut host, _) = started(PreferencesDoc::default(), ScriptedDialogs::default());
    frame.handle_event(
        &mut host,
        FrameEvent::PointerMove { pos: Point::new(395, 252), left_down: false },
    );
    assert_eq!(host.last_cursor(), Some(CursorShape::SizeWestEast));
    frame.handle_event(
        &mut host,
        FrameEvent::PointerMove { pos: Point::new(200, 448), left_down: false },
    );
    assert_eq!(host.last_cursor(), Some(CursorShape::SizeNorthSouth));

    // Leaving the area releases the hover capture.
    frame.handle_event(
        &mut host,
        FrameEvent::PointerMove { pos: Point::new(200, 10), left_down: false },
    );
    assert!(!host.captured);
    assert!(!frame.interaction().hover_captured());
}

#[test]
fn capture_loss_ends_resize() {
    let (mut frame, mut host, _) = started(PreferencesDoc::default(), ScriptedDialogs::default());
    frame.handle_event(&mut host, FrameEvent::PointerDown { pos: Point::new(395, 252) });
    frame.handle_event(
        &mut host,
        FrameEvent::PointerMove { pos: Point::new(495, 252), left_down: true },
    );
    frame.handle_event(&mut host, FrameEvent::CaptureLost);
    assert!(frame.interaction().is_idle());
    assert!(!host.captured);
    assert!((frame.aspect().ratio - 500.0 / 400.0).abs() < 1e-9);
}

#[test]
fn show_toggles_rerender() {
    let (mut frame, mut host, _) = started(PreferencesDoc::default(), ScriptedDialogs::default());
    let before = frame.mask().unwrap().clone();
    let pos = tool_center(&frame, ToolId::ShowGrid);
    click(&mut frame, &mut host, pos);
    assert!(!frame.config().show_grid);
    assert!(!frame.toolbar().is_tool_checked(ToolId::ShowGrid));
    assert_ne!(frame.mask().unwrap(), &before);

    let pos = tool_center(&frame, ToolId::ShowFrame);
    click(&mut frame, &mut host, pos);
    assert!(frame.config().show_frame);
}

#[test]
fn toolbar_release_outside_button_does_nothing() {
    let (mut frame, mut host, prefs) =
        started(PreferencesDoc::default(), ScriptedDialogs::default());
    frame.handle_event(
        &mut host,
        FrameEvent::PointerDown { pos: tool_center(&frame, ToolId::Quit) },
    );
    frame.handle_event(&mut host, FrameEvent::PointerUp { pos: Point::new(200, 200) });
    assert!(frame.is_running());
    assert!(prefs.saves.lock().unwrap().is_empty());
}

#[test]
fn grid_options_accept_applies_and_persists() {
    let mut dialogs = ScriptedDialogs::default();
    let values = GridOptionsValues {
        segments: 3,
        ..GridOptionsValues::from_config(&Default::default())
    };
    dialogs.grid_answers.push_back(DialogOutcome::Accepted(values));
    let (mut frame, mut host, prefs) = started(PreferencesDoc::default(), dialogs);

    let pos = tool_center(&frame, ToolId::GridOptions);
    click(&mut frame, &mut host, pos);
    assert_eq!(frame.config().segments, 3);
    let saves = prefs.saves.lock().unwrap();
    assert_eq!(saves.len(), 1);
    assert_eq!(saves[0].grid.segments, 3);
}

#[test]
fn grid_options_cancel_changes_nothing() {
    let (mut frame, mut host, prefs) =
        started(PreferencesDoc::default(), ScriptedDialogs::default());
    let before = frame.config().clone();
    let pos = tool_center(&frame, ToolId::GridOptions);
    click(&mut frame, &mut host, pos);
    assert_eq!(frame.config(), &before);
    assert!(prefs.saves.lock().unwrap().is_empty());
}

#[test]
fn aspect_ratio_accept_shrinks_and_locks() {
    let mut dialogs = ScriptedDialogs::default();
    dialogs.ratio_answers.push_back(DialogOutcome::Accepted(2.0));
    let prompts = dialogs.ratio_prompts.clone();
    let (mut frame, mut host, prefs) = started(PreferencesDoc::default(), dialogs);

    let pos = tool_center(&frame, ToolId::SetAspectRatio);
    click(&mut frame, &mut host, pos);
    assert_eq!(prompts.lock().unwrap().as_slice(), &[1.0]);
    assert_eq!(host.frame, Rect::new(100, 100, 400, 200 + TOOLBAR_HEIGHT));
    assert!(frame.aspect().locked);
    assert!(frame.toolbar().is_tool_checked(ToolId::LockAspectRatio));
    let saves = prefs.saves.lock().unwrap();
    assert_eq!(saves.len(), 1);
    assert_eq!(saves[0].size.ratio, 2.0);
    assert!(saves[0].size.locked);
}

#[test]
fn narrower_ratio_shrinks_width() {
    let (mut frame, mut host, _) = started(PreferencesDoc::default(), ScriptedDialogs::default());
    frame.change_and_lock_aspect_ratio(&mut host, 0.5);
    assert_eq!(host.frame, Rect::new(100, 100, 200, 452));
}

#[test]
fn invalid_ratio_is_ignored() {
    let (mut frame, mut host, _) = started(PreferencesDoc::default(), ScriptedDialogs::default());
    frame.change_and_lock_aspect_ratio(&mut host, 0.0);
    assert!(!frame.aspect().locked);
    assert_eq!(host.frame, Rect::new(100, 100, 400, 452));
}

#[test]
fn unlocking_keeps_ratio() {
    let (mut frame, mut host, _) = started(PreferencesDoc::default(), ScriptedDialogs::default());
    frame.change_and_lock_aspect_ratio(&mut host, 2.0);
    frame.lock_aspect_ratio(&mut host, false);
    assert!(!frame.aspect().locked);
    assert_eq!(frame.aspect().ratio, 2.0);
}

#[test]
fn quit_button_persists_and_closes() {
    let (mut frame, mut host, prefs) =
        started(PreferencesDoc::default(), ScriptedDialogs::default());
    let pos = tool_center(&frame, ToolId::Quit);
    click(&mut frame, &mut host, pos);
    assert!(!frame.is_running());
    assert!(host.closed);
    assert_eq!(frame.exit_reason(), Some(ExitReason::UserRequest));
    assert_eq!(prefs.saves.lock().unwrap().len(), 1);

    // Nothing is handled once the frame has quit.
    frame.handle_event(&mut host, FrameEvent::PointerDown { pos: Point::new(395, 252) });
    assert!(frame.interaction().is_idle());
}

#[test]
fn close_request_quits() {
    let (mut frame, mut host, prefs) =
        started(PreferencesDoc::default(), ScriptedDialogs::default());
    frame.handle_event(&mut host, FrameEvent::CloseRequested);
    assert_eq!(frame.exit_reason(), Some(ExitReason::CloseRequested));
    assert_eq!(prefs.saves.lock().unwrap().len(), 1);
}

#[test]
fn tiny_stored_ratio_keeps_window_bounded() {
    let mut doc = PreferencesDoc::default();
    doc.size.ratio = 1e-12;
    doc.size.locked = true;
    let (mut frame, _) = frame_with(doc, ScriptedDialogs::default());
    assert_eq!(frame.aspect().ratio, MIN_RATIO);
    let initial = frame.initial_client_size();
    assert_eq!(initial.width, 400);
    assert!(initial.height <= MAX_CLIENT_DIM);

    let mut host = RecordingHost::new(Rect::new(100, 100, 400, 452));
    frame.create_shaped_frame(&mut host);
    drag(&mut frame, &mut host, Point::new(395, 252), Point::new(405, 252));
    assert_eq!(host.frame.width, 410);
    assert!(host.frame.height <= MAX_CLIENT_DIM);
}

#[test]
fn tiny_accepted_ratio_is_clamped() {
    let (mut frame, mut host, _) = started(PreferencesDoc::default(), ScriptedDialogs::default());
    frame.change_and_lock_aspect_ratio(&mut host, 1e-12);
    assert_eq!(frame.aspect().ratio, MIN_RATIO);
    assert!(frame.aspect().locked);
    assert_eq!(host.frame, Rect::new(100, 100, 20, 452));
}

#[test]
fn top_handle_wins_over_toolbar_button() {
    let (mut frame, mut host, _) = started(PreferencesDoc::default(), ScriptedDialogs::default());
    let top = frame.layout().unwrap().top_handle;
    let button = frame.toolbar().button_rect(ToolId::ShowGoldenLines).unwrap();
    let pos = Point::new(top.x + top.width / 2, top.y + 1);
    assert!(button.contains(pos));

    // Handle outline is painted over the button.
    assert_eq!(frame.mask().unwrap().pixel(pos.x, pos.y), Some(NEAR_SENTINEL_COLOR));

    frame.handle_event(&mut host, FrameEvent::PointerDown { pos });
    assert!(matches!(
        frame.interaction().state(),
        InteractionState::Resizing { edge: ResizeEdge::Top, .. }
    ));
    frame.handle_event(&mut host, FrameEvent::PointerUp { pos });
    assert!(frame.config().show_golden_lines);
    assert!(frame.toolbar().is_tool_checked(ToolId::ShowGoldenLines));
}
