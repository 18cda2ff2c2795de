use crate::grid::controller::GridFrame;
#[cfg(not(windows))]
use crate::grid::model::Size;
use anyhow::Result;

pub const WINDOW_TITLE: &str = "Golden Grid";

#[cfg(windows)]
mod platform {
    use super::WINDOW_TITLE;
    use crate::grid::host::{CursorShape, FrameHost};
    use crate::grid::messages::FrameEvent;
    use crate::grid::model::{GridColor, Point, Rect, Size};
    use crate::grid::render::MaskBitmap;
    use crate::grid::shape::ShapeRegion;
    use anyhow::{anyhow, Context, Result};
    use once_cell::sync::Lazy;
    use std::collections::HashMap;
    use std::mem;
    use std::ptr;
    use std::sync::mpsc::{channel, Receiver, Sender, TryRecvError};
    use std::sync::Mutex;
    use std::sync::Once;
    use windows::core::PCWSTR;
    use windows::Win32::Foundation::{HWND, LPARAM, LRESULT, RECT, WPARAM};
    use windows::Win32::Graphics::Gdi::{
        BeginPaint, BitBlt, CombineRgn, CreateCompatibleDC, CreateDIBSection, CreateRectRgn,
        DeleteDC, DeleteObject, EndPaint, InvalidateRect, SelectObject, SetWindowRgn, BITMAPINFO,
        BITMAPINFOHEADER, BI_RGB, DIB_RGB_COLORS, HBITMAP, HDC, HGDIOBJ, PAINTSTRUCT, RGN_ERROR,
        RGN_OR, SRCCOPY,
    };
    use windows::Win32::System::LibraryLoader::GetModuleHandleW;
    use windows::Win32::UI::Input::KeyboardAndMouse::{GetCapture, ReleaseCapture, SetCapture};
    use windows::Win32::UI::WindowsAndMessaging::{
        CreateWindowExW, DefWindowProcW, DestroyWindow, DispatchMessageW, GetMessageW,
        GetSystemMetrics, GetWindowLongPtrW, GetWindowRect, LoadCursorW, PostQuitMessage,
        RegisterClassW, SetCursor, SetWindowLongPtrW, SetWindowPos, ShowWindow, TranslateMessage,
        GWLP_USERDATA, HTCLIENT, HWND_TOPMOST, IDC_ARROW, IDC_SIZEALL, IDC_SIZENS, IDC_SIZEWE, MSG,
        SM_CXSCREEN, SM_CYSCREEN, SWP_NOACTIVATE, SW_SHOW, WINDOW_EX_STYLE, WINDOW_STYLE, WM_CLOSE,
        WM_DESTROY, WM_ERASEBKGND, WM_KILLFOCUS, WM_LBUTTONDOWN, WM_LBUTTONUP, WM_MOUSEMOVE,
        WM_PAINT, WM_SETCURSOR, WM_SHOWWINDOW, WM_SIZE, WNDCLASSW, WS_EX_TOOLWINDOW,
        WS_EX_TOPMOST, WS_POPUP, WM_CAPTURECHANGED,
    };

    const MK_LBUTTON: usize = 0x0001;

    static EVENT_SENDERS: Lazy<Mutex<HashMap<isize, Sender<FrameEvent>>>> =
        Lazy::new(|| Mutex::new(HashMap::new()));

    pub fn compose_window_ex_style() -> WINDOW_EX_STYLE {
        WS_EX_TOPMOST | WS_EX_TOOLWINDOW
    }

    fn widestring(value: &str) -> Vec<u16> {
        use std::os::windows::ffi::OsStrExt;
        std::ffi::OsStr::new(value)
            .encode_wide()
            .chain(std::iter::once(0))
            .collect()
    }

    fn client_point(lparam: LPARAM) -> Point {
        Point::new(
            (lparam.0 & 0xffff) as i16 as i32,
            ((lparam.0 >> 16) & 0xffff) as i16 as i32,
        )
    }

    fn queue_event(hwnd: HWND, event: FrameEvent) {
        if let Ok(senders) = EVENT_SENDERS.lock() {
            if let Some(tx) = senders.get(&(hwnd.0 as isize)) {
                let _ = tx.send(event);
            }
        }
    }

    unsafe extern "system" fn grid_wndproc(
        hwnd: HWND,
        msg: u32,
        wparam: WPARAM,
        lparam: LPARAM,
    ) -> LRESULT {
        match msg {
            WM_ERASEBKGND => LRESULT(1),
            WM_PAINT => {
                let mut ps = PAINTSTRUCT::default();
                let hdc = unsafe { BeginPaint(hwnd, &mut ps) };
                if !hdc.0.is_null() {
                    let mem_dc = HDC(unsafe { GetWindowLongPtrW(hwnd, GWLP_USERDATA) } as *mut _);
                    if !mem_dc.0.is_null() {
                        let width = ps.rcPaint.right - ps.rcPaint.left;
                        let height = ps.rcPaint.bottom - ps.rcPaint.top;
                        let _ = unsafe {
                            BitBlt(
                                hdc,
                                ps.rcPaint.left,
                                ps.rcPaint.top,
                                width,
                                height,
                                mem_dc,
                                ps.rcPaint.left,
                                ps.rcPaint.top,
                                SRCCOPY,
                            )
                        };
                    }
                }
                unsafe {
                    let _ = EndPaint(hwnd, &ps);
                }
                LRESULT(0)
            }
            WM_SETCURSOR if (lparam.0 & 0xffff) as u32 == HTCLIENT => LRESULT(1),
            WM_LBUTTONDOWN => {
                queue_event(hwnd, FrameEvent::PointerDown { pos: client_point(lparam) });
                LRESULT(0)
            }
            WM_MOUSEMOVE => {
                queue_event(
                    hwnd,
                    FrameEvent::PointerMove {
                        pos: client_point(lparam),
                        left_down: wparam.0 & MK_LBUTTON != 0,
                    },
                );
                LRESULT(0)
            }
            WM_LBUTTONUP => {
                queue_event(hwnd, FrameEvent::PointerUp { pos: client_point(lparam) });
                LRESULT(0)
            }
            WM_CAPTURECHANGED => {
                if lparam.0 != hwnd.0 as isize {
                    queue_event(hwnd, FrameEvent::CaptureLost);
                }
                LRESULT(0)
            }
            WM_KILLFOCUS => {
                queue_event(hwnd, FrameEvent::FocusLost);
                unsafe { DefWindowProcW(hwnd, msg, wparam, lparam) }
            }
            WM_SIZE => {
                queue_event(hwnd, FrameEvent::Resized);
                unsafe { DefWindowProcW(hwnd, msg, wparam, lparam) }
            }
            WM_SHOWWINDOW => {
                if wparam.0 != 0 {
                    queue_event(hwnd, FrameEvent::Paint);
                }
                unsafe { DefWindowProcW(hwnd, msg, wparam, lparam) }
            }
            WM_CLOSE => {
                queue_event(hwnd, FrameEvent::CloseRequested);
                LRESULT(0)
            }
            WM_DESTROY => {
                unsafe { PostQuitMessage(0) };
                LRESULT(0)
            }
            _ => unsafe { DefWindowProcW(hwnd, msg, wparam, lparam) },
        }
    }

    /// Borderless, topmost window whose shape follows the rendered mask.
    #[derive(Debug)]
    pub struct OverlayWindow {
        hwnd: HWND,
        mem_dc: HDC,
        dib: HBITMAP,
        old_bitmap: HGDIOBJ,
        bits: *mut u8,
        dib_size: Size,
        event_rx: Receiver<FrameEvent>,
    }

    impl OverlayWindow {
        /// Creates the window centered on the primary screen with the given client size.
        pub fn create(client: Size) -> Result<Self> {
            static REGISTER_CLASS: Once = Once::new();
            let class_name = widestring("GoldenGridOverlay");
            let title = widestring(WINDOW_TITLE);
            let hinstance =
                unsafe { GetModuleHandleW(PCWSTR::null()) }.context("resolve module handle")?;

            REGISTER_CLASS.call_once(|| unsafe {
                let wc = WNDCLASSW {
                    hInstance: hinstance.into(),
                    lpszClassName: PCWSTR(class_name.as_ptr()),
                    lpfnWndProc: Some(grid_wndproc),
                    ..Default::default()
                };
                let _ = RegisterClassW(&wc);
            });

            let (screen_w, screen_h) =
                unsafe { (GetSystemMetrics(SM_CXSCREEN), GetSystemMetrics(SM_CYSCREEN)) };
            let x = ((screen_w - client.width) / 2).max(0);
            let y = ((screen_h - client.height) / 2).max(0);

            let hwnd = unsafe {
                CreateWindowExW(
                    compose_window_ex_style(),
                    PCWSTR(class_name.as_ptr()),
                    PCWSTR(title.as_ptr()),
                    WINDOW_STYLE(WS_POPUP.0),
                    x,
                    y,
                    client.width,
                    client.height,
                    None,
                    None,
                    hinstance,
                    None,
                )
            }
            .context("create overlay window")?;

            let mem_dc = unsafe { CreateCompatibleDC(HDC::default()) };
            if mem_dc.0.is_null() {
                unsafe {
                    let _ = DestroyWindow(hwnd);
                }
                return Err(anyhow!("failed to create memory device context"));
            }
            unsafe {
                let _ = SetWindowLongPtrW(hwnd, GWLP_USERDATA, mem_dc.0 as isize);
            }

            let (event_tx, event_rx) = channel::<FrameEvent>();
            if let Ok(mut senders) = EVENT_SENDERS.lock() {
                senders.insert(hwnd.0 as isize, event_tx);
            }

            let mut window = Self {
                hwnd,
                mem_dc,
                dib: HBITMAP::default(),
                old_bitmap: HGDIOBJ::default(),
                bits: ptr::null_mut(),
                dib_size: Size::default(),
                event_rx,
            };
            window.ensure_dib(client)?;
            Ok(window)
        }

        pub fn show(&self) {
            unsafe {
                let _ = ShowWindow(self.hwnd, SW_SHOW);
            }
        }

        pub fn drain_events(&self) -> Vec<FrameEvent> {
            let mut events = Vec::new();
            loop {
                match self.event_rx.try_recv() {
                    Ok(event) => events.push(event),
                    Err(TryRecvError::Empty | TryRecvError::Disconnected) => break,
                }
            }
            events
        }

        /// Blocks for the next window message and dispatches it.
        /// Returns `Ok(false)` once the message queue is closed.
        pub fn pump_message(&self) -> Result<bool> {
            let mut msg = MSG::default();
            let status = unsafe { GetMessageW(&mut msg, HWND::default(), 0, 0) };
            match status.0 {
                -1 => Err(anyhow!("GetMessageW failed")),
                0 => Ok(false),
                _ => {
                    unsafe {
                        let _ = TranslateMessage(&msg);
                        DispatchMessageW(&msg);
                    }
                    Ok(true)
                }
            }
        }

        fn ensure_dib(&mut self, size: Size) -> Result<()> {
            if size == self.dib_size && !self.bits.is_null() {
                return Ok(());
            }
            if !size.is_positive() {
                return Err(anyhow!("invalid bitmap size {size:?}"));
            }

            let mut bmi = BITMAPINFO::default();
            bmi.bmiHeader = BITMAPINFOHEADER {
                biSize: mem::size_of::<BITMAPINFOHEADER>() as u32,
                biWidth: size.width,
                biHeight: -size.height,
                biPlanes: 1,
                biBitCount: 32,
                biCompression: BI_RGB.0,
                ..Default::default()
            };

            let mut bits: *mut core::ffi::c_void = ptr::null_mut();
            let dib = unsafe {
                CreateDIBSection(
                    self.mem_dc,
                    &bmi,
                    DIB_RGB_COLORS,
                    &mut bits,
                    windows::Win32::Foundation::HANDLE::default(),
                    0,
                )
            }
            .context("create DIB section")?;
            if bits.is_null() {
                unsafe {
                    let _ = DeleteObject(dib);
                }
                return Err(anyhow!("DIB section has no pixel storage"));
            }

            let previous = unsafe { SelectObject(self.mem_dc, dib) };
            if self.dib.0.is_null() {
                self.old_bitmap = previous;
            } else {
                unsafe {
                    let _ = DeleteObject(self.dib);
                }
            }
            self.dib = dib;
            self.bits = bits as *mut u8;
            self.dib_size = size;
            Ok(())
        }

        fn destroy(&mut self) {
            unsafe {
                if !self.mem_dc.0.is_null() {
                    if !self.old_bitmap.0.is_null() {
                        let _ = SelectObject(self.mem_dc, self.old_bitmap);
                    }
                    if !self.dib.0.is_null() {
                        let _ = DeleteObject(self.dib);
                        self.dib = HBITMAP::default();
                    }
                    let _ = DeleteDC(self.mem_dc);
                    self.mem_dc = HDC::default();
                }
                if !self.hwnd.0.is_null() {
                    if let Ok(mut senders) = EVENT_SENDERS.lock() {
                        senders.remove(&(self.hwnd.0 as isize));
                    }
                    let _ = SetWindowLongPtrW(self.hwnd, GWLP_USERDATA, 0);
                    let _ = DestroyWindow(self.hwnd);
                    self.hwnd = HWND::default();
                }
                self.bits = ptr::null_mut();
                self.dib_size = Size::default();
            }
        }
    }

    impl FrameHost for OverlayWindow {
        fn frame_rect(&self) -> Rect {
            let mut rc = RECT::default();
            if unsafe { GetWindowRect(self.hwnd, &mut rc) }.is_err() {
                return Rect::default();
            }
            Rect::new(rc.left, rc.top, rc.right - rc.left, rc.bottom - rc.top)
        }

        fn set_frame_rect(&mut self, rect: Rect) {
            unsafe {
                let _ = SetWindowPos(
                    self.hwnd,
                    HWND_TOPMOST,
                    rect.x,
                    rect.y,
                    rect.width,
                    rect.height,
                    SWP_NOACTIVATE,
                );
            }
        }

        fn capture_pointer(&mut self) {
            unsafe {
                let _ = SetCapture(self.hwnd);
            }
        }

        fn release_pointer(&mut self) {
            unsafe {
                let _ = ReleaseCapture();
            }
        }

        fn has_capture(&self) -> bool {
            !self.hwnd.0.is_null() && unsafe { GetCapture() } == self.hwnd
        }

        fn set_cursor(&mut self, cursor: CursorShape) {
            let id = match cursor {
                CursorShape::Arrow => IDC_ARROW,
                CursorShape::SizeWestEast => IDC_SIZEWE,
                CursorShape::SizeNorthSouth => IDC_SIZENS,
                CursorShape::Move => IDC_SIZEALL,
            };
            unsafe {
                if let Ok(handle) = LoadCursorW(None, id) {
                    SetCursor(handle);
                }
            }
        }

        fn set_window_clip_region(&mut self, mask: &MaskBitmap, sentinel: GridColor) -> bool {
            let region = ShapeRegion::from_mask(mask, sentinel);
            if region.is_empty() || self.hwnd.0.is_null() {
                return false;
            }
            unsafe {
                let combined = CreateRectRgn(0, 0, 0, 0);
                if combined.0.is_null() {
                    return false;
                }
                for rect in region.rects() {
                    let part = CreateRectRgn(rect.x, rect.y, rect.right(), rect.bottom());
                    if part.0.is_null() {
                        let _ = DeleteObject(combined);
                        return false;
                    }
                    let kind = CombineRgn(combined, combined, part, RGN_OR);
                    let _ = DeleteObject(part);
                    if kind == RGN_ERROR {
                        let _ = DeleteObject(combined);
                        return false;
                    }
                }
                // On success the system owns the region.
                if SetWindowRgn(self.hwnd, combined, true) == 0 {
                    let _ = DeleteObject(combined);
                    return false;
                }
            }
            true
        }

        fn present(&mut self, mask: &MaskBitmap) {
            if let Err(err) = self.ensure_dib(mask.size()) {
                tracing::warn!(error = ?err, "cannot present mask");
                return;
            }
            let dib = mask.to_dib_bgra();
            let pixels = unsafe { std::slice::from_raw_parts_mut(self.bits, dib.len()) };
            pixels.copy_from_slice(&dib);
            unsafe {
                let _ = InvalidateRect(self.hwnd, None, false);
            }
        }

        fn close(&mut self) {
            self.destroy();
        }
    }

    impl Drop for OverlayWindow {
        fn drop(&mut self) {
            self.destroy();
        }
    }

    #[cfg(test)]
    mod windows_tests {
        use super::compose_window_ex_style;
        use windows::Win32::UI::WindowsAndMessaging::{
            WS_EX_LAYERED, WS_EX_TOOLWINDOW, WS_EX_TOPMOST, WS_EX_TRANSPARENT,
        };

        #[test]
        fn style_flags_are_topmost_tool_window_without_clickthrough() {
            let style = compose_window_ex_style();
            assert_ne!(style.0 & WS_EX_TOPMOST.0, 0);
            assert_ne!(style.0 & WS_EX_TOOLWINDOW.0, 0);
            assert_eq!(style.0 & WS_EX_TRANSPARENT.0, 0);
            assert_eq!(style.0 & WS_EX_LAYERED.0, 0);
        }
    }
}

#[cfg(windows)]
pub use platform::OverlayWindow;

#[cfg(not(windows))]
#[derive(Debug)]
pub struct OverlayWindow {
    _private: (),
}

#[cfg(not(windows))]
impl OverlayWindow {
    pub fn create(_client: Size) -> Result<Self> {
        Err(anyhow::anyhow!(
            "the shaped overlay window is only implemented for Windows"
        ))
    }
}

/// Shows the window and dispatches its events to `frame` until the frame quits
/// or the message queue closes.
#[cfg(windows)]
pub fn run(frame: &mut GridFrame, window: &mut OverlayWindow) -> Result<()> {
    if !frame.create_shaped_frame(window) {
        tracing::warn!("initial window shaping failed");
    }
    window.show();

    while frame.is_running() {
        if !window.pump_message()? {
            break;
        }
        for event in window.drain_events() {
            frame.handle_event(window, event);
            if !frame.is_running() {
                break;
            }
        }
    }
    Ok(())
}

#[cfg(not(windows))]
pub fn run(_frame: &mut GridFrame, _window: &mut OverlayWindow) -> Result<()> {
    Err(anyhow::anyhow!(
        "the shaped overlay window is only implemented for Windows"
    ))
}
