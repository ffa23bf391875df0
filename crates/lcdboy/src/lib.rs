use std::io::Write;

use anyhow::{ensure, Result};
use typed_builder::TypedBuilder;

pub use lcdboy_common::{App, FramePacer};
pub use lcdboy_gb;

/// DMG refresh rate: 4 194 304 Hz / 70 224 cycles per frame.
pub const DMG_REFRESH_HZ: f64 = 59.7275;

#[derive(Debug, Clone, TypedBuilder)]
pub struct HostInitInfo {
    pub width: u32,
    pub height: u32,
    pub title: String,
    /// Stop after this many frames. `None` runs until the app asks to exit.
    #[builder(default)]
    pub frame_limit: Option<u64>,
    /// Sleep between frames to hold the DMG refresh rate.
    #[builder(default = true)]
    pub paced: bool,
}

/// Headless host loop.
///
/// Calls `update` once per frame with a `width * height` screen buffer and
/// hands the app to `on_frame` afterwards. Returns the number of frames run.
pub fn run<A: App>(
    info: HostInitInfo,
    app: &mut A,
    mut on_frame: impl FnMut(&mut A, &[u8]),
) -> Result<u64> {
    let HostInitInfo {
        width,
        height,
        title,
        frame_limit,
        paced,
    } = info;
    ensure!(
        width > 0 && height > 0,
        "invalid screen size {}x{}",
        width,
        height
    );

    log::info!(
        "{}: {}x{} (scale {}), paced={}, frame limit={:?}",
        title,
        width,
        height,
        app.scale(),
        paced,
        frame_limit
    );

    let mut screen = vec![0u8; (width * height) as usize];
    let mut pacer = FramePacer::from_hz(DMG_REFRESH_HZ);
    let mut frames = 0u64;

    app.init();
    loop {
        if app.should_exit() || frame_limit.is_some_and(|limit| frames >= limit) {
            app.exit();
            break;
        }

        app.update(&mut screen);
        frames += 1;
        on_frame(app, &screen);

        if paced {
            pacer.wait();
        }
    }

    if pacer.overruns() > 0 {
        log::debug!("{} frames overran the frame budget", pacer.overruns());
    }
    Ok(frames)
}

/// Copy serial side-channel bytes to `out`. A failed write is logged and
/// reported as `false`; the machine keeps running either way.
pub fn surface_serial(out: &mut impl Write, bytes: &[u8]) -> bool {
    if bytes.is_empty() {
        return true;
    }
    match out.write_all(bytes).and_then(|()| out.flush()) {
        Ok(()) => true,
        Err(err) => {
            log::debug!("dropped {} serial bytes: {}", bytes.len(), err);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct CountingApp {
        updates: u64,
        exit_after: Option<u64>,
        exited: bool,
    }

    impl App for CountingApp {
        fn init(&mut self) {}

        fn update(&mut self, screen: &mut [u8]) {
            self.updates += 1;
            screen.fill(self.updates as u8);
        }

        fn should_exit(&self) -> bool {
            self.exit_after.is_some_and(|n| self.updates >= n)
        }

        fn exit(&mut self) {
            self.exited = true;
        }

        fn width(&self) -> u32 {
            4
        }

        fn height(&self) -> u32 {
            2
        }

        fn scale(&self) -> u32 {
            1
        }

        fn title(&self) -> String {
            "counting".to_string()
        }
    }

    fn info(app: &CountingApp) -> HostInitInfo {
        HostInitInfo::builder()
            .width(app.width())
            .height(app.height())
            .title(app.title())
            .frame_limit(Some(3))
            .paced(false)
            .build()
    }

    #[test]
    fn stops_at_frame_limit() {
        let mut app = CountingApp::default();
        let mut seen = Vec::new();
        let frames = run(info(&app), &mut app, |_, screen| seen.push(screen[0])).unwrap();
        assert_eq!(frames, 3);
        assert_eq!(seen, vec![1, 2, 3]);
        assert!(app.exited);
    }

    #[test]
    fn stops_when_app_asks() {
        let mut app = CountingApp {
            exit_after: Some(1),
            ..CountingApp::default()
        };
        let frames = run(info(&app), &mut app, |_, _| {}).unwrap();
        assert_eq!(frames, 1);
        assert!(app.exited);
    }

    #[test]
    fn rejects_empty_screen() {
        let mut app = CountingApp::default();
        let info = HostInitInfo::builder()
            .width(0)
            .height(2)
            .title("bad".to_string())
            .build();
        assert!(run(info, &mut app, |_, _| {}).is_err());
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::ErrorKind::BrokenPipe.into())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn surface_serial_writes_and_reports_failures() {
        let mut out = Vec::new();
        assert!(surface_serial(&mut out, b"Passed"));
        assert_eq!(out, b"Passed");

        assert!(surface_serial(&mut BrokenPipe, b""));
        assert!(!surface_serial(&mut BrokenPipe, b"Failed"));
    }
}
