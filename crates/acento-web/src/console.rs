//! Routes `tracing` output to the browser console.

use std::io;
use std::sync::Once;
use tracing::{Level, Metadata};
use tracing_subscriber::fmt::MakeWriter;
use web_sys::console;

/// Buffers one formatted event and hands it to the console method matching
/// its level when dropped.
pub struct ConsoleWriter {
    level: Level,
    buf: Vec<u8>,
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(bytes);
        Ok(bytes.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        if self.buf.is_empty() {
            return;
        }
        let line = String::from_utf8_lossy(&self.buf);
        let line = line.trim_end();
        match self.level {
            Level::ERROR => console::error_1(&line.into()),
            Level::WARN => console::warn_1(&line.into()),
            Level::INFO => console::info_1(&line.into()),
            _ => console::debug_1(&line.into()),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MakeConsoleWriter;

impl<'a> MakeWriter<'a> for MakeConsoleWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter {
            level: Level::INFO,
            buf: Vec::new(),
        }
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        ConsoleWriter {
            level: *meta.level(),
            buf: Vec::new(),
        }
    }
}

static INIT: Once = Once::new();

/// Installs the console subscriber and panic hook. Later calls are no-ops,
/// so the level of the first installation sticks.
pub fn init(level: Level) {
    INIT.call_once(|| {
        console_error_panic_hook::set_once();
        // wasm32-unknown-unknown has no clock, so timestamps are off.
        let _ = tracing_subscriber::fmt()
            .with_writer(MakeConsoleWriter)
            .with_max_level(level)
            .with_ansi(false)
            .without_time()
            .with_target(false)
            .try_init();
    });
}
