use anyhow::Context;
use crossterm::{
    cursor,
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    terminal::{self, ClearType},
    ExecutableCommand,
};
use log::{debug, info};
use std::io::{stdout, Stdout, Write};

pub struct TerminalGuard {
    enhanced_keys: bool,
}

impl TerminalGuard {
    pub fn new() -> anyhow::Result<Self> {
        terminal::enable_raw_mode().context("enable raw mode")?;
        // Create the guard immediately so Drop will disable raw mode if
        // any subsequent setup step fails.
        let mut guard = Self {
            enhanced_keys: false,
        };

        let mut out = stdout();
        out.execute(terminal::EnterAlternateScreen)
            .context("enter alternate screen")?;
        out.execute(terminal::Clear(ClearType::All))
            .context("clear screen")?;
        out.execute(cursor::Hide).context("hide cursor")?;

        // Release events are what make "held" inputs exact; without them the
        // input layer falls back to a hold window.
        if terminal::supports_keyboard_enhancement().unwrap_or(false) {
            out.execute(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))
            .context("enable key release reporting")?;
            guard.enhanced_keys = true;
            info!("keyboard enhancement: key release events enabled");
        } else {
            debug!("keyboard enhancement unsupported; using hold window");
        }

        Ok(guard)
    }

    /// Whether the terminal reports key releases.
    pub fn reports_key_release(&self) -> bool {
        self.enhanced_keys
    }

    pub fn stdout() -> Stdout {
        stdout()
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let mut out = stdout();
        if self.enhanced_keys {
            let _ = out.execute(PopKeyboardEnhancementFlags);
        }
        let _ = terminal::disable_raw_mode();
        // Best-effort: undo modes we may have enabled during rendering (sync output, autowrap, colors).
        let _ = out.write_all(b"\x1b[?2026l\x1b[?7h\x1b[0m");
        let _ = out.flush();
        let _ = out.execute(cursor::Show);
        let _ = out.execute(terminal::LeaveAlternateScreen);
    }
}
