use std::{env, error::Error};

use copypasta_ext::{prelude::*, x11_fork::ClipboardContext};

use crate::validate;

#[derive(Debug, derive_more::Display)]
pub enum ClipboardError {
    #[display("could not read clipboard: {_0}")]
    Read(String),
    #[display("could not write clipboard: {_0}")]
    Write(String),
}

impl Error for ClipboardError {}

// Anything that can hold text for the user to paste elsewhere
pub trait Clipboard {
    fn read(&mut self) -> Result<String, ClipboardError>;
    fn write(&mut self, text: &str) -> Result<(), ClipboardError>;
}

// The real clipboard.  Works over WSL and SSH as well as locally.
//
// Adapted from:
//   https://github.com/jakewilliami/cb/blob/d101beba/src/main.rs#L116-L148
pub struct SystemClipboard;

impl Clipboard for SystemClipboard {
    fn read(&mut self) -> Result<String, ClipboardError> {
        match clipboard_anywhere::get_clipboard() {
            Ok(text) => Ok(text),
            Err(e) => {
                tracing::debug!("clipboard-anywhere read failed ({e}); trying X11");
                let mut ctx =
                    ClipboardContext::new().map_err(|e| ClipboardError::Read(e.to_string()))?;
                ctx.get_contents()
                    .map_err(|e| ClipboardError::Read(e.to_string()))
            }
        }
    }

    fn write(&mut self, text: &str) -> Result<(), ClipboardError> {
        // Try set clipboard for WSL or SSH first, falling back to X11 if unavailable
        let set_res = clipboard_anywhere::set_clipboard(text);
        let get_res = clipboard_anywhere::get_clipboard();

        // Possible errors:
        //   1. Something has gone wrong if we can neither set nor get the clipboard
        let clipboard_unresponsive = set_res.is_err() && get_res.is_err();
        //   2. If we are not using SSH, get_res should be okay
        let local_clipboard_get_err = env::var("SSH_CLIENT").is_err() && get_res.is_err();
        //   3. We might be able to get the result from clipboard but it could be empty
        let clipboard_not_populated = get_res.as_ref().is_ok_and(|got| got.is_empty());

        if !(clipboard_unresponsive || local_clipboard_get_err || clipboard_not_populated) {
            return Ok(());
        }

        // Final attempt, using an X11-aware clipboard manager
        tracing::debug!("clipboard-anywhere write unconfirmed; trying X11");
        let mut ctx = ClipboardContext::new().map_err(|e| ClipboardError::Write(e.to_string()))?;
        ctx.set_contents(text.to_string())
            .map_err(|e| ClipboardError::Write(e.to_string()))
    }
}

// Read the clipboard once at startup, keeping its content only if it is a URL
// we could compose a command for.  Every failure here is silent.
pub fn prefill_from_clipboard(clipboard: &mut impl Clipboard) -> Option<String> {
    match clipboard.read() {
        Ok(text) => {
            let text = text.trim();
            if validate::validate(text) {
                tracing::debug!(url = text, "prefilled URL from clipboard");
                Some(text.to_string())
            } else {
                None
            }
        }
        Err(e) => {
            tracing::debug!("clipboard access not available: {e}");
            None
        }
    }
}

// Write text to the clipboard, reporting only whether it worked
pub fn copy(clipboard: &mut impl Clipboard, text: &str) -> bool {
    match clipboard.write(text) {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!("failed to copy: {e}");
            false
        }
    }
}

#[cfg(test)]
pub(crate) mod fake {
    use super::*;

    // In-memory clipboard for tests; `None` contents or `deny_*` simulate a
    // platform that refuses access
    #[derive(Default)]
    pub struct FakeClipboard {
        pub contents: Option<String>,
        pub deny_read: bool,
        pub deny_write: bool,
        pub writes: usize,
    }

    impl FakeClipboard {
        pub fn holding(text: &str) -> Self {
            Self {
                contents: Some(text.to_string()),
                ..Default::default()
            }
        }
    }

    impl Clipboard for FakeClipboard {
        fn read(&mut self) -> Result<String, ClipboardError> {
            if self.deny_read {
                return Err(ClipboardError::Read("permission denied".to_string()));
            }
            self.contents
                .clone()
                .ok_or_else(|| ClipboardError::Read("empty".to_string()))
        }

        fn write(&mut self, text: &str) -> Result<(), ClipboardError> {
            if self.deny_write {
                return Err(ClipboardError::Write("permission denied".to_string()));
            }
            self.writes += 1;
            self.contents = Some(text.to_string());
            Ok(())
        }
    }
}
