use crate::{
    clipboard::{self, Clipboard},
    compose::{self, ComposeError, DownloadMode},
    install::{DeferredPrompt, InstallOutcome, InstallPrompt},
    status::{Feedback, StatusKind},
    validate,
};

// Everything the front end shows: the URL being edited, the transient
// feedback after an action, and the install offer.  Owns the clipboard it
// copies to.
pub struct Composer<C> {
    url: String,
    clipboard: C,
    feedback: Feedback,
    install: InstallPrompt,
}

impl<C: Clipboard> Composer<C> {
    pub fn new(clipboard: C) -> Self {
        Self::with_feedback(clipboard, Feedback::new())
    }

    fn with_feedback(clipboard: C, feedback: Feedback) -> Self {
        Self {
            url: String::new(),
            clipboard,
            feedback,
            install: InstallPrompt::new(),
        }
    }

    // Build a composer with the URL prefilled from the clipboard, if it holds one
    pub fn start(clipboard: C) -> Self {
        let mut composer = Self::new(clipboard);
        composer.prefill();
        composer
    }

    pub fn prefill(&mut self) {
        if let Some(url) = clipboard::prefill_from_clipboard(&mut self.clipboard) {
            self.url = url;
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn set_url(&mut self, url: impl Into<String>) {
        self.url = url.into();
    }

    pub fn clear_url(&mut self) {
        self.url.clear();
    }

    pub fn feedback(&self) -> &Feedback {
        &self.feedback
    }

    // Compose the command for the current URL without touching the clipboard
    // or the feedback state
    pub fn compose(&self, mode: DownloadMode) -> Result<String, ComposeError> {
        if !mode.needs_url() {
            return Ok(compose::compose("", mode));
        }

        let url = validate::check(&self.url)?;
        Ok(compose::compose(url, mode))
    }

    // Handle an action button: compose, copy, and report the outcome in the
    // status line.  The command is returned so the caller can echo it.
    pub fn run(&mut self, mode: DownloadMode) -> Result<String, ComposeError> {
        let result = self.compose(mode).and_then(|command| {
            if clipboard::copy(&mut self.clipboard, &command) {
                Ok(command)
            } else {
                Err(ComposeError::ClipboardWrite)
            }
        });

        match &result {
            Ok(_) => {
                self.feedback.mark_copied(mode);
                let (message, kind) = success_status(mode);
                self.feedback.show_status(message, kind);
            }
            Err(e) => self.feedback.show_status(e.to_string(), StatusKind::Error),
        }

        result
    }

    pub fn offer_install(&mut self, handle: Box<dyn DeferredPrompt>) {
        self.install.offer(handle);
    }

    pub fn install_visible(&self) -> bool {
        self.install.is_visible()
    }

    pub async fn install(&mut self) -> Option<InstallOutcome> {
        self.install.install().await
    }
}

fn success_status(mode: DownloadMode) -> (&'static str, StatusKind) {
    match mode {
        DownloadMode::UpdateTool => ("Update command copied! Paste in Termux", StatusKind::Info),
        _ => ("Command copied! Paste in Termux", StatusKind::Success),
    }
}
