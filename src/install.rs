use std::pin::Pin;

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum InstallOutcome {
    #[display("accepted")]
    Accepted,
    #[display("dismissed")]
    Dismissed,
}

pub type PromptFuture = Pin<Box<dyn Future<Output = InstallOutcome> + Send>>;

// A platform install prompt that was held back when offered.  Taking `self` by
// box means it can only ever be shown once.
pub trait DeferredPrompt: Send {
    // Show the prompt and wait for the user's choice
    fn prompt(self: Box<Self>) -> PromptFuture;
}

// Tracks whether the host has offered to install the app, and whether the
// install action should still be shown.
#[derive(Default)]
pub struct InstallPrompt {
    deferred: Option<Box<dyn DeferredPrompt>>,
    visible: bool,
}

impl InstallPrompt {
    pub fn new() -> Self {
        Self::default()
    }

    // Called when the host says the app is installable.  A newer offer replaces
    // an older one that was never used.
    pub fn offer(&mut self, handle: Box<dyn DeferredPrompt>) {
        tracing::debug!("install prompt offered");
        self.deferred = Some(handle);
        self.visible = true;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    #[cfg(test)]
    fn has_handle(&self) -> bool {
        self.deferred.is_some()
    }

    // Show the held prompt.  Returns `None` if there is nothing to show, which
    // includes a second call after the handle was used.
    pub async fn install(&mut self) -> Option<InstallOutcome> {
        let handle = self.deferred.take()?;
        let outcome = handle.prompt().await;
        tracing::info!(%outcome, "install prompt answered");

        if outcome == InstallOutcome::Accepted {
            self.visible = false;
        }

        Some(outcome)
    }
}
