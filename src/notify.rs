//! User-Facing Notices
//!
//! Single reporting path for action outcomes. Call sites pick a severity;
//! presentation (toast stack, auto-dismiss) is decided here.

use leptos::prelude::*;
use leptos::task::spawn_local;

/// Most notices kept on screen at once
const MAX_VISIBLE: usize = 4;
/// Auto-dismiss delay for non-error notices
const DISMISS_AFTER_MS: u32 = 4_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Success,
    Info,
    Warning,
    Error,
}

impl Severity {
    pub fn class(&self) -> &'static str {
        match self {
            Severity::Success => "toast toast-success",
            Severity::Info => "toast toast-info",
            Severity::Warning => "toast toast-warning",
            Severity::Error => "toast toast-error",
        }
    }

    /// Errors stay until dismissed
    pub fn sticky(&self) -> bool {
        matches!(self, Severity::Error)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub id: u32,
    pub severity: Severity,
    pub message: String,
}

/// Bounded stack of notices, newest last
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NoticeQueue {
    next_id: u32,
    notices: Vec<Notice>,
}

impl NoticeQueue {
    pub fn push(&mut self, severity: Severity, message: impl Into<String>) -> u32 {
        self.next_id += 1;
        let id = self.next_id;
        self.notices.push(Notice { id, severity, message: message.into() });
        if self.notices.len() > MAX_VISIBLE {
            let excess = self.notices.len() - MAX_VISIBLE;
            self.notices.drain(..excess);
        }
        id
    }

    pub fn dismiss(&mut self, id: u32) {
        self.notices.retain(|n| n.id != id);
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }
}

/// Notice reporter provided through context
#[derive(Clone, Copy)]
pub struct Notifier {
    queue: RwSignal<NoticeQueue>,
}

impl Notifier {
    pub fn new() -> Self {
        Self { queue: RwSignal::new(NoticeQueue::default()) }
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.queue.with(|q| q.notices().to_vec())
    }

    pub fn report(&self, severity: Severity, message: impl Into<String>) {
        let message = message.into();
        match severity {
            Severity::Error => log::error!("[NOTICE] {}", message),
            Severity::Warning => log::warn!("[NOTICE] {}", message),
            Severity::Info | Severity::Success => log::info!("[NOTICE] {}", message),
        }
        let mut id = 0;
        self.queue.update(|q| id = q.push(severity, message));
        if !severity.sticky() {
            let queue = self.queue;
            spawn_local(async move {
                gloo_timers::future::TimeoutFuture::new(DISMISS_AFTER_MS).await;
                queue.update(|q| q.dismiss(id));
            });
        }
    }

    pub fn success(&self, message: impl Into<String>) {
        self.report(Severity::Success, message);
    }

    pub fn info(&self, message: impl Into<String>) {
        self.report(Severity::Info, message);
    }

    pub fn warn(&self, message: impl Into<String>) {
        self.report(Severity::Warning, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.report(Severity::Error, message);
    }

    pub fn dismiss(&self, id: u32) {
        self.queue.update(|q| q.dismiss(id));
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_notifier() -> Notifier {
    expect_context::<Notifier>()
}

/// Toast stack rendered once at the app root
#[component]
pub fn NoticeStack() -> impl IntoView {
    let notifier = use_notifier();

    view! {
        <div class="toast-stack">
            <For
                each=move || notifier.notices()
                key=|n| n.id
                children=move |notice| {
                    let id = notice.id;
                    view! {
                        <div class=notice.severity.class() role="status">
                            <span class="toast-message">{notice.message}</span>
                            <button class="toast-close" on:click=move |_| notifier.dismiss(id)>"×"</button>
                        </div>
                    }
                }
            />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_is_bounded() {
        let mut q = NoticeQueue::default();
        for i in 0..6 {
            q.push(Severity::Info, format!("n{}", i));
        }
        let msgs: Vec<&str> = q.notices().iter().map(|n| n.message.as_str()).collect();
        assert_eq!(msgs, vec!["n2", "n3", "n4", "n5"]);
    }

    #[test]
    fn test_dismiss_by_id() {
        let mut q = NoticeQueue::default();
        let a = q.push(Severity::Error, "a");
        q.push(Severity::Success, "b");
        q.dismiss(a);
        assert_eq!(q.notices().len(), 1);
        assert_eq!(q.notices()[0].message, "b");
    }

    #[test]
    fn test_only_errors_are_sticky() {
        assert!(Severity::Error.sticky());
        assert!(!Severity::Warning.sticky());
    }
}
