//! Notification Channel
//!
//! Fire-and-forget user messages. Orchestrators only ever push; rendering
//! and expiry belong to whoever implements [`Notifier`].

use std::rc::Rc;

/// Default toast title
pub const DEFAULT_TITLE: &str = "Notification";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Success,
    Error,
    Warning,
    Info,
}

impl Category {
    /// Bootstrap contextual suffix (`bg-{suffix}`)
    pub fn css_suffix(self) -> &'static str {
        match self {
            Category::Success => "success",
            Category::Error => "danger",
            Category::Warning => "warning",
            Category::Info => "info",
        }
    }

    /// Light backgrounds need dark text
    pub fn text_class(self) -> &'static str {
        match self {
            Category::Warning | Category::Info => "text-dark",
            Category::Success | Category::Error => "text-white",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Success => "success",
            Category::Error => "error",
            Category::Warning => "warning",
            Category::Info => "info",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub message: String,
    pub category: Category,
    /// `None` uses the channel default; `Some(0)` persists until dismissed
    pub duration_ms: Option<u32>,
    pub title: Option<String>,
}

impl Notification {
    pub fn new(message: impl Into<String>, category: Category) -> Self {
        Self {
            message: message.into(),
            category,
            duration_ms: None,
            title: None,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, Category::Success)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, Category::Error)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(message, Category::Warning)
    }

    pub fn with_duration(mut self, duration_ms: u32) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or(DEFAULT_TITLE)
    }

    /// Text for the blocking fallback when no toast host exists
    pub fn alert_text(&self) -> String {
        format!("{} ({}): {}", self.title(), self.category.as_str(), self.message)
    }
}

/// Sink for notifications. Must never block or fail the caller.
pub trait Notifier {
    fn notify(&self, notification: Notification);
}

impl<T: Notifier + ?Sized> Notifier for Rc<T> {
    fn notify(&self, notification: Notification) {
        (**self).notify(notification);
    }
}

/// A queued toast with its display identity
#[derive(Debug, Clone, PartialEq)]
pub struct ToastEntry {
    pub id: u64,
    pub notification: Notification,
    /// Resolved lifetime; 0 means sticky
    pub duration_ms: u32,
}

/// Stacking toast queue. No deduplication: identical messages stack.
#[derive(Debug, Clone)]
pub struct NotificationQueue {
    entries: Vec<ToastEntry>,
    next_id: u64,
    default_duration_ms: u32,
}

impl NotificationQueue {
    pub fn new(default_duration_ms: u32) -> Self {
        Self {
            entries: Vec::new(),
            next_id: 1,
            default_duration_ms,
        }
    }

    /// Queue a notification and return the entry so the caller can
    /// schedule its expiry.
    pub fn push(&mut self, notification: Notification) -> ToastEntry {
        let duration_ms = notification.duration_ms.unwrap_or(self.default_duration_ms);
        let entry = ToastEntry {
            id: self.next_id,
            notification,
            duration_ms,
        };
        self.next_id += 1;
        self.entries.push(entry.clone());
        entry
    }

    /// Remove a toast; returns false when it was already gone.
    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }

    pub fn active(&self) -> &[ToastEntry] {
        &self.entries
    }
}
