//! Sitemap entry model.

use std::fmt;

use chrono::NaiveDateTime;

/// Priority used when an entry does not set one (sitemap protocol default).
pub const DEFAULT_PRIORITY: f32 = 0.5;

/// How often a page is expected to change (`<changefreq>`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChangeFrequency {
    Always,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Never,
}

impl ChangeFrequency {
    /// Protocol keyword for this frequency.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Always => "always",
            Self::Hourly => "hourly",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
            Self::Never => "never",
        }
    }
}

impl fmt::Display for ChangeFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One `<url>` of a sitemap.
///
/// Built with the `with_*` methods and immutable once handed to the writer.
#[derive(Clone, Debug, PartialEq)]
pub struct SiteEntry {
    url: String,
    priority: f32,
    change_frequency: Option<ChangeFrequency>,
    last_modified: Option<NaiveDateTime>,
}

impl SiteEntry {
    /// Create an entry for a root-relative `url` with default priority.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            priority: DEFAULT_PRIORITY,
            change_frequency: None,
            last_modified: None,
        }
    }

    /// Set the priority, clamped to `[0, 1]`. NaN keeps the default.
    #[must_use]
    pub fn with_priority(mut self, priority: f32) -> Self {
        self.priority = if priority.is_nan() {
            DEFAULT_PRIORITY
        } else {
            priority.clamp(0.0, 1.0)
        };
        self
    }

    /// Set the change frequency.
    #[must_use]
    pub fn with_change_frequency(mut self, change_frequency: ChangeFrequency) -> Self {
        self.change_frequency = Some(change_frequency);
        self
    }

    /// Set or clear the last modification time.
    #[must_use]
    pub fn with_last_modified(mut self, last_modified: Option<NaiveDateTime>) -> Self {
        self.last_modified = last_modified;
        self
    }

    /// Root-relative URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Priority in `[0, 1]`.
    #[must_use]
    pub fn priority(&self) -> f32 {
        self.priority
    }

    /// Change frequency, if set.
    #[must_use]
    pub fn change_frequency(&self) -> Option<ChangeFrequency> {
        self.change_frequency
    }

    /// Last modification time, if known.
    #[must_use]
    pub fn last_modified(&self) -> Option<NaiveDateTime> {
        self.last_modified
    }
}
