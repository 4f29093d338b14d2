use crate::dispatch::{STATUS_FATAL, STATUS_TRANSPORT_ERROR};

/// Outcome category a record is reported under, besides the total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Ok,
    Redirect,
    NotFound,
    Unavailable,
    Timeout,
    Fatal,
    Other,
}

impl Category {
    /// Report order.
    pub const ALL: [Category; 7] = [
        Category::Ok,
        Category::Redirect,
        Category::NotFound,
        Category::Unavailable,
        Category::Timeout,
        Category::Fatal,
        Category::Other,
    ];

    #[must_use]
    pub const fn classify(status_code: u16) -> Self {
        match status_code {
            200 => Category::Ok,
            301 | 302 | 304 => Category::Redirect,
            404 => Category::NotFound,
            503 | 504 => Category::Unavailable,
            STATUS_TRANSPORT_ERROR => Category::Timeout,
            STATUS_FATAL => Category::Fatal,
            _ => Category::Other,
        }
    }

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Category::Ok => "200 OK",
            Category::Redirect => "3xx Redirect",
            Category::NotFound => "404 Not Found",
            Category::Unavailable => "503/504 Unavailable",
            Category::Timeout => "Timeout",
            Category::Fatal => "Fatal",
            Category::Other => "Other",
        }
    }
}
