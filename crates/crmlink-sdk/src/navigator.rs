//! Full-page navigation seam.
//!
//! A successful `authorize` hands control to the provider's consent page.
//! How that happens depends on the host: a webview replaces its location,
//! a terminal prints the URL. Closures implement [`Navigator`] directly.

/// Moves the caller's execution context to another URL.
pub trait Navigator {
    /// Navigate to `url`. The current view is expected to be left behind.
    fn navigate(&self, url: &str);
}

impl<F> Navigator for F
where
    F: Fn(&str),
{
    fn navigate(&self, url: &str) {
        self(url);
    }
}
