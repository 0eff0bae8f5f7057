//! The page record.

/// One wiki entry: a title and its raw body bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub title: String,
    pub body: Vec<u8>,
}

impl Page {
    pub fn new(title: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }

    /// A page with no body, used when editing a title that was never saved.
    pub fn blank(title: impl Into<String>) -> Self {
        Self::new(title, Vec::new())
    }

    /// Body decoded for display; invalid UTF-8 is replaced, never rejected.
    pub fn body_text(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
}
