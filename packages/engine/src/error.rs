use crate::errors::ErrorCode;

type BoxedSource = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug)]
pub struct SqlbindError {
    pub code: ErrorCode,
    pub message: String,
    source: Option<BoxedSource>,
}

impl SqlbindError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Errors raised by a [`crate::SqlBackend`] implementation. The engine never
    /// rewrites these, it only forwards them.
    pub fn backend(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Backend, message)
    }

    pub fn with_source(mut self, source: impl Into<BoxedSource>) -> Self {
        self.source = Some(source.into());
        self
    }
}

impl std::fmt::Display for SqlbindError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for SqlbindError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|source| source as &(dyn std::error::Error + 'static))
    }
}
