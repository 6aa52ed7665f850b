//! Base URL resolution

/// Supplies the base URL requests are resolved against
pub trait Environment: Send + Sync {
    fn base_url(&self) -> &str;
}

/// Environment with a fixed base URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticEnvironment {
    base_url: String,
}

impl StaticEnvironment {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

impl Environment for StaticEnvironment {
    fn base_url(&self) -> &str {
        &self.base_url
    }
}
