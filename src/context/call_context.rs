use super::call_site::CallSite;
use std::panic::Location;

/// Per-call view shared by every decorator around one invocation.
#[derive(Debug, Clone)]
pub struct CallContext {
    qualified_name: String,
    location: &'static Location<'static>,
}

impl CallContext {
    pub fn new(qualified_name: impl Into<String>, location: &'static Location<'static>) -> Self {
        Self {
            qualified_name: qualified_name.into(),
            location,
        }
    }

    pub fn qualified_name(&self) -> &str {
        &self.qualified_name
    }

    pub fn location(&self) -> &'static Location<'static> {
        self.location
    }

    pub fn call_site(&self) -> CallSite {
        CallSite::new(self.location, self.qualified_name.clone())
    }
}
