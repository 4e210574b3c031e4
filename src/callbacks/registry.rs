use std::collections::HashMap;
use std::sync::Arc;

/// Maps operation names to handlers, with an explicit fallback for names
/// nobody registered.
pub struct Registry<H: ?Sized> {
    handlers: HashMap<String, Arc<H>>,
    fallback: Arc<H>,
}

impl<H: ?Sized> Registry<H> {
    pub fn new(fallback: Arc<H>) -> Self {
        Self {
            handlers: HashMap::new(),
            fallback,
        }
    }

    /// Registers `handler` for `name`, returning the handler it replaced.
    pub fn register(&mut self, name: &str, handler: Arc<H>) -> Option<Arc<H>> {
        self.handlers.insert(name.to_string(), handler)
    }

    /// The handler for `name`, or the fallback. The flag tells which.
    pub fn resolve(&self, name: &str) -> (&H, bool) {
        match self.handlers.get(name) {
            Some(handler) => (handler.as_ref(), true),
            None => (self.fallback.as_ref(), false),
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.handlers.keys().map(String::as_str)
    }
}

impl<H: ?Sized> std::fmt::Debug for Registry<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<&str> = self.names().collect();
        names.sort_unstable();
        f.debug_struct("Registry").field("handlers", &names).finish()
    }
}
