use crate::source::CookieSource;
use crate::store::CookieStore;

/// Cookie name the flash page bundle reads by default.
pub const FLASH_COOKIE: &str = "flash_message";

/// One-shot message cookie: whoever reads it clears it, so a reload
/// does not show the message again.
pub struct Flash<'a, S> {
    store: &'a mut CookieStore<S>,
    name: String,
}

impl<'a, S: CookieSource> Flash<'a, S> {
    pub fn new(store: &'a mut CookieStore<S>) -> Self {
        Self::with_name(store, FLASH_COOKIE)
    }

    pub fn with_name(store: &'a mut CookieStore<S>, name: impl Into<String>) -> Self {
        Self {
            store,
            name: name.into(),
        }
    }

    /// Read and expire the flash cookie in one step. When no flash is
    /// pending, returns `None` without issuing a write.
    pub fn take(&mut self) -> Option<String> {
        let value = self.store.get(&self.name)?;
        self.store.delete(&self.name);
        Some(value)
    }
}
