//! Cookie-backed page state for a bootstrap layer.
//!
//! The ambient cookie string belongs to the hosting environment; this
//! crate only looks at it through the [`CookieSource`] seam. On top of
//! that sit [`CookieStore`] (the classic get/expire pair) and
//! [`Flash`] (a cookie that is consumed on first read).
//!
//! The store keeps the reference lookup idiom on purpose: prepend a
//! `"; "` sentinel and split on `"; name="`. A name that happens to
//! appear inside another cookie's text can mismatch; callers own their
//! cookie names.

pub mod config;
pub mod flash;
pub mod obs;
pub mod source;
pub mod store;
pub mod telemetry;

pub use config::{AppConfig, ConfigError};
pub use flash::{Flash, FLASH_COOKIE};
pub use obs::MutationSink;
pub use source::{CookieSource, HeaderSource, MemorySource};
pub use store::{CookieStore, EPOCH_EXPIRY};
