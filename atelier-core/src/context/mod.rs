//! Values shared by every page without being global state.

mod locale;
mod session;

pub use locale::{Language, LocaleSettings};
pub use session::Session;
