//! Convenience re-exports for downstream crates.

pub use crate::campaigns::*;
pub use crate::content::*;
pub use crate::contests::*;
pub use crate::envelope::*;
pub use crate::ids::*;
pub use crate::page::*;
pub use crate::status::*;
pub use crate::submissions::*;
pub use crate::users::*;
