//! Group Module
//!
//! Named cache-aside groups, the loader hook they call on a miss, and the
//! registry that owns them.

mod loader;
mod named;
mod registry;

pub use loader::Loader;
pub use named::Group;
pub use registry::GroupRegistry;
