//! Host capability traits
//!
//! These traits define the interface between the breathing logic and
//! whatever page, window or panel hosts it.

pub mod surface;
pub mod wake_lock;

pub use surface::{Surface, SurfaceError, SurfaceExt};
pub use wake_lock::{WakeLock, WakeLockError};
