//! Display state and formatting
//!
//! The renderer keeps a [`Readout`] of everything the page shows; the host
//! pushes it to its element tree through a
//! [`Surface`](crate::traits::Surface).

pub mod format;
pub mod readout;

pub use format::{format_clock, format_countdown, CLOCK_LEN, COUNTDOWN_LEN};
pub use readout::{Page, Readout, Renderer, LABEL_LEN};
