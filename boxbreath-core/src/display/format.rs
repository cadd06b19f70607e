//! Time formatting for the display

use core::fmt::Write;
use heapless::String;

/// Longest clock string: minutes of `u32::MAX` seconds plus ":SS"
pub const CLOCK_LEN: usize = 12;

/// Longest countdown string (`u16::MAX`)
pub const COUNTDOWN_LEN: usize = 5;

/// Format elapsed seconds as zero-padded `MM:SS`
///
/// Minutes keep growing past 99 rather than wrapping.
pub fn format_clock(total_s: u32) -> String<CLOCK_LEN> {
    let mut s = String::new();
    let _ = write!(s, "{:02}:{:02}", total_s / 60, total_s % 60);
    s
}

/// Format the phase countdown; blank once it reaches zero
pub fn format_countdown(remaining_s: u16) -> String<COUNTDOWN_LEN> {
    let mut s = String::new();
    if remaining_s > 0 {
        let _ = write!(s, "{}", remaining_s);
    }
    s
}
