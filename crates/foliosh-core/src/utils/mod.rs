//! Small helpers shared by the interpreter.
//!
//! Provides:
//! - [`RingBuffer`] - Bounded buffer backing the scrollback
//! - [`slugify`] - Title to URL slug conversion
//! - [`short_date`], [`now_timestamp`] - Date formatting

mod format;
mod ring_buffer;
mod slug;

pub use format::{long_timestamp, now_timestamp, short_date};
pub use ring_buffer::RingBuffer;
pub use slug::slugify;
