//! Built-in validators
//!
//! Ready-to-use validators over `str`, the input type of form fields.
//!
//! - **Presence**: [`Required`]
//! - **Length**: [`MinLength`], [`MaxLength`]
//! - **Content**: [`Email`], [`Url`], [`MatchesRegex`]
//! - **Character class**: [`Alphanumeric`], [`Alphabetic`], [`Numeric`]

pub mod content;
pub mod length;
pub mod pattern;
pub mod required;

pub use content::{Email, MatchesRegex, Url, email, matches_regex, url};
pub use length::{MaxLength, MinLength, max_length, min_length};
pub use pattern::{Alphabetic, Alphanumeric, Numeric, alphabetic, alphanumeric, numeric};
pub use required::{Required, required};
