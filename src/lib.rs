//! Responsive gallery
//!
//! Every image is shown through a [`resolve::Resolver`]: the resolver turns a
//! logical reference such as `/images/rooms/suite.jpg` into width-keyed webp
//! variants (`suite-xs.webp`, `suite-md.webp`, `suite-lg.webp`), and falls back
//! to the original file once, if a variant fails to load.

pub mod config;
pub mod error;
pub mod logging;
pub mod media;
pub mod resolve;
pub mod state;
pub mod ui;

pub use error::{GalleryError, Result, VariantUnavailable};
