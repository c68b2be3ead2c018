//! Terminal progress bars of a batch.
//!
//! - `style` - which bars are drawn and their templates
//! - `display` - the bars of one running batch
//!
//! # Examples
//!
//! ```rust
//! use lanefetch::downloader::DownloaderBuilder;
//! use lanefetch::progress::StyleOptions;
//!
//! let downloader = DownloaderBuilder::new()
//!     .style_options(StyleOptions::default().clear_batch(true))
//!     .build();
//! ```

pub(crate) mod display;
pub(crate) mod style;

pub use style::StyleOptions;
