//! HTTP access to source pages.
//!
//! This module provides the [`PageClient`] used by the bank table extractor.

mod page;

pub use page::PageClient;
