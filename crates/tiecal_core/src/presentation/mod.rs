//! Display rules for note cards.
//!
//! Pure functions only; nothing here touches the store.

pub mod truncation;
