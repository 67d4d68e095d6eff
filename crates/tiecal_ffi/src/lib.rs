//! FFI bridge crate for the Flutter app.

pub mod api;
