//! Base types and error handling.
//!
//! Provides foundational types mirroring Chromium's `net/base/`:
//! - [`NetError`](neterror::NetError): Network error codes matching `net_error_list.h`
//! - [`IoResultExt`](context::IoResultExt): context helpers for `io::Result`

pub mod context;
pub mod neterror;
