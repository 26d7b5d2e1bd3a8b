//! Resource-oriented service traits implemented by the CRUD repositories.

pub mod traits;

pub use traits::*;
