//! External cluster settings: where they come from and how the TLS material
//! in them is decoded.

pub mod config;
pub mod decode;
