pub mod client;
pub mod incluster;
pub mod transport;
