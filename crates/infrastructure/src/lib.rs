//! mdns64 Infrastructure Layer
pub mod network;
pub mod system;
