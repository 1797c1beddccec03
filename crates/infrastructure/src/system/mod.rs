pub mod interface;

pub use interface::{resolve_interface, ResolvedInterface};
