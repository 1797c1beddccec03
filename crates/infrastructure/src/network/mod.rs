pub mod endpoint;
pub mod router;
pub mod socket;

pub use endpoint::DualStackEndpoint;
pub use router::{route_datagram, Ipv4ResponseRouter, RouteDecision};
pub use socket::{open_ipv4_group_socket, open_ipv6_group_socket};
