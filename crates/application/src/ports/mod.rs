mod multicast_endpoint;

pub use multicast_endpoint::{Ipv4Response, MulticastEndpoint, ResponseSubscription};
