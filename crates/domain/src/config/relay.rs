use std::net::{Ipv4Addr, Ipv6Addr, SocketAddrV4, SocketAddrV6};
use std::time::Duration;

/// mDNS port (RFC 6762 §3)
pub const MDNS_PORT: u16 = 5353;

/// `224.0.0.251`
pub const MDNS_GROUP_V4: Ipv4Addr = Ipv4Addr::new(224, 0, 0, 251);

/// `ff02::fb`
pub const MDNS_GROUP_V6: Ipv6Addr = Ipv6Addr::new(0xff02, 0, 0, 0, 0, 0, 0, 0xfb);

/// The two multicast destinations the relay bridges between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MulticastGroups {
    pub ipv4: SocketAddrV4,
    pub ipv6: SocketAddrV6,
}

impl MulticastGroups {
    /// Pins the link-local IPv6 group to one interface.
    pub fn with_scope_id(mut self, interface_index: u32) -> Self {
        self.ipv6.set_scope_id(interface_index);
        self
    }
}

impl Default for MulticastGroups {
    fn default() -> Self {
        Self {
            ipv4: SocketAddrV4::new(MDNS_GROUP_V4, MDNS_PORT),
            ipv6: SocketAddrV6::new(MDNS_GROUP_V6, MDNS_PORT, 0, 0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelayTimeouts {
    /// Deadline for writing the forwarded query to the IPv4 group.
    pub forward_send: Duration,

    /// Total time a relay task waits for a matching IPv4 response.
    /// Unrelated traffic on the group does not extend it.
    pub response_wait: Duration,
}

impl Default for RelayTimeouts {
    fn default() -> Self {
        Self {
            forward_send: Duration::from_secs(1),
            response_wait: Duration::from_secs(3),
        }
    }
}
