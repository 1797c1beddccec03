//! NAT64 address synthesis (RFC 6052 §2.1)
//!
//! IPv4 addresses are embedded in the last 32 bits of the well-known prefix
//! `64:ff9b::/96`. The mapping is pure and injective, so the same A record
//! always yields the same AAAA address.

use std::net::{Ipv4Addr, Ipv6Addr};

/// The first 12 bytes of every synthesized address (`64:ff9b::/96`).
pub const NAT64_WELL_KNOWN_PREFIX: [u8; 12] = [
    0x00, 0x64, 0xff, 0x9b, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
];

/// Maps `addr` into the well-known NAT64 prefix.
pub fn synthesize_nat64(addr: Ipv4Addr) -> Ipv6Addr {
    let mut octets = [0u8; 16];
    octets[..12].copy_from_slice(&NAT64_WELL_KNOWN_PREFIX);
    octets[12..].copy_from_slice(&addr.octets());
    Ipv6Addr::from(octets)
}
