use mdns64_domain::DomainError;
use std::net::{IpAddr, Ipv4Addr};
use tracing::debug;

/// The facts about one named interface that the multicast sockets need.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedInterface {
    pub name: String,
    /// Used for the IPv6 group join and as the scope id of `ff02::fb`.
    pub index: u32,
    /// Used for the IPv4 group join and `IP_MULTICAST_IF`.
    pub ipv4: Ipv4Addr,
}

/// Look up `name` among the host's interfaces.
pub fn resolve_interface(name: &str) -> Result<ResolvedInterface, DomainError> {
    let interfaces = if_addrs::get_if_addrs().map_err(|e| DomainError::InterfaceUnusable {
        name: name.to_string(),
        reason: format!("failed to list interfaces: {}", e),
    })?;

    let resolved = select_interface(
        name,
        interfaces
            .iter()
            .map(|intf| (intf.name.as_str(), intf.ip(), intf.index)),
    )?;

    debug!(
        interface = %resolved.name,
        index = resolved.index,
        ipv4 = %resolved.ipv4,
        "Resolved network interface"
    );
    Ok(resolved)
}

/// An interface shows up once per address; merge the entries for `name`.
fn select_interface<'a>(
    name: &str,
    addresses: impl IntoIterator<Item = (&'a str, IpAddr, Option<u32>)>,
) -> Result<ResolvedInterface, DomainError> {
    let mut found = false;
    let mut index = None;
    let mut ipv4 = None;

    for (intf_name, ip, intf_index) in addresses {
        if intf_name != name {
            continue;
        }
        found = true;
        index = index.or(intf_index);
        if let IpAddr::V4(v4) = ip {
            ipv4 = ipv4.or(Some(v4));
        }
    }

    if !found {
        return Err(DomainError::InterfaceNotFound(name.to_string()));
    }

    let unusable = |reason: &str| DomainError::InterfaceUnusable {
        name: name.to_string(),
        reason: reason.to_string(),
    };

    Ok(ResolvedInterface {
        name: name.to_string(),
        index: index.ok_or_else(|| unusable("no interface index"))?,
        ipv4: ipv4.ok_or_else(|| unusable("no IPv4 address"))?,
    })
}
