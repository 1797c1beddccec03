use crate::system::ResolvedInterface;
use mdns64_domain::DomainError;
use socket2::{Domain, Protocol, Socket, Type};
use std::io;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr, SocketAddrV4, SocketAddrV6};
use tokio::net::UdpSocket;
use tracing::debug;

/// Open a socket that receives and sends on the IPv4 mDNS `group` through
/// `interface`.
///
/// Must be called from within a tokio runtime.
pub fn open_ipv4_group_socket(
    group: SocketAddrV4,
    interface: &ResolvedInterface,
) -> Result<UdpSocket, DomainError> {
    let setup = |e: io::Error| DomainError::SocketSetup {
        group: group.to_string(),
        reason: e.to_string(),
    };

    let bind_addr = SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, group.port());
    let socket = new_reusable_socket(bind_addr.into()).map_err(setup)?;

    socket
        .join_multicast_v4(group.ip(), &interface.ipv4)
        .map_err(setup)?;
    socket
        .set_multicast_if_v4(&interface.ipv4)
        .map_err(setup)?;
    socket.set_multicast_loop_v4(false).map_err(setup)?;

    debug!(group = %group, interface = %interface.name, "Joined IPv4 multicast group");
    into_tokio(socket).map_err(setup)
}

/// Open a socket that receives and sends on the IPv6 mDNS `group` through
/// `interface`.
///
/// Must be called from within a tokio runtime.
pub fn open_ipv6_group_socket(
    group: SocketAddrV6,
    interface: &ResolvedInterface,
) -> Result<UdpSocket, DomainError> {
    let setup = |e: io::Error| DomainError::SocketSetup {
        group: group.to_string(),
        reason: e.to_string(),
    };

    let bind_addr = SocketAddrV6::new(Ipv6Addr::UNSPECIFIED, group.port(), 0, 0);
    let socket = new_reusable_socket(bind_addr.into()).map_err(setup)?;

    socket
        .join_multicast_v6(group.ip(), interface.index)
        .map_err(setup)?;
    socket
        .set_multicast_if_v6(interface.index)
        .map_err(setup)?;
    socket.set_multicast_loop_v6(false).map_err(setup)?;

    debug!(group = %group, interface = %interface.name, "Joined IPv6 multicast group");
    into_tokio(socket).map_err(setup)
}

/// Other mDNS stacks on the host bind the same port, so both reuse options
/// are required.
fn new_reusable_socket(bind_addr: SocketAddr) -> io::Result<Socket> {
    let domain = if bind_addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };

    let socket = Socket::new(domain, Type::DGRAM, Some(Protocol::UDP))?;
    if bind_addr.is_ipv6() {
        socket.set_only_v6(true)?;
    }
    socket.set_reuse_address(true)?;
    #[cfg(unix)]
    socket.set_reuse_port(true)?;
    #[cfg(target_os = "linux")]
    deliver_joined_groups_only(&socket, bind_addr)?;
    socket.bind(&bind_addr.into())?;
    socket.set_nonblocking(true)?;
    Ok(socket)
}

/// Linux hands a wildcard-bound socket datagrams for every group joined on the
/// host unless told otherwise.
#[cfg(target_os = "linux")]
fn deliver_joined_groups_only(socket: &Socket, bind_addr: SocketAddr) -> io::Result<()> {
    if bind_addr.is_ipv4() {
        socket.set_multicast_all_v4(false)
    } else {
        socket.set_multicast_all_v6(false)
    }
}

fn into_tokio(socket: Socket) -> io::Result<UdpSocket> {
    let std_socket: std::net::UdpSocket = socket.into();
    UdpSocket::from_std(std_socket)
}
