use socket2::SockRef;
use std::io;

/// Set the IP TTL (IPv4) or unicast hop limit (IPv6) on a socket
///
/// The value is passed through as-is. TTL 0 is not special-cased here; if the
/// platform rejects it, the OS error is returned to the caller.
pub fn set_ttl(socket: &SockRef<'_>, ttl: u8, ipv6: bool) -> io::Result<()> {
    if ipv6 {
        socket.set_unicast_hops_v6(ttl as u32)
    } else {
        socket.set_ttl(ttl as u32)
    }
}

/// Pre-connect hook that pins the outbound TTL to `ttl`
///
/// Runs against the raw, not-yet-connected descriptor. Any failure to set the
/// option is returned so the attempt fails instead of connecting with the
/// default TTL.
pub fn ttl_hook(ttl: u8, ipv6: bool) -> impl FnOnce(SockRef<'_>) -> io::Result<()> {
    move |socket| set_ttl(&socket, ttl, ipv6)
}

#[cfg(test)]
mod tests {
    use super::*;
    use socket2::{Domain, Protocol, Socket, Type};

    fn tcp_socket(ipv6: bool) -> Socket {
        let domain = if ipv6 { Domain::IPV6 } else { Domain::IPV4 };
        Socket::new(domain, Type::STREAM, Some(Protocol::TCP)).unwrap()
    }

    #[test]
    fn test_ttl_hook_sets_ipv4_ttl() {
        let socket = tcp_socket(false);
        ttl_hook(7, false)(SockRef::from(&socket)).unwrap();
        assert_eq!(socket.ttl().unwrap(), 7);
    }

    #[test]
    fn test_ttl_hook_sets_max_ttl() {
        let socket = tcp_socket(false);
        ttl_hook(255, false)(SockRef::from(&socket)).unwrap();
        assert_eq!(socket.ttl().unwrap(), 255);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_ttl_zero_rejected_on_linux() {
        let socket = tcp_socket(false);
        let err = ttl_hook(0, false)(SockRef::from(&socket)).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }
}
