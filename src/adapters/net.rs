//! Primary-interface IP lookup for the standby screen.

use std::net::UdpSocket;

/// Address of the interface that routes to the wider network, or
/// `Not connected`.
///
/// Connecting a UDP socket transmits nothing; it only asks the kernel
/// to pick a route, which reveals the source address that a default
/// route would use. Works the same for WiFi and wired interfaces.
pub fn local_ip() -> String {
    let probed = UdpSocket::bind("0.0.0.0:0").and_then(|socket| {
        socket.connect("8.8.8.8:53")?;
        socket.local_addr()
    });
    match probed {
        Ok(addr) if !addr.ip().is_unspecified() => addr.ip().to_string(),
        _ => "Not connected".to_owned(),
    }
}
