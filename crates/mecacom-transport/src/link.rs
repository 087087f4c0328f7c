use std::io::{ErrorKind, Read, Write};
use std::net::{SocketAddr, TcpStream, ToSocketAddrs, UdpSocket};
use std::time::Duration;

use tracing::{debug, info};

use crate::error::{Result, TransportError};

/// The transport handle for one client session.
///
/// Either a connected TCP stream or a UDP socket bound to an unspecified
/// local port with a fixed destination. The link is exclusively owned; the
/// socket closes when the link drops, on every exit path.
pub struct CommandLink {
    inner: LinkInner,
    peer: SocketAddr,
}

enum LinkInner {
    Tcp(TcpStream),
    Udp(UdpSocket),
}

impl CommandLink {
    /// Connect a TCP stream to the bridge.
    ///
    /// An actively refused connection becomes [`TransportError::Refused`];
    /// any other connect failure is propagated unmodified as I/O.
    pub fn connect_tcp(host: &str, port: u16) -> Result<Self> {
        let addr = resolve(host, port)?;
        let stream = TcpStream::connect(addr).map_err(|err| {
            if err.kind() == ErrorKind::ConnectionRefused {
                TransportError::Refused { addr }
            } else {
                TransportError::Io(err)
            }
        })?;
        info!(%addr, "connected to bridge over tcp");
        Ok(Self {
            inner: LinkInner::Tcp(stream),
            peer: addr,
        })
    }

    /// Open a UDP socket aimed at the bridge. No handshake takes place.
    pub fn open_udp(host: &str, port: u16) -> Result<Self> {
        let addr = resolve(host, port)?;
        let socket = UdpSocket::bind(("0.0.0.0", 0)).map_err(TransportError::Bind)?;
        debug!(%addr, "datagram socket opened");
        Ok(Self {
            inner: LinkInner::Udp(socket),
            peer: addr,
        })
    }

    /// Whether this link sends datagrams (UDP) rather than stream writes.
    pub fn is_datagram(&self) -> bool {
        matches!(self.inner, LinkInner::Udp(_))
    }

    /// The bridge address this link targets.
    pub fn peer_addr(&self) -> SocketAddr {
        self.peer
    }

    /// Transport name for diagnostics.
    pub fn transport_name(&self) -> &'static str {
        match self.inner {
            LinkInner::Tcp(_) => "tcp",
            LinkInner::Udp(_) => "udp",
        }
    }

    /// Transmit one frame: a full write on TCP, one datagram on UDP.
    pub fn transmit(&mut self, bytes: &[u8]) -> Result<()> {
        match &mut self.inner {
            LinkInner::Tcp(stream) => {
                let mut offset = 0usize;
                while offset < bytes.len() {
                    match stream.write(&bytes[offset..]) {
                        Ok(0) => return Err(TransportError::Closed),
                        Ok(n) => offset += n,
                        Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                        Err(err) if err.kind() == ErrorKind::WouldBlock => continue,
                        Err(err) => return Err(TransportError::Io(err)),
                    }
                }
                loop {
                    match stream.flush() {
                        Ok(()) => return Ok(()),
                        Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                        Err(err) => return Err(TransportError::Io(err)),
                    }
                }
            }
            LinkInner::Udp(socket) => {
                let sent = socket.send_to(bytes, self.peer)?;
                if sent != bytes.len() {
                    return Err(TransportError::Io(std::io::Error::new(
                        ErrorKind::WriteZero,
                        format!("short datagram write ({sent} of {} bytes)", bytes.len()),
                    )));
                }
                Ok(())
            }
        }
    }

    /// Set a read timeout on the TCP stream (handshake hardening knob).
    /// No-op on UDP; the client never reads from a datagram link.
    pub fn set_read_timeout(&self, timeout: Option<Duration>) -> Result<()> {
        match &self.inner {
            LinkInner::Tcp(stream) => stream.set_read_timeout(timeout).map_err(Into::into),
            LinkInner::Udp(_) => Ok(()),
        }
    }

    /// Set a write timeout on the TCP stream. No-op on UDP.
    pub fn set_write_timeout(&self, timeout: Option<Duration>) -> Result<()> {
        match &self.inner {
            LinkInner::Tcp(stream) => stream.set_write_timeout(timeout).map_err(Into::into),
            LinkInner::Udp(_) => Ok(()),
        }
    }

    /// Try to clone this link (creates a new file descriptor on the same
    /// socket). Used to split the TCP stream for the handshake reader.
    pub fn try_clone(&self) -> Result<Self> {
        let inner = match &self.inner {
            LinkInner::Tcp(stream) => LinkInner::Tcp(stream.try_clone()?),
            LinkInner::Udp(socket) => LinkInner::Udp(socket.try_clone()?),
        };
        Ok(Self {
            inner,
            peer: self.peer,
        })
    }

    /// Shut down the TCP stream in both directions. Idempotent; no-op on
    /// UDP. The socket itself is released on drop regardless.
    pub fn shutdown(&self) -> Result<()> {
        match &self.inner {
            LinkInner::Tcp(stream) => match stream.shutdown(std::net::Shutdown::Both) {
                Ok(()) => Ok(()),
                Err(err) if err.kind() == ErrorKind::NotConnected => Ok(()),
                Err(err) => Err(TransportError::Io(err)),
            },
            LinkInner::Udp(_) => Ok(()),
        }
    }
}

impl Read for CommandLink {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        match &mut self.inner {
            LinkInner::Tcp(stream) => stream.read(buf),
            LinkInner::Udp(_) => Err(std::io::Error::new(
                ErrorKind::Unsupported,
                "datagram command link is write-only",
            )),
        }
    }
}

impl Write for CommandLink {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        match &mut self.inner {
            LinkInner::Tcp(stream) => stream.write(buf),
            LinkInner::Udp(socket) => socket.send_to(buf, self.peer),
        }
    }

    fn flush(&mut self) -> std::io::Result<()> {
        match &mut self.inner {
            LinkInner::Tcp(stream) => stream.flush(),
            LinkInner::Udp(_) => Ok(()),
        }
    }
}

impl std::fmt::Debug for CommandLink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandLink")
            .field("transport", &self.transport_name())
            .field("peer", &self.peer)
            .finish()
    }
}

fn resolve(host: &str, port: u16) -> Result<SocketAddr> {
    (host, port)
        .to_socket_addrs()?
        .next()
        .ok_or_else(|| TransportError::Resolve {
            host: host.to_string(),
            port,
        })
}

#[cfg(test)]
mod tests {
    use std::io::Read;
    use std::net::{TcpListener, UdpSocket};
    use std::thread;

    use super::*;

    #[test]
    fn tcp_connect_and_transmit() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();

        let server = thread::spawn(move || {
            let (mut stream, _addr) = listener.accept().unwrap();
            let mut buf = vec![0u8; 32];
            let n = stream.read(&mut buf).unwrap();
            buf.truncate(n);
            buf
        });

        let mut link = CommandLink::connect_tcp("127.0.0.1", port).unwrap();
        assert!(!link.is_datagram());
        assert_eq!(link.transport_name(), "tcp");
        link.transmit(b"STOPZERO\r\n").unwrap();
        drop(link);

        assert_eq!(server.join().unwrap(), b"STOPZERO\r\n");
    }

    #[test]
    fn tcp_refused_is_typed() {
        // Bind then drop to obtain a port with no listener.
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let err = CommandLink::connect_tcp("127.0.0.1", port).unwrap_err();
        assert!(matches!(err, TransportError::Refused { .. }));
    }

    #[test]
    fn udp_transmit_reaches_peer() {
        let receiver = UdpSocket::bind("127.0.0.1:0").unwrap();
        let port = receiver.local_addr().unwrap().port();

        let mut link = CommandLink::open_udp("127.0.0.1", port).unwrap();
        assert!(link.is_datagram());
        link.transmit(b"\x00\x01ROT00600\xAB\xCD").unwrap();

        let mut buf = [0u8; 64];
        let (n, _from) = receiver.recv_from(&mut buf).unwrap();
        assert_eq!(&buf[..n], b"\x00\x01ROT00600\xAB\xCD");
    }

    #[test]
    fn udp_link_is_write_only() {
        let receiver = UdpSocket::bind("127.0.0.1:0").unwrap();
        let mut link =
            CommandLink::open_udp("127.0.0.1", receiver.local_addr().unwrap().port()).unwrap();

        let mut buf = [0u8; 8];
        let err = link.read(&mut buf).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unsupported);
    }

    #[test]
    fn shutdown_is_idempotent() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        let accept = thread::spawn(move || {
            let _ = listener.accept();
        });

        let link = CommandLink::connect_tcp("127.0.0.1", port).unwrap();
        accept.join().unwrap();
        link.shutdown().unwrap();
        link.shutdown().unwrap();
    }

    #[test]
    fn unresolvable_host_is_typed() {
        let err = CommandLink::open_udp("no-such-host.invalid", 3475).unwrap_err();
        assert!(matches!(
            err,
            TransportError::Resolve { .. } | TransportError::Io(_)
        ));
    }
}
