//! Single-instance guard.
//!
//! On Linux the lock is an abstract Unix datagram socket: binding fails while
//! another process holds the name, and the kernel releases it when the socket
//! closes, including on crashes.

use std::io;

/// Held for the lifetime of the process; dropping it releases the name.
pub struct SingletonLock {
    #[cfg(target_os = "linux")]
    _socket: std::os::unix::net::UnixDatagram,
}

/// Try to take the process-wide lock `name`.
///
/// `Ok(None)` means another instance already holds it.
#[cfg(target_os = "linux")]
pub fn acquire_singleton_lock(name: &str) -> io::Result<Option<SingletonLock>> {
    use std::os::linux::net::SocketAddrExt;
    use std::os::unix::net::{SocketAddr, UnixDatagram};

    let addr = SocketAddr::from_abstract_name(name.as_bytes())?;
    match UnixDatagram::bind_addr(&addr) {
        Ok(socket) => Ok(Some(SingletonLock { _socket: socket })),
        Err(e) if e.kind() == io::ErrorKind::AddrInUse => Ok(None),
        Err(e) => Err(e),
    }
}

/// Abstract sockets are Linux-only; elsewhere every launch gets the lock.
#[cfg(not(target_os = "linux"))]
pub fn acquire_singleton_lock(_name: &str) -> io::Result<Option<SingletonLock>> {
    Ok(Some(SingletonLock {}))
}
