//! Listening-port inspection.

use std::net::TcpListener;

/// Check whether some process holds a listening socket on `port`.
///
/// Attempts a loopback bind; a failed bind means the port is taken by a
/// listener. The probe only ever uses this as a positive signal, so a
/// bind refused for other reasons (e.g. privileged ports) errs on the
/// side of reporting a listener.
pub fn port_has_listener(port: u16) -> bool {
    match TcpListener::bind(("127.0.0.1", port)) {
        Ok(listener) => listener.local_addr().is_err(),
        Err(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bound_port_is_reported_as_listening() {
        let listener = TcpListener::bind(("127.0.0.1", 0)).unwrap();
        let port = listener.local_addr().unwrap().port();
        assert!(port_has_listener(port));
        drop(listener);
    }
}
