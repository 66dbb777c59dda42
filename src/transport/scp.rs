//! SCP transport over ssh2
//!
//! Establishes a TCP connection, performs the SSH handshake, and
//! authenticates with either a password or in-memory private key
//! material. Files are streamed through an `scp_send` channel in
//! fixed-size chunks, with a progress event after every chunk.

use crate::credential::Credential;
use crate::error::{Result, ScputError};
use crate::transport::{TransferObserver, Transport};
use ssh2::Session;
use std::io::{Read, Write};
use std::net::TcpStream;
use std::path::Path;

/// Upload chunk size; one progress event fires per chunk
const CHUNK_SIZE: usize = 1024 * 1024;

/// SSH/SCP transport session
pub struct ScpTransport {
    host: String,
    port: u16,
    username: String,
    credential: Credential,
    session: Option<Session>,
}

impl ScpTransport {
    /// Create a transport for the given endpoint and credential.
    ///
    /// No network activity happens until [`Transport::connect`].
    pub fn new(host: impl Into<String>, port: u16, username: impl Into<String>, credential: Credential) -> Self {
        Self {
            host: host.into(),
            port,
            username: username.into(),
            credential,
            session: None,
        }
    }

    fn authenticate(&self, session: &Session) -> Result<()> {
        match &self.credential {
            Credential::Password(password) => session
                .userauth_password(&self.username, password)
                .map_err(|e| ScputError::auth(&self.username, &self.host, e.to_string())),
            Credential::Key { username, key } => {
                let key = std::str::from_utf8(key).map_err(|_| {
                    ScputError::auth(username, &self.host, "private key is not valid UTF-8")
                })?;
                session
                    .userauth_pubkey_memory(username, None, key, None)
                    .map_err(|e| ScputError::auth(username, &self.host, e.to_string()))
            }
        }
    }
}

impl Transport for ScpTransport {
    fn connect(&mut self) -> Result<()> {
        let addr = format!("{}:{}", self.host, self.port);
        let tcp = TcpStream::connect(&addr)
            .map_err(|e| ScputError::connection(&self.host, e.to_string()))?;

        let mut session =
            Session::new().map_err(|e| ScputError::connection(&self.host, e.to_string()))?;
        session.set_tcp_stream(tcp);
        session
            .handshake()
            .map_err(|e| ScputError::connection(&self.host, e.to_string()))?;

        self.authenticate(&session)?;

        tracing::debug!(host = %self.host, port = self.port, "ssh session established");
        self.session = Some(session);
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.session
            .as_ref()
            .map(|s| s.authenticated())
            .unwrap_or(false)
    }

    fn upload(
        &mut self,
        local: &Path,
        remote_dir: &str,
        observer: &mut dyn TransferObserver,
    ) -> Result<u64> {
        let session = self
            .session
            .as_ref()
            .ok_or_else(|| ScputError::connection(&self.host, "session not established"))?;

        let filename = local.display().to_string();
        let file = std::fs::File::open(local).map_err(|e| ScputError::io(local, e))?;
        let total = file
            .metadata()
            .map_err(|e| ScputError::io(local, e))?
            .len();

        let file_name = local
            .file_name()
            .ok_or_else(|| ScputError::Transfer(format!("not a file: {}", filename)))?;
        let remote_path = Path::new(remote_dir).join(file_name);

        let mut channel = session
            .scp_send(&remote_path, 0o644, total, None)
            .map_err(|e| ScputError::Transfer(e.to_string()))?;

        let mut reader = std::io::BufReader::with_capacity(CHUNK_SIZE, file);
        let mut buffer = vec![0u8; CHUNK_SIZE];
        let mut uploaded = 0u64;

        loop {
            let bytes_read = reader
                .read(&mut buffer)
                .map_err(|e| ScputError::io(local, e))?;
            if bytes_read == 0 {
                break;
            }

            channel
                .write_all(&buffer[..bytes_read])
                .map_err(|e| ScputError::Transfer(e.to_string()))?;

            uploaded += bytes_read as u64;
            observer.on_progress(&filename, uploaded, total);
        }

        if total == 0 {
            // Zero-length files produce no chunks; still report completion
            observer.on_progress(&filename, 0, 0);
        }

        let scp_err = |e: ssh2::Error| ScputError::Transfer(e.to_string());
        channel.send_eof().map_err(scp_err)?;
        channel.wait_eof().map_err(scp_err)?;
        channel.close().map_err(scp_err)?;
        channel.wait_close().map_err(scp_err)?;

        Ok(uploaded)
    }

    fn disconnect(&mut self) -> Result<()> {
        if let Some(session) = self.session.take() {
            session
                .disconnect(None, "done", None)
                .map_err(|e| ScputError::connection(&self.host, e.to_string()))?;
        }
        Ok(())
    }
}

impl Drop for ScpTransport {
    fn drop(&mut self) {
        // Session release must not depend on the happy path
        if let Some(session) = self.session.take() {
            let _ = session.disconnect(None, "done", None);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_connected_before_connect() {
        let transport = ScpTransport::new(
            "localhost",
            22,
            "user",
            Credential::Password("secret".into()),
        );
        assert!(!transport.is_connected());
    }

    #[test]
    fn test_upload_without_session_fails() {
        struct Sink;
        impl TransferObserver for Sink {
            fn on_progress(&mut self, _: &str, _: u64, _: u64) {}
            fn on_error(&mut self, _: &str) {}
        }

        let mut transport = ScpTransport::new(
            "localhost",
            22,
            "user",
            Credential::Password("secret".into()),
        );
        let err = transport
            .upload(Path::new("a.txt"), "/tmp", &mut Sink)
            .unwrap_err();
        assert!(matches!(err, ScputError::ConnectionFailed { .. }));
    }

    #[test]
    fn test_disconnect_without_session_is_a_no_op() {
        let mut transport = ScpTransport::new(
            "localhost",
            22,
            "user",
            Credential::Password("secret".into()),
        );
        assert!(transport.disconnect().is_ok());
    }
}
