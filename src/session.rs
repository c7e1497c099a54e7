use log::{error, info, warn};
use std::future::Future;
use std::net::IpAddr;
use std::path::{Path, PathBuf};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// How the next data connection will be established.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionMode {
    Normal,  // no data channel armed
    Passive, // PASV received, server listens
    Port,    // PORT received, server would connect out (not implemented)
}

/// Per-control-connection state.
///
/// Owned by the control connection for its whole lifetime. `close` must be
/// awaited before the session goes away so that no transfer worker outlives it.
#[derive(Debug)]
pub struct Session {
    pub authenticated: bool,
    pub user: Option<String>,
    mode: ConnectionMode,
    pasv_listener: Option<TcpListener>,
    workers: Vec<JoinHandle<()>>,
    current_dir: PathBuf,
    peer_ip: IpAddr,
}

impl Session {
    pub fn new(peer_ip: IpAddr, current_dir: PathBuf) -> Self {
        Self {
            authenticated: false,
            user: None,
            mode: ConnectionMode::Normal,
            pasv_listener: None,
            workers: Vec::new(),
            current_dir,
            peer_ip,
        }
    }

    pub fn mode(&self) -> ConnectionMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: ConnectionMode) {
        self.mode = mode;
    }

    pub fn current_dir(&self) -> &Path {
        &self.current_dir
    }

    pub fn set_current_dir(&mut self, dir: PathBuf) {
        self.current_dir = dir;
    }

    pub fn peer_ip(&self) -> IpAddr {
        self.peer_ip
    }

    /// Arms a new passive listener. Any listener still pending is dropped,
    /// which closes its socket.
    pub fn set_passive_listener(&mut self, listener: TcpListener) {
        if self.pasv_listener.replace(listener).is_some() {
            info!("Replaced pending passive listener");
        }
        self.mode = ConnectionMode::Passive;
    }

    /// Closes the pending passive listener, if any, without touching the mode.
    pub fn clear_passive_listener(&mut self) {
        self.pasv_listener = None;
    }

    pub fn has_pending_passive(&self) -> bool {
        self.pasv_listener.is_some()
    }

    /// Hands the pending listener to whoever accepts the data connection and
    /// resets the mode, so the listener is consumed exactly once.
    pub fn take_passive_listener(&mut self) -> Option<TcpListener> {
        self.mode = ConnectionMode::Normal;
        self.pasv_listener.take()
    }

    /// Spawns a transfer worker tied to this session.
    pub fn spawn_worker<F>(&mut self, worker: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.workers.retain(|handle| !handle.is_finished());
        self.workers.push(tokio::spawn(worker));
    }

    pub fn active_workers(&self) -> usize {
        self.workers.iter().filter(|handle| !handle.is_finished()).count()
    }

    /// Tears the session down, waiting for every transfer worker to finish.
    pub async fn close(&mut self) {
        self.clear_passive_listener();
        self.mode = ConnectionMode::Normal;

        let workers = std::mem::take(&mut self.workers);
        let count = workers.len();
        for worker in workers {
            if let Err(e) = worker.await {
                error!("Transfer worker ended abnormally: {}", e);
            }
        }
        info!("Worker tasks cleanup complete ({} joined)", count);
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        let pending = self.workers.iter().filter(|h| !h.is_finished()).count();
        if pending > 0 {
            warn!(
                "Session dropped without close, {} transfer worker(s) detached",
                pending
            );
        }
    }
}
