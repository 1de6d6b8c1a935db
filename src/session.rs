//! Single-instance enforcement and the show/hide remote-control protocol.
//!
//! One process per user session owns an exclusive PID lock file. Later
//! invocations read the owner's PID from it and relay a control signal
//! instead of starting a second instance.

use log::{info, warn};
use nix::sys::signal::{self, SigSet, Signal};
use nix::unistd::Pid;
use std::fs::{self, OpenOptions};
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::thread;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("resident instance already running (PID {0})")]
    AlreadyRunning(i32),
    #[error("failed to relay {msg:?} to PID {pid}: {source}")]
    Relay {
        msg: ControlMsg,
        pid: i32,
        source: nix::Error,
    },
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// A control request delivered to (or relayed towards) the lock owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlMsg {
    Terminate,
    Toggle,
    Open,
    Close,
}

impl ControlMsg {
    pub fn signal(self) -> Signal {
        match self {
            ControlMsg::Terminate => Signal::SIGTERM,
            ControlMsg::Toggle => Signal::SIGUSR1,
            ControlMsg::Open => Signal::SIGUSR2,
            ControlMsg::Close => Signal::SIGHUP,
        }
    }

    pub fn from_signal(sig: Signal) -> Option<Self> {
        match sig {
            Signal::SIGTERM => Some(ControlMsg::Terminate),
            Signal::SIGUSR1 => Some(ControlMsg::Toggle),
            Signal::SIGUSR2 => Some(ControlMsg::Open),
            Signal::SIGHUP => Some(ControlMsg::Close),
            _ => None,
        }
    }
}

/// Outcome of trying to become the lock owner.
#[derive(Debug)]
pub enum Ownership {
    Owned(LockFile),
    /// Somebody else holds the lock; their PID.
    Held { pid: i32 },
}

/// The held lock. Removed again on drop.
#[derive(Debug)]
pub struct LockFile {
    path: PathBuf,
}

impl LockFile {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for LockFile {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.path);
    }
}

/// Exclusive-create the lock file, recording our PID in it.
///
/// A lock held by a PID that no longer exists is treated as stale: the file
/// is removed and the create retried once. Requesting resident mode while
/// another instance holds the lock is an error; only one resident instance
/// is allowed.
pub fn acquire(path: &Path, resident: bool) -> Result<Ownership, SessionError> {
    match try_create(path) {
        Ok(lock) => Ok(Ownership::Owned(lock)),
        Err(err) if err.kind() == ErrorKind::AlreadyExists => {
            let pid = read_pid(path)?;
            if signal::kill(Pid::from_raw(pid), None).is_err() {
                warn!("removing stale lock file (PID {pid} is gone)");
                fs::remove_file(path)?;
                return Ok(Ownership::Owned(try_create(path)?));
            }
            if resident {
                return Err(SessionError::AlreadyRunning(pid));
            }
            Ok(Ownership::Held { pid })
        }
        Err(err) => Err(err.into()),
    }
}

fn try_create(path: &Path) -> io::Result<LockFile> {
    let mut file = OpenOptions::new().write(true).create_new(true).open(path)?;
    file.write_all(std::process::id().to_string().as_bytes())?;
    Ok(LockFile {
        path: path.to_path_buf(),
    })
}

fn read_pid(path: &Path) -> io::Result<i32> {
    let text = fs::read_to_string(path)?;
    text.trim()
        .parse()
        .map_err(|_| io::Error::new(ErrorKind::InvalidData, "lock file holds no PID"))
}

/// Send one control signal to the running owner.
pub fn relay(pid: i32, msg: ControlMsg) -> Result<(), SessionError> {
    let verb = match msg {
        ControlMsg::Terminate => "terminating",
        ControlMsg::Toggle => "toggling",
        ControlMsg::Open => "showing",
        ControlMsg::Close => "closing",
    };
    info!("{verb} resident instance (PID {pid})");
    signal::kill(Pid::from_raw(pid), msg.signal()).map_err(|source| SessionError::Relay {
        msg,
        pid,
        source,
    })
}

/// Mask the control signals on the calling thread and hand them to a
/// dedicated waiter thread that forwards them into the event loop.
///
/// Must run before any other thread starts so the mask is inherited and no
/// signal is ever handled in an async context.
pub fn spawn_signal_listener(
    tx: calloop::channel::Sender<ControlMsg>,
) -> nix::Result<()> {
    let mut set = SigSet::empty();
    for msg in [
        ControlMsg::Terminate,
        ControlMsg::Toggle,
        ControlMsg::Open,
        ControlMsg::Close,
    ] {
        set.add(msg.signal());
    }
    set.thread_block()?;

    thread::spawn(move || {
        loop {
            let sig = match set.wait() {
                Ok(sig) => sig,
                Err(err) => {
                    warn!("waiting for signals failed: {err}");
                    return;
                }
            };
            let Some(msg) = ControlMsg::from_signal(sig) else {
                info!("unhandled signal: {sig}");
                continue;
            };
            if tx.send(msg).is_err() {
                return;
            }
        }
    });
    Ok(())
}

/// What the event loop must do after a control message was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    None,
    Show {
        refresh_index: bool,
        refresh_pins: bool,
    },
    Hide,
    Quit,
}

/// The resident/transient state machine. Owns the visibility and dirty
/// flags; the event loop owns everything the flags refer to.
pub struct Session {
    lock: LockFile,
    resident: bool,
    visible: bool,
    index_dirty: bool,
    pins_dirty: bool,
}

impl Session {
    pub fn new(lock: LockFile, resident: bool) -> Self {
        Self {
            lock,
            resident,
            visible: false,
            index_dirty: false,
            pins_dirty: false,
        }
    }

    pub fn is_resident(&self) -> bool {
        self.resident
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn lock(&self) -> &LockFile {
        &self.lock
    }

    pub fn mark_index_dirty(&mut self) {
        self.index_dirty = true;
    }

    pub fn mark_pins_dirty(&mut self) {
        self.pins_dirty = true;
    }

    /// Initial presentation at startup; nothing can be dirty yet.
    pub fn startup(&mut self) -> Transition {
        self.show()
    }

    pub fn handle(&mut self, msg: ControlMsg) -> Transition {
        match msg {
            ControlMsg::Terminate => {
                info!("terminate received, bye bye");
                Transition::Quit
            }
            ControlMsg::Toggle => {
                if !self.resident {
                    info!("toggle received, and I'm not resident, bye bye");
                    return Transition::Quit;
                }
                if self.visible { self.hide() } else { self.show() }
            }
            ControlMsg::Open => {
                if !self.resident {
                    info!("open received, and I'm not resident, doing nothing");
                    return Transition::None;
                }
                if self.visible {
                    Transition::None
                } else {
                    self.show()
                }
            }
            ControlMsg::Close => {
                if !self.resident {
                    info!("close received, and I'm not resident, bye bye");
                    return Transition::Quit;
                }
                if self.visible {
                    self.hide()
                } else {
                    Transition::None
                }
            }
        }
    }

    /// Becoming visible drains the dirty flags; the loop rebuilds first.
    fn show(&mut self) -> Transition {
        self.visible = true;
        Transition::Show {
            refresh_index: std::mem::take(&mut self.index_dirty),
            refresh_pins: std::mem::take(&mut self.pins_dirty),
        }
    }

    fn hide(&mut self) -> Transition {
        self.visible = false;
        Transition::Hide
    }
}
