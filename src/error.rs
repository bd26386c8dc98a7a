use crate::core::Pid;

pub type Result<T> = std::result::Result<T, SimError>;

#[derive(Debug, thiserror::Error)]
pub enum SimError {
    #[error("core capacity must be at least 1, got {0}")]
    InvalidCapacity(usize),

    #[error("invalid process {pid}: {reason}")]
    InvalidProcessSpec { pid: Pid, reason: String },

    #[error("no processes to simulate")]
    EmptyWorkload,

    #[error("latest arrival plus total burst time overflows the tick counter")]
    HorizonOverflow,

    #[error("line {line}: {msg}")]
    Parse { line: usize, msg: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SimError {
    pub fn invalid_spec<S: Into<String>>(pid: Pid, reason: S) -> Self {
        SimError::InvalidProcessSpec {
            pid,
            reason: reason.into(),
        }
    }

    pub fn parse<S: Into<String>>(line: usize, msg: S) -> Self {
        SimError::Parse {
            line,
            msg: msg.into(),
        }
    }
}
