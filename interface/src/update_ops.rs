use lab_engine::bench::BenchAction;

// emitted by widgets while a frame is drawn, applied once it is done
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabOps {
    Bench(BenchAction),
    Advance,
    ResetExperiment,
    ResetAll,
    Select(usize),
}

#[derive(Debug, PartialEq, Eq)]
pub enum SyncState {
    Synced,
    Error(String),
}

impl SyncState {
    pub fn is_synced(&self) -> bool {
        matches!(self, SyncState::Synced)
    }
    pub fn is_error(&self) -> bool {
        matches!(self, SyncState::Error(_))
    }
    pub fn error_msg(&self) -> &str {
        if let SyncState::Error(msg) = self {
            msg
        } else {
            ""
        }
    }
}
