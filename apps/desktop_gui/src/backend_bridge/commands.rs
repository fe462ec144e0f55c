//! Backend commands queued from UI to backend worker.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendCommand {
    Submit,
    Reset,
}

impl BackendCommand {
    pub fn name(self) -> &'static str {
        match self {
            Self::Submit => "submit",
            Self::Reset => "reset",
        }
    }
}
