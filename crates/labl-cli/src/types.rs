use std::path::PathBuf;

use labl_map::MappingState;
use labl_model::{CanonicalField, MappingProfile};

/// Outcome of mapping one file.
#[derive(Debug)]
pub struct SuggestResult {
    pub file: PathBuf,
    pub state: MappingState,
    /// Profile applied instead of auto-mapping, if any.
    pub profile: Option<MappingProfile>,
    /// Profile fields whose header is absent from the file.
    pub dropped: Vec<CanonicalField>,
}

impl SuggestResult {
    pub fn is_complete(&self) -> bool {
        self.state.is_complete()
    }

    /// 0 when every required field is mapped, 1 otherwise.
    pub fn exit_code(&self) -> i32 {
        i32::from(!self.is_complete())
    }
}
