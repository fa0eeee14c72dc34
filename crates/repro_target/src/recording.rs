//! Recording test double.

use crate::target::FuzzTarget;

/// Target that records every call it receives
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordingTarget {
    /// Arguments of each init call, in order
    pub init_calls: Vec<Vec<String>>,
    /// Every buffer passed to `test_one_input`, in order
    pub inputs: Vec<Vec<u8>>,
    /// Value returned from `test_one_input`
    pub status: i32,
}

impl RecordingTarget {
    /// Create a recorder returning 0
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a recorder returning `status` from every input
    #[must_use]
    pub fn returning(status: i32) -> Self {
        Self {
            status,
            ..Self::default()
        }
    }

    /// Number of init hook calls
    #[must_use]
    pub fn init_count(&self) -> usize {
        self.init_calls.len()
    }

    /// Number of `test_one_input` calls
    #[must_use]
    pub fn invocation_count(&self) -> usize {
        self.inputs.len()
    }
}

impl FuzzTarget for RecordingTarget {
    fn name(&self) -> &str {
        "recording"
    }

    fn initialize(&mut self, args: &[String]) -> i32 {
        self.init_calls.push(args.to_vec());
        0
    }

    fn test_one_input(&mut self, data: &[u8]) -> i32 {
        self.inputs.push(data.to_vec());
        self.status
    }
}
