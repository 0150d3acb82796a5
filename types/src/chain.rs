//! Read-only view of the chain index consumed by the retarget rules.

use serde::{Deserialize, Serialize};

use crate::compact::CompactTarget;

/// The fields of an indexed block that difficulty retargeting reads.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockTimeSample {
    pub height: u32,
    pub time: i64,
    pub bits: CompactTarget,
}

impl BlockTimeSample {
    pub fn new(height: u32, time: i64, bits: CompactTarget) -> Self {
        Self { height, time, bits }
    }
}

/// Ancestor lookup by height over a stable chain snapshot.
///
/// Implementations must return `None` for heights above the snapshot's tip.
/// The snapshot must not change while a single retarget computation runs.
pub trait AncestorLookup {
    fn ancestor(&self, height: u32) -> Option<BlockTimeSample>;
}

impl<T: AncestorLookup + ?Sized> AncestorLookup for &T {
    fn ancestor(&self, height: u32) -> Option<BlockTimeSample> {
        (**self).ancestor(height)
    }
}
