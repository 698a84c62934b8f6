use crate::error::{FilterError, FilterResult};

/// Gap (bp) below which the parts of a joined location are merged.
pub const DEFAULT_CUTOFF_DISTANCE: usize = 100;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FilterConfig {
    pub cutoff_distance: usize,
}

impl FilterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cutoff_distance(mut self, cutoff_distance: usize) -> Self {
        self.cutoff_distance = cutoff_distance;
        self
    }

    pub fn validate(&self) -> FilterResult<()> {
        if self.cutoff_distance == 0 {
            return Err(FilterError::InvalidCutoff {
                cutoff: self.cutoff_distance,
            });
        }
        Ok(())
    }
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            cutoff_distance: DEFAULT_CUTOFF_DISTANCE,
        }
    }
}
