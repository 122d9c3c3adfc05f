//! Creation-time configuration for `ChainTable`.

use crate::error::TableError;

/// Number of slots allocated when no capacity is given.
pub const DEFAULT_CAPACITY: usize = 16;

/// Load factor above which the table doubles its slot array.
pub const DEFAULT_MAX_LOAD_FACTOR: f64 = 0.75;

/// Initial capacity and growth threshold. Applied once, at creation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableConfig {
    pub initial_capacity: usize,
    pub max_load_factor: f64,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_CAPACITY,
            max_load_factor: DEFAULT_MAX_LOAD_FACTOR,
        }
    }
}

impl TableConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    pub fn with_max_load_factor(mut self, max_load_factor: f64) -> Self {
        self.max_load_factor = max_load_factor;
        self
    }

    /// Rejects a zero capacity and load factors outside `(0, 1]`.
    pub fn validate(&self) -> Result<(), TableError> {
        if self.initial_capacity == 0 {
            return Err(TableError::invalid("initial capacity must be positive"));
        }
        let lf = self.max_load_factor;
        if !lf.is_finite() || lf <= 0.0 || lf > 1.0 {
            return Err(TableError::invalid(format!(
                "max load factor must be in (0, 1], got {lf}"
            )));
        }
        Ok(())
    }
}
