use jiff::civil::Date;
use jiff::Zoned;
use serde::{Deserialize, Serialize};

use crate::alphabet::CharClass;

/// The options one batch was generated under.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchOptions {
    pub classes: Vec<CharClass>,
    pub exclude_similar: bool,
}

/// One generation run's output: the keys plus the metadata that goes
/// into the export header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Batch {
    pub keys: Vec<String>,
    pub count: usize,
    pub generated_at: Zoned,
    pub expires: Date,
    pub options: BatchOptions,
}

impl Batch {
    pub fn new(keys: Vec<String>, expires: Date, options: BatchOptions) -> Self {
        Self {
            count: keys.len(),
            keys,
            generated_at: Zoned::now(),
            expires,
            options,
        }
    }
}
