pub mod analyze;
pub mod read;
pub mod thresholds;

use effluent_core::error::EffluentError;
use effluent_core::thresholds::{self as limits, ThresholdTable};
use std::borrow::Cow;
use std::path::Path;

/// The builtin table, or the one in `path` when given.
pub fn load_thresholds(path: Option<&Path>) -> Result<Cow<'static, ThresholdTable>, EffluentError> {
    match path {
        Some(p) => Ok(Cow::Owned(limits::load_table(p)?)),
        None => Ok(Cow::Borrowed(limits::builtin())),
    }
}
