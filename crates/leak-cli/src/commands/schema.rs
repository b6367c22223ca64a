use leak_core::entities::Post;
use schemars::schema_for;

use crate::cli::GlobalFlags;
use crate::output::output;

/// Handle `leakwatch schema`.
pub fn handle(flags: &GlobalFlags) -> anyhow::Result<()> {
    output(&schema_for!(Post), flags.format)
}
