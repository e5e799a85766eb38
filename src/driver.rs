//! Wires a target's configuration into the finder and the writer.

use crate::config::{DepGenConfig, TargetConfig};
use crate::deps::{makefile, DependencyMap};
use crate::ports::{DependencyFinder, DependencyWriter, UpdateOutcome};

/// Computes the dependency map for `target`, synonyms included.
///
/// # Errors
///
/// Propagates any finder failure unchanged.
pub fn dependencies(
    finder: &dyn DependencyFinder,
    config: &DepGenConfig,
    target: &TargetConfig,
) -> Result<DependencyMap, String> {
    let sources = config.source_globs(target);
    let includes = config.include_dirs(target);
    let mut deps = finder.find(&sources, &includes, &target.object_suffix)?;
    for synonym in &target.synonyms {
        deps = makefile::insert_synonym(deps, &synonym.object, &synonym.alias);
    }
    Ok(deps)
}

/// Produces the dependency file for one target.
///
/// # Errors
///
/// Propagates any finder or writer failure unchanged.
pub fn generate(
    finder: &dyn DependencyFinder,
    writer: &dyn DependencyWriter,
    config: &DepGenConfig,
    target: &TargetConfig,
) -> Result<UpdateOutcome, String> {
    let deps = dependencies(finder, config, target)?;
    writer.write(&target.output, &deps, &target.header_comment)
}
