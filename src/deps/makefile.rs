//! Makefile rule text: rendering, parsing compiler output, synonyms.

use super::{Dependency, DependencyMap};

/// Continuation written between prerequisites.
const CONTINUATION: &str = " \\\n\t";

/// Renders each rule as `object:` followed by one prerequisite per
/// continued line.
#[must_use]
pub fn render(deps: &[Dependency]) -> String {
    let mut text = String::new();
    for dep in deps {
        text.push_str(&dep.object);
        text.push(':');
        for prerequisite in dep.prerequisites() {
            text.push_str(CONTINUATION);
            text.push_str(prerequisite);
        }
        text.push('\n');
    }
    text
}

/// Renders a complete fragment: the comment line then the rules.
#[must_use]
pub fn render_with_comment(deps: &[Dependency], header_comment: &str) -> String {
    let mut text = header_comment.trim_end().to_string();
    text.push('\n');
    text.push_str(&render(deps));
    text
}

/// Parses compiler-generated rules such as `gcc -MM` output.
///
/// Lines starting with a space or tab continue the previous rule; any
/// other non-empty line starts a new one. Prerequisites containing `/usr/`
/// are system headers and are dropped. The first remaining prerequisite of
/// a rule becomes its source.
#[must_use]
pub fn extract(text: &str) -> DependencyMap {
    let mut rules: Vec<(String, Vec<String>)> = Vec::new();
    for line in text.lines() {
        let continued = line.starts_with([' ', '\t']);
        let line = line.trim().trim_end_matches(['\\', ' ']);
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let mut names = line.split_whitespace();
        if !continued || rules.is_empty() {
            let Some(first) = names.next() else { continue };
            let object = first.trim_end_matches(':').to_string();
            rules.push((object, Vec::new()));
        }
        if let Some((_, prerequisites)) = rules.last_mut() {
            prerequisites.extend(
                names.filter(|name| *name != ":" && !name.contains("/usr/")).map(String::from),
            );
        }
    }

    rules
        .into_iter()
        .map(|(object, prerequisites)| {
            let mut prerequisites = prerequisites.into_iter();
            let source = prerequisites.next();
            Dependency { object, source, headers: prerequisites.collect() }
        })
        .collect()
}

/// Duplicates the rule for `current` under the name `alias`, placed right
/// after it. Used when one source is compiled twice with different
/// definitions.
#[must_use]
pub fn insert_synonym(deps: DependencyMap, current: &str, alias: &str) -> DependencyMap {
    let mut result = Vec::with_capacity(deps.len() + 1);
    for dep in deps {
        let synonym = (dep.object == current)
            .then(|| Dependency { object: alias.to_string(), ..dep.clone() });
        result.push(dep);
        result.extend(synonym);
    }
    result
}
