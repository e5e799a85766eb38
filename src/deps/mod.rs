//! Dependency model plus the scanning and writing logic behind the ports.
//!
//! A [`DependencyMap`] is an ordered list of rules, one per object file:
//!
//! ```text
//! Editor.o: \
//! 	../src/Editor.cxx \
//! 	../include/Scintilla.h
//! ```

pub mod glob;
pub mod makefile;
pub mod scan;
pub mod update;

use serde::Serialize;

/// One makefile rule: an object file and everything it is rebuilt from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dependency {
    /// Object file name, e.g. `Editor.o`.
    pub object: String,
    /// Source file the object is compiled from.
    ///
    /// Rules parsed from compiler output may have no prerequisites at all.
    pub source: Option<String>,
    /// Resolved headers, in discovery order, each listed once.
    pub headers: Vec<String>,
}

impl Dependency {
    /// Creates a rule for `object` compiled from `source`.
    pub fn new(object: impl Into<String>, source: impl Into<String>) -> Self {
        Self { object: object.into(), source: Some(source.into()), headers: Vec::new() }
    }

    /// Returns the source followed by the headers.
    pub fn prerequisites(&self) -> impl Iterator<Item = &str> {
        self.source.iter().chain(self.headers.iter()).map(String::as_str)
    }
}

/// Ordered dependency rules, one per object file.
pub type DependencyMap = Vec<Dependency>;

#[cfg(test)]
mod tests {
    use super::Dependency;

    #[test]
    fn prerequisites_put_source_first() {
        let mut dep = Dependency::new("Editor.o", "../src/Editor.cxx");
        dep.headers.push("../include/Scintilla.h".into());
        let prereqs: Vec<&str> = dep.prerequisites().collect();
        assert_eq!(prereqs, vec!["../src/Editor.cxx", "../include/Scintilla.h"]);
    }

    #[test]
    fn prerequisites_without_source() {
        let dep = Dependency { object: "a.o".into(), source: None, headers: vec!["a.h".into()] };
        assert_eq!(dep.prerequisites().collect::<Vec<_>>(), vec!["a.h"]);
    }
}
