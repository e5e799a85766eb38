//! `depgen generate` command, also the default when no command is given.

use std::path::Path;

use crate::config::DepGenConfig;
use crate::context::ServiceContext;
use crate::deps::scan::IncludeScanner;
use crate::deps::update::MakefileWriter;
use crate::driver;
use crate::ports::UpdateOutcome;

/// Execute the `generate` command.
///
/// Prints `<output>:0: New` or `<output>:0: Changed` as each file is
/// written; unchanged files are silent. Targets written before a failing
/// one are still reported.
///
/// # Errors
///
/// Returns an error string if a target is unknown or generation fails.
pub fn run(ctx: &ServiceContext, config: &DepGenConfig, names: &[String]) -> Result<(), String> {
    generate_targets(ctx, config, names, &mut |output, outcome| {
        if outcome != UpdateOutcome::Unchanged {
            println!("{}:0: {outcome}", output.display());
        }
    })
}

/// Generates the selected targets in order, stopping at the first failure.
///
/// `report` is called with each target's output path and outcome as soon
/// as that target is done.
///
/// # Errors
///
/// Returns an error string if a target is unknown or generation fails.
pub fn generate_targets(
    ctx: &ServiceContext,
    config: &DepGenConfig,
    names: &[String],
    report: &mut dyn FnMut(&Path, UpdateOutcome),
) -> Result<(), String> {
    let writer = MakefileWriter::new(ctx.fs.as_ref());
    for target in config.select(names)? {
        let finder = IncludeScanner::new(ctx.fs.as_ref())
            .with_start_directory(target.start_directory.clone())
            .with_renames(target.renames.clone())
            .verbose(ctx.verbose);
        let outcome = driver::generate(&finder, &writer, config, target)
            .map_err(|e| format!("target {}: {e}", target.name))?;
        report(&target.output, outcome);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::MemoryFileSystem;
    use std::path::PathBuf;

    fn generate_all(
        ctx: &ServiceContext,
        config: &DepGenConfig,
    ) -> (Vec<(PathBuf, UpdateOutcome)>, Result<(), String>) {
        let mut reported = Vec::new();
        let result = generate_targets(ctx, config, &[], &mut |output, outcome| {
            reported.push((output.to_path_buf(), outcome));
        });
        (reported, result)
    }

    /// A cut-down copy of the GTK 4 tree, seen from inside `gtk4/`.
    fn gtk4_tree() -> MemoryFileSystem {
        MemoryFileSystem::new()
            .with_file(
                "../gtk4/ScintillaGTK.cxx",
                "#include <gtk/gtk.h>\n#include \"Scintilla.h\"\n#include \"Wrappers.h\"\n#include \"ScintillaGTK.h\"\n",
            )
            .with_file("../gtk4/ScintillaGTK.h", "#include \"Editor.h\"\n")
            .with_file("../gtk4/Wrappers.h", "")
            .with_file("../include/Scintilla.h", "#include \"Sci_Position.h\"\n")
            .with_file("../include/Sci_Position.h", "")
            .with_file("../src/Editor.cxx", "#include \"Editor.h\"\n#include \"Editor.h\"\n")
            .with_file("../src/Editor.h", "#include \"Scintilla.h\"\n")
            .with_file("../src/CharClassify.cxx", "static int x;\n")
    }

    #[test]
    fn builtin_target_writes_expected_fragment() {
        let ctx = ServiceContext::with_fs(Box::new(gtk4_tree()));
        let config = DepGenConfig::builtin();

        let (reported, result) = generate_all(&ctx, &config);
        result.unwrap();
        assert_eq!(reported, vec![(PathBuf::from("../gtk4/deps.mak"), UpdateOutcome::New)]);

        let text = ctx.fs.read_to_string(Path::new("../gtk4/deps.mak")).unwrap();
        let expected = "\
# Created by DepGen.py. To recreate, run DepGen.py.
ScintillaGTK.o: \\
\tScintillaGTK.cxx \\
\t../include/Scintilla.h \\
\t../include/Sci_Position.h \\
\tWrappers.h \\
\tScintillaGTK.h \\
\t../src/Editor.h
CharClassify.o: \\
\t../src/CharClassify.cxx
Editor.o: \\
\t../src/Editor.cxx \\
\t../src/Editor.h \\
\t../include/Scintilla.h \\
\t../include/Sci_Position.h
";
        assert_eq!(text, expected);
    }

    #[test]
    fn second_run_is_unchanged_and_does_not_write() {
        let fs = gtk4_tree();
        let ctx = ServiceContext::with_fs(Box::new(fs));
        let config = DepGenConfig::builtin();

        generate_all(&ctx, &config).1.unwrap();
        let first = ctx.fs.read_to_string(Path::new("../gtk4/deps.mak")).unwrap();

        let (reported, result) = generate_all(&ctx, &config);
        result.unwrap();
        assert_eq!(reported[0].1, UpdateOutcome::Unchanged);
        let second = ctx.fs.read_to_string(Path::new("../gtk4/deps.mak")).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn run_succeeds_on_builtin_target() {
        let ctx = ServiceContext::with_fs(Box::new(gtk4_tree()));
        assert!(run(&ctx, &DepGenConfig::builtin(), &[]).is_ok());
    }

    #[test]
    fn failure_names_the_target() {
        let ctx = ServiceContext::with_fs(Box::new(MemoryFileSystem::new()));
        let config = DepGenConfig::from_yaml(
            "targets:\n  - name: broken\n    sources: [\"src/*/x.c\"]\n    output: d.mak\n",
        )
        .unwrap();
        let err = generate_all(&ctx, &config).1.unwrap_err();
        assert!(err.starts_with("target broken:"));
    }

    #[test]
    fn targets_before_a_failure_are_still_reported() {
        let fs = MemoryFileSystem::new().with_file("src/a.c", "#include \"a.h\"\n").with_file("src/a.h", "");
        let ctx = ServiceContext::with_fs(Box::new(fs));
        let config = DepGenConfig::from_yaml(concat!(
            "targets:\n",
            "  - name: good\n    sources: [\"src/*.c\"]\n    includes: [src]\n    output: good.mak\n",
            "  - name: broken\n    sources: [\"src/*/x.c\"]\n    output: broken.mak\n",
        ))
        .unwrap();

        let (reported, result) = generate_all(&ctx, &config);
        assert!(result.unwrap_err().starts_with("target broken:"));
        assert_eq!(reported, vec![(PathBuf::from("good.mak"), UpdateOutcome::New)]);
        assert!(ctx.fs.exists(Path::new("good.mak")));
        assert!(!ctx.fs.exists(Path::new("broken.mak")));
    }
}
