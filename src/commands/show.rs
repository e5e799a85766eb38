//! `depgen show` command.

use crate::config::DepGenConfig;
use crate::context::ServiceContext;
use crate::deps::makefile;
use crate::deps::scan::IncludeScanner;
use crate::driver;

/// Execute the `show` command: print one target's dependencies.
///
/// # Errors
///
/// Returns an error string if the target is unknown or scanning fails.
pub fn run(
    ctx: &ServiceContext,
    config: &DepGenConfig,
    target: Option<&str>,
    json: bool,
) -> Result<(), String> {
    print!("{}", render(ctx, config, target, json)?);
    Ok(())
}

/// Scans the target and formats the result as makefile rules or JSON.
///
/// # Errors
///
/// Returns an error string if the target is unknown, scanning fails, or
/// JSON serialization fails.
pub fn render(
    ctx: &ServiceContext,
    config: &DepGenConfig,
    target: Option<&str>,
    json: bool,
) -> Result<String, String> {
    let names: Vec<String> = target.map(String::from).into_iter().collect();
    let target = config
        .select(&names)?
        .into_iter()
        .next()
        .ok_or_else(|| "config defines no targets".to_string())?;

    let finder = IncludeScanner::new(ctx.fs.as_ref())
        .with_start_directory(target.start_directory.clone())
        .with_renames(target.renames.clone())
        .verbose(ctx.verbose);
    let deps = driver::dependencies(&finder, config, target)?;

    if json {
        let mut text = serde_json::to_string_pretty(&deps)
            .map_err(|e| format!("failed to serialize dependencies: {e}"))?;
        text.push('\n');
        Ok(text)
    } else {
        Ok(makefile::render(&deps))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::MemoryFileSystem;
    use std::path::Path;

    fn ctx() -> ServiceContext {
        let fs = MemoryFileSystem::new()
            .with_file("src/a.c", "#include \"a.h\"\n")
            .with_file("src/a.h", "")
            .with_file(
                "depgen.yaml",
                "targets:\n  - name: one\n    sources: [\"src/*.c\"]\n    includes: [src]\n    output: one.mak\n  - name: two\n    output: two.mak\n",
            );
        ServiceContext::with_fs(Box::new(fs))
    }

    #[test]
    fn shows_first_target_as_rules_without_writing() {
        let ctx = ctx();
        let config = DepGenConfig::locate(ctx.fs.as_ref(), None).unwrap();
        let text = render(&ctx, &config, None, false).unwrap();
        assert_eq!(text, "a.o: \\\n\tsrc/a.c \\\n\tsrc/a.h\n");
        assert!(!ctx.fs.exists(Path::new("one.mak")));
    }

    #[test]
    fn shows_json() {
        let ctx = ctx();
        let config = DepGenConfig::locate(ctx.fs.as_ref(), None).unwrap();
        let text = render(&ctx, &config, Some("one"), true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value[0]["object"], "a.o");
        assert_eq!(value[0]["source"], "src/a.c");
        assert_eq!(value[0]["headers"][0], "src/a.h");
    }

    #[test]
    fn target_without_sources_shows_nothing() {
        let ctx = ctx();
        let config = DepGenConfig::locate(ctx.fs.as_ref(), None).unwrap();
        assert_eq!(render(&ctx, &config, Some("two"), false).unwrap(), "");
    }
}
