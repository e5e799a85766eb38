//! `depgen targets` command.

use crate::config::DepGenConfig;

/// Execute the `targets` command.
///
/// # Errors
///
/// Currently infallible; returns `Result` for symmetry with other commands.
pub fn run(config: &DepGenConfig) -> Result<(), String> {
    print!("{}", format_targets(config));
    Ok(())
}

/// One line per target: name, output path, and source globs.
#[must_use]
pub fn format_targets(config: &DepGenConfig) -> String {
    let width = config.targets.iter().map(|t| t.name.len()).max().unwrap_or(0);
    let mut text = String::new();
    for target in &config.targets {
        text.push_str(&format!(
            "{:<width$}  {}  [{}]\n",
            target.name,
            target.output.display(),
            config.source_globs(target).join(", "),
        ));
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_builtin_target() {
        let text = format_targets(&DepGenConfig::builtin());
        assert_eq!(text, "gtk4  ../gtk4/deps.mak  [../gtk4/*.cxx, ../src/*.cxx]\n");
    }

    #[test]
    fn aligns_names() {
        let config = DepGenConfig::from_yaml(
            "targets:\n  - {name: a, output: a.mak}\n  - {name: longer, output: b.mak}\n",
        )
        .unwrap();
        let text = format_targets(&config);
        assert!(text.starts_with("a       a.mak  []\n"));
        assert!(text.contains("longer  b.mak  []\n"));
    }
}
