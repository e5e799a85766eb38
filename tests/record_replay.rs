//! Record-replay round-trip integration test.
//!
//! 1. Scan a real project on disk through a recording context.
//! 2. Delete the project.
//! 3. Replay the cassette and get the same dependencies and outcome.

use std::fs;
use std::path::{Path, PathBuf};

use depgen::cassette::format::Cassette;
use depgen::commands::{generate, show};
use depgen::config::DepGenConfig;
use depgen::context::ServiceContext;
use depgen::ports::UpdateOutcome;

fn write_project(root: &Path) {
    let files = [
        ("src/Document.cxx", "#include \"Document.h\"\n#include \"CellBuffer.h\"\n"),
        ("src/Document.h", "#include \"CellBuffer.h\"\n"),
        ("src/CellBuffer.h", "#include <cstddef>\n"),
        ("src/RESearch.cxx", "#include \"RESearch.h\"\n"),
        ("src/RESearch.h", ""),
    ];
    for (path, contents) in files {
        let full = root.join(path);
        fs::create_dir_all(full.parent().unwrap()).unwrap();
        fs::write(full, contents).unwrap();
    }
}

fn config_for(root: &Path) -> DepGenConfig {
    let yaml = format!(
        "targets:\n  - name: core\n    sources: [\"{root}/src/*.cxx\"]\n    includes: [\"{root}/src\"]\n    start_directory: \"{root}/\"\n    output: \"{root}/deps.mak\"\n",
        root = root.display()
    );
    DepGenConfig::from_yaml(&yaml).unwrap()
}

fn generate_outcomes(ctx: &ServiceContext, config: &DepGenConfig) -> Vec<UpdateOutcome> {
    let mut outcomes = Vec::new();
    generate::generate_targets(ctx, config, &[], &mut |_, outcome| outcomes.push(outcome)).unwrap();
    outcomes
}

#[test]
fn replayed_scan_matches_recorded_scan() {
    let base = std::env::temp_dir().join("depgen_record_replay_show");
    let _ = fs::remove_dir_all(&base);
    let root = base.join("project");
    write_project(&root);
    let cassette_path: PathBuf = base.join("show.cassette.yaml");
    let config = config_for(&root);

    let recorded = {
        let ctx = ServiceContext::recording(&cassette_path);
        show::render(&ctx, &config, None, false).unwrap()
    };
    assert_eq!(
        recorded,
        "Document.o: \\\n\tsrc/Document.cxx \\\n\tsrc/Document.h \\\n\tsrc/CellBuffer.h\n\
         RESearch.o: \\\n\tsrc/RESearch.cxx \\\n\tsrc/RESearch.h\n"
    );

    fs::remove_dir_all(&root).unwrap();

    let ctx = ServiceContext::replaying(&cassette_path).unwrap();
    let replayed = show::render(&ctx, &config, None, false).unwrap();
    assert_eq!(replayed, recorded);

    // A second replay is just as deterministic.
    let ctx = ServiceContext::replaying(&cassette_path).unwrap();
    assert_eq!(show::render(&ctx, &config, None, false).unwrap(), recorded);

    let _ = fs::remove_dir_all(&base);
}

#[test]
fn replayed_generate_reports_the_recorded_outcome() {
    let base = std::env::temp_dir().join("depgen_record_replay_generate");
    let _ = fs::remove_dir_all(&base);
    let root = base.join("project");
    write_project(&root);
    let cassette_path = base.join("generate.cassette.yaml");
    let config = config_for(&root);

    {
        let ctx = ServiceContext::recording(&cassette_path);
        assert_eq!(generate_outcomes(&ctx, &config), vec![UpdateOutcome::New]);
    }
    assert!(root.join("deps.mak").exists());

    let cassette = Cassette::from_yaml(&fs::read_to_string(&cassette_path).unwrap()).unwrap();
    assert!(cassette.interactions.iter().all(|i| i.port == "fs"));
    let write = cassette.interactions.iter().find(|i| i.method == "write").unwrap();
    assert!(write.input["contents"].as_str().unwrap().contains("RESearch.o:"));

    fs::remove_dir_all(&root).unwrap();

    let ctx = ServiceContext::replaying(&cassette_path).unwrap();
    assert_eq!(generate_outcomes(&ctx, &config), vec![UpdateOutcome::New]);
    assert!(!root.join("deps.mak").exists());

    let _ = fs::remove_dir_all(&base);
}
