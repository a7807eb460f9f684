use afs_split::domain::model::{ExportStyle, ExtractStrategy, MissReason};
use afs_split::{LocalStorage, SectionOutcome, SplitEngine, SplitError, SplitPipeline, SplitSettings};
use std::path::Path;
use tempfile::TempDir;

const UTILS: &str = "const Utils = {\n  a: 1\n};\n";
const STATE: &str = "const StateManager = {\n  b: 2,\n  nested: {\n    c: 3\n  }\n};\n";
const URL: &str = "const URLManager = {\n  build(q) {\n    return `?q=${encodeURIComponent(q)}`;\n  }\n};\n";

fn write_input(dir: &Path, content: &str) {
    std::fs::write(dir.join("advanced-filter-search.js"), content).unwrap();
}

fn run_in(dir: &Path, settings: SplitSettings) -> afs_split::Result<afs_split::RunReport> {
    let storage = LocalStorage::new(dir.to_string_lossy().into_owned());
    let pipeline = SplitPipeline::new(storage, settings)?;
    SplitEngine::new(pipeline).run()
}

fn read(dir: &Path, file: &str) -> String {
    std::fs::read_to_string(dir.join(file)).unwrap()
}

#[test]
fn test_three_sections_written() {
    let temp_dir = TempDir::new().unwrap();
    let input = format!("// bundle\n{}\n{}\n{}\nconst App = {{}};\n", UTILS, STATE, URL);
    write_input(temp_dir.path(), &input);

    let report = run_in(temp_dir.path(), SplitSettings::default()).unwrap();

    assert_eq!(report.input_bytes, input.len() as u64);
    assert_eq!(report.written_count(), 3);

    let utils = read(temp_dir.path(), "afs-utils.js");
    assert!(utils.contains(" * Advanced Filter Search - Utils\n"));
    assert!(utils.contains(UTILS.trim_end()));
    assert!(utils.contains("window.AFS.Utils = Utils;"));
    assert!(!utils.contains("Module exports will be added here"));

    let state = read(temp_dir.path(), "afs-state.js");
    assert!(state.contains(STATE.trim_end()));
    assert!(!state.contains("URLManager"));
    assert!(state.contains("  const CONSTANTS = global.AFS?.CONSTANTS || {};\n  const Logger = global.AFS?.Logger || {};\n"));
    assert!(state.contains("window.AFS.StateManager = StateManager;"));

    let url = read(temp_dir.path(), "afs-url.js");
    assert!(url.contains(URL.trim_end()));
    assert!(!url.contains("const App"));
    assert!(url.contains("window.AFS.URLManager = URLManager;"));

    let rendered = report.render();
    let lines: Vec<&str> = rendered.lines().collect();
    assert_eq!(lines[0], "Module splitting tool");
    assert_eq!(lines[2], "Input file: advanced-filter-search.js");
    assert_eq!(lines.iter().filter(|l| l.starts_with("✓ ")).count(), 3);
}

#[test]
fn test_reported_sizes_match_files_on_disk() {
    let temp_dir = TempDir::new().unwrap();
    write_input(temp_dir.path(), &format!("{}{}{}", UTILS, STATE, URL));

    let report = run_in(temp_dir.path(), SplitSettings::default()).unwrap();

    for outcome in &report.outcomes {
        match outcome {
            SectionOutcome::Written { file, bytes } => {
                let on_disk = std::fs::metadata(temp_dir.path().join(file)).unwrap().len();
                assert_eq!(*bytes, on_disk);
                let expected_line = format!("✓ {}: {:.2} KB", file, on_disk as f64 / 1024.0);
                assert!(report.render().contains(&expected_line));
            }
            SectionOutcome::NotFound { file, .. } => panic!("{} should have been written", file),
        }
    }
}

#[test]
fn test_missing_section_is_skipped() {
    let temp_dir = TempDir::new().unwrap();
    write_input(temp_dir.path(), &format!("{}{}", UTILS, STATE));

    let report = run_in(temp_dir.path(), SplitSettings::default()).unwrap();

    assert_eq!(report.written_count(), 2);
    assert!(temp_dir.path().join("afs-utils.js").exists());
    assert!(temp_dir.path().join("afs-state.js").exists());
    assert!(!temp_dir.path().join("afs-url.js").exists());
    assert_eq!(
        report.outcomes[2],
        SectionOutcome::NotFound {
            file: "afs-url.js".to_string(),
            reason: MissReason::StartNotFound,
        }
    );

    let rendered = report.render();
    assert_eq!(rendered.matches("✗ afs-url.js: Section not found").count(), 1);
}

#[test]
fn test_missing_input_writes_nothing() {
    let temp_dir = TempDir::new().unwrap();

    let err = run_in(temp_dir.path(), SplitSettings::default()).unwrap_err();

    assert!(matches!(err, SplitError::InputNotFound { ref path } if path == "advanced-filter-search.js"));
    assert_eq!(std::fs::read_dir(temp_dir.path()).unwrap().count(), 0);
}

#[test]
fn test_oversized_module_is_still_written() {
    let temp_dir = TempDir::new().unwrap();
    let filler: String = (0..600).map(|i| format!("  key{}: 'value {}',\n", i, i)).collect();
    write_input(temp_dir.path(), &format!("const Utils = {{\n{}}};\n", filler));

    let report = run_in(temp_dir.path(), SplitSettings::default()).unwrap();

    assert!(temp_dir.path().join("afs-utils.js").exists());
    assert!(report.render().lines().any(|l| l.starts_with("⚠ afs-utils.js: ")));
}

#[test]
fn test_existing_outputs_are_overwritten() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(temp_dir.path().join("afs-utils.js"), "stale").unwrap();
    write_input(temp_dir.path(), UTILS);

    run_in(temp_dir.path(), SplitSettings::default()).unwrap();

    assert!(read(temp_dir.path(), "afs-utils.js").contains("window.AFS.Utils = Utils;"));
}

#[test]
fn test_pattern_strategy_splits_all_blocks() {
    let temp_dir = TempDir::new().unwrap();
    write_input(temp_dir.path(), &format!("{}{}{}", UTILS, STATE, URL));

    let settings = SplitSettings {
        strategy: ExtractStrategy::Pattern,
        ..SplitSettings::default()
    };
    let report = run_in(temp_dir.path(), settings).unwrap();

    assert_eq!(report.written_count(), 3);
    let state = read(temp_dir.path(), "afs-state.js");
    assert!(state.contains(STATE.trim_end()));
    assert!(!state.contains("const Utils"));
    let url = read(temp_dir.path(), "afs-url.js");
    assert!(url.contains(URL.trim_end()));
}

#[test]
fn test_pattern_strategy_end_only_before_start() {
    let temp_dir = TempDir::new().unwrap();
    // StateManager's closer is not on its own line, so the only `};` line precedes it
    write_input(
        temp_dir.path(),
        &format!("{}const StateManager = {{ b: 2 }};\n", UTILS),
    );

    let settings = SplitSettings {
        strategy: ExtractStrategy::Pattern,
        ..SplitSettings::default()
    };
    let report = run_in(temp_dir.path(), settings).unwrap();

    assert_eq!(report.written_count(), 1);
    assert!(matches!(
        report.outcomes[1],
        SectionOutcome::NotFound { reason: MissReason::EndBeforeStart, .. }
    ));
    assert!(!temp_dir.path().join("afs-state.js").exists());
}

#[test]
fn test_dry_run_writes_nothing() {
    let temp_dir = TempDir::new().unwrap();
    write_input(temp_dir.path(), &format!("{}{}{}", UTILS, STATE, URL));

    let settings = SplitSettings {
        dry_run: true,
        ..SplitSettings::default()
    };
    let report = run_in(temp_dir.path(), settings).unwrap();

    assert_eq!(report.written_count(), 3);
    assert!(!temp_dir.path().join("afs-utils.js").exists());
    assert!(report.render().contains("Dry run: no files were written"));
}

#[test]
fn test_esm_modules_import_siblings() {
    let temp_dir = TempDir::new().unwrap();
    write_input(temp_dir.path(), &format!("{}{}{}", UTILS, STATE, URL));

    let settings = SplitSettings {
        export_style: ExportStyle::Esm,
        output_dir: "assets".to_string(),
        ..SplitSettings::default()
    };
    run_in(temp_dir.path(), settings).unwrap();

    let url = read(&temp_dir.path().join("assets"), "afs-url.js");
    assert!(url.contains("import { Utils } from './afs-utils.js';"));
    assert!(url.contains("import { StateManager } from './afs-state.js';"));
    assert!(url.contains("const CONSTANTS = global.AFS?.CONSTANTS || {};"));
    assert!(url.contains("export { URLManager };"));
    assert!(!url.contains("window.AFS.URLManager"));
}

#[test]
fn test_esm_missing_sibling_falls_back_to_namespace() {
    let temp_dir = TempDir::new().unwrap();
    write_input(temp_dir.path(), &format!("{}{}", UTILS, URL));

    let settings = SplitSettings {
        export_style: ExportStyle::Esm,
        ..SplitSettings::default()
    };
    let report = run_in(temp_dir.path(), settings).unwrap();

    assert!(report.render().contains("✗ afs-state.js: Section not found"));
    let url = read(temp_dir.path(), "afs-url.js");
    assert!(url.contains("import { Utils } from './afs-utils.js';"));
    assert!(!url.contains("afs-state.js"));
    assert!(url.contains("\nconst StateManager = global.AFS?.StateManager || {};\n"));
}
