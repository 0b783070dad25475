//! Integration test: the installer pipeline against temporary projects.
//!
//! A recording `DependencyInstaller` stands in for npm so the ordering of
//! side effects can be observed without network access.

use esconf_core::{
    install, ConfigurationDocument, DependencyInstaller, InstallError, InstallPlan, LegacyConfig,
    ParserOptions, RuleCatalog, Severity, Step,
};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

#[derive(Default)]
struct Recorder {
    calls: RefCell<Vec<(PathBuf, Vec<String>)>>,
    fail: bool,
}

impl DependencyInstaller for Recorder {
    fn install(&self, dir: &Path, packages: &[String]) -> Result<(), InstallError> {
        self.calls
            .borrow_mut()
            .push((dir.to_path_buf(), packages.to_vec()));
        if self.fail {
            return Err(InstallError::Subprocess {
                command: "npm install".into(),
                reason: "exit status: 1".into(),
            });
        }
        Ok(())
    }
}

fn document() -> ConfigurationDocument {
    ConfigurationDocument::Legacy(LegacyConfig {
        parser_options: ParserOptions { ecma_version: 2020 },
        env: BTreeMap::from([("node".to_string(), true)]),
        extends: vec!["eslint:recommended".into()],
        plugins: vec!["jsdoc".into()],
        rules: RuleCatalog::new()
            .rule("no-console", Severity::Off)
            .rule("jsdoc/check-syntax", Severity::Warn),
        settings: None,
        ignore_patterns: vec!["test/*".into()],
    })
}

fn project(manifest: Option<&str>) -> TempDir {
    let tmp = TempDir::new().unwrap();
    if let Some(text) = manifest {
        fs::write(tmp.path().join("package.json"), text).unwrap();
    }
    tmp
}

fn read_json(path: &Path) -> serde_json::Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

// ── Happy path ──

#[test]
fn installs_into_project_with_existing_scripts() {
    let tmp = project(Some(
        r#"{"name": "demo", "scripts": {"test": "mocha", "lint": "old"}, "private": true}"#,
    ));
    let plan = InstallPlan::for_document(&document(), tmp.path()).unwrap();
    let deps = Recorder::default();

    let report = install(&plan, &deps).unwrap();

    assert_eq!(report.steps.len(), 3);
    assert!(matches!(report.steps[0], Step::DependenciesInstalled(_)));
    assert_eq!(
        deps.calls.borrow()[0],
        (
            tmp.path().to_path_buf(),
            vec![
                "eslint".to_string(),
                "jsdoc".to_string(),
                "eslint-plugin-jsdoc@latest".to_string()
            ]
        )
    );

    let config = fs::read_to_string(tmp.path().join(".eslint.js")).unwrap();
    assert!(config.starts_with("\"use strict\";"));
    assert!(config.contains("\"jsdoc/check-syntax\": 1"));

    let manifest = read_json(&tmp.path().join("package.json"));
    assert_eq!(manifest["name"], "demo");
    assert_eq!(manifest["private"], true);
    assert_eq!(manifest["scripts"]["test"], "mocha");
    assert_eq!(manifest["scripts"]["lint"], "eslint -c .eslint.js --fix .");
    assert_eq!(manifest["scripts"]["jsdoc"], "jsdoc -P package.json -d js_docs . ");
}

#[test]
fn manifest_without_scripts_gets_exactly_the_new_entries() {
    let tmp = project(Some(r#"{"name": "demo"}"#));
    let plan = InstallPlan::for_document(&document(), tmp.path()).unwrap();
    install(&plan, &Recorder::default()).unwrap();

    let manifest = read_json(&tmp.path().join("package.json"));
    let scripts = manifest["scripts"].as_object().unwrap();
    let names: Vec<&str> = scripts.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["lint", "jsdoc"]);
}

#[test]
fn manifest_is_written_with_four_space_indent_and_key_order() {
    let tmp = project(Some(r#"{"version": "1.0.0", "name": "demo"}"#));
    let plan = InstallPlan::for_document(&document(), tmp.path()).unwrap();
    install(&plan, &Recorder::default()).unwrap();

    let text = fs::read_to_string(tmp.path().join("package.json")).unwrap();
    assert!(text.starts_with(concat!(
        "{\n",
        "    \"version\": \"1.0.0\",\n",
        "    \"name\": \"demo\",\n",
        "    \"scripts\": {\n",
        "        \"lint\"",
    )));
}

#[test]
fn second_run_leaves_identical_files() {
    let tmp = project(Some(r#"{"name": "demo", "scripts": {"start": "node ."}}"#));
    let plan = InstallPlan::for_document(&document(), tmp.path()).unwrap();
    let deps = Recorder::default();

    install(&plan, &deps).unwrap();
    let config_once = fs::read(tmp.path().join(".eslint.js")).unwrap();
    let manifest_once = fs::read(tmp.path().join("package.json")).unwrap();

    install(&plan, &deps).unwrap();
    assert_eq!(fs::read(tmp.path().join(".eslint.js")).unwrap(), config_once);
    assert_eq!(fs::read(tmp.path().join("package.json")).unwrap(), manifest_once);

    // the package manager runs once per invocation
    assert_eq!(deps.calls.borrow().len(), 2);
}

#[test]
fn existing_config_file_is_overwritten() {
    let tmp = project(Some("{}"));
    fs::write(tmp.path().join(".eslint.js"), "module.exports = {};").unwrap();
    let plan = InstallPlan::for_document(&document(), tmp.path()).unwrap();
    install(&plan, &Recorder::default()).unwrap();

    let config = fs::read_to_string(tmp.path().join(".eslint.js")).unwrap();
    assert_eq!(config, plan.config_contents);
}

#[test]
fn skip_dependencies_does_not_call_installer() {
    let tmp = project(Some("{}"));
    let plan = InstallPlan::for_document(&document(), tmp.path())
        .unwrap()
        .skip_dependencies(true);
    let deps = Recorder::default();

    let report = install(&plan, &deps).unwrap();
    assert_eq!(report.steps[0], Step::DependenciesSkipped);
    assert!(deps.calls.borrow().is_empty());
    assert!(tmp.path().join(".eslint.js").exists());
}

#[test]
fn custom_manifest_path_is_honored() {
    let tmp = project(None);
    fs::create_dir(tmp.path().join("web")).unwrap();
    fs::write(tmp.path().join("web/package.json"), r#"{"name": "web"}"#).unwrap();
    let plan = InstallPlan::for_document(&document(), tmp.path())
        .unwrap()
        .with_manifest("web/package.json");

    install(&plan, &Recorder::default()).unwrap();
    let manifest = read_json(&tmp.path().join("web/package.json"));
    assert_eq!(manifest["scripts"]["lint"], "eslint -c .eslint.js --fix .");
}

// ── Failure ordering ──

#[test]
fn missing_manifest_fails_before_any_side_effect() {
    let tmp = project(None);
    let plan = InstallPlan::for_document(&document(), tmp.path()).unwrap();
    let deps = Recorder::default();

    let err = install(&plan, &deps).unwrap_err();

    assert!(matches!(err, InstallError::FileAccess { .. }));
    assert!(!tmp.path().join("package.json").exists());
    assert!(!tmp.path().join(".eslint.js").exists());
    assert!(deps.calls.borrow().is_empty());
}

#[test]
fn malformed_manifest_is_left_untouched() {
    let tmp = project(Some("{ \"name\": "));
    let plan = InstallPlan::for_document(&document(), tmp.path()).unwrap();

    let err = install(&plan, &Recorder::default()).unwrap_err();

    assert!(matches!(err, InstallError::Parse { .. }));
    assert_eq!(
        fs::read_to_string(tmp.path().join("package.json")).unwrap(),
        "{ \"name\": "
    );
    assert!(!tmp.path().join(".eslint.js").exists());
}

#[test]
fn failed_dependency_install_stops_the_pipeline() {
    let original = r#"{"name": "demo"}"#;
    let tmp = project(Some(original));
    let plan = InstallPlan::for_document(&document(), tmp.path()).unwrap();
    let deps = Recorder {
        fail: true,
        ..Recorder::default()
    };

    let err = install(&plan, &deps).unwrap_err();

    assert!(matches!(err, InstallError::Subprocess { .. }));
    assert_eq!(deps.calls.borrow().len(), 1);
    assert!(!tmp.path().join(".eslint.js").exists());
    assert_eq!(
        fs::read_to_string(tmp.path().join("package.json")).unwrap(),
        original
    );
}

#[cfg(unix)]
#[test]
fn package_manager_exit_status_is_inspected() {
    use esconf_core::PackageManager;

    let tmp = project(Some("{}"));
    let plan = InstallPlan::for_document(&document(), tmp.path()).unwrap();

    let err = install(&plan, &PackageManager::new("false")).unwrap_err();
    assert!(matches!(err, InstallError::Subprocess { .. }));
    assert!(!tmp.path().join(".eslint.js").exists());

    install(&plan, &PackageManager::new("true")).unwrap();
    assert!(tmp.path().join(".eslint.js").exists());
}
