mod common;

use common::TestContext;
use modchart::{AppError, ScaffoldMode, ValuesUpdate};
use serial_test::serial;
use std::fs;

#[test]
#[serial]
fn create_builds_chart_via_library_api() {
    let ctx = TestContext::new();
    let mut diagnostics = Vec::new();

    let outcome = ctx.with_work_dir(|| modchart::create("demo", &mut diagnostics)).unwrap();

    assert_eq!(outcome.mode, ScaffoldMode::NewChart);
    assert!(outcome.root.ends_with("demo"));
    assert_eq!(outcome.module.as_str(), "main");
    assert_eq!(outcome.values, ValuesUpdate::Created);
    assert_eq!(outcome.written.len(), 11);
    assert!(outcome.overwritten.is_empty());
    assert!(diagnostics.is_empty());

    ctx.assert_module_manifests_exist("demo", "main");
    ctx.assert_no_markers("demo");
}

#[test]
#[serial]
fn create_in_chart_adds_module_via_library_api() {
    let ctx = TestContext::new();
    let chart = ctx.chart_path("demo");
    let mut diagnostics = Vec::new();

    modchart::create_in("demo", ctx.work_dir(), &mut diagnostics).unwrap();
    let outcome = modchart::create_in("worker", &chart, &mut diagnostics).unwrap();

    assert_eq!(outcome.mode, ScaffoldMode::AddModule);
    assert_eq!(outcome.root, chart.join("templates"));
    assert_eq!(outcome.chart_root, chart);
    assert_eq!(outcome.values, ValuesUpdate::Appended);
    assert_eq!(outcome.written.len(), 7);
    assert!(outcome.values_append_error().is_none());

    let values = ctx.chart_values("demo");
    let keys: Vec<_> = values.keys().filter_map(|k| k.as_str()).collect();
    assert_eq!(keys, vec!["main", "worker"]);
}

#[test]
#[serial]
fn repeated_create_reports_overwrites() {
    let ctx = TestContext::new();
    let mut first = Vec::new();
    let mut second = Vec::new();

    modchart::create_in("demo", ctx.work_dir(), &mut first).unwrap();
    let outcome = modchart::create_in("demo", ctx.work_dir(), &mut second).unwrap();

    assert_eq!(outcome.overwritten, outcome.written);
    let diagnostics = String::from_utf8(second).unwrap();
    assert_eq!(diagnostics.lines().count(), 11);
    assert!(diagnostics.contains(&format!(
        "WARNING: File \"{}\" already exists. Overwriting.",
        ctx.chart_path("demo").join("Chart.yaml").display()
    )));
}

#[test]
#[serial]
fn invalid_name_is_rejected_via_library_api() {
    let ctx = TestContext::new();

    let err = modchart::create_in("bad/name", ctx.work_dir(), &mut Vec::new()).unwrap_err();

    assert!(matches!(err, AppError::InvalidName(_)));
    assert!(!ctx.work_dir().join("bad").exists());
}

#[test]
#[serial]
fn missing_directory_is_rejected() {
    let ctx = TestContext::new();

    let err =
        modchart::create_in("demo", &ctx.work_dir().join("absent"), &mut Vec::new()).unwrap_err();

    assert!(matches!(err, AppError::NotADirectory(_)));
}

#[test]
#[serial]
fn manifest_via_library_api() {
    let ctx = TestContext::new();
    let chart = ctx.chart_path("demo");
    let mut diagnostics = Vec::new();

    modchart::create_in("demo", ctx.work_dir(), &mut diagnostics).unwrap();
    let outcome = modchart::create_manifest_in("hpa", "api", &chart, &mut diagnostics).unwrap();

    assert_eq!(outcome.values, ValuesUpdate::Appended);
    let written: Vec<_> = outcome
        .written
        .iter()
        .map(|p| p.strip_prefix(&chart).unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(written, vec!["templates/api_hpa.yaml", "templates/_api_helpers.tpl"]);

    let values = ctx.chart_values("demo");
    let api = values.get("api").and_then(|v| v.as_mapping()).unwrap();
    assert!(api.contains_key("autoscaling"));
}

#[test]
#[serial]
fn manifest_skips_helpers_when_present() {
    let ctx = TestContext::new();
    let chart = ctx.chart_path("demo");
    let mut diagnostics = Vec::new();

    modchart::create_in("demo", ctx.work_dir(), &mut diagnostics).unwrap();
    let outcome = modchart::create_manifest_in("ingress", "main", &chart, &mut diagnostics).unwrap();

    assert_eq!(outcome.written, vec![chart.join("templates/main_ingress.yaml")]);
    assert_eq!(outcome.values, ValuesUpdate::SkippedExistingKey);
}

#[test]
#[serial]
fn manifests_of_two_kinds_share_one_values_block() {
    let ctx = TestContext::new();
    let chart = ctx.chart_path("demo");
    let mut diagnostics = Vec::new();

    modchart::create_in("demo", ctx.work_dir(), &mut diagnostics).unwrap();
    modchart::create_manifest_in("service", "api", &chart, &mut diagnostics).unwrap();
    let outcome = modchart::create_manifest_in("deployment", "api", &chart, &mut diagnostics).unwrap();

    assert!(matches!(outcome.values, ValuesUpdate::Merged(ref added) if added.contains(&"replicaCount".to_string())));
    let values = ctx.chart_values("demo");
    let api = values.get("api").and_then(|v| v.as_mapping()).unwrap();
    for key in ["service", "replicaCount", "image", "autoscaling"] {
        assert!(api.contains_key(key), "{}", key);
    }
}

#[test]
#[serial]
fn numeric_module_name_is_not_appended_twice() {
    let ctx = TestContext::new();
    let chart = ctx.chart_path("demo");
    let mut diagnostics = Vec::new();

    modchart::create_in("demo", ctx.work_dir(), &mut diagnostics).unwrap();
    modchart::create_in("123", &chart, &mut diagnostics).unwrap();
    let outcome = modchart::create_in("123", &chart, &mut diagnostics).unwrap();

    assert_eq!(outcome.values, ValuesUpdate::SkippedExistingKey);
    let values = ctx.chart_values("demo");
    assert_eq!(values.len(), 2);
    assert!(values.get(serde_yaml::Value::from(123)).is_some());
}

#[test]
#[serial]
fn manifest_rejects_notes_kind() {
    let ctx = TestContext::new();

    let err =
        modchart::create_manifest_in("notes", "api", ctx.work_dir(), &mut Vec::new()).unwrap_err();

    assert!(matches!(err, AppError::UnknownManifestKind(ref kind) if kind == "notes"));
}

#[test]
#[serial]
fn create_from_clones_starter_via_library_api() {
    let ctx = TestContext::new();
    let starter = ctx.home().join("starter");
    fs::create_dir_all(starter.join("templates")).unwrap();
    fs::write(starter.join("Chart.yaml"), "apiVersion: v2\nname: base\nversion: 9.9.9\n").unwrap();
    fs::write(starter.join("templates/cm.yaml"), "name: <CHARTNAME>-<MODULE_NAME>\n").unwrap();

    let outcome =
        modchart::create_from_in("shop", starter.to_str().unwrap(), ctx.work_dir()).unwrap();

    assert!(outcome.chart_root.ends_with("shop"));
    assert_eq!(outcome.starter, starter);
    assert_eq!(ctx.read_chart_file("shop", "templates/cm.yaml"), "name: shop-main\n");
    assert_eq!(ctx.chart_files("shop"), vec!["Chart.yaml", "templates/cm.yaml"]);
}

#[test]
#[serial]
fn relative_starter_without_directory_is_a_config_error() {
    let ctx = TestContext::new();
    let original_home = std::env::var_os("HOME");
    unsafe {
        std::env::remove_var("HOME");
    }

    let result = modchart::create_from_in("shop", "web", ctx.work_dir());

    unsafe {
        if let Some(home) = original_home {
            std::env::set_var("HOME", home);
        }
    }
    assert!(matches!(result, Err(AppError::Configuration(_))));
}
