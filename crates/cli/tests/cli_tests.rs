//! CLI integration tests

use serde_json::Value;
use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

const CATALOG: &str = r#"{
    "instances": [
        {
            "type": "node",
            "name": "Node.js",
            "flavors": [
                { "name": "S", "hourlyPrice": 0.02, "memory": 1024, "cpus": 1 },
                { "name": "M", "hourlyPrice": 0.05, "memory": 2048, "cpus": 2 },
                { "name": "L", "hourlyPrice": 0.1, "memory": 4096, "cpus": 4, "available": false }
            ]
        }
    ]
}"#;

const REGISTRY: &str = r#"[
    {
        "providerId": "cellar-addon",
        "pricingDescription": "Object storage billed per GB",
        "metrics": [
            {
                "id": "storage_gb",
                "name": "Storage",
                "unit": "GB",
                "freeQuota": 100,
                "tiers": [ { "minThreshold": 0, "maxThreshold": null, "pricePerUnit": 0.02 } ],
                "defaultValue": 150
            }
        ]
    }
]"#;

const PROJECT: &str = r#"{
    "id": "proj_1",
    "organizationId": "org_1",
    "name": "Shop",
    "runtimes": [
        {
            "id": "rt_api",
            "instanceType": "node",
            "instanceName": "API",
            "scalingEnabled": false,
            "baselineConfig": { "instances": 1, "flavorName": "S" },
            "scalingProfiles": [
                { "id": "baseline", "name": "Baseline", "minInstances": 1, "maxInstances": 1,
                  "minFlavorName": "S", "maxFlavorName": "S", "enabled": true }
            ]
        }
    ],
    "addons": [
        { "id": "addon_pg", "providerId": "postgresql-addon", "providerName": "PostgreSQL",
          "planName": "XS", "monthlyPrice": 10.0 },
        { "id": "addon_cellar", "providerId": "cellar-addon", "providerName": "Cellar",
          "planName": "S", "monthlyPrice": 0.0 }
    ]
}"#;

const LEGACY_PROJECT: &str = r#"{
    "id": "proj_old",
    "organizationId": "org_1",
    "name": "Legacy",
    "runtimes": [
        {
            "id": "rt_old",
            "instanceType": "node",
            "instanceName": "Worker",
            "defaultFlavorName": "S",
            "scalingFlavorName": "M",
            "defaultMinInstances": 1,
            "defaultMaxInstances": 3,
            "weeklySchedule": { "mon": [0,0,0,0,0,0,0,0,0,1,2,0,0,0,0,0,0,0,0,0,0,0,0,0] }
        }
    ],
    "addons": []
}"#;

const BROKEN_PROJECT: &str = r#"{
    "id": "proj_bad",
    "name": "Broken",
    "runtimes": [
        {
            "id": "rt_bad",
            "instanceType": "node",
            "scalingEnabled": false,
            "baselineConfig": { "instances": 1, "flavorName": "S" },
            "scalingProfiles": [
                { "id": "baseline", "minInstances": 1, "maxInstances": 1,
                  "minFlavorName": "S", "maxFlavorName": "S" },
                { "id": "peak", "minInstances": 4, "maxInstances": 2,
                  "minFlavorName": "S", "maxFlavorName": "XXL" }
            ]
        }
    ],
    "addons": []
}"#;

/// Temporary workspace with fixture files and an isolated home directory
struct Fixtures {
    dir: TempDir,
}

impl Fixtures {
    fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let fixtures = Self { dir };
        fixtures.write("catalog.json", CATALOG);
        fixtures.write("registry.json", REGISTRY);
        fixtures.write("project.json", PROJECT);
        fixtures.write("legacy.json", LEGACY_PROJECT);
        fixtures.write("broken.json", BROKEN_PROJECT);
        fixtures
    }

    fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.path(name);
        std::fs::write(&path, content).expect("Failed to write fixture");
        path
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn run(&self, args: &[&str]) -> Output {
        self.command(args).output().expect("Failed to execute command")
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut command = Command::new(env!("CARGO_BIN_EXE_costplan"));
        command
            .args(args)
            .current_dir(self.dir.path())
            .env("HOME", self.dir.path())
            .env_remove("COSTPLAN_CONFIG")
            .env_remove("COSTPLAN_CATALOG_PATH")
            .env_remove("COSTPLAN_REGISTRY_PATH")
            .env_remove("COSTPLAN_DEFAULT_FORMAT")
            .env_remove("COSTPLAN_CURRENCY")
            .env_remove("RUST_LOG")
            .env_remove("COSTPLAN_LOG_JSON");
        command
    }

    fn run_json(&self, args: &[&str]) -> Value {
        let output = self.run(args);
        assert!(
            output.status.success(),
            "command failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
    }
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Test that the CLI shows help
#[test]
fn test_cli_help() {
    let fixtures = Fixtures::new();
    let output = fixtures.run(&["--help"]);
    let stdout = stdout(&output);

    assert!(output.status.success(), "CLI help should succeed");
    assert!(stdout.contains("Estimate monthly deployment costs"));
    for command in ["estimate", "runtime", "org", "normalize", "check", "presets"] {
        assert!(stdout.contains(command), "Should show {} command", command);
    }
}

/// Test that the CLI shows version
#[test]
fn test_cli_version() {
    let fixtures = Fixtures::new();
    let output = fixtures.run(&["--version"]);

    assert!(output.status.success(), "CLI version should succeed");
    assert!(stdout(&output).contains("costplan"), "Should show binary name");
}

#[test]
fn test_estimate_json() {
    let fixtures = Fixtures::new();
    let summary = fixtures.run_json(&[
        "estimate",
        "--project",
        "project.json",
        "--catalog",
        "catalog.json",
        "--registry",
        "registry.json",
        "--format",
        "json",
    ]);

    assert_eq!(summary["projectId"], "proj_1");
    assert_eq!(summary["runtimesCost"], 14.6);
    assert_eq!(summary["addonsCost"], 11.0);
    assert_eq!(summary["totalMonthlyCost"], 25.6);
    assert_eq!(summary["addonsDetail"][1]["isUsageBased"], true);
    assert_eq!(summary["addonsDetail"][1]["usageCost"], 1.0);
}

#[test]
fn test_estimate_without_catalog_is_not_ready() {
    let fixtures = Fixtures::new();
    let output = fixtures.run(&["estimate", "--project", "project.json", "--format", "json"]);

    assert!(output.status.success());
    assert_eq!(stdout(&output).trim(), "null");
}

#[test]
fn test_estimate_table_uses_configured_catalog_and_currency() {
    let fixtures = Fixtures::new();
    let config_dir = fixtures.path(".config").join("costplan");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(
        config_dir.join("config.toml"),
        "catalog_path = \"catalog.json\"\ncurrency = \"USD\"\n",
    )
    .unwrap();

    let output = fixtures.run(&["estimate", "--project", "project.json"]);
    let stdout = stdout(&output);

    assert!(output.status.success());
    assert!(stdout.contains("Cost Estimate: Shop"));
    assert!(stdout.contains("API"));
    assert!(stdout.contains("$24.60"), "flat add-ons only without registry");
}

#[test]
fn test_runtime_breakdown() {
    let fixtures = Fixtures::new();
    let detail = fixtures.run_json(&[
        "runtime",
        "--project",
        "legacy.json",
        "--id",
        "rt_old",
        "--catalog",
        "catalog.json",
        "--format",
        "json",
    ]);

    assert_eq!(detail["runtimeId"], "rt_old");
    assert_eq!(detail["scalingHours"], 2);
    assert_eq!(detail["scalingHoursByProfile"]["default"], 2);
    // level 3 then level 5 of the default profile: 2 and 3 instances of M
    assert_eq!(detail["averageLoadLevel"], 4.0);
    assert_eq!(detail["minMonthlyCost"], 14.55);
}

#[test]
fn test_runtime_unknown_id_fails() {
    let fixtures = Fixtures::new();
    let output = fixtures.run(&[
        "runtime",
        "--project",
        "project.json",
        "--id",
        "rt_missing",
        "--catalog",
        "catalog.json",
    ]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("rt_missing"));
}

#[test]
fn test_normalize_legacy_project() {
    let fixtures = Fixtures::new();
    let project = fixtures.run_json(&["normalize", "--input", "legacy.json"]);

    let runtime = &project["runtimes"][0];
    assert_eq!(runtime["scalingEnabled"], true);
    assert_eq!(runtime["baselineConfig"]["flavorName"], "S");
    assert_eq!(runtime["scalingProfiles"][1]["id"], "default");
    assert_eq!(runtime["weeklySchedule"]["mon"][9]["loadLevel"], 3);
    assert_eq!(runtime["weeklySchedule"]["mon"][10]["loadLevel"], 5);
}

#[test]
fn test_normalize_to_file() {
    let fixtures = Fixtures::new();
    let output = fixtures.run(&["normalize", "--input", "legacy.json", "--output", "out.json"]);

    assert!(output.status.success());
    assert!(fixtures.path("out.json").exists());
    let written: Value =
        serde_json::from_str(&std::fs::read_to_string(fixtures.path("out.json")).unwrap()).unwrap();
    assert_eq!(written["id"], "proj_old");
}

#[test]
fn test_check_clean_project() {
    let fixtures = Fixtures::new();
    let report = fixtures.run_json(&[
        "check",
        "--project",
        "project.json",
        "--registry",
        "registry.json",
        "--format",
        "json",
    ]);
    assert_eq!(report["issues"].as_array().unwrap().len(), 0);
}

#[test]
fn test_check_reports_issues_and_fails() {
    let fixtures = Fixtures::new();
    let output = fixtures.run(&[
        "check",
        "--project",
        "broken.json",
        "--catalog",
        "catalog.json",
        "--format",
        "json",
    ]);

    assert!(!output.status.success(), "issues should fail the command");
    let report: Value = serde_json::from_slice(&output.stdout).unwrap();
    let issues: Vec<String> = report["issues"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i.as_str().unwrap().to_string())
        .collect();
    assert!(issues.iter().any(|i| i.contains("minInstances 4 > maxInstances 2")));
    assert!(issues.iter().any(|i| i.contains("`XXL` is not in the catalog")));

    // the input file is left untouched
    let after = std::fs::read_to_string(fixtures.path("broken.json")).unwrap();
    assert_eq!(after, BROKEN_PROJECT);
}

#[test]
fn test_org_rollup_with_budget() {
    let fixtures = Fixtures::new();
    fixtures.write(
        "organization.json",
        r#"{ "id": "org_1", "name": "Acme", "budgetTarget": 30 }"#,
    );
    fixtures.write("projects.json", &format!("[{}, {}]", PROJECT, LEGACY_PROJECT));

    let report = fixtures.run_json(&[
        "org",
        "--organization",
        "organization.json",
        "--projects",
        "projects.json",
        "--catalog",
        "catalog.json",
        "--format",
        "json",
    ]);

    let summary = &report["summary"];
    assert_eq!(summary["projectCount"], 2);
    assert!(summary["totalMonthlyCost"].as_f64().unwrap() > 24.6);
    assert_eq!(summary["budget"]["target"], 30.0);
    assert_eq!(report["projections"].as_array().unwrap().len(), 6);
    assert_eq!(report["suggestedBudgets"].as_array().unwrap().len(), 3);
}

#[test]
fn test_presets_json() {
    let fixtures = Fixtures::new();
    let presets = fixtures.run_json(&["presets", "--format", "json"]);
    let presets = presets.as_array().unwrap();

    assert_eq!(presets.len(), 6);
    assert_eq!(presets[0]["id"], "business-hours");
    assert_eq!(presets[0]["scalingHours"], 45);
    assert_eq!(presets[5]["scalingHours"], 168);
}

#[test]
fn test_missing_project_file() {
    let fixtures = Fixtures::new();
    let output = fixtures.run(&["estimate", "--project", "nope.json"]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to read project file"));
}
