//! Integration tests for buildcache

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;

    const PLUGIN_VARS: &[&str] = &[
        "PLUGIN_FILENAME",
        "PLUGIN_BUCKET",
        "PLUGIN_PATH",
        "PLUGIN_FALLBACK_PATH",
        "PLUGIN_MOUNT",
        "PLUGIN_REBUILD",
        "PLUGIN_RESTORE",
        "PLUGIN_FLUSH",
        "PLUGIN_FLUSH_AGE",
        "PLUGIN_FLUSH_PATH",
        "PLUGIN_DEBUG",
        "PLUGIN_JSON_KEY",
        "GCS_CACHE_JSON_KEY",
        "DRONE_REPO_OWNER",
        "DRONE_REPO_NAME",
        "DRONE_REPO_BRANCH",
        "DRONE_COMMIT_BRANCH",
    ];

    fn buildcache() -> Command {
        let mut cmd = cargo_bin_cmd!("buildcache");
        for var in PLUGIN_VARS {
            cmd.env_remove(var);
        }
        cmd
    }

    #[test]
    fn help_displays() {
        buildcache()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("build cache plugin"));
    }

    #[test]
    fn help_documents_env_bindings() {
        buildcache()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("PLUGIN_BUCKET"));
    }

    #[test]
    fn version_displays() {
        buildcache()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("buildcache"));
    }

    #[test]
    fn no_mode_fails() {
        buildcache()
            .assert()
            .failure()
            .stderr(predicate::str::contains("no cache action specified"));
    }

    #[test]
    fn multiple_modes_fail() {
        buildcache()
            .args(["--rebuild", "--restore"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("single mode"));
    }

    #[test]
    fn rebuild_without_mounts_fails() {
        buildcache()
            .arg("--rebuild")
            .assert()
            .failure()
            .stderr(predicate::str::contains("no mounts"));
    }

    #[test]
    fn unparseable_flush_age_fails() {
        buildcache()
            .args(["--flush", "--flush-age", "abc"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("flush age"));
    }

    #[test]
    fn missing_credentials_fail() {
        buildcache()
            .arg("--flush")
            .assert()
            .failure()
            .stderr(predicate::str::contains("no service account key"));
    }

    #[test]
    fn malformed_credentials_fail() {
        buildcache()
            .args(["--restore", "--json-key", "{not json"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("malformed service account key"));
    }

    #[test]
    fn modes_bind_to_plugin_env_vars() {
        // PLUGIN_REBUILD selects rebuild mode, which then fails on the
        // missing mounts rather than on mode selection
        buildcache()
            .env("PLUGIN_REBUILD", "true")
            .assert()
            .failure()
            .stderr(predicate::str::contains("no mounts"));
    }
}
