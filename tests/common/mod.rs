//! Common test utilities for nextflow-devtools tests
#![allow(dead_code)]

use std::path::{Path, PathBuf};

use nextflow_devtools::Config;
use tempfile::TempDir;

/// Creates a temporary directory with a Makefile
pub fn create_makefile_project(content: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let makefile_path = dir.path().join("Makefile");
    std::fs::write(&makefile_path, content).expect("Failed to write Makefile");
    let path = dir.path().to_path_buf();
    (dir, path)
}

/// Creates a temporary directory with no build files
pub fn create_empty_project() -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().to_path_buf();
    (dir, path)
}

/// Writes an executable script into a project directory
pub fn write_script(dir: &Path, name: &str, content: &str) -> PathBuf {
    let script_path = dir.join(name);
    std::fs::write(&script_path, content).expect("Failed to write script");

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = std::fs::metadata(&script_path)
            .expect("Failed to get metadata")
            .permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(&script_path, perms).expect("Failed to set permissions");
    }

    script_path
}

/// Configuration pointing at a project directory
pub fn config_for(dir: &Path) -> Config {
    let mut config = Config::default();
    config.project.dir = dir.display().to_string();
    config
}

/// Whether a program is available on PATH
pub fn has_program(name: &str) -> bool {
    which::which(name).is_ok()
}

/// Minimal Makefile: two targets with recipes
pub const SCENARIO_MAKEFILE: &str = "test:\n\tpytest\nbuild:\n\techo hi\n";

/// Makefile shaped like Nextflow's, with noise the scanner must skip
pub const SAMPLE_MAKEFILE: &str = r#"
# Nextflow build
.PHONY: compile test clean

GRADLE := ./gradlew

compile:
	@echo "Compiling..."

build: # alias kept for older checkouts
	@echo "Building..."

test:
	@echo "Testing module=$(module) class=$(class)"

check: compile test
	@echo "Checking..."

fail:
	@echo "about to fail"
	@echo "boom" >&2
	@exit 3

%.jar: %.class
	@echo "pattern"
	indented:
"#;

/// Launch script echoing its arguments
pub const SAMPLE_LAUNCHER: &str = r#"#!/bin/sh
echo "launch: $*"
"#;

/// Launcher binary printing a version banner
pub const SAMPLE_BINARY: &str = r#"#!/bin/sh
if [ "$1" = "-version" ]; then
    echo ""
    echo "      N E X T F L O W"
    echo "      version 24.10.0 build 5928"
    echo ""
else
    exit 1
fi
"#;

/// Gradle wrapper stand-in that passes only for CacheTest
pub const SAMPLE_GRADLEW: &str = r#"#!/bin/sh
case "$3" in
    *CacheTest*)
        echo "BUILD SUCCESSFUL"
        ;;
    *)
        echo "No tests found for given includes: [$3]" >&2
        exit 1
        ;;
esac
"#;
