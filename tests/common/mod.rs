//! Shared testing utilities for helmgen CLI tests.

use assert_cmd::Command;
use assert_fs::TempDir;
use assert_fs::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

/// Isolated layout: applications side by side with a `deploy/` output directory.
#[allow(dead_code)]
pub struct TestContext {
    root: TempDir,
    deploy_dir: PathBuf,
}

#[allow(dead_code)]
impl TestContext {
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        let deploy = root.child("deploy");
        deploy.create_dir_all().expect("Failed to create deploy directory");
        let deploy_dir = deploy.path().to_path_buf();
        Self { root, deploy_dir }
    }

    pub fn root(&self) -> &Path {
        self.root.path()
    }

    /// Output directory; the default application path `../` resolves to the root.
    pub fn deploy_dir(&self) -> &Path {
        &self.deploy_dir
    }

    /// Add an application whose `generator-jhipster` section is `section` (JSON).
    pub fn add_app(&self, folder: &str, section: &str) {
        self.root
            .child(folder)
            .child(".yo-rc.json")
            .write_str(&format!(r#"{{"generator-jhipster": {}}}"#, section))
            .expect("Failed to write application descriptor");
    }

    /// Pretend the application's image was built locally with Maven.
    pub fn add_image_cache(&self, folder: &str) {
        self.root.child(folder).child("target/jib-cache").create_dir_all().expect("Failed to create jib cache");
    }

    /// Write an answers file next to the applications and return its path.
    pub fn write_answers(&self, content: &str) -> PathBuf {
        let answers = self.root.child("helmgen.toml");
        answers.write_str(content).expect("Failed to write answers file");
        answers.path().to_path_buf()
    }

    /// Command for the compiled `helmgen` binary, run from the output directory.
    pub fn cli(&self) -> Command {
        let mut cmd = Command::cargo_bin("helmgen").expect("Failed to locate helmgen binary");
        cmd.current_dir(&self.deploy_dir)
            .env("HOME", self.root())
            .env_remove("HELMGEN_DIR")
            .env_remove("HELMGEN_ANSWERS")
            .env_remove("HELMGEN_LOG");
        cmd
    }

    /// `helmgen generate` driven by `answers`, without the Helm client check.
    pub fn generate(&self, answers: &str) -> Command {
        let path = self.write_answers(answers);
        let mut cmd = self.cli();
        cmd.arg("generate").arg("--answers").arg(path).arg("--skip-checks");
        cmd
    }

    pub fn output(&self, relative: &str) -> PathBuf {
        self.deploy_dir.join(relative)
    }

    pub fn read_output(&self, relative: &str) -> String {
        fs::read_to_string(self.output(relative)).expect("Failed to read generated file")
    }

    /// Parsed `.deploy-rc.json`.
    pub fn stored(&self) -> serde_json::Value {
        serde_json::from_str(&self.read_output(".deploy-rc.json")).expect("Stored configuration is not JSON")
    }

    /// A gateway and a MongoDB-backed store that publishes to Kafka, both using Eureka.
    pub fn with_shop(&self) {
        self.add_app(
            "gateway",
            r#"{"baseName": "gateway", "applicationType": "gateway", "serverPort": 8080, "serviceDiscoveryType": "eureka", "prodDatabaseType": "postgresql"}"#,
        );
        self.add_app(
            "store",
            r#"{"baseName": "Store", "applicationType": "microservice", "serverPort": "8081", "serviceDiscoveryType": "eureka", "prodDatabaseType": "mongodb", "messageBroker": "kafka"}"#,
        );
    }
}
