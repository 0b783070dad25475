//! The installer pipeline.
//!
//! Steps run in a fixed order and each one must succeed before the next
//! starts:
//!
//! 0. preflight: load the manifest, patch it in memory and serialize it
//! 1. install dev dependencies and wait for the package manager to exit
//! 2. write the bootstrap config file
//! 3. write the patched manifest
//!
//! Nothing is rolled back. Because the manifest is validated in step 0, a
//! broken or missing manifest aborts before any file is touched; a write
//! failure in step 3 leaves the file from step 2 in place.

use crate::document::{ConfigurationDocument, Flavor};
use crate::error::InstallError;
use crate::manifest::{Manifest, ManifestPatch, MANIFEST_FILE};
use crate::render::render_module;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Installs packages into a project.
pub trait DependencyInstaller {
    /// Installs `packages` as development dependencies of the project in
    /// `dir`, returning once installation has finished.
    ///
    /// # Errors
    ///
    /// Returns [`InstallError::Subprocess`] if installation fails.
    fn install(&self, dir: &Path, packages: &[String]) -> Result<(), InstallError>;
}

/// Runs a package manager CLI (`npm` by default).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageManager {
    program: String,
}

impl PackageManager {
    /// The `npm` package manager.
    #[must_use]
    pub fn npm() -> Self {
        Self::new("npm")
    }

    /// A package manager invoked as `program install --save-dev ...`.
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Program name.
    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments passed to the program.
    #[must_use]
    pub fn args(&self, packages: &[String]) -> Vec<String> {
        let mut args = vec!["install".to_string(), "--save-dev".to_string()];
        args.extend(packages.iter().cloned());
        args
    }

    /// Full command line, for messages.
    #[must_use]
    pub fn command_line(&self, packages: &[String]) -> String {
        let mut parts = vec![self.program.clone()];
        parts.extend(self.args(packages));
        parts.join(" ")
    }
}

impl Default for PackageManager {
    fn default() -> Self {
        Self::npm()
    }
}

impl DependencyInstaller for PackageManager {
    fn install(&self, dir: &Path, packages: &[String]) -> Result<(), InstallError> {
        let command = self.command_line(packages);
        tracing::debug!("Running `{}` in {}", command, dir.display());

        let status = Command::new(&self.program)
            .args(self.args(packages))
            .current_dir(dir)
            .status()
            .map_err(|e| InstallError::Subprocess {
                command: command.clone(),
                reason: e.to_string(),
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(InstallError::Subprocess {
                command,
                reason: status.to_string(),
            })
        }
    }
}

/// Everything the installer needs to provision one project.
#[derive(Debug, Clone, PartialEq)]
pub struct InstallPlan {
    /// Document flavor being installed.
    pub flavor: Flavor,
    /// Consumer project directory.
    pub project_dir: PathBuf,
    /// Manifest path relative to `project_dir`.
    pub manifest: PathBuf,
    /// Bootstrap file name relative to `project_dir`.
    pub config_file: String,
    /// Rendered bootstrap module.
    pub config_contents: String,
    /// Packages to install.
    pub dev_dependencies: Vec<String>,
    /// Scripts to register.
    pub patch: ManifestPatch,
    /// Skip step 1.
    pub skip_dependencies: bool,
}

impl InstallPlan {
    /// Builds the plan for installing `doc` into `project_dir`, with the
    /// file names, packages and scripts of the document's flavor.
    ///
    /// # Errors
    ///
    /// Returns [`InstallError::Render`] if the document cannot be rendered.
    pub fn for_document(
        doc: &ConfigurationDocument,
        project_dir: impl Into<PathBuf>,
    ) -> Result<Self, InstallError> {
        let flavor = doc.flavor();
        let patch = flavor
            .scripts()
            .into_iter()
            .fold(ManifestPatch::new(), |p, (name, cmd)| p.script(name, cmd));

        Ok(Self {
            flavor,
            project_dir: project_dir.into(),
            manifest: PathBuf::from(MANIFEST_FILE),
            config_file: flavor.config_file_name().to_string(),
            config_contents: render_module(doc).map_err(InstallError::Render)?,
            dev_dependencies: flavor
                .dev_dependencies()
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
            patch,
            skip_dependencies: false,
        })
    }

    /// Uses a different manifest path.
    #[must_use]
    pub fn with_manifest(mut self, manifest: impl Into<PathBuf>) -> Self {
        self.manifest = manifest.into();
        self
    }

    /// Enables or disables step 1.
    #[must_use]
    pub fn skip_dependencies(mut self, skip: bool) -> Self {
        self.skip_dependencies = skip;
        self
    }

    /// Absolute (or cwd-relative) manifest path.
    #[must_use]
    pub fn manifest_path(&self) -> PathBuf {
        self.project_dir.join(&self.manifest)
    }

    /// Absolute (or cwd-relative) bootstrap file path.
    #[must_use]
    pub fn config_path(&self) -> PathBuf {
        self.project_dir.join(&self.config_file)
    }
}

/// A completed pipeline step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Packages were installed.
    DependenciesInstalled(Vec<String>),
    /// Installation was skipped on request.
    DependenciesSkipped,
    /// Bootstrap file written.
    ConfigWritten(PathBuf),
    /// Manifest rewritten.
    ManifestUpdated(PathBuf),
}

/// Steps performed by a successful run, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstallReport {
    /// Completed steps.
    pub steps: Vec<Step>,
}

/// Runs the pipeline described by `plan`.
///
/// # Errors
///
/// Returns the first step's error; later steps are not attempted.
pub fn install(
    plan: &InstallPlan,
    deps: &dyn DependencyInstaller,
) -> Result<InstallReport, InstallError> {
    let mut report = InstallReport::default();

    let manifest_path = plan.manifest_path();
    tracing::debug!("Reading {}", manifest_path.display());
    let mut manifest = Manifest::load(&manifest_path)?;
    plan.patch.apply(&mut manifest)?;
    let manifest_text = manifest.to_pretty_string()?;

    if plan.skip_dependencies {
        tracing::info!("Skipping dependency installation");
        report.steps.push(Step::DependenciesSkipped);
    } else {
        tracing::info!("Installing ESLint as a development dependency");
        deps.install(&plan.project_dir, &plan.dev_dependencies)?;
        report
            .steps
            .push(Step::DependenciesInstalled(plan.dev_dependencies.clone()));
    }

    let config_path = plan.config_path();
    tracing::info!("Setting ./{}", plan.config_file);
    std::fs::write(&config_path, &plan.config_contents)
        .map_err(|e| InstallError::file_access(&config_path, e))?;
    report.steps.push(Step::ConfigWritten(config_path));

    tracing::info!("Updating {}", plan.manifest.display());
    std::fs::write(&manifest_path, manifest_text)
        .map_err(|e| InstallError::file_access(&manifest_path, e))?;
    report.steps.push(Step::ManifestUpdated(manifest_path));

    Ok(report)
}
