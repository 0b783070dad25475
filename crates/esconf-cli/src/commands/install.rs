//! Install command implementation.

use anyhow::{Context, Result};
use esconf::{
    install, install_plan, Config, Flavor, InstallError, InstallPlan, PackageManager, Step,
};
use miette::Diagnostic;
use std::path::{Path, PathBuf};

use crate::config_resolver;
use crate::InstallArgs;

/// Install settings after command-line flags are applied over `esconf.toml`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Document flavor to install.
    pub flavor: Flavor,
    /// Package manager running the dependency install.
    pub package_manager: PackageManager,
    /// Whether the dependency install is skipped.
    pub skip_dependencies: bool,
    /// Manifest path relative to the project directory.
    pub manifest: PathBuf,
}

/// Merges flags over file configuration; flags win when given.
#[must_use]
pub fn settings(args: &InstallArgs, config: &Config) -> Settings {
    Settings {
        flavor: args.flavor.unwrap_or_else(|| config.flavor()),
        package_manager: PackageManager::new(
            args.package_manager
                .as_deref()
                .unwrap_or(&config.installer.package_manager),
        ),
        skip_dependencies: args.skip_install || config.installer.skip_dependencies,
        manifest: config.installer.manifest.clone(),
    }
}

/// Runs the install command.
pub fn run(args: &InstallArgs, config_path: Option<&Path>) -> Result<()> {
    let project_dir = args.dir.clone().unwrap_or_else(|| PathBuf::from("."));
    let config = config_resolver::resolve(&project_dir, config_path).load()?;
    let settings = settings(args, &config);

    let plan = install_plan(settings.flavor, &project_dir)
        .context("Failed to prepare configuration")?
        .with_manifest(&settings.manifest)
        .skip_dependencies(settings.skip_dependencies);

    tracing::debug!(
        "Installing {} configuration into {}",
        settings.flavor,
        project_dir.display()
    );

    let report = match install(&plan, &settings.package_manager) {
        Ok(report) => report,
        Err(e) => {
            report_hint(&e);
            return Err(e)
                .with_context(|| format!("Failed to install into {}", project_dir.display()));
        }
    };

    print_summary(&plan, &report.steps, &settings.package_manager);
    Ok(())
}

fn report_hint(err: &InstallError) {
    if let Some(help) = err.help() {
        tracing::error!("help: {help}");
    }
}

fn print_summary(plan: &InstallPlan, steps: &[Step], pm: &PackageManager) {
    println!(
        "\nConfigured {} ESLint for {}",
        plan.flavor,
        plan.project_dir.display()
    );
    for step in steps {
        match step {
            Step::DependenciesInstalled(packages) => {
                println!("  installed:  {}", pm.command_line(packages));
            }
            Step::DependenciesSkipped => println!("  installed:  (skipped)"),
            Step::ConfigWritten(path) => println!("  wrote:      {}", path.display()),
            Step::ManifestUpdated(path) => println!("  updated:    {}", path.display()),
        }
    }
    println!("\nNext steps:");
    println!("  Run: npm run lint");
}

#[cfg(test)]
mod tests {
    use super::*;

    const FILE: &str = r#"
flavor = "modern"

[installer]
package_manager = "pnpm"
skip_dependencies = false
manifest = "web/package.json"
"#;

    #[test]
    fn defaults_without_flags_or_file() {
        let s = settings(&InstallArgs::default(), &Config::default());
        assert_eq!(s.flavor, Flavor::Legacy);
        assert_eq!(s.package_manager, PackageManager::npm());
        assert!(!s.skip_dependencies);
        assert_eq!(s.manifest, PathBuf::from("package.json"));
    }

    #[test]
    fn file_values_apply_without_flags() {
        let config = Config::parse(FILE).unwrap();
        let s = settings(&InstallArgs::default(), &config);
        assert_eq!(s.flavor, Flavor::Modern);
        assert_eq!(s.package_manager.program(), "pnpm");
        assert_eq!(s.manifest, PathBuf::from("web/package.json"));
    }

    #[test]
    fn flags_override_file_values() {
        let config = Config::parse(FILE).unwrap();
        let args = InstallArgs {
            flavor: Some(Flavor::Legacy),
            skip_install: true,
            package_manager: Some("yarn".into()),
            ..InstallArgs::default()
        };
        let s = settings(&args, &config);
        assert_eq!(s.flavor, Flavor::Legacy);
        assert_eq!(s.package_manager.program(), "yarn");
        assert!(s.skip_dependencies);
        assert_eq!(s.manifest, PathBuf::from("web/package.json"));
    }

    #[test]
    fn skip_from_file_is_kept_without_flag() {
        let config = Config::parse("[installer]\nskip_dependencies = true").unwrap();
        assert!(settings(&InstallArgs::default(), &config).skip_dependencies);
    }
}
