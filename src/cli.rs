use std::path::PathBuf;

use clap::Parser;

use crate::config::types::ColorMode;

#[derive(Parser)]
#[command(name = "devops-validate")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Validate DevOps pipeline artifacts: workflows, Dockerfiles, Terraform, Helm, and more")]
#[command(long_about = "Runs a battery of linters, schema checks, and local dry-runs over the \
DevOps artifacts in a project tree (CI workflows, Dockerfiles, Terraform/Terragrunt, Helm \
charts, Makefiles, shell scripts, Jenkinsfiles, Kubernetes manifests, Fluent Bit and Loki \
configs) and reports every finding through a single severity ladder.")]
pub struct Cli {
    /// Path to the project directory to validate
    #[arg(value_name = "PATH", default_value = ".")]
    pub path: PathBuf,

    /// Path to a config file, overriding the project's `.validate.toml`
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Run only syntax/schema analyzers (yaml-lint, yaml-schema, tf-lint, make-lint, ...)
    #[arg(long, conflicts_with_all = ["best_practices", "security_only", "test_only"])]
    pub syntax_only: bool,

    /// Run only best-practice analyzers (core-best-practices, docker-lint, helm-lint, ...)
    #[arg(long, conflicts_with_all = ["syntax_only", "security_only", "test_only"])]
    pub best_practices: bool,

    /// Run only security analyzers (tf-security, secret-scan, action-versions)
    #[arg(long, conflicts_with_all = ["syntax_only", "best_practices", "test_only"])]
    pub security_only: bool,

    /// Run only analyzers that execute or dry-run the artifact (workflow-local-run, k8s-dry-run)
    #[arg(long, conflicts_with_all = ["syntax_only", "best_practices", "security_only"])]
    pub test_only: bool,

    /// Disable security analyzers (tf-security, secret-scan, action-versions)
    #[arg(long, conflicts_with_all = ["security_only"])]
    pub no_security: bool,

    /// Treat warnings as failing for exit-code purposes
    #[arg(long)]
    pub strict: bool,

    /// Emit findings as JSON instead of human-readable text
    #[arg(long)]
    pub json: bool,

    /// Look up latest known versions for referenced third-party extensions (GitHub Actions, Helm deps, Terraform providers)
    #[arg(long)]
    pub check_versions: bool,

    /// Control ANSI color in human output
    #[arg(long, value_enum)]
    pub color: Option<ColorMode>,

    /// Enable verbose logging (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except the final report
    #[arg(short, long)]
    pub quiet: bool,
}

/// The subset of analyzers selected by `--syntax-only`.
pub const SYNTAX_ANALYZERS: &[&str] = &[
    "yaml-lint",
    "yaml-schema",
    "shell-lint",
    "tf-lint",
    "helm-lint",
    "k8s-schema",
    "make-lint",
    "jenkins-lint",
];

/// The subset of analyzers selected by `--best-practices`.
pub const BEST_PRACTICE_ANALYZERS: &[&str] = &["core-best-practices", "docker-lint", "helm-lint"];

/// The subset of analyzers selected by `--security-only`, and excluded by `--no-security`.
pub const SECURITY_ANALYZERS: &[&str] = &["tf-security", "secret-scan", "action-versions"];

/// The subset of analyzers selected by `--test-only`.
pub const TEST_ANALYZERS: &[&str] = &["workflow-local-run", "k8s-dry-run"];

impl Cli {
    /// Initialize logging based on verbosity level.
    pub fn init_logging(&self) {
        if self.quiet {
            return;
        }

        let level = match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        };

        env_logger::Builder::from_default_env()
            .filter_level(level)
            .init();
    }

    /// Narrow a full analyzer set down to the one selected by whichever
    /// scoping flag (if any) was passed, then apply `--no-security` on top.
    pub fn scoped_analyzers(&self, all_enabled: &[String]) -> Vec<String> {
        let mut scoped: Vec<String> = if self.syntax_only {
            intersect(all_enabled, SYNTAX_ANALYZERS)
        } else if self.best_practices {
            intersect(all_enabled, BEST_PRACTICE_ANALYZERS)
        } else if self.security_only {
            intersect(all_enabled, SECURITY_ANALYZERS)
        } else if self.test_only {
            intersect(all_enabled, TEST_ANALYZERS)
        } else {
            all_enabled.to_vec()
        };

        if self.no_security {
            scoped.retain(|name| !SECURITY_ANALYZERS.contains(&name.as_str()));
        }

        scoped
    }
}

fn intersect(enabled: &[String], subset: &[&str]) -> Vec<String> {
    enabled
        .iter()
        .filter(|name| subset.contains(&name.as_str()))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        let mut full = vec!["devops-validate"];
        full.extend_from_slice(args);
        Cli::parse_from(full)
    }

    #[test]
    fn default_path_is_current_directory() {
        let c = cli(&[]);
        assert_eq!(c.path, PathBuf::from("."));
    }

    #[test]
    fn syntax_only_narrows_to_syntax_analyzers() {
        let c = cli(&["--syntax-only"]);
        let all: Vec<String> = crate::config::types::ALL_ANALYZERS.iter().map(|s| s.to_string()).collect();
        let scoped = c.scoped_analyzers(&all);
        assert!(scoped.contains(&"yaml-lint".to_string()));
        assert!(!scoped.contains(&"secret-scan".to_string()));
    }

    #[test]
    fn no_security_strips_security_analyzers_from_default_scope() {
        let c = cli(&["--no-security"]);
        let all: Vec<String> = crate::config::types::ALL_ANALYZERS.iter().map(|s| s.to_string()).collect();
        let scoped = c.scoped_analyzers(&all);
        assert!(!scoped.contains(&"secret-scan".to_string()));
        assert!(scoped.contains(&"yaml-lint".to_string()));
    }
}
