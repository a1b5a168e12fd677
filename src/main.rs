use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use rebalance_tools::assets::preview::{PLAYSTORE_DIR, SIZE_REPORT_FILES};
use rebalance_tools::assets::{
    export_previews, generate_alternates, generate_feature_graphic, report_sizes, resize_file,
};
use rebalance_tools::script::{check_script, run_script, PatchScript, RunError};
use similar::TextDiff;
use std::env;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Parser)]
#[command(name = "rebalance-tools")]
#[command(about = "Maintenance tooling for the Rebalance app", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply patch scripts to the project
    Apply {
        /// Path to the project root (auto-detected if not specified)
        #[arg(short, long)]
        project: Option<PathBuf>,

        /// Specific script to apply (otherwise applies all in patches/)
        #[arg(short, long)]
        script: Option<PathBuf>,

        /// Dry run - show what would change without modifying files
        #[arg(short = 'n', long)]
        dry_run: bool,

        /// Show unified diff of changes
        #[arg(short, long)]
        diff: bool,
    },

    /// Check which patch scripts would still apply cleanly
    Status {
        /// Path to the project root (auto-detected if not specified)
        #[arg(short, long)]
        project: Option<PathBuf>,
    },

    /// Generate the 1024x500 Play Store feature graphic
    FeatureGraphic {
        /// App icon to composite (skipped if unreadable)
        #[arg(default_value = "assets/icons/app_icon-512.png")]
        icon: PathBuf,

        /// Output path
        #[arg(default_value = "assets/playstore/feature_graphic.png")]
        output: PathBuf,
    },

    /// Generate the alternate feature graphic layouts with thumbnails
    Alternates {
        /// Output directory
        #[arg(default_value = PLAYSTORE_DIR)]
        out_dir: PathBuf,
    },

    /// Export fixed-size preview copies of the feature graphics
    Previews {
        /// Asset directory
        #[arg(default_value = PLAYSTORE_DIR)]
        dir: PathBuf,
    },

    /// Report the dimensions of the listing assets
    CheckSizes {
        /// Asset directory
        #[arg(default_value = PLAYSTORE_DIR)]
        dir: PathBuf,
    },

    /// Resize an image to fit a bounding box, centered on a padded canvas
    Resize {
        input: PathBuf,
        output: PathBuf,
        width: u32,
        height: u32,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Apply {
            project,
            script,
            dry_run,
            diff,
        } => cmd_apply(project, script, dry_run, diff),

        Commands::Status { project } => cmd_status(project),

        Commands::FeatureGraphic { icon, output } => {
            generate_feature_graphic(Some(&icon), &output)?;
            println!("Saved feature graphic to {}", output.display());
            Ok(())
        }

        Commands::Alternates { out_dir } => {
            for path in generate_alternates(&out_dir)? {
                println!("Saved {}", path.display());
            }
            Ok(())
        }

        Commands::Previews { dir } => {
            let outcome = export_previews(&dir)?;
            for path in &outcome.missing {
                println!("{} {}", "Missing".yellow(), path.display());
            }
            for path in &outcome.saved {
                println!("Saved {}", path.display());
            }
            Ok(())
        }

        Commands::CheckSizes { dir } => {
            for entry in report_sizes(&dir, &SIZE_REPORT_FILES) {
                match entry.dimensions {
                    Some((w, h)) => println!("{} ({}, {})", entry.name, w, h),
                    None => println!("{} {}", entry.name, "MISSING".red()),
                }
            }
            Ok(())
        }

        Commands::Resize {
            input,
            output,
            width,
            height,
        } => {
            resize_file(&input, &output, width, height)?;
            println!("Saved resized image to {}", output.display());
            Ok(())
        }
    }
}

/// Patch scripts for a run: `<project>/patches/*.toml` when the project
/// keeps scripts alongside the target, falling back to `./patches/*.toml`.
/// Name order is execution order, so later scripts may anchor on text an
/// earlier one produced.
fn discover_scripts(project: &Path) -> Result<Vec<PathBuf>> {
    let mut candidates = vec![project.join("patches")];
    if let Ok(cwd) = env::current_dir() {
        candidates.push(cwd.join("patches"));
    }

    for dir in candidates {
        let scripts = scripts_in(&dir);
        if !scripts.is_empty() {
            return Ok(scripts);
        }
    }

    anyhow::bail!(
        "No .toml patch scripts found in either ./patches or {}/patches",
        project.display()
    )
}

fn scripts_in(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .max_depth(1)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| path.extension().and_then(|s| s.to_str()) == Some("toml"))
        .collect();
    files.sort();
    files
}

/// Resolve the project root.
///
/// Priority order:
/// 1. Explicit --project flag
/// 2. Auto-detect by walking up from the current directory
fn resolve_project(cli_project: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = cli_project {
        return Ok(path.canonicalize()?);
    }

    if let Some(path) = auto_detect_project() {
        println!(
            "{}",
            format!("Auto-detected project: {}", path.display()).dimmed()
        );
        return Ok(path);
    }

    anyhow::bail!(
        "{}\n{}\n  {}\n  {}",
        "Could not find the app project.".red(),
        "Try one of:".bold(),
        "1. cd into the project directory: cd /path/to/rebalance && rebalance-tools apply",
        "2. Specify explicitly: rebalance-tools apply --project /path/to/rebalance"
    )
}

/// Auto-detect the project by walking up from the current directory looking
/// for a pubspec.yaml with a lib/ directory beside it.
fn auto_detect_project() -> Option<PathBuf> {
    let current = env::current_dir().ok()?;

    for ancestor in current.ancestors() {
        if ancestor.join("pubspec.yaml").exists() && ancestor.join("lib").exists() {
            return Some(ancestor.to_path_buf());
        }
    }

    None
}

/// Unified diff of the script's effect on the target, colorized by line.
fn display_diff(file: &Path, original: &str, patched: &str) {
    let name = file.display().to_string();
    let diff = TextDiff::from_lines(original, patched);
    let unified = diff
        .unified_diff()
        .header(&format!("{name} (original)"), &format!("{name} (patched)"))
        .to_string();

    println!();
    for line in unified.lines() {
        if line.starts_with("---") || line.starts_with("+++") || line.starts_with("@@") {
            println!("{}", line.dimmed());
        } else if line.starts_with('+') {
            println!("{}", line.green());
        } else if line.starts_with('-') {
            println!("{}", line.red());
        } else {
            println!("{line}");
        }
    }
}

fn cmd_apply(
    project: Option<PathBuf>,
    script: Option<PathBuf>,
    dry_run: bool,
    show_diff: bool,
) -> Result<()> {
    let project = resolve_project(project)?;

    let script_files = if let Some(path) = script {
        vec![path]
    } else {
        discover_scripts(&project)?
    };

    println!("Project: {}", project.display());
    println!();

    let mut total_applied = 0;

    for script_file in script_files {
        println!("Loading {}...", script_file.display());
        let script = PatchScript::load(&script_file)?;

        let result = if dry_run {
            println!("{}", "  [DRY RUN - computing changes only]".cyan());
            check_script(&script, &project)
        } else {
            run_script(&script, &project)
        };

        match result {
            Ok(outcome) => {
                let verb = if dry_run { "Would patch" } else { "Patched" };
                println!(
                    "{} {}: {} {}",
                    "✓".green(),
                    script.meta.name,
                    verb,
                    outcome.file.display()
                );
                for report in &outcome.reports {
                    println!("    {} ({} replaced)", report.id, report.replaced);
                }
                total_applied += 1;

                if show_diff && outcome.changed() {
                    display_diff(&outcome.file, &outcome.original, &outcome.patched);
                }
            }
            Err(e) => {
                eprintln!("{} {}: {}", "✗".red(), script.meta.name, e);
                diagnose(&e);

                // One-shot migration semantics: partial success across
                // scripts is worse than stopping here.
                eprintln!();
                eprintln!("{}", "Aborting: no further scripts will run.".red());
                std::process::exit(1);
            }
        }

        println!();
    }

    println!("{}", "Summary:".bold());
    println!(
        "  {} script(s) {}",
        format!("{}", total_applied).green(),
        if dry_run { "would apply" } else { "applied" }
    );

    Ok(())
}

/// Extra context for the failure classes a user can act on.
fn diagnose(error: &RunError) {
    match error {
        RunError::Patch(e) => {
            eprintln!("  {}", "GUARD FAILED: expected text not found".red());
            eprintln!("  Failing step: #{}", e.step_index());
            eprintln!("  Possible causes:");
            eprintln!("    - The script was already applied");
            eprintln!("    - The file was patched differently or edited by hand");
            eprintln!("    - The file drifted from the snapshot the script assumes");
        }
        RunError::BaselineDrift { .. } => {
            eprintln!("  {}", "BASELINE MISMATCH: target is not the expected snapshot".red());
            eprintln!("  Action: re-derive the script against the current file");
        }
        RunError::TargetMissing(path) => {
            eprintln!("  File: {}", path.display());
            eprintln!("  Action: check meta.file against the project layout");
        }
        _ => {}
    }
}

fn cmd_status(project: Option<PathBuf>) -> Result<()> {
    let project = resolve_project(project)?;
    let script_files = discover_scripts(&project)?;

    println!("{}", "Patch Script Status".bold());
    println!("Project: {}", project.display());
    println!();

    let mut pending = 0;
    let mut stale = 0;

    // Read-only: check_script never writes
    for script_file in script_files {
        let script = PatchScript::load(&script_file)?;
        match check_script(&script, &project) {
            Ok(outcome) => {
                println!(
                    "{} {}: would apply cleanly ({} step(s))",
                    "✓".green(),
                    script.meta.name,
                    outcome.reports.len()
                );
                pending += 1;
            }
            Err(e) => {
                println!("{} {}: {}", "⊙".yellow(), script.meta.name, e);
                stale += 1;
            }
        }
    }

    println!();
    println!("{}", "Summary:".bold());
    println!("  {} pending", format!("{}", pending).green());
    println!(
        "  {} not applicable (already applied or drifted)",
        format!("{}", stale).yellow()
    );

    Ok(())
}
