//! Configuration paths for sqlbundle
//!
//! Simple path resolution with sensible defaults.
//! All paths are under ~/.sqlbundle/

use std::path::PathBuf;

/// Resolve the sqlbundle home directory.
///
/// Priority:
/// 1) SQLBUNDLE_HOME
/// 2) ~/.sqlbundle
/// 3) ./.sqlbundle
pub fn sqlbundle_home() -> PathBuf {
    if let Ok(override_path) = std::env::var("SQLBUNDLE_HOME") {
        return PathBuf::from(override_path);
    }
    if let Some(home) = dirs::home_dir() {
        return home.join(".sqlbundle");
    }
    PathBuf::from(".").join(".sqlbundle")
}

/// Get logs directory: ~/.sqlbundle/logs
pub fn logs_dir() -> PathBuf {
    sqlbundle_home().join("logs")
}

/// Ensure the logs directory exists
pub fn ensure_logs_dir() -> std::io::Result<PathBuf> {
    let dir = logs_dir();
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Arguments for the config command
#[derive(Debug, clap::Args)]
pub struct ConfigArgs {
    /// Show resolved paths in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Run the config command - shows current paths
pub fn run(args: ConfigArgs) -> anyhow::Result<()> {
    let home = sqlbundle_home();
    let logs = logs_dir();

    if args.json {
        let config = serde_json::json!({
            "home": home.to_string_lossy(),
            "logs": {
                "path": logs.to_string_lossy(),
                "exists": logs.exists(),
            },
            "default_output_name": sqlbundle::DEFAULT_OUTPUT_NAME,
        });
        println!("{}", serde_json::to_string_pretty(&config)?);
    } else {
        println!("SQLBUNDLE CONFIGURATION");
        println!("=======================");
        println!();
        println!("Home:     {}", home.display());
        println!();
        println!("Logs:     {}", logs.display());
        println!(
            "          exists: {}",
            if logs.exists() { "yes" } else { "no" }
        );
        println!();
        println!("Default output name: {}", sqlbundle::DEFAULT_OUTPUT_NAME);
    }

    Ok(())
}
