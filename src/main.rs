use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use std::io::Write;
use std::path::{Path, PathBuf};

use problembuddy::app::App;
use problembuddy::catalog::Catalog;
use problembuddy::config::Config;
use problembuddy::launcher::SystemLauncher;
use problembuddy::preferences::PreferenceStore;
use problembuddy::storage::{Database, DatabaseError};
use problembuddy::ui;

/// Get the config directory path (~/.config/problembuddy/)
fn get_config_dir() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME environment variable not set")?;
    let config_dir = PathBuf::from(home).join(".config").join("problembuddy");
    Ok(config_dir)
}

/// Atomically copy a file using write-to-temp-then-rename pattern.
/// The destination is never left in a partial state.
fn atomic_copy(src: &Path, dst: &Path) -> Result<()> {
    // Unpredictable temp name; create_new refuses a pre-planted symlink
    use std::time::{SystemTime, UNIX_EPOCH};
    let random_suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    let temp_path = dst.with_extension(format!("tmp.{:016x}", random_suffix));

    let content = std::fs::read(src)
        .with_context(|| format!("Failed to read source file '{}'", src.display()))?;

    let mut temp_file = std::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&temp_path)
        .with_context(|| {
            format!(
                "Failed to create temporary file '{}': check directory permissions or disk space",
                temp_path.display()
            )
        })?;

    temp_file.write_all(&content).with_context(|| {
        let _ = std::fs::remove_file(&temp_path);
        format!(
            "Failed to write to temporary file '{}': disk may be full",
            temp_path.display()
        )
    })?;

    temp_file.sync_all().with_context(|| {
        let _ = std::fs::remove_file(&temp_path);
        format!(
            "Failed to sync temporary file '{}' to disk",
            temp_path.display()
        )
    })?;
    drop(temp_file);

    // On Windows, rename fails if destination exists, so remove it first
    #[cfg(windows)]
    if dst.exists() {
        std::fs::remove_file(dst).with_context(|| {
            let _ = std::fs::remove_file(&temp_path);
            format!(
                "Failed to remove existing '{}' before atomic replace",
                dst.display()
            )
        })?;
    }

    std::fs::rename(&temp_path, dst).with_context(|| {
        let _ = std::fs::remove_file(&temp_path);
        format!(
            "Failed to rename '{}' to '{}': check permissions",
            temp_path.display(),
            dst.display()
        )
    })?;

    Ok(())
}

#[derive(Parser, Debug)]
#[command(
    name = "problembuddy",
    about = "Terminal launchpad for your favourite web applications"
)]
struct Args {
    /// Forget favorites, dismissed dialogs, theme and view mode
    #[arg(long)]
    reset_prefs: bool,

    /// Import a catalog TOML file (copies to config directory)
    #[arg(long, value_name = "FILE")]
    import_catalog: Option<PathBuf>,

    /// Print the catalog and exit
    #[arg(long)]
    list: bool,

    /// Use a different config file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

/// Route tracing output to a log file; the TUI owns stdout.
fn init_tracing(config_dir: &Path) -> Result<()> {
    let log_path = config_dir.join("problembuddy.log");
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open log file '{}'", log_path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

/// Validate `import_file` as a catalog, back up the current one, then
/// replace it.
fn import_catalog(import_file: &Path, catalog_path: &Path, config_dir: &Path) -> Result<()> {
    // Resolve symlinks before reading
    let canonical_import = import_file
        .canonicalize()
        .with_context(|| format!("Failed to resolve import file: {}", import_file.display()))?;

    let metadata = std::fs::metadata(&canonical_import)?;
    if !metadata.is_file() {
        anyhow::bail!("Import path must be a regular file");
    }

    let catalog = Catalog::load(&canonical_import)
        .with_context(|| format!("Invalid catalog file: {}", canonical_import.display()))?
        .ok_or_else(|| anyhow::anyhow!("Import file disappeared while reading"))?;

    if catalog_path.exists() {
        let backup_name = format!(
            "catalog.toml.backup.{}",
            Utc::now().format("%Y%m%d_%H%M%S")
        );
        let backup_path = config_dir.join(&backup_name);

        atomic_copy(catalog_path, &backup_path).with_context(|| {
            format!(
                "Failed to create backup at '{}'. Original file is unchanged.",
                backup_path.display()
            )
        })?;
        println!("Backed up existing catalog to: {}", backup_path.display());
    }

    atomic_copy(&canonical_import, catalog_path).with_context(|| {
        format!(
            "Failed to import catalog '{}'. If a backup was created, your previous catalog is preserved there.",
            canonical_import.display()
        )
    })?;
    println!(
        "Imported {} apps to: {}",
        catalog.len(),
        catalog_path.display()
    );
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Set up config directory
    let config_dir = get_config_dir()?;
    if !config_dir.exists() {
        std::fs::create_dir_all(&config_dir).context("Failed to create config directory")?;
        println!("Created config directory: {}", config_dir.display());
    }

    // User-only access on Unix
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        if let Err(e) =
            std::fs::set_permissions(&config_dir, std::fs::Permissions::from_mode(0o700))
        {
            eprintln!(
                "Warning: could not restrict permissions on {}: {}",
                config_dir.display(),
                e
            );
        }
    }

    init_tracing(&config_dir)?;

    let config_path = args
        .config
        .clone()
        .unwrap_or_else(|| config_dir.join("config.toml"));
    let catalog_path = config_dir.join("catalog.toml");
    let db_path = config_dir.join("problembuddy.db");

    let config = match Config::load(&config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {} ({})", e, config_path.display());
            std::process::exit(1);
        }
    };

    if let Some(import_file) = &args.import_catalog {
        import_catalog(import_file, &catalog_path, &config_dir)?;
    }

    let catalog = match Catalog::load(&catalog_path) {
        Ok(Some(catalog)) => catalog,
        Ok(None) => Catalog::builtin(),
        Err(e) => {
            eprintln!("Error: {} ({})", e, catalog_path.display());
            eprintln!("Fix the file or remove it to use the built-in catalog.");
            std::process::exit(1);
        }
    };

    if args.list {
        for entry in catalog.entries() {
            println!(
                "{:<16} {:<20} {}",
                entry.id, entry.title, entry.destination
            );
        }
        return Ok(());
    }

    let db_path_str = db_path
        .to_str()
        .ok_or_else(|| anyhow::anyhow!("Invalid UTF-8 in database path"))?;
    let db = match Database::open(db_path_str).await {
        Ok(db) => db,
        Err(DatabaseError::InstanceLocked) => {
            eprintln!(
                "Error: Another instance of problembuddy appears to be running. Please close it and try again."
            );
            std::process::exit(1);
        }
        Err(e) => {
            return Err(anyhow::anyhow!("Failed to open database: {}", e));
        }
    };

    let mut prefs = match PreferenceStore::load(&config, &db).await {
        Ok(p) => p,
        Err(e) => {
            tracing::warn!(error = %e, "Could not read stored preferences, starting with defaults");
            PreferenceStore::from_config(&config)
        }
    };

    if args.reset_prefs {
        let deleted = prefs
            .reset()
            .await
            .context("Failed to reset preferences")?;
        println!("Preferences reset ({} entries removed).", deleted);
    }

    let mut app = App::new(&config, catalog, prefs, Box::new(SystemLauncher));

    let result = ui::run(&mut app).await;
    db.close().await;
    result?;

    println!("Goodbye!");
    Ok(())
}
