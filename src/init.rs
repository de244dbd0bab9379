use colored::*;
use std::{fs, path::Path};

use crate::config::CONFIG_FILE;

const TEMPLATE: &str = r#"# cdocs Configuration File

# Snapshot to load. Files ending in .gz are read as gzip.
snapshot = "./clojuredocs-snapshot.json"

# Namespace assumed when a symbol is given without one (e.g. `map`)
default_ns = "clojure.core"

# Width comments are wrapped to (capped by the terminal width)
wrap_width = 80

# Syntax highlight example code
highlight = true
"#;

pub fn init_config(force: bool) -> Result<(), String> {
    write_template(Path::new(CONFIG_FILE), force)?;

    println!("{} Created {}", "✅".green(), CONFIG_FILE);
    println!("\n{}", "Configuration file created with defaults:".cyan());
    println!("  {} snapshot = \"./clojuredocs-snapshot.json\"", "•".blue());
    println!("  {} default_ns = \"clojure.core\"", "•".blue());
    println!("  {} wrap_width = 80", "•".blue());
    println!("  {} highlight = true", "•".blue());
    println!(
        "\n{}",
        format!("Edit {} to customize your settings.", CONFIG_FILE).cyan()
    );

    Ok(())
}

fn write_template(config_path: &Path, force: bool) -> Result<(), String> {
    if config_path.exists() && !force {
        return Err(format!(
            "{} already exists. Use --force to overwrite.",
            config_path.display()
        ));
    }

    fs::write(config_path, TEMPLATE)
        .map_err(|e| format!("Failed to create {}: {}", config_path.display(), e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn test_template_parses_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        write_template(&path, false).unwrap();

        assert_eq!(Config::load_from(&path), Config::default());
    }

    #[test]
    fn test_refuses_overwrite_without_force() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "wrap_width = 40").unwrap();

        assert!(write_template(&path, false).is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), "wrap_width = 40");

        write_template(&path, true).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), TEMPLATE);
    }
}
