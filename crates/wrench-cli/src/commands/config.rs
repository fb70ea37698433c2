//! Config command implementation.
//!
//! Manages CLI configuration.

use anyhow::Result;
use wrench_ops::Config;

/// Show current configuration.
pub fn show(config: &Config) -> Result<()> {
    println!("v8-wrench Configuration");
    println!("{:-<40}", "");

    println!("Output Directory:     {}", config.output_dir.display());
    println!("Dump Suffix:          {}", config.dump_suffix);
    println!(
        "Marker:               {}",
        config.conventions.marker_qualified_name()
    );
    println!(
        "Annotation Namespace: {}",
        config.conventions.annotation_namespace
    );
    println!("Field Template:       {}", config.conventions.field_template);

    if let Some(config_path) = Config::config_file_path() {
        println!("\nConfig file: {}", config_path.display());
    }

    Ok(())
}

/// Set a configuration value.
pub fn set(config: &mut Config, key: &str, value: &str) -> Result<()> {
    config.set(key, value)?;
    config.save()?;
    println!("Set {} to: {}", key, value);
    Ok(())
}

/// Get a configuration value.
pub fn get(config: &Config, key: &str) -> Result<()> {
    match config.get(key) {
        Some(value) => println!("{}", value),
        None => anyhow::bail!(
            "Unknown config key: {}. Valid keys: {}",
            key,
            wrench_ops::CONFIG_KEYS.join(", ")
        ),
    }
    Ok(())
}

/// Reset configuration to defaults.
pub fn reset() -> Result<()> {
    let config = Config::default();
    config.save()?;
    println!("Configuration reset to defaults");
    Ok(())
}
