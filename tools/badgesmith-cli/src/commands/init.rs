//! Write the default config file.

use badgesmith_common::config::{config_file_path, AppConfig};

pub fn run(force: bool) -> anyhow::Result<()> {
    let path = config_file_path();
    if path.exists() && !force {
        anyhow::bail!(
            "Config already exists at {} (use --force to overwrite)",
            path.display()
        );
    }

    let config = AppConfig::default();
    let written = config
        .save()
        .map_err(|e| anyhow::anyhow!("Failed to write config: {e}"))?;

    println!("Config written to {}", written.display());
    println!("  Assets:     {}", config.badge.assets_dir.display());
    println!("  Output:     {}", config.output_dir.display());
    println!("  Variant:    {}", config.badge.default_variant);
    println!(
        "  Gestures:   wheel step {}, pinch coefficient {}",
        config.gestures.wheel_step, config.gestures.pinch_coefficient
    );
    println!();
    println!("Expected assets:");
    println!("  {}/", config.badge.assets_dir.display());
    println!("  ├── joinme_speaking.jpg   (speaking template)");
    println!("  └── joinme_attending.jpg  (attending template)");

    Ok(())
}
