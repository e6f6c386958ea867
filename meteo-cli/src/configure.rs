use anyhow::Context;
use inquire::{Confirm, CustomType, Select, Text};
use meteo_core::{Config, UnitSystem};

/// Walk through every setting, pre-filled with the current value, then save.
pub fn run() -> anyhow::Result<()> {
    let mut config = Config::load().context("Failed to load configuration")?;

    let systems = UnitSystem::all().to_vec();
    let start = systems.iter().position(|s| *s == config.units).unwrap_or_default();
    config.units = Select::new("Default unit system:", systems)
        .with_starting_cursor(start)
        .prompt()
        .context("Failed to read unit system")?;

    config.timezone = Text::new("Forecast timezone (\"auto\" uses the location's own):")
        .with_default(&config.timezone)
        .prompt()
        .context("Failed to read timezone")?;

    config.request_timeout_secs = CustomType::<u64>::new("Request timeout in seconds (0 = none):")
        .with_default(config.request_timeout_secs.unwrap_or(0))
        .with_error_message("Please enter a whole number of seconds")
        .prompt()
        .map(|secs| (secs > 0).then_some(secs))
        .context("Failed to read timeout")?;

    config.endpoints.geocoding = Text::new("Geocoding endpoint:")
        .with_default(&config.endpoints.geocoding)
        .prompt()
        .context("Failed to read geocoding endpoint")?;

    config.endpoints.forecast = Text::new("Forecast endpoint:")
        .with_default(&config.endpoints.forecast)
        .prompt()
        .context("Failed to read forecast endpoint")?;

    let save = Confirm::new("Save configuration?")
        .with_default(true)
        .prompt()
        .context("Failed to read confirmation")?;

    if save {
        let path = config.save().context("Failed to save configuration")?;
        println!("Saved configuration to {}", path.display());
    } else {
        println!("Configuration not saved.");
    }

    Ok(())
}
