mod cli;
mod config;
mod errors;
mod fan;
mod hub;
mod platform;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use simplelog::{ColorChoice, ConfigBuilder, LevelFilter, TermLogger, TerminalMode};

use cli::{Cli, Commands};
use config::PlatformConfig;
use fan::FanEntity;
use hub::{DryRunHub, HubRegistry};
use platform::{find_fan, setup_platform};

fn level_from_verbosity(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    let log_level = level_from_verbosity(cli.verbose);
    let _ = TermLogger::init(log_level, log_config, TerminalMode::Stderr, ColorChoice::Auto);
    info!("unipi-fan started (log level: {})", log_level);

    let config = PlatformConfig::load(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;

    let mut registry = HubRegistry::new();
    registry.insert(
        config.device_id.clone(),
        Arc::new(DryRunHub::new(config.device_id.clone())),
    );
    let mut fans = setup_platform(&config, &registry)?;

    match cli.command {
        Commands::List => cmd_list(&fans),
        Commands::Show { name } => cmd_show(find_fan(&mut fans, &name)?),
        Commands::On { name, percentage } => {
            let fan = find_fan(&mut fans, &name)?;
            fan.turn_on(percentage).await?;
            println!("{}", fan);
            Ok(())
        }
        Commands::Off { name } => {
            let fan = find_fan(&mut fans, &name)?;
            fan.turn_off().await?;
            println!("{}", fan);
            Ok(())
        }
        Commands::Set { name, percentage } => {
            let fan = find_fan(&mut fans, &name)?;
            fan.set_percentage(percentage).await?;
            println!("{}", fan);
            Ok(())
        }
    }
}

fn cmd_list(fans: &[FanEntity]) -> Result<()> {
    if fans.is_empty() {
        println!("No fans configured.");
        return Ok(());
    }

    println!(
        "{:<20} {:<6} {:<6} {:<7} {:>5} STATUS",
        "NAME", "DEVICE", "PORT", "MODE", "SPEED"
    );
    println!("{}", "-".repeat(56));
    for fan in fans {
        let status = if fan.is_on() { "on" } else { "off" };
        println!(
            "{:<20} {:<6} {:<6} {:<7} {:>4}% {}",
            fan.name(),
            fan.device(),
            fan.port(),
            fan.mode(),
            fan.percentage(),
            status
        );
    }
    Ok(())
}

fn cmd_show(fan: &FanEntity) -> Result<()> {
    let features: Vec<String> = fan
        .supported_features()
        .iter()
        .map(|feature| feature.to_string())
        .collect();

    println!("name:        {}", fan.name());
    println!("address:     {}/{}", fan.device(), fan.port());
    println!("mode:        {}", fan.mode());
    println!("state:       {}", if fan.is_on() { "on" } else { "off" });
    println!("percentage:  {}", fan.percentage());
    println!("preset mode: {}", fan.preset_mode());
    println!("features:    {}", features.join(", "));
    Ok(())
}
