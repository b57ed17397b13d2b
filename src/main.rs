//! CLI entry point — bench simulator for the output configuration panel.
//!
//! Runs the panel against the in-crate mock registry so the synchronization
//! and test-interlock behavior can be exercised without a board, a telemetry
//! link or a windowing toolkit.
//!
//! # Usage
//!
//! Show the panel state after a pull:
//! ```bash
//! gcs_output_panel show
//! ```
//!
//! Arm the test interlock, drive one channel, disarm and verify the
//! telemetry metadata was restored:
//! ```bash
//! gcs_output_panel exercise --channel 3 --value 1600
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::sync::Arc;

use gcs_output_panel::board::FixedBoard;
use gcs_output_panel::config::Settings;
use gcs_output_panel::mock::{bench_registry_with_ranges, ScriptedPrompt};
use gcs_output_panel::panel::OutputPanel;
use gcs_output_panel::registry::ObjectRegistry;
use gcs_output_panel::schema::{ACTUATOR_COMMAND, FIELD_CHANNEL};

#[derive(Parser)]
#[command(name = "gcs_output_panel")]
#[command(about = "Bench simulator for the GCS output configuration panel", long_about = None)]
struct Cli {
    /// Settings file under config/ (without extension)
    #[arg(long)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Pull the mock registry into the panel and print the result
    Show,

    /// Arm test mode, drive one channel live, disarm and verify restore
    Exercise {
        /// Output channel to drive (1-based, as shown on the panel)
        #[arg(long, default_value = "1")]
        channel: usize,

        /// Value to command, in output units
        #[arg(long, default_value = "1600")]
        value: i32,

        /// Answer the safety confirmation with no
        #[arg(long)]
        decline: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let settings = Settings::new(cli.config.as_deref())?;
    env_logger::Builder::new()
        .parse_filters(&settings.log_level)
        .init();

    match cli.command {
        Commands::Show => show(&settings),
        Commands::Exercise {
            channel,
            value,
            decline,
        } => exercise(&settings, channel, value, decline),
    }
}

fn build_panel(settings: &Settings) -> (ObjectRegistry, OutputPanel) {
    let sim = &settings.simulator;
    let registry = bench_registry_with_ranges(sim.channel_min, sim.channel_max, sim.channel_neutral);
    let panel = OutputPanel::new(registry.clone())
        .with_board_info(Arc::new(FixedBoard(sim.board_model)));
    (registry, panel)
}

fn show(settings: &Settings) -> Result<()> {
    let (_registry, mut panel) = build_panel(settings);
    panel.refresh_from_board()?;

    println!(
        "Output configuration (board model {:#06x})",
        settings.simulator.board_model
    );
    println!();
    for form in panel.channels() {
        println!(
            "  channel {:>2}  {:<12} min {:>5}  neutral {:>5}  max {:>5}",
            form.display_number(),
            form.assignment_label(),
            form.min(),
            form.neutral(),
            form.max(),
        );
    }
    println!();
    for (index, bank) in panel.rate_banks().iter().enumerate() {
        let state = if bank.enabled { "" } else { "  (disabled)" };
        println!(
            "  bank {}  channels {:<8} {:>4} Hz{}",
            index + 1,
            bank.label,
            bank.rate,
            state
        );
    }
    println!();
    println!("  spin while armed: {}", panel.spinning_armed());
    println!("  dirty: {}", panel.is_dirty());
    Ok(())
}

fn exercise(settings: &Settings, channel: usize, value: i32, decline: bool) -> Result<()> {
    if channel == 0 {
        anyhow::bail!("channels are numbered from 1");
    }
    let index = channel - 1;

    let (registry, mut panel) = build_panel(settings);
    panel.refresh_from_board()?;

    let command = registry.require(ACTUATOR_COMMAND)?;
    let before = command.metadata();
    println!("Telemetry metadata before arming:");
    println!("{}", serde_json::to_string_pretty(&before)?);
    println!();

    let prompt = if decline {
        ScriptedPrompt::declining()
    } else {
        ScriptedPrompt::confirming()
    };

    if !panel.set_test_mode(true, &prompt)? {
        println!("Test mode refused; toggle snapped back to off.");
        return Ok(());
    }
    println!("🔧 Test mode armed — GCS holds the output channels.");

    panel.set_channel_neutral(index, value)?;
    let written = command.require_field(FIELD_CHANNEL)?.number_at(index)?;
    println!("Channel {channel} now commands {written}.");
    println!();

    panel.set_test_mode(false, &prompt)?;
    let after = command.metadata();
    if after == before {
        println!("✅ Disarmed; telemetry metadata restored verbatim.");
    } else {
        anyhow::bail!("metadata was not restored after disarming");
    }
    Ok(())
}
