mod cli;

use anyhow::{Context, Result};
use clap::Parser;

use sonograph::audio;
use sonograph::config::{self, EngineConfig};
use sonograph::spectrogram;

use cli::Cli;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let mut cli = Cli::parse();

    // Load config: explicit --config path, or auto-detect sonograph.toml / global config
    let config_path = cli.config.clone().or_else(|| {
        let local = std::path::PathBuf::from("sonograph.toml");
        if local.exists() {
            return Some(local);
        }
        if let Some(config_dir) = dirs::config_dir() {
            let platform = config_dir.join("sonograph").join("config.toml");
            if platform.exists() {
                return Some(platform);
            }
        }
        None
    });
    if let Some(ref path) = config_path {
        if let Some(cfg) = config::load_config(path) {
            log::info!("Loaded config from {}", path.display());
            // Merge: config values apply only when CLI is at its default
            if cli.window_ms == 20.0 { cli.window_ms = cfg.window_ms; }
            if cli.stride_ms == 10.0 { cli.stride_ms = cfg.stride_ms; }
            if cli.max_freq.is_none() { cli.max_freq = cfg.max_freq; }
            if cli.min_strength == 0.005 { cli.min_strength = cfg.min_strength; }
            if cli.quantization_scale == 10000 { cli.quantization_scale = cfg.quantization_scale; }
        } else {
            log::warn!("Failed to load config from {}", path.display());
        }
    }

    let input = cli.input.as_ref().context("Input audio file is required")?;
    if !input.exists() {
        anyhow::bail!("Input file not found: {}", input.display());
    }

    let engine_config = EngineConfig {
        window_ms: cli.window_ms,
        stride_ms: cli.stride_ms,
        max_freq: cli.max_freq,
        min_strength: cli.min_strength,
        quantization_scale: cli.quantization_scale,
    };

    log::info!("Input: {}", input.display());
    log::info!(
        "Window: {}ms, stride: {}ms, max_freq: {}",
        engine_config.window_ms,
        engine_config.stride_ms,
        engine_config
            .max_freq
            .map(|f| format!("{}Hz", f))
            .unwrap_or_else(|| "Nyquist".into())
    );

    log::info!("Decoding audio...");
    let audio_data = audio::decode::decode_audio_range(input, cli.offset, cli.duration)?;

    if cli.summary {
        let summary =
            spectrogram::summarize(&audio_data.samples, audio_data.sample_rate, &engine_config)?;
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    log::info!("Analyzing audio...");
    let report = spectrogram::analyze(&audio_data.samples, audio_data.sample_rate, &engine_config)?;

    let json = if cli.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };

    match cli.output {
        Some(ref path) => {
            std::fs::write(path, json)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            log::info!("Done! Output: {}", path.display());
        }
        None => println!("{}", json),
    }

    Ok(())
}
