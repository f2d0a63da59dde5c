use std::path::PathBuf;

use clap::ArgMatches;
use tracing::{error, info};

use wincap_core::capture::find_window_by_id;
use wincap_core::events;
use wincap_core::output::{ImageFormat, default_file_name, save_to_file, to_base64};
use wincap_core::{CaptureOptions, WincapConfig, WindowCapture, WindowId, create_capture};

use crate::table;

pub fn run_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    events::log_app_startup();

    match matches.subcommand() {
        Some(("list", sub_matches)) => handle_list_command(sub_matches),
        Some(("capture", sub_matches)) => handle_capture_command(sub_matches),
        _ => {
            eprintln!("Unknown command. Run 'wincap --help' for usage.");
            error!(event = "cli.command_unknown");
            Err("Unknown command".into())
        }
    }
}

fn handle_list_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let json_output = matches.get_flag("json");

    info!(event = "cli.list_windows_started", json_output = json_output);

    let capturer = create_capture();
    match capturer.list_windows() {
        Ok(windows) => {
            if json_output {
                let json = serde_json::to_string_pretty(&windows).inspect_err(|e| {
                    eprintln!("Failed to serialize window list: {}", e);
                    error!(event = "cli.list_windows_serialize_failed", error = %e);
                })?;
                println!("{}", json);
            } else if windows.is_empty() {
                println!("No windows found.");
            } else {
                println!("Windows:");
                table::print_windows_table(&windows);
            }

            info!(event = "cli.list_windows_completed", count = windows.len());
            Ok(())
        }
        Err(e) => {
            eprintln!("Failed to list windows: {}", e);
            error!(event = "cli.list_windows_failed", error = %e);
            events::log_app_error(&e);
            Err(e.into())
        }
    }
}

/// Where a finished capture goes.
#[derive(Debug, PartialEq)]
enum Destination {
    File(PathBuf),
    Base64,
}

fn resolve_destination(
    output_path: Option<&String>,
    base64_flag: bool,
    config: &WincapConfig,
    format: ImageFormat,
) -> Destination {
    if let Some(path) = output_path {
        return Destination::File(PathBuf::from(path));
    }
    if base64_flag {
        return Destination::Base64;
    }
    match &config.output.directory {
        Some(dir) => Destination::File(dir.join(default_file_name(format))),
        None => Destination::Base64,
    }
}

fn resolve_format(
    format_arg: Option<&String>,
    quality_arg: Option<u8>,
    config: &WincapConfig,
) -> ImageFormat {
    ImageFormat::from_config(&config.output, format_arg.map(String::as_str), quality_arg)
}

fn resolve_options(crop_flag: bool, config: &WincapConfig) -> CaptureOptions {
    if crop_flag {
        CaptureOptions::CROP_TITLE
    } else {
        config.capture.options()
    }
}

fn handle_capture_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let title = matches.get_one::<String>("title");
    let window_id = matches.get_one::<u64>("id").copied();
    let output_path = matches.get_one::<String>("output");
    let base64_flag = matches.get_flag("base64");

    let config = match WincapConfig::load_hierarchy() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            error!(event = "cli.config_load_failed", error = %e);
            events::log_app_error(&e);
            return Err(e.into());
        }
    };

    let options = resolve_options(matches.get_flag("crop-title"), &config);
    let format = resolve_format(
        matches.get_one::<String>("format"),
        matches.get_one::<u8>("quality").copied(),
        &config,
    );
    let destination = resolve_destination(output_path, base64_flag, &config, format);

    info!(
        event = "cli.capture_started",
        title = ?title,
        window_id = ?window_id,
        options = %options,
        format = %format,
        destination = ?destination
    );

    let capturer = create_capture();
    let result = if let Some(title) = title {
        capturer.capture_window_by_title(title, options)
    } else if let Some(id) = window_id {
        find_window_by_id(&capturer, WindowId::new(id))
            .and_then(|window| capturer.capture_window(&window, options))
    } else {
        eprintln!("Either --title or --id is required");
        error!(event = "cli.capture_target_missing");
        return Err("Either --title or --id is required".into());
    };

    let image = match result {
        Ok(image) => image,
        Err(e) => {
            eprintln!("Failed to capture window: {}", e);
            error!(event = "cli.capture_failed", error = %e);
            events::log_app_error(&e);
            return Err(e.into());
        }
    };

    let delivered = match &destination {
        Destination::File(path) => save_to_file(&image, path, format).map(|()| {
            println!("Capture saved: {}", path.display());
            println!("  Size: {}x{}", image.width(), image.height());
            println!("  Format: {}", format);
        }),
        Destination::Base64 => to_base64(&image, format).map(|encoded| println!("{}", encoded)),
    };
    if let Err(e) = delivered {
        eprintln!("Failed to write capture: {}", e);
        error!(event = "cli.capture_output_failed", error = %e);
        events::log_app_error(&e);
        return Err(e.into());
    }

    info!(
        event = "cli.capture_completed",
        width = image.width(),
        height = image.height()
    );
    Ok(())
}
