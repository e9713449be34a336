mod arguments;
mod config;
mod devices;
mod filename;
mod profile;
mod scan;
mod tables;

use anyhow::anyhow;
use argh::FromArgs;
use config::Config;
use devices::{preselect, resolve_target};
use log::Level;
use profile::{Profile, Selection, Vendor};
use std::{path::PathBuf, process};

#[derive(FromArgs)]
/// Front-end for scanimage with per-vendor scan presets
struct Args {
    /// path to config
    #[argh(option)]
    config: Option<PathBuf>,

    /// enable extra logs
    #[argh(switch)]
    verbose: bool,

    #[argh(subcommand)]
    command: Command,
}

#[derive(FromArgs)]
#[argh(subcommand)]
enum Command {
    Devices(DevicesArgs),
    Options(OptionsArgs),
    Scan(ScanArgs),
}

#[derive(FromArgs)]
/// List attached scanners
#[argh(subcommand, name = "devices")]
struct DevicesArgs {}

#[derive(FromArgs)]
/// Show color modes, resolutions and page formats of a scanner
#[argh(subcommand, name = "options")]
struct OptionsArgs {
    /// scanner name as printed by `devices`
    #[argh(option)]
    device: Option<String>,

    /// use this profile instead of detecting it (generic, hp, epson, brother, canon)
    #[argh(option)]
    profile: Option<Vendor>,
}

#[derive(FromArgs)]
/// Scan a page into a file
#[argh(subcommand, name = "scan")]
struct ScanArgs {
    /// scanner name as printed by `devices`
    #[argh(option)]
    device: Option<String>,

    /// use this profile instead of detecting it (generic, hp, epson, brother, canon)
    #[argh(option)]
    profile: Option<Vendor>,

    /// color mode
    #[argh(option)]
    mode: Option<String>,

    /// resolution in DPI
    #[argh(option)]
    resolution: Option<u32>,

    /// page format
    #[argh(option)]
    area: Option<String>,

    /// output file name without extension, next free ScanNNN by default
    #[argh(option)]
    output: Option<String>,
}

fn main() {
    let args: Args = argh::from_env();

    simple_logger::init_with_level(if args.verbose {
        Level::Trace
    } else {
        Level::Info
    })
    .expect("logger should be initialized once");

    hello(&args);

    let config = match &args.config {
        Some(path) => match Config::read_from(path) {
            Ok(config) => config,
            Err(err) => {
                log::error!("Failed to read config: {err:#}");
                process::exit(1);
            }
        },
        None => Config::default(),
    };

    if args.verbose {
        log::debug!("Use config {config:#?}");
    }

    let result = match args.command {
        Command::Devices(_) => list_devices(&config),
        Command::Options(options) => show_options(&config, options),
        Command::Scan(scan) => run_scan(&config, scan),
    };

    if let Err(err) = result {
        log::error!("{err:#}");
        process::exit(1);
    }
}

fn hello(args: &Args) {
    log::info!(
        "{bin} version {version}, commit {commit}, config from {config_path}, verbose {verbose}",
        bin = env!("CARGO_PKG_NAME"),
        version = env!("CARGO_PKG_VERSION"),
        commit = env!("GIT_COMMIT_HASH"),
        config_path = args
            .config
            .as_ref()
            .map_or_else(|| "defaults".to_owned(), |path| path.display().to_string()),
        verbose = if args.verbose { "on" } else { "off" },
    );
}

fn list_devices(config: &Config) -> anyhow::Result<()> {
    let devices = config.backend().list_devices();
    if devices.is_empty() {
        log::info!("No scanners found");
        return Ok(());
    }

    let selected = preselect(&devices, &config.devices.priority);

    for device in &devices {
        let marker = if selected == Some(device) { "*" } else { " " };
        println!(
            "{marker} {name}\t{vendor}\t{model}\t{profile}",
            name = device.name,
            vendor = device.vendor,
            model = device.model,
            profile = config.profile_for(device).vendor,
        );
    }

    Ok(())
}

fn show_options(config: &Config, args: OptionsArgs) -> anyhow::Result<()> {
    let target = resolve_target(
        &config.backend(),
        config,
        args.device.as_deref(),
        args.profile,
    )?;
    let profile = target.profile;

    println!("Profile: {}", profile.vendor);

    println!("Color modes:");
    for (i, mode) in profile.color_modes.iter().enumerate() {
        let marker = default_marker(i, profile.default_color);
        println!("{marker} {} ({})", mode.name, mode.format);
    }

    println!("Resolutions:");
    for (i, dpi) in profile.resolutions.iter().enumerate() {
        let marker = default_marker(i, profile.default_resolution);
        println!("{marker} {dpi}");
    }

    println!("Page formats:");
    for (i, format) in profile.page_formats.iter().enumerate() {
        let marker = default_marker(i, profile.default_page_format);
        match format.area {
            Some(area) => println!(
                "{marker} {name} ({width} x {height} mm)",
                name = format.name,
                width = area.width,
                height = area.height,
            ),
            None => println!("{marker} {}", format.name),
        }
    }

    Ok(())
}

fn default_marker(index: usize, default: usize) -> &'static str {
    if index == default {
        "*"
    } else {
        " "
    }
}

fn run_scan(config: &Config, args: ScanArgs) -> anyhow::Result<()> {
    let backend = config.backend();
    let target = resolve_target(&backend, config, args.device.as_deref(), args.profile)?;

    let selection = make_selection(target.profile, target.device, &args)?;

    scan::scan_to_file(
        &backend,
        target.profile,
        &selection,
        &config.output.directory,
        args.output.as_deref(),
    )?;

    Ok(())
}

fn make_selection(
    profile: &Profile,
    device: Option<String>,
    args: &ScanArgs,
) -> anyhow::Result<Selection> {
    let mut selection = profile.default_selection(device);

    if let Some(mode) = &args.mode {
        selection.color = profile.color_mode_index(mode).ok_or_else(|| {
            anyhow!(
                "color mode '{mode}' is not supported by {} profile",
                profile.vendor
            )
        })?;
    }

    if let Some(dpi) = args.resolution {
        selection.resolution = profile.resolution_index(dpi).ok_or_else(|| {
            anyhow!(
                "resolution {dpi} is not supported by {} profile",
                profile.vendor
            )
        })?;
    }

    if let Some(area) = &args.area {
        selection.page_format = profile.page_format_index(area).ok_or_else(|| {
            anyhow!(
                "page format '{area}' is not supported by {} profile",
                profile.vendor
            )
        })?;
    }

    Ok(selection)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan_args(mode: Option<&str>, resolution: Option<u32>, area: Option<&str>) -> ScanArgs {
        ScanArgs {
            device: None,
            profile: None,
            mode: mode.map(str::to_owned),
            resolution,
            area: area.map(str::to_owned),
            output: None,
        }
    }

    #[test]
    fn selection_defaults_to_profile_defaults() {
        let profile = Vendor::Epson.profile();

        let selection = make_selection(profile, None, &scan_args(None, None, None)).unwrap();

        assert_eq!(selection, profile.default_selection(None));
    }

    #[test]
    fn selection_resolves_names() {
        let profile = Vendor::Brother.profile();
        let args = scan_args(Some("true gray"), Some(600), Some("b5"));

        let device = Some("brother4:bus2;dev3".to_owned());

        let selection = make_selection(profile, device, &args).unwrap();

        assert_eq!(selection.device.as_deref(), Some("brother4:bus2;dev3"));
        assert_eq!(selection.color_mode(profile).name, "True Gray");
        assert_eq!(selection.resolution(profile), 600);
        assert_eq!(selection.page_format(profile).name, "B5");
    }

    #[test]
    fn unsupported_choices_are_rejected() {
        let profile = Vendor::Generic.profile();

        assert!(make_selection(profile, None, &scan_args(Some("Gray"), None, None)).is_err());
        assert!(make_selection(profile, None, &scan_args(None, Some(600), None)).is_err());
        assert!(make_selection(profile, None, &scan_args(None, None, Some("A4"))).is_err());
    }
}
