use anyhow::Result;
use clap::{Arg, Command};

use glance_panel::commands;

/// Flags shared by `run` and the bare invocation
fn run_args() -> [Arg; 3] {
    [
        Arg::new("headless")
            .long("headless")
            .help("Run without the terminal panel; log each poll cycle instead")
            .action(clap::ArgAction::SetTrue),
        Arg::new("no-web")
            .long("no-web")
            .help("Do not start the web control surface")
            .action(clap::ArgAction::SetTrue),
        Arg::new("web-port")
            .long("web-port")
            .value_name("PORT")
            .help("Port for the web control surface (defaults to the saved setting)")
            .value_parser(clap::value_parser!(u16)),
    ]
}

fn value_arg(help: &'static str) -> Arg {
    Arg::new("value").help(help).required(true).index(1)
}

fn main() -> Result<()> {
    let matches = Command::new("glance-panel")
        .version(env!("CARGO_PKG_VERSION"))
        .about("System monitor panel fed by a Glances REST API")
        .disable_version_flag(true)
        .arg(
            Arg::new("version")
                .short('v')
                .short_alias('V')
                .long("version")
                .help("Print version information")
                .action(clap::ArgAction::SetTrue),
        )
        .args(run_args())
        .subcommand(
            Command::new("run")
                .about("Run the panel and the web control surface (default)")
                .args(run_args()),
        )
        .subcommand(
            Command::new("poll")
                .about("Run one poll cycle and print what the panel would show")
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Print the cycle report as JSON")
                        .action(clap::ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("set")
                .about("Set configuration values (use 'glance-panel set --help' for subcommands)")
                .subcommand_required(true)
                .arg_required_else_help(true)
                .subcommand(
                    Command::new("host")
                        .about("Set the Glances host (IP or hostname)")
                        .arg(value_arg("Host running the Glances web server")),
                )
                .subcommand(
                    Command::new("port")
                        .about("Set the Glances port")
                        .arg(value_arg("Glances REST API port")),
                )
                .subcommand(
                    Command::new("interface")
                        .about("Set the network interface shown on the network card")
                        .arg(value_arg("Interface name, e.g. eth0")),
                )
                .subcommand(
                    Command::new("sensor")
                        .about("Set the temperature sensor label")
                        .arg(value_arg("Sensor label, e.g. 'Package id 0'")),
                ),
        )
        .subcommand(Command::new("get").about("Show the current configuration"))
        .subcommand(Command::new("reset-theme").about("Reset both themes to their defaults"))
        .subcommand(Command::new("version").about("Shows version information"))
        .get_matches();

    if matches.get_flag("version") {
        return commands::version();
    }

    match matches.subcommand() {
        Some(("run", sub_matches)) => commands::run(sub_matches)?,
        Some(("poll", sub_matches)) => commands::poll(sub_matches)?,
        Some(("set", sub_matches)) => commands::config::handle_set(sub_matches)?,
        Some(("get", _)) => commands::config::handle_get()?,
        Some(("reset-theme", _)) => commands::config::handle_reset_theme()?,
        Some(("version", _)) => commands::version()?,
        _ => commands::run(&matches)?,
    }

    Ok(())
}
