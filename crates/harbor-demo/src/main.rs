//! Harbor demo driver.
//!
//! Runs a scenario and prints the final state of every port and ship.
//!
//! ```text
//! harbor-demo                                    # built-in Kyiv -> Odesa run
//! harbor-demo scenarios/kyiv_odesa.toml          # scenario file (TOML or JSON)
//! harbor-demo --config scenarios/harbor.toml     # built-in run, custom rules
//! ```
//!
//! `--config` replaces whatever configuration the scenario file carries.

mod error;
mod logging;

use error::DemoError;
use harbor_core::command::{Command, Outcome};
use harbor_core::config::SimConfig;
use harbor_core::container::ContainerKind;
use harbor_core::id::{ContainerId, PortId, ShipId};
use harbor_core::scenario::Scenario;
use harbor_core::specs::ShipSpecs;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Default)]
struct Args {
    config: Option<PathBuf>,
    scenario: Option<PathBuf>,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args, DemoError> {
    let mut parsed = Args::default();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => parsed.config = Some(args.next().ok_or(DemoError::Usage)?.into()),
            "-h" | "--help" => return Err(DemoError::Usage),
            _ if parsed.scenario.is_none() && !arg.starts_with('-') => {
                parsed.scenario = Some(arg.into())
            }
            _ => return Err(DemoError::Usage),
        }
    }
    Ok(parsed)
}

/// Two Ukrainian ports, four containers, one coastal ship.
fn builtin_scenario(config: SimConfig) -> Scenario {
    let specs = ShipSpecs::new(20_000, 10, 5, 2, 2, 0.5);
    let mut commands = vec![
        Command::CreatePort {
            id: PortId(0),
            lat: 50.45,
            lon: 30.52,
        },
        Command::CreatePort {
            id: PortId(1),
            lat: 46.48,
            lon: 30.73,
        },
        Command::CreateContainer {
            weight: 2000,
            kind: None,
        },
        Command::CreateContainer {
            weight: 5000,
            kind: None,
        },
        Command::CreateContainer {
            weight: 1000,
            kind: Some(ContainerKind::Refrigerated),
        },
        Command::CreateContainer {
            weight: 4000,
            kind: Some(ContainerKind::Liquid),
        },
    ];
    commands.extend((0..4).map(|c| Command::Place {
        container: ContainerId(c),
        port: PortId(0),
    }));
    commands.extend([
        Command::CreateShip {
            id: ShipId(0),
            port: PortId(0),
            specs,
            fuel: 1000.0,
        },
        Command::Load {
            ship: ShipId(0),
            container: ContainerId(0),
        },
        Command::Load {
            ship: ShipId(0),
            container: ContainerId(1),
        },
        Command::Load {
            ship: ShipId(0),
            container: ContainerId(999),
        },
        Command::Refuel {
            ship: ShipId(0),
            amount: 200.0,
        },
        // Not enough for ~441 km with 7 t aboard; top up and go again.
        Command::Sail {
            ship: ShipId(0),
            to: PortId(1),
        },
        Command::Refuel {
            ship: ShipId(0),
            amount: 9000.0,
        },
        Command::Sail {
            ship: ShipId(0),
            to: PortId(1),
        },
        Command::Unload {
            ship: ShipId(0),
            container: ContainerId(1),
        },
    ]);
    Scenario { config, commands }
}

fn describe(command: &Command) -> Option<String> {
    match command {
        Command::Load { ship, container } => Some(format!("Load c{container} onto ship {ship}")),
        Command::Unload { ship, container } => {
            Some(format!("Unload c{container} from ship {ship}"))
        }
        Command::Sail { ship, to } => Some(format!("Ship {ship} sails to port {to}")),
        _ => None,
    }
}

fn run(args: Args) -> Result<(), DemoError> {
    let config = args.config.as_deref().map(|p| SimConfig::load(p)).transpose()?;
    let scenario = match &args.scenario {
        Some(path) => {
            let mut scenario = Scenario::load(path)?;
            if let Some(config) = config {
                scenario.config = config;
            }
            scenario
        }
        None => builtin_scenario(config.unwrap_or_default()),
    };
    tracing::info!(
        commands = scenario.commands.len(),
        source = %args.scenario.as_deref().map_or("built-in".into(), |p| p.display().to_string()),
        "running scenario"
    );

    let run = scenario.run()?;
    for (command, outcome) in scenario.commands.iter().zip(&run.outcomes) {
        if let (Some(label), Outcome::Accepted(ok)) = (describe(command), outcome) {
            println!("{label} -> {ok}");
        }
    }

    println!("\n--- Final state ---");
    print!("{}", run.sim.report());
    Ok(())
}

fn main() -> ExitCode {
    logging::init();
    let result = parse_args(std::env::args().skip(1)).and_then(run);
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "demo failed");
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
