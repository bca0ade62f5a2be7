use anyhow::{bail, Context as _, Result};
use clap::Parser;
use formbound::host::ControlHost;
use formbound::{with_registry, Context};
use log::{debug, warn};
use std::path::PathBuf;

/// formbound - drive a host-bound form control from the command line
#[derive(Parser, Debug, Clone)]
#[command(name = "formbound")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Control id to instantiate (see --list)
    #[arg(value_name = "CONTROL")]
    control: Option<String>,

    /// Property bag JSON file to bind (defaults to an empty bag)
    #[arg(short = 'p', long = "params", value_name = "FILE")]
    params: Option<PathBuf>,

    /// Simulated user edit applied after the first view update (repeatable)
    #[arg(short = 'e', long = "edit", value_name = "VALUE")]
    edits: Vec<String>,

    /// List available controls
    #[arg(short = 'l', long = "list")]
    list: bool,

    /// Debug verbosity level (0=quiet, 1=info, 2=debug, 3=trace)
    #[arg(short = 'd', long = "debug", value_name = "LEVEL", default_value = "0")]
    debug: u8,
}

fn load_context(path: Option<&PathBuf>) -> Result<Context> {
    match path {
        None => Ok(Context::new()),
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading property bag {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("parsing property bag {}", path.display()))
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logger with verbosity based on -d/--debug flag; RUST_LOG
    // overrides the CLI setting.
    let log_level = match cli.debug {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    warn!("Starting formbound v{}", env!("CARGO_PKG_VERSION"));

    // Register all built-in controls
    formbound::register_all();

    if cli.list {
        for id in with_registry(|registry| registry.list_controls()) {
            println!("{}", id);
        }
        return Ok(());
    }

    let Some(control_id) = cli.control else {
        bail!("no control id given; try --list");
    };

    let context = load_context(cli.params.as_ref())?;

    let mut host = ControlHost::from_registry(&control_id)?;
    host.init(&context)?;
    host.update_view(&context)?;

    for edit in &cli.edits {
        if !host.simulate_edit(edit)? {
            warn!("control {} renders no editable element", control_id);
            break;
        }
        if host.take_dirty() {
            debug!("outputs dirty after edit {:?}", edit);
        }
    }

    debug!("surface:\n{}", host.container().dump());

    let outputs = host.outputs()?;
    println!("{}", serde_json::to_string_pretty(&outputs)?);

    host.destroy();
    Ok(())
}
