use gate_netlist::{Authority, AuthorityConfig, NetlistError, State, Tag};
use std::env;
use std::process;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    println!("Gate Netlist - AND/OR Wiring Example");
    println!("====================================");

    let config = match env::args().nth(1) {
        Some(path) => match AuthorityConfig::from_json_file(&path) {
            Ok(config) => {
                info!(%path, "loaded authority config");
                config
            }
            Err(e) => {
                error!(%path, "failed to load config: {}", e);
                process::exit(1);
            }
        },
        None => AuthorityConfig::default(),
    };

    if let Err(e) = run_demo(config) {
        error!("demo failed: {}", e);
        process::exit(1);
    }
}

fn run_demo(config: AuthorityConfig) -> Result<(), NetlistError> {
    let mut authority = Authority::with_config(config)?;

    let and = authority.create_default(Tag::And)?;
    let or = authority.create_default(Tag::Or)?;
    let not = authority.create_default(Tag::Not)?;

    authority.connect(and, 0, or, 0)?;
    authority.connect(and, 0, not, 0)?;
    authority.connect(not, 0, or, 1)?;

    // A second driver on the same input is refused.
    if let Err(e) = authority.connect(not, 0, or, 0) {
        println!("Rejected: {}", e);
    }

    authority.set_input(and, 0, State::High)?;
    authority.set_input(and, 1, State::Low)?;

    println!("\nComponents:");
    for id in [and, or, not] {
        if let Some(gate) = authority.component(id) {
            println!("{}", gate);
        }
    }

    println!("\nConnections: {}", authority.connection_count());

    let report = authority.teardown();
    println!(
        "Released {} components and {} links",
        report.components, report.links
    );
    Ok(())
}
