mod display;

use anyhow::{bail, Context, Result};
use booster_core::{open_booster, CardSource, HookRegistry, Pack, RngState};
use booster_data::{load_builtin_registry, load_registry, ProductRegistry};
use booster_scryfall::{ScryfallClient, SourceConfig, DEFAULT_BASE_URL};
use clap::{Args, Parser, Subcommand};
use display::{print_pack, Reveal};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "booster", version, about = "Open simulated booster packs")]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,
    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct GlobalArgs {
    /// Seed for a reproducible session; random when omitted
    #[arg(long, global = true)]
    seed: Option<u64>,
    /// Product registry JSON to use instead of the built-in one
    #[arg(long, global = true)]
    products: Option<PathBuf>,
    /// Card database base URL
    #[arg(long, global = true, env = "BOOSTER_API_URL", default_value = DEFAULT_BASE_URL)]
    api_url: String,
    /// Request timeout in seconds
    #[arg(long, global = true, env = "BOOSTER_TIMEOUT_SECS", default_value_t = 20)]
    timeout_secs: u64,
}

#[derive(Subcommand)]
enum Command {
    /// Open packs of one product
    Open {
        code: String,
        /// Number of packs to open
        #[arg(long, default_value_t = 1)]
        count: u32,
        /// Reveal cards one at a time
        #[arg(long)]
        reveal: bool,
    },
    /// Open packs of two products in turn and compare their value
    Compare {
        first: String,
        second: String,
        /// Packs per product
        #[arg(long, default_value_t = 3)]
        rounds: u32,
        /// Reveal cards one at a time and wait for Enter between packs
        #[arg(long)]
        reveal: bool,
    },
    /// List product codes that can be opened
    Sets,
}

struct Session {
    registry: ProductRegistry,
    hooks: HookRegistry,
    rng: RngState,
    source: Box<dyn CardSource>,
}

impl Session {
    fn open(&mut self, code: &str) -> Result<Pack> {
        let config = self.registry.get(code);
        let pack = open_booster(code, config, &self.hooks, &mut self.rng, self.source.as_mut())
            .with_context(|| format!("open {code} booster"))?;
        Ok(pack)
    }
}

fn main() {
    let _ = fmt()
        .with_writer(io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .try_init();

    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let registry = match &cli.global.products {
        Some(path) => load_registry(path)?,
        None => load_builtin_registry(),
    };
    if let Command::Sets = cli.command {
        print_sets(&registry);
        return Ok(());
    }

    let rng = match cli.global.seed {
        Some(seed) => RngState::from_seed(seed),
        None => {
            let rng = RngState::from_entropy();
            info!(seed = rng.seed(), "generated session seed");
            rng
        }
    };
    let source_config = SourceConfig::default()
        .with_base_url(cli.global.api_url.clone())
        .with_timeout(Duration::from_secs(cli.global.timeout_secs.max(1)));
    let client = ScryfallClient::new(source_config).context("build HTTP client")?;
    let mut session = Session {
        registry,
        hooks: HookRegistry::with_defaults(),
        rng,
        source: Box::new(client),
    };

    match cli.command {
        Command::Open {
            code,
            count,
            reveal,
        } => open_packs(&mut session, &code, count, Reveal { enabled: reveal }),
        Command::Compare {
            first,
            second,
            rounds,
            reveal,
        } => compare(&mut session, &first, &second, rounds, Reveal { enabled: reveal }),
        Command::Sets => Ok(()),
    }
}

fn known_code(registry: &ProductRegistry, code: &str) -> Result<String> {
    let code = code.trim().to_lowercase();
    if !registry.is_known(&code) {
        bail!("unknown set {code}; run `booster sets` for the list");
    }
    Ok(code)
}

fn print_sets(registry: &ProductRegistry) {
    let configured: Vec<&str> = registry.configured_codes().collect();
    println!("Configured: {}", configured.join(", "));
    println!("Default layout: {}", registry.fallback_codes().join(", "));
}

fn open_packs(session: &mut Session, code: &str, count: u32, reveal: Reveal) -> Result<()> {
    let code = known_code(&session.registry, code)?;
    let mut stdout = io::stdout();
    let mut total = 0.0;
    for _ in 0..count.max(1) {
        let pack = session.open(&code)?;
        print_pack(&pack, reveal, &mut stdout)?;
        total += pack.total_value();
    }
    if count > 1 {
        println!("\n{} packs opened, combined value {total:.2}", count);
    }
    Ok(())
}

fn compare(session: &mut Session, first: &str, second: &str, rounds: u32, reveal: Reveal) -> Result<()> {
    let first = known_code(&session.registry, first)?;
    let second = known_code(&session.registry, second)?;
    if first == second {
        bail!("pick two different sets to compare");
    }
    let mut totals = [0.0_f64; 2];
    let mut stdout = io::stdout();
    for round in 1..=rounds {
        for (slot, code) in [&first, &second].into_iter().enumerate() {
            println!("\n--- {} Booster #{round} ---", code.to_uppercase());
            let pack = session.open(code)?;
            print_pack(&pack, reveal, &mut stdout)?;
            totals[slot] += pack.total_value();
            if reveal.enabled {
                wait_for_enter()?;
            }
        }
    }

    println!("\n=== Results ===");
    println!("{}: {:.2}", first.to_uppercase(), totals[0]);
    println!("{}: {:.2}", second.to_uppercase(), totals[1]);
    let winner = if totals[0] > totals[1] {
        first.to_uppercase()
    } else if totals[1] > totals[0] {
        second.to_uppercase()
    } else {
        "TIE!".to_string()
    };
    println!("Winner: {winner}");
    Ok(())
}

fn wait_for_enter() -> Result<()> {
    print!("Press Enter...");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(())
}
