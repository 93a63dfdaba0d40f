use anyhow::Context;
use brood::{BroodConfig, load_registry, report, simulation};
use brood_genetics::{BreedRegistry, CreatureStats, Specimen};
use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file (RON, extension optional)
    #[arg(long, default_value = "brood")]
    config: String,

    /// Additional breed catalog to install (repeatable)
    #[arg(long)]
    catalog: Vec<String>,

    /// Skip the builtin breeds
    #[arg(long)]
    no_builtin: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List registered breeds
    List {
        /// Include disabled breeds
        #[arg(long)]
        disabled: bool,
    },
    /// Show possible offspring of two breeds and their chances
    Chances { first: String, second: String },
    /// List every crossing that produces a new breed
    Recipes,
    /// Simulate a breeding line
    Breed {
        first: String,
        second: String,

        /// Number of generations (default from config)
        #[arg(long)]
        generations: Option<u32>,

        /// RNG seed (default from config, else random)
        #[arg(long)]
        seed: Option<u64>,

        /// Starting growth of both parents
        #[arg(long, default_value = "1")]
        growth: i32,

        /// Starting gain of both parents
        #[arg(long, default_value = "1")]
        gain: i32,

        /// Starting strength of both parents
        #[arg(long, default_value = "1")]
        strength: i32,
    },
}

fn lookup<'a>(
    registry: &'a BreedRegistry,
    name: &str,
) -> anyhow::Result<brood_genetics::Breed<'a>> {
    registry
        .get_by_name(name)
        .with_context(|| format!("Unknown breed '{}'", name))
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    // Parse command-line arguments
    let args = Args::parse();

    let mut config = BroodConfig::load_from(&args.config)?;
    config.catalog.extensions.extend(args.catalog.iter().cloned());
    if args.no_builtin {
        config.catalog.include_builtin = false;
    }

    let registry = load_registry(&config.catalog)?;

    match args.command {
        Command::List { disabled } => {
            print!("{}", report::breed_table(&registry, disabled));
        }
        Command::Chances { first, second } => {
            let first = lookup(&registry, &first)?;
            let second = lookup(&registry, &second)?;
            print!("{}", report::chance_table(&registry, first, second));
        }
        Command::Recipes => {
            print!("{}", report::recipe_table(&registry));
        }
        Command::Breed {
            first,
            second,
            generations,
            seed,
            growth,
            gain,
            strength,
        } => {
            let stats = CreatureStats::new(growth, gain, strength);
            let first = Specimen::new(lookup(&registry, &first)?.id(), stats);
            let second = Specimen::new(lookup(&registry, &second)?.id(), stats);
            let generations = generations.unwrap_or(config.simulation.generations);

            let mut rng = match seed.or(config.simulation.seed) {
                Some(seed) => Xoshiro256StarStar::seed_from_u64(seed),
                None => Xoshiro256StarStar::from_entropy(),
            };

            log::info!("Breeding {} generations", generations);
            let history = simulation::run_line(&registry, first, second, generations, &mut rng)?;
            print!("{}", report::line_report(&registry, &history));
        }
    }

    Ok(())
}
