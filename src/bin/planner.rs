use clap::Parser;
use liftedreg::config::SearchConfig;
use liftedreg::search::{
    heuristics::HeuristicName,
    search_engines::{SearchEngineName, SearchResult, TerminationCondition},
    Problem, Verbosity,
};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing::{error, info, warn};

#[derive(Parser)]
#[command(version)]
/// Run the liftedreg planner.
struct Cli {
    #[arg(help = "The PDDL domain file")]
    domain: PathBuf,
    #[arg(help = "The PDDL problem instance file")]
    problem: PathBuf,
    #[arg(
        help = "The output plan file, defaults to <domain>-<problem>.plan",
        short = 'o',
        long = "output",
        id = "OUTPUT"
    )]
    plan: Option<PathBuf>,
    #[arg(
        help = "A TOML file with search settings, overridden by the flags below",
        long = "config",
        id = "CONFIG"
    )]
    config: Option<PathBuf>,
    #[arg(
        value_enum,
        help = "The search engine to use [default: astar]",
        short = 'e',
        long = "engine",
        id = "ENGINE"
    )]
    search_engine_name: Option<SearchEngineName>,
    #[arg(
        value_enum,
        help = "The heuristic evaluator to use [default: hmax]",
        long = "heuristic",
        id = "HEURISTIC"
    )]
    heuristic_name: Option<HeuristicName>,
    #[arg(
        help = "The heuristic weight of weighted A* [default: 1]",
        short = 'w',
        long = "weight",
        id = "WEIGHT"
    )]
    weight: Option<f64>,
    #[arg(
        help = "Stop searching after this long, e.g. 30s or 5min",
        short = 't',
        long = "time-limit",
        id = "TIME_LIMIT",
        value_parser = humantime::parse_duration
    )]
    time_limit: Option<Duration>,
    #[arg(
        help = "Stop searching once the process uses this many megabytes",
        short = 'm',
        long = "memory-limit",
        id = "MEMORY_LIMIT"
    )]
    memory_limit: Option<usize>,
    #[arg(
        value_enum,
        help = "The verbosity level [default: normal]",
        short = 'v',
        long = "verbosity",
        id = "VERBOSITY"
    )]
    verbosity: Option<Verbosity>,
    #[arg(help = "Whether to use coloured output", short = 'c', long = "colour")]
    colour: bool,
}

impl Cli {
    fn search_config(&self) -> Result<SearchConfig, liftedreg::config::ConfigError> {
        let mut config = match &self.config {
            Some(path) => SearchConfig::from_path(path)?,
            None => SearchConfig::default(),
        };
        if let Some(engine) = self.search_engine_name {
            config.engine = engine;
        }
        if let Some(heuristic) = self.heuristic_name {
            config.heuristic = heuristic;
        }
        if let Some(weight) = self.weight {
            config.weight = weight;
        }
        if let Some(memory_limit) = self.memory_limit {
            config.memory_limit_mb = Some(memory_limit);
        }
        if let Some(verbosity) = self.verbosity {
            config.verbosity = verbosity;
        }
        Ok(config)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = match cli.search_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let level: tracing::Level = config.verbosity.into();
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_ansi(cli.colour)
        .with_line_number(true)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let problem = match Problem::from_path(&cli.domain, &cli.problem) {
        Ok(problem) => problem,
        Err(e) => {
            error!("failed to load problem: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if config.engine == SearchEngineName::Astar && !config.heuristic.is_admissible() {
        warn!(heuristic = ?config.heuristic, "heuristic is not admissible, A* may not be optimal");
    }

    let time_limit = cli.time_limit.or(config.time_limit());
    let mut termination = TerminationCondition::new(time_limit, config.memory_limit_mb);
    let mut heuristic = config.heuristic.create(&problem);
    info!(heuristic = %heuristic.name(), engine = ?config.engine, "starting search");
    let (result, statistics) =
        config
            .engine
            .search(&problem, &mut *heuristic, config.weight, &mut termination);
    statistics.finalise_search();
    termination.finalise();

    match result {
        SearchResult::Success(plan) => {
            info!(plan_length = plan.len(), plan_cost = plan.cost(), "plan found");
            let text = plan.human_readable(problem.symbols());
            println!("{text}");

            let plan_path = cli.plan.unwrap_or_else(|| {
                PathBuf::from(format!(
                    "{}-{}.plan",
                    problem.domain_name(),
                    problem.problem_name()
                ))
            });
            if let Err(e) = std::fs::write(&plan_path, text) {
                error!(path = %plan_path.display(), "failed to write plan file: {}", e);
                return ExitCode::FAILURE;
            }
            ExitCode::SUCCESS
        }
        other => {
            info!("no plan found");
            println!("No plan found: {:?}", other);
            ExitCode::FAILURE
        }
    }
}
