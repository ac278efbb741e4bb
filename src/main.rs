use beer_game::io::reporting;
use beer_game::io::store::JsonFileStore;
use beer_game::simulation::config::{SessionConfig, DEFAULT_ORDER, LEADERBOARD_SIZE, WEEK_LIMIT};
use beer_game::strategy::implementations::policy_from_spec;
use beer_game::{
    FactoryOrder, GameError, GameSession, Leaderboard, RandomChance, ScoreboardService,
    SimulationState, Tier, TurnOutcome,
};
use std::env;
use std::io::{self, BufRead, Write};
use std::process;
use tracing_subscriber::EnvFilter;

type Scoreboard = ScoreboardService<JsonFileStore>;

const USAGE: &str = "usage: beer-game [--name NAME] [--seed N] [--leaderboard PATH] \
[--export FILE.csv] [--auto naive|constant:N|random:LO-HI|base-stock:N|smoothing[:N]]";

fn main() {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("beer_game=info,warn")),
        )
        .init();

    let config = match SessionConfig::from_args(env::args().skip(1)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}\n{USAGE}");
            process::exit(2);
        }
    };

    if let Err(e) = run(&config) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run(config: &SessionConfig) -> Result<(), GameError> {
    println!("=== Beer Distribution Game ===");

    // 1. LOAD THE RANKING
    let mut scoreboard = ScoreboardService::open(JsonFileStore::new(&config.leaderboard_path));
    if !scoreboard.leaderboard().is_empty() {
        print_ranking(scoreboard.leaderboard());
    }

    // 2. PLAY
    match &config.autopilot {
        Some(spec) => run_autopilot(config, spec, &mut scoreboard),
        None => run_interactive(config, &mut scoreboard),
    }
}

fn run_autopilot(config: &SessionConfig, spec: &str, scoreboard: &mut Scoreboard) -> Result<(), GameError> {
    let mut policy = policy_from_spec(spec, config.seed)?;
    let name = config.player_name.clone().unwrap_or_else(|| "autopilot".to_string());

    println!("Autopilot {:?} is running the factory for {} weeks...", policy, WEEK_LIMIT);
    let mut session = GameSession::new(RandomChance::from_seed(config.seed)?);
    session.play_with(policy.as_mut())?;

    finish_game(config, session.state(), &name, scoreboard);
    Ok(())
}

fn run_interactive(config: &SessionConfig, scoreboard: &mut Scoreboard) -> Result<(), GameError> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    let mut name = match &config.player_name {
        Some(name) if !name.trim().is_empty() => name.trim().to_string(),
        _ => match ask_name(&mut lines, "Your name: ") {
            Some(name) => name,
            None => return Ok(()),
        },
    };
    let mut seed = config.seed;

    loop {
        let mut session = GameSession::new(RandomChance::from_seed(seed)?);
        let mut last_order = DEFAULT_ORDER;

        loop {
            if let Some(boost) = session.begin_week() {
                println!(
                    "\n*** Marketing campaign! Sales may rise by up to {} units this week. ***",
                    boost
                );
            }
            print_status(session.state());

            let Some(line) = prompt(&mut lines, &format!("Factory order [{last_order}]: ")) else {
                return Ok(());
            };
            let order = if line.trim().is_empty() {
                FactoryOrder::new(last_order)
            } else {
                match line.parse::<FactoryOrder>() {
                    Ok(order) => order,
                    Err(e) => {
                        println!("{e}. Please try again.");
                        continue;
                    }
                }
            };
            last_order = order.quantity();

            if let TurnOutcome::GameOver { .. } = session.place_order(order)? {
                break;
            }
        }

        finish_game(config, session.state(), &name, scoreboard);

        // 3. ANOTHER ROUND?
        match prompt(&mut lines, "\nNext player's name (empty to quit): ") {
            Some(next) if !next.trim().is_empty() => name = next.trim().to_string(),
            _ => return Ok(()),
        }
        seed = seed.map(|s| s.wrapping_add(1));
    }
}

fn finish_game(config: &SessionConfig, state: &SimulationState, name: &str, scoreboard: &mut Scoreboard) {
    let report = scoreboard.record(state, name);

    println!("\n=== Game Over ===");
    println!("Revenue: ${:.2}", state.total_revenue);
    println!("Cost:    ${:.2}", state.total_cost);
    println!("Score:   ${:.2}", report.score);
    match report.rank {
        Some(rank) => println!("{} placed #{} on the ranking!", name, rank),
        None => println!("{} did not make the top {}.", name, LEADERBOARD_SIZE),
    }
    if !report.persisted {
        println!("(The ranking could not be saved and only lasts for this session.)");
    }
    print_ranking(scoreboard.leaderboard());

    if let Some(path) = &config.export_path {
        match reporting::write_history_csv(path, state) {
            Ok(()) => println!("History written to {}", path.display()),
            Err(e) => eprintln!("Error writing CSV: {}", e),
        }
    }
}

fn print_status(state: &SimulationState) {
    println!("\n--- Week {} ---", state.week);
    for tier in Tier::ALL {
        println!("{:<12} {:>5}", tier.to_string(), state.stock(tier));
    }
    println!("Incoming order: {}", state.incoming_order);
    println!("Backlog:        {}", state.backlog);
    println!("Expired beer:   {}", state.expiring_beer);
    println!("Lost orders:    {}", state.lost_orders_total);
    println!(
        "Revenue: ${:.2}  Cost: ${:.2}  Profit: ${:.2}",
        state.total_revenue,
        state.total_cost,
        state.profit()
    );
}

fn print_ranking(leaderboard: &Leaderboard) {
    println!("\n=== Ranking (best profit after {} weeks) ===", WEEK_LIMIT);
    for (i, entry) in leaderboard.entries().iter().enumerate() {
        println!("{}. {:<20} ${:.2}", i + 1, entry.name, entry.score);
    }
}

fn prompt<B: BufRead>(lines: &mut io::Lines<B>, message: &str) -> Option<String> {
    print!("{message}");
    io::stdout().flush().ok();
    lines.next().and_then(Result::ok)
}

fn ask_name<B: BufRead>(lines: &mut io::Lines<B>, message: &str) -> Option<String> {
    loop {
        let name = prompt(lines, message)?;
        let name = name.trim();
        if !name.is_empty() {
            return Some(name.to_string());
        }
        println!("Please enter your name before starting the game.");
    }
}
