use clap::{Parser, Subcommand};
use kyubu_core::session::{rand_unit, scramble_moves};
use kyubu_core::{parse_moves, CubeGrid, CubeSession, Face};
use rand::Rng;

const FRAME_MS: f64 = 16.0;

#[derive(Parser)]
#[command(name = "kyubu-cli", version, about = "Headless driver for the kyubu cube engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    Scramble {
        #[arg(long, env = "KYUBU_SEED")]
        seed: Option<u32>,
        #[arg(long)]
        json: bool,
    },
    Run {
        #[arg(long)]
        moves: String,
        #[arg(long)]
        json: bool,
    },
    Verify {
        #[arg(long, default_value_t = 1000)]
        moves: u32,
        #[arg(long, env = "KYUBU_SEED")]
        seed: Option<u32>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Scramble { seed, json } => {
            let seed = seed.unwrap_or_else(random_seed);
            let mut session = CubeSession::new();
            let mut clock = 0.0;
            if !session.scramble(seed) {
                return Err("scramble refused on a fresh session".into());
            }
            run_until_idle(&mut session, &mut clock)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&session.snapshot())?);
            } else {
                let notation: Vec<String> =
                    scramble_moves(seed).iter().map(|mv| mv.notation()).collect();
                println!("seed: {seed:#010x}");
                println!("moves: {}", notation.join(" "));
                print_summary(&session);
            }
        }
        Commands::Run { moves, json } => {
            let descriptors = parse_moves(&moves)?;
            let mut session = CubeSession::new();
            let mut clock = 0.0;
            for descriptor in &descriptors {
                session.enqueue(*descriptor);
            }
            run_until_idle(&mut session, &mut clock)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&session.snapshot())?);
            } else {
                println!("applied {} moves", descriptors.len());
                print_summary(&session);
            }
        }
        Commands::Verify { moves, seed } => {
            let seed = seed.unwrap_or_else(random_seed);
            let mut session = CubeSession::new();
            let mut clock = 0.0;
            println!("seed: {seed:#010x}");
            for i in 0..moves {
                let face = Face::ALL[((rand_unit(seed, i * 2) * 6.0) as usize).min(5)];
                let reverse = rand_unit(seed, i * 2 + 1) > 0.5;
                session.enqueue_face(face, reverse);
                run_until_idle(&mut session, &mut clock)?;
                if !session.grid().lattice_aligned() {
                    return Err(format!("lattice drift after move {} of {moves}", i + 1).into());
                }
            }
            println!("ok: {moves} moves, no drift");
        }
    }

    Ok(())
}

fn run_until_idle(
    session: &mut CubeSession,
    clock: &mut f64,
) -> Result<(), Box<dyn std::error::Error>> {
    while session.animating() || session.queued() > 0 {
        *clock += FRAME_MS;
        session.tick(*clock)?;
    }
    Ok(())
}

fn random_seed() -> u32 {
    rand::rng().random()
}

fn print_summary(session: &CubeSession) {
    let solved = session.grid() == &CubeGrid::solved();
    let displaced: Vec<String> = session
        .grid()
        .cubelets()
        .iter()
        .filter(|c| {
            let [x, y, z] = c.lattice();
            c.id != solved_index(x, y, z)
        })
        .map(|c| c.id.to_string())
        .collect();
    println!("solved: {solved}");
    println!("undo depth: {}", session.history().undo_depth());
    println!("redo depth: {}", session.history().redo_depth());
    if !displaced.is_empty() {
        println!("displaced cubelets: {}", displaced.join(" "));
    }
}

fn solved_index(x: i8, y: i8, z: i8) -> usize {
    ((x + 1) as usize) * 9 + ((y + 1) as usize) * 3 + (z + 1) as usize
}
