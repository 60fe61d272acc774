use std::env;
use std::process::ExitCode;
use tri_bvh::{App, Config};

fn main() -> ExitCode {
    env_logger::init();
    let args: Vec<String> = env::args().collect();
    let config = match Config::from_args(args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };
    let quiet = config.quiet;
    match App::new(config).run() {
        Ok(stats) => {
            if !quiet {
                println!(
                    "nodes {} leaves {} depth {}",
                    stats.nodes, stats.leaves, stats.max_depth
                );
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{e}");
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
