use clap::Parser;
use cubemin::cmd::Cli;

fn main() {
    let cli = Cli::parse();
    cli.init_logging();
    match cli.run() {
        Ok(true) => (),
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
