//! Command line interface

use std::io::Write;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use clap::{ArgAction, Args, Parser, Subcommand};
use log::{info, LevelFilter};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

use crate::cover::stats::stats;
use crate::cover::CubeList;
use crate::equiv::find_difference;
use crate::error::Result;
use crate::generators::random_cover;
use crate::io::{read_cube_file, read_cube_file_for, write_cube_file, write_cubes};
use crate::minimize::{all_primes, minimize, minimize_exact, primes, ExactLimits};
use crate::problem::ProblemInfo;
use crate::progress::ProgressBar;

/// Command line arguments
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Command to run
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity; repeat for more details
    #[arg(short = 'v', long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Show a progress bar for long operations
    #[arg(long, global = true)]
    pub progress: bool,
}

/// Command line arguments
#[derive(Subcommand)]
pub enum Commands {
    /// Show statistics about a cube list
    ///
    /// Will print the number of inputs, outputs, cubes and literals.
    #[clap()]
    Show(ShowArgs),

    /// Minimize a cube list
    ///
    /// By default, each cube is expanded to a prime and redundant primes are removed.
    /// The greedy mode then iterates reduction and expansion while the cover improves,
    /// and the exact mode finds a cover with the minimum number of primes using a SAT solver.
    #[clap(alias = "min")]
    Minimize(MinimizeArgs),

    /// Compute prime implicants of a cube list
    #[clap()]
    Primes(PrimesArgs),

    /// Complement a cube list
    #[clap(alias = "not")]
    Complement(ComplementArgs),

    /// Check equivalence between two cube lists
    ///
    /// The command will fail if the two lists are not equivalent, and will output a
    /// point covered by only one of them.
    #[clap(alias = "check-equivalence")]
    Equiv(EquivArgs),

    /// Generate a random cube list
    #[clap(alias = "rand")]
    Random(RandomArgs),
}

impl Cli {
    /// Setup the terminal logger according to the verbosity
    pub fn init_logging(&self) {
        let level = match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        };
        // Fails only if a logger is already installed
        let _ = TermLogger::init(
            level,
            Config::default(),
            TerminalMode::Stderr,
            ColorChoice::Auto,
        );
    }

    /// Run the command; returns false if an equivalence check failed
    pub fn run(&self) -> Result<bool> {
        let ctx = Context {
            progress: self.progress,
        };
        match &self.command {
            Commands::Show(a) => a.run(&ctx).map(|_| true),
            Commands::Minimize(a) => a.run(&ctx).map(|_| true),
            Commands::Primes(a) => a.run(&ctx).map(|_| true),
            Commands::Complement(a) => a.run(&ctx).map(|_| true),
            Commands::Equiv(a) => a.run(&ctx),
            Commands::Random(a) => a.run().map(|_| true),
        }
    }
}

/// Options shared by all commands
struct Context {
    progress: bool,
}

impl Context {
    fn read(&self, path: &Path) -> Result<(ProblemInfo, CubeList)> {
        let (mut pi, l) = read_cube_file(path)?;
        if self.progress {
            pi.set_progress(Rc::new(ProgressBar::new()));
        }
        info!("Read {} cubes from {}", l.len(), path.display());
        Ok((pi, l))
    }
}

fn read_dc(path: &Option<PathBuf>, pi: &ProblemInfo) -> Result<CubeList> {
    match path {
        Some(p) => read_cube_file_for(p, pi),
        None => Ok(pi.new_list()),
    }
}

/// Write to the file if given, to the standard output otherwise
fn write_result(path: &Option<PathBuf>, pi: &ProblemInfo, list: &CubeList) -> Result<()> {
    match path {
        Some(p) => write_cube_file(p, pi, list),
        None => {
            let mut out = std::io::stdout().lock();
            write_cubes(&mut out, pi, list)?;
            out.flush()?;
            Ok(())
        }
    }
}

/// Command arguments for cube list informations
#[derive(Args)]
pub struct ShowArgs {
    /// Cube list to show
    file: PathBuf,
}

impl ShowArgs {
    fn run(&self, ctx: &Context) -> Result<()> {
        let (_, l) = ctx.read(&self.file)?;
        println!("{}", stats(&l));
        Ok(())
    }
}

/// Command arguments for minimization
#[derive(Args)]
pub struct MinimizeArgs {
    /// Cube list to minimize
    file: PathBuf,

    /// Don't-care set
    #[arg(short = 'd', long)]
    dc: Option<PathBuf>,

    /// Output file for the minimized list
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Improve the cover iteratively
    #[arg(long)]
    greedy: bool,

    /// Prefer covers with fewer literals
    #[arg(long)]
    literals: bool,

    /// Find a cover with the minimum number of cubes
    #[arg(long)]
    exact: bool,

    /// Seed to shuffle the cubes before minimization
    #[arg(long)]
    seed: Option<u64>,
}

impl MinimizeArgs {
    fn run(&self, ctx: &Context) -> Result<()> {
        let (pi, mut on) = ctx.read(&self.file)?;
        let dc = read_dc(&self.dc, &pi)?;
        if let Some(s) = self.seed {
            on.shuffle(s);
        }
        let before = (on.len(), on.literal_count());
        if self.exact {
            minimize_exact(&pi, &mut on, &dc, self.literals, &ExactLimits::default())?;
        } else {
            minimize(&pi, &mut on, &dc, self.greedy, self.literals)?;
        }
        info!(
            "Minimized from {} cubes, {} literals to {} cubes, {} literals",
            before.0,
            before.1,
            on.len(),
            on.literal_count()
        );
        write_result(&self.output, &pi, &on)
    }
}

/// Command arguments for prime implicants
#[derive(Args)]
pub struct PrimesArgs {
    /// Cube list to expand
    file: PathBuf,

    /// Don't-care set
    #[arg(short = 'd', long)]
    dc: Option<PathBuf>,

    /// Output file for the primes
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Generate all prime implicants, not just a covering subset
    #[arg(long)]
    all: bool,
}

impl PrimesArgs {
    fn run(&self, ctx: &Context) -> Result<()> {
        let (pi, mut on) = ctx.read(&self.file)?;
        let dc = read_dc(&self.dc, &pi)?;
        if self.all {
            on = all_primes(&pi, &on, &dc)?;
        } else {
            primes(&pi, &mut on, &dc)?;
        }
        info!("Found {} primes", on.len());
        write_result(&self.output, &pi, &on)
    }
}

/// Command arguments for complementation
#[derive(Args)]
pub struct ComplementArgs {
    /// Cube list to complement
    file: PathBuf,

    /// Output file for the complement
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,
}

impl ComplementArgs {
    fn run(&self, ctx: &Context) -> Result<()> {
        let (pi, l) = ctx.read(&self.file)?;
        let c = l.complement(&pi)?;
        write_result(&self.output, &pi, &c)
    }
}

/// Command arguments for equivalence checking
#[derive(Args)]
pub struct EquivArgs {
    /// First cube list to compare
    file1: PathBuf,
    /// Second cube list to compare
    file2: PathBuf,
}

impl EquivArgs {
    fn run(&self, ctx: &Context) -> Result<bool> {
        let (pi, l1) = ctx.read(&self.file1)?;
        let (pi2, l2) = ctx.read(&self.file2)?;
        if pi.shape() != pi2.shape() {
            println!(
                "Different shapes: {} vs {}. Cube lists are not equivalent",
                pi.shape(),
                pi2.shape()
            );
            return Ok(false);
        }
        match find_difference(&pi, &l1, &l2)? {
            Some(point) => {
                println!("Cube lists are not equivalent");
                println!("Differing point:");
                println!("{}", point);
                Ok(false)
            }
            None => {
                println!("Cube lists are equivalent");
                Ok(true)
            }
        }
    }
}

/// Command arguments for random generation
#[derive(Args)]
pub struct RandomArgs {
    /// Number of inputs
    #[arg(short = 'i', long)]
    nb_inputs: usize,

    /// Number of outputs
    #[arg(short = 'o', long, default_value_t = 1)]
    nb_outputs: usize,

    /// Number of cubes
    #[arg(short = 'c', long)]
    nb_cubes: usize,

    /// Probability for an input to be don't-care
    #[arg(long, default_value_t = 0.5)]
    dc_ratio: f64,

    /// Random seed
    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// Output file for the cube list
    #[arg(short = 'O', long)]
    output: Option<PathBuf>,
}

impl RandomArgs {
    fn run(&self) -> Result<()> {
        let pi = ProblemInfo::new(self.nb_inputs, self.nb_outputs);
        let l = random_cover(&pi, self.nb_cubes, self.dc_ratio, self.seed);
        write_result(&self.output, &pi, &l)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimize() {
        let cli = Cli::parse_from([
            "cubemin", "-vv", "minimize", "f.txt", "-d", "dc.txt", "--greedy", "--seed", "3",
        ]);
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Minimize(a) => {
                assert_eq!(a.file, PathBuf::from("f.txt"));
                assert_eq!(a.dc, Some(PathBuf::from("dc.txt")));
                assert!(a.greedy && !a.exact && !a.literals);
                assert_eq!(a.seed, Some(3));
                assert_eq!(a.output, None);
            }
            _ => panic!("expected the minimize command"),
        }
    }

    #[test]
    fn test_parse_random() {
        let cli = Cli::parse_from([
            "cubemin", "random", "-i", "8", "-o", "2", "-c", "20", "-O", "r.txt",
        ]);
        match cli.command {
            Commands::Random(a) => {
                assert_eq!((a.nb_inputs, a.nb_outputs, a.nb_cubes), (8, 2, 20));
                assert_eq!(a.output, Some(PathBuf::from("r.txt")));
                assert_eq!(a.seed, 1);
            }
            _ => panic!("expected the random command"),
        }
    }

    #[test]
    fn test_parse_equiv_alias() {
        let cli = Cli::parse_from(["cubemin", "check-equivalence", "a.txt", "b.txt"]);
        assert!(matches!(cli.command, Commands::Equiv(_)));
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
