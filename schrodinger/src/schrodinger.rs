use std::{ fs, path::PathBuf };
use anyhow::Context;
use clap::Parser;
use ndarray as nd;
use tise::{ io, solve };

#[derive(Parser, Debug)]
#[command(
    name = "schrodinger",
    about = "Bound states of the 1D time-independent Schrödinger equation",
)]
struct Cli {
    /// Path to the problem description
    #[arg(short, long, default_value = "schrodinger.inp")]
    input: PathBuf,
    /// Directory for output files; created if it doesn't exist
    #[arg(short, long, default_value = ".")]
    outdir: PathBuf,
    /// Compute only energies (by bisection) and write only energies.dat
    #[arg(long)]
    energies_only: bool,
    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
    /// Decrease log verbosity (-q for warnings, -qq for errors only)
    #[arg(short, long, action = clap::ArgAction::Count, conflicts_with = "verbose")]
    quiet: u8,
}

impl Cli {
    fn log_level(&self) -> &'static str {
        match (self.verbose, self.quiet) {
            (0, 0) => "info",
            (1, _) => "debug",
            (_, 0) => "trace",
            (_, 1) => "warn",
            _ => "error",
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(cli.log_level()))
        .init();

    log::info!("reading problem from {}", cli.input.display());
    let problem = io::read_input(&cli.input)
        .with_context(|| format!("failed to load {}", cli.input.display()))?;
    log::debug!(
        "samples cover the grid: {}", problem.samples_cover_domain());
    fs::create_dir_all(&cli.outdir)
        .with_context(|| {
            format!("failed to create output directory {}", cli.outdir.display())
        })?;

    if cli.energies_only {
        let sols = solve::solve_energies(&problem)
            .context("failed to compute energies")?;
        sols.iter().for_each(|sol| log::info!("E[{}] = {:.10}", sol.n, sol.e));
        let energies: nd::Array1<f64> = sols.iter().map(|sol| sol.e).collect();
        let path = cli.outdir.join(io::ENERGIES_FILE);
        let file = fs::File::create(&path)
            .with_context(|| format!("failed to create {}", path.display()))?;
        io::write_columns(std::io::BufWriter::new(file), &[energies.view()])
            .with_context(|| format!("failed to write {}", path.display()))?;
    } else {
        let res = solve::solve(&problem).context("failed to solve")?;
        res.solutions().iter().for_each(|sol| {
            match sol.obs {
                Some(obs) => log::info!(
                    "E[{}] = {:.10}, <x> = {:.6}, sigma_x = {:.6}",
                    sol.n, sol.e, obs.mean, obs.sigma,
                ),
                None => log::info!("E[{}] = {:.10}", sol.n, sol.e),
            }
        });
        io::write_output(&cli.outdir, &res)
            .context("failed to write results")?;
    }
    log::info!("wrote results to {}", cli.outdir.display());
    Ok(())
}
