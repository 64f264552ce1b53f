use clap::Parser;
use log::info;
use sampling::Source;
use spectral::params::Q;
use spectral::{LogObserver, Matrix, Pipeline};

#[derive(Parser, Debug)]
#[command(name = "dream", about = "Spectral permanent pipeline over random matrices")]
struct Cli {
    /// Matrix dimensions to run, one computation each
    #[arg(default_values_t = [100usize, 200, 1000])]
    sizes: Vec<usize>,

    /// Seed of the root generator; each size draws from its own branch
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Smallest matrix entry
    #[arg(long, default_value_t = 1)]
    min: u64,

    /// Largest matrix entry
    #[arg(long, default_value_t = 100)]
    max: u64,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    info!("dream function, Proth prime Q = {}", Q);

    let mut root: Source = Source::from_u64(cli.seed);

    for &n in &cli.sizes {
        info!("test: n = {}", n);

        let mut source: Source = root.branch();
        let matrix: Matrix = Matrix::random(n, cli.min, cli.max, &mut source)?;
        if n > 0 {
            let sample: Vec<String> = matrix.row(0).iter().take(5).map(u64::to_string).collect();
            info!("sample: M[0][0..{}] = {}", sample.len(), sample.join(" "));
        }

        let pipeline: Pipeline = Pipeline::new(n)?;
        let result: u64 = pipeline.compute(&matrix, &mut LogObserver)?;
        println!("n = {}: Perm(M)^k mod Q = {}", n, result);
    }

    Ok(())
}
