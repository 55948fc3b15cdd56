// Rank every row or column of a tab-separated matrix (natural ranking, ties averaged).
// Lanes are ranked in parallel on the rayon pool.

use std::{env, error::Error, path::Path, time::Instant};

use log::info;
use rankframe::{io, Axis};

struct Config {
    input: String,
    axis: Axis,
    num_threads: Option<usize>,
    time_tracking: bool,
    output: Option<String>,
}

fn parse_args() -> Result<Config, Box<dyn Error>> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        return Err("Usage: rankframe <input_file> <axis> [num_threads] [--time] [--output PATH]\nAxis: rows, columns\nnum_threads: number of threads to use (default: all available)\n--time: enable detailed timing output\n--output: write ranks to PATH (.tar.gz or plain TSV)".into());
    }

    let axis = Axis::from_name(&args[2])?;

    let mut config = Config {
        input: args[1].clone(),
        axis,
        num_threads: None,
        time_tracking: false,
        output: None,
    };

    let mut i = 3;
    while i < args.len() {
        let arg = &args[i];
        if arg == "--time" {
            config.time_tracking = true;
            i += 1;
        } else if arg == "--output" {
            let value = args.get(i + 1).ok_or("Missing value for --output")?;
            config.output = Some(value.clone());
            i += 2;
        } else if let Some(value) = arg.strip_prefix("--output=") {
            config.output = Some(value.to_string());
            i += 1;
        } else if let Ok(threads) = arg.parse::<usize>() {
            config.num_threads = Some(threads);
            i += 1;
        } else {
            return Err(format!("Unknown argument: {}", arg).into());
        }
    }

    Ok(config)
}

fn input_basename(file_path: &str) -> &str {
    let stem = Path::new(file_path)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("data");
    // file_stem only drops ".gz" from ".tar.gz"
    stem.strip_suffix(".tar").unwrap_or(stem)
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = parse_args()?;

    if let Some(threads) = config.num_threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .map_err(|e| format!("Failed to set thread pool: {}", e))?;
        info!("Using {} threads.", threads);
    } else {
        info!("Using all available CPU cores.");
    }

    // Data loading
    let load_start = Instant::now();
    let frame = io::read_path(&config.input)?;
    let load_duration = load_start.elapsed();
    info!(
        "Matrix dimensions: {} rows x {} columns",
        frame.row_count(),
        frame.col_count()
    );

    // Ranking
    info!("Ranking along {}...", config.axis);
    let calc_start = Instant::now();
    let ranks = frame.rank(config.axis);
    let calc_duration = calc_start.elapsed();

    // Output writing
    let output_start = Instant::now();
    let base = input_basename(&config.input);
    let output_path = config
        .output
        .clone()
        .unwrap_or_else(|| format!("{}_{}_ranks.tar.gz", base, config.axis));
    if output_path.ends_with(".tar.gz") {
        let entry_name = format!("{}_{}_ranks.tsv", base, config.axis);
        io::write_tar_gz(&ranks, &output_path, &entry_name)?;
    } else {
        io::write_tsv(&ranks, std::fs::File::create(&output_path)?)?;
    }
    let output_duration = output_start.elapsed();
    info!("Ranks written to {}", output_path);

    if config.time_tracking {
        let total_duration = load_duration + calc_duration + output_duration;
        println!("Data loading:   {:8.3} seconds", load_duration.as_secs_f64());
        println!("Ranking:        {:8.3} seconds", calc_duration.as_secs_f64());
        println!("Output writing: {:8.3} seconds", output_duration.as_secs_f64());
        println!("Total time:     {:8.3} seconds", total_duration.as_secs_f64());
    }

    Ok(())
}
