use num_complex::Complex64;
use spectral_image::spectrum::{fft_in_place, next_pow2, Direction};
use spectral_image::synthetic::{load_sequence, Signal};
use std::env;
use std::path::PathBuf;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let mut args = env::args().skip(1);
    let signal = match args.next().as_deref() {
        None | Some("reference") => Signal::Reference,
        Some("cosine") => Signal::Cosine,
        Some("sine") => Signal::Sine,
        Some("sum") => Signal::Sum,
        Some("file") => {
            let path = args
                .next()
                .map(PathBuf::from)
                .ok_or_else(|| format!("Missing sample file\n{}", usage()))?;
            return transform_and_print(&path.display().to_string(), load_sequence(&path)?);
        }
        Some(other) => return Err(format!("Unknown signal '{other}'\n{}", usage())),
    };
    let samples = parse_arg(args.next(), 128usize, "samples")?;
    let periods = parse_arg(args.next(), 8.0f64, "periods")?;
    transform_and_print(&format!("{signal:?}"), signal.samples(samples, periods))
}

fn transform_and_print(label: &str, mut data: Vec<Complex64>) -> Result<(), String> {
    let n = data.len();
    data.resize(next_pow2(n), Complex64::new(0.0, 0.0));
    let input = data.clone();

    fft_in_place(&mut data, Direction::Forward);
    println!("{label}: {} samples (padded from {n})", data.len());
    for (k, z) in data.iter().enumerate() {
        println!("X[{k:3}] = {:>12.6} {:+12.6}i  |X| = {:.6}", z.re, z.im, z.norm());
    }

    fft_in_place(&mut data, Direction::Inverse);
    let scale = 1.0 / data.len() as f64;
    let max_err = data
        .iter()
        .zip(&input)
        .map(|(z, x)| (*z * scale - *x).norm())
        .fold(0.0, f64::max);
    println!("round-trip max error: {max_err:.3e}");
    Ok(())
}

fn parse_arg<T: std::str::FromStr>(arg: Option<String>, default: T, name: &str) -> Result<T, String> {
    match arg {
        None => Ok(default),
        Some(s) => s
            .parse()
            .map_err(|_| format!("Invalid {name} '{s}'\n{}", usage())),
    }
}

fn usage() -> String {
    "Usage: fft1d_demo [reference|cosine|sine|sum] [samples] [periods]\n       fft1d_demo file <samples.dat>".to_string()
}
