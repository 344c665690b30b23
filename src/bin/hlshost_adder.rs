use adder_host::error::Result;
use adder_host::{parse_size, run, status, LaunchConfig, Simulator};

use std::path::*;
use std::process;
use structopt::StructOpt;

/// Call the adder kernel in-process and verify the result
#[derive(StructOpt, Debug)]
#[structopt(
    name = "hlshost_adder",
    raw(
        setting = "structopt::clap::AppSettings::ColoredHelp",
        setting = "structopt::clap::AppSettings::AllowNegativeNumbers"
    )
)]
struct Opt {
    /// Number of elements (default:1024)
    size: Option<String>,
    /// Launch configuration in TOML
    #[structopt(short = "c", long = "config", parse(from_os_str))]
    config: Option<PathBuf>,
    /// Seed of the input generator (default:42)
    #[structopt(long = "seed")]
    seed: Option<u64>,
    /// Write the run report as JSON
    #[structopt(long = "report", parse(from_os_str))]
    report: Option<PathBuf>,
    /// Suppress progress lines
    #[structopt(short = "q", long = "quiet")]
    quiet: bool,
}

fn launch(opt: Opt) -> Result<()> {
    let mut cfg = match opt.config {
        Some(ref path) => LaunchConfig::load(path)?,
        None => LaunchConfig::default(),
    };
    if let Some(seed) = opt.seed {
        cfg.seed = seed;
    }
    let size = parse_size(opt.size.as_ref().map(|s| s.as_str()), cfg.default_size)?;

    status(opt.quiet, "Simulating", &format!("{} elements", size));
    let report = run(&mut Simulator::new(), &cfg, size)?;
    if let Some(ref path) = opt.report {
        report.save(path)?;
    }

    let report = report.into_result()?;
    println!("{}", report.pass_line());
    println!("{}", report.sample_line());
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let opt = Opt::from_args();
    if let Err(e) = launch(opt) {
        if e.is_verification_failure() {
            println!("{}", e);
        } else {
            eprintln!("{}", e);
        }
        process::exit(1);
    }
}
