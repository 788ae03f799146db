use std::env;

use parachute_simulation::*;
use rand::thread_rng;

struct Options {
    config: SimulationConfig,
    output: Option<String>,
    vary: Option<SweepParameter>,
    start: Option<f64>,
    stop: Option<f64>,
    step: f64,
    jumpers: usize,
}

fn parse_f64(value: &str, label: &str) -> Result<f64, String> {
    value
        .parse::<f64>()
        .map_err(|_| format!("Invalid {label}: '{value}'. Expected a number."))
}

fn parse_usize(value: &str, label: &str) -> Result<usize, String> {
    value
        .parse::<usize>()
        .map_err(|_| format!("Invalid {label}: '{value}'. Expected a whole number."))
}

fn next_value<'a>(
    iter: &mut std::slice::Iter<'a, String>,
    flag: &str,
) -> Result<&'a String, String> {
    iter.next().ok_or_else(|| format!("Missing value for {flag}."))
}

fn parse_options(args: &[String]) -> Result<Options, String> {
    let mut options = Options {
        config: SimulationConfig::default(),
        output: None,
        vary: None,
        start: None,
        stop: None,
        step: 5.0,
        jumpers: DEFAULT_NUM_JUMPERS,
    };

    let mut iter = args.iter();
    while let Some(flag) = iter.next() {
        match flag.as_str() {
            "-m" | "--mass" => {
                options.config.mass = parse_f64(next_value(&mut iter, flag)?, "mass")?;
            }
            "-h0" | "--initial-altitude" => {
                options.config.initial_altitude =
                    parse_f64(next_value(&mut iter, flag)?, "initial altitude")?;
            }
            "-v0" | "--horizontal-speed" => {
                options.config.initial_horizontal_speed =
                    parse_f64(next_value(&mut iter, flag)?, "horizontal speed")?;
            }
            "-ka" | "--drag-open" => {
                options.config.drag_open =
                    parse_f64(next_value(&mut iter, flag)?, "open drag coefficient")?;
            }
            "-kc" | "--drag-closed" => {
                options.config.drag_closed = Some(parse_f64(
                    next_value(&mut iter, flag)?,
                    "closed drag coefficient",
                )?);
            }
            "-ht" | "--trigger-altitude" => {
                options.config.trigger_altitude =
                    parse_f64(next_value(&mut iter, flag)?, "trigger altitude")?;
            }
            "--vary" => {
                let token = next_value(&mut iter, flag)?;
                options.vary = Some(SweepParameter::parse(token).ok_or_else(|| {
                    format!("Unknown parameter '{token}'. Expected one of m, h0, v0, ka, kc, ht.")
                })?);
            }
            "--start" => {
                options.start = Some(parse_f64(next_value(&mut iter, flag)?, "sweep start")?);
            }
            "--stop" => {
                options.stop = Some(parse_f64(next_value(&mut iter, flag)?, "sweep stop")?);
            }
            "--step" => {
                options.step = parse_f64(next_value(&mut iter, flag)?, "sweep step")?;
            }
            "--jumpers" => {
                options.jumpers = parse_usize(next_value(&mut iter, flag)?, "jumper count")?;
            }
            "-o" | "--output" => {
                options.output = Some(next_value(&mut iter, flag)?.clone());
            }
            unknown => return Err(format!("Unknown option '{unknown}'.")),
        }
    }

    Ok(options)
}

fn print_parameters(config: &SimulationConfig) {
    println!("Simulation parameters:");
    println!("----------------------");
    println!("m:  {} kg", config.mass);
    println!("h0: {} m", config.initial_altitude);
    println!("v0: {} m/s", config.initial_horizontal_speed);
    println!("ka: {} kg/s", config.drag_open);
    println!(
        "kc: {} kg/s",
        config.drag_closed.unwrap_or(config.drag_open)
    );
    println!("ht: {} m", config.trigger_altitude);
    println!();
}

fn run_single(args: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    let options = parse_options(args)?;
    print_parameters(&options.config);

    let model = ParachuteModel::from_config(&options.config)?;
    let trajectory = simulate(&model)?;

    println!("Fall duration:    {:.2} s", trajectory.fall_duration());
    println!("Landing distance: {:.2} m", trajectory.landing_distance());
    println!("Landing speed:    {:.2} m/s", trajectory.landing_speed());
    println!("Max speed:        {:.2} m/s", trajectory.max_speed());
    println!("Samples retained: {}", trajectory.len());

    if let Some(path) = &options.output {
        plot_trajectory(&trajectory, path)?;
        println!("Wrote {}", path);
    }

    Ok(())
}

fn run_sweep_command(args: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    let options = parse_options(args)?;
    let parameter = options.vary.ok_or("sweep requires --vary")?;
    let start = options.start.ok_or("sweep requires --start")?;
    let stop = options.stop.ok_or("sweep requires --stop")?;

    print_parameters(&options.config);
    let result = run_sweep(&options.config, parameter, start, stop, options.step)?;

    println!(
        "{:>10} {:>16} {:>16} {:>14}",
        parameter.label(),
        "distance (m)",
        "landing (m/s)",
        "max (m/s)"
    );
    for run in &result.runs {
        println!(
            "{:>10.1} {:>16.1} {:>16.2} {:>14.2}",
            run.value, run.landing_distance, run.landing_speed, run.max_speed
        );
    }

    let path = options.output.unwrap_or_else(|| {
        format!("analysis_{}_{}_to_{}.png", parameter.label(), start, stop)
    });
    plot_sweep(&result, &path)?;
    println!("Wrote {}", path);

    Ok(())
}

fn run_batch_command(args: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    let options = parse_options(args)?;
    print_parameters(&options.config);
    println!("Simulating {} jumpers...", options.jumpers);

    let result = run_batch(&options.config, options.jumpers, &mut thread_rng())?;

    println!();
    println!("{:<10} {:>8} {:>8}", "Sex", "Mean", "Std.Dev");
    println!("{}", "-".repeat(28));
    for sex in [Sex::Male, Sex::Female] {
        let stats = result.range_statistics(sex);
        println!(
            "{:<10} {:>8.1} {:>8.1}",
            sex.label(),
            stats.mean,
            stats.std_dev
        );
    }

    let path = options
        .output
        .unwrap_or_else(|| "landing_distribution.png".to_string());
    plot_batch(&result, &path)?;
    println!("Wrote {}", path);

    Ok(())
}

fn print_usage(program: &str) {
    println!("Usage:");
    println!("  {program} single [options] [-o trajectory.png]");
    println!("  {program} sweep --vary PARAM --start A --stop B [--step S] [options]");
    println!("  {program} batch [--jumpers N] [options]");
    println!();
    println!("Options (shared defaults in parentheses):");
    println!("  -m  MASS     jumper mass in kg (75)");
    println!("  -h0 ALT      initial altitude in m (4000)");
    println!("  -v0 SPEED    initial horizontal speed in m/s (50)");
    println!("  -ka DRAG     open-parachute drag coefficient in kg/s (60)");
    println!("  -kc DRAG     closed-parachute drag coefficient in kg/s (= ka)");
    println!("  -ht ALT      parachute trigger altitude in m (1000)");
    println!("  -o  FILE     output PNG path");
    println!();
    println!("Sweep parameters: m, h0, v0, ka, kc, ht");
    println!();
    println!("Examples:");
    println!("  {program} single -kc 15");
    println!("  {program} sweep --vary ka --start 30 --stop 90 --step 10 -kc 15");
    println!("  {program} batch --jumpers 500 -kc 15");
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("parachute_sim");

    if args.len() < 2 || args.iter().any(|a| a == "-h" || a == "--help") {
        print_usage(program);
        return Ok(());
    }

    match args[1].as_str() {
        "single" => run_single(&args[2..]),
        "sweep" => run_sweep_command(&args[2..]),
        "batch" => run_batch_command(&args[2..]),
        other => Err(format!("Unknown command '{other}'.").into()),
    }
}

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}
