use std::error::Error;
use std::ops::Range;

use plotters::prelude::*;

use crate::analysis_system::monte_carlo::{BatchResult, Sex};
use crate::analysis_system::sweep::SweepResult;
use crate::trajectory_system::integrator::Trajectory;

const HISTOGRAM_BINS: usize = 30;

fn bounds<I: IntoIterator<Item = f64>>(values: I) -> (f64, f64) {
    values
        .into_iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        })
}

fn padded(lo: f64, hi: f64) -> Range<f64> {
    let span = hi - lo;
    let pad = if span > 0.0 { 0.05 * span } else { 1.0 };
    (lo - pad)..(hi + pad)
}

fn bin_counts(values: &[f64], lo: f64, hi: f64, bins: usize) -> Vec<(f64, f64, f64)> {
    let width = (hi - lo) / bins as f64;
    let mut counts = vec![0usize; bins];
    for &value in values {
        let index = (((value - lo) / width) as usize).min(bins - 1);
        counts[index] += 1;
    }
    counts
        .iter()
        .enumerate()
        .map(|(i, &count)| {
            (
                lo + i as f64 * width,
                lo + (i + 1) as f64 * width,
                count as f64,
            )
        })
        .collect()
}

/// Altitude over ground distance for a single fall.
pub fn plot_trajectory(trajectory: &Trajectory, path: &str) -> Result<(), Box<dyn Error>> {
    let root = BitMapBackend::new(path, (900, 600)).into_drawing_area();
    root.fill(&WHITE)?;

    let points: Vec<(f64, f64)> = trajectory
        .states()
        .iter()
        .map(|s| (s.position.x, s.position.y))
        .collect();
    let (x_lo, x_hi) = bounds(points.iter().map(|p| p.0));
    let (y_lo, y_hi) = bounds(points.iter().map(|p| p.1));

    let mut chart = ChartBuilder::on(&root)
        .caption("Parachute trajectory", ("sans-serif", 28).into_font())
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(60)
        .build_cartesian_2d(padded(x_lo, x_hi), padded(y_lo, y_hi))?;

    chart
        .configure_mesh()
        .x_desc("x (m)")
        .y_desc("y (m)")
        .draw()?;

    chart.draw_series(LineSeries::new(points, &BLUE))?;

    root.present()?;
    Ok(())
}

/// 2x3 sweep analysis figure: trajectories, vertical-speed histories and the
/// three landing metrics against the swept parameter, plus the fixed
/// parameters in the spare panel.
pub fn plot_sweep(result: &SweepResult, path: &str) -> Result<(), Box<dyn Error>> {
    let root = BitMapBackend::new(path, (1500, 900)).into_drawing_area();
    root.fill(&WHITE)?;

    let label = result.parameter.label();
    let first = result.runs[0].value;
    let last = result.runs[result.runs.len() - 1].value;
    let root = root.titled(
        &format!("Analysis sweeping {} from {} to {}", label, first, last),
        ("sans-serif", 30).into_font(),
    )?;
    let panels = root.split_evenly((2, 3));

    // Panel 0: y(x) per run.
    {
        let (x_lo, x_hi) = bounds(
            result
                .runs
                .iter()
                .flat_map(|r| r.trajectory.states().iter().map(|s| s.position.x)),
        );
        let (y_lo, y_hi) = bounds(
            result
                .runs
                .iter()
                .flat_map(|r| r.trajectory.states().iter().map(|s| s.position.y)),
        );

        let mut chart = ChartBuilder::on(&panels[0])
            .caption("Trajectory y(x)", ("sans-serif", 22).into_font())
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(55)
            .build_cartesian_2d(padded(x_lo, x_hi), padded(y_lo, y_hi))?;
        chart
            .configure_mesh()
            .x_desc("x (m)")
            .y_desc("y (m)")
            .draw()?;

        for (index, run) in result.runs.iter().enumerate() {
            let color = Palette99::pick(index).mix(0.9);
            let points: Vec<(f64, f64)> = run
                .trajectory
                .states()
                .iter()
                .map(|s| (s.position.x, s.position.y))
                .collect();
            chart
                .draw_series(LineSeries::new(points, &color))?
                .label(format!("{}={:.1}", label, run.value))
                .legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 18, y)], color)
                });
        }
        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;
    }

    // Panel 1: |vy|(t) per run.
    {
        let (t_lo, t_hi) = bounds(
            result
                .runs
                .iter()
                .flat_map(|r| r.trajectory.times().iter().copied()),
        );
        let (v_lo, v_hi) = bounds(
            result
                .runs
                .iter()
                .flat_map(|r| r.trajectory.states().iter().map(|s| s.velocity.y.abs())),
        );

        let mut chart = ChartBuilder::on(&panels[1])
            .caption("Vertical speed |vy|(t)", ("sans-serif", 22).into_font())
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(55)
            .build_cartesian_2d(padded(t_lo, t_hi), padded(v_lo, v_hi))?;
        chart
            .configure_mesh()
            .x_desc("t (s)")
            .y_desc("|vy| (m/s)")
            .draw()?;

        for (index, run) in result.runs.iter().enumerate() {
            let color = Palette99::pick(index).mix(0.9);
            let points: Vec<(f64, f64)> = run
                .trajectory
                .times()
                .iter()
                .zip(run.trajectory.states())
                .map(|(t, s)| (*t, s.velocity.y.abs()))
                .collect();
            chart.draw_series(LineSeries::new(points, &color))?;
        }
    }

    // Panels 2-4: landing metrics against the swept parameter.
    let metric_panels: [(usize, &str, &RGBColor, fn(&crate::analysis_system::sweep::SweepRun) -> f64); 3] = [
        (2, "Max speed (m/s)", &MAGENTA, |run| run.max_speed),
        (3, "Landing distance (m)", &GREEN, |run| run.landing_distance),
        (4, "Landing speed (m/s)", &RED, |run| run.landing_speed),
    ];
    for (panel, description, color, metric) in metric_panels {
        let points: Vec<(f64, f64)> = result.runs.iter().map(|r| (r.value, metric(r))).collect();
        let (x_lo, x_hi) = bounds(points.iter().map(|p| p.0));
        let (y_lo, y_hi) = bounds(points.iter().map(|p| p.1));

        let mut chart = ChartBuilder::on(&panels[panel])
            .caption(
                format!("{} vs {}", description, label),
                ("sans-serif", 22).into_font(),
            )
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(55)
            .build_cartesian_2d(padded(x_lo, x_hi), padded(y_lo, y_hi))?;
        chart
            .configure_mesh()
            .x_desc(format!("{} ({})", label, result.parameter.unit()))
            .y_desc(description)
            .draw()?;

        chart.draw_series(LineSeries::new(points.clone(), color))?;
        chart.draw_series(
            points
                .iter()
                .map(|&(x, y)| Circle::new((x, y), 4, color.filled())),
        )?;
    }

    // Panel 5: the parameters held fixed during the sweep.
    {
        let config = &result.base;
        let closed = config.drag_closed.unwrap_or(config.drag_open);
        let lines = [
            "FIXED PARAMETERS:".to_string(),
            "----------------".to_string(),
            format!("m  = {} kg", config.mass),
            format!("h0 = {} m", config.initial_altitude),
            format!("v0 = {} m/s", config.initial_horizontal_speed),
            format!("ka = {} kg/s", config.drag_open),
            format!("kc = {} kg/s", closed),
            format!("ht = {} m", config.trigger_altitude),
        ];
        let font = ("monospace", 20).into_font();
        for (index, line) in lines.iter().enumerate() {
            if lines[index].starts_with(label) {
                continue; // the swept parameter is not fixed
            }
            panels[5].draw(&Text::new(
                line.clone(),
                (60, 60 + 26 * index as i32),
                font.clone(),
            ))?;
        }
    }

    root.present()?;
    Ok(())
}

/// 2x2 landing-distribution figure for a Monte-Carlo batch.
pub fn plot_batch(result: &BatchResult, path: &str) -> Result<(), Box<dyn Error>> {
    let root = BitMapBackend::new(path, (1200, 800)).into_drawing_area();
    root.fill(&WHITE)?;
    let root = root.titled(
        "Landing position distribution",
        ("sans-serif", 30).into_font(),
    )?;
    let panels = root.split_evenly((2, 2));

    let male_style = BLUE.mix(0.5).filled();
    let female_style = RED.mix(0.3).filled();

    // Panel 0: landing position against launch time.
    {
        let (t_lo, t_hi) = bounds(result.jumpers.iter().map(|j| j.launch_time));
        let (p_lo, p_hi) = bounds(result.jumpers.iter().map(|j| j.landing_position));

        let mut chart = ChartBuilder::on(&panels[0])
            .caption(
                "Landing position vs launch time",
                ("sans-serif", 22).into_font(),
            )
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(65)
            .build_cartesian_2d(padded(t_lo, t_hi), padded(p_lo, p_hi))?;
        chart
            .configure_mesh()
            .x_desc("Launch time (s)")
            .y_desc("Landing position (m)")
            .draw()?;

        for (sex, style, name) in [
            (Sex::Male, male_style, "Male"),
            (Sex::Female, female_style, "Female"),
        ] {
            chart
                .draw_series(
                    result
                        .jumpers
                        .iter()
                        .filter(|j| j.sex == sex)
                        .map(|j| Circle::new((j.launch_time, j.landing_position), 3, style)),
                )?
                .label(name)
                .legend(move |(x, y)| Circle::new((x + 8, y), 4, style));
        }
        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;
    }

    // Panel 1: range histogram by sex.
    {
        let (r_lo, r_hi) = bounds(result.jumpers.iter().map(|j| j.range));
        let range_span = padded(r_lo, r_hi);
        let male_bins = bin_counts(
            &result.ranges(Sex::Male),
            range_span.start,
            range_span.end,
            HISTOGRAM_BINS,
        );
        let female_bins = bin_counts(
            &result.ranges(Sex::Female),
            range_span.start,
            range_span.end,
            HISTOGRAM_BINS,
        );
        let count_hi = bounds(
            male_bins
                .iter()
                .chain(female_bins.iter())
                .map(|&(_, _, count)| count),
        )
        .1;

        let mut chart = ChartBuilder::on(&panels[1])
            .caption("Range histogram", ("sans-serif", 22).into_font())
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(55)
            .build_cartesian_2d(range_span, 0.0..(count_hi * 1.1).max(1.0))?;
        chart
            .configure_mesh()
            .x_desc("Range (m)")
            .y_desc("Frequency")
            .draw()?;

        chart.draw_series(
            male_bins
                .iter()
                .filter(|&&(_, _, count)| count > 0.0)
                .map(|&(x0, x1, count)| Rectangle::new([(x0, 0.0), (x1, count)], male_style)),
        )?;
        chart.draw_series(
            female_bins
                .iter()
                .filter(|&&(_, _, count)| count > 0.0)
                .map(|&(x0, x1, count)| Rectangle::new([(x0, 0.0), (x1, count)], female_style)),
        )?;
    }

    // Panel 2: range against jumper mass.
    {
        let (m_lo, m_hi) = bounds(result.jumpers.iter().map(|j| j.mass));
        let (r_lo, r_hi) = bounds(result.jumpers.iter().map(|j| j.range));

        let mut chart = ChartBuilder::on(&panels[2])
            .caption("Range vs mass", ("sans-serif", 22).into_font())
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(65)
            .build_cartesian_2d(padded(m_lo, m_hi), padded(r_lo, r_hi))?;
        chart
            .configure_mesh()
            .x_desc("Mass (kg)")
            .y_desc("Range (m)")
            .draw()?;

        for (sex, style) in [(Sex::Male, male_style), (Sex::Female, female_style)] {
            chart.draw_series(
                result
                    .jumpers
                    .iter()
                    .filter(|j| j.sex == sex)
                    .map(|j| Circle::new((j.mass, j.range), 3, style)),
            )?;
        }
    }

    // Panel 3: per-sex range statistics.
    {
        let male = result.range_statistics(Sex::Male);
        let female = result.range_statistics(Sex::Female);
        let lines = [
            format!("{:<10} {:>8} {:>8}", "Sex", "Mean", "Std.Dev"),
            "-".repeat(28),
            format!("{:<10} {:>8.1} {:>8.1}", "Male", male.mean, male.std_dev),
            format!(
                "{:<10} {:>8.1} {:>8.1}",
                "Female", female.mean, female.std_dev
            ),
        ];
        let font = ("monospace", 22).into_font();
        for (index, line) in lines.iter().enumerate() {
            panels[3].draw(&Text::new(
                line.clone(),
                (80, 120 + 30 * index as i32),
                font.clone(),
            ))?;
        }
    }

    root.present()?;
    Ok(())
}
