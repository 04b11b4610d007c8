use super::{TimeBrightness, VERSION};
use clap::{App, Arg};
use plotters::style::RGBColor;
use std::path::PathBuf;

const PI_HALF: f64 = std::f64::consts::FRAC_PI_2;
/// Steepness of the exponential shaping applied to the sine curves.
const EXP_MULTIPLIER: f64 = 3.;

/// The fade-brightness curves of the LED animation firmware.
/// Each one maps elapsed time within a fade phase to a duty cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Quadratic,
    Exponential,
    Sine,
    SineOpt,
}

impl Waveform {
    pub const ALL: [Waveform; 4] = [
        Waveform::Quadratic,
        Waveform::Exponential,
        Waveform::Sine,
        Waveform::SineOpt,
    ];

    /// cli value, also the csv file suffix: data/<base>_<name>.csv
    pub fn cli_name(&self) -> &'static str {
        match self {
            Waveform::Quadratic => "quadratic",
            Waveform::Exponential => "exp",
            Waveform::Sine => "sine",
            Waveform::SineOpt => "sine_opt",
        }
    }

    /// legend label on the comparison chart
    pub fn label(&self) -> &'static str {
        match self {
            Waveform::Quadratic => "Quadratic",
            Waveform::Exponential => "Exponential",
            Waveform::Sine => "Sine",
            Waveform::SineOpt => "Sine Optimized",
        }
    }

    /// fixed series color on the comparison chart
    pub fn color(&self) -> RGBColor {
        match self {
            Waveform::Quadratic => RGBColor(214, 39, 40),
            Waveform::Exponential => RGBColor(44, 160, 44),
            Waveform::Sine => RGBColor(31, 119, 180),
            Waveform::SineOpt => RGBColor(128, 0, 128),
        }
    }

    pub fn from_cli_name(name: &str) -> Option<Waveform> {
        Waveform::ALL.iter().copied().find(|w| w.cli_name() == name)
    }
}

/// Polynomial approximation of sine on [0, pi/2],
/// sin(x) = x - x^3/6 + x^5/120
fn fast_sine(x: f64) -> f64 {
    let x2 = x * x;
    let x3 = x2 * x;
    let x5 = x3 * x2;
    x - (x3 / 6.) + (x5 / 120.)
}

/// Polynomial approximation of the exponential,
/// exp(x) = 1 + x + x^2/2 + x^3/6
fn fast_exp(x: f64) -> f64 {
    1. + x + (x * x / 2.) + (x * x * x / 6.)
}

/// Computes the fade brightness for one waveform at the given elapsed time
/// within a fade phase of the given duration.
/// The result is in [0, max_duty_cycle]; fading out mirrors fading in.
pub fn fade_brightness(
    waveform: Waveform,
    elapsed: f64,
    duration: f64,
    max_duty_cycle: f64,
    fading_in: bool,
) -> f64 {
    match waveform {
        Waveform::Quadratic => {
            // normalize time to [0, max_duty_cycle] for direct scaling
            let normalized = elapsed * max_duty_cycle / duration;
            if fading_in {
                normalized * normalized / max_duty_cycle
            } else {
                let inverse = max_duty_cycle - normalized;
                inverse * inverse / max_duty_cycle
            }
        }
        Waveform::Exponential => {
            let progress = if fading_in {
                elapsed / duration
            } else {
                1. - elapsed / duration
            };
            ((progress * EXP_MULTIPLIER).exp() - 1.) / (EXP_MULTIPLIER.exp() - 1.) * max_duty_cycle
        }
        Waveform::Sine => {
            let progress = if fading_in {
                elapsed / duration
            } else {
                1. - elapsed / duration
            };
            let sine_input = (progress * PI_HALF).sin();
            ((sine_input * EXP_MULTIPLIER).exp() - 1.) / (EXP_MULTIPLIER.exp() - 1.)
                * max_duty_cycle
        }
        Waveform::SineOpt => {
            let progress = if fading_in {
                elapsed / duration
            } else {
                1. - elapsed / duration
            };
            let sine_input = fast_sine(progress * PI_HALF);
            // normalization so that the approximated curve still peaks at max
            let factor = fast_exp(fast_sine(PI_HALF) * EXP_MULTIPLIER) - 1.;
            let brightness = (fast_exp(sine_input * EXP_MULTIPLIER) - 1.) / factor * max_duty_cycle;
            brightness.min(max_duty_cycle)
        }
    }
}

/// Samples one full pulse cycle, fade in over duration_ms then fade out
/// over duration_ms, at the given tick interval.
/// Brightness values are rounded to whole duty cycles as the firmware
/// computes them in integer arithmetic.
pub fn pulse(
    waveform: Waveform,
    duration_ms: u32,
    step_ms: u32,
    max_duty_cycle: f64,
) -> TimeBrightness {
    let nsteps = duration_ms / step_ms;
    let duration = f64::from(duration_ms);
    let mut timebrightness = TimeBrightness::new((2 * nsteps + 1) as usize);
    for i in 0..=nsteps {
        let elapsed = f64::from(i * step_ms);
        timebrightness.time.push(elapsed);
        timebrightness
            .brightness
            .push(fade_brightness(waveform, elapsed, duration, max_duty_cycle, true).round());
    }
    for i in 1..=nsteps {
        let elapsed = f64::from(i * step_ms);
        timebrightness.time.push(duration + elapsed);
        timebrightness
            .brightness
            .push(fade_brightness(waveform, elapsed, duration, max_duty_cycle, false).round());
    }
    timebrightness
}

/// Takes the CLI arguments that control the waveform sample generation.
pub fn parse_cli() -> (Waveform, u32, u32, f64, PathBuf) {
    let arg_waveform = Arg::with_name("waveform")
        .help("fade-brightness waveform to sample")
        .short("w")
        .long("waveform")
        .takes_value(true)
        .required(true)
        .possible_values(&["quadratic", "exp", "sine", "sine_opt"]);
    let arg_duration = Arg::with_name("duration")
        .help("duration of each fade phase, in ms")
        .short("d")
        .long("duration")
        .takes_value(true)
        .default_value("1000");
    let arg_step = Arg::with_name("step")
        .help("sample tick interval, in ms")
        .short("s")
        .long("step")
        .takes_value(true)
        .default_value("10");
    let arg_max = Arg::with_name("max_duty_cycle")
        .help("maximum duty cycle, the brightness at the pulse peak")
        .short("m")
        .long("max")
        .takes_value(true)
        .default_value("1000");
    let arg_csvout = Arg::with_name("output_csvfile")
        .help("name of the output csv file")
        .short("o")
        .long("csvfile")
        .takes_value(true);
    let cli_args = App::new("pwmled_gen")
        .version(VERSION.unwrap_or("unknown"))
        .about("cli app to generate pulse animation brightness samples")
        .arg(arg_waveform)
        .arg(arg_duration)
        .arg(arg_step)
        .arg(arg_max)
        .arg(arg_csvout)
        .get_matches();
    // validated by possible_values
    let waveform = Waveform::from_cli_name(cli_args.value_of("waveform").unwrap()).unwrap();
    let duration = cli_args
        .value_of("duration")
        .unwrap_or_default()
        .parse::<u32>()
        .unwrap();
    let step = cli_args
        .value_of("step")
        .unwrap_or_default()
        .parse::<u32>()
        .unwrap();
    let max_duty_cycle = cli_args
        .value_of("max_duty_cycle")
        .unwrap_or_default()
        .parse::<f64>()
        .unwrap();
    let csvout = match cli_args.value_of("output_csvfile") {
        Some(p) => PathBuf::from(p),
        None => PathBuf::from(format!("data/pulse_{}.csv", waveform.cli_name())),
    };
    return (waveform, duration, step, max_duty_cycle, csvout);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MAX_DUTY_CYCLE;

    #[test]
    fn test_fade_in_endpoints() {
        for w in Waveform::ALL.iter() {
            let start = fade_brightness(*w, 0., 1000., MAX_DUTY_CYCLE, true);
            let end = fade_brightness(*w, 1000., 1000., MAX_DUTY_CYCLE, true);
            assert!(start.abs() < 1e-6, "{:?} starts at {}", w, start);
            assert!(
                (end - MAX_DUTY_CYCLE).abs() < 1e-6,
                "{:?} ends at {}",
                w,
                end
            );
        }
    }

    #[test]
    fn test_fade_out_endpoints() {
        for w in Waveform::ALL.iter() {
            let start = fade_brightness(*w, 0., 1000., MAX_DUTY_CYCLE, false);
            let end = fade_brightness(*w, 1000., 1000., MAX_DUTY_CYCLE, false);
            assert!(
                (start - MAX_DUTY_CYCLE).abs() < 1e-6,
                "{:?} starts at {}",
                w,
                start
            );
            assert!(end.abs() < 1e-6, "{:?} ends at {}", w, end);
        }
    }

    #[test]
    fn test_fade_in_monotone_and_in_range() {
        for w in Waveform::ALL.iter() {
            let mut previous = 0.;
            for elapsed in (0..=1000).step_by(10) {
                let b = fade_brightness(*w, f64::from(elapsed), 1000., MAX_DUTY_CYCLE, true);
                assert!(
                    b >= 0. && b <= MAX_DUTY_CYCLE + 1e-6,
                    "{:?} out of range at {} ms: {}",
                    w,
                    elapsed,
                    b
                );
                assert!(
                    b >= previous,
                    "{:?} not monotone at {} ms: {} < {}",
                    w,
                    elapsed,
                    b,
                    previous
                );
                previous = b;
            }
        }
    }

    #[test]
    fn test_sine_opt_tracks_sine() {
        // the polynomial approximations drift from the exact curve,
        // the firmware accepts up to roughly 15% of the duty-cycle range
        for elapsed in (0..=1000).step_by(10) {
            let exact = fade_brightness(Waveform::Sine, f64::from(elapsed), 1000., 1000., true);
            let approx =
                fade_brightness(Waveform::SineOpt, f64::from(elapsed), 1000., 1000., true);
            assert!(
                (exact - approx).abs() < 150.,
                "deviation {} at {} ms",
                (exact - approx).abs(),
                elapsed
            );
        }
    }

    #[test]
    fn test_pulse_sampling() {
        let tb = pulse(Waveform::Sine, 1000, 10, MAX_DUTY_CYCLE);
        assert_eq!(tb.time.len(), 201);
        assert_eq!(tb.brightness.len(), 201);
        // strictly increasing time, whole-duty-cycle brightness
        tb.time.windows(2).for_each(|t| assert!(t[1] > t[0]));
        tb.brightness
            .iter()
            .for_each(|b| assert_eq!(*b, b.round()));
        // peak at the end of the fade-in phase
        assert_eq!(tb.time[100], 1000.);
        assert_eq!(tb.brightness[100], MAX_DUTY_CYCLE);
        assert_eq!(tb.brightness[0], 0.);
        assert_eq!(tb.brightness[200], 0.);
    }

    #[test]
    fn test_waveform_cli_names_round_trip() {
        for w in Waveform::ALL.iter() {
            assert_eq!(Waveform::from_cli_name(w.cli_name()), Some(*w));
        }
        assert_eq!(Waveform::from_cli_name("triangle"), None);
    }
}
