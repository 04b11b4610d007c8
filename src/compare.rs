use super::wave::Waveform;
use super::VERSION;
use clap::{App, Arg};
use std::path::PathBuf;

/// Takes the CLI arguments that control the waveform comparison chart.
/// The enabled waveforms are an explicit list, each one maps to a fixed
/// csv file suffix and series color through the Waveform table.
pub fn parse_cli() -> (String, PathBuf, PathBuf, Vec<Waveform>) {
    let arg_base = Arg::with_name("animation_base")
        .help("base name of the animation, data files are <base>_<waveform>.csv")
        .short("b")
        .long("base")
        .takes_value(true)
        .default_value("pulse");
    let arg_datadir = Arg::with_name("data_directory")
        .help("directory holding the csv data files")
        .short("d")
        .long("datadir")
        .takes_value(true)
        .default_value("data");
    let arg_waveforms = Arg::with_name("waveforms")
        .help("waveform series to overlay, comma separated")
        .short("w")
        .long("waveforms")
        .takes_value(true)
        .multiple(true)
        .use_delimiter(true)
        .possible_values(&["quadratic", "exp", "sine", "sine_opt"])
        .default_value("sine,sine_opt");
    let arg_pngout = Arg::with_name("output_pngfile")
        .help("name of the output png file")
        .short("o")
        .long("pngfile")
        .takes_value(true);
    let cli_args = App::new("pwmled_compare")
        .version(VERSION.unwrap_or("unknown"))
        .about("cli app to compare the animation waveforms on one chart")
        .arg(arg_base)
        .arg(arg_datadir)
        .arg(arg_waveforms)
        .arg(arg_pngout)
        .get_matches();
    let base = String::from(cli_args.value_of("animation_base").unwrap_or_default());
    let datadir = PathBuf::from(cli_args.value_of("data_directory").unwrap_or_default());
    let pngout = match cli_args.value_of("output_pngfile") {
        Some(p) => PathBuf::from(p),
        None => PathBuf::from("img/comparison").join(format!("{}_comparison.png", base)),
    };
    // validated by possible_values, duplicates are kept once in given order
    let mut waveforms: Vec<Waveform> = Vec::new();
    for name in cli_args.values_of("waveforms").unwrap() {
        let w = Waveform::from_cli_name(name).unwrap();
        if !waveforms.contains(&w) {
            waveforms.push(w);
        }
    }
    return (base, datadir, pngout, waveforms);
}

/// Uppercases the first letter of the base name for the chart title.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("pulse"), "Pulse");
        assert_eq!(capitalize(""), "");
        assert_eq!(capitalize("Breath"), "Breath");
    }
}
