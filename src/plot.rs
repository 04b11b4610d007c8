use super::VERSION;
use clap::{App, Arg};
use std::path::PathBuf;

/// Takes the CLI arguments that control the plotting of the brightness time series.
pub fn parse_cli() -> (PathBuf, PathBuf, String) {
    let arg_csvin = Arg::with_name("input_csvfile")
        .help("name for the csv file")
        .short("f")
        .long("csvfile")
        .takes_value(true)
        .required(true)
        .default_value("data/pwm_led_breath.csv");
    let arg_pngout = Arg::with_name("output_pngfile")
        .help("name of the output png file")
        .short("o")
        .long("pngfile")
        .takes_value(true);
    let arg_title = Arg::with_name("title")
        .help("chart title")
        .short("t")
        .long("title")
        .takes_value(true);
    let cli_args = App::new("pwmled_plot")
        .version(VERSION.unwrap_or("unknown"))
        .about("cli app to plot the brightness time series")
        .arg(arg_csvin)
        .arg(arg_pngout)
        .arg(arg_title)
        .get_matches();
    let csvin = PathBuf::from(cli_args.value_of("input_csvfile").unwrap_or_default());
    let stem = match csvin.file_stem() {
        Some(s) => s.to_string_lossy().into_owned(),
        None => String::from("brightness"),
    };
    // by default data/<name>.csv is plotted to img/<name>.png
    let pngout = match cli_args.value_of("output_pngfile") {
        Some(p) => PathBuf::from(p),
        None => PathBuf::from("img").join(format!("{}.png", stem)),
    };
    let title = match cli_args.value_of("title") {
        Some(t) => String::from(t),
        None => format!("{} Sequence", stem),
    };
    return (csvin, pngout, title);
}
