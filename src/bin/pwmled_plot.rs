use pwmled_lpp::plot::parse_cli;
use pwmled_lpp::{TimeBrightness, CSV_DELIMITER};

fn main() {
    let (csvin, pngout, title) = parse_cli();
    println!(
        "read data from {} and plot to {}",
        csvin.to_str().unwrap(),
        pngout.to_str().unwrap()
    );
    let tb = TimeBrightness::from_csv(&csvin, CSV_DELIMITER).unwrap();
    tb.plot(&title, &pngout).unwrap();
}
