use pwmled_lpp::compare::{capitalize, parse_cli};
use pwmled_lpp::{plot_comparison, TimeBrightness, WaveSeries, CSV_DELIMITER};

fn main() {
    let (base, datadir, pngout, waveforms) = parse_cli();
    let mut series: Vec<WaveSeries> = Vec::with_capacity(waveforms.len());
    for w in waveforms {
        let csvin = datadir.join(format!("{}_{}.csv", base, w.cli_name()));
        println!("read {} data from {}", w.label(), csvin.to_str().unwrap());
        let data = TimeBrightness::from_csv(&csvin, CSV_DELIMITER).unwrap();
        series.push(WaveSeries {
            label: String::from(w.label()),
            color: w.color(),
            data,
        });
    }
    let title = format!("Waveform Comparison for {} Animation", capitalize(&base));
    println!("plot comparison to {}", pngout.to_str().unwrap());
    plot_comparison(&series, &title, &pngout).unwrap();
}
