use plotters::prelude::*;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
pub mod compare;
pub mod plot;
pub mod wave;

pub const VERSION: Option<&'static str> = option_env!("CARGO_PKG_VERSION");

/// Field delimiter of the animation csv dumps, no header row.
pub const CSV_DELIMITER: char = ';';

/// Brightness is stored as a PWM duty cycle scaled to [0, MAX_DUTY_CYCLE].
pub const MAX_DUTY_CYCLE: f64 = 1000.;

/// One named and colored series for the comparison chart.
pub struct WaveSeries {
    pub label: String,
    pub color: RGBColor,
    pub data: TimeBrightness,
}

/// The main struct for the brightness time series
#[derive(Debug, Clone)]
pub struct TimeBrightness {
    pub time: Vec<f64>,
    pub brightness: Vec<f64>,
}

impl TimeBrightness {
    pub fn new(capacity: usize) -> TimeBrightness {
        let time: Vec<f64> = Vec::with_capacity(capacity);
        let brightness: Vec<f64> = Vec::with_capacity(capacity);
        let timebrightness: TimeBrightness = TimeBrightness { time, brightness };
        timebrightness
    }

    /// Init a TimeBrightness from a headerless two-column csv.
    /// An unreadable file, a wrong column count, or a non-numeric field
    /// is an error; rows are never coerced or dropped.
    /// Row order is kept as read, it represents the time progression.
    pub fn from_csv<P>(
        fin: P,
        delimiter: char,
    ) -> Result<TimeBrightness, Box<dyn std::error::Error>>
    where
        P: AsRef<Path>,
    {
        let file = File::open(fin.as_ref()).map_err(|e| {
            format!("could not open csv file {}: {}", fin.as_ref().display(), e)
        })?;
        let buf = BufReader::new(file);
        let mut timebrightness = TimeBrightness::new(1024);
        for (n, l) in buf.lines().enumerate() {
            let l = l?;
            let fields: Vec<&str> = l.split(delimiter).collect();
            if fields.len() != 2 {
                return Err(format!(
                    "expected 2 columns but found {} at line {}: {}",
                    fields.len(),
                    n + 1,
                    l
                )
                .into());
            }
            let time: f64 = fields[0].trim().parse().map_err(|e| {
                format!("could not parse time at line {}: {}, {}", n + 1, fields[0], e)
            })?;
            let brightness: f64 = fields[1].trim().parse().map_err(|e| {
                format!(
                    "could not parse brightness at line {}: {}, {}",
                    n + 1,
                    fields[1],
                    e
                )
            })?;
            timebrightness.time.push(time);
            timebrightness.brightness.push(brightness);
        }
        Ok(timebrightness)
    }

    /// writes the time and brightness columns at the given path,
    /// same headerless delimited format the loader reads
    pub fn to_csv<P>(&self, fout: P, delimiter: char) -> Result<(), Box<dyn std::error::Error>>
    where
        P: AsRef<Path>,
    {
        let file = File::create(fout.as_ref()).map_err(|e| {
            format!(
                "could not create csv file {}: {}",
                fout.as_ref().display(),
                e
            )
        })?;
        let mut buf = BufWriter::new(file);
        for (t, b) in self.time.iter().zip(self.brightness.iter()) {
            buf.write_all(format!("{}{}{}\n", t, delimiter, b).as_bytes())?;
        }
        Ok(())
    }

    /// plots the brightness time series to png,
    /// blue line with circular markers over a grid
    pub fn plot<P>(&self, title: &str, fout: P) -> Result<(), Box<dyn std::error::Error>>
    where
        P: AsRef<Path>,
    {
        if self.time.is_empty() {
            return Err("empty series, nothing to plot".into());
        }
        let (xmin, xmax) = min_and_max(&self.time[..]);
        let xmargin = ((xmax - xmin) / 20.).max(1.);
        let (ymin, ymax) = min_and_max(&self.brightness[..]);
        let ymargin = ((ymax - ymin) / 10.).max(1.);
        let root = BitMapBackend::new(fout.as_ref(), (1000, 600)).into_drawing_area();
        root.fill(&WHITE)?;
        let mut chart = ChartBuilder::on(&root)
            .caption(title, ("sans-serif", 28))
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(70)
            .build_cartesian_2d(xmin - xmargin..xmax + xmargin, ymin - ymargin..ymax + ymargin)?;
        chart
            .configure_mesh()
            .light_line_style(&RGBColor(220, 220, 220).mix(0.8))
            .bold_line_style(RGBColor(150, 150, 150).stroke_width(1))
            .set_all_tick_mark_size(2)
            .label_style(("sans-serif", 18))
            .y_desc(format!("brightness [duty cycle, max {}]", MAX_DUTY_CYCLE))
            .x_desc("time [ms]")
            .y_label_formatter(&|y: &f64| format!("{:5}", y))
            .draw()?;
        let line = LineSeries::new(
            self.time
                .iter()
                .zip(self.brightness.iter())
                .map(|(x, y)| (*x, *y)),
            BLUE.stroke_width(2),
        );
        chart.draw_series(line)?;
        let points = self
            .time
            .iter()
            .zip(self.brightness.iter())
            .map(|(x, y)| Circle::new((*x, *y), 3, BLUE.filled()));
        chart.draw_series(points)?;
        root.present()?;
        Ok(())
    }
}

impl std::fmt::Display for TimeBrightness {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "time [ms], brightness\n")?;
        for (t, b) in self.time.iter().zip(self.brightness.iter()) {
            write!(f, "{},{}\n", t, b)?
        }
        Ok(())
    }
}

/// Overlays the given series on one chart with shared axes and a legend.
/// Series of different lengths are each drawn fully,
/// the axis bounds cover their union.
pub fn plot_comparison<P>(
    series: &[WaveSeries],
    title: &str,
    fout: P,
) -> Result<(), Box<dyn std::error::Error>>
where
    P: AsRef<Path>,
{
    if series.is_empty() {
        return Err("no series to plot".into());
    }
    let mut xmin = f64::INFINITY;
    let mut xmax = f64::NEG_INFINITY;
    let mut ymin = f64::INFINITY;
    let mut ymax = f64::NEG_INFINITY;
    for s in series.iter() {
        if s.data.time.is_empty() {
            return Err(format!("empty series {}, nothing to plot", s.label).into());
        }
        let (sxmin, sxmax) = min_and_max(&s.data.time[..]);
        let (symin, symax) = min_and_max(&s.data.brightness[..]);
        xmin = xmin.min(sxmin);
        xmax = xmax.max(sxmax);
        ymin = ymin.min(symin);
        ymax = ymax.max(symax);
    }
    let xmargin = ((xmax - xmin) / 20.).max(1.);
    let ymargin = ((ymax - ymin) / 10.).max(1.);
    let root = BitMapBackend::new(fout.as_ref(), (1000, 600)).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 28))
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(xmin - xmargin..xmax + xmargin, ymin - ymargin..ymax + ymargin)?;
    chart
        .configure_mesh()
        .light_line_style(&RGBColor(220, 220, 220).mix(0.8))
        .bold_line_style(RGBColor(150, 150, 150).stroke_width(1))
        .set_all_tick_mark_size(2)
        .label_style(("sans-serif", 18))
        .y_desc(format!("brightness [duty cycle, max {}]", MAX_DUTY_CYCLE))
        .x_desc("time [ms]")
        .y_label_formatter(&|y: &f64| format!("{:5}", y))
        .draw()?;
    for s in series.iter() {
        let color = s.color;
        let line = LineSeries::new(
            s.data
                .time
                .iter()
                .zip(s.data.brightness.iter())
                .map(|(x, y)| (*x, *y)),
            color.stroke_width(2),
        );
        chart
            .draw_series(line)?
            .label(s.label.as_str())
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
            });
    }
    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .label_font(("sans-serif", 18))
        .draw()?;
    root.present()?;
    Ok(())
}

pub fn min_and_max(values: &[f64]) -> (f64, f64) {
    let mut iter = values.iter();
    let first = match iter.next() {
        Some(v) => *v,
        None => panic!("cannot take min and max of an empty series"),
    };
    iter.fold((first, first), |(min, max), v| (min.min(*v), max.max(*v)))
}

#[cfg(test)]
mod tests {
    use super::*;
    // run tests with:
    // cargo test -- --nocapture
    // to allow println! to stdout

    #[test]
    fn test_from_csv_keeps_rows_and_order() {
        let tb = TimeBrightness::from_csv("./test/pwm_led_breath.csv", CSV_DELIMITER).unwrap();
        println!("{}", tb);
        assert_eq!(tb.time, vec![0., 10., 20.]);
        assert_eq!(tb.brightness, vec![0., 250., 1000.]);
    }

    #[test]
    fn test_from_csv_missing_file() {
        let res = TimeBrightness::from_csv("./test/does_not_exist.csv", CSV_DELIMITER);
        assert!(res.is_err());
    }

    #[test]
    fn test_from_csv_non_numeric_value() {
        let res = TimeBrightness::from_csv("./test/bad_value.csv", CSV_DELIMITER);
        let err = res.err().unwrap().to_string();
        println!("{}", err);
        assert!(err.contains("line 2"));
    }

    #[test]
    fn test_from_csv_wrong_column_count() {
        let res = TimeBrightness::from_csv("./test/bad_columns.csv", CSV_DELIMITER);
        let err = res.err().unwrap().to_string();
        println!("{}", err);
        assert!(err.contains("columns"));
    }

    #[test]
    fn test_csv_round_trip() {
        let tb = TimeBrightness {
            time: vec![0., 10., 20., 30.],
            brightness: vec![0., 250., 640., 1000.],
        };
        tb.to_csv("./test/round_trip.csv", CSV_DELIMITER).unwrap();
        let back = TimeBrightness::from_csv("./test/round_trip.csv", CSV_DELIMITER).unwrap();
        assert_eq!(tb.time, back.time);
        assert_eq!(tb.brightness, back.brightness);
    }

    #[test]
    fn test_plot_writes_png() {
        let tb = TimeBrightness::from_csv("./test/pwm_led_breath.csv", CSV_DELIMITER).unwrap();
        tb.plot("pwm_led_breath Sequence", "./test/pwm_led_breath.png")
            .unwrap();
        let meta = std::fs::metadata("./test/pwm_led_breath.png").unwrap();
        assert!(meta.len() > 0);
    }

    #[test]
    fn test_plot_missing_directory() {
        let tb = TimeBrightness {
            time: vec![0., 10.],
            brightness: vec![0., 1000.],
        };
        let res = tb.plot("nope", "./test/no_such_dir/nope.png");
        assert!(res.is_err());
    }

    #[test]
    fn test_plot_comparison_mixed_lengths() {
        let short = TimeBrightness {
            time: vec![0., 10., 20.],
            brightness: vec![0., 500., 1000.],
        };
        let long = TimeBrightness {
            time: vec![0., 10., 20., 30., 40.],
            brightness: vec![0., 120., 430., 820., 1000.],
        };
        let series = vec![
            WaveSeries {
                label: String::from("Sine"),
                color: RGBColor(31, 119, 180),
                data: short,
            },
            WaveSeries {
                label: String::from("Sine Optimized"),
                color: RGBColor(128, 0, 128),
                data: long,
            },
        ];
        plot_comparison(
            &series,
            "Waveform Comparison for Pulse Animation",
            "./test/mixed_lengths_comparison.png",
        )
        .unwrap();
        let meta = std::fs::metadata("./test/mixed_lengths_comparison.png").unwrap();
        assert!(meta.len() > 0);
    }

    #[test]
    fn test_plot_comparison_no_series() {
        let res = plot_comparison(&[], "empty", "./test/empty_comparison.png");
        assert!(res.is_err());
    }

    #[test]
    fn test_min_and_max() {
        let (min, max) = min_and_max(&[250., 0., 1000., 640.]);
        assert_eq!(min, 0.);
        assert_eq!(max, 1000.);
    }
}
