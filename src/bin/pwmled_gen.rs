use pwmled_lpp::wave::{parse_cli, pulse};
use pwmled_lpp::CSV_DELIMITER;

fn main() {
    let (waveform, duration, step, max_duty_cycle, csvout) = parse_cli();
    println!(
        "generate {} pulse, {} ms per fade phase at {} ms ticks, peak {}",
        waveform.cli_name(),
        duration,
        step,
        max_duty_cycle
    );
    let tb = pulse(waveform, duration, step, max_duty_cycle);
    tb.to_csv(&csvout, CSV_DELIMITER).unwrap();
    println!("wrote {} samples to {}", tb.time.len(), csvout.to_str().unwrap());
}
