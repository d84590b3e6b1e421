use pretty_assertions::assert_eq;
use std::path::PathBuf;

fn get_data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/data")
}

fn get_printout(output: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(output)
        .lines()
        .map(|x| x.to_string())
        .collect()
}

#[test]
fn show_prints_rates_per_task() {
    let output = assert_cmd::Command::cargo_bin("coro_profparser")
        .unwrap()
        .current_dir(get_data_dir())
        .args(&["show", "-i", "leds.json"])
        .output()
        .expect("Failed to run coro_profparser on file");
    assert!(output.status.success());

    let lines = get_printout(&output.stdout);
    assert_eq!(lines[0], "3 tasks profiled (4 samples, 72871 events)");
    assert!(lines.iter().any(|l| l.trim_start().starts_with("leds:")));
    assert!(lines.iter().any(|l| l.trim_start().starts_with("Display:")));
    // one rate line per sample
    let rates = lines
        .iter()
        .filter(|l| l.contains("events/s"))
        .count();
    assert_eq!(rates, 4);
}

#[test]
fn show_filters_to_one_task() {
    let output = assert_cmd::Command::cargo_bin("coro_profparser")
        .unwrap()
        .current_dir(get_data_dir())
        .args(&["show", "-i", "leds.json", "--task", "idle"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let lines = get_printout(&output.stdout);
    assert!(lines.iter().any(|l| l.trim_start().starts_with("idle:")));
    assert!(!lines.iter().any(|l| l.trim_start().starts_with("leds:")));
}

#[test]
fn show_series_dumps_step_points() {
    let output = assert_cmd::Command::cargo_bin("coro_profparser")
        .unwrap()
        .current_dir(get_data_dir())
        .args(&["show", "-i", "leds.json", "--task", "Display", "--series"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let lines = get_printout(&output.stdout);
    assert!(lines.iter().any(|l| l.trim_start().starts_with("Survival:")));
    assert!(lines.iter().any(|l| l.trim_start().starts_with("Density:")));
}

#[test]
fn show_fails_cleanly_on_a_bad_dump() {
    let output = assert_cmd::Command::cargo_bin("coro_profparser")
        .unwrap()
        .current_dir(get_data_dir())
        .args(&["show", "-i", "no_such_capture.json"])
        .output()
        .unwrap();
    assert!(!output.status.success());
}
