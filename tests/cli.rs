use std::{
    fs,
    path::Path,
    process::{Command, Output},
};

use ads1278_unpack::Record;

fn write_capture(path: &Path, records: u64, trailing: usize) {
    let mut bytes = Vec::new();
    for seq in 0..records {
        let rec = Record {
            seq,
            tstamp_ns: 500 + seq,
            channels: [-8_388_608, 8_388_607, 0, 1, -1, 2, -2, seq as i32],
        };
        rec.write_to(&mut bytes).unwrap();
    }
    bytes.extend(std::iter::repeat(0xee).take(trailing));
    fs::write(path, bytes).unwrap();
}

fn unpack(args: &[&std::ffi::OsStr]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_ads1278_unpack"))
        .args(args)
        .output()
        .unwrap()
}

#[test]
fn test_default_output_and_summary() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("ok.bin");
    write_capture(&input, 2, 0);

    let out = unpack(&[input.as_os_str(), "--to-volts".as_ref()]);
    assert!(out.status.success());
    let expected = dir.path().join("ok.tsv");
    assert_eq!(
        String::from_utf8(out.stdout).unwrap(),
        format!("Wrote 2 record(s) to {}\n", expected.display())
    );

    let table = fs::read_to_string(&expected).unwrap();
    let lines: Vec<_> = table.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("seq\ttstamp_ns\tch1_V\t"));
    assert!(lines[2].starts_with("1\t501\t-2.5\t2.49999970198\t0\t"));
}

#[test]
fn test_truncated_capture_fails_and_keeps_lines() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("cap.bin");
    let output = dir.path().join("table.txt");
    write_capture(&input, 2, 5);

    let out = unpack(&[
        input.as_os_str(),
        "--format".as_ref(),
        "csv".as_ref(),
        "-o".as_ref(),
        output.as_os_str(),
    ]);
    assert!(!out.status.success());
    assert!(out.stdout.is_empty());
    let stderr = String::from_utf8(out.stderr).unwrap();
    assert!(stderr.contains("truncated record at byte 96: got 5 bytes"));

    // Header and both complete records are still on disk
    let table = fs::read_to_string(&output).unwrap();
    let lines: Vec<_> = table.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("seq,tstamp_ns,ch1,"));
    assert!(lines[1].starts_with("0,500,-8388608,8388607,"));
}

#[test]
fn test_missing_input() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("missing.bin");

    let out = unpack(&[input.as_os_str()]);
    assert!(!out.status.success());
    assert!(out.stdout.is_empty());
    assert!(!out.stderr.is_empty());
    assert!(!dir.path().join("missing.tsv").exists());
}
