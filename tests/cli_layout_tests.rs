//! End-to-end tests for `minkeyboard layout` command.

mod fixtures;
use fixtures::*;

fn pad_names(bucket: &serde_json::Value) -> Vec<String> {
    bucket
        .as_array()
        .expect("bucket should be an array")
        .iter()
        .map(|p| p["name"].as_str().unwrap().to_string())
        .collect()
}

fn row_names(row: &serde_json::Value) -> Vec<String> {
    row.as_array()
        .unwrap()
        .iter()
        .map(|k| k["key_name"].as_str().unwrap().to_string())
        .collect()
}

#[test]
fn test_layout_default_catalog() {
    let output = run_isolated(&["layout", "--json"]);
    let result = stdout_json(&output);

    assert_eq!(pad_names(&result["control"]), vec!["controlpad"]);
    assert_eq!(
        pad_names(&result["content"]),
        vec!["mainpad", "numpad", "combiningpad"]
    );
    assert_eq!(
        row_names(&result["control"][0]["rows"][0]),
        vec!["backspace", "enter"]
    );
}

#[test]
fn test_layout_digits_only() {
    let output = run_isolated(&["layout", "--pattern", "[0-9]", "--json"]);
    let result = stdout_json(&output);

    // Main pad and combining pad lose every key and disappear
    assert_eq!(pad_names(&result["content"]), vec!["numpad"]);
    let rows = result["content"][0]["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 4);
    assert_eq!(row_names(&rows[0]), vec!["7", "8", "9"]);
    assert_eq!(row_names(&rows[3]), vec!["0"]);
}

#[test]
fn test_layout_drops_empty_rows() {
    let output = run_isolated(&["layout", "--keys", "QA", "--json"]);
    let result = stdout_json(&output);

    let rows = result["content"][0]["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(row_names(&rows[0]), vec!["Q"]);
    assert_eq!(row_names(&rows[1]), vec!["A"]);
}

#[test]
fn test_layout_combining_keys_classified() {
    let output = run_isolated(&["layout", "--pattern", "[\u{300}-\u{302}]", "--json"]);
    let result = stdout_json(&output);

    assert_eq!(pad_names(&result["content"]), vec!["combiningpad"]);
    let row = &result["content"][0]["rows"][0];
    assert_eq!(
        row_names(row),
        vec!["acute-accent", "grave-accent", "circumflex-accent"]
    );
    assert_eq!(row[0]["action"], "combine");
}

#[test]
fn test_layout_without_content_pads_falls_back_to_key_order() {
    let (config_path, _temp_dir) = create_temp_config(
        "[keyboard]\nkeys = \"CAB\"\n\n[[keyboard.layout]]\nname = \"controlpad\"\nrows = [\"\\b\\n\"]\n",
    );

    let output = std::process::Command::new(minkeyboard_bin())
        .args([
            "layout",
            "--config",
            config_path.to_str().unwrap(),
            "--json",
        ])
        .output()
        .expect("Failed to execute command");
    let result = stdout_json(&output);

    assert_eq!(pad_names(&result["content"]), vec!["mainpad"]);
    assert_eq!(
        row_names(&result["content"][0]["rows"][0]),
        vec!["C", "A", "B"]
    );
}

#[test]
fn test_layout_plain_output() {
    let output = run_isolated(&["layout", "--keys", "AZ"]);

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Control:"));
    assert!(stdout.contains("[controlpad]"));
    assert!(stdout.contains("[mainpad]"));
}

#[test]
fn test_layout_invalid_pattern_fails() {
    let output = run_isolated(&["layout", "--pattern", "[Z-A]"]);
    assert_eq!(output.status.code(), Some(1));
}
