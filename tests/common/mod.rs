#![allow(dead_code)]

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};
use std::time::{SystemTime, UNIX_EPOCH};

pub struct CmdResult {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
    pub log_path: PathBuf,
}

fn now_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_millis())
}

fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

fn resolve_bin_path() -> PathBuf {
    if let Ok(path) = std::env::var("CARGO_BIN_EXE_sbr") {
        return PathBuf::from(path);
    }

    let exe_name = if cfg!(windows) { "sbr.exe" } else { "sbr" };
    let fallback = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(PathBuf::from))
        .and_then(|deps| deps.parent().map(PathBuf::from))
        .map(|debug_dir| debug_dir.join(exe_name));

    match fallback {
        Some(path) if path.exists() => path,
        _ => panic!("unable to resolve sbr binary path for integration test"),
    }
}

pub fn run_cli_case(case_name: &str, args: &[&str]) -> CmdResult {
    run_cli_case_with_stdin(case_name, args, "")
}

pub fn run_cli_case_with_stdin(case_name: &str, args: &[&str], stdin: &str) -> CmdResult {
    let root = std::env::temp_dir().join("sbr-test-logs");
    fs::create_dir_all(&root).expect("create temp test log dir");

    let log_path = root.join(format!("{}-{}.log", sanitize(case_name), now_millis()));
    let bin_path = resolve_bin_path();

    let mut child = Command::new(&bin_path)
        .args(args)
        .env("RUST_BACKTRACE", "1")
        .env_remove("SBR_OUTPUT_FORMAT")
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("execute sbr command");
    {
        let mut pipe = child.stdin.take().expect("stdin pipe");
        pipe.write_all(stdin.as_bytes()).expect("write stdin");
    }
    let output = child.wait_with_output().expect("wait for sbr");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();

    let mut log_content = String::new();
    log_content.push_str(&format!("case={case_name}\n"));
    log_content.push_str(&format!("bin={}\n", bin_path.display()));
    log_content.push_str(&format!("args={args:?}\n"));
    log_content.push_str(&format!("status={}\n", output.status));
    log_content.push_str("----- stdout -----\n");
    log_content.push_str(&stdout);
    log_content.push('\n');
    log_content.push_str("----- stderr -----\n");
    log_content.push_str(&stderr);
    log_content.push('\n');
    fs::write(&log_path, log_content).expect("write test log");

    CmdResult {
        status: output.status,
        stdout,
        stderr,
        log_path,
    }
}

// ──────────────────── fixtures ────────────────────

pub const ROOT_PLIST: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
<dict>
    <key>PreferenceSpecifiers</key>
    <array>
        <dict>
            <key>Type</key><string>PSGroupSpecifier</string>
            <key>Title</key><string>G1</string>
            <key>FooterText</key><string>F1</string>
        </dict>
        <dict>
            <key>Type</key><string>PSToggleSwitchSpecifier</string>
            <key>Title</key><string>T1</string>
            <key>Key</key><string>k1</string>
            <key>DefaultValue</key><true/>
        </dict>
        <dict>
            <key>Type</key><string>PSRadioGroupSpecifier</string>
            <key>Title</key><string>R1</string>
            <key>Key</key><string>k2</string>
            <key>Titles</key><array><string>One</string><string>Two</string></array>
            <key>Values</key><array><string>one</string><string>two</string></array>
            <key>DefaultValue</key><string>one</string>
            <key>Restartable</key><false/>
        </dict>
        <dict>
            <key>Type</key><string>PSGroupSpecifier</string>
            <key>Title</key><string>G2</string>
            <key>FooterText</key><string>F2</string>
        </dict>
        <dict>
            <key>Type</key><string>PSSliderSpecifier</string>
            <key>Key</key><string>k3</string>
            <key>MinimumValue</key><integer>0</integer>
            <key>MaximumValue</key><integer>100</integer>
            <key>DefaultValue</key><integer>50</integer>
        </dict>
        <dict>
            <key>Type</key><string>PSTitleValueSpecifier</string>
            <key>Title</key><string>Version</string>
            <key>Key</key><string>version</string>
        </dict>
        <dict>
            <key>Type</key><string>PSChildPaneSpecifier</string>
            <key>Title</key><string>Advanced</string>
            <key>File</key><string>Advanced</string>
        </dict>
    </array>
</dict>
</plist>
"#;

pub const ADVANCED_JSON: &str = r#"{
  "PreferenceSpecifiers": [
    {"Type": "PSTextFieldSpecifier", "Title": "Example Title", "Key": "example", "DefaultValue": "hello"},
    {"Type": "PSMultiValueSpecifier", "Title": "Colour", "Key": "other_key",
     "Titles": ["Red", "Green"], "Values": ["r", "g"], "DefaultValue": "r"},
    {"Type": "PSChildPaneSpecifier", "Title": "Nowhere", "File": "Missing"}
  ]
}"#;

/// Write `Settings.bundle` with a plist root and a JSON child pane under `dir`.
pub fn write_bundle(dir: &Path) -> PathBuf {
    let bundle = dir.join("Settings.bundle");
    fs::create_dir_all(&bundle).expect("create bundle dir");
    fs::write(bundle.join("Root.plist"), ROOT_PLIST).expect("write Root.plist");
    fs::write(bundle.join("Advanced.json"), ADVANCED_JSON).expect("write Advanced.json");
    bundle
}

/// Write a config pointing at a bundle under `dir` and a store inside it.
pub fn write_config(dir: &Path) -> PathBuf {
    write_bundle(dir);
    let config = dir.join("config.toml");
    let body = format!(
        "[bundle]\ndir = {:?}\nname = \"Settings\"\n\n[store]\npath = {:?}\n\n[search]\ndebounce_ms = 50\n",
        dir.display().to_string(),
        dir.join("values.json").display().to_string(),
    );
    fs::write(&config, body).expect("write config");
    config
}
