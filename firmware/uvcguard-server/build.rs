//! Build script for uvcguard-server
//!
//! - Sets up linker search paths for memory.x
//! - Validates server.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Config file embedded by the firmware
const CONFIG_FILE: &str = "server.toml";

/// Sections that must be present
const REQUIRED_SECTIONS: &[&str] = &["schedule"];

/// Every accepted key with its inclusive range
const KEYS: &[(&str, &str, i64, i64)] = &[
    ("schedule", "start_hour", 0, 23),
    ("schedule", "end_hour", 0, 23),
    ("schedule", "duration_minutes", 1, 1440),
    ("presence", "reference_mv", 1, 65535),
    ("presence", "adc_bits", 8, 16),
    ("presence", "threshold_mv", 0, 65535),
    ("link", "baudrate", 1200, 4_000_000),
    ("control", "tick_ms", 1, 60_000),
];

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate server.toml at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed={}", CONFIG_FILE);

    let config_path = Path::new(CONFIG_FILE);
    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => fail("Failed to read server.toml", &[e.to_string()]),
    };

    let config: toml::Table = match toml::from_str(&content) {
        Ok(table) => table,
        Err(e) => fail(
            "Invalid TOML syntax in server.toml",
            &e.to_string().lines().map(str::to_string).collect::<Vec<_>>(),
        ),
    };

    let mut errors = Vec::new();

    for section in REQUIRED_SECTIONS {
        if !config.contains_key(*section) {
            errors.push(format!("Missing [{}] section", section));
        }
    }

    for (section, value) in &config {
        let table = match value.as_table() {
            Some(t) => t,
            None => {
                errors.push(format!("'{}' must be a [section]", section));
                continue;
            }
        };
        if !KEYS.iter().any(|(s, ..)| s == section) {
            errors.push(format!("Unknown section [{}]", section));
            continue;
        }

        for (key, value) in table {
            let Some(&(_, _, min, max)) = KEYS.iter().find(|(s, k, ..)| s == section && k == key) else {
                errors.push(format!("[{}] unknown key '{}'", section, key));
                continue;
            };
            match value.as_integer() {
                Some(v) if (min..=max).contains(&v) => {}
                Some(_) => errors.push(format!("[{}] {} must be {}-{}", section, key, min, max)),
                None => errors.push(format!("[{}] {} must be an integer", section, key)),
            }
        }
    }

    if let Some(presence) = config.get("presence").and_then(|p| p.as_table()) {
        let reference = presence.get("reference_mv").and_then(|v| v.as_integer()).unwrap_or(3300);
        let threshold = presence.get("threshold_mv").and_then(|v| v.as_integer()).unwrap_or(2000);
        if threshold > reference {
            errors.push("[presence] threshold_mv exceeds reference_mv".to_string());
        }
    }

    if !errors.is_empty() {
        fail("Invalid configuration in server.toml", &errors);
    }

    println!("cargo:warning=server.toml validated successfully");
}

/// Abort the build with a boxed error message
fn fail(title: &str, lines: &[String]) -> ! {
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<57}║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title,
        lines
            .iter()
            .map(|e| {
                let e = if e.len() > 62 { format!("{}...", &e[..59]) } else { e.clone() };
                format!("║  • {:<62} ║", e)
            })
            .collect::<Vec<_>>()
            .join("\n")
    );
}
