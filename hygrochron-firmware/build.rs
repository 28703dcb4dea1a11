//! Build script for hygrochron-firmware
//!
//! - Sets up linker search paths and sections for the RP2040
//! - Generates the node configuration from environment variables

use std::env;
use std::fmt::Write as _;
use std::fs::File;
use std::io::Write as _;
use std::path::PathBuf;

fn main() {
    setup_linker();
    generate_node_config();
}

/// Set up memory.x and the linker scripts
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Generate node_config.rs from HYGROCHRON_* environment variables
///
/// Every variable has a default, so a plain `cargo build` produces a
/// flashable image; set the variables to configure a real deployment.
fn generate_node_config() {
    let mut out = String::from("// Generated by build.rs - do not edit\n\n");

    str_const(&mut out, "WIFI_SSID", "HYGROCHRON_WIFI_SSID", "hygrochron");
    str_const(
        &mut out,
        "WIFI_PASSWORD",
        "HYGROCHRON_WIFI_PASSWORD",
        "hygrochron",
    );
    str_const(
        &mut out,
        "WEBHOOK_URL",
        "HYGROCHRON_WEBHOOK_URL",
        "http://api.thingspeak.com/update?api_key=XXXXXXXX\
         &field1={temperature}&field2={humidity}",
    );
    bool_const(&mut out, "DEEP_SLEEP", "HYGROCHRON_DEEP_SLEEP", false);
    u32_const(&mut out, "LOG_INTERVAL_S", "HYGROCHRON_LOG_INTERVAL_S", 10);
    bool_const(&mut out, "FAHRENHEIT", "HYGROCHRON_FAHRENHEIT", false);
    bool_const(
        &mut out,
        "DISPLAY_ROTATE",
        "HYGROCHRON_DISPLAY_ROTATE",
        true,
    );

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let mut f = File::create(out_dir.join("node_config.rs")).unwrap();
    f.write_all(out.as_bytes()).unwrap();
}

fn lookup(var: &str) -> Option<String> {
    println!("cargo:rerun-if-env-changed={var}");
    env::var(var).ok().filter(|v| !v.is_empty())
}

fn str_const(out: &mut String, name: &str, var: &str, default: &str) {
    let value = lookup(var).unwrap_or_else(|| default.to_string());
    writeln!(out, "pub const {name}: &str = {value:?};").unwrap();
}

fn bool_const(out: &mut String, name: &str, var: &str, default: bool) {
    let value = match lookup(var).as_deref() {
        None => default,
        Some("1") | Some("true") | Some("yes") => true,
        Some("0") | Some("false") | Some("no") => false,
        Some(other) => panic!("{var} must be a boolean, got {other:?}"),
    };
    writeln!(out, "pub const {name}: bool = {value};").unwrap();
}

fn u32_const(out: &mut String, name: &str, var: &str, default: u32) {
    let value = match lookup(var) {
        None => default,
        Some(raw) => raw
            .parse()
            .unwrap_or_else(|_| panic!("{var} must be an integer number of seconds")),
    };
    writeln!(out, "pub const {name}: u32 = {value};").unwrap();
}
