//! `value_parser` functions for CLI arguments.

use std::net::Ipv4Addr;
use std::path::PathBuf;

const MAX_ROLLBACK_STEPS: u32 = 100;
const MAX_HOSTNAME_LEN: usize = 253;

pub fn validate_port(port_str: &str) -> Result<u16, String> {
    match port_str.parse::<u16>() {
        Ok(0) => Err("Port must be between 1 and 65535. Port 0 is not allowed.".to_string()),
        Ok(port) => Ok(port),
        Err(_) => Err(format!(
            "Port must be a valid number between 1 and 65535, got: '{}'",
            port_str
        )),
    }
}

/// The path must name an existing, readable file.
pub fn validate_config_file_path(path_str: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(path_str);

    if !path.exists() {
        return Err(format!("Configuration file does not exist: '{}'", path_str));
    }
    if !path.is_file() {
        return Err(format!("Configuration path is not a file: '{}'", path_str));
    }

    std::fs::File::open(&path)
        .map(|_| path)
        .map_err(|e| format!("Cannot read configuration file '{}': {}", path_str, e))
}

pub fn validate_rollback_steps(steps_str: &str) -> Result<u32, String> {
    let steps: u32 = steps_str.parse().map_err(|_| {
        format!(
            "Rollback steps must be a valid positive number, got: '{}'",
            steps_str
        )
    })?;

    match steps {
        0 => Err("Rollback steps must be greater than 0".to_string()),
        s if s > MAX_ROLLBACK_STEPS => Err(format!(
            "Rollback steps cannot exceed {} for safety reasons",
            MAX_ROLLBACK_STEPS
        )),
        s => Ok(s),
    }
}

/// Accepts `localhost`, dotted IPv4 addresses and hostnames.
pub fn validate_host_address(host_str: &str) -> Result<String, String> {
    let host = host_str.trim();

    if host.is_empty() {
        return Err("Host address cannot be empty".to_string());
    }
    if host.contains(' ') {
        return Err("Host address cannot contain spaces".to_string());
    }
    if host.len() > MAX_HOSTNAME_LEN {
        return Err(format!(
            "Host address is too long (maximum {} characters)",
            MAX_HOSTNAME_LEN
        ));
    }

    // All digits and dots means it has to be a real IPv4 address
    if host.chars().all(|c| c.is_ascii_digit() || c == '.') && host.parse::<Ipv4Addr>().is_err() {
        return Err(format!("Invalid IPv4 address format: '{}'", host_str));
    }

    Ok(host.to_string())
}
