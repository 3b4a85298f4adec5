//! Startup configuration parsed from environment variables.

use crate::engine::{Pt, DEFAULT_VERTICES, MAX_SPEED, MIN_SPEED};
use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub vertices: Vec<Pt>,
    pub seed: Option<u64>,
    pub speed: u32,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            vertices: DEFAULT_VERTICES.to_vec(),
            seed: None,
            speed: MIN_SPEED,
        }
    }
}

impl Config {
    /// Build config from the process environment.
    ///
    /// Optional:
    /// - `CHAOS_VERTICES`: `x,y;x,y;...`, default equilateral triangle
    /// - `CHAOS_SEED`: `u64`, random when absent
    /// - `CHAOS_SPEED`: steps per tick in 1..=64, default 1
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Config::default();

        if let Some(raw) = lookup("CHAOS_VERTICES") {
            config.vertices = parse_vertices(&raw)?;
        }
        if let Some(raw) = lookup("CHAOS_SEED") {
            let seed = raw
                .trim()
                .parse::<u64>()
                .map_err(|e| invalid("CHAOS_SEED", &raw, e.to_string()))?;
            config.seed = Some(seed);
        }
        if let Some(raw) = lookup("CHAOS_SPEED") {
            config.speed = parse_speed(&raw)?;
        }

        Ok(config)
    }
}

fn parse_vertices(raw: &str) -> Result<Vec<Pt>, ConfigError> {
    let mut out = Vec::new();
    for pair in raw.split(';').map(str::trim).filter(|s| !s.is_empty()) {
        let Some((x, y)) = pair.split_once(',') else {
            return Err(invalid("CHAOS_VERTICES", raw, format!("expected `x,y`, got `{pair}`")));
        };
        let coord = |s: &str| {
            s.trim().parse::<f64>().ok().filter(|v| v.is_finite()).ok_or_else(|| {
                invalid("CHAOS_VERTICES", raw, format!("bad coordinate `{}`", s.trim()))
            })
        };
        out.push(Pt::new(coord(x)?, coord(y)?));
    }
    if out.is_empty() {
        return Err(invalid("CHAOS_VERTICES", raw, "no vertices given".into()));
    }
    Ok(out)
}

fn parse_speed(raw: &str) -> Result<u32, ConfigError> {
    let speed = raw
        .trim()
        .parse::<u32>()
        .map_err(|e| invalid("CHAOS_SPEED", raw, e.to_string()))?;
    if !(MIN_SPEED..=MAX_SPEED).contains(&speed) {
        return Err(invalid(
            "CHAOS_SPEED",
            raw,
            format!("must be between {MIN_SPEED} and {MAX_SPEED}"),
        ));
    }
    Ok(speed)
}

fn invalid(var: &'static str, value: &str, reason: String) -> ConfigError {
    ConfigError::Invalid {
        var,
        value: value.to_string(),
        reason,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
