// this_file: crates/glyphmesh/src/options.rs

//! Load-time configuration
//!
//! Defaults suit ordinary fonts. [`LoadOptions::from_env`] lets the limits be
//! raised or lowered without recompiling:
//!
//! ```bash
//! GLYPHMESH_COMPOUND_DEPTH=16 GLYPHMESH_KERNING=off ./my_app
//! ```

use std::str::FromStr;

pub const ENV_COMPOUND_DEPTH: &str = "GLYPHMESH_COMPOUND_DEPTH";
pub const ENV_EAR_CLIP_BUDGET: &str = "GLYPHMESH_EAR_CLIP_BUDGET";
pub const ENV_KERNING: &str = "GLYPHMESH_KERNING";

/// Knobs for [`Font`](crate::Font) loading
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOptions {
    /// Deepest compound-glyph nesting followed before the glyph is rejected
    pub max_compound_depth: usize,
    /// Ear-clipping attempts allowed per initial polygon vertex
    pub ear_clip_budget: usize,
    /// Read pair kerning from `GPOS`
    pub load_kerning: bool,
    /// Tessellate glyphs on the rayon pool (needs the `parallel` feature)
    pub parallel: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            max_compound_depth: 8,
            ear_clip_budget: 100,
            load_kerning: true,
            parallel: false,
        }
    }
}

impl LoadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_compound_depth(mut self, depth: usize) -> Self {
        self.max_compound_depth = depth;
        self
    }

    pub fn with_ear_clip_budget(mut self, budget: usize) -> Self {
        self.ear_clip_budget = budget;
        self
    }

    pub fn with_kerning(mut self, enabled: bool) -> Self {
        self.load_kerning = enabled;
        self
    }

    pub fn with_parallel(mut self, enabled: bool) -> Self {
        self.parallel = enabled;
        self
    }

    /// Defaults overridden by `GLYPHMESH_*` environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each variable
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut options = Self::default();

        if let Some(depth) = parse_var(&lookup, ENV_COMPOUND_DEPTH) {
            log::info!("Compound depth limit set to {depth} via {ENV_COMPOUND_DEPTH}");
            options.max_compound_depth = depth;
        }
        if let Some(budget) = parse_var(&lookup, ENV_EAR_CLIP_BUDGET) {
            log::info!("Ear clipping budget set to {budget} via {ENV_EAR_CLIP_BUDGET}");
            options.ear_clip_budget = budget;
        }
        if let Some(val) = lookup(ENV_KERNING) {
            match parse_switch(&val) {
                Some(enabled) => {
                    log::info!(
                        "Kerning {} via {ENV_KERNING}",
                        if enabled { "enabled" } else { "disabled" }
                    );
                    options.load_kerning = enabled;
                },
                None => log::warn!("Ignoring {ENV_KERNING}={val:?}: expected on/off"),
            }
        }

        options
    }
}

fn parse_var<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let val = lookup(key)?;
    match val.trim().parse() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            log::warn!("Ignoring {key}={val:?}: not a number");
            None
        },
    }
}

fn parse_switch(val: &str) -> Option<bool> {
    match val.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
