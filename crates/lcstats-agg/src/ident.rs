//! Bin identity
//!
//! One accumulation bin covers one combination of light-curve model,
//! parameter ranges, and noise level; its identity names the output row
//! and the auxiliary distribution files. Both forms derive
//! deterministically from the same fields, so reruns of the same
//! configuration land in the same files.

use std::fmt;

/// Identity of one accumulation bin
#[derive(Debug, Clone, PartialEq)]
pub struct BinIdentity {
    model: String,
    params: Vec<(String, (f64, f64))>,
    noise: String,
}

impl BinIdentity {
    pub fn new(
        model: impl Into<String>,
        params: Vec<(String, (f64, f64))>,
        noise: impl Into<String>,
    ) -> Self {
        Self {
            model: model.into(),
            params,
            noise: noise.into(),
        }
    }

    /// Human-readable bin label (the first column of the summary row)
    pub fn label(&self) -> &str {
        &self.model
    }

    pub fn noise(&self) -> &str {
        &self.noise
    }

    /// Parameter names in declaration order, for header rows
    pub fn param_names(&self) -> Vec<&str> {
        self.params.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// One formatted `lo-hi` range field per parameter
    pub fn param_fields(&self) -> Vec<String> {
        self.params
            .iter()
            .map(|(_, (lo, hi))| format!("{lo}-{hi}"))
            .collect()
    }

    /// Filesystem-safe stem: lowercase alphanumerics and underscores
    pub fn file_stem(&self) -> String {
        let mut raw = self.model.clone();
        for (name, (lo, hi)) in &self.params {
            raw.push_str(&format!("_{name}_{lo}-{hi}"));
        }
        raw.push_str(&format!("_n{}", self.noise));

        let mut stem = String::with_capacity(raw.len());
        let mut last_underscore = false;
        for ch in raw.chars() {
            let mapped = if ch.is_ascii_alphanumeric() {
                last_underscore = false;
                ch.to_ascii_lowercase()
            } else if last_underscore {
                continue;
            } else {
                last_underscore = true;
                '_'
            };
            stem.push(mapped);
        }
        stem.trim_matches('_').to_string()
    }
}

impl fmt::Display for BinIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.model)?;
        for (name, (lo, hi)) in &self.params {
            write!(f, " {name}=[{lo}, {hi}]")?;
        }
        write!(f, " noise={}", self.noise)
    }
}
