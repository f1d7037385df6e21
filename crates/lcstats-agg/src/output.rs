//! Summary rows and auxiliary distribution files
//!
//! Each bin produces one tab-delimited summary row plus a set of plain
//! text distribution files. The header generator consumes the same
//! enabled-family list as the row generator, so header and data always
//! agree in column count and order.
//!
//! File contents are rendered as strings first; the filesystem wrapper is
//! a thin layer on top, which keeps the formats testable without touching
//! disk.

use crate::driver::BinStats;
use crate::family::StatFamily;
use std::fmt::Write as _;
use std::path::Path;

/// Header row matching [`BinStats::summary_row`] column for column
///
/// `enabled` must list the families in the same order the bin was
/// configured with; `param_names` supplies one column label per bin
/// parameter.
pub fn header_row(enabled: &[StatFamily], param_names: &[&str]) -> String {
    let mut columns = vec!["Bin".to_string()];
    columns.extend(param_names.iter().map(|n| n.to_string()));
    columns.push("Noise".to_string());

    for &family in enabled {
        if let Some((name, _)) = family.plot_stat() {
            columns.push(format!("{name} file"));
        } else {
            for (name, _) in family.scalar_stats() {
                columns.push(name.to_string());
                columns.push(format!("{name} defined"));
                columns.push(format!("{name} file"));
            }
        }
    }
    columns.join("\t")
}

impl BinStats {
    fn aux_file_name(&self, stem: &str) -> String {
        format!("{}_{}.dat", self.ident().file_stem(), stem)
    }

    /// Header row for this bin's configuration
    pub fn header_row(&self) -> String {
        let param_names = self.ident().param_names();
        header_row(&self.config().families, &param_names)
    }

    /// One tab-delimited summary row for the bin
    ///
    /// Scalar collections contribute `mean±stddev`, defined-fraction and
    /// auxiliary-file fields; plot collections contribute only the file
    /// reference.
    pub fn summary_row(&self) -> String {
        let mut fields = vec![self.ident().label().to_string()];
        fields.extend(self.ident().param_fields());
        fields.push(self.ident().noise().to_string());

        for &family in &self.config().families {
            if family.is_plot() {
                if let Some(collection) = self.plot_collection(family) {
                    fields.push(self.aux_file_name(collection.file_stem()));
                }
            } else {
                for collection in self.scalar_collections(family) {
                    let summary = collection.summarize();
                    fields.push(summary.to_string());
                    fields.push(format!("{:.2}", summary.defined_fraction));
                    fields.push(self.aux_file_name(collection.file_stem()));
                }
            }
        }
        fields.join("\t")
    }

    /// Render every auxiliary distribution file as `(name, contents)`
    ///
    /// Scalar collections produce one 3-decimal value per line (NaN for
    /// null trials); pair collections produce two space-separated lines
    /// per trial, x-values then y-values.
    pub fn render_distributions(&self) -> Vec<(String, String)> {
        let mut files = Vec::new();

        for (_, collections) in self.scalar_families() {
            for collection in collections {
                let mut contents = String::new();
                for &value in collection.values() {
                    let _ = writeln!(contents, "{value:.3}");
                }
                files.push((self.aux_file_name(collection.file_stem()), contents));
            }
        }

        for (_, collection) in self.plot_families() {
            let mut contents = String::new();
            for sample in collection.samples() {
                let xs: Vec<String> = sample.x.iter().map(|v| format!("{v:.3}")).collect();
                let ys: Vec<String> = sample.y.iter().map(|v| format!("{v:.3}")).collect();
                let _ = writeln!(contents, "{}", xs.join(" "));
                let _ = writeln!(contents, "{}", ys.join(" "));
            }
            files.push((self.aux_file_name(collection.file_stem()), contents));
        }

        files
    }

    /// Write every auxiliary distribution file into a directory
    pub fn write_distributions(&self, dir: &Path) -> std::io::Result<()> {
        for (name, contents) in self.render_distributions() {
            std::fs::write(dir.join(name), contents)?;
        }
        Ok(())
    }
}

/// Write a header plus one summary row per bin to an output stream
///
/// All bins must share one family configuration and parameter layout;
/// the header is taken from the first bin. Does nothing for an empty
/// slice.
pub fn write_rows<W: std::io::Write>(out: &mut W, bins: &[BinStats]) -> std::io::Result<()> {
    let Some(first) = bins.first() else {
        return Ok(());
    };
    writeln!(out, "{}", first.header_row())?;
    for bin in bins {
        writeln!(out, "{}", bin.summary_row())?;
    }
    Ok(())
}
