//! Output file naming rules.
//!
//! The wizard lets the user type a bare name or a name with an extension.
//! [ExportFormat] decides which extension is appended when none is given,
//! and [toggle_extension] swaps between the two recognised spreadsheet extensions.

use phf::phf_map;

use std::path::{Path, PathBuf};

/// Recognised extensions mapped to the one they toggle into.
/// Matching is exact: "XLSX" is not recognised and is left alone.
static SWAPPED_EXTENSIONS: phf::Map<&'static str, &'static str> = phf_map! {
    "xlsx" => "csv",
    "csv" => "xlsx",
};

/// What the companion writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    /// A single spreadsheet (.xlsx).
    #[default]
    Excel,
    /// A single CSV file.
    Csv,
    /// A spreadsheet plus a CSV next to it.
    Both,
}

impl ExportFormat {
    /// Cycles excel -> csv -> both -> excel.
    pub fn next(self) -> Self {
        match self {
            ExportFormat::Excel => ExportFormat::Csv,
            ExportFormat::Csv => ExportFormat::Both,
            ExportFormat::Both => ExportFormat::Excel,
        }
    }

    /// Extension appended to names typed without one.
    pub fn default_extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Excel | ExportFormat::Both => "xlsx",
        }
    }

    /// Extra companion flag selecting this format, if any.
    pub fn companion_flag(self) -> Option<&'static str> {
        match self {
            ExportFormat::Excel => None,
            ExportFormat::Csv => Some("--csv-only"),
            ExportFormat::Both => Some("--csv"),
        }
    }
}

/// Splits `name` into stem and extension, looking only at the last path component.
/// A leading dot (".profile") is not an extension.
fn split_extension(name: &str) -> Option<(&str, &str)> {
    let file = name.rsplit(['/', '\\']).next().unwrap_or(name);
    let dot = file.rfind('.')?;
    if dot == 0 {
        return None;
    }
    let split = name.len() - file.len() + dot;
    Some((&name[..split], &name[split + 1..]))
}

/// Returns true if `name` already carries an extension of any kind.
pub fn has_extension(name: &str) -> bool {
    split_extension(name).is_some()
}

/// Appends the default extension of `format` when `name` has none.
pub fn with_default_extension(name: &str, format: ExportFormat) -> String {
    if has_extension(name) {
        name.to_string()
    } else {
        format!("{name}.{}", format.default_extension())
    }
}

/// Tab behaviour on the naming step.
///
/// * no extension: the default one for `format` is appended
/// * `.xlsx` and `.csv` swap
/// * any other extension is left untouched
///
/// Blank names are returned unchanged.
pub fn toggle_extension(name: &str, format: ExportFormat) -> String {
    if name.trim().is_empty() {
        return name.to_string();
    }
    match split_extension(name) {
        None => format!("{name}.{}", format.default_extension()),
        Some((stem, ext)) => match SWAPPED_EXTENSIONS.get(ext) {
            Some(other) => format!("{stem}.{other}"),
            None => name.to_string(),
        },
    }
}

/// Full path the companion is asked to write.
pub fn output_path(dir: &Path, name: &str, format: ExportFormat) -> PathBuf {
    dir.join(with_default_extension(name, format))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_cycles_through_all_variants() {
        let mut format = ExportFormat::default();
        let mut seen = vec![format];
        for _ in 0..3 {
            format = format.next();
            seen.push(format);
        }
        assert_eq!(
            seen,
            vec![
                ExportFormat::Excel,
                ExportFormat::Csv,
                ExportFormat::Both,
                ExportFormat::Excel
            ]
        );
    }

    #[test]
    fn toggle_appends_default_extension() {
        assert_eq!(toggle_extension("index", ExportFormat::Excel), "index.xlsx");
        assert_eq!(toggle_extension("index", ExportFormat::Csv), "index.csv");
        assert_eq!(toggle_extension("index", ExportFormat::Both), "index.xlsx");
    }

    #[test]
    fn toggle_twice_restores_recognised_names() {
        for name in ["report.xlsx", "report.csv", "a.b.csv", "dir/x.xlsx"] {
            for format in [ExportFormat::Excel, ExportFormat::Csv, ExportFormat::Both] {
                let once = toggle_extension(name, format);
                assert_ne!(once, name);
                assert_eq!(toggle_extension(&once, format), name);
            }
        }
    }

    #[test]
    fn toggle_leaves_unknown_extensions_alone() {
        for name in ["notes.txt", "REPORT.XLSX", "archive.tar.gz"] {
            assert_eq!(toggle_extension(name, ExportFormat::Excel), name);
            assert_eq!(toggle_extension(name, ExportFormat::Csv), name);
        }
        assert_eq!(toggle_extension("   ", ExportFormat::Excel), "   ");
    }

    #[test]
    fn dots_in_directories_or_leading_dots_are_not_extensions() {
        assert!(!has_extension("my.dir/index"));
        assert!(!has_extension(".profile"));
        assert!(has_extension("index.xlsx"));
        assert_eq!(
            with_default_extension("my.dir/index", ExportFormat::Csv),
            "my.dir/index.csv"
        );
    }

    #[test]
    fn output_path_joins_directory_and_name() {
        let dir = Path::new("/tmp/docs");
        assert_eq!(
            output_path(dir, "index", ExportFormat::Excel),
            PathBuf::from("/tmp/docs/index.xlsx")
        );
        assert_eq!(
            output_path(dir, "index", ExportFormat::Csv),
            PathBuf::from("/tmp/docs/index.csv")
        );
        assert_eq!(
            output_path(dir, "summary.csv", ExportFormat::Excel),
            PathBuf::from("/tmp/docs/summary.csv")
        );
    }
}
