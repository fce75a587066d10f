//! TrueType font discovery shared by the PDF writer and the chart renderer.
//!
//! Reports contain Cyrillic text, which the PDF built-in fonts cannot encode,
//! so a TTF family on disk is the one external requirement of report output.

use crate::error::{Result, TechTrendsError};
use genpdf::fonts::{FontData, FontFamily};
use once_cell::sync::OnceCell;
use printpdf::BuiltinFont;
use std::path::{Path, PathBuf};

/// Name under which the regular face is registered with plotters
pub const CHART_FONT: &str = "tech-trends-sans";

const SYSTEM_FONT_DIRS: &[&str] = &[
    "/usr/share/fonts/truetype/liberation",
    "/usr/share/fonts/truetype/liberation2",
    "/usr/share/fonts/liberation-sans",
    "/usr/share/fonts/liberation",
    "/usr/share/fonts/TTF",
    "/usr/share/fonts/truetype/dejavu",
    "/usr/share/fonts/dejavu",
    "/Library/Fonts",
    "/System/Library/Fonts/Supplemental",
];

static CHART_FONT_REGISTERED: OnceCell<()> = OnceCell::new();

/// Loaded font family, ready for document rendering
#[derive(Clone)]
pub struct ReportFonts {
    pub(crate) family: FontFamily<FontData>,
    pub(crate) source: PathBuf,
}

impl std::fmt::Debug for ReportFonts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReportFonts")
            .field("source", &self.source)
            .finish()
    }
}

impl ReportFonts {
    pub fn source(&self) -> &Path {
        &self.source
    }
}

/// Candidate directories in lookup order: configured dir first, then system locations
pub fn candidate_dirs(font_dir: Option<&Path>) -> Vec<PathBuf> {
    let mut dirs: Vec<PathBuf> = font_dir.map(Path::to_path_buf).into_iter().collect();
    if let Some(home) = dirs::font_dir() {
        dirs.push(home);
    }
    dirs.extend(SYSTEM_FONT_DIRS.iter().map(PathBuf::from));
    dirs
}

/// File names tried for the regular face: `{family}-Regular.ttf`, then `{family}.ttf`
fn regular_path(dir: &Path, family: &str) -> Option<PathBuf> {
    [
        dir.join(format!("{}-Regular.ttf", family)),
        dir.join(format!("{}.ttf", family)),
    ]
    .into_iter()
    .find(|p| p.is_file())
}

fn bold_path(dir: &Path, family: &str) -> Option<PathBuf> {
    Some(dir.join(format!("{}-Bold.ttf", family))).filter(|p| p.is_file())
}

/// Load `{family}-Regular.ttf` (or `{family}.ttf`) plus `{family}-Bold.ttf` from `dir`.
///
/// Only the regular and bold faces are embedded in reports. A missing bold face
/// falls back to the regular one. Italic slots are never used by the report
/// layout, so they map to built-in Helvetica obliques (measured with the
/// regular face) and add nothing to the file.
pub fn load_family(dir: &Path, family: &str) -> Result<ReportFonts> {
    let regular_path = regular_path(dir, family).ok_or_else(|| TechTrendsError::Pdf {
        message: format!(
            "no {}-Regular.ttf or {}.ttf in {}",
            family,
            family,
            dir.display()
        ),
    })?;
    let regular = std::fs::read(&regular_path)?;

    let bold = match bold_path(dir, family) {
        Some(path) => FontData::new(std::fs::read(path)?, None)?,
        None => FontData::new(regular.clone(), None)?,
    };

    let family_fonts = FontFamily {
        regular: FontData::new(regular.clone(), None)?,
        bold,
        italic: FontData::new(regular.clone(), Some(BuiltinFont::HelveticaOblique))?,
        bold_italic: FontData::new(regular.clone(), Some(BuiltinFont::HelveticaBoldOblique))?,
    };

    register_chart_font(regular)?;

    Ok(ReportFonts {
        family: family_fonts,
        source: regular_path,
    })
}

/// Probe the candidate directories once; `None` means reports are unavailable
pub fn locate(font_dir: Option<&Path>, family: &str) -> Option<ReportFonts> {
    for dir in candidate_dirs(font_dir) {
        if regular_path(&dir, family).is_none() {
            continue;
        }
        match load_family(&dir, family) {
            Ok(fonts) => {
                tracing::info!(font = %fonts.source.display(), "report fonts loaded");
                return Some(fonts);
            }
            Err(e) => tracing::warn!(dir = %dir.display(), error = %e, "skipping font directory"),
        }
    }
    None
}

/// plotters keeps registered fonts for the life of the process, so the bytes are leaked once
fn register_chart_font(regular: Vec<u8>) -> Result<()> {
    CHART_FONT_REGISTERED
        .get_or_try_init(|| {
            let bytes: &'static [u8] = Box::leak(regular.into_boxed_slice());
            plotters::style::register_font(CHART_FONT, plotters::style::FontStyle::Normal, bytes)
                .map_err(|_| TechTrendsError::Chart {
                    message: "font rejected by chart renderer".into(),
                })
        })
        .map(|_| ())
}
