//! Parser for the beer review CSV.
//!
//! The source file is a flat review table, one review per row:
//!
//! `brewery_name,review_profilename,beer_style,review_taste,beer_name,...`
//!
//! The header names the columns; only the five fields above are consumed and
//! their order is taken from the header rather than assumed. Fields must not
//! themselves contain commas.
//!
//! Free-text beer styles are normalized here into the fixed [`Style`] label
//! set, so nothing downstream ever sees a raw style string.

use crate::error::{CatalogError, Result};
use crate::types::*;
use rayon::prelude::*;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// One parsed review row: the item it describes plus the rating it carries.
#[derive(Debug, Clone)]
pub struct ReviewRow {
    pub item: Item,
    pub rating: RatingRecord,
}

/// Normalize a free-text beer style into the fixed label set.
///
/// Substring heuristics over the lowercased style, first match wins. Order
/// matters: "American Pale Ale" must land on IPA before the generic "ale"
/// catch-all sees it.
pub fn normalize_style(raw: &str) -> Style {
    let style = raw.to_lowercase();
    if style.contains("ipa") || style.contains("pale ale") {
        Style::Ipa
    } else if style.contains("wheat") {
        Style::Wheat
    } else if style.contains("lager") {
        Style::Lager
    } else if style.contains("porter") {
        Style::Porter
    } else if style.contains("dark") || style.contains("stout") {
        Style::Stout
    } else if style.contains("oktoberfest") {
        Style::Oktoberfest
    } else if style.contains("pilsner") || style.contains("pilsener") {
        Style::Pilsner
    } else if style.contains("sour") {
        Style::Sour
    } else if style.contains("malt") {
        Style::Malt
    } else if style.contains("wine") || style.contains("noir") {
        Style::Barleywine
    } else if style.contains("scotch") {
        Style::Scotch
    } else if style.contains("ginger") {
        Style::Ginger
    } else if style.contains("ale") {
        Style::Ale
    } else {
        Style::Other
    }
}

/// Column positions of the fields we consume, resolved from the header row.
struct ColumnLayout {
    brewery: usize,
    user: usize,
    style: usize,
    taste: usize,
    name: usize,
}

impl ColumnLayout {
    fn from_header(header: &str, file: &str) -> Result<Self> {
        let columns: Vec<&str> = header.split(',').map(|c| c.trim()).collect();
        let find = |name: &str| -> Result<usize> {
            columns
                .iter()
                .position(|c| *c == name)
                .ok_or_else(|| CatalogError::ParseError {
                    file: file.to_string(),
                    line: 1,
                    reason: format!("Missing column: {}", name),
                })
        };
        Ok(Self {
            brewery: find("brewery_name")?,
            user: find("review_profilename")?,
            style: find("beer_style")?,
            taste: find("review_taste")?,
            name: find("beer_name")?,
        })
    }
}

/// Parse a single data row into a [`ReviewRow`].
///
/// A missing or empty field is fatal: malformed catalog data is rejected at
/// load time, not patched up per-request.
fn parse_row(line: &str, line_no: usize, layout: &ColumnLayout, file: &str) -> Result<ReviewRow> {
    let fields: Vec<&str> = line.split(',').map(|f| f.trim()).collect();

    let field = |idx: usize, name: &str| -> Result<&str> {
        match fields.get(idx) {
            Some(value) if !value.is_empty() => Ok(value),
            _ => Err(CatalogError::ParseError {
                file: file.to_string(),
                line: line_no,
                reason: format!("Missing {}", name),
            }),
        }
    };

    let brewery = field(layout.brewery, "brewery_name")?;
    let user_id = field(layout.user, "review_profilename")?;
    let style = field(layout.style, "beer_style")?;
    let taste = field(layout.taste, "review_taste")?;
    let name = field(layout.name, "beer_name")?;

    let rating: f32 = taste.parse().map_err(|e| CatalogError::ParseError {
        file: file.to_string(),
        line: line_no,
        reason: format!("Invalid review_taste: {}", e),
    })?;

    Ok(ReviewRow {
        item: Item {
            id: name.to_string(),
            style: normalize_style(style),
            brewery: brewery.to_string(),
        },
        rating: RatingRecord {
            user_id: user_id.to_string(),
            item_id: name.to_string(),
            rating,
        },
    })
}

/// Parse the whole review CSV into rows.
///
/// Rows are independent, so they are parsed in parallel with Rayon; the
/// first parse error aborts the load.
pub fn parse_reviews(path: &Path) -> Result<Vec<ReviewRow>> {
    let mut file = File::open(path).map_err(|_| CatalogError::FileNotFound {
        path: path.display().to_string(),
    })?;
    let mut content = String::new();
    file.read_to_string(&mut content)?;

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let mut lines = content.lines();
    let header = lines.next().ok_or_else(|| CatalogError::ParseError {
        file: file_name.clone(),
        line: 1,
        reason: "Empty file".to_string(),
    })?;
    let layout = ColumnLayout::from_header(header, &file_name)?;

    // Data rows start at line 2
    let data_lines: Vec<(usize, &str)> = lines
        .enumerate()
        .map(|(idx, line)| (idx + 2, line.trim()))
        .filter(|(_, line)| !line.is_empty())
        .collect();

    data_lines
        .par_iter()
        .map(|(line_no, line)| parse_row(line, *line_no, &layout, &file_name))
        .collect()
}
