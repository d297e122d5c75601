//! Splits table rows into consecutive groups and renders one code per group.

use log::{info, warn};

use crate::canvas::{encode_and_render, encode_and_render_with, RenderOptions};
use crate::common::error::{QRError, QRResult};
use crate::common::padding::RngPadding;
use crate::render::RasterImage;

pub const DEFAULT_ROWS_PER_CODE: usize = 10;
pub const DEFAULT_MAX_ROWS: usize = 1000;

// Row limits at which a batch is considered large
const LARGE_BATCH_ROWS: usize = 5000;
const HUGE_BATCH_ROWS: usize = 10000;

// Batch config
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct BatchConfig {
    pub rows_per_code: usize,
    pub max_rows: usize,
    pub options: RenderOptions,
    /// Group `i` is padded from `seed + i` when set, otherwise from the
    /// thread-local generator.
    pub seed: Option<u64>,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            rows_per_code: DEFAULT_ROWS_PER_CODE,
            max_rows: DEFAULT_MAX_ROWS,
            options: RenderOptions::default(),
            seed: None,
        }
    }
}

impl BatchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows_per_code(&mut self, rows_per_code: usize) -> &mut Self {
        self.rows_per_code = rows_per_code;
        self
    }

    pub fn max_rows(&mut self, max_rows: usize) -> &mut Self {
        self.max_rows = max_rows;
        self
    }

    pub fn options(&mut self, options: RenderOptions) -> &mut Self {
        self.options = options;
        self
    }

    pub fn seed(&mut self, seed: u64) -> &mut Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> QRResult<()> {
        validate(self.rows_per_code, self.max_rows)
    }
}

fn validate(rows_per_code: usize, max_rows: usize) -> QRResult<()> {
    if rows_per_code == 0 {
        return Err(QRError::InvalidGroupSize);
    }
    if rows_per_code > max_rows {
        return Err(QRError::GroupExceedsLimit);
    }
    Ok(())
}

/// Number of codes a batch will produce.
pub fn estimate_code_count(total_rows: usize, rows_per_code: usize, max_rows: usize) -> usize {
    if rows_per_code == 0 {
        return 0;
    }
    total_rows.min(max_rows).div_ceil(rows_per_code)
}


// Row groups
//------------------------------------------------------------------------------

/// A run of consecutive rows. Row numbers are 1-based and inclusive.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct RowGroup<'a> {
    pub index: usize,
    pub start_row: usize,
    pub end_row: usize,
    pub rows: &'a [Vec<String>],
}

impl RowGroup<'_> {
    /// Cells joined by `" | "`, rows joined by newlines.
    pub fn text(&self) -> String {
        self.rows.iter().map(|row| row.join(" | ")).collect::<Vec<_>>().join("\n")
    }

    pub fn file_name(&self) -> String {
        format!("qr-code-{}-rows-{}-{}.png", self.index + 1, self.start_row, self.end_row)
    }
}

/// Splits the first `max_rows` rows into groups of `rows_per_code`. The last
/// group may be shorter.
pub fn partition(
    rows: &[Vec<String>],
    rows_per_code: usize,
    max_rows: usize,
) -> QRResult<Vec<RowGroup<'_>>> {
    validate(rows_per_code, max_rows)?;

    let limit = rows.len().min(max_rows);
    let groups = rows[..limit]
        .chunks(rows_per_code)
        .enumerate()
        .map(|(index, rows)| {
            let start_row = index * rows_per_code + 1;
            RowGroup { index, start_row, end_row: start_row + rows.len() - 1, rows }
        })
        .collect();
    Ok(groups)
}

#[cfg(test)]
mod row_group_tests {
    use super::partition;
    use crate::common::error::QRError;

    fn table(n: usize) -> Vec<Vec<String>> {
        (1..=n).map(|i| vec![format!("id{i}"), format!("name {i}")]).collect()
    }

    #[test]
    fn test_partition() {
        let rows = table(25);
        let groups = partition(&rows, 10, 1000).unwrap();
        assert_eq!(groups.len(), 3);
        assert_eq!((groups[0].start_row, groups[0].end_row), (1, 10));
        assert_eq!((groups[1].start_row, groups[1].end_row), (11, 20));
        assert_eq!((groups[2].start_row, groups[2].end_row), (21, 25));
        assert_eq!(groups[2].rows.len(), 5);
        assert_eq!(groups[2].index, 2);
    }

    #[test]
    fn test_partition_respects_row_limit() {
        let rows = table(10);
        let groups = partition(&rows, 3, 5).unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!((groups[1].start_row, groups[1].end_row), (4, 5));
        assert_eq!(groups[1].rows, &rows[3..5]);
    }

    #[test]
    fn test_partition_empty() {
        assert!(partition(&[], 10, 100).unwrap().is_empty());
    }

    #[test]
    fn test_partition_invalid() {
        let rows = table(3);
        assert_eq!(partition(&rows, 0, 10), Err(QRError::InvalidGroupSize));
        assert_eq!(partition(&rows, 11, 10), Err(QRError::GroupExceedsLimit));
    }

    #[test]
    fn test_group_text() {
        let rows = table(3);
        let groups = partition(&rows, 2, 10).unwrap();
        assert_eq!(groups[0].text(), "id1 | name 1\nid2 | name 2");
        assert_eq!(groups[1].text(), "id3 | name 3");
    }

    #[test]
    fn test_group_text_single_cell() {
        let rows = vec![vec!["only".to_string()], vec![]];
        let groups = partition(&rows, 5, 10).unwrap();
        assert_eq!(groups[0].text(), "only\n");
    }

    #[test]
    fn test_file_name() {
        let rows = table(12);
        let groups = partition(&rows, 5, 100).unwrap();
        let names = groups.iter().map(|g| g.file_name()).collect::<Vec<_>>();
        assert_eq!(
            names,
            vec![
                "qr-code-1-rows-1-5.png",
                "qr-code-2-rows-6-10.png",
                "qr-code-3-rows-11-12.png"
            ]
        );
    }
}

// Render batch
//------------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct BatchItem {
    pub file_name: String,
    pub start_row: usize,
    pub end_row: usize,
    pub rows: usize,
    pub image: RasterImage,
}

impl BatchItem {
    fn from_group(group: &RowGroup<'_>, config: &BatchConfig) -> Self {
        let text = group.text();
        let image = match config.seed {
            Some(seed) => {
                let mut padding = RngPadding::seeded(seed.wrapping_add(group.index as u64));
                encode_and_render_with(&text, &config.options, &mut padding)
            }
            None => encode_and_render(&text, &config.options),
        };
        Self {
            file_name: group.file_name(),
            start_row: group.start_row,
            end_row: group.end_row,
            rows: group.rows.len(),
            image,
        }
    }
}

/// Renders one code per row group, in group order.
pub fn render_batch(rows: &[Vec<String>], config: &BatchConfig) -> QRResult<Vec<BatchItem>> {
    let groups = partition(rows, config.rows_per_code, config.max_rows)?;

    if config.max_rows >= HUGE_BATCH_ROWS {
        warn!("Very large row limit ({} rows), rendering may take a while", config.max_rows);
    } else if config.max_rows >= LARGE_BATCH_ROWS {
        warn!("Large row limit ({} rows)", config.max_rows);
    }
    info!(
        "Rendering {} codes from {} rows ({} per code)",
        groups.len(),
        rows.len().min(config.max_rows),
        config.rows_per_code
    );

    Ok(render_groups(&groups, config))
}

#[cfg(not(feature = "parallel"))]
fn render_groups(groups: &[RowGroup<'_>], config: &BatchConfig) -> Vec<BatchItem> {
    groups.iter().map(|g| BatchItem::from_group(g, config)).collect()
}

#[cfg(feature = "parallel")]
fn render_groups(groups: &[RowGroup<'_>], config: &BatchConfig) -> Vec<BatchItem> {
    use rayon::prelude::*;

    groups.par_iter().map(|g| BatchItem::from_group(g, config)).collect()
}
