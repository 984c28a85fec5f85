use std::path::{Path, PathBuf};

use chrono::{Datelike, NaiveDate};
use serde::Deserialize;
use tracing::debug;

use crate::consts::{BURN_CLASS_SUFFIX, BURN_PROBABILITY_SUFFIX, REGION_TABLE_SUFFIX};
use crate::error::{BurnScarError, Result};

/// One scene of the temporal stack.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct StackEntry {
    #[serde(alias = "file_")]
    pub file: String,
    pub year: i32,
    /// Day of year, 1-366.
    pub julian: u32,
    #[serde(default)]
    pub month: Option<u32>,
    #[serde(default)]
    pub day: Option<u32>,
    #[serde(default)]
    pub season: Option<String>,
    #[serde(default)]
    pub path: Option<u32>,
    #[serde(default)]
    pub row: Option<u32>,
    #[serde(default)]
    pub sensor: Option<String>,
    #[serde(default)]
    pub west: Option<f64>,
    #[serde(default)]
    pub east: Option<f64>,
    #[serde(default)]
    pub north: Option<f64>,
    #[serde(default)]
    pub south: Option<f64>,
    #[serde(default)]
    pub pixel_size: Option<f64>,
}

impl StackEntry {
    /// Minimal entry with only the fields the burn products depend on.
    pub fn new(file: impl Into<String>, year: i32, julian: u32) -> Self {
        Self {
            file: file.into(),
            year,
            julian,
            month: None,
            day: None,
            season: None,
            path: None,
            row: None,
            sensor: None,
            west: None,
            east: None,
            north: None,
            south: None,
            pixel_size: None,
        }
    }

    /// Acquisition month, derived from year and julian day when the stack
    /// file does not carry one.
    pub fn acquisition_month(&self) -> Option<u32> {
        self.month.or_else(|| {
            NaiveDate::from_yo_opt(self.year, self.julian).map(|date| date.month())
        })
    }

    /// Scene stem used to derive every per-scene file name: the basename
    /// without extension and without a leading `lndsr.` product prefix.
    pub fn stem(&self) -> String {
        let base = Path::new(&self.file)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.file.clone());
        let base = base.strip_prefix("lndsr.").unwrap_or(&base);
        match base.rfind('.') {
            Some(dot) if dot > 0 => base[..dot].to_string(),
            _ => base.to_string(),
        }
    }

    pub fn burn_probability_path(&self, bp_dir: &Path) -> PathBuf {
        bp_dir.join(format!("{}{}", self.stem(), BURN_PROBABILITY_SUFFIX))
    }

    pub fn burn_class_path(&self, bc_dir: &Path) -> PathBuf {
        bc_dir.join(format!("{}{}", self.stem(), BURN_CLASS_SUFFIX))
    }

    pub fn region_table_path(&self, bc_dir: &Path) -> PathBuf {
        bc_dir.join(format!("{}{}", self.stem(), REGION_TABLE_SUFFIX))
    }

    /// Path of a per-scene layer such as `<stem>_mask.img` or `<stem>_nbr.img`.
    pub fn layer_path(&self, dir: &Path, layer: &str) -> PathBuf {
        dir.join(format!("{}_{}.img", self.stem(), layer))
    }
}

/// The full temporal stack, in file order.
#[derive(Clone, Debug, Default)]
pub struct TemporalStack {
    pub entries: Vec<StackEntry>,
}

impl TemporalStack {
    pub fn new(entries: Vec<StackEntry>) -> Self {
        Self { entries }
    }

    /// Load a stack CSV. Header names are matched case-insensitively and
    /// unknown columns are ignored.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(BurnScarError::Config(format!(
                "stack file does not exist: {}",
                path.display()
            )));
        }
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(path)?;
        let stack = Self::from_csv_reader(reader)?;
        debug!(entries = stack.entries.len(), path = %path.display(), "Loaded stack file");
        Ok(stack)
    }

    pub fn from_csv_str(text: &str) -> Result<Self> {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(text.as_bytes());
        Self::from_csv_reader(reader)
    }

    fn from_csv_reader<R: std::io::Read>(mut reader: csv::Reader<R>) -> Result<Self> {
        let headers = reader.headers()?.clone();
        let lowered: csv::StringRecord = headers.iter().map(|h| h.to_ascii_lowercase()).collect();
        reader.set_headers(lowered);

        let mut entries = Vec::new();
        for record in reader.deserialize() {
            let entry: StackEntry = record?;
            if entry.julian == 0 || entry.julian > 366 {
                return Err(BurnScarError::Config(format!(
                    "julian day {} out of range for {}",
                    entry.julian, entry.file
                )));
            }
            entries.push(entry);
        }
        Ok(Self { entries })
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn min_year(&self) -> Option<i32> {
        self.entries.iter().map(|e| e.year).min()
    }

    pub fn max_year(&self) -> Option<i32> {
        self.entries.iter().map(|e| e.year).max()
    }

    /// Entries acquired in `start..=end`, in stack order.
    pub fn in_years(&self, start: i32, end: i32) -> Vec<&StackEntry> {
        self.entries
            .iter()
            .filter(|e| e.year >= start && e.year <= end)
            .collect()
    }

    /// Entries of one year sorted by julian day (stable, so same-day scenes
    /// keep stack order).
    pub fn for_year(&self, year: i32) -> Vec<&StackEntry> {
        let mut entries: Vec<&StackEntry> =
            self.entries.iter().filter(|e| e.year == year).collect();
        entries.sort_by_key(|e| e.julian);
        entries
    }
}
