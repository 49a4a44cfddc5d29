//! Season definitions as explicit day-of-year index sets
//!
//! A season is nothing more than a name and the list of time indices that
//! belong to it. Sets are ordinary configuration values, so the quarterly
//! grouping and the calendar-month grouping can live side by side.

use crate::errors::{Result, SeaVisError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Number of daily slices in one year file
pub const DAYS_PER_YEAR: usize = 365;

/// A named group of day-of-year indices
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Season {
    pub name: String,
    pub days: Vec<usize>,
}

impl Season {
    pub fn new(name: impl Into<String>, days: Vec<usize>) -> Self {
        Self {
            name: name.into(),
            days,
        }
    }

    /// Build a season from half-open day ranges, in the given order
    pub fn from_ranges(name: impl Into<String>, ranges: &[std::ops::Range<usize>]) -> Self {
        let days = ranges.iter().flat_map(|r| r.clone()).collect();
        Self::new(name, days)
    }

    pub fn first_day(&self) -> Option<usize> {
        self.days.first().copied()
    }

    pub fn last_day(&self) -> Option<usize> {
        self.days.last().copied()
    }
}

/// Built-in groupings selectable from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SeasonPreset {
    /// Four seasons of three month-sized blocks each
    Quarterly,
    /// Twelve calendar months
    Monthly,
}

impl SeasonPreset {
    pub fn build(self) -> SeasonSet {
        match self {
            Self::Quarterly => SeasonSet::quarterly(),
            Self::Monthly => SeasonSet::monthly(),
        }
    }
}

/// Ordered collection of seasons processed for every year
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeasonSet {
    seasons: Vec<Season>,
}

impl SeasonSet {
    pub fn new(seasons: Vec<Season>) -> Self {
        Self { seasons }
    }

    /// Winter, Summer, Spring and Autumn as used for the Bay of Bengal plots
    pub fn quarterly() -> Self {
        Self::new(vec![
            Season::from_ranges("Winter", &[334..365, 0..31, 31..60]),
            Season::from_ranges("Summer", &[60..91, 91..121, 121..152]),
            Season::from_ranges("Spring", &[152..182, 182..213, 213..243]),
            Season::from_ranges("Autumn", &[243..274, 274..304, 304..334]),
        ])
    }

    /// Calendar months on the 365-slice daily axis
    pub fn monthly() -> Self {
        const BOUNDS: [(&str, usize, usize); 12] = [
            ("Jan", 0, 31),
            ("Feb", 31, 60),
            ("Mar", 60, 91),
            ("Apr", 91, 121),
            ("May", 121, 152),
            ("Jun", 152, 182),
            ("Jul", 182, 213),
            ("Aug", 213, 243),
            ("Sep", 243, 274),
            ("Oct", 274, 304),
            ("Nov", 304, 335),
            ("Dec", 335, 365),
        ];

        Self::new(
            BOUNDS
                .iter()
                .map(|&(name, start, end)| Season::from_ranges(name, &[start..end]))
                .collect(),
        )
    }

    pub fn iter(&self) -> impl Iterator<Item = &Season> {
        self.seasons.iter()
    }

    pub fn len(&self) -> usize {
        self.seasons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seasons.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Season> {
        self.seasons.iter().find(|s| s.name == name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.seasons.iter().map(|s| s.name.as_str()).collect()
    }

    /// Check that every season can be applied to a file with `time_len` slices.
    ///
    /// # Errors
    ///
    /// Returns `InvalidSeason` for an empty set, an empty or duplicated
    /// season name, a season without days, a repeated day inside one season,
    /// or a day index at or beyond `time_len`.
    pub fn validate(&self, time_len: usize) -> Result<()> {
        if self.seasons.is_empty() {
            return Err(SeaVisError::InvalidSeason(
                "season set contains no seasons".to_string(),
            ));
        }

        let mut names = HashSet::new();
        for season in &self.seasons {
            if season.name.trim().is_empty() {
                return Err(SeaVisError::InvalidSeason(
                    "season name must not be empty".to_string(),
                ));
            }
            if !names.insert(season.name.as_str()) {
                return Err(SeaVisError::InvalidSeason(format!(
                    "season '{}' is defined twice",
                    season.name
                )));
            }
            if season.days.is_empty() {
                return Err(SeaVisError::InvalidSeason(format!(
                    "season '{}' has no days",
                    season.name
                )));
            }

            let mut seen = HashSet::with_capacity(season.days.len());
            for &day in &season.days {
                if day >= time_len {
                    return Err(SeaVisError::InvalidSeason(format!(
                        "season '{}' uses day {day}, but the dataset has {time_len} time steps",
                        season.name
                    )));
                }
                if !seen.insert(day) {
                    return Err(SeaVisError::InvalidSeason(format!(
                        "season '{}' lists day {day} more than once",
                        season.name
                    )));
                }
            }
        }

        Ok(())
    }

    /// True when every index in `0..day_count` belongs to exactly one season
    pub fn is_partition(&self, day_count: usize) -> bool {
        let mut hits = vec![0_u32; day_count];
        for day in self.seasons.iter().flat_map(|s| s.days.iter()) {
            match hits.get_mut(*day) {
                Some(count) => *count += 1,
                None => return false,
            }
        }
        hits.iter().all(|&count| count == 1)
    }
}

impl Default for SeasonSet {
    fn default() -> Self {
        Self::quarterly()
    }
}

impl<'a> IntoIterator for &'a SeasonSet {
    type Item = &'a Season;
    type IntoIter = std::slice::Iter<'a, Season>;

    fn into_iter(self) -> Self::IntoIter {
        self.seasons.iter()
    }
}
