//! Fixed seat layout of the train.
//!
//! A [`SeatMap`] lists the sections in allocation priority order together with
//! the initial seats of each section. It is consumed once when the ledger is
//! built and never changes afterwards.

use crate::error::LedgerError;
use crate::types::{SeatLabel, Section};
use std::collections::HashSet;

/// Ordered sections with their initial seat sequences.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeatMap {
    sections: Vec<(Section, Vec<SeatLabel>)>,
}

impl SeatMap {
    /// Largest section a uniform map can label (one letter per seat).
    pub const MAX_SEATS_PER_SECTION: usize = 26;

    /// Builds a seat map from explicit seat lists.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::InvalidSeatMap`] if there are no sections, a
    /// section name repeats, or a seat label appears more than once anywhere
    /// in the map.
    pub fn new(sections: Vec<(Section, Vec<SeatLabel>)>) -> Result<Self, LedgerError> {
        if sections.is_empty() {
            return Err(LedgerError::InvalidSeatMap(
                "at least one section is required".to_string(),
            ));
        }

        let mut names = HashSet::new();
        let mut labels = HashSet::new();
        for (section, seats) in &sections {
            if section.as_str().is_empty() {
                return Err(LedgerError::InvalidSeatMap(
                    "section names must not be empty".to_string(),
                ));
            }
            if !names.insert(section) {
                return Err(LedgerError::InvalidSeatMap(format!(
                    "duplicate section {section}"
                )));
            }
            for seat in seats {
                if !labels.insert(seat) {
                    return Err(LedgerError::InvalidSeatMap(format!(
                        "duplicate seat {seat}"
                    )));
                }
            }
        }

        Ok(Self { sections })
    }

    /// Builds a map where every section has the same number of seats.
    ///
    /// Seats are labelled `<row><letter>`, where the row is the section's
    /// 1-based position and the letter the seat's position: with sections
    /// `A, B` and three seats that gives `1A 1B 1C` and `2A 2B 2C`.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::InvalidSeatMap`] if `seats_per_section` is zero
    /// or above [`Self::MAX_SEATS_PER_SECTION`], or the section names are
    /// invalid (see [`Self::new`]).
    pub fn uniform<I, S>(sections: I, seats_per_section: usize) -> Result<Self, LedgerError>
    where
        I: IntoIterator<Item = S>,
        S: Into<Section>,
    {
        if seats_per_section == 0 || seats_per_section > Self::MAX_SEATS_PER_SECTION {
            return Err(LedgerError::InvalidSeatMap(format!(
                "seats per section must be between 1 and {}, got {seats_per_section}",
                Self::MAX_SEATS_PER_SECTION
            )));
        }

        let sections = sections
            .into_iter()
            .enumerate()
            .map(|(index, section)| (section.into(), row_labels(index + 1, seats_per_section)))
            .collect();

        Self::new(sections)
    }

    /// The standard layout: sections `A` and `B`, ten seats each
    /// (`1A..1J`, `2A..2J`).
    #[must_use]
    pub fn standard() -> Self {
        Self {
            sections: vec![
                (Section::from("A"), row_labels(1, 10)),
                (Section::from("B"), row_labels(2, 10)),
            ],
        }
    }

    /// Sections in allocation priority order.
    pub fn sections(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter().map(|(section, _)| section)
    }

    /// Sections with their initial seats, in priority order.
    pub fn layout(&self) -> impl Iterator<Item = (&Section, &[SeatLabel])> {
        self.sections
            .iter()
            .map(|(section, seats)| (section, seats.as_slice()))
    }

    /// Every seat in the map.
    pub fn seats(&self) -> impl Iterator<Item = &SeatLabel> {
        self.sections.iter().flat_map(|(_, seats)| seats.iter())
    }

    /// Total number of seats.
    #[must_use]
    pub fn total_seats(&self) -> usize {
        self.sections.iter().map(|(_, seats)| seats.len()).sum()
    }
}

impl Default for SeatMap {
    fn default() -> Self {
        Self::standard()
    }
}

fn row_labels(row: usize, count: usize) -> Vec<SeatLabel> {
    (b'A'..=b'Z')
        .take(count)
        .map(|letter| SeatLabel::new(format!("{row}{}", char::from(letter))))
        .collect()
}
