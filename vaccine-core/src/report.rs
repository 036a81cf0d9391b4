use std::fmt;

use crate::{model::VaccineInfo, state::UsState};

/// What to tell the user about one state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AvailabilityReport {
    /// Cities with a non-"Fully Booked" pharmacy, in payload order.
    Available(Vec<String>),
    /// Nothing open among `checked` pharmacies.
    NoneFound { checked: usize, state: UsState },
}

impl AvailabilityReport {
    pub fn from_info(info: &VaccineInfo, state: UsState) -> Self {
        let pharmacies = info.pharmacies(state);

        let available: Vec<String> = pharmacies
            .iter()
            .filter(|pharmacy| pharmacy.is_available())
            .map(|pharmacy| pharmacy.city.clone())
            .collect();

        if available.is_empty() {
            AvailabilityReport::NoneFound { checked: pharmacies.len(), state }
        } else {
            AvailabilityReport::Available(available)
        }
    }

    pub fn any_available(&self) -> bool {
        matches!(self, AvailabilityReport::Available(_))
    }

    /// Output lines, without trailing newlines.
    pub fn lines(&self) -> Vec<String> {
        match self {
            AvailabilityReport::Available(cities) => {
                cities.iter().map(|city| format!("Available: {city}")).collect()
            }
            AvailabilityReport::NoneFound { checked, state } => vec![format!(
                "No availabilities found; checked {checked} CVS locations in {}",
                state.title_name()
            )],
        }
    }
}

impl fmt::Display for AvailabilityReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.lines().join("\n"))
    }
}
