use std::{fmt, str::FromStr};

use crate::{
    config::{BASE_URL, endpoint_url_for},
    error::VaccineError,
};

macro_rules! us_states {
    ($($variant:ident => $abbr:literal, $name:literal;)+) => {
        /// The 50 US states plus the District of Columbia.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum UsState {
            $($variant,)+
        }

        const ALL: &[UsState] = &[$(UsState::$variant,)+];

        impl UsState {
            /// Two-letter postal code, e.g. "MA".
            pub const fn abbr(&self) -> &'static str {
                match self {
                    $(UsState::$variant => $abbr,)+
                }
            }

            /// Canonical upper-case name, e.g. "MASSACHUSETTS".
            pub const fn full_name(&self) -> &'static str {
                match self {
                    $(UsState::$variant => $name,)+
                }
            }
        }
    };
}

us_states! {
    Alabama => "AL", "ALABAMA";
    Alaska => "AK", "ALASKA";
    Arizona => "AZ", "ARIZONA";
    Arkansas => "AR", "ARKANSAS";
    California => "CA", "CALIFORNIA";
    Colorado => "CO", "COLORADO";
    Connecticut => "CT", "CONNECTICUT";
    Delaware => "DE", "DELAWARE";
    DistrictOfColumbia => "DC", "DISTRICT OF COLUMBIA";
    Florida => "FL", "FLORIDA";
    Georgia => "GA", "GEORGIA";
    Hawaii => "HI", "HAWAII";
    Idaho => "ID", "IDAHO";
    Illinois => "IL", "ILLINOIS";
    Indiana => "IN", "INDIANA";
    Iowa => "IA", "IOWA";
    Kansas => "KS", "KANSAS";
    Kentucky => "KY", "KENTUCKY";
    Louisiana => "LA", "LOUISIANA";
    Maine => "ME", "MAINE";
    Maryland => "MD", "MARYLAND";
    Massachusetts => "MA", "MASSACHUSETTS";
    Michigan => "MI", "MICHIGAN";
    Minnesota => "MN", "MINNESOTA";
    Mississippi => "MS", "MISSISSIPPI";
    Missouri => "MO", "MISSOURI";
    Montana => "MT", "MONTANA";
    Nebraska => "NE", "NEBRASKA";
    Nevada => "NV", "NEVADA";
    NewHampshire => "NH", "NEW HAMPSHIRE";
    NewJersey => "NJ", "NEW JERSEY";
    NewMexico => "NM", "NEW MEXICO";
    NewYork => "NY", "NEW YORK";
    NorthCarolina => "NC", "NORTH CAROLINA";
    NorthDakota => "ND", "NORTH DAKOTA";
    Ohio => "OH", "OHIO";
    Oklahoma => "OK", "OKLAHOMA";
    Oregon => "OR", "OREGON";
    Pennsylvania => "PA", "PENNSYLVANIA";
    RhodeIsland => "RI", "RHODE ISLAND";
    SouthCarolina => "SC", "SOUTH CAROLINA";
    SouthDakota => "SD", "SOUTH DAKOTA";
    Tennessee => "TN", "TENNESSEE";
    Texas => "TX", "TEXAS";
    Utah => "UT", "UTAH";
    Vermont => "VT", "VERMONT";
    Virginia => "VA", "VIRGINIA";
    Washington => "WA", "WASHINGTON";
    WestVirginia => "WV", "WEST VIRGINIA";
    Wisconsin => "WI", "WISCONSIN";
    Wyoming => "WY", "WYOMING";
}

impl UsState {
    pub const fn all() -> &'static [UsState] {
        ALL
    }

    /// Case-sensitive lookup by postal code. No trimming or case folding.
    pub fn resolve(code: &str) -> Option<UsState> {
        ALL.iter().copied().find(|state| state.abbr() == code)
    }

    /// Display form of the name with every word capitalized,
    /// e.g. "District Of Columbia".
    pub fn title_name(&self) -> String {
        self.full_name()
            .split(' ')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first
                        .to_uppercase()
                        .chain(chars.flat_map(char::to_lowercase))
                        .collect(),
                    None => String::new(),
                }
            })
            .collect::<Vec<String>>()
            .join(" ")
    }

    /// Vaccine status endpoint on the live CVS site.
    pub fn endpoint_url(&self) -> String {
        endpoint_url_for(BASE_URL, *self)
    }
}

impl fmt::Display for UsState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbr())
    }
}

impl FromStr for UsState {
    type Err = VaccineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UsState::resolve(s).ok_or_else(|| VaccineError::InvalidInput(s.to_string()))
    }
}
