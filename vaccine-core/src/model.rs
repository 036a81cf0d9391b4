use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

use crate::{
    error::{Result, VaccineError},
    state::UsState,
};

/// Booking state of a single pharmacy, as labelled by CVS.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingStatus {
    FullyBooked,
    Available,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::FullyBooked => "Fully Booked",
            BookingStatus::Available => "Available",
        }
    }
}

impl TryFrom<&str> for BookingStatus {
    type Error = VaccineError;

    fn try_from(value: &str) -> Result<Self> {
        match value {
            "Fully Booked" => Ok(BookingStatus::FullyBooked),
            "Available" => Ok(BookingStatus::Available),
            other => Err(VaccineError::MalformedResponse(format!(
                "unknown booking status '{other}'"
            ))),
        }
    }
}

/// One pharmacy location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PharmacyStatus {
    pub city: String,
    pub state: UsState,
    pub status: BookingStatus,
}

impl PharmacyStatus {
    pub fn from_json(value: &Value) -> Result<Self> {
        let raw = RawPharmacy::deserialize(value)?;
        raw.try_into()
    }

    pub fn is_available(&self) -> bool {
        self.status != BookingStatus::FullyBooked
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaccineInfo {
    pub current_time: String,
    pub is_booking_completed: bool,
    /// Pharmacies per state, each list in the order the server sent it.
    pub data: HashMap<UsState, Vec<PharmacyStatus>>,
}

impl VaccineInfo {
    /// Parse the `responsePayloadData` object.
    ///
    /// State keys that are not in the registry are skipped with a warning;
    /// everything else that does not fit is an error.
    pub fn from_json(value: &Value) -> Result<Self> {
        let raw = RawInfo::deserialize(value)?;

        let mut data = HashMap::with_capacity(raw.data.len());
        for (code, pharmacies) in raw.data {
            let Some(state) = UsState::resolve(&code) else {
                tracing::warn!(code = %code, "skipping unknown state key in vaccine data");
                continue;
            };

            let pharmacies = pharmacies
                .into_iter()
                .map(PharmacyStatus::try_from)
                .collect::<Result<Vec<_>>>()?;

            data.insert(state, pharmacies);
        }

        Ok(Self {
            current_time: raw.current_time,
            is_booking_completed: raw.is_booking_completed,
            data,
        })
    }

    /// Pharmacies listed for `state`; empty when the state is absent.
    pub fn pharmacies(&self, state: UsState) -> &[PharmacyStatus] {
        self.data.get(&state).map(Vec::as_slice).unwrap_or_default()
    }
}

/// Top-level envelope returned by the status endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VaccineInfoResponse {
    pub payload: Option<VaccineInfo>,
    pub metadata: HashMap<String, String>,
}

impl VaccineInfoResponse {
    /// Parse the whole response body. Both `responsePayloadData` and
    /// `responseMetaData` must be present.
    pub fn from_json(value: &Value) -> Result<Self> {
        let raw = RawEnvelope::deserialize(value)?;

        let payload = VaccineInfo::from_json(&raw.payload)?;

        // Metadata values are strings in practice; anything else is kept as
        // its JSON text rather than rejected.
        let metadata = raw
            .metadata
            .into_iter()
            .map(|(key, value)| match value {
                Value::String(s) => (key, s),
                other => (key, other.to_string()),
            })
            .collect();

        Ok(Self { payload: Some(payload), metadata })
    }

    pub fn payload(&self) -> Result<&VaccineInfo> {
        self.payload.as_ref().ok_or_else(|| {
            VaccineError::MalformedResponse("response carried no payload".to_string())
        })
    }
}

#[derive(Debug, Deserialize)]
struct RawEnvelope {
    #[serde(rename = "responsePayloadData")]
    payload: Value,
    #[serde(rename = "responseMetaData")]
    metadata: serde_json::Map<String, Value>,
}

#[derive(Debug, Deserialize)]
struct RawInfo {
    #[serde(rename = "currentTime")]
    current_time: String,
    #[serde(rename = "isBookingCompleted")]
    is_booking_completed: bool,
    data: HashMap<String, Vec<RawPharmacy>>,
}

#[derive(Debug, Deserialize)]
struct RawPharmacy {
    city: String,
    state: String,
    status: String,
}

impl TryFrom<RawPharmacy> for PharmacyStatus {
    type Error = VaccineError;

    fn try_from(raw: RawPharmacy) -> Result<Self> {
        let state = UsState::resolve(&raw.state).ok_or_else(|| {
            VaccineError::MalformedResponse(format!(
                "pharmacy in '{}' has unknown state '{}'",
                raw.city, raw.state
            ))
        })?;

        let status = BookingStatus::try_from(raw.status.as_str())?;

        Ok(Self { city: raw.city, state, status })
    }
}
