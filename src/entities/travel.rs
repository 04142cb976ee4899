use serde::{Deserialize, Serialize};

// the modes are independent: each side carries its own estimate so a failed
// transit lookup never invalidates a successful driving one
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TravelTimes {
    pub driving: ModeEstimate,
    pub transit: ModeEstimate,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum ModeEstimate {
    Available {
        duration: String,
        distance: String,
        departure_time: Option<String>,
        arrival_time: Option<String>,
    },
    Unavailable {
        message: Option<String>,
    },
}

impl ModeEstimate {
    pub fn is_available(&self) -> bool {
        match self {
            ModeEstimate::Available { .. } => true,
            ModeEstimate::Unavailable { .. } => false,
        }
    }
}
