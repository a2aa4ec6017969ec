// Destination domain model
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_DESTINATION: &str = "Red River Gorge";

/// A climbing destination as chosen by the user. Any string is accepted;
/// the upstream server decides whether it knows the place.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Destination(String);

impl Destination {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Value encoded for use in a query string
    pub fn encoded(&self) -> String {
        urlencoding::encode(&self.0).into_owned()
    }
}

impl Default for Destination {
    fn default() -> Self {
        Self::new(DEFAULT_DESTINATION)
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Destinations offered in the selection menu when none are configured
pub fn default_catalog() -> Vec<String> {
    [
        "Black Canyon of the Gunnison, CO",
        "Bishop, CA",
        "Boone, NC",
        "Chattanooga, TN",
        "Devils Tower National Monument, WY",
        "Flagstaff, AZ",
        "Hueco Tanks State Historic Site, TX",
        "Indian Creek, UT",
        "Joshua Tree National Park, CA",
        "Lander, WY",
        "Leavenworth, WA",
        "Little Cottonwood Canyon, UT",
        "Looking Glass Rock, NC",
        "Maple Canyon, UT",
        "New River Gorge National Park, WV",
        "Red River Gorge",
        "Red Rock Canyon, NV",
        "Rifle Mountain Park, CO",
        "Rocky Mountain National Park, CO",
        "Rumney, NH",
        "Shawangunks, NY",
        "Smith Rock State Park, OR",
        "Tacoma, WA",
        "The Needles, CA",
        "Yosemite National Park, CA",
        "Zion National Park, UT",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}
