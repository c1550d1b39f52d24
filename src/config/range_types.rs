use derive_more::{Display, Into};
use serde::{Deserialize, Serialize};

/// A sensor half-extent in pixels constrained to [1, 256]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Display, Into, Serialize, Deserialize)]
#[serde(from = "i32", into = "i32")]
pub struct SensorExtent(i32);

impl SensorExtent {
    const MIN: i32 = 1;
    const MAX: i32 = 256;

    pub fn new(value: i32) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> i32 {
        self.0
    }
}

impl From<i32> for SensorExtent {
    fn from(value: i32) -> Self {
        Self::new(value)
    }
}

impl Default for SensorExtent {
    fn default() -> Self {
        Self::new(16)
    }
}

/// How far a sensor reaches past the actor's body, constrained to [0, 64]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Display, Into, Serialize, Deserialize)]
#[serde(from = "i32", into = "i32")]
pub struct SensorReach(i32);

impl SensorReach {
    const MIN: i32 = 0;
    const MAX: i32 = 64;

    pub fn new(value: i32) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> i32 {
        self.0
    }
}

impl From<i32> for SensorReach {
    fn from(value: i32) -> Self {
        Self::new(value)
    }
}

impl Default for SensorReach {
    fn default() -> Self {
        Self::new(8)
    }
}
