//! Typed views of Apple dynamic desktop schedules.
//!
//! The `h24` property list maps times of day to image indices:
//!
//! ```text
//! { ti: [ { t: 0.25, i: 0 }, { t: 0.5, i: 1 }, ... ], ap: { l: 1, d: 0 } }
//! ```
//!
//! The `solar` property list maps sun positions to image indices:
//!
//! ```text
//! { si: [ { a: -0.34, z: 270.0, i: 0 }, ... ], ap: { l: 1, d: 0 } }
//! ```
//!
//! `ap` names the images to use for the light and dark appearance.

use serde::{Deserialize, Serialize};

use crate::metadata::MetadataError;
use crate::plist_value::{PlistDict, PlistValue};

/// Images shown for the light and dark system appearance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appearance {
    /// Image index for light mode.
    pub light: i64,
    /// Image index for dark mode.
    pub dark: i64,
}

/// One entry of a time-of-day schedule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeSlot {
    /// Start of the slot as a fraction of the day (0.0 to 1.0).
    pub time: f64,
    /// Image shown from this time on.
    pub image_index: i64,
}

impl TimeSlot {
    /// Start of the slot in hours after midnight.
    pub fn hour_of_day(&self) -> f64 {
        self.time * 24.0
    }
}

/// Decoded `apple_desktop:h24` payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSchedule {
    /// Slots in the order stored in the image.
    pub slots: Vec<TimeSlot>,
    pub appearance: Option<Appearance>,
}

impl TimeSchedule {
    /// Interpret a decoded `h24` dictionary.
    pub fn from_dict(dict: &PlistDict) -> Result<Self, MetadataError> {
        let slots = array(dict, "ti")?
            .iter()
            .map(|item| {
                let entry = entry_dict(item, "ti")?;
                Ok(TimeSlot {
                    time: number(entry, "t")?,
                    image_index: index(entry, "i")?,
                })
            })
            .collect::<Result<_, MetadataError>>()?;

        Ok(Self {
            slots,
            appearance: appearance(dict)?,
        })
    }

    /// The slot in effect at `fraction` of the day.
    ///
    /// Before the earliest slot the schedule wraps around to the latest one.
    pub fn slot_at(&self, fraction: f64) -> Option<&TimeSlot> {
        let latest = |a: &&TimeSlot, b: &&TimeSlot| a.time.total_cmp(&b.time);
        self.slots
            .iter()
            .filter(|s| s.time <= fraction)
            .max_by(latest)
            .or_else(|| self.slots.iter().max_by(latest))
    }
}

/// One entry of a solar schedule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolarPosition {
    /// Sun altitude above the horizon in degrees.
    pub altitude: f64,
    /// Sun azimuth in degrees.
    pub azimuth: f64,
    /// Image shown at this position.
    pub image_index: i64,
}

/// Decoded `apple_desktop:solar` payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolarSchedule {
    pub positions: Vec<SolarPosition>,
    pub appearance: Option<Appearance>,
}

impl SolarSchedule {
    /// Interpret a decoded `solar` dictionary.
    pub fn from_dict(dict: &PlistDict) -> Result<Self, MetadataError> {
        let positions = array(dict, "si")?
            .iter()
            .map(|item| {
                let entry = entry_dict(item, "si")?;
                Ok(SolarPosition {
                    altitude: number(entry, "a")?,
                    azimuth: number(entry, "z")?,
                    image_index: index(entry, "i")?,
                })
            })
            .collect::<Result<_, MetadataError>>()?;

        Ok(Self {
            positions,
            appearance: appearance(dict)?,
        })
    }

    /// The position closest to the given sun altitude and azimuth.
    pub fn nearest(&self, altitude: f64, azimuth: f64) -> Option<&SolarPosition> {
        let distance = |p: &SolarPosition| {
            let dz = (p.azimuth - azimuth).rem_euclid(360.0);
            let dz = dz.min(360.0 - dz);
            (p.altitude - altitude).powi(2) + dz.powi(2)
        };
        self.positions
            .iter()
            .min_by(|a, b| distance(a).total_cmp(&distance(b)))
    }
}

fn shape(msg: String) -> MetadataError {
    MetadataError::UnexpectedShape(msg)
}

fn array<'a>(dict: &'a PlistDict, key: &str) -> Result<&'a [PlistValue], MetadataError> {
    let value = dict.get(key).ok_or_else(|| shape(format!("missing `{key}`")))?;
    value
        .as_array()
        .ok_or_else(|| shape(format!("`{key}` is a {}, expected array", value.type_name())))
}

fn entry_dict<'a>(item: &'a PlistValue, key: &str) -> Result<&'a PlistDict, MetadataError> {
    item.as_dict()
        .ok_or_else(|| shape(format!("`{key}` entry is a {}, expected dictionary", item.type_name())))
}

fn number(dict: &PlistDict, key: &str) -> Result<f64, MetadataError> {
    let value = dict.get(key).ok_or_else(|| shape(format!("missing `{key}`")))?;
    value
        .as_f64()
        .ok_or_else(|| shape(format!("`{key}` is a {}, expected number", value.type_name())))
}

fn index(dict: &PlistDict, key: &str) -> Result<i64, MetadataError> {
    let n = number(dict, key)?;
    if n.fract() != 0.0 || n < 0.0 {
        return Err(shape(format!("`{key}` = {n} is not an image index")));
    }
    Ok(n as i64)
}

fn appearance(dict: &PlistDict) -> Result<Option<Appearance>, MetadataError> {
    let Some(value) = dict.get("ap") else {
        return Ok(None);
    };
    let ap = entry_dict(value, "ap")?;
    Ok(Some(Appearance {
        light: index(ap, "l")?,
        dark: index(ap, "d")?,
    }))
}
