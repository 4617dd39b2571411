use chrono::{Duration, NaiveDateTime, Timelike};
use serde::{Serialize, Serializer};
use std::f64::consts::PI;

use crate::error::{Error, Result};
use crate::random::RandomSource;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const ACTIVE_MOTION: [u8; 6] = [0, 0, 0, 0, 1, 1];
const QUIET_MOTION: [u8; 6] = [0, 0, 0, 0, 0, 1];

/// One row of `sensor_data.csv`. Field order is column order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SensorReading {
    #[serde(serialize_with = "serialize_timestamp")]
    pub timestamp: NaiveDateTime,
    pub temperature: f64,
    pub humidity: f64,
    pub light: f64,
    pub motion: u8,
    pub co2: f64,
}

fn serialize_timestamp<S: Serializer>(
    ts: &NaiveDateTime,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_str(&ts.format(TIMESTAMP_FORMAT))
}

/// `count` readings spaced `interval_minutes` apart, starting at `start`.
///
/// Fails on a zero interval, or when a timestamp would fall outside the
/// calendar range chrono can represent.
pub fn generate_sensor_series(
    count: usize,
    interval_minutes: u32,
    start: NaiveDateTime,
    rng: &mut impl RandomSource,
) -> Result<Vec<SensorReading>> {
    if interval_minutes == 0 {
        return Err(Error::ZeroInterval);
    }
    let mut readings = Vec::with_capacity(count);
    for i in 0..count {
        let timestamp = timestamp_at(start, interval_minutes, i).ok_or(
            Error::TimestampOutOfRange {
                index: i,
                interval_minutes,
            },
        )?;
        readings.push(reading_at(timestamp, rng));
    }
    log::debug!("generated {} sensor readings", readings.len());
    Ok(readings)
}

fn timestamp_at(
    start: NaiveDateTime,
    interval_minutes: u32,
    index: usize,
) -> Option<NaiveDateTime> {
    let minutes = i64::from(interval_minutes).checked_mul(i64::try_from(index).ok()?)?;
    start.checked_add_signed(Duration::try_minutes(minutes)?)
}

fn reading_at(timestamp: NaiveDateTime, rng: &mut impl RandomSource) -> SensorReading {
    let hour = timestamp.hour();

    // day/night swing peaking mid-morning
    let minute_of_day = f64::from(hour * 60 + timestamp.minute());
    let phase = minute_of_day * (2.0 * PI / (24.0 * 60.0));
    let temperature = 22.0 + 5.0 * phase.sin();

    let humidity = (70.0 - (temperature - 22.0) * 3.0 + rng.uniform(-5.0, 5.0)).clamp(30.0, 90.0);

    let light = if (6..18).contains(&hour) {
        let mut light = 800.0 + rng.uniform(-200.0, 200.0);
        if (10..14).contains(&hour) {
            light += 200.0;
        }
        light
    } else {
        50.0 + rng.uniform(-30.0, 30.0)
    };

    let motion = if (8..22).contains(&hour) {
        *rng.pick(&ACTIVE_MOTION)
    } else {
        *rng.pick(&QUIET_MOTION)
    };

    let mut co2_base = 400.0;
    if (9..17).contains(&hour) {
        co2_base += 200.0;
    }
    let co2 = co2_base + rng.uniform(-50.0, 50.0);

    SensorReading {
        timestamp,
        temperature: round_to(temperature, 1),
        humidity: round_to(humidity, 1),
        light: round_to(light, 0),
        motion,
        co2: round_to(co2, 0),
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
