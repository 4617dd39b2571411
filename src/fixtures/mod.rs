//! Synthetic example data for the dashboard demos.
//!
//! Nothing here is derived from real measurements. The heuristics are kept
//! exactly as the demos expect them; don't read physics into them.

pub mod page;
pub mod sensor;
pub mod signal;
pub mod writer;

pub use page::{deployment_page, write_deployment_page};
pub use sensor::{SensorReading, generate_sensor_series};
pub use signal::{SignalSample, generate_signal_series};
pub use writer::{delimited_string, preview, write_delimited};
