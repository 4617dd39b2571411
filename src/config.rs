use crate::error::{Error, Result};
use crate::theme::Theme;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_CANVAS: u32 = 500;
pub const DEFAULT_RING_RADIUS: f64 = 220.0;
pub const DEFAULT_SECTION_RADIUS: f64 = 150.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum Variant {
    /// Four section glyphs plus connector curves.
    Rich,
    /// A plain chip placeholder in the middle, no connectors.
    Simple,
}

/// Optional glyph groups drawn over the wedge sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Icon {
    Pcb,
    Iot,
    Signal,
    Electronics,
    CenterChip,
}

impl Icon {
    pub fn group_id(self) -> &'static str {
        match self {
            Self::Pcb => "pcb_icon",
            Self::Iot => "iot_icon",
            Self::Signal => "signal_icon",
            Self::Electronics => "electronics_icon",
            Self::CenterChip => "center_chip",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogoConfig {
    pub width: u32,
    pub height: u32,
    pub ring_radius: f64,
    pub section_radius: f64,
    pub marker_radius: f64,
    pub icons: Vec<Icon>,
    pub connectors: bool,
}

impl LogoConfig {
    pub fn rich(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ring_radius: DEFAULT_RING_RADIUS,
            section_radius: DEFAULT_SECTION_RADIUS,
            marker_radius: 10.0,
            icons: vec![Icon::Pcb, Icon::Iot, Icon::Signal, Icon::Electronics],
            connectors: true,
        }
    }

    pub fn simple(width: u32, height: u32) -> Self {
        Self {
            icons: vec![Icon::CenterChip],
            connectors: false,
            ..Self::rich(width, height)
        }
    }

    pub fn for_variant(variant: Variant, width: u32, height: u32) -> Self {
        match variant {
            Variant::Rich => Self::rich(width, height),
            Variant::Simple => Self::simple(width, height),
        }
    }

    pub fn with_variant(self, variant: Variant) -> Self {
        let preset = Self::for_variant(variant, self.width, self.height);
        Self {
            icons: preset.icons,
            connectors: preset.connectors,
            ..self
        }
    }
}

impl Default for LogoConfig {
    fn default() -> Self {
        Self::rich(DEFAULT_CANVAS, DEFAULT_CANVAS)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensorConfig {
    pub count: usize,
    /// Minutes between readings; never zero.
    pub interval_minutes: u32,
    /// First timestamp; 24 hours before "now" when unset.
    pub start: Option<NaiveDateTime>,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            count: 100,
            interval_minutes: 15,
            start: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalConfig {
    pub sample_rate: u32,
    pub duration_seconds: u32,
}

impl Default for SignalConfig {
    fn default() -> Self {
        Self {
            sample_rate: 1000,
            duration_seconds: 1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub logo_file: String,
    pub sensor_file: String,
    pub signal_file: String,
    pub page_file: String,
    pub preview_rows: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            logo_file: "electromos_logo.svg".to_string(),
            sensor_file: "sensor_data.csv".to_string(),
            signal_file: "signal_data.csv".to_string(),
            page_file: "deployment.html".to_string(),
            preview_rows: 5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Raster scale applied when the logo is also exported as PNG.
    pub png_scale: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self { png_scale: 1.0 }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub theme: Theme,
    pub logo: LogoConfig,
    pub sensors: SensorConfig,
    pub signal: SignalConfig,
    pub output: OutputConfig,
    pub render: RenderConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThemeVariables {
    background: Option<String>,
    marker_fill: Option<String>,
    section_stroke: Option<String>,
    pcb_color: Option<String>,
    iot_color: Option<String>,
    signal_color: Option<String>,
    electronics_color: Option<String>,
    glyph_color: Option<String>,
    ring_gradient_from: Option<String>,
    ring_gradient_to: Option<String>,
    circuit_gradient_from: Option<String>,
    circuit_gradient_to: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LogoConfigFile {
    variant: Option<Variant>,
    width: Option<u32>,
    height: Option<u32>,
    ring_radius: Option<f64>,
    section_radius: Option<f64>,
    marker_radius: Option<f64>,
    icons: Option<Vec<Icon>>,
    connectors: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SensorConfigFile {
    count: Option<usize>,
    interval_minutes: Option<u32>,
    start: Option<NaiveDateTime>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignalConfigFile {
    sample_rate: Option<u32>,
    duration_seconds: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OutputConfigFile {
    logo_file: Option<String>,
    sensor_file: Option<String>,
    signal_file: Option<String>,
    page_file: Option<String>,
    preview_rows: Option<usize>,
    png_scale: Option<f32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme_variables: Option<ThemeVariables>,
    logo: Option<LogoConfigFile>,
    sensors: Option<SensorConfigFile>,
    signal: Option<SignalConfigFile>,
    output: Option<OutputConfigFile>,
}

/// Defaults, overlaid with the JSON (or JSON5, by extension) file at `path`.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let config = Config::default();
    let Some(path) = path else {
        return Ok(config);
    };

    let contents = std::fs::read_to_string(path).map_err(|err| Error::Config {
        path: path.to_path_buf(),
        message: err.to_string(),
    })?;
    let is_json5 = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("json5"))
        .unwrap_or(false);
    let parsed: ConfigFile = if is_json5 {
        json5::from_str(&contents).map_err(|err| Error::Config {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?
    } else {
        serde_json::from_str(&contents).map_err(|err| Error::Config {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?
    };

    let config = apply_config_file(config, parsed);
    if config.sensors.interval_minutes == 0 {
        return Err(Error::Config {
            path: path.to_path_buf(),
            message: "sensors.intervalMinutes must be at least 1".to_string(),
        });
    }
    log::debug!("loaded config from {}", path.display());
    Ok(config)
}

fn apply_config_file(mut config: Config, parsed: ConfigFile) -> Config {
    if let Some(vars) = parsed.theme_variables {
        if let Some(v) = vars.background {
            config.theme.background = v;
        }
        if let Some(v) = vars.marker_fill {
            config.theme.marker_fill = v;
        }
        if let Some(v) = vars.section_stroke {
            config.theme.section_stroke = v;
        }
        if let Some(v) = vars.pcb_color {
            config.theme.pcb_color = v;
        }
        if let Some(v) = vars.iot_color {
            config.theme.iot_color = v;
        }
        if let Some(v) = vars.signal_color {
            config.theme.signal_color = v;
        }
        if let Some(v) = vars.electronics_color {
            config.theme.electronics_color = v;
        }
        if let Some(v) = vars.glyph_color {
            config.theme.glyph_color = v;
        }
        if let Some(v) = vars.ring_gradient_from {
            config.theme.ring_gradient.from = v;
        }
        if let Some(v) = vars.ring_gradient_to {
            config.theme.ring_gradient.to = v;
        }
        if let Some(v) = vars.circuit_gradient_from {
            config.theme.circuit_gradient.from = v;
        }
        if let Some(v) = vars.circuit_gradient_to {
            config.theme.circuit_gradient.to = v;
        }
    }

    if let Some(logo) = parsed.logo {
        if let Some(v) = logo.width {
            config.logo.width = v;
        }
        if let Some(v) = logo.height {
            config.logo.height = v;
        }
        if let Some(v) = logo.variant {
            config.logo = config.logo.with_variant(v);
        }
        if let Some(v) = logo.ring_radius {
            config.logo.ring_radius = v;
        }
        if let Some(v) = logo.section_radius {
            config.logo.section_radius = v;
        }
        if let Some(v) = logo.marker_radius {
            config.logo.marker_radius = v;
        }
        if let Some(v) = logo.icons {
            config.logo.icons = v;
        }
        if let Some(v) = logo.connectors {
            config.logo.connectors = v;
        }
    }

    if let Some(sensors) = parsed.sensors {
        if let Some(v) = sensors.count {
            config.sensors.count = v;
        }
        if let Some(v) = sensors.interval_minutes {
            config.sensors.interval_minutes = v;
        }
        if sensors.start.is_some() {
            config.sensors.start = sensors.start;
        }
    }

    if let Some(signal) = parsed.signal {
        if let Some(v) = signal.sample_rate {
            config.signal.sample_rate = v;
        }
        if let Some(v) = signal.duration_seconds {
            config.signal.duration_seconds = v;
        }
    }

    if let Some(output) = parsed.output {
        if let Some(v) = output.logo_file {
            config.output.logo_file = v;
        }
        if let Some(v) = output.sensor_file {
            config.output.sensor_file = v;
        }
        if let Some(v) = output.signal_file {
            config.output.signal_file = v;
        }
        if let Some(v) = output.page_file {
            config.output.page_file = v;
        }
        if let Some(v) = output.preview_rows {
            config.output.preview_rows = v;
        }
        if let Some(v) = output.png_scale {
            config.render.png_scale = v;
        }
    }

    config
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Config {
        let parsed: ConfigFile = serde_json::from_str(json).expect("config parse failed");
        apply_config_file(Config::default(), parsed)
    }

    #[test]
    fn defaults_match_the_published_assets() {
        let config = Config::default();
        assert_eq!(config.logo.width, 500);
        assert_eq!(config.logo.ring_radius, 220.0);
        assert_eq!(config.logo.icons.len(), 4);
        assert_eq!(config.sensors.count, 100);
        assert_eq!(config.sensors.interval_minutes, 15);
        assert_eq!(config.signal.sample_rate, 1000);
        assert_eq!(config.output.sensor_file, "sensor_data.csv");
    }

    #[test]
    fn variant_switches_icon_set() {
        let config = parse(r#"{ "logo": { "variant": "simple", "width": 640 } }"#);
        assert_eq!(config.logo.width, 640);
        assert_eq!(config.logo.icons, vec![Icon::CenterChip]);
        assert!(!config.logo.connectors);
    }

    #[test]
    fn explicit_icons_win_over_variant() {
        let config =
            parse(r#"{ "logo": { "variant": "simple", "icons": ["pcb", "centerChip"] } }"#);
        assert_eq!(config.logo.icons, vec![Icon::Pcb, Icon::CenterChip]);
    }

    #[test]
    fn theme_variables_override_palette() {
        let config = parse(
            r##"{ "themeVariables": { "pcbColor": "#ff0000", "ringGradientTo": "#000" } }"##,
        );
        assert_eq!(config.theme.pcb_color, "#ff0000");
        assert_eq!(config.theme.ring_gradient.to, "#000");
        assert_eq!(config.theme.iot_color, "#1976d2");
    }

    #[test]
    fn sensor_start_parses_iso_timestamps() {
        let config =
            parse(r#"{ "sensors": { "start": "2024-06-01T00:00:00", "intervalMinutes": 5 } }"#);
        let start = config.sensors.start.expect("start set");
        assert_eq!(start.to_string(), "2024-06-01 00:00:00");
        assert_eq!(config.sensors.interval_minutes, 5);
    }

    #[test]
    fn missing_path_yields_defaults() {
        let config = load_config(None).expect("defaults");
        assert_eq!(config.output.logo_file, "electromos_logo.svg");
    }

    fn write_config(dir: &tempfile::TempDir, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, contents).expect("write config");
        path
    }

    #[test]
    fn loads_json_file_from_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_config(
            &dir,
            "electromos.json",
            r#"{ "signal": { "sampleRate": 250 }, "output": { "pngScale": 2.0 } }"#,
        );
        let config = load_config(Some(&path)).expect("load");
        assert_eq!(config.signal.sample_rate, 250);
        assert_eq!(config.signal.duration_seconds, 1);
        assert_eq!(config.render.png_scale, 2.0);
    }

    #[test]
    fn json5_extension_accepts_comments_and_trailing_commas() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_config(
            &dir,
            "electromos.json5",
            r#"{
                // smaller canvas for the docs site
                logo: { variant: "simple", width: 320, },
                sensors: { count: 12, intervalMinutes: 30, },
            }"#,
        );
        let config = load_config(Some(&path)).expect("load");
        assert_eq!(config.logo.width, 320);
        assert_eq!(config.logo.icons, vec![Icon::CenterChip]);
        assert_eq!(config.sensors.count, 12);
        assert_eq!(config.sensors.interval_minutes, 30);
    }

    #[test]
    fn json5_syntax_is_rejected_in_a_json_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_config(&dir, "electromos.json", "{ logo: { width: 320, }, }");
        let err = load_config(Some(&path)).unwrap_err();
        assert!(matches!(err, Error::Config { path: ref p, .. } if *p == path));
    }

    #[test]
    fn missing_file_is_a_config_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("absent.json");
        let err = load_config(Some(&path)).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
        assert!(err.to_string().contains("absent.json"));
    }

    #[test]
    fn zero_or_negative_interval_is_a_config_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        for body in [
            r#"{ "sensors": { "intervalMinutes": 0 } }"#,
            r#"{ "sensors": { "intervalMinutes": -15 } }"#,
        ] {
            let path = write_config(&dir, "electromos.json", body);
            let err = load_config(Some(&path)).unwrap_err();
            assert!(matches!(err, Error::Config { .. }), "{body}: {err}");
        }
    }
}
