#[derive(Debug, Clone, PartialEq)]
pub struct GradientColors {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone)]
pub struct Theme {
    pub background: String,
    pub ring_gradient: GradientColors,
    pub circuit_gradient: GradientColors,
    pub marker_fill: String,
    pub section_stroke: String,
    pub pcb_color: String,
    pub iot_color: String,
    pub signal_color: String,
    pub electronics_color: String,
    pub glyph_color: String,
    pub chip_fill: String,
    pub placeholder_fill: String,
}

impl Theme {
    pub fn electromos() -> Self {
        Self {
            background: "#121212".to_string(),
            ring_gradient: GradientColors {
                from: "#00FF9F".to_string(),
                to: "#4845D3".to_string(),
            },
            circuit_gradient: GradientColors {
                from: "#4845D3".to_string(),
                to: "#FC7753".to_string(),
            },
            marker_fill: "#00FF9F".to_string(),
            section_stroke: "#121212".to_string(),
            pcb_color: "#d32f2f".to_string(),
            iot_color: "#1976d2".to_string(),
            signal_color: "#00acc1".to_string(),
            electronics_color: "#7b1fa2".to_string(),
            glyph_color: "white".to_string(),
            chip_fill: "#121212".to_string(),
            placeholder_fill: "#333".to_string(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::electromos()
    }
}
