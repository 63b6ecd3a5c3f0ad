use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub font_family: String,
    pub font_size: f32,
    pub shape_fill: String,
    pub shape_border: String,
    pub shape_text_color: String,
    pub line_color: String,
    pub line_width: f32,
    pub debug_waypoint_color: String,
    pub background: String,
}

impl Theme {
    pub fn modern() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            font_size: 13.0,
            shape_fill: "#F8FAFF".to_string(),
            shape_border: "#C7D2E5".to_string(),
            shape_text_color: "#1C2430".to_string(),
            line_color: "#7A8AA6".to_string(),
            line_width: 1.6,
            debug_waypoint_color: "#E5484D".to_string(),
            background: "#FFFFFF".to_string(),
        }
    }

    pub fn plain() -> Self {
        Self {
            font_family: "\"trebuchet ms\", verdana, arial, sans-serif".to_string(),
            font_size: 16.0,
            shape_fill: "#FFFFFF".to_string(),
            shape_border: "#333333".to_string(),
            shape_text_color: "#333333".to_string(),
            line_color: "#333333".to_string(),
            line_width: 1.4,
            debug_waypoint_color: "#D00000".to_string(),
            background: "#FFFFFF".to_string(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::modern()
    }
}
