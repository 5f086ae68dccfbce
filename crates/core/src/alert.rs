use serde::{Deserialize, Serialize};

/// Closed classification of notification content.
///
/// The set is fixed: every alert the gateway handles belongs to exactly one
/// of these four categories, and the category selects the payload template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertCategory {
    Weather,
    CropHealth,
    Yield,
    Resource,
}

impl AlertCategory {
    /// Snake-case name of the category, matching the serialized form.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Weather => "weather",
            Self::CropHealth => "crop_health",
            Self::Yield => "yield",
            Self::Resource => "resource",
        }
    }
}

impl std::fmt::Display for AlertCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A severe-weather notification.
///
/// Every field is optional; the renderer fills absent fields with a
/// placeholder instead of failing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WeatherAlert {
    /// Severity label, e.g. `"Warning"` or `"Severe"`.
    pub alert_level: Option<String>,
    /// Short description of the expected condition.
    pub condition: Option<String>,
    pub description: Option<String>,
    /// Recommended operator action.
    pub action: Option<String>,
    /// Names of the fields expected to be affected.
    #[serde(default)]
    pub affected_fields: Vec<String>,
}

/// A crop health issue detected in a field.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CropHealthAlert {
    /// Kind of issue, e.g. `"Leaf Rust"`.
    pub issue_type: Option<String>,
    /// Severity label, e.g. `"High"`.
    pub severity: Option<String>,
    pub description: Option<String>,
    /// Portion of the field affected, e.g. `"North section"`.
    pub affected_area: Option<String>,
    /// Field name.
    pub field: Option<String>,
    /// Recommended operator action.
    pub action: Option<String>,
}

/// A change in the yield forecast for a field.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct YieldAlert {
    pub field: Option<String>,
    pub crop: Option<String>,
    /// Forecast value in tons per acre.
    pub forecast: Option<String>,
    /// Percentage change from the previous forecast.
    pub change: Option<String>,
    /// Factors driving the change.
    pub factors: Option<String>,
    pub recommendations: Option<String>,
}

/// A resource usage / efficiency notification.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResourceAlert {
    /// Resource kind, e.g. `"Water"` or `"Fertilizer"`.
    pub resource_type: Option<String>,
    pub field: Option<String>,
    pub current_usage: Option<String>,
    /// Unit for the usage figures, e.g. `"gallons"`.
    pub unit: Option<String>,
    /// Optimal usage level in the same unit.
    pub optimal: Option<String>,
    /// Usage efficiency percentage.
    pub efficiency: Option<String>,
    pub recommendations: Option<String>,
}

/// One alert, tagged by category.
///
/// Serialized form carries a `"category"` tag with the snake-case category
/// name and the record's fields inline:
///
/// ```
/// use agrivision_core::{Alert, AlertCategory};
///
/// let json = serde_json::json!({
///     "category": "crop_health",
///     "issue_type": "Leaf Rust",
///     "severity": "High"
/// });
/// let alert: Alert = serde_json::from_value(json).unwrap();
/// assert_eq!(alert.category(), AlertCategory::CropHealth);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "snake_case")]
pub enum Alert {
    Weather(WeatherAlert),
    CropHealth(CropHealthAlert),
    Yield(YieldAlert),
    Resource(ResourceAlert),
}

impl Alert {
    /// The category tag of this alert.
    pub fn category(&self) -> AlertCategory {
        match self {
            Self::Weather(_) => AlertCategory::Weather,
            Self::CropHealth(_) => AlertCategory::CropHealth,
            Self::Yield(_) => AlertCategory::Yield,
            Self::Resource(_) => AlertCategory::Resource,
        }
    }
}
