//! Rendering of alerts into channel-ready message bodies.
//!
//! One template per category: a fixed subject prefix, an ordered list of
//! labelled rows for the HTML body, and a one-line tagged summary for SMS.
//! Rendering is a pure function of the alert; absent fields degrade to a
//! placeholder and never fail. Body formats follow the AgriVision product
//! messages (uppercase channel tag for SMS, `<h2>` plus labelled paragraphs
//! for email).

use crate::alert::{Alert, CropHealthAlert, ResourceAlert, WeatherAlert, YieldAlert};

/// Substituted for any field the caller left unset.
pub const PLACEHOLDER: &str = "N/A";

/// Hard cap on the SMS text body, including the truncation marker.
pub const SMS_MAX_CHARS: usize = 160;

const TRUNCATION_MARKER: &str = "...";

/// The rendered message bodies for one alert, shared by every channel so
/// that email and SMS always describe the same event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertPayload {
    /// Email subject line.
    pub subject: String,
    /// Flat single-line body, capped at [`SMS_MAX_CHARS`] characters.
    pub text_body: String,
    /// HTML body for email.
    pub html_body: String,
}

/// Render an alert into subject, text, and HTML bodies.
pub fn render(alert: &Alert) -> AlertPayload {
    let (subject, heading, rows, sms) = match alert {
        Alert::Weather(a) => weather_template(a),
        Alert::CropHealth(a) => crop_health_template(a),
        Alert::Yield(a) => yield_template(a),
        Alert::Resource(a) => resource_template(a),
    };

    AlertPayload {
        subject,
        text_body: truncate_sms(&sms),
        html_body: render_html(heading, &rows),
    }
}

fn weather_template(a: &WeatherAlert) -> (String, &'static str, Vec<(&'static str, String)>, String) {
    let level = field(&a.alert_level);
    let condition = field(&a.condition);
    let action = field(&a.action);
    let affected = if a.affected_fields.is_empty() {
        PLACEHOLDER.to_owned()
    } else {
        a.affected_fields.join(", ")
    };

    let rows = vec![
        ("Alert Level", level.to_owned()),
        ("Condition", condition.to_owned()),
        ("Description", field(&a.description).to_owned()),
        ("Recommended Action", action.to_owned()),
        ("Affected Fields", affected),
    ];
    let sms = format!("WEATHER ALERT: {level} - {condition}. {action}");

    (
        format!("Weather Alert: {level}"),
        "AgriVision Weather Alert",
        rows,
        sms,
    )
}

fn crop_health_template(
    a: &CropHealthAlert,
) -> (String, &'static str, Vec<(&'static str, String)>, String) {
    let issue = field(&a.issue_type);
    let severity = field(&a.severity);
    let field_name = field(&a.field);
    let action = field(&a.action);

    let rows = vec![
        ("Issue Type", issue.to_owned()),
        ("Severity", severity.to_owned()),
        ("Description", field(&a.description).to_owned()),
        (
            "Affected Area",
            format!("{} in {field_name}", field(&a.affected_area)),
        ),
        ("Recommended Action", action.to_owned()),
    ];
    let sms = format!("CROP HEALTH ALERT: {severity} {issue} in {field_name}. {action}");

    (
        format!("Crop Health Alert: {issue}"),
        "AgriVision Crop Health Alert",
        rows,
        sms,
    )
}

fn yield_template(a: &YieldAlert) -> (String, &'static str, Vec<(&'static str, String)>, String) {
    let field_name = field(&a.field);
    let crop = field(&a.crop);
    let forecast = field(&a.forecast);
    let change = field(&a.change);

    let rows = vec![
        ("Field", field_name.to_owned()),
        ("Crop", crop.to_owned()),
        ("Current Forecast", format!("{forecast} tons/acre")),
        ("Change", format!("{change}% from previous forecast")),
        ("Factors", field(&a.factors).to_owned()),
        ("Recommendations", field(&a.recommendations).to_owned()),
    ];
    let sms = format!(
        "YIELD UPDATE: {field_name}, {crop} now forecast at {forecast} tons/acre ({change}%)."
    );

    (
        "Yield Forecast Update".to_owned(),
        "AgriVision Yield Forecast Update",
        rows,
        sms,
    )
}

fn resource_template(
    a: &ResourceAlert,
) -> (String, &'static str, Vec<(&'static str, String)>, String) {
    let resource = field(&a.resource_type);
    let field_name = field(&a.field);
    let unit = field(&a.unit);
    let efficiency = field(&a.efficiency);
    let recommendations = field(&a.recommendations);

    let rows = vec![
        ("Resource Type", resource.to_owned()),
        ("Field", field_name.to_owned()),
        ("Current Usage", format!("{} {unit}", field(&a.current_usage))),
        ("Optimal Level", format!("{} {unit}", field(&a.optimal))),
        ("Efficiency", format!("{efficiency}%")),
        ("Recommendations", recommendations.to_owned()),
    ];
    let sms = format!(
        "RESOURCE ALERT: {resource} usage at {efficiency}% efficiency in {field_name}. \
         {recommendations}"
    );

    (
        "Resource Management Alert".to_owned(),
        "AgriVision Resource Management Alert",
        rows,
        sms,
    )
}

fn field(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or(PLACEHOLDER)
}

fn render_html(heading: &str, rows: &[(&'static str, String)]) -> String {
    let mut html = format!("<h2>{}</h2>\n", escape_html(heading));
    for (label, value) in rows {
        html.push_str(&format!(
            "<p><strong>{label}:</strong> {}</p>\n",
            escape_html(value)
        ));
    }
    html
}

/// Minimal escaping for values interpolated into the HTML body.
fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Cap the SMS body at [`SMS_MAX_CHARS`] characters, replacing the tail with
/// a `...` marker. Operates on characters, not bytes, so multi-byte text is
/// never split mid-codepoint.
fn truncate_sms(body: &str) -> String {
    if body.chars().count() <= SMS_MAX_CHARS {
        return body.to_owned();
    }
    let keep = SMS_MAX_CHARS - TRUNCATION_MARKER.len();
    let mut truncated: String = body.chars().take(keep).collect();
    truncated.push_str(TRUNCATION_MARKER);
    truncated
}
