use super::AlertKind;

/// A reading at the threshold already counts as a breach.
pub(crate) fn is_breach(reading: f32, threshold: f32) -> bool {
    reading >= threshold
}

pub(crate) fn alert_message(kind: AlertKind, consumption: f32) -> String {
    format!("{}. Consumption is {:.2}%", kind.title(), consumption)
}
