use crate::models::DashboardWidgetSetting;

/// Split a stored `allowed_roles` string into trimmed, non-empty names.
pub fn parse_roles(raw: &str) -> Vec<&str> {
    raw.split(',')
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .collect()
}

/// A widget with no role restriction is visible to everyone; otherwise the
/// caller needs at least one of the listed roles.
pub fn is_visible_to<S: AsRef<str>>(allowed_roles: Option<&str>, roles: &[S]) -> bool {
    let allowed = match allowed_roles {
        Some(raw) => parse_roles(raw),
        None => return true,
    };
    if allowed.is_empty() {
        return true;
    }
    roles
        .iter()
        .any(|role| allowed.contains(&role.as_ref().trim()))
}

/// Enabled widgets visible to `roles`, ordered for display.
pub fn visible_widgets<S: AsRef<str>>(
    widgets: Vec<DashboardWidgetSetting>,
    roles: &[S],
) -> Vec<DashboardWidgetSetting> {
    let mut visible: Vec<DashboardWidgetSetting> = widgets
        .into_iter()
        .filter(|w| w.is_visible && is_visible_to(w.allowed_roles.as_deref(), roles))
        .collect();
    visible.sort_by(|a, b| {
        a.display_order
            .cmp(&b.display_order)
            .then_with(|| a.widget_key.cmp(&b.widget_key))
    });
    visible
}
