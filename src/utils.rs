use std::time::Duration;

/// Format a duration for the position/duration labels of the player OSD.
pub fn format_duration(duration: Duration) -> String {
    let total_secs = duration.as_secs();
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{}:{:02}", minutes, seconds)
    }
}

/// Install the global tracing subscriber. Hosts call this once at startup;
/// the directive follows the usual env-filter syntax, e.g. `"marquee=debug"`.
pub fn init_tracing(directive: &str) {
    tracing_subscriber::fmt().with_env_filter(directive).init();
}
