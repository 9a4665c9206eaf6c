use embassy_time::Duration;

/// Settle time of a command without an explicit timeout
pub fn default_settle() -> Duration {
    Duration::from_millis(1000)
}

/// Time the module needs to switch radio access technology after +CNSMOD
pub fn network_mode_switch_time() -> Duration {
    Duration::from_millis(5000)
}

/// Time the module firmware needs for the MQTT broker handshake
pub fn broker_connect_time() -> Duration {
    Duration::from_millis(5000)
}

/// Pause after a failed serial read before the next one
pub fn read_error_backoff() -> Duration {
    Duration::from_millis(100)
}

/// Settle time of a command, given its `MAX_TIMEOUT_MS`.
///
/// An override replaces every settle time, so tests can run without delay.
pub fn settle_time(max_timeout_ms: u32, settle_override: Option<Duration>) -> Duration {
    match settle_override {
        Some(settle) => settle,
        None => Duration::from_millis(max_timeout_ms as u64),
    }
}
