//! Named numeric telemetry. The detector publishes values; where they go
//! (dashboard, log, test buffer) is up to the sink.

use std::collections::BTreeMap;

use log::info;

pub trait TelemetrySink {
    fn put_number(&mut self, key: &str, value: f64);
}

impl<T: TelemetrySink + ?Sized> TelemetrySink for &mut T {
    fn put_number(&mut self, key: &str, value: f64) {
        (**self).put_number(key, value);
    }
}

/// Writes every value to the `log` facade at `info` level.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogTelemetry;

impl TelemetrySink for LogTelemetry {
    fn put_number(&mut self, key: &str, value: f64) {
        info!("telemetry {key} = {value:.4}");
    }
}

/// Keeps the latest value per key.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RecordingTelemetry {
    values: BTreeMap<String, f64>,
}

impl RecordingTelemetry {
    pub fn get(&self, key: &str) -> Option<f64> {
        self.values.get(key).copied()
    }

    pub fn values(&self) -> &BTreeMap<String, f64> {
        &self.values
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }
}

impl TelemetrySink for RecordingTelemetry {
    fn put_number(&mut self, key: &str, value: f64) {
        self.values.insert(key.to_owned(), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_keeps_latest_value() {
        let mut sink = RecordingTelemetry::default();
        sink.put_number("Width", 0.5);
        sink.put_number("Width", 0.75);
        assert_eq!(sink.get("Width"), Some(0.75));
        assert_eq!(sink.values().len(), 1);
        assert_eq!(sink.get("Distance"), None);
        sink.clear();
        assert!(sink.values().is_empty());
    }

    #[test]
    fn mutable_reference_forwards() {
        fn publish<S: TelemetrySink>(mut sink: S) {
            sink.put_number("Width", 1.0);
        }
        let mut sink = RecordingTelemetry::default();
        publish(&mut sink);
        assert_eq!(sink.get("Width"), Some(1.0));
    }
}
