//! Diagnostics sink injected into the parse/layout pipeline.

use log::Level;

/// Destination for pipeline diagnostics.
pub trait LogSink {
    fn record(&mut self, level: Level, message: &str);

    fn warn(&mut self, message: &str) {
        self.record(Level::Warn, message);
    }

    fn info(&mut self, message: &str) {
        self.record(Level::Info, message);
    }

    fn debug(&mut self, message: &str) {
        self.record(Level::Debug, message);
    }
}

/// Forwards every record to the `log` facade.
#[derive(Debug, Clone, Copy)]
pub struct LogFacadeSink {
    target: &'static str,
}

impl LogFacadeSink {
    pub fn new(target: &'static str) -> Self {
        Self { target }
    }
}

impl Default for LogFacadeSink {
    fn default() -> Self {
        Self::new("cuekit")
    }
}

impl LogSink for LogFacadeSink {
    fn record(&mut self, level: Level, message: &str) {
        log::log!(target: self.target, level, "{message}");
    }
}

/// Keeps records in memory, in emission order.
#[derive(Debug, Clone, Default)]
pub struct MemoryLogSink {
    pub records: Vec<(Level, String)>,
}

impl MemoryLogSink {
    /// Messages recorded at exactly `level`.
    pub fn messages_at(&self, level: Level) -> Vec<&str> {
        self.records
            .iter()
            .filter(|(lvl, _)| *lvl == level)
            .map(|(_, msg)| msg.as_str())
            .collect()
    }
}

impl LogSink for MemoryLogSink {
    fn record(&mut self, level: Level, message: &str) {
        self.records.push((level, message.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_sink_filters_by_level() {
        let mut sink = MemoryLogSink::default();
        sink.warn("w1");
        sink.debug("d1");
        sink.warn("w2");

        assert_eq!(sink.messages_at(Level::Warn), vec!["w1", "w2"]);
        assert_eq!(sink.messages_at(Level::Debug), vec!["d1"]);
        assert!(sink.messages_at(Level::Info).is_empty());
    }
}
