use prometheus::{Encoder, IntCounterVec, Opts, Registry, TextEncoder};

/// Request counters exposed on `/metrics`.
#[derive(Clone)]
pub struct Metrics {
    registry: Registry,
    chat_requests: IntCounterVec,
}

impl Metrics {
    pub fn new() -> prometheus::Result<Self> {
        let registry = Registry::new();
        let chat_requests = IntCounterVec::new(
            Opts::new("chat_requests_total", "Chat requests handled, by outcome"),
            &["outcome"],
        )?;
        registry.register(Box::new(chat_requests.clone()))?;

        Ok(Self { registry, chat_requests })
    }

    pub fn record(&self, outcome: &str) {
        self.chat_requests.with_label_values(&[outcome]).inc();
    }

    #[cfg(test)]
    pub fn count(&self, outcome: &str) -> u64 {
        self.chat_requests.with_label_values(&[outcome]).get()
    }

    /// Text exposition format, with its content type.
    pub fn render(&self) -> prometheus::Result<(Vec<u8>, String)> {
        let encoder = TextEncoder::new();
        let mut buffer = vec![];
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        Ok((buffer, encoder.format_type().to_string()))
    }
}
