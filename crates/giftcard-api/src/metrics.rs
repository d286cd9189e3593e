//! Prometheus metrics for the HTTP server
//!
//! - `giftcard_cards_generated_total` (counter) - cards generated, by product
//! - `giftcard_validations_total` (counter) - validations, by product and result
//! - `giftcard_request_errors_total` (counter) - rejected requests, by error code

use prometheus::{Encoder, IntCounterVec, Opts, Registry, TextEncoder};

/// Counters recorded by the route handlers
pub struct CardMetrics {
    registry: Registry,
    cards_generated: IntCounterVec,
    validations: IntCounterVec,
    request_errors: IntCounterVec,
}

impl CardMetrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let cards_generated = IntCounterVec::new(
            Opts::new("giftcard_cards_generated_total", "Total cards generated"),
            &["card_name"],
        )?;
        let validations = IntCounterVec::new(
            Opts::new("giftcard_validations_total", "Total card validations"),
            &["card_name", "result"],
        )?;
        let request_errors = IntCounterVec::new(
            Opts::new("giftcard_request_errors_total", "Total rejected requests"),
            &["code"],
        )?;

        registry.register(Box::new(cards_generated.clone()))?;
        registry.register(Box::new(validations.clone()))?;
        registry.register(Box::new(request_errors.clone()))?;

        Ok(Self {
            registry,
            cards_generated,
            validations,
            request_errors,
        })
    }

    pub fn record_generated(&self, card_name: &str, count: usize) {
        self.cards_generated
            .with_label_values(&[card_name])
            .inc_by(count as u64);
    }

    pub fn record_validation(&self, card_name: &str, valid: bool) {
        let result = if valid { "valid" } else { "invalid" };
        self.validations
            .with_label_values(&[card_name, result])
            .inc();
    }

    pub fn record_error(&self, code: &str) {
        self.request_errors.with_label_values(&[code]).inc();
    }

    /// Text exposition of every registered metric
    pub fn render(&self) -> Result<String, prometheus::Error> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_render() {
        let metrics = CardMetrics::new().unwrap();
        metrics.record_generated("Costco Shop Card", 5);
        metrics.record_validation("Costco Shop Card", true);
        metrics.record_validation("Costco Shop Card", false);
        metrics.record_error("NOT_FOUND");

        let text = metrics.render().unwrap();
        assert!(text.contains("giftcard_cards_generated_total{card_name=\"Costco Shop Card\"} 5"));
        assert!(text.contains("result=\"invalid\""));
        assert!(text.contains("giftcard_request_errors_total{code=\"NOT_FOUND\"} 1"));
    }
}
