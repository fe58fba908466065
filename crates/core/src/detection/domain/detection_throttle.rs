use std::time::Duration;

/// Minimum-interval gate between detection events.
///
/// A timestamp is admitted when it is the first one seen or when at least
/// `interval` has elapsed since the last admitted timestamp. Anything older
/// than the last admitted timestamp is dropped.
#[derive(Debug, Clone)]
pub struct DetectionThrottle {
    interval_ms: u64,
    last_admitted: Option<u64>,
}

impl DetectionThrottle {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval_ms: interval.as_millis() as u64,
            last_admitted: None,
        }
    }

    pub fn admit(&mut self, timestamp_ms: u64) -> bool {
        let admitted = match self.last_admitted {
            None => true,
            Some(last) => timestamp_ms >= last && timestamp_ms - last >= self.interval_ms,
        };
        if admitted {
            self.last_admitted = Some(timestamp_ms);
        }
        admitted
    }

    pub fn reset(&mut self) {
        self.last_admitted = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_first_timestamp_always_admitted() {
        let mut throttle = DetectionThrottle::new(Duration::from_millis(100));
        assert!(throttle.admit(12_345));
    }

    #[rstest]
    #[case::too_soon(50, false)]
    #[case::exactly_interval(100, true)]
    #[case::after_interval(180, true)]
    fn test_second_timestamp(#[case] second: u64, #[case] expected: bool) {
        let mut throttle = DetectionThrottle::new(Duration::from_millis(100));
        throttle.admit(0);
        assert_eq!(throttle.admit(second), expected);
    }

    #[test]
    fn test_interval_measured_from_last_admitted() {
        let mut throttle = DetectionThrottle::new(Duration::from_millis(100));
        assert!(throttle.admit(0));
        assert!(!throttle.admit(60)); // dropped, does not move the window
        assert!(throttle.admit(100));
        assert!(!throttle.admit(150));
        assert!(throttle.admit(200));
    }

    #[test]
    fn test_zero_interval_admits_everything() {
        let mut throttle = DetectionThrottle::new(Duration::ZERO);
        assert!(throttle.admit(0));
        assert!(throttle.admit(0));
        assert!(throttle.admit(1));
    }

    #[test]
    fn test_out_of_order_timestamp_dropped() {
        let mut throttle = DetectionThrottle::new(Duration::ZERO);
        assert!(throttle.admit(500));
        assert!(!throttle.admit(400));
    }

    #[test]
    fn test_reset_readmits() {
        let mut throttle = DetectionThrottle::new(Duration::from_millis(100));
        throttle.admit(0);
        throttle.reset();
        assert!(throttle.admit(10));
    }
}
