pub mod recorded_detection_source;
pub mod throttled_detection_source;
