use crate::overlay::domain::overlay_state::OverlayState;

/// Draws the overlay for each new state, in the order states are produced.
pub trait OverlayRenderer: Send {
    fn render(
        &mut self,
        timestamp_ms: u64,
        state: &OverlayState,
    ) -> Result<(), Box<dyn std::error::Error>>;
}
