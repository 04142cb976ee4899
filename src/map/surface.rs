use uuid::Uuid;

use crate::entities::{Coordinates, RoutePath};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MarkerId(Uuid);

impl MarkerId {
    pub fn new() -> Self {
        MarkerId(Uuid::new_v4())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PopupId(Uuid);

impl PopupId {
    pub fn new() -> Self {
        PopupId(Uuid::new_v4())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PinStyle {
    Attraction,
    UserLocation,
}

#[derive(Clone, Debug)]
pub struct MarkerPin {
    pub position: Coordinates,
    pub title: String,
    pub style: PinStyle,
}

// hover popups are ephemeral and must not pan the map; detail popups stay
// open until explicitly closed
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PopupStyle {
    Hover,
    Detail,
}

// what the crate needs from a map rendering backend; a production
// implementation wraps the vendor map SDK
pub trait MapSurface {
    fn place_marker(&self, pin: MarkerPin) -> MarkerId;
    fn remove_marker(&self, id: MarkerId);
    fn open_popup(&self, anchor: MarkerId, style: PopupStyle, content: String) -> PopupId;
    fn close_popup(&self, id: PopupId);
    fn draw_route(&self, path: &RoutePath);
    fn clear_route(&self);
    fn center_on(&self, position: Coordinates, zoom: u8);
}

// headless backend that narrates every draw call through tracing
pub struct LogSurface;

impl MapSurface for LogSurface {
    fn place_marker(&self, pin: MarkerPin) -> MarkerId {
        let id = MarkerId::new();
        tracing::info!(
            "placing {:?} marker {:?} for {:?} at ({}, {})",
            pin.style,
            id,
            pin.title,
            pin.position.lat,
            pin.position.lng
        );
        id
    }

    fn remove_marker(&self, id: MarkerId) {
        tracing::info!("removing marker {:?}", id);
    }

    fn open_popup(&self, anchor: MarkerId, style: PopupStyle, content: String) -> PopupId {
        let id = PopupId::new();
        tracing::info!(
            "opening {:?} popup {:?} on marker {:?} ({} bytes of markup)",
            style,
            id,
            anchor,
            content.len()
        );
        id
    }

    fn close_popup(&self, id: PopupId) {
        tracing::info!("closing popup {:?}", id);
    }

    fn draw_route(&self, path: &RoutePath) {
        tracing::info!(
            "drawing route {:?} with {} points",
            path.summary,
            path.polyline.0.len()
        );
    }

    fn clear_route(&self) {
        tracing::info!("clearing route");
    }

    fn center_on(&self, position: Coordinates, zoom: u8) {
        tracing::info!(
            "centering map on ({}, {}) at zoom {}",
            position.lat,
            position.lng,
            zoom
        );
    }
}
