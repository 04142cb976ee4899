mod annotations;
mod events;
mod surface;

pub use annotations::AnnotationLayer;
pub use events::{event_channel, run_dispatch, MapEvent};
pub use surface::{LogSurface, MapSurface, MarkerId, MarkerPin, PinStyle, PopupId, PopupStyle};
