use async_channel::{Receiver, Sender};

use crate::map::{AnnotationLayer, MarkerId};

#[derive(Clone, Copy, Debug)]
pub enum MapEvent {
    HoverEnter(MarkerId),
    HoverExit(MarkerId),
    Click(MarkerId),
}

pub fn event_channel() -> (Sender<MapEvent>, Receiver<MapEvent>) {
    async_channel::unbounded()
}

// the single consumer of marker interactions: popup state is only ever
// mutated from one task at a time
pub async fn run_dispatch(layer: AnnotationLayer, events: Receiver<MapEvent>) {
    while let Ok(event) = events.recv().await {
        match event {
            MapEvent::HoverEnter(id) => layer.hover_enter(id).await,
            MapEvent::HoverExit(id) => layer.hover_exit(id).await,
            MapEvent::Click(id) => layer.click(id).await,
        }
    }
}

#[test]
fn dispatch_routes_events_to_the_layer() {
    use crate::entities::Coordinates;
    use crate::map::annotations::fixtures::{layer_with, place, StubGeocoder};
    use crate::map::surface::PopupStyle;
    use std::sync::Arc;
    use tokio_test::block_on;

    let (layer, surface) = layer_with(Arc::new(StubGeocoder(Coordinates { lat: 0.0, lng: 0.0 })));

    block_on(async {
        layer
            .load_attractions(vec![place(
                "one",
                Some(Coordinates {
                    lat: 40.0,
                    lng: -74.0,
                }),
            )])
            .await;

        let ids = surface.marker_ids();

        let (tx, rx) = event_channel();
        let dispatcher = tokio::spawn(run_dispatch(layer.clone(), rx));

        tx.send(MapEvent::HoverEnter(ids[0])).await.unwrap();
        tx.send(MapEvent::Click(ids[0])).await.unwrap();
        drop(tx);

        dispatcher.await.unwrap();

        assert!(!layer.hover_popup_open().await);
        assert_eq!(surface.open_popups(PopupStyle::Detail).len(), 1);
    });
}
