// SPDX-License-Identifier: MPL-2.0
//! Test utilities: float assertions and a recording sphere engine.
//!
//! `assert_abs_diff_eq` is re-exported for float comparison. The recording
//! engine logs every lifecycle call into a shared journal so tests can
//! assert on construct/destroy ordering.

pub use approx::assert_abs_diff_eq;

/// Default epsilon for f32 comparisons of values that should be exactly equal.
pub const F32_EPSILON: f32 = 1e-6;

use crate::domain::{LayerData, LayerId, MarkerData, MarkerId, Position, SphereData, SphereId};
use crate::engine::{EngineFactory, Panorama, Snapshot, SphereEngine, ViewerContainer};
use crate::error::{Error, Result};
use std::cell::RefCell;
use std::rc::Rc;

/// One entry of the engine journal.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineCall {
    Construct(u32),
    Destroy(u32),
    ChangeLayer(u32, Option<LayerId>),
    ChangeSphere(u32, Option<SphereId>),
    FocusMarker(u32, Option<MarkerId>),
    SetMarkers(u32, usize),
    Position(u32),
}

/// Shared, inspectable log of engine calls.
#[derive(Debug, Clone, Default)]
pub struct Journal(Rc<RefCell<Vec<EngineCall>>>);

impl Journal {
    pub fn calls(&self) -> Vec<EngineCall> {
        self.0.borrow().clone()
    }

    pub fn count(&self, predicate: impl Fn(&EngineCall) -> bool) -> usize {
        self.0.borrow().iter().filter(|call| predicate(call)).count()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }

    fn push(&self, call: EngineCall) {
        self.0.borrow_mut().push(call);
    }

    /// Number of constructed instances not yet destroyed.
    pub fn live_instances(&self) -> usize {
        let calls = self.0.borrow();
        let constructed = calls
            .iter()
            .filter(|c| matches!(c, EngineCall::Construct(_)))
            .count();
        let destroyed = calls
            .iter()
            .filter(|c| matches!(c, EngineCall::Destroy(_)))
            .count();
        constructed - destroyed
    }
}

/// Factory producing [`RecordingEngine`]s.
#[derive(Debug, Default)]
pub struct RecordingFactory {
    pub journal: Journal,
    /// Camera position reported by engines; `None` simulates "not ready".
    pub position: Rc<RefCell<Option<Position>>>,
    pub fail: bool,
    next_instance: RefCell<u32>,
}

impl RecordingFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// A factory whose engines always fail to construct.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn set_position(&self, position: Option<Position>) {
        *self.position.borrow_mut() = position;
    }
}

impl EngineFactory for RecordingFactory {
    fn construct(&self, _container: &ViewerContainer) -> Result<Box<dyn SphereEngine>> {
        if self.fail {
            return Err(Error::Engine("construction refused".into()));
        }
        let instance = {
            let mut next = self.next_instance.borrow_mut();
            *next += 1;
            *next
        };
        // Construct must never be observed while another instance is live.
        assert_eq!(
            self.journal.live_instances(),
            0,
            "constructing while another engine is live"
        );
        self.journal.push(EngineCall::Construct(instance));
        Ok(Box::new(RecordingEngine {
            instance,
            journal: self.journal.clone(),
            position: Rc::clone(&self.position),
            destroyed: false,
        }))
    }
}

/// Engine double that only records calls.
#[derive(Debug)]
pub struct RecordingEngine {
    instance: u32,
    journal: Journal,
    position: Rc<RefCell<Option<Position>>>,
    destroyed: bool,
}

impl SphereEngine for RecordingEngine {
    fn destroy(&mut self) {
        assert!(!self.destroyed, "engine destroyed twice");
        self.destroyed = true;
        self.journal.push(EngineCall::Destroy(self.instance));
    }

    fn position(&self) -> Option<Position> {
        assert!(!self.destroyed, "position read after destroy");
        self.journal.push(EngineCall::Position(self.instance));
        *self.position.borrow()
    }

    fn change_layer(&mut self, layer: Option<&LayerData>) {
        self.journal.push(EngineCall::ChangeLayer(
            self.instance,
            layer.map(|l| l.id.clone()),
        ));
    }

    fn change_sphere(&mut self, sphere: Option<&SphereData>) {
        self.journal.push(EngineCall::ChangeSphere(
            self.instance,
            sphere.map(|s| s.id.clone()),
        ));
    }

    fn set_markers(&mut self, markers: &[MarkerData]) {
        self.journal
            .push(EngineCall::SetMarkers(self.instance, markers.len()));
    }

    fn focus_marker(&mut self, marker: Option<&MarkerData>) {
        self.journal.push(EngineCall::FocusMarker(
            self.instance,
            marker.map(|m| m.id.clone()),
        ));
    }

    fn attach_panorama(&mut self, _sphere: &SphereId, _panorama: Panorama) -> bool {
        true
    }

    fn rotate(&mut self, _delta: Position) {}

    fn snapshot(&self) -> Option<Snapshot> {
        None
    }
}

/// Sample catalog: two layers, three spheres, three markers.
pub fn sample_layers() -> Vec<LayerData> {
    vec![
        LayerData {
            id: LayerId::new("l1"),
            name: "Ground floor".into(),
            description: "Lobby and hall".into(),
            thumbnail: None,
            map_image: Some("maps/l1.png".into()),
        },
        LayerData {
            id: LayerId::new("l2"),
            name: "Roof".into(),
            description: String::new(),
            thumbnail: None,
            map_image: None,
        },
    ]
}

pub fn sample_spheres() -> Vec<SphereData> {
    vec![
        SphereData {
            id: SphereId::new("s1"),
            layer_id: LayerId::new("l1"),
            name: "Lobby".into(),
            image: "spheres/s1.jpg".into(),
            map_position: None,
        },
        SphereData {
            id: SphereId::new("s2"),
            layer_id: LayerId::new("l1"),
            name: "Hall".into(),
            image: "spheres/s2.jpg".into(),
            map_position: None,
        },
        SphereData {
            id: SphereId::new("s3"),
            layer_id: LayerId::new("l2"),
            name: "Roof deck".into(),
            image: "spheres/s3.jpg".into(),
            map_position: None,
        },
    ]
}

pub fn sample_markers() -> Vec<MarkerData> {
    vec![
        MarkerData {
            id: MarkerId::new("m1"),
            sphere_id: SphereId::new("s1"),
            name: "Reception".into(),
            description: "Front desk".into(),
            image_url: Some("markers/m1.jpg".into()),
            yaw: 10.0,
            pitch: 0.0,
        },
        MarkerData {
            id: MarkerId::new("m2"),
            sphere_id: SphereId::new("s1"),
            name: "Fire panel".into(),
            description: "Alarm control".into(),
            image_url: Some("markers/m2.jpg".into()),
            yaw: -60.0,
            pitch: 5.0,
        },
        MarkerData {
            id: MarkerId::new("m3"),
            sphere_id: SphereId::new("s3"),
            name: "Antenna".into(),
            description: String::new(),
            image_url: None,
            yaw: 120.0,
            pitch: 30.0,
        },
    ]
}
