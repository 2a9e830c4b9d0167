//! # Transform Hierarchy
//!
//! Parent/child transform tree stored as an arena of [`HierarchyNode`]s keyed
//! by [`NodeId`]. Each node holds its parent key and an ordered list of child
//! keys; the render objects it positions are referenced by [`ObjectId`] and
//! owned by the scene manager's object store.
//!
//! A node's global matrix is the fold of local matrices from the root down to
//! it. During rendering the global matrix is injected into the node's object
//! as its hierarchical transform, so the object's own model matrix is
//! composed underneath.
//!
//! Orbiting nodes ([`NodeKind::Orbiting`]) add a circular or elliptical orbit
//! in front of their local transform and carry their own clock. Whether they
//! also step the object they carry is decided once, when the node is created,
//! from the object's capabilities.

use std::collections::HashSet;

use crate::foundation::collections::{NodeArena, NodeId, ObjectId, ObjectStore};
use crate::foundation::math::{Mat4, Mat4Ext, Transform, Vec3};
use crate::render::backend::GraphicsBackend;
use crate::render::lighting::LightRegistry;

use super::render_object::{FrameContext, RenderObject};

/// Errors raised while editing the hierarchy
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HierarchyError {
    /// A node key does not resolve
    #[error("Unknown hierarchy node: {0:?}")]
    UnknownNode(NodeId),

    /// A node was attached to itself
    #[error("Node {0:?} cannot be its own child")]
    SelfParent(NodeId),

    /// The attachment would close a loop
    #[error("Attaching {child:?} under {parent:?} would create a cycle")]
    Cycle {
        /// Requested parent
        parent: NodeId,
        /// Requested child, an ancestor of `parent`
        child: NodeId,
    },
}

/// Orbit carried by an orbiting hierarchy node
#[derive(Debug, Clone, PartialEq)]
pub struct NodeOrbit {
    time: f32,
    /// Angular speed in radians per second
    pub speed: f32,
    /// Semi-axis along local X
    pub radius: f32,
    /// Ratio of the Z semi-axis to the X semi-axis
    pub ellipse_ratio: f32,
    /// Orbit-plane tilt in degrees, applied as Rz · Ry · Rx
    pub angles: Vec3,
    /// Centre of the orbit in parent space
    pub center: Vec3,
}

impl Default for NodeOrbit {
    fn default() -> Self {
        Self {
            time: 0.0,
            speed: 0.1,
            radius: 100.0,
            ellipse_ratio: 1.0,
            angles: Vec3::zeros(),
            center: Vec3::zeros(),
        }
    }
}

impl NodeOrbit {
    /// Builder pattern: Set speed, radius and ellipse ratio
    pub fn with_parameters(mut self, speed: f32, radius: f32, ellipse_ratio: f32) -> Self {
        self.speed = speed;
        self.radius = radius;
        self.ellipse_ratio = ellipse_ratio;
        self
    }

    /// Builder pattern: Set the orbit-plane angles in degrees
    pub fn with_angles(mut self, angles: Vec3) -> Self {
        self.angles = angles;
        self
    }

    /// Builder pattern: Set the orbit centre
    pub fn with_center(mut self, center: Vec3) -> Self {
        self.center = center;
        self
    }

    /// Seconds elapsed on this orbit
    pub fn time(&self) -> f32 {
        self.time
    }

    /// Point on the untilted orbit, always at zero height
    pub fn orbit_position(&self) -> Vec3 {
        let t = self.time * self.speed;
        Vec3::new(
            self.radius * t.cos(),
            0.0,
            self.radius * self.ellipse_ratio * t.sin(),
        )
    }

    /// `T(center) · Rz·Ry·Rx(angles) · T(orbit position)`
    fn matrix(&self) -> Mat4 {
        Mat4::identity()
            .translated(&self.center)
            .rotated_zyx(&self.angles)
            .translated(&self.orbit_position())
    }
}

/// Plain or orbiting node
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Only a local transform
    Plain,
    /// Local transform preceded by an orbit
    Orbiting {
        /// Orbit parameters and clock
        orbit: NodeOrbit,
        /// Whether `update` also steps the attached object
        forwards_update: bool,
    },
}

/// One node of the transform tree
#[derive(Debug, Clone)]
pub struct HierarchyNode {
    /// Local position, rotation (Euler degrees) and scale
    pub transform: Transform,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    object: Option<ObjectId>,
    kind: NodeKind,
}

impl HierarchyNode {
    fn new(object: Option<ObjectId>, kind: NodeKind) -> Self {
        Self {
            transform: Transform::identity(),
            parent: None,
            children: Vec::new(),
            object,
            kind,
        }
    }

    /// Local matrix, including the orbit for orbiting nodes
    pub fn local_matrix(&self) -> Mat4 {
        match &self.kind {
            NodeKind::Plain => self.transform.to_matrix(),
            NodeKind::Orbiting { orbit, .. } => orbit.matrix() * self.transform.to_matrix(),
        }
    }

    /// Parent node
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children in attachment order
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Object positioned by this node
    pub fn object(&self) -> Option<ObjectId> {
        self.object
    }

    /// Node kind
    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// Orbit, for orbiting nodes
    pub fn orbit(&self) -> Option<&NodeOrbit> {
        match &self.kind {
            NodeKind::Orbiting { orbit, .. } => Some(orbit),
            NodeKind::Plain => None,
        }
    }

    /// Mutable orbit, for orbiting nodes
    pub fn orbit_mut(&mut self) -> Option<&mut NodeOrbit> {
        match &mut self.kind {
            NodeKind::Orbiting { orbit, .. } => Some(orbit),
            NodeKind::Plain => None,
        }
    }
}

/// Arena of hierarchy nodes
#[derive(Debug, Default)]
pub struct Hierarchy {
    nodes: NodeArena<HierarchyNode>,
}

impl Hierarchy {
    /// Create an empty hierarchy
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a detached plain node
    pub fn create_node(&mut self, object: Option<ObjectId>) -> NodeId {
        self.nodes.insert(HierarchyNode::new(object, NodeKind::Plain))
    }

    /// Create a detached orbiting node
    ///
    /// `forwards_update` should be true when `object` has its own orbit clock
    /// that must advance together with the node.
    pub fn create_orbiting_node(&mut self, object: Option<ObjectId>, orbit: NodeOrbit, forwards_update: bool) -> NodeId {
        self.nodes.insert(HierarchyNode::new(
            object,
            NodeKind::Orbiting {
                orbit,
                forwards_update,
            },
        ))
    }

    /// Node by key
    pub fn node(&self, id: NodeId) -> Option<&HierarchyNode> {
        self.nodes.get(id)
    }

    /// Mutable node by key
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut HierarchyNode> {
        self.nodes.get_mut(id)
    }

    /// Number of nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether there are no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Attach `child` under `parent`, detaching it from any previous parent
    ///
    /// Re-attaching to the current parent changes nothing, in particular the
    /// child keeps its position among its siblings.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), HierarchyError> {
        if !self.nodes.contains_key(parent) {
            return Err(HierarchyError::UnknownNode(parent));
        }
        let previous = self
            .nodes
            .get(child)
            .ok_or(HierarchyError::UnknownNode(child))?
            .parent;
        if parent == child {
            return Err(HierarchyError::SelfParent(child));
        }
        if previous == Some(parent) {
            return Ok(());
        }
        if self.ancestors(parent).any(|ancestor| ancestor == child) {
            return Err(HierarchyError::Cycle { parent, child });
        }

        if let Some(old_parent) = previous {
            self.remove_child(old_parent, child);
        }
        if let Some(node) = self.nodes.get_mut(parent) {
            node.children.push(child);
        }
        if let Some(node) = self.nodes.get_mut(child) {
            node.parent = Some(parent);
        }
        Ok(())
    }

    /// Detach `child` from `parent`; returns false when it was not a child
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        let Some(node) = self.nodes.get_mut(parent) else {
            return false;
        };
        let Some(index) = node.children.iter().position(|&c| c == child) else {
            return false;
        };
        node.children.remove(index);
        if let Some(child_node) = self.nodes.get_mut(child) {
            child_node.parent = None;
        }
        true
    }

    /// Keys from the parent of `id` up to the root
    fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.nodes.get(id).and_then(|n| n.parent), move |&current| {
            self.nodes.get(current).and_then(|n| n.parent)
        })
    }

    /// Local matrix of a node
    pub fn local_matrix(&self, id: NodeId) -> Option<Mat4> {
        self.nodes.get(id).map(HierarchyNode::local_matrix)
    }

    /// Product of local matrices from the root down to `id`
    pub fn global_matrix(&self, id: NodeId) -> Option<Mat4> {
        let mut matrix = self.local_matrix(id)?;
        for ancestor in self.ancestors(id) {
            if let Some(local) = self.local_matrix(ancestor) {
                matrix = local * matrix;
            }
        }
        Some(matrix)
    }

    /// World position of a node's origin
    pub fn global_position(&self, id: NodeId) -> Option<Vec3> {
        self.global_matrix(id).map(|m| m.translation_part())
    }

    /// Advance orbit clocks depth-first starting at `root`
    ///
    /// Plain nodes never touch their object; orbiting nodes step theirs only
    /// when created with `forwards_update`.
    pub fn update(&mut self, root: NodeId, delta_time: f32, objects: &mut ObjectStore<RenderObject>) {
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            let Some(node) = self.nodes.get_mut(id) else {
                continue;
            };
            if let NodeKind::Orbiting {
                orbit,
                forwards_update,
            } = &mut node.kind
            {
                orbit.time += delta_time;
                if *forwards_update {
                    if let Some(object) = node.object.and_then(|key| objects.get_mut(key)) {
                        object.update(delta_time);
                    }
                }
            }
            stack.extend(node.children.iter().rev().copied());
        }
    }

    /// Render the subtree at `root` under `parent_transform`
    pub fn render(
        &self,
        root: NodeId,
        parent_transform: &Mat4,
        objects: &mut ObjectStore<RenderObject>,
        lights: &LightRegistry,
        backend: &mut dyn GraphicsBackend,
        frame: &FrameContext,
    ) {
        let mut stack = vec![(root, *parent_transform)];
        while let Some((id, parent)) = stack.pop() {
            let Some(node) = self.nodes.get(id) else {
                continue;
            };
            let global = parent * node.local_matrix();
            if let Some(object) = node.object.and_then(|key| objects.get_mut(key)) {
                object.set_hierarchical_transform(global);
                object.render(backend, lights, frame);
            }
            stack.extend(node.children.iter().rev().map(|&child| (child, global)));
        }
    }

    /// Objects referenced anywhere in the subtree at `root`
    pub fn collect_objects(&self, root: NodeId) -> HashSet<ObjectId> {
        let mut found = HashSet::new();
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            if let Some(node) = self.nodes.get(id) {
                found.extend(node.object);
                stack.extend(node.children.iter().copied());
            }
        }
        found
    }
}
