use glam::{Mat4, Quat, Vec3};

/// Handle into a [`SceneGraph`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) u32);

/// Local TRS transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Transform {
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// One node of the graph. Indices refer into the sibling mesh/material
/// arrays carried by the loaded scene.
#[derive(Debug, Clone)]
pub struct Node {
    pub name: String,
    pub transform: Transform,
    pub mesh: Option<usize>,
    pub material: Option<usize>,
    /// Shadow participation; the loader marks every mesh-bearing node after
    /// import.
    pub cast_shadow: bool,
    pub receive_shadow: bool,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

/// Flat arena of nodes with parent/child links.
///
/// Nodes are never removed, so `NodeId`s stay valid for the graph's
/// lifetime.
#[derive(Debug, Default)]
pub struct SceneGraph {
    nodes: Vec<Node>,
    roots: Vec<NodeId>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn add_node(&mut self, parent: Option<NodeId>, mut node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        node.parent = parent;
        node.children = Vec::new();
        self.nodes.push(node);
        match parent {
            Some(p) => self.nodes[p.0 as usize].children.push(id),
            None => self.roots.push(id),
        }
        id
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0 as usize]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0 as usize]
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0 as usize].children
    }

    /// Composed local-to-world matrix, walking up through the parents.
    pub fn world_transform(&self, id: NodeId) -> Mat4 {
        let node = self.node(id);
        let local = node.transform.matrix();
        match node.parent {
            Some(p) => self.world_transform(p) * local,
            None => local,
        }
    }

    /// Depth-first search for the first node with the given name.
    pub fn find_by_name(&self, name: &str) -> Option<NodeId> {
        fn dfs(graph: &SceneGraph, id: NodeId, name: &str) -> Option<NodeId> {
            if graph.node(id).name == name {
                return Some(id);
            }
            for &child in graph.children(id) {
                if let Some(found) = dfs(graph, child, name) {
                    return Some(found);
                }
            }
            None
        }
        self.roots.iter().find_map(|&root| dfs(self, root, name))
    }

    /// All node ids in arena order.
    pub fn iter_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len() as u32).map(NodeId)
    }
}

pub fn leaf(name: impl Into<String>) -> Node {
    Node {
        name: name.into(),
        transform: Transform::IDENTITY,
        mesh: None,
        material: None,
        cast_shadow: false,
        receive_shadow: false,
        parent: None,
        children: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn world_transform_composes_down_the_chain() {
        let mut graph = SceneGraph::new();
        let mut root_node = leaf("root");
        root_node.transform.translation = Vec3::new(1.0, 0.0, 0.0);
        let root = graph.add_node(None, root_node);

        let mut child_node = leaf("child");
        child_node.transform.translation = Vec3::new(0.0, 2.0, 0.0);
        let child = graph.add_node(Some(root), child_node);

        let world = graph.world_transform(child);
        let origin = world.transform_point3(Vec3::ZERO);
        assert!((origin - Vec3::new(1.0, 2.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn parent_scale_applies_to_children() {
        let mut graph = SceneGraph::new();
        let mut root_node = leaf("root");
        root_node.transform.scale = Vec3::splat(2.0);
        let root = graph.add_node(None, root_node);

        let mut child_node = leaf("child");
        child_node.transform.translation = Vec3::new(1.0, 0.0, 0.0);
        let child = graph.add_node(Some(root), child_node);

        let origin = graph.world_transform(child).transform_point3(Vec3::ZERO);
        assert!((origin - Vec3::new(2.0, 0.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn find_by_name_is_depth_first() {
        let mut graph = SceneGraph::new();
        let root = graph.add_node(None, leaf("root"));
        let a = graph.add_node(Some(root), leaf("a"));
        let screen_under_a = graph.add_node(Some(a), leaf("Screen"));
        let b = graph.add_node(Some(root), leaf("b"));
        graph.add_node(Some(b), leaf("Screen"));

        assert_eq!(graph.find_by_name("Screen"), Some(screen_under_a));
        assert_eq!(graph.find_by_name("missing"), None);
    }
}
