use std::path::{Path, PathBuf};
use std::thread;

use crossbeam_channel::{Receiver, TryRecvError, bounded};
use glam::{Quat, Vec3};

use crate::error::AssetError;
use crate::graph::{Node, SceneGraph, Transform};
use crate::material::Material;
use crate::mesh::{MeshData, Vertex};

// Styling pass applied to every lit material after import, matching the
// scene's neon look: a faint cyan glow plus a glossy metallic finish.
// Linearized #11F4FF scaled to 0.15.
const EMISSIVE_TINT: [f32; 3] = [0.00088, 0.13530, 0.15];
const METALLIC_OVERRIDE: f32 = 0.6;
const ROUGHNESS_OVERRIDE: f32 = 0.2;

/// CPU-side result of a glTF import.
pub struct LoadedScene {
    pub graph: SceneGraph,
    pub meshes: Vec<MeshData>,
    pub materials: Vec<Material>,
}

/// Background glTF loader.
///
/// `spawn` starts a worker thread; `poll` is called once per frame from the
/// render loop and returns the result exactly once when it is ready. The
/// scene keeps rendering (empty) while the load is in flight, and a failed
/// load leaves the caller's graph untouched.
pub struct AssetLoader {
    rx: Receiver<Result<LoadedScene, AssetError>>,
    done: bool,
}

impl AssetLoader {
    pub fn spawn(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let (tx, rx) = bounded(1);

        thread::Builder::new()
            .name("glowdeck-asset-loader".into())
            .spawn(move || {
                let result = load_gltf(&path);
                if let Err(e) = &result {
                    log::error!("asset load failed: {e}");
                }
                // Receiver may be gone if the app quit during the load.
                let _ = tx.send(result);
            })
            .expect("failed to spawn asset loader thread");

        Self { rx, done: false }
    }

    /// Non-blocking; returns `Some` exactly once.
    pub fn poll(&mut self) -> Option<Result<LoadedScene, AssetError>> {
        if self.done {
            return None;
        }
        match self.rx.try_recv() {
            Ok(result) => {
                self.done = true;
                Some(result)
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                self.done = true;
                Some(Err(AssetError::WorkerGone))
            }
        }
    }
}

fn load_gltf(path: &Path) -> Result<LoadedScene, AssetError> {
    let (document, buffers, _images) = gltf::import(path).map_err(|e| match e {
        gltf::Error::Io(source) => AssetError::Io {
            path: path.to_path_buf(),
            source,
        },
        other => AssetError::Gltf {
            path: path.to_path_buf(),
            source: other,
        },
    })?;

    // Meshes: one MeshData per primitive; the node conversion maps glTF
    // (mesh, primitive 0) since the tablet asset keeps one primitive per
    // mesh. Extra primitives get their own entries and synthetic nodes.
    let mut meshes: Vec<MeshData> = Vec::new();
    let mut mesh_ranges: Vec<(usize, usize)> = Vec::new(); // per glTF mesh: (start, count)

    for mesh in document.meshes() {
        let start = meshes.len();
        for prim in mesh.primitives() {
            meshes.push(convert_primitive(&prim, &buffers)?);
        }
        mesh_ranges.push((start, meshes.len() - start));
    }

    let mut materials: Vec<Material> = document
        .materials()
        .map(|m| {
            let pbr = m.pbr_metallic_roughness();
            Material::Standard {
                base_color: pbr.base_color_factor(),
                metallic: pbr.metallic_factor(),
                roughness: pbr.roughness_factor(),
                emissive: m.emissive_factor(),
            }
        })
        .collect();
    if materials.is_empty() {
        materials.push(Material::standard_default());
    }

    apply_styling(&mut materials);

    // Primitive material index, aligned with `meshes`.
    let mut prim_materials: Vec<usize> = Vec::new();
    for mesh in document.meshes() {
        for prim in mesh.primitives() {
            prim_materials.push(prim.material().index().unwrap_or(0));
        }
    }

    let mut graph = SceneGraph::new();
    let scene = document
        .default_scene()
        .or_else(|| document.scenes().next())
        .ok_or_else(|| AssetError::Unsupported("glTF file contains no scenes".into()))?;

    for gltf_node in scene.nodes() {
        convert_node(
            &gltf_node,
            None,
            &mut graph,
            &mesh_ranges,
            &prim_materials,
        );
    }

    mark_shadow_nodes(&mut graph);

    log::info!(
        "loaded {}: {} nodes, {} meshes, {} materials",
        path.display(),
        graph.len(),
        meshes.len(),
        materials.len(),
    );

    Ok(LoadedScene {
        graph,
        meshes,
        materials,
    })
}

fn convert_node(
    gltf_node: &gltf::Node<'_>,
    parent: Option<crate::graph::NodeId>,
    graph: &mut SceneGraph,
    mesh_ranges: &[(usize, usize)],
    prim_materials: &[usize],
) {
    let (t, r, s) = gltf_node.transform().decomposed();
    let transform = Transform {
        translation: Vec3::from(t),
        rotation: Quat::from_array(r),
        scale: Vec3::from(s),
    };

    let (mesh, material) = match gltf_node.mesh() {
        Some(m) => {
            let (start, _count) = mesh_ranges[m.index()];
            (Some(start), Some(prim_materials[start]))
        }
        None => (None, None),
    };

    let id = graph.add_node(
        parent,
        Node {
            name: gltf_node.name().unwrap_or_default().to_string(),
            transform,
            mesh,
            material,
            cast_shadow: false,
            receive_shadow: false,
            parent: None,
            children: Vec::new(),
        },
    );

    // Additional primitives of the same glTF mesh become unnamed children
    // so nothing silently drops.
    if let Some(m) = gltf_node.mesh() {
        let (start, count) = mesh_ranges[m.index()];
        for prim in start + 1..start + count {
            graph.add_node(
                Some(id),
                Node {
                    name: String::new(),
                    transform: Transform::IDENTITY,
                    mesh: Some(prim),
                    material: Some(prim_materials[prim]),
                    cast_shadow: false,
                    receive_shadow: false,
                    parent: None,
                    children: Vec::new(),
                },
            );
        }
    }

    for child in gltf_node.children() {
        convert_node(&child, Some(id), graph, mesh_ranges, prim_materials);
    }
}

fn convert_primitive(
    prim: &gltf::Primitive<'_>,
    buffers: &[gltf::buffer::Data],
) -> Result<MeshData, AssetError> {
    let reader = prim.reader(|buffer| buffers.get(buffer.index()).map(|b| &b.0[..]));

    let positions: Vec<[f32; 3]> = reader
        .read_positions()
        .ok_or_else(|| AssetError::Unsupported("primitive without positions".into()))?
        .collect();

    let normals: Vec<[f32; 3]> = match reader.read_normals() {
        Some(iter) => iter.collect(),
        None => vec![[0.0, 1.0, 0.0]; positions.len()],
    };

    let uvs: Vec<[f32; 2]> = match reader.read_tex_coords(0) {
        Some(iter) => iter.into_f32().collect(),
        None => vec![[0.0, 0.0]; positions.len()],
    };

    let vertices = positions
        .iter()
        .zip(normals.iter())
        .zip(uvs.iter())
        .map(|((p, n), uv)| Vertex {
            position: *p,
            normal: *n,
            uv: *uv,
        })
        .collect();

    let indices: Vec<u32> = match reader.read_indices() {
        Some(iter) => iter.into_u32().collect(),
        None => (0..positions.len() as u32).collect(),
    };

    Ok(MeshData { vertices, indices })
}

/// Post-import traversal: every mesh-bearing node both casts and receives
/// shadows. Empty grouping nodes stay out of the shadow set.
pub(crate) fn mark_shadow_nodes(graph: &mut SceneGraph) {
    let ids: Vec<_> = graph.iter_ids().collect();
    for id in ids {
        let node = graph.node_mut(id);
        if node.mesh.is_some() {
            node.cast_shadow = true;
            node.receive_shadow = true;
        }
    }
}

/// In-place neon styling of every lit material.
pub(crate) fn apply_styling(materials: &mut [Material]) {
    for mat in materials.iter_mut() {
        if let Material::Standard {
            metallic,
            roughness,
            emissive,
            ..
        } = mat
        {
            *metallic = METALLIC_OVERRIDE;
            *roughness = ROUGHNESS_OVERRIDE;
            *emissive = EMISSIVE_TINT;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn styling_touches_only_standard_materials() {
        let mut materials = vec![
            Material::Standard {
                base_color: [1.0; 4],
                metallic: 0.0,
                roughness: 1.0,
                emissive: [0.0; 3],
            },
            Material::Unlit { color: [1.0; 4] },
        ];
        apply_styling(&mut materials);

        match &materials[0] {
            Material::Standard {
                metallic,
                roughness,
                emissive,
                ..
            } => {
                assert_eq!(*metallic, METALLIC_OVERRIDE);
                assert_eq!(*roughness, ROUGHNESS_OVERRIDE);
                assert_eq!(*emissive, EMISSIVE_TINT);
            }
            _ => panic!("expected a standard material"),
        }
        assert_eq!(materials[1], Material::Unlit { color: [1.0; 4] });
    }

    #[test]
    fn mesh_nodes_gain_shadow_flags() {
        use crate::graph::leaf;

        let mut graph = SceneGraph::new();
        let root = graph.add_node(None, leaf("root"));
        let mut screen = leaf("Screen");
        screen.mesh = Some(0);
        let screen = graph.add_node(Some(root), screen);

        mark_shadow_nodes(&mut graph);

        assert!(graph.node(screen).cast_shadow);
        assert!(graph.node(screen).receive_shadow);
        assert!(!graph.node(root).cast_shadow);
        assert!(!graph.node(root).receive_shadow);
    }

    #[test]
    fn loader_reports_missing_file_once() {
        let mut loader = AssetLoader::spawn("/nonexistent/glowdeck-test.gltf");
        let result = loop {
            if let Some(r) = loader.poll() {
                break r;
            }
            std::thread::sleep(std::time::Duration::from_millis(5));
        };
        assert!(result.is_err());
        assert!(loader.poll().is_none());
    }
}
