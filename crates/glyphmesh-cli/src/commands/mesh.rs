// this_file: crates/glyphmesh-cli/src/commands/mesh.rs

//! Mesh command implementation
//!
//! Lays out a line of text and serializes the resulting buffers as JSON.

use std::fs;

use anyhow::{Context, Result};
use glyphmesh::{Color, GlyphVertex, TextMesh};
use log::info;
use serde::Serialize;

use super::load_font;
use crate::cli::MeshArgs;

/// Version of the JSON document layout written by this command.
pub const JSON_SCHEMA_VERSION: &str = "1.0";

#[derive(Debug, Serialize)]
struct MeshDocument<'a> {
    schema_version: &'static str,
    text: &'a str,
    /// Multiplier applied to font units.
    scale: f32,
    advance: f32,
    triangles: usize,
    vertices: Vec<VertexRecord>,
    indices: &'a [u32],
}

#[derive(Debug, Serialize)]
struct VertexRecord {
    x: f32,
    y: f32,
    z: f32,
    u: f32,
    v: f32,
    rgba: [u8; 4],
    curve: i16,
    side: i16,
}

impl VertexRecord {
    fn scaled(vertex: &GlyphVertex, scale: f32) -> Self {
        let [x, y, z] = vertex.position;
        let [u, v] = vertex.texcoord;
        let c = vertex.color;
        Self {
            x: x * scale,
            y: y * scale,
            z,
            u,
            v,
            rgba: [c.r, c.g, c.b, c.a],
            curve: vertex.curve,
            side: vertex.side,
        }
    }
}

fn document<'a>(text: &'a str, mesh: &'a TextMesh, scale: f32) -> MeshDocument<'a> {
    MeshDocument {
        schema_version: JSON_SCHEMA_VERSION,
        text,
        scale,
        advance: mesh.advance * scale,
        triangles: mesh.triangle_count(),
        vertices: mesh.vertices.iter().map(|v| VertexRecord::scaled(v, scale)).collect(),
        indices: &mesh.indices,
    }
}

pub fn run(args: &MeshArgs) -> Result<()> {
    let font = load_font(&args.font)?;
    let scale = args.size.map_or(1.0, |px| font.scale_for_size(px));
    let mesh = font.text_mesh(&args.text, Color::black());

    let doc = document(&args.text, &mesh, scale);
    let json = if args.compact {
        serde_json::to_string(&doc)?
    } else {
        serde_json::to_string_pretty(&doc)?
    };

    match &args.output {
        Some(path) => {
            fs::write(path, json)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!(
                "Wrote {} triangles for {:?} to {}",
                mesh.triangle_count(),
                args.text,
                path.display()
            );
        },
        None => println!("{json}"),
    }

    Ok(())
}
