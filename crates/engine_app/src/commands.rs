//! Subcommand implementations.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, ensure};
use engine_component::{
    AnyComponent, Camera, Light, LightKind, Mesh, MeshRenderer, ObjectKey, RigidBody, Script,
    Services,
};
use engine_io::{StreamReader, StreamWriter};
use engine_object::{GameObject, LoadOptions, LoadReport, ObjectRegistry};
use engine_resource::{RgbaImporter, Texture};
use glam::{Vec3, Vec4};
use serde::Serialize;
use tracing::{info, warn};

use crate::cli::Command;

/// Dispatch a parsed subcommand.
pub fn run(command: Command) -> Result<()> {
    match command {
        Command::Demo { out } => demo(&out),
        Command::Inspect { file, strict } => {
            let json = inspect(&file, strict)?;
            println!("{json}");
            Ok(())
        }
        Command::Roundtrip { file, out } => roundtrip(&file, out.as_deref()),
        Command::Texture { image, out } => texture(&image, out).map(|_| ()),
    }
}

/// JSON view of a loaded object.
#[derive(Debug, Serialize)]
struct ObjectSummary<'a> {
    id: String,
    name: &'a str,
    active: bool,
    visible_in_hierarchy: bool,
    components: Vec<&'a AnyComponent>,
    skipped: &'a [String],
}

impl<'a> ObjectSummary<'a> {
    fn new(object: &'a GameObject, report: &'a LoadReport) -> Self {
        Self {
            id: object.id().to_string(),
            name: object.name(),
            active: object.is_active(),
            visible_in_hierarchy: object.is_visible_in_hierarchy(),
            components: object.components().collect(),
            skipped: &report.skipped,
        }
    }
}

fn demo(out: &Path) -> Result<()> {
    let mut registry = ObjectRegistry::new();
    let key = registry.spawn(Services::headless());
    let object = registry
        .get_mut(key)
        .context("freshly spawned object is missing")?;

    object.set_name("Demo");
    object.transform_mut().position = Vec3::new(1.0, 2.0, 3.0);
    object.add_component::<Camera>().fov_degrees = 60.0;

    let light = object.add_component::<Light>();
    light.kind = LightKind::Point;
    light.color = Vec4::new(1.0, 0.9, 0.8, 1.0);
    light.range = 25.0;

    let mesh = object.add_component::<Mesh>();
    mesh.mesh_id = "cube".into();
    mesh.name = "Cube".into();
    mesh.vertex_count = 24;
    mesh.index_count = 36;
    object.add_component::<MeshRenderer>().material_id = "default".into();
    object.add_component::<RigidBody>().mass = 2.5;
    *object.add_component::<Script>() = Script::new("scripts/spin.lua");

    registry
        .save_to_file(key, out)
        .with_context(|| format!("failed to save {}", out.display()))?;
    info!(path = %out.display(), "demo object saved");
    Ok(())
}

fn load(file: &Path, options: &LoadOptions) -> Result<(ObjectRegistry, ObjectKey, LoadReport)> {
    let mut registry = ObjectRegistry::new();
    let (key, report) = registry
        .load_from_file(file, Services::headless(), options)
        .with_context(|| format!("failed to load {}", file.display()))?;
    for tag in &report.skipped {
        warn!(path = %file.display(), tag = %tag, "component tag not recognised");
    }
    Ok((registry, key, report))
}

fn inspect(file: &Path, strict: bool) -> Result<String> {
    let options = if strict {
        LoadOptions::strict()
    } else {
        LoadOptions::default()
    };
    let (registry, key, report) = load(file, &options)?;
    let object = registry.get(key).context("loaded object is missing")?;
    let json = serde_json::to_string_pretty(&ObjectSummary::new(object, &report))?;
    Ok(json)
}

fn roundtrip(file: &Path, out: Option<&Path>) -> Result<()> {
    let original = fs::read(file).with_context(|| format!("failed to read {}", file.display()))?;

    let mut registry = ObjectRegistry::new();
    let (key, report) = registry
        .load_object(
            &mut StreamReader::new(&original),
            Services::headless(),
            &LoadOptions::default(),
        )
        .with_context(|| format!("failed to load {}", file.display()))?;

    let mut w = StreamWriter::new();
    registry.save_object(key, &mut w)?;
    if let Some(out) = out {
        fs::write(out, w.as_bytes()).with_context(|| format!("failed to write {}", out.display()))?;
    }

    ensure!(
        report.is_complete(),
        "{} unknown component(s) were dropped: {:?}",
        report.skipped.len(),
        report.skipped
    );
    ensure!(
        w.as_bytes() == original.as_slice(),
        "re-saved stream differs ({} bytes, originally {})",
        w.len(),
        original.len()
    );
    info!(path = %file.display(), bytes = w.len(), "round trip is bit-identical");
    Ok(())
}

fn texture(image: &Path, out: Option<PathBuf>) -> Result<PathBuf> {
    let mut texture = Texture::new();
    texture
        .load_from_file(image, &RgbaImporter)
        .with_context(|| format!("failed to import {}", image.display()))?;

    let out = out.unwrap_or_else(|| PathBuf::from(texture.resource_path()));
    texture.set_resource_path(&out);
    texture
        .save_to_file(&out)
        .with_context(|| format!("failed to save {}", out.display()))?;
    info!(
        path = %out.display(),
        width = texture.width(),
        height = texture.height(),
        "texture saved"
    );
    Ok(out)
}

#[cfg(test)]
mod tests {
    use engine_component::ObjectId;

    use super::*;

    fn scratch_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("engine-app-{}", ObjectId::generate()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_demo_round_trips() {
        let dir = scratch_dir();
        let path = dir.join("demo.object");
        demo(&path).unwrap();

        let resaved = dir.join("resaved.object");
        roundtrip(&path, Some(&resaved)).unwrap();
        assert_eq!(fs::read(&path).unwrap(), fs::read(&resaved).unwrap());

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_inspect_prints_components() {
        let dir = scratch_dir();
        let path = dir.join("demo.object");
        demo(&path).unwrap();

        let json: serde_json::Value = serde_json::from_str(&inspect(&path, true).unwrap()).unwrap();
        assert_eq!(json["name"], "Demo");
        assert_eq!(json["components"].as_array().unwrap().len(), 7);
        assert_eq!(json["components"][0]["Camera"]["fov_degrees"], 60.0);
        assert!(json["skipped"].as_array().unwrap().is_empty());

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_roundtrip_rejects_garbage() {
        let dir = scratch_dir();
        let path = dir.join("garbage.object");
        fs::write(&path, [1, 2, 3]).unwrap();
        assert!(roundtrip(&path, None).is_err());
        fs::remove_dir_all(&dir).unwrap();
    }
}
