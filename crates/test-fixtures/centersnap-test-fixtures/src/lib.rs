use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde::Deserialize;

mod row_layout;

pub use row_layout::{HostCall, RowLayout};

static MANIFEST: Lazy<Manifest> = Lazy::new(|| {
    let raw = include_str!("../../../../fixtures/manifest.json");
    serde_json::from_str(raw).expect("fixtures manifest should parse")
});

#[derive(Debug, Deserialize)]
struct Manifest {
    layouts: HashMap<String, String>,
    configs: HashMap<String, String>,
}

fn fixtures_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../../fixtures")
}

fn resolve_path(rel: &str) -> PathBuf {
    fixtures_root().join(rel)
}

fn read_to_string(rel: &str) -> Result<String> {
    let path = resolve_path(rel);
    fs::read_to_string(&path)
        .with_context(|| format!("failed to read fixture at {}", path.display()))
}

fn load_json<T: DeserializeOwned>(rel: &str) -> Result<T> {
    let text = read_to_string(rel)?;
    serde_json::from_str(&text).with_context(|| format!("failed to parse JSON fixture {rel}"))
}

fn lookup<'a, T>(map: &'a HashMap<String, T>, kind: &str, name: &str) -> Result<&'a T> {
    map.get(name)
        .ok_or_else(|| anyhow!("unknown {kind} fixture '{name}'"))
}

/// Row of items as described by a layout fixture.
#[derive(Debug, Clone, Deserialize)]
pub struct LayoutFixture {
    pub viewport_width: f32,
    #[serde(default)]
    pub spacing: f32,
    pub items: Vec<centersnap_core::Size>,
}

pub mod layouts {
    use super::*;

    pub fn keys() -> Vec<String> {
        MANIFEST.layouts.keys().cloned().collect()
    }

    pub fn fixture(name: &str) -> Result<LayoutFixture> {
        let rel = lookup(&MANIFEST.layouts, "layout", name)?;
        super::load_json(rel)
    }

    /// In-memory host laid out per the named fixture.
    pub fn host(name: &str) -> Result<RowLayout> {
        let fx = fixture(name)?;
        Ok(RowLayout::new(fx.viewport_width)
            .with_spacing(fx.spacing)
            .with_items(&fx.items))
    }
}

pub mod configs {
    use super::*;

    pub fn keys() -> Vec<String> {
        MANIFEST.configs.keys().cloned().collect()
    }

    pub fn json(name: &str) -> Result<String> {
        let rel = lookup(&MANIFEST.configs, "config", name)?;
        read_to_string(rel)
    }
}
