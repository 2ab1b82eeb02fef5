//! Interpretation of parsed dumps for the two consumer shapes UModel
//! produces: mesh property dumps (material slot references) and material
//! property dumps (texture parameter bindings and base property
//! overrides). The walks skip entries that don't carry the expected shape
//! instead of erroring, because real dumps routinely hold unused or null
//! slots.

use indexmap::IndexMap;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::ast::{Document, PathValue, Scalar, Value};

static ENUM_WORD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*([A-Za-z_][A-Za-z0-9_]*)").unwrap());

/// Material-level render settings from a `BasePropertyOverrides` block.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct BasePropertyOverrides {
    /// Engine blend mode word, e.g. `BLEND_Masked`.
    pub blend_mode: Option<String>,
    pub two_sided: Option<bool>,
    pub opacity_mask_clip_value: Option<f64>,
}

/// Material paths referenced by a mesh dump's `Materials` slots, in slot
/// order.
pub fn mesh_material_paths(doc: &Document) -> Vec<String> {
    let mut paths = Vec::new();

    for def in doc.get_all("Materials") {
        match &def.value {
            Value::Block(children) => {
                for child in children {
                    match &child.value {
                        Value::Path(p) => paths.push(p.target.clone()),
                        _ => debug!("Materials slot '{}' holds no path, skipping", child.name),
                    }
                }
            }
            Value::Path(p) => paths.push(p.target.clone()),
            _ => debug!("Materials entry holds no block, skipping"),
        }
    }

    paths
}

/// Texture bindings from a material dump's `TextureParameterValues`
/// entries: parameter name (`Diffuse`, `Normal`, ...) to the referenced
/// texture path, in declaration order. Entries whose `ParameterValue`
/// holds no path are unused slots and are skipped.
pub fn material_texture_bindings(doc: &Document) -> IndexMap<String, String> {
    let mut bindings = IndexMap::new();

    for def in doc.get_all("TextureParameterValues") {
        let Some(entries) = def.value.as_block() else {
            debug!("TextureParameterValues entry holds no block, skipping");
            continue;
        };

        for entry in entries {
            let Some(fields) = entry.value.as_block() else {
                continue;
            };

            let Some(target) = fields
                .iter()
                .find(|d| d.name == "ParameterValue")
                .and_then(|d| d.value.as_path())
                .map(|p| p.target.clone())
            else {
                debug!("texture parameter '{}' holds no path, skipping", entry.name);
                continue;
            };

            let Some(name) = fields
                .iter()
                .find(|d| d.name == "ParameterInfo")
                .and_then(|d| d.value.as_block())
                .and_then(|info| info.iter().find(|d| d.name == "Name"))
                .and_then(|d| d.value.as_scalar())
                .and_then(|s| s.as_text())
            else {
                debug!("texture parameter '{}' carries no name, skipping", entry.name);
                continue;
            };

            bindings.insert(name.trim().to_string(), target);
        }
    }

    bindings
}

/// The `BasePropertyOverrides` block of a material dump, or `None` when
/// the dump has none. Unknown keys inside the block are ignored.
pub fn base_property_overrides(doc: &Document) -> Option<BasePropertyOverrides> {
    let block = doc.get("BasePropertyOverrides")?.value.as_block()?;
    let mut overrides = BasePropertyOverrides::default();

    for def in block {
        let Value::Scalar(scalar) = &def.value else {
            continue;
        };
        match def.name.as_str() {
            "BlendMode" => overrides.blend_mode = enum_word(scalar),
            "TwoSided" => overrides.two_sided = scalar.as_bool(),
            "OpacityMaskClipValue" => overrides.opacity_mask_clip_value = scalar.as_f64(),
            _ => {}
        }
    }

    Some(overrides)
}

/// `BLEND_Masked (1)` reaches the tree as a call or as one bare string
/// depending on dialect; consumers only ever match on the enum word.
fn enum_word(scalar: &Scalar) -> Option<String> {
    match scalar {
        Scalar::Call { name, .. } => Some(name.clone()),
        Scalar::Word(w) => ENUM_WORD_RE.captures(w).map(|c| c[1].to_string()),
        Scalar::Str(lit) => ENUM_WORD_RE.captures(&lit.text).map(|c| c[1].to_string()),
        _ => None,
    }
}

/// Object paths end with a period and the object's own name
/// (`/Game/Meshes/Rock01.Rock01`); the part before the first period is
/// the package path UModel mirrors on disk.
pub fn split_object_path(object_path: &str) -> &str {
    object_path
        .split_once('.')
        .map_or(object_path, |(package, _)| package)
}

impl PathValue {
    /// Package part of the target, without the trailing object name.
    pub fn package(&self) -> &str {
        split_object_path(&self.target)
    }

    /// Object name after the period, when the target carries one.
    pub fn object_name(&self) -> Option<&str> {
        self.target.split_once('.').map(|(_, object)| object)
    }
}

// -- Tests --

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Parser;

    fn parse(input: &str) -> Document {
        let mut parser = Parser::new(input).expect("Failed to create parser");
        parser.parse_document().expect("Failed to parse document")
    }

    #[test]
    fn test_mesh_material_paths() {
        let doc = parse(
            r#"
Materials[2] =
{
    Material0 = MaterialInstanceConstant'/Game/Env/MI_Rock_A.MI_Rock_A',
    Material1 = Material'/Game/Env/M_Rock_Base.M_Rock_Base'
}
NumFaces = 420
"#,
        );

        assert_eq!(
            mesh_material_paths(&doc),
            vec![
                "/Game/Env/MI_Rock_A.MI_Rock_A".to_string(),
                "/Game/Env/M_Rock_Base.M_Rock_Base".to_string(),
            ]
        );
    }

    #[test]
    fn test_texture_bindings_skip_unused_slots() {
        let doc = parse(
            r#"
TextureParameterValues[2] =
{
    TextureParameterValues[0] =
    {
        ParameterInfo = { Name = Diffuse, Association = GlobalParameter, Index = -1 },
        ParameterValue = Texture2D'/Game/Tex/T_Rock_D.T_Rock_D',
        ExpressionGUID = 11112222
    },
    TextureParameterValues[1] =
    {
        ParameterInfo = { Name = Normal, Association = GlobalParameter, Index = -1 },
        ParameterValue = None,
        ExpressionGUID = 33334444
    }
}
"#,
        );

        let bindings = material_texture_bindings(&doc);
        assert_eq!(bindings.len(), 1);
        assert_eq!(bindings["Diffuse"], "/Game/Tex/T_Rock_D.T_Rock_D");
    }

    #[test]
    fn test_base_property_overrides() {
        let doc = parse(
            r#"
BasePropertyOverrides =
{
    BlendMode = BLEND_Masked (1),
    TwoSided = true,
    OpacityMaskClipValue = 0.333
}
"#,
        );

        let overrides = base_property_overrides(&doc).expect("block should be present");
        assert_eq!(overrides.blend_mode.as_deref(), Some("BLEND_Masked"));
        assert_eq!(overrides.two_sided, Some(true));
        assert_eq!(overrides.opacity_mask_clip_value, Some(0.333));
    }

    #[test]
    fn test_base_property_overrides_absent() {
        let doc = parse("TwoSided = true\n");
        assert!(base_property_overrides(&doc).is_none());
    }

    #[test]
    fn test_split_object_path() {
        assert_eq!(split_object_path("/Game/Meshes/Rock01.Rock01"), "/Game/Meshes/Rock01");
        assert_eq!(split_object_path("/Game/Meshes/Rock01"), "/Game/Meshes/Rock01");

        let path = PathValue {
            class: "StaticMesh".into(),
            target: "/Game/Meshes/Rock01.Rock01".into(),
        };
        assert_eq!(path.package(), "/Game/Meshes/Rock01");
        assert_eq!(path.object_name(), Some("Rock01"));
    }
}
