use super::*;
use crate::ast::{ArrayState, PathValue};

const MATERIAL_DUMP: &str = r#"
Parent = MaterialInstanceConstant'/Game/Base/MI_Master.MI_Master'
BasePropertyOverrides =
{
    BlendMode = BLEND_Masked (1),
    TwoSided = true,
    OpacityMaskClipValue = 0.333
}
Position = { X = 1.5, Y = -2, Z = 0 }
Tags = {}
LodDistances = { 100, 250.5, 800 }
Name = "MI_Rock"
"#;

fn tree() -> PropsTree {
    PropsTree::from_str(MATERIAL_DUMP).expect("Failed to parse dump")
}

#[test]
fn test_typed_get_with_dotted_paths() {
    let props = tree();

    let x: f64 = props.get("Position.X").unwrap();
    assert_eq!(x, 1.5);

    let y: i64 = props.get("Position.Y").unwrap();
    assert_eq!(y, -2);

    let two_sided: bool = props.get("BasePropertyOverrides.TwoSided").unwrap();
    assert!(two_sided);

    let name: String = props.get("Name").unwrap();
    assert_eq!(name, "MI_Rock");

    let parent: PathValue = props.get("Parent").unwrap();
    assert_eq!(parent.class, "MaterialInstanceConstant");
    assert_eq!(parent.package(), "/Game/Base/MI_Master");
}

#[test]
fn test_get_optional_and_default() {
    let props = tree();

    let missing: Option<f64> = props.get_optional("Position.W").unwrap();
    assert!(missing.is_none());

    let clip = props.get_or("BasePropertyOverrides.OpacityMaskClipValue", 0.5f64);
    assert_eq!(clip, 0.333);

    let fallback = props.get_or("BasePropertyOverrides.Missing", 0.5f64);
    assert_eq!(fallback, 0.5);
}

#[test]
fn test_type_mismatch_reports_source_line() {
    let props = tree();

    let err = props.get::<bool>("Name").unwrap_err();
    match err {
        PropsError::TypeError { line, message, .. } => {
            assert!(line > 0, "expected a source line, got {}", line);
            assert!(message.contains("Name ="), "missing snippet in: {}", message);
        }
        other => panic!("Expected type error, got {:?}", other),
    }
}

#[test]
fn test_list_conversions() {
    let props = tree();

    let distances: Vec<f64> = props.get("LodDistances").unwrap();
    assert_eq!(distances, vec![100.0, 250.5, 800.0]);

    // Empty-but-present converts to an empty Vec...
    let tags: Vec<String> = props.get("Tags").unwrap();
    assert!(tags.is_empty());

    // ...while the tri-state stays observable through array_state.
    assert_eq!(props.array_state("Tags"), ArrayState::Empty);
    assert_eq!(props.array_state("LodDistances"), ArrayState::Populated(3));
    assert_eq!(props.array_state("Nope"), ArrayState::Absent);
    assert_eq!(props.array_state("Position"), ArrayState::Populated(3));
}

#[test]
fn test_keys_and_has() {
    let props = tree();

    assert_eq!(props.keys("Position").unwrap(), vec!["X", "Y", "Z"]);
    assert!(props.has("BasePropertyOverrides.BlendMode"));
    assert!(!props.has("BasePropertyOverrides.Missing"));

    let root_keys = props.keys("").unwrap();
    assert_eq!(root_keys.len(), 6);
}

#[test]
fn test_get_string_enum() {
    let input = "Association = GlobalParameter\n";
    let props = PropsTree::from_str(input).unwrap();

    let value = props
        .get_string_enum("Association", &["GlobalParameter", "LayerParameter"])
        .unwrap();
    assert_eq!(value, "GlobalParameter");

    let err = props
        .get_string_enum("Association", &["LayerParameter"])
        .unwrap_err();
    assert!(matches!(err, PropsError::ValidationError { code: Some(451), .. }));
}

#[test]
fn test_get_validated() {
    let props = tree();

    let clip = props
        .get_validated(
            "BasePropertyOverrides.OpacityMaskClipValue",
            |v: &f64| (0.0..=1.0).contains(v),
            "a fraction between 0 and 1",
        )
        .unwrap();
    assert_eq!(clip, 0.333);

    let err = props
        .get_validated("Position.X", |v: &f64| *v < 0.0, "a negative number")
        .unwrap_err();
    assert!(matches!(err, PropsError::ValidationError { code: Some(450), .. }));
}

#[test]
fn test_from_file_and_missing_file() {
    use std::io::Write;

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("SM_Rock.props.txt");

    let mut file = std::fs::File::create(&path).expect("Failed to create file");
    writeln!(file, "NumFaces = 420").unwrap();
    writeln!(file, "Materials[1] =").unwrap();
    writeln!(file, "{{").unwrap();
    writeln!(file, "    Material0 = Material'/Game/M_A.M_A'").unwrap();
    writeln!(file, "}}").unwrap();

    let props = PropsTree::from_file(&path).expect("Failed to load file");
    let faces: i64 = props.get("NumFaces").unwrap();
    assert_eq!(faces, 420);

    let missing = PropsTree::from_file(dir.path().join("nope.props.txt"));
    assert!(matches!(missing, Err(PropsError::FileError { code: Some(301), .. })));
}

#[test]
fn test_dialect_is_carried() {
    let props = PropsTree::from_str_with_dialect("Parameter Info = 1\n", Dialect::legacy())
        .expect("Failed to parse legacy dump");
    assert_eq!(props.dialect(), Dialect::legacy());
    assert!(props.has("Parameter Info"));
}

#[test]
fn test_document_feeds_extraction() {
    let input = r#"
Materials[1] =
{
    Material0 = Material'/Game/Env/M_Rock.M_Rock'
}
"#;

    let props = PropsTree::from_str(input).unwrap();
    let paths = crate::extract::mesh_material_paths(props.document());
    assert_eq!(paths, vec!["/Game/Env/M_Rock.M_Rock".to_string()]);
}

#[test]
fn test_into_document_hands_over_the_tree() {
    let doc = tree().into_document();
    assert_eq!(doc.defs.len(), 6);
    assert!(doc.get("Position").is_some());
}
