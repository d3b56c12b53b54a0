use hexmap::{LayoutConfig, MapConfig, MapEditor, Orientation};
use validator::ValidationErrors;

/// Collect the names of the top-level fields that failed validation
fn error_fields(err: anyhow::Error) -> Vec<&'static str> {
    let validation_errors = err.downcast::<ValidationErrors>().unwrap();
    let mut error_fields = validation_errors
        .errors()
        .keys()
        .copied()
        .collect::<Vec<&str>>();
    error_fields.sort_unstable();
    error_fields
}

#[test]
fn test_map_config_validation() {
    let config = MapConfig {
        radius: 1001, // invalid (too big)
        layout: LayoutConfig {
            orientation: Orientation::Flat,
            hex_width: 0.0,       // invalid
            hex_height: 24.0,     // valid
            canvas_width: 0,      // invalid
            canvas_height: 480,   // valid
            spacing_divisor: 2.0, // valid
        },
    };

    // This is a bit of a lazy check but it works well enough
    let err = MapEditor::new(config).unwrap_err();
    assert_eq!(error_fields(err), vec!["layout", "radius"]);
}

#[test]
fn test_layout_config_validation() {
    let config = MapConfig {
        radius: 0, // valid
        layout: LayoutConfig {
            hex_height: -1.0,     // invalid
            canvas_height: 0,     // invalid
            spacing_divisor: 0.0, // invalid
            ..Default::default()
        },
    };

    let err = MapEditor::new(config).unwrap_err();
    let validation_errors = err.downcast::<ValidationErrors>().unwrap();
    let layout_errors = match validation_errors.errors().get("layout") {
        Some(validator::ValidationErrorsKind::Struct(errors)) => errors,
        other => panic!("expected nested layout errors, got {:?}", other),
    };
    let mut fields =
        layout_errors.errors().keys().copied().collect::<Vec<&str>>();
    fields.sort_unstable();
    assert_eq!(fields, vec!["canvas_height", "hex_height", "spacing_divisor"]);
}

#[test]
fn test_valid_config() {
    let config = MapConfig {
        radius: 1000,
        ..Default::default()
    };
    let editor = MapEditor::new(config).unwrap();
    assert_eq!(editor.map().len(), hexmap::map_len(1000));
}
