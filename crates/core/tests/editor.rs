use hexmap::{
    HasHexPosition, Hex, HexMap, LayoutConfig, MapConfig, MapEditor,
    Orientation, Point2, TileType, Vector2,
};

fn editor(orientation: Orientation) -> MapEditor {
    MapEditor::new(MapConfig {
        radius: 3,
        layout: LayoutConfig {
            orientation,
            ..Default::default()
        },
    })
    .unwrap()
}

#[test]
fn test_click_every_tile() {
    for orientation in [Orientation::Flat, Orientation::Pointy] {
        let editor = editor(orientation);
        for tile in editor.map().tiles() {
            let center = editor.layout().hex_to_pixel(tile.position());
            let found = editor.tile_at_pixel(center).unwrap();
            assert_eq!(found.position(), tile.position());
        }
    }
}

#[test]
fn test_select_flow() {
    let mut editor = editor(Orientation::Pointy);
    let a = Hex::new(1, 0, -1);
    let b = Hex::new(-2, 3, -1);
    let pixel_a = editor.layout().hex_to_pixel(a);
    let pixel_b = editor.layout().hex_to_pixel(b);

    assert_eq!(editor.select_at(pixel_a), Some(a));
    assert_eq!(editor.map().selected().unwrap().position(), a);

    assert_eq!(editor.select_at(pixel_b), Some(b));
    assert!(!editor.map().tile(a).unwrap().is_selected());
    assert_eq!(editor.map().selected().unwrap().position(), b);

    // Clicking off the map clears the selection
    assert_eq!(editor.select_at(Point2::new(0.0, 0.0)), None);
    assert!(editor.map().selected().is_none());
    editor.map().validate().unwrap();
}

#[test]
fn test_cycle_flow() {
    let mut editor = editor(Orientation::Flat);
    let pos = Hex::new(0, -2, 2);
    // Nudge off-center, the click should still land in the same hex
    let pixel = editor.layout().hex_to_pixel(pos) + Vector2::new(3.0, -2.0);

    assert_eq!(editor.cycle_terrain_at(pixel), Some(TileType::Water));
    assert!(!editor.tile_at_pixel(pixel).unwrap().is_walkable());
    assert_eq!(editor.cycle_terrain_at(pixel), Some(TileType::Rocks));
    assert_eq!(editor.cycle_terrain_at(pixel), Some(TileType::Sand));
    assert!(editor.tile_at_pixel(pixel).unwrap().is_walkable());

    assert_eq!(editor.cycle_terrain_at(Point2::new(-500.0, -500.0)), None);
    assert_eq!(editor.map().tile(pos).unwrap().tile_type(), TileType::Sand);
}

#[cfg(feature = "json")]
#[test]
fn test_save_and_reload() {
    let mut editor = editor(Orientation::Pointy);
    let pos = Hex::new(2, -1, -1);
    let pixel = editor.layout().hex_to_pixel(pos);
    editor.cycle_terrain_at(pixel);
    editor.select_at(pixel);

    let json = editor.map().to_json().unwrap();
    let map = HexMap::from_json(&json).unwrap();
    let reloaded = MapEditor::from_map(*editor.config(), map).unwrap();
    assert_eq!(reloaded.map(), editor.map());
    assert_eq!(reloaded.map().selected().unwrap().position(), pos);

    let destroyed = reloaded.into_map().destroy();
    assert_eq!(destroyed, hexmap::map_len(3));
}

#[test]
fn test_direct_map_edits() {
    let mut editor = editor(Orientation::Pointy);
    let map: &mut HexMap = editor.map_mut();
    for neighbor in Hex::ORIGIN.adjacents() {
        assert!(map.set_tile_type(neighbor, TileType::Rocks));
    }
    let blocked = editor
        .map()
        .tiles()
        .filter(|tile| !tile.is_walkable())
        .count();
    assert_eq!(blocked, 6);
}
