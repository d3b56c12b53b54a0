use hexmap::{Color3, HasHexPosition, Hex, MapEditor, Point2, Tile};
use svg::{
    node::{
        self,
        element::{Group, Polygon, Rectangle, Text},
        Comment,
    },
    Document,
};

const BACKGROUND_COLOR: Color3 = Color3::new_int(245, 245, 245);
const OUTLINE_COLOR: Color3 = Color3::new_int(80, 80, 80);
const SELECTED_COLOR: Color3 = Color3::new_int(253, 249, 0);
const CENTER_COLOR: Color3 = Color3::new_int(102, 191, 255);
const TEXT_COLOR: Color3 = Color3::new_int(0, 0, 0);

/// Generate an SVG document of the editor's canvas
pub fn draw_map(editor: &MapEditor) -> Document {
    let layout_config = editor.config().layout;
    let (width, height) =
        (layout_config.canvas_width, layout_config.canvas_height);
    let mut document = Document::new()
        .set("viewBox", (0, 0, width, height))
        .set("width", width)
        .set("height", height)
        .add(Comment::new(format!("\n{:#?}\n", editor.config())))
        .add(
            Rectangle::new()
                .set("width", width)
                .set("height", height)
                .set("fill", BACKGROUND_COLOR.to_html()),
        );

    // The selected tile is drawn last so its outline isn't covered by its
    // neighbors
    let mut selected = None;
    for (tile, corners) in editor.tile_outlines() {
        if tile.is_selected() {
            selected = Some((tile, corners));
        } else {
            document = document.add(draw_tile(tile, &corners));
        }
    }
    if let Some((tile, corners)) = selected {
        document = document.add(draw_tile(tile, &corners));
    }

    document.add(draw_caption(editor))
}

/// Generate an SVG polygon for a single tile
fn draw_tile(tile: &Tile, corners: &[Point2; 6]) -> Group {
    let pos = tile.position();
    // The center highlight wins over the selection
    let stroke = if pos == Hex::ORIGIN {
        CENTER_COLOR
    } else if tile.is_selected() {
        SELECTED_COLOR
    } else {
        OUTLINE_COLOR
    };
    let stroke_width = if stroke == OUTLINE_COLOR { 1.0 } else { 3.0 };

    Group::new()
        .add(Comment::new(pos.to_string())) // Readability!
        .add(
            Polygon::new()
                .set(
                    "points",
                    corners
                        .iter()
                        .map(|corner| (corner.x, corner.y))
                        .collect::<Vec<_>>(),
                )
                .set("fill", tile.tile_type().color().to_html())
                .set("stroke", stroke.to_html())
                .set("stroke-width", stroke_width),
        )
}

/// Status line in the top-left, showing the selection and tile count
fn draw_caption(editor: &MapEditor) -> Text {
    let map = editor.map();
    let selected = match map.selected() {
        Some(tile) => tile.position().to_string(),
        None => "none".into(),
    };
    Text::new()
        .set("x", 10)
        .set("y", 30)
        .set("font-size", 20)
        .set("fill", TEXT_COLOR.to_html())
        .add(node::Text::new(format!(
            "Selected: {} | Tiles: {}",
            selected,
            map.len()
        )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use hexmap::MapConfig;

    #[test]
    fn test_draw_map() {
        let mut editor = MapEditor::new(MapConfig {
            radius: 1,
            ..Default::default()
        })
        .unwrap();
        let target = editor.layout().hex_to_pixel(Hex::new(1, 0, -1));
        editor.select_at(target);
        editor.cycle_terrain_at(target);

        let svg = draw_map(&editor).to_string();
        assert_eq!(svg.matches("<polygon").count(), 7);
        // Selected outline, plus the center outline
        assert!(svg.contains(&SELECTED_COLOR.to_html()));
        assert!(svg.contains(&CENTER_COLOR.to_html()));
        // The cycled tile is now water
        assert!(svg.contains("#1e90ff"));
        assert!(svg.contains("Selected: (1, 0, -1) | Tiles: 7"));
    }

    #[test]
    fn test_draw_selected_center() {
        let mut editor = MapEditor::new(MapConfig {
            radius: 1,
            ..Default::default()
        })
        .unwrap();
        let center = editor.layout().origin();
        assert_eq!(editor.select_at(center), Some(Hex::ORIGIN));

        let svg = draw_map(&editor).to_string();
        assert!(svg.contains(&CENTER_COLOR.to_html()));
        assert!(!svg.contains(&SELECTED_COLOR.to_html()));
        assert!(svg.contains("Selected: (0, 0, 0) | Tiles: 7"));
    }
}
