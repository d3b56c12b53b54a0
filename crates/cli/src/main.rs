mod svg;
mod viewport;

use crate::viewport::Letterbox;
use anyhow::{anyhow, bail, Context};
use config::{Config, File};
use hexmap::{timed, HexMap, MapConfig, MapEditor, Orientation, Point2};
use log::{info, warn, LevelFilter};
use simple_logger::SimpleLogger;
use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
    process,
    str::FromStr,
};
use structopt::StructOpt;
use strum::{Display, EnumString};

/// CLI for building hex maps, replaying pointer events against them, and
/// rendering the result.
#[derive(Debug, StructOpt)]
#[structopt(name = "hexmap")]
struct Opt {
    /// Path to a config file that defines the map to build. Supported
    /// formats: JSON, TOML. If neither this nor `--map` is given, the default
    /// config is used. Combined with `--map`, this must describe the loaded
    /// map (same radius, hex size and canvas)
    #[structopt(short, long)]
    config: Option<PathBuf>,

    /// Path to an existing .json map file to load. Without `--config`, the
    /// layout is recovered from the hex size and center stored in the map
    #[structopt(short, long)]
    map: Option<PathBuf>,

    /// Hex orientation for a map loaded without `--config`, since maps don't
    /// store it. Options: flat, pointy
    #[structopt(long, default_value = "pointy")]
    orientation: Orientation,

    /// Pointer events to apply to the map, in order. Each one is an action
    /// and a position, e.g. `select:320,240` or `cycle:100.5,80`.
    ///
    /// select - Select the tile under the pointer (or clear the selection if
    ///   the pointer is off the map)
    ///
    /// cycle - Change the terrain of the tile under the pointer to the next
    ///   type
    #[structopt(short, long = "event")]
    events: Vec<MapEvent>,

    /// Size of the window that event positions are relative to, e.g.
    /// `1280x720`. The virtual canvas is letterboxed into the window. If not
    /// given, event positions are relative to the canvas itself
    #[structopt(short, long)]
    window: Option<WindowSize>,

    /// If given, outputs will be saved to this directory. The exact files
    /// that appear in the directory are defined by the output formats. See
    /// `--output-formats` for more info
    #[structopt(short, long)]
    output: Option<PathBuf>,

    /// The format(s) to output the map in. Supported formats:
    ///
    /// cfg - The full config object used for the map, in TOML format
    ///
    /// json - JSON representation, which can be reloaded with `--map`
    ///
    /// svg - 2D rendering of the canvas
    #[structopt(short = "f", long)]
    output_formats: Vec<OutputFormat>,

    /// The logging level to use. See
    /// https://docs.rs/log/0.4.11/log/enum.LevelFilter.html for options
    #[structopt(long, default_value = "info")]
    log_level: LevelFilter,
}

/// Different output formats.
#[derive(Copy, Clone, Debug, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
enum OutputFormat {
    // If you change this, make sure to update the help text for
    // `--output-formats`!
    /// Export the map's full config in a human-readable file
    Cfg,
    /// Export the map in a serialized JSON format, which can be deserialized
    /// later to recover the map
    Json,
    /// Render the canvas as a 2D SVG
    Svg,
}

impl OutputFormat {
    fn file_ext(self) -> &'static str {
        match self {
            Self::Cfg => "toml",
            Self::Json => "json",
            Self::Svg => "svg",
        }
    }
}

/// Something the user did with the pointer
#[derive(Copy, Clone, Debug, PartialEq)]
enum MapEvent {
    Select(Point2),
    Cycle(Point2),
}

impl MapEvent {
    fn position(self) -> Point2 {
        match self {
            Self::Select(position) | Self::Cycle(position) => position,
        }
    }
}

impl FromStr for MapEvent {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (action, position) = s
            .split_once(':')
            .ok_or_else(|| anyhow!("expected ACTION:X,Y, got {:?}", s))?;
        let (x, y) = position
            .split_once(',')
            .ok_or_else(|| anyhow!("expected X,Y, got {:?}", position))?;
        let point = Point2::new(
            x.trim().parse().context("invalid x coordinate")?,
            y.trim().parse().context("invalid y coordinate")?,
        );
        match action {
            "select" => Ok(Self::Select(point)),
            "cycle" => Ok(Self::Cycle(point)),
            _ => bail!("unknown action {:?}", action),
        }
    }
}

/// Pixel size of a window, parsed from `WIDTHxHEIGHT`
#[derive(Copy, Clone, Debug, PartialEq)]
struct WindowSize(Point2);

impl FromStr for WindowSize {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (width, height) = s
            .split_once('x')
            .ok_or_else(|| anyhow!("expected WIDTHxHEIGHT, got {:?}", s))?;
        let width: u32 = width.parse().context("invalid width")?;
        let height: u32 = height.parse().context("invalid height")?;
        if width == 0 || height == 0 {
            bail!("window size must be non-zero, got {}", s);
        }
        Ok(Self(Point2::new(width as f64, height as f64)))
    }
}

fn load_config(config_path: &Path) -> anyhow::Result<MapConfig> {
    // Load config
    let mut settings = Config::new();
    let config_path = config_path.to_str().ok_or_else(|| {
        anyhow!("invalid character in path {:?}", config_path)
    })?;
    settings
        .merge(File::with_name(config_path))
        .context("error reading config file")?;
    settings.try_into().context("error reading config")
}

fn load_map(map_path: &Path) -> anyhow::Result<HexMap> {
    let json = fs::read_to_string(map_path)
        .with_context(|| format!("error reading map file {:?}", map_path))?;
    let map = HexMap::from_json(&json)?;
    info!("Loaded map from {:?}", map_path);
    Ok(map)
}

/// Set up the editor from whichever inputs were given. A config alone builds
/// a new map. A map is loaded with the given config, or with the layout it was
/// saved with.
fn load_editor(
    config_path: Option<&Path>,
    map_path: Option<&Path>,
    orientation: Orientation,
) -> anyhow::Result<MapEditor> {
    let config = config_path.map(load_config).transpose()?;
    match (config, map_path) {
        (Some(config), None) => {
            // Use the config to build a new map
            MapEditor::new(config)
        }
        (config, Some(map_path)) => {
            // Load an existing map, laid out the way it was when saved
            let map = load_map(map_path)?;
            let config = config
                .unwrap_or_else(|| MapConfig::for_map(&map, orientation));
            MapEditor::from_map(config, map)
                .context("config doesn't match the loaded map")
        }
        (None, None) => {
            info!("No config or map given, using default config");
            MapEditor::new(MapConfig::default())
        }
    }
}

/// Replay pointer events against the editor, in order
fn apply_events(
    editor: &mut MapEditor,
    events: &[MapEvent],
    letterbox: Option<Letterbox>,
) {
    for &event in events {
        let position = match letterbox {
            Some(letterbox) => letterbox.window_to_canvas(event.position()),
            None => event.position(),
        };
        match event {
            MapEvent::Select(_) => match editor.select_at(position) {
                Some(hex) => info!("Selected {}", hex),
                None => info!("Cleared selection, {} is off the map", position),
            },
            MapEvent::Cycle(_) => match editor.cycle_terrain_at(position) {
                Some(tile_type) => info!(
                    "Changed {} to {}",
                    editor.layout().pixel_to_hex(position),
                    tile_type
                ),
                None => warn!("No tile at {} to change", position),
            },
        }
    }
}

/// Generate an output form of the map in the given format.
fn gen_output(
    output_dir: &Path,
    output_format: OutputFormat,
    editor: &MapEditor,
) -> anyhow::Result<()> {
    fn generate_bytes(
        output_format: OutputFormat,
        editor: &MapEditor,
    ) -> anyhow::Result<Vec<u8>> {
        let bytes = match output_format {
            OutputFormat::Cfg => {
                // Serialize just the config via toml
                toml::to_string_pretty(editor.config())
                    .context("error serializing config")?
                    .into_bytes()
            }
            OutputFormat::Json => {
                // Serialize the entire map via JSON
                editor.map().to_json()?.into_bytes()
            }
            OutputFormat::Svg => {
                // Render the canvas in 2D
                crate::svg::draw_map(editor).to_string().into_bytes()
            }
        };
        Ok(bytes)
    }

    let output_file_path = output_dir
        .join("map")
        .with_extension(output_format.file_ext());

    timed!(
        format!(
            "Generating {} output and writing to {:?}",
            output_format, &output_file_path
        ),
        log::Level::Info,
        {
            let bytes = generate_bytes(output_format, editor)?;
            let mut file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&output_file_path)
                .with_context(|| {
                    format!("error opening output file {:?}", &output_file_path)
                })?;
            file.write_all(&bytes).with_context(|| {
                format!("error writing to file {:?}", &output_file_path)
            })?;
        }
    );

    Ok(())
}

/// Run the CLI with some options
fn run(opt: Opt) -> anyhow::Result<()> {
    SimpleLogger::new().with_level(opt.log_level).init()?;

    let mut editor = load_editor(
        opt.config.as_deref(),
        opt.map.as_deref(),
        opt.orientation,
    )?;

    let letterbox = opt.window.map(|WindowSize(window)| {
        let layout_config = editor.config().layout;
        Letterbox::new(
            Point2::new(
                layout_config.canvas_width as f64,
                layout_config.canvas_height as f64,
            ),
            window,
        )
    });
    apply_events(&mut editor, &opt.events, letterbox);

    // If an output dir was specified, write out output format(s) there
    if let Some(output_dir) = &opt.output {
        if opt.output_formats.is_empty() {
            bail!("output dir was specified, but no output formats were given")
        }
        fs::create_dir_all(output_dir)?;

        for &output_format in &opt.output_formats {
            gen_output(output_dir, output_format, &editor)?;
        }
    }

    let released = editor.into_map().destroy();
    info!("Released {} tiles", released);
    Ok(())
}

fn main() {
    let exit_code = match run(Opt::from_args()) {
        Ok(_) => 0,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            1
        }
    };
    process::exit(exit_code);
}

#[cfg(test)]
mod tests {
    use super::*;
    use hexmap::{HasHexPosition, Hex, TileType};

    #[test]
    fn test_parse_event() {
        assert_eq!(
            "select:320,240".parse::<MapEvent>().unwrap(),
            MapEvent::Select(Point2::new(320.0, 240.0))
        );
        assert_eq!(
            "cycle:10.5, -3".parse::<MapEvent>().unwrap(),
            MapEvent::Cycle(Point2::new(10.5, -3.0))
        );
        assert!("select:320".parse::<MapEvent>().is_err());
        assert!("drag:1,2".parse::<MapEvent>().is_err());
        assert!("cycle:a,2".parse::<MapEvent>().is_err());
    }

    #[test]
    fn test_parse_window_size() {
        assert_eq!(
            "1280x720".parse::<WindowSize>().unwrap(),
            WindowSize(Point2::new(1280.0, 720.0))
        );
        assert!("1280".parse::<WindowSize>().is_err());
        assert!("0x720".parse::<WindowSize>().is_err());
    }

    #[test]
    fn test_reload_map_with_saved_layout() {
        let config = MapConfig {
            radius: 3,
            layout: hexmap::LayoutConfig {
                hex_width: 10.0,
                hex_height: 10.0,
                canvas_width: 800,
                canvas_height: 600,
                ..Default::default()
            },
        };
        let original = MapEditor::new(config).unwrap();
        let map_path = std::env::temp_dir()
            .join(format!("hexmap-reload-{}.json", process::id()));
        fs::write(&map_path, original.map().to_json().unwrap()).unwrap();

        let mut editor =
            load_editor(None, Some(&map_path), Orientation::Pointy).unwrap();
        assert_eq!(editor.config(), &config);

        let target = Hex::new(1, 0, -1);
        let pixel = original.layout().hex_to_pixel(target);
        apply_events(&mut editor, &[MapEvent::Cycle(pixel)], None);
        let changed: Vec<Hex> = editor
            .map()
            .tiles()
            .filter(|tile| tile.tile_type() != TileType::Grass)
            .map(|tile| tile.position())
            .collect();
        assert_eq!(changed, vec![target]);

        // A config that disagrees with the saved layout is rejected
        let config_path = std::env::temp_dir()
            .join(format!("hexmap-reload-{}.toml", process::id()));
        fs::write(&config_path, "radius = 3\n").unwrap();
        assert!(load_editor(
            Some(&config_path),
            Some(&map_path),
            Orientation::Pointy
        )
        .is_err());

        fs::remove_file(&map_path).unwrap();
        fs::remove_file(&config_path).unwrap();
    }

    #[test]
    fn test_apply_events() {
        let mut editor = MapEditor::new(MapConfig::default()).unwrap();
        // Window is twice the canvas size, so positions are doubled
        let letterbox = Letterbox::new(
            Point2::new(640.0, 480.0),
            Point2::new(1280.0, 960.0),
        );
        let target = Hex::new(0, 1, -1);
        let pixel = editor.layout().hex_to_pixel(target);
        let window_pixel = Point2::new(pixel.x * 2.0, pixel.y * 2.0);

        apply_events(
            &mut editor,
            &[MapEvent::Cycle(window_pixel), MapEvent::Select(window_pixel)],
            Some(letterbox),
        );
        let tile = editor.map().tile(target).unwrap();
        assert_eq!(tile.tile_type(), TileType::Water);
        assert!(tile.is_selected());
    }
}
