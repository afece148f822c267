use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use cubetwist_core::*;
use eyre::{Context, Result};
use itertools::Itertools;
use serde::Serialize;
use strum::IntoEnumIterator;

use crate::settings::{OutputFormat, Overrides, Settings};

/// Twist engine for N-layer cubes
#[derive(Debug, clap::Parser)]
#[command(version)]
pub(crate) struct Args {
    #[command(subcommand)]
    pub subcommand: Subcommand,

    /// Settings file (YAML, TOML, or JSON).
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
    /// Number of layers along each axis.
    #[arg(short = 'n', long, global = true)]
    pub layers: Option<u8>,
    /// Output format.
    #[arg(short, long, global = true)]
    pub output: Option<OutputFormat>,
    /// Don't report individual twists.
    #[arg(short, long, global = true)]
    pub quiet: bool,
}
impl Args {
    pub(crate) fn overrides(&self) -> Overrides {
        Overrides {
            layer_count: self.layers,
            output: self.output,
            quiet: self.quiet,
        }
    }
}

#[derive(clap::Subcommand, Debug)]
pub(crate) enum Subcommand {
    /// Apply twists to a solved cube and print the resulting state.
    Twist {
        /// Twists as `axis:mask:angle`, such as `0:0b100:1` or `1:4:-1`.
        twists: Vec<RawTwist>,
    },
    /// Print the twist designated by swiping a sticker.
    Swipe {
        /// Global part ID.
        part: u16,
        /// Sticker of the part (0 for sides).
        orientation: u8,
        /// Swipe direction, from 0 to 3.
        direction: u8,
        /// Twists to apply before swiping, as `axis:mask:angle`.
        #[arg(long = "after", value_delimiter = ',')]
        after: Vec<RawTwist>,
    },
    /// Print the quarter-turn cycles of every slice.
    Slices,
    /// Print part counts and numbering.
    Info,
}

/// Unvalidated twist given on the command line.
#[derive(Serialize, Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) struct RawTwist {
    pub axis: i32,
    pub layers: LayerMaskUint,
    pub angle: i32,
}
impl FromStr for RawTwist {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((axis, layers, angle)) = s.split(':').collect_tuple() else {
            return Err(format!("expected `axis:mask:angle`, got {s:?}"));
        };
        let axis = axis.trim().parse().map_err(|e| format!("bad axis {axis:?}: {e}"))?;
        let layers = parse_layer_mask(layers.trim())?;
        let angle = angle.trim().parse().map_err(|e| format!("bad angle {angle:?}: {e}"))?;
        Ok(Self {
            axis,
            layers,
            angle,
        })
    }
}
impl std::fmt::Display for RawTwist {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{:#b}:{}", self.axis, self.layers, self.angle)
    }
}

fn parse_layer_mask(s: &str) -> Result<LayerMaskUint, String> {
    let result = match s.strip_prefix("0b") {
        Some(binary) => LayerMaskUint::from_str_radix(binary, 2),
        None => s.parse(),
    };
    result.map_err(|e| format!("bad layer mask {s:?}: {e}"))
}

/// Listener that reports each twist on stderr.
struct TwistReporter;
impl CubeListener for TwistReporter {
    fn cube_twisted(&self, event: &CubeEvent) {
        if let Some(twist) = event.twist {
            eprintln!("twisted {twist}");
        }
    }
    fn cube_changed(&self, _event: &CubeEvent) {}
}

fn new_cube(settings: &Settings) -> Result<Cube> {
    let mut cube = Cube::new(settings.layer_count)
        .wrap_err_with(|| format!("error creating {}-layer cube", settings.layer_count))?;
    cube.add_listener(Arc::new(TwistReporter));
    cube.set_quiet(settings.quiet);
    Ok(cube)
}

fn tables(settings: &Settings) -> Result<Arc<CubeTables>> {
    let n = settings.layer_count;
    cube_tables(n).wrap_err_with(|| format!("error generating {n}-layer tables"))
}

fn apply_twists(cube: &mut Cube, twists: &[RawTwist]) -> Result<()> {
    for t in twists {
        cube.twist(t.axis, t.layers, t.angle)
            .wrap_err_with(|| format!("error applying twist {t}"))?;
    }
    Ok(())
}

pub(crate) fn exec(subcommand: Subcommand, settings: &Settings) -> Result<()> {
    log::debug!("running {subcommand:?} with {settings:?}");
    match subcommand {
        Subcommand::Twist { twists } => {
            let mut cube = new_cube(settings)?;
            apply_twists(&mut cube, &twists)?;
            let report = StateReport::new(&cube);
            match settings.output {
                OutputFormat::Text => report.print_text(),
                OutputFormat::Json => write_json_output(&report)?,
            }
            Ok(())
        }

        Subcommand::Swipe {
            part,
            orientation,
            direction,
            after,
        } => {
            let mut cube = new_cube(settings)?;
            apply_twists(&mut cube, &after)?;
            let twist = cube
                .swipe(Part(part), orientation, direction)
                .wrap_err("error resolving swipe")?;
            match settings.output {
                OutputFormat::Text => match twist {
                    Some(twist) => println!("{twist}"),
                    None => println!("no twist"),
                },
                OutputFormat::Json => write_json_output(&twist)?,
            }
            Ok(())
        }

        Subcommand::Slices => {
            let tables = tables(settings)?;
            match settings.output {
                OutputFormat::Text => {
                    for (axis, layer, cycles) in tables.slices.iter() {
                        println!("{} layer {}:", axis.name(), layer + 1);
                        for cycle in cycles {
                            println!("  {cycle}");
                        }
                    }
                }
                OutputFormat::Json => {
                    let slices = tables
                        .slices
                        .iter()
                        .map(|(axis, layer, cycles)| SliceReport {
                            axis,
                            layer,
                            cycles,
                        })
                        .collect_vec();
                    write_json_output(&slices)?;
                }
            }
            Ok(())
        }

        Subcommand::Info => {
            let tables = tables(settings)?;
            let report = InfoReport::new(&tables);
            match settings.output {
                OutputFormat::Text => report.print_text(),
                OutputFormat::Json => write_json_output(&report)?,
            }
            Ok(())
        }
    }
}

#[derive(Serialize, Debug)]
struct StateReport<'a> {
    layer_count: u8,
    solved: bool,
    unsolved_parts: Vec<Part>,
    cube_orientation: Option<u8>,
    state: &'a PartState,
}
impl<'a> StateReport<'a> {
    fn new(cube: &'a Cube) -> Self {
        Self {
            layer_count: cube.layer_count(),
            solved: cube.is_solved(),
            unsolved_parts: cube.unsolved_parts(),
            cube_orientation: cube.cube_orientation(),
            state: cube.state(),
        }
    }

    fn print_text(&self) {
        let status = if self.solved { "solved" } else { "unsolved" };
        println!("{}-layer cube, {status}", self.layer_count);
        for category in PartCategory::iter() {
            let s = &self.state[category];
            if s.is_empty() {
                continue;
            }
            println!("{} parts: {}", category.name(), s.parts().iter().join(" "));
            println!("{} orientations: {}", category.name(), s.orientations().iter().join(" "));
        }
        if !self.unsolved_parts.is_empty() {
            println!("unsolved parts: {}", self.unsolved_parts.iter().map(|p| p.0).join(" "));
        }
        if let Some(o) = self.cube_orientation {
            println!("cube orientation: {o}");
        }
    }
}

#[derive(Serialize, Debug)]
struct SliceReport<'a> {
    axis: Axis,
    layer: u8,
    cycles: &'a [SliceCycle],
}

#[derive(Serialize, Debug)]
struct CategoryInfo {
    category: PartCategory,
    count: usize,
    bands: usize,
    first_part: Part,
    layer_populations: Vec<(Axis, Vec<usize>)>,
}

#[derive(Serialize, Debug)]
struct InfoReport {
    engine: &'static str,
    layer_count: u8,
    part_count: usize,
    center_part: Part,
    categories: Vec<CategoryInfo>,
}
impl InfoReport {
    fn new(tables: &CubeTables) -> Self {
        let layout = tables.layout;
        let populations = tables.codec.layer_populations();
        let categories = PartCategory::iter()
            .map(|category| CategoryInfo {
                category,
                count: layout.count(category),
                bands: layout.band_count(category),
                first_part: layout.part(category, 0),
                layer_populations: populations
                    .iter()
                    .filter(|(c, _, _)| *c == category)
                    .map(|(_, axis, counts)| (*axis, counts.clone()))
                    .collect(),
            })
            .collect();
        Self {
            engine: ENGINE_VERSION_STRING,
            layer_count: layout.layer_count(),
            part_count: layout.part_count(),
            center_part: layout.center_part(),
            categories,
        }
    }

    fn print_text(&self) {
        println!("{} ({}-layer cube)", self.engine, self.layer_count);
        for info in &self.categories {
            let start = info.first_part.0 as usize;
            println!(
                "{}s: {} in {} bands, parts {start}..{}",
                info.category.name(),
                info.count,
                info.bands,
                start + info.count,
            );
            for (axis, counts) in &info.layer_populations {
                println!("  per {} layer: {}", axis.name(), counts.iter().join(" "));
            }
        }
        println!("center: part {}", self.center_part.0);
        println!("total: {} parts", self.part_count);
    }
}

fn write_json_output<T: Serialize>(value: &T) -> Result<()> {
    serde_json::to_writer_pretty(std::io::stdout(), value)
        .context("error serializing data and writing to stdout")?;
    println!();
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_parse_raw_twists() {
        assert_eq!(
            Ok(RawTwist {
                axis: 0,
                layers: 0b100000,
                angle: 1,
            }),
            RawTwist::from_str("0:0b100000:1"),
        );
        assert_eq!(
            Ok(RawTwist {
                axis: 1,
                layers: 4,
                angle: -1,
            }),
            RawTwist::from_str("1:4:-1"),
        );
        assert!("1:4".parse::<RawTwist>().is_err());
        assert!("1:0b2:1".parse::<RawTwist>().is_err());
        assert!("x:1:1".parse::<RawTwist>().is_err());
        assert_eq!("2:0b11:-2", RawTwist::from_str("2:3:-2").expect("valid").to_string());
    }

    #[test]
    fn test_parse_args() {
        let args = Args::try_parse_from(["cubetwist", "-n", "6", "twist", "0:0b100000:1", "1:1:-1"])
            .expect("valid arguments");
        assert_eq!(Some(6), args.layers);
        let Subcommand::Twist { twists } = args.subcommand else {
            panic!("expected twist subcommand");
        };
        assert_eq!(2, twists.len());

        let args = Args::try_parse_from([
            "cubetwist", "swipe", "20", "0", "3", "--after", "0:1:1,2:2:2", "-o", "json",
        ])
        .expect("valid arguments");
        assert_eq!(Some(OutputFormat::Json), args.output);
        let Subcommand::Swipe { part, after, .. } = args.subcommand else {
            panic!("expected swipe subcommand");
        };
        assert_eq!(20, part);
        assert_eq!(2, after.len());
    }

    #[test]
    fn test_state_report() {
        let mut cube = Cube::new(3).expect("valid layer count");
        apply_twists(
            &mut cube,
            &[RawTwist {
                axis: 0,
                layers: 0b100,
                angle: 1,
            }],
        )
        .expect("valid twist");
        let report = StateReport::new(&cube);
        assert!(!report.solved);
        assert_eq!(9, report.unsolved_parts.len());
        let json = serde_json::to_value(&report).expect("serializable");
        assert_eq!(serde_json::json!(false), json["solved"]);
        assert_eq!(serde_json::json!(3), json["layer_count"]);
    }

    #[test]
    fn test_info_report() {
        let tables = cube_tables(4).expect("valid layer count");
        let report = InfoReport::new(&tables);
        assert_eq!(57, report.part_count);
        assert_eq!(Part(56), report.center_part);
        assert_eq!(
            vec![8, 24, 24],
            report.categories.iter().map(|c| c.count).collect_vec(),
        );
    }
}
