/// Command-line configuration for the terminal driver
use std::path::PathBuf;

use facet_core::MAX_SUBDIVISION_DEPTH;

pub const USAGE: &str = "Usage: facet-terminal [--depth N] [--size PX] [--spin] [FILE.stl]";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Subdivision depth applied to the mesh. Defaults to 0 when a mesh file is
    /// given, since loaded meshes are usually dense already.
    pub depth: u32,
    /// Side of the square frame rendered before sampling onto the terminal.
    pub size: usize,
    pub spin: bool,
    pub stl_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            depth: 4,
            size: 400,
            spin: false,
            stl_path: None,
        }
    }
}

impl Config {
    /// Parse arguments, excluding the program name.
    pub fn from_args<I>(args: I) -> Result<Self, String>
    where
        I: IntoIterator<Item = String>,
    {
        let mut config = Config::default();
        let mut depth = None;
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--depth" | "-d" => {
                    let value = args.next().ok_or("--depth needs a value")?;
                    let parsed: u32 = value
                        .parse()
                        .map_err(|_| format!("invalid depth: {}", value))?;
                    if parsed > MAX_SUBDIVISION_DEPTH {
                        return Err(format!(
                            "depth {} exceeds maximum of {}",
                            parsed, MAX_SUBDIVISION_DEPTH
                        ));
                    }
                    depth = Some(parsed);
                }
                "--size" | "-s" => {
                    let value = args.next().ok_or("--size needs a value")?;
                    config.size = match value.parse() {
                        Ok(size) if size > 0 => size,
                        _ => return Err(format!("invalid size: {}", value)),
                    };
                }
                "--spin" => config.spin = true,
                flag if flag.starts_with('-') => {
                    return Err(format!("unknown option: {}", flag));
                }
                path => {
                    if config.stl_path.is_some() {
                        return Err(format!("unexpected argument: {}", path));
                    }
                    config.stl_path = Some(PathBuf::from(path));
                }
            }
        }

        config.depth = match (depth, &config.stl_path) {
            (Some(depth), _) => depth,
            (None, Some(_)) => 0,
            (None, None) => config.depth,
        };
        Ok(config)
    }
}
