/// Facet Terminal Demo - Rotating Tetrahedron
///
/// Renders the subdivided tetrahedron (or an STL file) in the terminal.
/// Controls:
///   - WASD / Arrow Keys: heading and pitch
///   - +/-: subdivision depth
///   - Space: toggle spin
///   - Q/ESC: Quit

use std::{env, fs, io};

use facet_core::{geometry::BASE_HALF_EXTENT, stl};
use facet_terminal::{config::USAGE, Config, Scene, TerminalApp};

fn main() -> io::Result<()> {
    let config = Config::from_args(env::args().skip(1)).map_err(|e| {
        eprintln!("{}", USAGE);
        io::Error::new(io::ErrorKind::InvalidInput, e)
    })?;

    let scene = match &config.stl_path {
        Some(path) => {
            println!("Loading STL file: {}", path.display());
            let data = fs::read(path)?;
            let mesh = stl::parse_stl(&data)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
            println!("Loaded {} triangles", mesh.len());
            Scene::custom(mesh.fit_to(BASE_HALF_EXTENT))
        }
        None => Scene::BaseSolid,
    };

    let mut app = TerminalApp::new(scene, &config)?;
    app.run()
}
