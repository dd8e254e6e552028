/// Example: Load and render an STL file in the terminal
///
/// Usage: cargo run --example load_stl -- path/to/file.stl

use std::env;
use std::fs;
use std::io;
use facet_core::{geometry::BASE_HALF_EXTENT, stl};
use facet_terminal::{Config, Scene, TerminalApp};

fn main() -> io::Result<()> {
    let args: Vec<String> = env::args().collect();

    // Loaded meshes are usually dense already, so skip subdivision.
    let config = Config {
        depth: 0,
        spin: true,
        ..Config::default()
    };

    if args.len() < 2 {
        let program = args.first().map_or("load_stl", String::as_str);
        eprintln!("Usage: {} <stl-file>", program);
        eprintln!("\nNo STL file provided, using the tetrahedron...");
        let mut app = TerminalApp::new(Scene::BaseSolid, &config)?;
        return app.run();
    }

    let stl_path = &args[1];

    println!("Loading STL file: {}", stl_path);

    let data = fs::read(stl_path).map_err(|e| {
        io::Error::new(io::ErrorKind::NotFound, format!("Failed to read STL file: {}", e))
    })?;

    let mesh = stl::parse_stl(&data).map_err(|e| {
        io::Error::new(io::ErrorKind::InvalidData, format!("Failed to parse STL: {}", e))
    })?;

    println!("Loaded {} triangles", mesh.len());

    let mut app = TerminalApp::new(Scene::custom(mesh.fit_to(BASE_HALF_EXTENT)), &config)?;
    app.run()
}
