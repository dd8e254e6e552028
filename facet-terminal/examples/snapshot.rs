/// Example: Render one frame to a PNG file
///
/// Usage: cargo run --example snapshot -- [heading-deg] [pitch-deg] [out.png]

use std::env;
use std::io;
use facet_core::{render_frame, Orientation};
use image::RgbImage;

const SIZE: usize = 400;
const DEPTH: u32 = 4;

fn main() -> io::Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    let angle = |i: usize| -> io::Result<f64> {
        match args.get(i) {
            Some(arg) => arg.parse().map_err(|_| {
                io::Error::new(io::ErrorKind::InvalidInput, format!("invalid angle: {}", arg))
            }),
            None => Ok(0.0),
        }
    };
    let orientation = Orientation::from_degrees(angle(0)?, angle(1)?);
    let out = args.get(2).map(String::as_str).unwrap_or("facet.png");

    let frame = render_frame(orientation.heading, orientation.pitch, SIZE, SIZE, DEPTH)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    println!("{}", frame.stats);

    let img = RgbImage::from_raw(SIZE as u32, SIZE as u32, frame.pixels.to_rgb_bytes())
        .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "pixel buffer size mismatch"))?;
    img.save(out)
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;

    println!("Wrote {}", out);
    Ok(())
}
