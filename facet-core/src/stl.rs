/// STL loader for binary and ASCII formats
///
/// STL carries no color, so facets are colored by cycling [`PALETTE`]. Stored
/// normals are read and discarded; the rasterizer derives its own.
use nom::{
    bytes::complete::{tag, take},
    character::complete::{multispace0, multispace1, not_line_ending},
    combinator::all_consuming,
    multi::{count, many0},
    number::complete::{double, le_f32, le_u16, le_u32},
    sequence::{preceded, tuple},
    IResult,
};

use crate::color::PALETTE;
use crate::error::{Error, Result};
use crate::geometry::{Mesh, Triangle};
use crate::math::{vec3, Vec3};

const HEADER_LEN: usize = 80;
const FACET_LEN: usize = 50;

/// Parse a binary STL file
pub fn parse_binary_stl(data: &[u8]) -> Result<Mesh> {
    let (body, facet_count) = binary_header(data)
        .map_err(|_| Error::Stl("file too small to be a valid STL".to_string()))?;
    let facet_count = facet_count as usize;

    let needed = facet_count.saturating_mul(FACET_LEN);
    if body.len() < needed {
        return Err(Error::Stl(format!(
            "unexpected end of file: {} facets need {} bytes, found {}",
            facet_count,
            needed,
            body.len()
        )));
    }

    let (_, facets) = count(binary_facet, facet_count)(body)
        .map_err(|_| Error::Stl("malformed facet record".to_string()))?;
    Ok(colorize(facets))
}

fn binary_header(input: &[u8]) -> IResult<&[u8], u32> {
    preceded(take(HEADER_LEN), le_u32)(input)
}

fn binary_vector(input: &[u8]) -> IResult<&[u8], Vec3> {
    let (input, (x, y, z)) = tuple((le_f32, le_f32, le_f32))(input)?;
    Ok((input, vec3(x.into(), y.into(), z.into())))
}

fn binary_facet(input: &[u8]) -> IResult<&[u8], [Vec3; 3]> {
    let (input, _normal) = binary_vector(input)?;
    let (input, (a, b, c)) = tuple((binary_vector, binary_vector, binary_vector))(input)?;
    let (input, _attributes) = le_u16(input)?;
    Ok((input, [a, b, c]))
}

/// Parse an ASCII STL file
pub fn parse_ascii_stl(input: &str) -> Result<Mesh> {
    match all_consuming(ascii_solid)(input) {
        Ok((_, facets)) => Ok(colorize(facets)),
        Err(nom::Err::Error(e) | nom::Err::Failure(e)) => Err(Error::Stl(format!(
            "ASCII parse error ({:?}) at byte {}",
            e.code,
            input.len() - e.input.len()
        ))),
        Err(nom::Err::Incomplete(_)) => Err(Error::Stl("truncated ASCII STL".to_string())),
    }
}

fn ascii_solid(input: &str) -> IResult<&str, Vec<[Vec3; 3]>> {
    let (input, _) = preceded(multispace0, tag("solid"))(input)?;
    let (input, _name) = not_line_ending(input)?;
    let (input, facets) = many0(ascii_facet)(input)?;
    let (input, _) = preceded(multispace0, tag("endsolid"))(input)?;
    let (input, _name) = not_line_ending(input)?;
    let (input, _) = multispace0(input)?;
    Ok((input, facets))
}

fn ascii_facet(input: &str) -> IResult<&str, [Vec3; 3]> {
    let (input, _) = preceded(multispace0, tag("facet"))(input)?;
    let (input, _) = preceded(multispace1, tag("normal"))(input)?;
    let (input, _normal) = ascii_vector(input)?;
    let (input, _) = preceded(multispace0, tag("outer"))(input)?;
    let (input, _) = preceded(multispace1, tag("loop"))(input)?;
    let (input, (a, b, c)) = tuple((ascii_vertex, ascii_vertex, ascii_vertex))(input)?;
    let (input, _) = preceded(multispace0, tag("endloop"))(input)?;
    let (input, _) = preceded(multispace0, tag("endfacet"))(input)?;
    Ok((input, [a, b, c]))
}

fn ascii_vertex(input: &str) -> IResult<&str, Vec3> {
    preceded(preceded(multispace0, tag("vertex")), ascii_vector)(input)
}

fn ascii_vector(input: &str) -> IResult<&str, Vec3> {
    let (input, x) = preceded(multispace1, double)(input)?;
    let (input, y) = preceded(multispace1, double)(input)?;
    let (input, z) = preceded(multispace1, double)(input)?;
    Ok((input, vec3(x, y, z)))
}

fn colorize(facets: Vec<[Vec3; 3]>) -> Mesh {
    facets
        .into_iter()
        .enumerate()
        .map(|(i, [a, b, c])| Triangle::new(a, b, c, PALETTE[i % PALETTE.len()]))
        .collect()
}

/// Detect and parse STL file (binary or ASCII)
pub fn parse_stl(data: &[u8]) -> Result<Mesh> {
    // Binary headers may also start with "solid", so fall back on failure.
    if data.starts_with(b"solid") {
        if let Ok(text) = std::str::from_utf8(data) {
            if let Ok(mesh) = parse_ascii_stl(text) {
                return Ok(mesh);
            }
        }
    }

    parse_binary_stl(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;

    fn binary(facets: &[[[f32; 3]; 3]]) -> Vec<u8> {
        let mut data = vec![0u8; HEADER_LEN];
        data.extend_from_slice(&(facets.len() as u32).to_le_bytes());
        for facet in facets {
            for value in [0.0f32, 0.0, 1.0] {
                data.extend_from_slice(&value.to_le_bytes());
            }
            for vertex in facet {
                for value in vertex {
                    data.extend_from_slice(&value.to_le_bytes());
                }
            }
            data.extend_from_slice(&0u16.to_le_bytes());
        }
        data
    }

    #[test]
    fn test_parse_binary_header() {
        let mesh = parse_binary_stl(&binary(&[])).unwrap();
        assert!(mesh.is_empty());
    }

    #[test]
    fn test_parse_binary_facets() {
        let data = binary(&[
            [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
            [[0.0, 0.0, 1.0], [1.0, 0.0, 1.0], [0.0, 1.0, 1.5]],
        ]);
        assert_eq!(data.len(), HEADER_LEN + 4 + 2 * FACET_LEN);

        let mesh = parse_stl(&data).unwrap();
        assert_eq!(mesh.len(), 2);
        assert_eq!(mesh.triangles[0].vertices[1], vec3(1.0, 0.0, 0.0));
        assert_eq!(mesh.triangles[1].vertices[2], vec3(0.0, 1.0, 1.5));
        assert_eq!(mesh.triangles[0].color, Color::WHITE);
        assert_eq!(mesh.triangles[1].color, Color::RED);
    }

    #[test]
    fn test_truncated_binary_is_rejected() {
        let mut data = binary(&[[[0.0; 3], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]]);
        data.truncate(data.len() - 10);
        assert!(matches!(parse_binary_stl(&data), Err(Error::Stl(_))));
        assert!(matches!(parse_binary_stl(&[0u8; 20]), Err(Error::Stl(_))));
    }

    #[test]
    fn test_parse_ascii() {
        let text = "solid pyramid
  facet normal 0 0 1
    outer loop
      vertex 0 0 0
      vertex 1.5 0 0
      vertex 0 -2e1 0.25
    endloop
  endfacet
  facet normal 0 1 0
    outer loop
      vertex 0 0 0
      vertex 1 0 0
      vertex 0 0 1
    endloop
  endfacet
endsolid pyramid
";
        let mesh = parse_stl(text.as_bytes()).unwrap();
        assert_eq!(mesh.len(), 2);
        assert_eq!(mesh.triangles[0].vertices[2], vec3(0.0, -20.0, 0.25));
        assert_eq!(mesh.triangles[1].vertices[1], vec3(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_parse_ascii_unnamed_solid() {
        let mesh = parse_ascii_stl("solid\nendsolid\n").unwrap();
        assert!(mesh.is_empty());
    }

    #[test]
    fn test_malformed_ascii_is_rejected() {
        let text = "solid broken\n facet normal 0 0 1\n outer loop\n vertex 0 0\n";
        assert!(matches!(parse_ascii_stl(text), Err(Error::Stl(_))));
    }
}
