/// Line-oriented parser for the ASCII solid (STL) mesh format
use std::fmt;
use std::fs;
use std::path::Path;

use log::{info, warn};
use nom::{
    bytes::complete::take_till1,
    character::complete::{space0, space1},
    combinator::eof,
    number::complete::float,
    sequence::{preceded, terminated},
    IResult,
};

use crate::error::StlError;
use crate::geometry::{Mesh, Trigon, Vec3};

/// Where the parser is in the solid / facet / loop nesting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserState {
    InFile,
    InSolid,
    InLoop,
}

impl fmt::Display for ParserState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::InFile => "outside any solid",
            Self::InSolid => "inside a solid",
            Self::InLoop => "inside a facet loop",
        })
    }
}

/// A non-fatal problem found while parsing
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    /// 1-based line number
    pub line: usize,
    pub state: ParserState,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {} ({}): {}", self.line, self.state, self.message)
    }
}

/// Result of a successful parse: the mesh plus any warnings
#[derive(Debug, Clone)]
pub struct Parsed {
    pub mesh: Mesh,
    pub diagnostics: Vec<Diagnostic>,
}

/// Read and parse a mesh file from disk
pub fn load(path: impl AsRef<Path>) -> Result<Parsed, StlError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| StlError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let parsed = parse_ascii_stl(&text)?;
    info!(
        "loaded {}: {} vertices, {} triangles, {} warnings",
        path.display(),
        parsed.mesh.vertex_count(),
        parsed.mesh.trigon_count(),
        parsed.diagnostics.len()
    );
    Ok(parsed)
}

/// Parse ASCII solid text.
///
/// Unrecognized lines become [`Diagnostic`]s and parsing carries on.
/// Running out of input before every solid is closed is an error.
pub fn parse_ascii_stl(input: &str) -> Result<Parsed, StlError> {
    let mut parser = SolidParser::default();
    let mut line_no = 0;
    for (i, line) in input.lines().enumerate() {
        line_no = i + 1;
        parser.feed(line_no, line)?;
    }
    parser.finish(line_no)
}

/// One classified input line
#[derive(Debug, Clone, Copy, PartialEq)]
enum Line {
    Blank,
    Solid,
    FacetNormal,
    OuterLoop,
    Vertex(Vec3),
    BadVertex,
    EndLoop,
    EndFacet,
    EndSolid,
    Unknown,
}

fn classify(line: &str) -> Line {
    let Ok((rest, word)) = keyword(line) else {
        return Line::Blank;
    };
    match word {
        "solid" => Line::Solid,
        "facet" => Line::FacetNormal,
        "outer" if matches!(keyword(rest), Ok((_, "loop"))) => Line::OuterLoop,
        "vertex" => match terminated(parse_vector3, preceded(space0, eof))(rest) {
            Ok((_, v)) => Line::Vertex(v),
            Err(_) => Line::BadVertex,
        },
        "endloop" => Line::EndLoop,
        "endfacet" => Line::EndFacet,
        "endsolid" => Line::EndSolid,
        _ => Line::Unknown,
    }
}

fn keyword(input: &str) -> IResult<&str, &str> {
    preceded(space0, take_till1(char::is_whitespace))(input)
}

fn parse_vector3(input: &str) -> IResult<&str, Vec3> {
    let (input, x) = preceded(space1, float)(input)?;
    let (input, y) = preceded(space1, float)(input)?;
    let (input, z) = preceded(space1, float)(input)?;
    Ok((input, Vec3::new(x, y, z)))
}

#[derive(Debug)]
struct SolidParser {
    state: ParserState,
    vertices: Vec<Vec3>,
    trigons: Vec<Trigon>,
    facet_vertices: usize,
    diagnostics: Vec<Diagnostic>,
}

impl Default for SolidParser {
    fn default() -> Self {
        Self {
            state: ParserState::InFile,
            vertices: Vec::new(),
            trigons: Vec::new(),
            facet_vertices: 0,
            diagnostics: Vec::new(),
        }
    }
}

impl SolidParser {
    fn feed(&mut self, line_no: usize, text: &str) -> Result<(), StlError> {
        use ParserState::*;

        let line = classify(text);
        if line == Line::Blank {
            return Ok(());
        }

        match (self.state, line) {
            (InFile, Line::Solid) => self.state = InSolid,

            (InSolid, Line::FacetNormal) => {}
            (InSolid, Line::OuterLoop) => {
                self.facet_vertices = 0;
                self.state = InLoop;
            }
            (InSolid, Line::EndSolid) => self.state = InFile,

            (InLoop, Line::Vertex(v)) => {
                self.vertices.push(v);
                self.facet_vertices += 1;
            }
            (InLoop, Line::BadVertex) => {
                self.warn(line_no, format!("malformed vertex: {:?}", text.trim()));
            }
            (InLoop, Line::OuterLoop | Line::EndLoop) => {}
            (InLoop, Line::EndFacet) => {
                self.close_facet(line_no)?;
                self.state = InSolid;
            }

            _ => self.warn(line_no, format!("unexpected line: {:?}", text.trim())),
        }
        Ok(())
    }

    // The last three vertices read become the facet's trigon.
    fn close_facet(&mut self, line_no: usize) -> Result<(), StlError> {
        let n = self.vertices.len();
        if n < 3 {
            return Err(StlError::IncompleteFacet {
                line: line_no,
                vertices: n,
            });
        }
        if self.facet_vertices != 3 {
            self.warn(
                line_no,
                format!("facet has {} vertices, using the last three", self.facet_vertices),
            );
        }
        self.trigons.push(Trigon::new(n - 3, n - 2, n - 1));
        Ok(())
    }

    fn warn(&mut self, line: usize, message: String) {
        let diagnostic = Diagnostic {
            line,
            state: self.state,
            message,
        };
        warn!("{diagnostic}");
        self.diagnostics.push(diagnostic);
    }

    fn finish(self, last_line: usize) -> Result<Parsed, StlError> {
        if self.state != ParserState::InFile {
            return Err(StlError::UnexpectedEof {
                state: self.state,
                line: last_line,
            });
        }
        Ok(Parsed {
            mesh: Mesh::new(self.vertices, self.trigons)?,
            diagnostics: self.diagnostics,
        })
    }
}
