use crate::errors::{CubeError, Result};
use crate::grid::{Atom, Axis, Size, Volume, VolumetricGrid};
use crate::io::reader::BufReader;
use crate::utils;
use std::fs::File;
use std::io::{self, BufRead, BufWriter, Write};
use std::path::Path;

/// Number of values written on each line of the volumetric data.
pub const VALUES_PER_LINE: usize = 6;

/// Read a cube file into a [`VolumetricGrid`].
pub fn read(path: impl AsRef<Path>) -> Result<VolumetricGrid> {
    let path = path.as_ref();
    log::info!("Reading {} as cube format.", path.display());
    let grid = from_reader(BufReader::open(path)?)?;
    log::debug!("Read grid of {:?} points and {} atoms from {}.",
                grid.counts(),
                grid.atoms.len(),
                path.display());
    Ok(grid)
}

/// Parse a cube file from an open reader.
pub fn from_reader<R: BufRead>(mut reader: BufReader<R>)
                               -> Result<VolumetricGrid> {
    let mut buffer = String::new();
    // first two lines are comments
    let comments = [reader.required_line(&mut buffer, "a comment line")?
                          .to_string(),
                    reader.required_line(&mut buffer, "a comment line")?
                          .to_string()];
    // atom count and origin, anything after the origin is ignored
    let (natoms, origin) = {
        let text = reader.required_line(&mut buffer,
                                        "the atom count and origin")?;
        let mut split = text.split_whitespace();
        let natoms: i64 = next_token(&mut split, &reader, "atom count")?;
        if natoms < 0 {
            return Err(reader.error("negative atom counts (orbital cubes) are not supported"));
        }
        let origin = next_vector(&mut split, &reader, "origin")?;
        (natoms as usize, origin)
    };
    let mut axes = [Axis::new(0, [0.; 3]); 3];
    for axis in axes.iter_mut() {
        let text = reader.required_line(&mut buffer, "a grid axis")?;
        let mut split = text.split_whitespace();
        let points: i64 = next_token(&mut split, &reader, "point count")?;
        let step = next_vector(&mut split, &reader, "step vector")?;
        *axis = Axis { points: points.unsigned_abs() as usize,
                       step,
                       angstrom: points < 0 };
    }
    // the header count is untrusted until every atom line has been read
    let mut atoms = Vec::new();
    for _ in 0..natoms {
        let text = reader.required_line(&mut buffer, "an atom")?;
        let mut split = text.split_whitespace();
        let number: i64 = next_token(&mut split, &reader, "atomic number")?;
        let charge: f64 = next_token(&mut split, &reader, "atomic charge")?;
        let position = next_vector(&mut split, &reader, "atom position")?;
        atoms.push(Atom { number,
                          charge,
                          position });
    }
    let size = Size::checked(axes[0].points, axes[1].points, axes[2].points)
        .ok_or_else(|| reader.error("grid size is too large"))?;
    // everything left is the density, regardless of its layout
    let mut data = Vec::with_capacity(size.total);
    while let Some(text) = reader.read_line(&mut buffer)? {
        for token in text.split_whitespace() {
            match token.parse::<f64>() {
                Ok(x) => data.push(x),
                Err(_) => {
                    return Err(reader.error(format!("cannot parse \"{}\" as a value",
                                                    token)))
                }
            }
        }
    }
    match data.len().cmp(&size.total) {
        std::cmp::Ordering::Less => {
            log::warn!("{}: found {} values but the header declares {}, padding with zeros.",
                       reader.path().display(),
                       data.len(),
                       size.total);
            data.resize(size.total, 0.);
        }
        std::cmp::Ordering::Greater => {
            log::warn!("{}: found {} values but the header declares {}, truncating.",
                       reader.path().display(),
                       data.len(),
                       size.total);
            data.truncate(size.total);
        }
        std::cmp::Ordering::Equal => (),
    }
    let values = Volume::new(size.shape(), data)?;
    Ok(VolumetricGrid { comments,
                        origin,
                        axes,
                        atoms,
                        values })
}

/// Parses the next whitespace separated token of a header line.
fn next_token<'a, T, I, R>(split: &mut I,
                           reader: &BufReader<R>,
                           what: &str)
                           -> Result<T>
    where T: std::str::FromStr,
          I: Iterator<Item = &'a str>,
          R: BufRead
{
    match split.next() {
        Some(token) => token.parse::<T>().map_err(|_| {
                           reader.error(format!("cannot parse \"{}\" as the {}",
                                                token, what))
                       }),
        None => Err(reader.error(format!("missing the {}", what))),
    }
}

/// Parses the next three tokens of a header line as a vector.
fn next_vector<'a, I, R>(split: &mut I,
                         reader: &BufReader<R>,
                         what: &str)
                         -> Result<[f64; 3]>
    where I: Iterator<Item = &'a str>,
          R: BufRead
{
    let mut out = [0f64; 3];
    for x in out.iter_mut() {
        *x = next_token(split, reader, what)?;
    }
    Ok(out)
}

/// Write `values` to `path` in the cube format using the header, geometry and
/// atoms of `template`.
pub fn write(template: &VolumetricGrid,
             values: &Volume,
             path: impl AsRef<Path>)
             -> Result<()> {
    let path = path.as_ref();
    if values.shape() != template.counts() {
        return Err(CubeError::ShapeMismatch { expected: template.counts(),
                                              found: values.shape() });
    }
    log::info!("Writing cube file {}.", path.display());
    let file = File::create(path).map_err(|e| CubeError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    to_writer(&mut writer, template, values).and_then(|_| writer.flush())
                                            .map_err(|e| CubeError::io(path, e))
}

/// Writes the cube file to any writer, the shape of `values` is assumed to
/// match the template.
pub fn to_writer<W: Write>(writer: &mut W,
                           template: &VolumetricGrid,
                           values: &Volume)
                           -> io::Result<()> {
    writeln!(writer, "{}", template.comments[0])?;
    writeln!(writer, "{}", template.comments[1])?;
    let [x, y, z] = template.origin;
    writeln!(writer,
             "{:5} {:12.6} {:12.6} {:12.6}",
             template.atoms.len(),
             x,
             y,
             z)?;
    for axis in template.axes.iter() {
        let points = if axis.angstrom {
            -(axis.points as i64)
        } else {
            axis.points as i64
        };
        let [x, y, z] = axis.step;
        writeln!(writer, "{:5} {:12.6} {:12.6} {:12.6}", points, x, y, z)?;
    }
    for atom in template.atoms.iter() {
        let [x, y, z] = atom.position;
        writeln!(writer,
                 "{:5} {:12.6} {:12.6} {:12.6} {:12.6}",
                 atom.number, atom.charge, x, y, z)?;
    }
    for row in values.data().chunks(VALUES_PER_LINE) {
        for value in row {
            write!(writer, " {:>13}", utils::scientific(*value, 5))?;
        }
        writeln!(writer)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const WATER: &str = " Electron density
 generated for testing
    3    -1.000000    -2.000000    -3.000000
    2     0.500000     0.000000     0.000000
    2     0.000000     0.500000     0.000000
    3     0.000000     0.000000     0.500000
    8     8.000000     0.000000     0.000000     0.117300
    1     1.000000     0.000000     0.757200    -0.469200
    1     1.000000     0.000000    -0.757200    -0.469200
  1.00000E-01  2.00000E-01  3.00000E-01  4.00000E-01  5.00000E-01  6.00000E-01
  7.00000E-01  8.00000E-01  9.00000E-01  1.00000E+00  1.10000E+00  1.20000E+00
";

    fn parse(text: &str) -> Result<VolumetricGrid> {
        from_reader(BufReader::new(text.as_bytes(), "water.cube"))
    }

    fn render(grid: &VolumetricGrid) -> String {
        let mut out = Vec::new();
        to_writer(&mut out, grid, &grid.values).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn cube_parse_header() {
        let grid = parse(WATER).unwrap();
        assert_eq!(grid.comments[0], " Electron density");
        assert_eq!(grid.origin, [-1., -2., -3.]);
        assert_eq!(grid.counts(), [2, 2, 3]);
        assert_eq!(grid.axes[2].step, [0., 0., 0.5]);
        assert_eq!(grid.atoms.len(), 3);
        assert_eq!(grid.atoms[0],
                   Atom { number: 8,
                          charge: 8.,
                          position: [0., 0., 0.1173] });
    }

    #[test]
    fn cube_parse_values_row_major() {
        let grid = parse(WATER).unwrap();
        assert_eq!(grid.values.shape(), [2, 2, 3]);
        assert_eq!(grid.values.get([0, 0, 0]), 0.1);
        assert_eq!(grid.values.get([0, 1, 2]), 0.6);
        assert_eq!(grid.values.get([1, 0, 0]), 0.7);
        assert_eq!(grid.values.get([1, 1, 2]), 1.2);
    }

    #[test]
    fn cube_parse_values_any_layout() {
        let single_column = WATER.lines()
                                 .take(9)
                                 .chain((1..=12).map(|_| " 1.0"))
                                 .collect::<Vec<&str>>()
                                 .join("\n");
        let grid = parse(&single_column).unwrap();
        assert!(grid.values.data().iter().all(|v| *v == 1.))
    }

    #[test]
    fn cube_parse_bad_value() {
        let text = WATER.replace("9.00000E-01", "9.0000OE-01");
        match parse(&text) {
            Err(CubeError::Parse { line, .. }) => assert_eq!(line, 11),
            _ => panic!("Expected a parse error"),
        }
    }

    #[test]
    fn cube_parse_missing_atom() {
        let text = WATER.lines().take(8).collect::<Vec<&str>>().join("\n");
        match parse(&text) {
            Err(CubeError::Parse { line, message, .. }) => {
                assert_eq!(line, 9);
                assert!(message.contains("atom"));
            }
            _ => panic!("Expected a parse error"),
        }
    }

    #[test]
    fn cube_parse_huge_atom_count() {
        let mut lines = WATER.lines().take(6).collect::<Vec<&str>>();
        lines[2] = "1000000000000000000 0 0 0";
        match parse(&lines.join("\n")) {
            Err(CubeError::Parse { line, message, .. }) => {
                assert_eq!(line, 7);
                assert!(message.contains("atom"));
            }
            _ => panic!("Expected a parse error"),
        }
    }

    #[test]
    fn cube_parse_missing_axis() {
        let text = WATER.lines().take(4).collect::<Vec<&str>>().join("\n");
        assert!(matches!(parse(&text), Err(CubeError::Parse { .. })))
    }

    #[test]
    fn cube_parse_short_origin() {
        let text = WATER.replace("    3    -1.000000    -2.000000    -3.000000",
                                 "    3    -1.000000");
        assert!(matches!(parse(&text), Err(CubeError::Parse { line: 3, .. })))
    }

    #[test]
    fn cube_parse_negative_atoms() {
        let text = WATER.replace("    3    -1.000000", "   -3    -1.000000");
        assert!(matches!(parse(&text), Err(CubeError::Parse { line: 3, .. })))
    }

    #[test]
    fn cube_parse_angstrom_axis() {
        let text = WATER.replace("    3     0.000000     0.000000     0.500000",
                                 "   -3     0.000000     0.000000     0.500000");
        let grid = parse(&text).unwrap();
        assert_eq!(grid.counts(), [2, 2, 3]);
        assert!(grid.axes[2].angstrom);
        assert!(render(&grid).contains("   -3     0.000000     0.000000     0.500000\n"));
    }

    #[test]
    fn cube_parse_short_data() {
        let text = WATER.replace("  7.00000E-01  8.00000E-01  9.00000E-01  1.00000E+00  1.10000E+00  1.20000E+00\n",
                                 "  7.00000E-01\n");
        let grid = parse(&text).unwrap();
        assert_eq!(grid.values.data().len(), 12);
        assert_eq!(grid.values.get([1, 0, 0]), 0.7);
        assert_eq!(grid.values.get([1, 1, 2]), 0.);
    }

    #[test]
    fn cube_parse_long_data() {
        let text = format!("{}  9.90000E+01\n", WATER);
        let grid = parse(&text).unwrap();
        assert_eq!(grid.values.data().len(), 12);
        assert_eq!(grid.values.get([1, 1, 2]), 1.2);
    }

    #[test]
    fn cube_write_header() {
        let grid = parse(WATER).unwrap();
        let out = render(&grid);
        let lines = out.lines().collect::<Vec<&str>>();
        assert_eq!(lines[0], " Electron density");
        assert_eq!(lines[2], "    3    -1.000000    -2.000000    -3.000000");
        assert_eq!(lines[3], "    2     0.500000     0.000000     0.000000");
        assert_eq!(lines[6],
                   "    8     8.000000     0.000000     0.000000     0.117300");
    }

    #[test]
    fn cube_write_values() {
        let grid = parse(WATER).unwrap();
        let out = render(&grid);
        let lines = out.lines().collect::<Vec<&str>>();
        assert_eq!(lines.len(), 11);
        assert_eq!(lines[9],
                   "   1.00000E-01   2.00000E-01   3.00000E-01   4.00000E-01   5.00000E-01   6.00000E-01");
        assert!(out.ends_with("1.20000E+00\n"));
    }

    #[test]
    fn cube_write_partial_last_line() {
        let mut grid = parse(WATER).unwrap();
        grid.axes[2].points = 2;
        grid.values = Volume::new([2, 2, 2], vec![-0.5; 8]).unwrap();
        let out = render(&grid);
        let lines = out.lines().collect::<Vec<&str>>();
        assert_eq!(lines.len(), 11);
        assert_eq!(lines[10], "  -5.00000E-01  -5.00000E-01");
        assert!(out.ends_with("-5.00000E-01\n"));
    }

    #[test]
    fn cube_write_shape_mismatch() {
        let grid = parse(WATER).unwrap();
        let values = Volume::zeros([2, 3, 2]);
        let path = std::env::temp_dir().join("cubeinterp_never_written.cube");
        match write(&grid, &values, &path) {
            Err(CubeError::ShapeMismatch { expected, found }) => {
                assert_eq!(expected, [2, 2, 3]);
                assert_eq!(found, [2, 3, 2]);
            }
            _ => panic!("Expected a shape mismatch"),
        }
        assert!(!path.exists());
    }
}
