#[cfg(test)]
mod tests {
    use cubeinterp::errors::CubeError;
    use cubeinterp::grid::Volume;
    use cubeinterp::io::cube;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn cube_read() {
        let grid = match cube::read("tests/cube/density.cube") {
            Ok(r) => r,
            Err(e) => panic!("{}", e),
        };
        assert_eq!(grid.comments[0], " Electron density of water");
        assert_eq!(grid.origin, [-2.; 3]);
        assert_eq!(grid.counts(), [5, 5, 5]);
        assert_eq!(grid.diagonal_steps(), [1.; 3]);
        assert_eq!(grid.atoms.len(), 3);
        assert_eq!(grid.atoms[1].number, 1);
        assert_eq!(grid.atoms[1].position, [0., 1.430901, -0.886659]);
        assert_eq!(grid.values.data()[0], 0.307211E-05);
        assert_eq!(grid.values.get([2, 2, 2]), 0.5);
    }

    #[test]
    fn cube_read_missing_file() {
        match cube::read("tests/cube/missing.cube") {
            Err(CubeError::Io { .. }) => (),
            _ => panic!("Expected an I/O error"),
        }
    }

    #[test]
    fn cube_round_trip() {
        let tmp = TempDir::new().expect("Failed to create temp dir");
        let path = tmp.path().join("density.cube");
        let grid = cube::read("tests/cube/density.cube").unwrap();
        cube::write(&grid, &grid.values, &path).unwrap();
        let reread = cube::read(&path).unwrap();
        assert_eq!(reread.comments, grid.comments);
        assert_eq!(reread.origin, grid.origin);
        assert_eq!(reread.axes, grid.axes);
        assert_eq!(reread.atoms, grid.atoms);
        for (a, b) in reread.values.data().iter().zip(grid.values.data()) {
            assert!((a - b).abs() <= 1e-5 * b.abs())
        }
    }

    #[test]
    fn cube_round_trip_is_byte_identical() {
        let tmp = TempDir::new().expect("Failed to create temp dir");
        let path = tmp.path().join("esp.cube");
        let grid = cube::read("tests/cube/esp.cube").unwrap();
        cube::write(&grid, &grid.values, &path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(),
                   fs::read_to_string("tests/cube/esp.cube").unwrap());
    }

    #[test]
    fn cube_write_new_values_on_template() {
        let tmp = TempDir::new().expect("Failed to create temp dir");
        let path = tmp.path().join("ones.cube");
        let grid = cube::read("tests/cube/esp.cube").unwrap();
        let ones = Volume::new([3, 3, 3], vec![1.; 27]).unwrap();
        cube::write(&grid, &ones, &path).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        let data_lines = text.lines().skip(9).collect::<Vec<&str>>();
        assert_eq!(data_lines.len(), 5);
        assert!(data_lines[..4].iter()
                               .all(|l| l.split_whitespace().count() == 6));
        assert_eq!(data_lines[4].split_whitespace().count(), 3);
        assert!(text.ends_with("1.00000E+00\n"));
        assert_eq!(cube::read(&path).unwrap().values, ones);
    }

    /// Rewrites the esp fixture with `extra` values added (or removed if
    /// negative) from the end of the data.
    fn esp_with_values(tmp: &TempDir, extra: isize) -> std::path::PathBuf {
        let text = fs::read_to_string("tests/cube/esp.cube").unwrap();
        let mut lines = text.lines().map(String::from).collect::<Vec<String>>();
        let mut tokens = lines.split_off(9)
                              .join(" ")
                              .split_whitespace()
                              .map(String::from)
                              .collect::<Vec<String>>();
        if extra < 0 {
            tokens.truncate(tokens.len() - extra.unsigned_abs());
        } else {
            tokens.extend((0..extra).map(|_| String::from("9.99990E+01")));
        }
        lines.extend(tokens.chunks(4).map(|c| c.join(" ")));
        let path = tmp.path().join("esp.cube");
        fs::write(&path, lines.join("\n") + "\n").unwrap();
        path
    }

    #[test]
    fn cube_read_too_few_values() {
        let tmp = TempDir::new().expect("Failed to create temp dir");
        let grid = cube::read(esp_with_values(&tmp, -5)).unwrap();
        let original = cube::read("tests/cube/esp.cube").unwrap();
        assert_eq!(grid.values.shape(), [3, 3, 3]);
        assert_eq!(grid.values.data().len(), 27);
        assert_eq!(grid.values.data()[..22], original.values.data()[..22]);
        assert!(grid.values.data()[22..].iter().all(|v| *v == 0.));
    }

    #[test]
    fn cube_read_too_many_values() {
        let tmp = TempDir::new().expect("Failed to create temp dir");
        let grid = cube::read(esp_with_values(&tmp, 5)).unwrap();
        let original = cube::read("tests/cube/esp.cube").unwrap();
        assert_eq!(grid.values.data().len(), 27);
        assert_eq!(grid.values, original.values);
    }

    #[test]
    fn cube_read_malformed_value() {
        let tmp = TempDir::new().expect("Failed to create temp dir");
        let path = tmp.path().join("bad.cube");
        let text = fs::read_to_string("tests/cube/esp.cube").unwrap()
                                                             .replace("8.00000E-01", "8.00000F-01");
        fs::write(&path, text).unwrap();
        match cube::read(&path) {
            Err(CubeError::Parse { line, .. }) => assert_eq!(line, 10),
            _ => panic!("Expected a parse error"),
        }
    }
}
