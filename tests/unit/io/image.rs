//! Tests for image loading and PNG preview export

#[cfg(test)]
mod tests {
    use brickmap::PixelMapError;
    use brickmap::color::{ColorCode, Palette};
    use brickmap::io::configuration::MAX_SCALE;
    use brickmap::io::image::{
        check_scale, export_preview_png, load_pixels, render_preview, rgb_to_grid, scaled_edge,
    };
    use brickmap::spatial::Grid;
    use image::{Rgb, RgbImage};
    use tempfile::TempDir;

    fn checker() -> RgbImage {
        RgbImage::from_fn(3, 2, |x, y| {
            if (x + y) % 2 == 0 {
                Rgb([250, 250, 250])
            } else {
                Rgb([190, 10, 0])
            }
        })
    }

    // Tests pixel grids follow image coordinates
    // Verified by transposing rows and columns
    #[test]
    fn test_rgb_to_grid() {
        let grid = rgb_to_grid(&checker());

        assert_eq!(grid.dimensions(), (2, 3));
        assert_eq!(grid.get(0, 0), Some(&[250, 250, 250]));
        assert_eq!(grid.get(1, 0), Some(&[190, 10, 0]));
        assert_eq!(grid.get(2, 1), Some(&[190, 10, 0]));
    }

    // Tests loading with and without resizing
    // Verified by ignoring the size argument
    #[test]
    fn test_load_pixels() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("checker.png");
        checker().save(&path).unwrap();

        let original = load_pixels(&path, None).unwrap();
        assert_eq!(original.dimensions(), (2, 3));

        let resized = load_pixels(&path, Some(4)).unwrap();
        assert_eq!(resized.dimensions(), (4, 4));

        assert!(matches!(
            load_pixels(&path, Some(0)),
            Err(PixelMapError::InvalidParameter { .. })
        ));
    }

    // Tests missing files report ImageLoad with the path
    // Verified by mapping load errors to FileSystem
    #[test]
    fn test_load_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("absent.png");

        match load_pixels(&path, None) {
            Err(PixelMapError::ImageLoad { path: reported, .. }) => assert_eq!(reported, path),
            _ => unreachable!("Expected ImageLoad error type"),
        }
    }

    // Tests each cell becomes a scale x scale block
    // Verified by scaling only the width
    #[test]
    fn test_render_preview_blocks() {
        let codes = Grid::from_rows(vec![vec![ColorCode::from('R'), ColorCode::from("??")]])
            .unwrap();
        let img = render_preview(&codes, &Palette::reference(), 3).unwrap();

        assert_eq!(img.dimensions(), (6, 3));
        assert_eq!(img.get_pixel(0, 0), &Rgb([180, 0, 0]));
        assert_eq!(img.get_pixel(2, 2), &Rgb([180, 0, 0]));
        // Unknown codes render black
        assert_eq!(img.get_pixel(3, 0), &Rgb([0, 0, 0]));

        assert!(render_preview(&codes, &Palette::reference(), 0).is_err());
    }

    // Tests oversized scales fail instead of overflowing the image size
    // Verified by multiplying the grid size by the scale unchecked
    #[test]
    fn test_render_preview_rejects_oversized_scale() {
        let codes = Grid::from_rows(vec![vec![ColorCode::from('R'), ColorCode::from('W')]])
            .unwrap();

        match render_preview(&codes, &Palette::reference(), 3_000_000_000) {
            Err(PixelMapError::InvalidParameter { parameter, .. }) => {
                assert_eq!(parameter, "scale");
            }
            _ => unreachable!("Expected InvalidParameter for an oversized scale"),
        }
        assert!(render_preview(&codes, &Palette::reference(), MAX_SCALE + 1).is_err());

        let img = render_preview(&codes, &Palette::reference(), MAX_SCALE).unwrap();
        assert_eq!(img.dimensions(), (2 * MAX_SCALE, MAX_SCALE));
    }

    // Tests scale bounds and edge overflow detection
    // Verified by using wrapping multiplication for the edge
    #[test]
    fn test_scale_bounds() {
        assert!(check_scale(0).is_err());
        assert!(check_scale(1).is_ok());
        assert!(check_scale(MAX_SCALE).is_ok());
        assert!(check_scale(MAX_SCALE + 1).is_err());

        assert_eq!(scaled_edge(4, 8).unwrap(), 32);
        assert_eq!(scaled_edge(0, 8).unwrap(), 0);
        assert!(scaled_edge(100_000_000, MAX_SCALE).is_err());
        assert!(scaled_edge(usize::MAX, 1).is_err());
    }

    // Tests preview export writes a decodable PNG
    // Verified by skipping the save call
    #[test]
    fn test_export_preview_png() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out").join("preview.png");
        let codes = Grid::from_rows(vec![
            vec![ColorCode::from('U'), ColorCode::from('Y')],
            vec![ColorCode::from('G'), ColorCode::from('W')],
        ])
        .unwrap();

        export_preview_png(&codes, &Palette::reference(), 2, &path).unwrap();

        let saved = image::open(&path).unwrap().to_rgb8();
        assert_eq!(saved.dimensions(), (4, 4));
        assert_eq!(saved.get_pixel(3, 0), &Rgb([255, 205, 0]));
        assert_eq!(saved.get_pixel(0, 3), &Rgb([0, 130, 0]));
    }

    // Tests empty grids cannot be exported
    // Verified by removing the empty check
    #[test]
    fn test_export_empty_preview() {
        let temp_dir = TempDir::new().unwrap();
        let empty: Grid<ColorCode> = Grid::from_rows(Vec::new()).unwrap();

        let result = export_preview_png(
            &empty,
            &Palette::reference(),
            8,
            &temp_dir.path().join("empty.png"),
        );
        assert!(result.is_err());
    }
}
