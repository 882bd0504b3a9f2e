//! Tests for nearest-color quantization against fixed palettes

#[cfg(test)]
mod tests {
    use brickmap::color::quantizer::squared_distance;
    use brickmap::color::{ColorCode, Palette, PaletteEntry, Pixel, Quantizer};
    use brickmap::spatial::Grid;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn red_white() -> Palette {
        Palette::new(vec![
            PaletteEntry::new('R', [180, 0, 0], "🟥"),
            PaletteEntry::new('W', [255, 255, 255], "⬜"),
        ])
        .unwrap()
    }

    // Tests the documented red/white scenario
    // Verified by inverting the distance comparison
    #[test]
    fn test_red_white_scenario() {
        let palette = red_white();
        let quantizer = Quantizer::new(&palette);

        assert_eq!(quantizer.nearest([200, 10, 10]).as_str(), "R");
        assert_eq!(quantizer.nearest([250, 250, 250]).as_str(), "W");
    }

    // Tests every palette color maps to itself
    // Verified by starting the search from the second entry
    #[test]
    fn test_exact_palette_colors() {
        let palette = Palette::reference();
        let quantizer = Quantizer::new(&palette);

        for entry in palette.entries() {
            assert_eq!(quantizer.nearest(entry.pixel()), &entry.code);
        }
    }

    // Tests exact ties resolve to the first declared entry
    // Verified by using <= in the distance comparison
    #[test]
    fn test_ties_prefer_first_entry() {
        let palette = Palette::new(vec![
            PaletteEntry::new("dark", [0, 0, 0], "⬛"),
            PaletteEntry::new("light", [2, 2, 2], "⬜"),
        ])
        .unwrap();
        let quantizer = Quantizer::new(&palette);

        assert_eq!(quantizer.nearest([1, 1, 1]).as_str(), "dark");

        let reversed = Palette::new(vec![
            PaletteEntry::new("light", [2, 2, 2], "⬜"),
            PaletteEntry::new("dark", [0, 0, 0], "⬛"),
        ])
        .unwrap();
        assert_eq!(Quantizer::new(&reversed).nearest([1, 1, 1]).as_str(), "light");
    }

    // Tests out-of-range channels are compared without clamping
    // Verified by clamping channels to 0..=255 before comparison
    #[test]
    fn test_out_of_range_channels() {
        let palette = Palette::new(vec![
            PaletteEntry::new('A', [0, 0, 0], "a"),
            PaletteEntry::new('B', [255, 0, 0], "b"),
        ])
        .unwrap();
        let quantizer = Quantizer::new(&palette);

        assert_eq!(quantizer.nearest([-500, 0, 0]).as_str(), "A");
        assert_eq!(quantizer.nearest([900, 0, 0]).as_str(), "B");
        assert_eq!(squared_distance([-1, 0, 0], [1, 0, 0]), 4);
        assert_eq!(
            squared_distance([i32::MAX, 0, 0], [0, 0, 0]),
            i64::from(i32::MAX) * i64::from(i32::MAX)
        );
    }

    // Tests random pixels always quantize to a palette code
    // Verified by returning a placeholder code for distant pixels
    #[test]
    fn test_closure_over_random_pixels() {
        let palette = Palette::reference();
        let quantizer = Quantizer::new(&palette);
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..2000 {
            let pixel: Pixel = [
                rng.random_range(-64..320),
                rng.random_range(-64..320),
                rng.random_range(-64..320),
            ];
            let code = quantizer.nearest(pixel);
            assert!(palette.contains(code));

            let best = squared_distance(pixel, quantizer.nearest_entry(pixel).pixel());
            for entry in palette.entries() {
                assert!(best <= squared_distance(pixel, entry.pixel()));
            }
        }
    }

    // Tests grid quantization keeps the input shape and cell order
    // Verified by transposing the output grid
    #[test]
    fn test_quantize_preserves_shape() {
        let palette = red_white();
        let quantizer = Quantizer::new(&palette);
        let image = Grid::from_rows(vec![
            vec![[200, 10, 10], [250, 250, 250], [170, 5, 0]],
            vec![[240, 240, 255], [190, 0, 0], [255, 255, 255]],
        ])
        .unwrap();

        let codes = quantizer.quantize(&image);

        assert_eq!(codes.dimensions(), (2, 3));
        let expected = Grid::from_rows(vec![
            vec![ColorCode::from('R'), ColorCode::from('W'), ColorCode::from('R')],
            vec![ColorCode::from('W'), ColorCode::from('R'), ColorCode::from('W')],
        ])
        .unwrap();
        assert_eq!(codes, expected);
    }

    // Tests empty grids quantize to empty grids
    // Verified by panicking on zero-row input
    #[test]
    fn test_quantize_empty_grid() {
        let palette = Palette::reference();
        let image: Grid<Pixel> = Grid::from_rows(Vec::new()).unwrap();

        let codes = Quantizer::new(&palette).quantize(&image);

        assert_eq!(codes.dimensions(), (0, 0));
        assert!(codes.is_empty());
    }
}
