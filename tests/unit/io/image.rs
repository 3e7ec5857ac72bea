//! Tests for loading source images and saving reconstructed ones

#[cfg(test)]
mod tests {
    use crate::common::{HEIGHT, shredded_ramp};
    use std::fs;
    use tempfile::TempDir;
    use unshred::UnshredError;
    use unshred::io::image::{load_raster, save_raster};
    use unshred::spatial::Raster;

    // Tests a saved raster loads back within one quantization step
    // Verified by truncating instead of rounding during quantization
    #[test]
    fn test_png_round_trip() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("ramp_shredded.png");
        let raster = shredded_ramp();

        save_raster(&raster, &path).expect("save succeeds");
        let loaded = load_raster(&path).expect("load succeeds");

        assert_eq!(loaded.width(), raster.width());
        assert_eq!(loaded.height(), HEIGHT);
        let worst = raster
            .pixels()
            .iter()
            .zip(loaded.pixels().iter())
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, f64::max);
        assert!(worst <= 0.5 / 255.0 + 1e-9, "worst error {worst}");
    }

    // Tests missing parent directories are created on save
    // Verified by removing directory creation
    #[test]
    fn test_save_creates_directories() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("nested").join("deeper").join("out.png");

        save_raster(&shredded_ramp(), &path).expect("save succeeds");
        assert!(path.exists());
    }

    // Tests undecodable files report the offending path
    // Verified by mapping decode errors to FileSystem
    #[test]
    fn test_load_invalid_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("broken_shredded.png");
        fs::write(&path, "not a png").expect("write succeeds");

        let result = load_raster(&path);
        assert!(matches!(
            result,
            Err(UnshredError::InvalidImage { path: ref reported, .. }) if reported == &path
        ));

        let missing = temp_dir.path().join("missing.png");
        assert!(matches!(
            load_raster(&missing),
            Err(UnshredError::InvalidImage { .. })
        ));
    }

    // Tests an empty raster cannot be saved
    // Verified by removing the empty image check
    #[test]
    fn test_save_empty_raster() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("empty.png");
        let empty = Raster::from_fn(0, 4, |_, _| [0.0; 3]);

        assert!(matches!(
            save_raster(&empty, &path),
            Err(UnshredError::InvalidParameter { .. })
        ));
        assert!(!path.exists());
    }
}
