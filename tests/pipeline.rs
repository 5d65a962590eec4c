use gaussmap::blur::{BlurMode, blur_file, derived_output_path};
use gaussmap::config::{BlurSettings, HeightmapSettings, ToolSettings};
use gaussmap::heightmap::mesh_to_heightmap;
use gaussmap::plot::{PlotSettings, save_kernel_plot};
use gaussmap::sph::SmoothingKernel;
use gaussmap::{Error, GAUSSIAN_5X5, Grid, convolve};
use image::{GrayImage, Luma, Rgb, RgbImage};
use std::fs;
use tempfile::TempDir;

#[test]
fn gray_blur_writes_prefixed_rgb_file() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("square.png");
    let mut img = GrayImage::from_pixel(8, 8, Luma([0]));
    for y in 2..6 {
        for x in 2..6 {
            img.put_pixel(x, y, Luma([200]));
        }
    }
    img.save(&input).unwrap();

    let output = blur_file(&input, BlurMode::Grayscale, &BlurSettings::default()).unwrap();
    assert_eq!(output, dir.path().join("new_square.png"));

    let blurred = image::open(&output).unwrap();
    assert!(matches!(blurred, image::DynamicImage::ImageRgb8(_)));
    let blurred = blurred.to_rgb8();
    assert_eq!(blurred.dimensions(), (8, 8));

    // сравнение с прямой свёрткой сетки
    let grid = Grid::from_luma_image(&image::open(&input).unwrap());
    let expected = convolve(&grid, &GAUSSIAN_5X5).to_rgb_image().unwrap();
    assert_eq!(blurred, expected);

    let center = blurred.get_pixel(3, 3);
    assert_eq!(center[0], center[1]);
    assert_eq!(center[1], center[2]);
    assert!(center[0] < 200 && center[0] > 0);
}

#[test]
fn rgb_blur_honours_passes_and_prefix() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("flat.png");
    RgbImage::from_pixel(9, 9, Rgb([30, 60, 90])).save(&input).unwrap();

    let settings = BlurSettings {
        passes: 2,
        output_prefix: "soft_".to_string(),
    };
    let output = blur_file(&input, BlurMode::Rgb, &settings).unwrap();
    assert_eq!(output, derived_output_path(&input, "soft_"));

    let blurred = image::open(&output).unwrap().to_rgb8();
    assert_eq!(blurred.get_pixel(4, 4), &Rgb([30, 60, 90]));
    assert!(blurred.get_pixel(0, 0)[2] < 90);
}

#[test]
fn missing_image_is_an_error_and_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("absent.png");
    let err = blur_file(&input, BlurMode::Rgb, &BlurSettings::default()).unwrap_err();
    assert!(matches!(err, Error::Image(_)));
    assert!(!dir.path().join("new_absent.png").exists());
}

#[test]
fn obj_file_becomes_normalized_heightmap() {
    let dir = TempDir::new().unwrap();
    let obj = dir.path().join("hill.obj");
    fs::write(
        &obj,
        "# hill\nv 0.0 4.0 0.0\nv 0.5 2.0 0.5\nv -1.0 1.0 1.0\nvn 0 1 0\nf 1 2 3\n",
    )
    .unwrap();

    let settings = HeightmapSettings {
        output: dir.path().join("hill.png"),
        ..HeightmapSettings::default()
    };
    let heightmap = mesh_to_heightmap(&obj, &settings).unwrap();
    assert_eq!(heightmap.dim, 4);
    // (4 + 2) / 2 = 3 — максимум
    assert!((heightmap.get(2, 2) - 255.0).abs() < 1e-9);
    assert!((heightmap.get(1, 3) - 85.0).abs() < 1e-9);

    heightmap.save_as_png(&settings.output).unwrap();
    let saved = image::open(&settings.output).unwrap().to_rgb8();
    assert_eq!(saved.dimensions(), (4, 4));
    assert_eq!(saved.get_pixel(2, 2), &Rgb([255, 255, 255]));
    assert_eq!(saved.get_pixel(3, 1), &Rgb([85, 85, 85]));
}

#[test]
fn malformed_obj_reports_line() {
    let dir = TempDir::new().unwrap();
    let obj = dir.path().join("broken.obj");
    fs::write(&obj, "v 0 0 0\nv 1 x 1\n").unwrap();
    let err = mesh_to_heightmap(&obj, &HeightmapSettings::default()).unwrap_err();
    assert!(matches!(err, Error::MeshParse { line: 2, .. }));
}

#[test]
fn config_file_and_plot_round_trip() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("tools.toml");
    fs::write(
        &config,
        "[plot]\nwidth = 120\nheight = 60\n\n[heightmap]\nsmoothing_passes = 2\n",
    )
    .unwrap();
    let settings = ToolSettings::from_toml_file(&config).unwrap();
    assert_eq!(settings.heightmap.smoothing_passes, 2);
    assert_eq!(
        settings.plot,
        PlotSettings {
            width: 120,
            height: 60,
            ..PlotSettings::default()
        }
    );

    let png = dir.path().join("visc.png");
    save_kernel_plot(SmoothingKernel::Viscosity, &settings.plot, false, &png).unwrap();
    assert_eq!(image::open(&png).unwrap().to_rgb8().dimensions(), (120, 60));
}
