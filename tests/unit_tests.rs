//! Unit tests for the SeaVis building blocks
//!
//! These cover region subsetting, season definitions, masked compositing,
//! color mapping, the statistics ledger and configuration parsing without
//! touching any NetCDF file.

use chrono::{TimeZone, Utc};
use ndarray::{Array2, Array3};
use sea_vis::{
    aggregate::{magnitude, percentile, signed_magnitude, MaskedGrid, SeasonalAggregator},
    config::{ColorField, RunConfig},
    dataset::{DatasetLocator, InMemoryFields, YearId},
    errors::SeaVisError,
    parallel::ParallelConfig,
    region::{axis_indices, BoundingBox, RegionSubset},
    render::{
        coastline::{clip_segment, Coastline},
        colormap::{parse_hex, ramp},
        format_lat, format_lon,
        frame::{fractional_index, MapFrame, Margins},
        output_path,
        text::FontBook,
        MapRenderer, RenderStyle,
    },
    season::{Season, SeasonPreset, SeasonSet, DAYS_PER_YEAR},
    stats::{format_report, log_file_name, write_report, StatsLedger},
};
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn test_error_messages() {
    let err = SeaVisError::DatasetNotFound {
        year: "2011".to_string(),
        path: PathBuf::from("Year_11/year_11_combined.nc"),
    };
    let msg = format!("{err}");
    assert!(msg.contains("2011"));
    assert!(msg.contains("Year_11/year_11_combined.nc"));

    let err = SeaVisError::EmptyRegion {
        axis: "latitude",
        lower: 5.0,
        upper: 30.0,
    };
    assert!(format!("{err}").contains("select no latitude values"));

    let err = SeaVisError::InvalidConfig("quiver scale must be positive".to_string());
    assert_eq!(
        format!("{err}"),
        "Invalid configuration: quiver scale must be positive"
    );
}

#[test]
fn test_parallel_config() {
    assert!(ParallelConfig::default().num_threads.is_none());
    assert_eq!(ParallelConfig::with_threads(4).num_threads, Some(4));
    assert!(ParallelConfig::all_cores().num_threads.unwrap() > 0);

    let zero = ParallelConfig::with_threads(0).setup_global_pool();
    assert!(matches!(zero, Err(SeaVisError::ThreadPoolError(_))));
}

#[test]
fn test_axis_indices_inclusive_bounds() {
    let lat = [0.0, 10.0, 20.0, 30.0, 40.0];
    assert_eq!(axis_indices(&lat, 5.0, 30.0), vec![1, 2, 3]);
    assert_eq!(axis_indices(&lat, 10.0, 10.0), vec![1]);
    assert!(axis_indices(&lat, 41.0, 50.0).is_empty());

    // Descending coordinates keep array order
    let descending = [40.0, 30.0, 20.0, 10.0, 0.0];
    assert_eq!(axis_indices(&descending, 5.0, 30.0), vec![1, 2, 3]);
}

#[test]
fn test_region_subset_applies_to_slices() {
    let lat = [0.0, 10.0, 20.0, 30.0, 40.0];
    let lon = [70.0, 80.0, 90.0, 100.0];
    let bbox = BoundingBox::new(5.0, 25.0, 75.0, 95.0);
    let region = RegionSubset::new(&lat, &lon, &bbox).unwrap();

    assert_eq!(region.shape(), (2, 2));
    assert_eq!(region.lat().to_vec(), vec![10.0, 20.0]);
    assert_eq!(region.lon().to_vec(), vec![80.0, 90.0]);

    let full = Array2::from_shape_fn((5, 4), |(r, c)| (r * 10 + c) as f32);
    let subset = region.apply(full.view());
    assert_eq!(subset, ndarray::arr2(&[[11.0, 12.0], [21.0, 22.0]]));
}

#[test]
fn test_empty_region_is_an_error() {
    let lat = [0.0, 10.0, 20.0];
    let lon = [80.0, 90.0];

    let err = RegionSubset::new(&lat, &lon, &BoundingBox::new(50.0, 60.0, 75.0, 95.0)).unwrap_err();
    assert!(matches!(err, SeaVisError::EmptyRegion { axis: "latitude", .. }));

    let err = RegionSubset::new(&lat, &lon, &BoundingBox::new(0.0, 20.0, 100.0, 110.0)).unwrap_err();
    assert!(matches!(err, SeaVisError::EmptyRegion { axis: "longitude", .. }));
}

#[test]
fn test_bay_of_bengal_defaults() {
    let bbox = BoundingBox::default();
    assert_eq!(bbox, BoundingBox::bay_of_bengal());
    assert_eq!((bbox.lat_min, bbox.lat_max), (5.0, 30.0));
    assert_eq!((bbox.lon_min, bbox.lon_max), (75.0, 100.0));
    assert!(bbox.contains(15.0, 88.0));
    assert!(!bbox.contains(31.0, 88.0));
}

#[test]
fn test_quarterly_seasons_partition_the_year() {
    let seasons = SeasonSet::quarterly();
    assert_eq!(seasons.names(), vec!["Winter", "Summer", "Spring", "Autumn"]);
    assert!(seasons.is_partition(DAYS_PER_YEAR));

    let winter = seasons.get("Winter").unwrap();
    assert_eq!(winter.days.len(), 91);
    assert_eq!(winter.first_day(), Some(334));
    assert_eq!(winter.last_day(), Some(59));

    let summer = seasons.get("Summer").unwrap();
    assert_eq!((summer.first_day(), summer.last_day()), (Some(60), Some(151)));
    assert_eq!(seasons.get("Spring").unwrap().days.len(), 91);
    assert_eq!(seasons.get("Autumn").unwrap().days.len(), 91);
}

#[test]
fn test_monthly_seasons_partition_the_year() {
    let seasons = SeasonPreset::Monthly.build();
    assert_eq!(seasons.len(), 12);
    assert!(seasons.is_partition(DAYS_PER_YEAR));
    assert_eq!(seasons.get("Feb").unwrap().days.len(), 28);
    assert_eq!(seasons.get("Dec").unwrap().last_day(), Some(364));
    seasons.validate(DAYS_PER_YEAR).unwrap();
}

#[test]
fn test_season_validation() {
    SeasonSet::quarterly().validate(365).unwrap();

    // A leap-day index is out of range for a 365-step file
    let leap = SeasonSet::new(vec![Season::from_ranges("All", &[0..366])]);
    assert!(matches!(leap.validate(365), Err(SeaVisError::InvalidSeason(_))));
    assert!(!leap.is_partition(365));

    assert!(SeasonSet::new(Vec::new()).validate(365).is_err());
    assert!(SeasonSet::new(vec![Season::new("Empty", Vec::new())])
        .validate(365)
        .is_err());
    assert!(SeasonSet::new(vec![Season::new("Twice", vec![3, 3])])
        .validate(365)
        .is_err());
    assert!(SeasonSet::new(vec![
        Season::new("Same", vec![0]),
        Season::new("Same", vec![1]),
    ])
    .validate(365)
    .is_err());
}

#[test]
fn test_masked_mean_ignores_fill_values() {
    let stack = Array3::from_shape_vec((3, 1, 1), vec![1.0_f32, 1.0e31, 3.0]).unwrap();
    let mean = SeasonalAggregator::default().masked_mean(stack.view());
    assert_eq!(mean.get(0, 0), Some(2.0));
}

#[test]
fn test_masked_mean_applies_divisor() {
    let stack = Array3::from_shape_vec((2, 1, 1), vec![100.0_f32, 200.0]).unwrap();
    let mean = SeasonalAggregator::new(1.0e30, 100.0).masked_mean(stack.view());
    assert!(approx(mean.get(0, 0).unwrap(), 1.5));
}

#[test]
fn test_all_missing_cell_stays_missing() {
    let stack = Array3::from_shape_vec((2, 1, 2), vec![1.0e31_f32, 4.0, 1.0e31, 6.0]).unwrap();
    let mean = SeasonalAggregator::default().masked_mean(stack.view());

    assert_eq!(mean.get(0, 0), None);
    assert_eq!(mean.get(0, 1), Some(5.0));
    assert_eq!(mean.valid_count(), 1);
    assert_eq!(mean.min_max(), Some((5.0, 5.0)));
}

#[test]
fn test_mask_and_scale_single_slice() {
    let slice = ndarray::arr2(&[[250.0_f32, f32::NAN], [1.0e31, -50.0]]);
    let grid = SeasonalAggregator::new(1.0e30, 100.0).mask_and_scale(slice.view());
    assert_eq!(grid.get(0, 0), Some(2.5));
    assert_eq!(grid.get(0, 1), None);
    assert_eq!(grid.get(1, 0), None);
    assert_eq!(grid.get(1, 1), Some(-0.5));
}

#[test]
fn test_signed_magnitude_signs() {
    let u = MaskedGrid::from_options(&ndarray::arr2(&[[Some(3.0), Some(-3.0), Some(0.0), None]]));
    let v = MaskedGrid::from_options(&ndarray::arr2(&[[Some(4.0), Some(4.0), Some(4.0), Some(1.0)]]));

    let signed = signed_magnitude(&u, &v).unwrap();
    assert!(approx(signed.get(0, 0).unwrap(), 5.0));
    assert!(approx(signed.get(0, 1).unwrap(), -5.0));
    assert!(approx(signed.get(0, 2).unwrap(), 0.0));
    assert_eq!(signed.get(0, 3), None);

    let plain = magnitude(&u, &v).unwrap();
    assert!(approx(plain.get(0, 1).unwrap(), 5.0));
    assert!(approx(plain.get(0, 2).unwrap(), 4.0));
}

#[test]
fn test_grid_shape_mismatch() {
    let a = MaskedGrid::filled((2, 2), 1.0);
    let b = MaskedGrid::filled((2, 3), 1.0);
    assert!(signed_magnitude(&a, &b).is_err());
    assert!(MaskedGrid::new(Array2::zeros((2, 2)), Array2::from_elem((3, 2), true)).is_err());
}

#[test]
fn test_percentile_interpolates() {
    let grid = MaskedGrid::from_options(&ndarray::arr2(&[[Some(1.0), Some(2.0), Some(3.0)], [
        Some(4.0),
        Some(5.0),
        None,
    ]]));
    assert_eq!(percentile(&grid, 50.0), Some(3.0));
    assert_eq!(percentile(&grid, 25.0), Some(2.0));
    assert!(approx(percentile(&grid, 90.0).unwrap(), 4.6));
    assert_eq!(percentile(&MaskedGrid::from_options(&ndarray::arr2(&[[None]])), 50.0), None);
}

#[test]
fn test_color_scale_out_of_range_and_missing() {
    let scale = RenderStyle::default().color_scale().unwrap();
    let grey = parse_hex("#D3D3D3").unwrap();

    assert_eq!(scale.color_for(Some(0.5)), grey);
    assert_eq!(scale.color_for(Some(-0.5)), grey);
    assert_eq!(scale.color_for(None), parse_hex("#FFFFFF").unwrap());
    assert_eq!(scale.color_for(Some(0.3)), ramp(1.0));
    assert_eq!(scale.color_for(Some(-0.3)), ramp(0.0));
    assert_eq!(scale.color_for(Some(0.0)), image::Rgba([247, 247, 247, 255]));

    let ticks = scale.ticks(5);
    assert_eq!(ticks.len(), 5);
    assert!(approx(ticks[0], -0.3));
    assert!(approx(ticks[2], 0.0));
    assert!(approx(ticks[4], 0.3));
}

#[test]
fn test_parse_hex_rejects_garbage() {
    assert_eq!(parse_hex("#000000").unwrap(), image::Rgba([0, 0, 0, 255]));
    assert!(parse_hex("#GGGGGG").is_err());
    assert!(parse_hex("#FFF").is_err());
}

#[test]
fn test_style_titles_and_paths() {
    let style = RenderStyle::default();
    assert_eq!(style.title("Winter", "2011"), "Satellite : Winter 2011 (Bay of Bengal)");
    assert_eq!(
        output_path(Path::new("Image_output"), "Winter", "2011"),
        PathBuf::from("Image_output/Winter/Winter-2011.png")
    );
    assert_eq!(format_lon(80.0), "80°E");
    assert_eq!(format_lat(10.0), "10°N");
    assert_eq!(format_lat(-2.5), "2.5°S");
}

#[test]
fn test_fractional_index_clamps_half_a_cell() {
    let coords = [0.0, 1.0, 2.0];
    assert_eq!(fractional_index(&coords, 1.5), Some(1.5));
    assert_eq!(fractional_index(&coords, 2.4), Some(2.0));
    assert_eq!(fractional_index(&coords, -0.4), Some(0.0));
    assert_eq!(fractional_index(&coords, 3.0), None);
}

#[test]
fn test_map_frame_keeps_aspect() {
    let bbox = BoundingBox::bay_of_bengal();
    let frame = MapFrame::fit(bbox, 2000, 1600, Margins::for_image(2000, 1600));
    assert!((frame.width - frame.height).abs() < 1e-3);

    let (x, y) = frame.to_pixel(bbox.lon_min, bbox.lat_max);
    assert!((x - frame.left).abs() < 1e-3);
    assert!((y - frame.top).abs() < 1e-3);
}

#[test]
fn test_coastline_parse_and_clip() {
    let text = "# sample\n80 10\n81 11\n>\n82,12\n83 13\n84 14\n\n85 15\n";
    let coast = Coastline::parse(text).unwrap();
    assert_eq!(coast.segments().len(), 2);
    assert_eq!(coast.segments()[1], vec![(82.0, 12.0), (83.0, 13.0), (84.0, 14.0)]);

    assert!(Coastline::parse("80 north\n").is_err());

    let bbox = BoundingBox::bay_of_bengal();
    let clipped = clip_segment((70.0, 10.0), (90.0, 10.0), &bbox).unwrap();
    assert_eq!(clipped, ((75.0, 10.0), (90.0, 10.0)));
    assert!(clip_segment((60.0, 10.0), (70.0, 12.0), &bbox).is_none());
}

#[test]
fn test_ledger_mean_and_deviations() {
    let mut ledger = StatsLedger::new();
    ledger.record("2011", "Winter", 0.1, -0.1);
    ledger.record("2012", "Winter", 0.3, 0.1);
    ledger.record("2013", "Winter", 0.2, 0.0);
    ledger.record("2011", "Summer", 1.0, 2.0);

    let summaries = ledger.summarize().unwrap();
    assert_eq!(summaries.len(), 2);
    assert_eq!(summaries[0].season, "Winter");

    let winter = &summaries[0];
    assert!(approx(winter.mean_min, 0.2));
    assert!(approx(winter.mean_max, 0.0));
    assert_eq!(winter.deviations.len(), 3);
    assert!(approx(winter.deviations[0].min_deviation, -0.1));
    assert!(approx(winter.deviations[1].max_deviation, 0.1));
    assert_eq!(winter.deviations[2].year, "2013");

    let summer = &summaries[1];
    assert!(approx(summer.deviations[0].min_deviation, 0.0));
}

#[test]
fn test_ledger_merge_and_empty() {
    let empty = StatsLedger::new();
    assert!(empty.is_empty());
    assert!(matches!(empty.summarize(), Err(SeaVisError::EmptyStatistics)));

    let mut run = StatsLedger::new();
    let mut year = StatsLedger::new();
    year.record("2015", "Spring", -0.2, 0.4);
    run.merge(year);
    assert_eq!(run.samples("Spring").unwrap().len(), 1);
}

#[test]
fn test_report_format() {
    let mut ledger = StatsLedger::new();
    ledger.record("2011", "Winter", 0.1, 0.5);
    ledger.record("2012", "Winter", 0.3, 0.7);

    let lines = format_report(&ledger.summarize().unwrap());
    assert_eq!(lines[0], "\nSeason: Winter");
    assert_eq!(lines[1], "  Average Min Magnitude: 0.2000");
    assert_eq!(lines[2], "  Average Max Magnitude: 0.6000");
    assert_eq!(lines[3], "  Year-wise deviations:");
    assert_eq!(
        lines[4],
        "    Year: 2011 | Min: 0.1000 (dev: -0.1000), Max: 0.5000 (dev: -0.1000)"
    );
    assert_eq!(
        lines[5],
        "    Year: 2012 | Min: 0.3000 (dev: +0.1000), Max: 0.7000 (dev: +0.1000)"
    );
}

#[test]
fn test_report_file() {
    let timestamp = Utc.with_ymd_and_hms(2024, 3, 5, 14, 7, 9).unwrap();
    assert_eq!(log_file_name(&timestamp), "variation_log_20240305_140709.txt");

    let dir = tempdir().expect("Failed to create temp dir");
    let lines = vec!["\nSeason: Winter".to_string(), "  Year-wise deviations:".to_string()];
    let path = write_report(&dir.path().join("logs"), &lines, &timestamp).unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert_eq!(content, "\nSeason: Winter\n  Year-wise deviations:\n");
}

#[test]
fn test_year_labels_and_paths() {
    assert_eq!(YearId(6).label(), "2006");
    assert_eq!(YearId(11).label(), "2011");
    assert_eq!(YearId(2015).label(), "2015");
    assert_eq!(format!("{}", YearId(11)), "11");

    let locator = DatasetLocator::new("/data", DatasetLocator::DEFAULT_TEMPLATE);
    assert_eq!(
        locator.path_for(YearId(11)),
        PathBuf::from("/data/Year_11/year_11_combined.nc")
    );
}

#[test]
fn test_in_memory_fields_shape_check() {
    let fields = InMemoryFields::new(vec![0.0, 1.0], vec![0.0, 1.0, 2.0], 4);
    assert!(fields
        .clone()
        .with_field("un", Array3::zeros((4, 2, 3)))
        .is_ok());
    let err = fields.with_field("vn", Array3::zeros((4, 3, 2))).unwrap_err();
    assert!(matches!(err, SeaVisError::ShapeMismatch { .. }));
}

#[test]
fn test_config_defaults_and_overrides() {
    let defaults = RunConfig::default();
    assert_eq!(defaults.conversion_divisor, 100.0);
    assert_eq!(defaults.color_field, ColorField::SignedMagnitude);
    assert_eq!(defaults.variables.u, "un");
    assert_eq!(defaults.variables.v, "vn");
    assert_eq!(defaults.output_dir, PathBuf::from("Image_output"));
    defaults.validate().unwrap();

    let config = RunConfig::from_json(
        r#"{
            "output_dir": "plots",
            "color_field": "magnitude",
            "region": {"lat_min": 0.0, "lat_max": 10.0, "lon_min": 80.0, "lon_max": 90.0},
            "render": {"width": 400, "height": 300}
        }"#,
    )
    .unwrap();
    assert_eq!(config.output_dir, PathBuf::from("plots"));
    assert_eq!(config.color_field, ColorField::Magnitude);
    assert_eq!(config.region.lat_max, 10.0);
    assert_eq!(config.render.width, 400);
    assert_eq!(config.render.vmax, 0.3);
    assert_eq!(config.seasons, SeasonSet::quarterly());

    assert!(matches!(
        RunConfig::from_json("{ not json"),
        Err(SeaVisError::ConfigError(_))
    ));
}

#[test]
fn test_config_validation() {
    let mut config = RunConfig {
        color_field: ColorField::Scalar,
        ..RunConfig::default()
    };
    assert!(matches!(config.validate(), Err(SeaVisError::InvalidConfig(_))));
    config.variables.scalar = Some("pn".to_string());
    config.validate().unwrap();

    config.conversion_divisor = 0.0;
    assert!(matches!(config.validate(), Err(SeaVisError::InvalidConfig(_))));

    let inverted = RunConfig {
        region: BoundingBox::new(30.0, 5.0, 75.0, 100.0),
        ..RunConfig::default()
    };
    assert!(matches!(inverted.validate(), Err(SeaVisError::InvalidConfig(_))));
}

#[test]
fn test_render_style_validation() {
    let zero_scale = RunConfig::from_json(r#"{"render": {"quiver": {"scale": 0}}}"#).unwrap();
    assert!(matches!(zero_scale.validate(), Err(SeaVisError::InvalidConfig(_))));

    let check = |style: RenderStyle| matches!(style.validate(), Err(SeaVisError::InvalidConfig(_)));
    let mut style = RenderStyle::default();
    style.validate().unwrap();

    style.quiver.scale = -1.0;
    assert!(check(style.clone()));
    style.quiver.scale = f64::INFINITY;
    assert!(check(style.clone()));
    style.quiver.scale = 30.0;

    style.grid_step = 1e-9;
    assert!(check(style.clone()));
    style.grid_step = f64::NAN;
    assert!(check(style.clone()));
    style.grid_step = -5.0;
    assert!(check(style.clone()));
    // Zero turns gridlines off
    style.grid_step = 0.0;
    style.validate().unwrap();

    style.width = 0;
    assert!(check(style.clone()));
    style.width = 400;

    style.vmin = f64::NAN;
    assert!(check(style.clone()));
    style.vmin = -0.3;

    style.coast_color = "black".to_string();
    assert!(check(style));
}

#[test]
fn test_renderer_rejects_invalid_style() {
    let mut style = RenderStyle::default();
    style.quiver.scale = 0.0;
    let result = MapRenderer::new(style, BoundingBox::default(), FontBook::disabled());
    assert!(matches!(result, Err(SeaVisError::InvalidConfig(_))));
}

#[test]
fn test_coastline_errors_are_config_errors() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("coast.txt");
    std::fs::write(&path, "80 10\n80 north\n").unwrap();

    match Coastline::load(&path) {
        Err(SeaVisError::InvalidConfig(msg)) => {
            assert!(msg.contains("coast.txt"));
            assert!(msg.contains("line 2"));
            assert!(!msg.contains("Invalid configuration"));
        }
        other => panic!("unexpected result: {other:?}"),
    }
}
