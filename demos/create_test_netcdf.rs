//! Creates a synthetic year file for trying out SeaVis.
//!
//! Writes `Year_{id}/year_{id}_combined.nc` under the given directory (default
//! `demo_data`) with 365 daily wind fields over the Bay of Bengal. A block in
//! the north-east corner carries the 1e31 fill value so the land mask shows up
//! in the rendered maps.
//!
//! ```text
//! cargo run --example create_test_netcdf -- demo_data 11
//! cargo run -- --data-root demo_data --years 11
//! ```

use ndarray::{Array1, Array3};
use netcdf::create;
use std::f64::consts::PI;
use std::path::PathBuf;

const FILL: f32 = 1.0e31;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let root = PathBuf::from(args.next().unwrap_or_else(|| "demo_data".to_string()));
    let year: u32 = args.next().map_or(Ok(11), |s| s.parse())?;

    let dir = root.join(format!("Year_{year}"));
    std::fs::create_dir_all(&dir)?;
    let output_path = dir.join(format!("year_{year}_combined.nc"));

    println!("Creating synthetic NetCDF file: {}", output_path.display());
    if output_path.exists() {
        std::fs::remove_file(&output_path)?;
    }

    let lat: Vec<f64> = (0..41).map(|i| 0.0 + f64::from(i) * 0.875).collect();
    let lon: Vec<f64> = (0..41).map(|i| 70.0 + f64::from(i) * 0.875).collect();
    let (nt, ny, nx) = (365, lat.len(), lon.len());

    let mut file = create(&output_path)?;
    file.add_attribute("title", "Synthetic daily surface currents")?;
    file.add_attribute("created_by", "create_test_netcdf.rs")?;

    file.add_dimension("time", nt)?;
    file.add_dimension("lat", ny)?;
    file.add_dimension("lon", nx)?;

    {
        let mut var = file.add_variable::<f64>("lat", &["lat"])?;
        var.put_attribute("units", "degrees_north")?;
        var.put(Array1::from(lat.clone()).view(), ..)?;
    }
    {
        let mut var = file.add_variable::<f64>("lon", &["lon"])?;
        var.put_attribute("units", "degrees_east")?;
        var.put(Array1::from(lon.clone()).view(), ..)?;
    }

    let is_land = |j: usize, i: usize| lat[j] > 22.0 && lon[i] > 88.0 && lon[i] < 93.0;

    // Seasonally reversing flow: u follows the annual cycle, v lags it.
    let mut un = Array3::<f32>::zeros((nt, ny, nx));
    let mut vn = Array3::<f32>::zeros((nt, ny, nx));
    let mut pn = Array3::<f32>::zeros((nt, ny, nx));
    for ((t, j, i), value) in un.indexed_iter_mut() {
        let phase = 2.0 * PI * t as f64 / nt as f64;
        let shear = (lat[j] - 15.0) / 15.0;
        *value = if is_land(j, i) {
            FILL
        } else {
            (25.0 * phase.cos() + 5.0 * shear) as f32
        };
        vn[[t, j, i]] = if is_land(j, i) {
            FILL
        } else {
            (20.0 * (phase - PI / 4.0).sin() - 4.0 * (lon[i] - 85.0) / 15.0) as f32
        };
        pn[[t, j, i]] = if is_land(j, i) {
            FILL
        } else {
            (150.0 * phase.sin() + 30.0 * shear) as f32
        };
    }

    for (name, data, units) in [("un", &un, "cm/s"), ("vn", &vn, "cm/s"), ("pn", &pn, "cm")] {
        let mut var = file.add_variable::<f32>(name, &["time", "lat", "lon"])?;
        var.put_attribute("units", units)?;
        var.put_attribute("_FillValue", FILL)?;
        var.put(data.view(), ..)?;
    }

    println!("Wrote {nt} days on a {ny}x{nx} grid");
    Ok(())
}
