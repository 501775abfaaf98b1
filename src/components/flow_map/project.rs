//! Geographic projection: degrees of latitude/longitude to surface pixels.
//!
//! Longitude maps equirectangularly, latitude through a Mercator transform.
//! The tangent term diverges at the poles, so callers keep latitude strictly
//! inside (-90, 90); this is an accepted domain restriction, not guarded.

use std::f64::consts::PI;

/// Project `(lat, lon)` in degrees onto a `width` x `height` surface.
pub fn project(lat: f64, lon: f64, width: f64, height: f64) -> (f64, f64) {
	let x = (lon + 180.0) / 360.0 * width;
	let lat_rad = lat.to_radians();
	let merc_n = (PI / 4.0 + lat_rad / 2.0).tan().ln();
	let y = height / 2.0 - width * merc_n / (2.0 * PI);
	(x, y)
}

/// Inverse of [`project`], recovering `(lat, lon)` from surface pixels.
pub fn unproject(x: f64, y: f64, width: f64, height: f64) -> (f64, f64) {
	let lon = x / width * 360.0 - 180.0;
	let merc_n = (height / 2.0 - y) * 2.0 * PI / width;
	let lat = (2.0 * merc_n.exp().atan() - PI / 2.0).to_degrees();
	(lat, lon)
}

#[cfg(test)]
mod tests {
	use super::*;

	const W: f64 = 1200.0;
	const H: f64 = 600.0;

	#[test]
	fn longitude_maps_linearly_across_surface() {
		assert_eq!(project(0.0, -180.0, W, H).0, 0.0);
		assert_eq!(project(0.0, 0.0, W, H).0, W / 2.0);
		assert_eq!(project(0.0, 180.0, W, H).0, W);
	}

	#[test]
	fn equator_sits_at_vertical_center() {
		let (_, y) = project(0.0, 37.0, W, H);
		assert!((y - H / 2.0).abs() < 1e-9);
	}

	#[test]
	fn northern_latitudes_project_above_center() {
		let (_, seoul_y) = project(37.57, 126.98, W, H);
		let (_, sydney_y) = project(-33.87, 151.21, W, H);
		assert!(seoul_y < H / 2.0);
		assert!(sydney_y > H / 2.0);
	}

	#[test]
	fn round_trip_recovers_coordinates_away_from_poles() {
		for &(lat, lon) in &[
			(0.0, 0.0),
			(37.57, 126.98),
			(-33.87, 151.21),
			(51.51, -0.13),
			(-54.8, -68.3),
			(70.0, -150.0),
		] {
			let (x, y) = project(lat, lon, W, H);
			let (lat2, lon2) = unproject(x, y, W, H);
			assert!((lat - lat2).abs() < 1e-9, "lat {lat} -> {lat2}");
			assert!((lon - lon2).abs() < 1e-9, "lon {lon} -> {lon2}");
		}
	}
}
