//! Small hand-made datasets shared by the unit tests.

use std::fs;
use std::path::Path;

use super::*;

const MAINLAND: &[(f64, f64)] = &[
    (113.6, -22.0), (114.2, -26.3), (115.0, -33.6), (117.9, -35.1), (123.5, -33.9),
    (129.0, -31.7), (134.2, -32.6), (137.8, -35.6), (140.6, -38.0), (144.9, -38.3),
    (146.4, -39.1), (150.0, -37.5), (151.2, -33.9), (153.6, -28.2), (153.1, -25.0),
    (149.0, -21.0), (145.4, -15.0), (142.5, -10.7), (141.6, -12.9), (141.5, -17.0),
    (139.5, -17.5), (136.0, -15.0), (136.9, -12.3), (132.6, -11.5), (129.6, -14.9),
    (126.2, -14.0), (122.2, -17.4), (119.0, -20.0), (113.6, -22.0),
];

const TASMANIA: &[(f64, f64)] = &[
    (144.6, -40.7), (148.3, -40.9), (148.3, -42.2), (147.0, -43.6), (145.2, -42.2),
    (144.6, -40.7),
];

fn coords(points: &[(f64, f64)]) -> String {
    let inner: Vec<String> = points.iter().map(|(x, y)| format!("[{x},{y}]")).collect();
    format!("[{}]", inner.join(","))
}

fn polygon_feature(name: &str, ring: &[(f64, f64)]) -> String {
    format!(
        r#"{{"type":"Feature","properties":{{"name":"{name}"}},"geometry":{{"type":"Polygon","coordinates":[{}]}}}}"#,
        coords(ring)
    )
}

fn line_feature(points: &[(f64, f64)]) -> String {
    format!(
        r#"{{"type":"Feature","properties":{{}},"geometry":{{"type":"LineString","coordinates":{}}}}}"#,
        coords(points)
    )
}

pub fn australia_json() -> String {
    format!(
        r#"{{"type":"FeatureCollection","features":[{},{}]}}"#,
        polygon_feature("Mainland", MAINLAND),
        polygon_feature("Tasmania", TASMANIA)
    )
}

pub fn australia_region() -> Region {
    let fc = parse_collection(AUSTRALIA_FILE, &australia_json()).unwrap();
    region_from_collection(AUSTRALIA_FILE, &fc).unwrap()
}

/// A band crossing the continent west to east, shifted south by year.
/// `label_offset` is raw JSON so tests can pass numbers or strings.
pub fn eclipse_json(year: u16, color: Option<&str>, label_offset: &str) -> String {
    let shift = (year % 10) as f64 * 0.8;
    let centre: Vec<(f64, f64)> = (0..5)
        .map(|i| (110.0 + i as f64 * 11.0, -18.0 - shift - i as f64 * 2.5))
        .collect();
    let north: Vec<(f64, f64)> = centre.iter().map(|&(x, y)| (x, y + 0.7)).collect();
    let south: Vec<(f64, f64)> = centre.iter().map(|&(x, y)| (x, y - 0.7)).collect();

    let color = color
        .map(|c| format!(r#""color":"{c}","#))
        .unwrap_or_default();
    format!(
        r#"{{"type":"FeatureCollection",{color}"label":"{year}","labelOffset":{label_offset},"features":[{},{},{}]}}"#,
        line_feature(&north),
        line_feature(&centre),
        line_feature(&south)
    )
}

pub fn eclipse_record(year: u16, label_offset: f64) -> EclipseRecord {
    let color = if year < 2068 { "rgba(226, 122, 59, 1)" } else { "rgba(59, 195, 226, 1)" };
    let json = eclipse_json(year, Some(color), &label_offset.to_string());
    let name = eclipse_file_name(year);
    EclipseRecord::from_collection(&name, parse_collection(&name, &json).unwrap()).unwrap()
}

pub fn australia_data() -> AustraliaData {
    AustraliaData {
        region: australia_region(),
        eclipses: ECLIPSE_YEARS.iter().map(|&y| eclipse_record(y, 25.0)).collect(),
    }
}

pub fn world_json() -> String {
    let americas = [(-160.0, 60.0), (-60.0, 50.0), (-35.0, -5.0), (-70.0, -55.0), (-120.0, 30.0), (-160.0, 60.0)];
    let eurasia = [(-10.0, 36.0), (40.0, 70.0), (170.0, 65.0), (120.0, 20.0), (30.0, -35.0), (-10.0, 36.0)];
    format!(
        r#"{{"type":"FeatureCollection","features":[{},{}]}}"#,
        polygon_feature("Americas", &americas),
        polygon_feature("Old World", &eurasia)
    )
}

pub fn world_data() -> WorldData {
    let fc = parse_collection(WORLD_FILE, &world_json()).unwrap();
    WorldData {
        region: region_from_collection(WORLD_FILE, &fc).unwrap(),
    }
}

/// Write a complete Australia dataset directory
pub fn write_australia_dir(dir: &Path) {
    fs::write(dir.join(AUSTRALIA_FILE), australia_json()).unwrap();
    for (i, &year) in ECLIPSE_YEARS.iter().enumerate() {
        let offset = (i * 10).to_string();
        fs::write(
            dir.join(eclipse_file_name(year)),
            eclipse_json(year, Some("#3BC3E2"), &offset),
        )
        .unwrap();
    }
}
