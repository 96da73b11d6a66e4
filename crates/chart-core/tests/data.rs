// File: crates/chart-core/tests/data.rs
// Purpose: CSV loading: grouping, ordering, palette assignment and error reporting.

use std::io::Write;

use usage_chart_core::theme::hex;
use usage_chart_core::{AgeGroup, ChartError, Dataset, SeriesId};

const HEADER: &str = "social_media_app,age_group,men_percent,women_percent\n";

fn load(body: &str) -> Result<Dataset, ChartError> {
    Dataset::from_reader(format!("{HEADER}{body}").as_bytes())
}

#[test]
fn groups_rows_by_app_in_first_appearance_order() {
    let ds = load(
        "TikTok,16 - 20,60,74\n\
         Instagram,16 - 20,72,85\n\
         TikTok,21 - 25,48,62\n\
         Instagram,21 - 25,65,80\n",
    )
    .expect("load");

    let names: Vec<&str> = ds.series.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["TikTok", "Instagram"]);
    assert_eq!(ds.sample_count(), 4);
    assert_eq!(ds.get(SeriesId(1)).map(|s| s.samples[1].women), Some(80.0));
    assert_eq!(ds.ids().collect::<Vec<_>>(), vec![SeriesId(0), SeriesId(1)]);
}

#[test]
fn samples_are_sorted_by_age_group() {
    let ds = load(
        "Reddit,36 - 40,18,7\n\
         Reddit,16 - 20,34,18\n\
         Reddit,26 - 30,32,14\n",
    )
    .expect("load");
    let groups: Vec<AgeGroup> = ds.series[0].samples.iter().map(|s| s.age_group).collect();
    assert_eq!(groups, vec![AgeGroup::From16To20, AgeGroup::From26To30, AgeGroup::From36To40]);
}

#[test]
fn known_apps_get_fixed_colors_and_unknown_ones_cycle() {
    let ds = load(
        "Mastodon,16 - 20,2,3\n\
         Youtube,16 - 20,88,82\n\
         Bluesky,16 - 20,3,4\n",
    )
    .expect("load");
    assert_eq!(hex(ds.series[1].color), "#ff7f0e");
    assert_eq!(hex(ds.series[2].color), "#7f7f7f");
    // ninth domain entry wraps to the first palette slot
    assert_eq!(hex(ds.series[0].color), "#1f77b4");
}

#[test]
fn whitespace_and_label_spacing_are_tolerated() {
    let ds = load(" Threads , 31-35 , 11 , 16 \n").expect("load");
    let s = &ds.series[0];
    assert_eq!(s.name, "Threads");
    assert_eq!(s.samples[0].age_group, AgeGroup::From31To35);
    assert_eq!((s.samples[0].men, s.samples[0].women), (11.0, 16.0));
}

#[test]
fn marker_radius_grows_with_age() {
    let radii: Vec<f64> = AgeGroup::ALL.iter().map(|g| g.marker_radius()).collect();
    assert_eq!(radii, vec![4.0, 6.0, 8.0, 9.0, 10.0]);
    assert_eq!(AgeGroup::From21To25.to_string(), "21 - 25");
}

#[test]
fn load_errors_are_reported() {
    let err = Dataset::from_reader("social_media_app,age_group,men_percent\nX,16 - 20,1\n".as_bytes())
        .unwrap_err();
    assert!(matches!(err, ChartError::MissingColumn("women_percent")), "{err}");

    let err = load("X,16 - 20,1,2\nX,41 - 45,1,2\n").unwrap_err();
    match &err {
        ChartError::UnknownAgeGroup { row, label } => {
            assert_eq!(label, "41 - 45");
            assert_eq!(*row, 3);
        }
        other => panic!("unexpected error {other}"),
    }

    let err = load("X,16 - 20,lots,2\n").unwrap_err();
    assert!(matches!(err, ChartError::InvalidPercentage { column: "men_percent", .. }), "{err}");

    let err = load("").unwrap_err();
    assert!(matches!(err, ChartError::EmptyDataset));
    assert!(err.is_data_load());
}

#[test]
fn loads_from_file_and_reports_missing_files() {
    let mut file = tempfile::NamedTempFile::new().expect("tempfile");
    write!(file, "{HEADER}Facebook,16 - 20,30,36\nFacebook,21 - 25,42,50\n").expect("write");
    let ds = Dataset::from_path(file.path()).expect("load file");
    assert_eq!(ds.series.len(), 1);
    assert_eq!(ds.series[0].samples.len(), 2);

    let dir = tempfile::tempdir().expect("tempdir");
    let err = Dataset::from_path(dir.path().join("missing.csv")).unwrap_err();
    assert!(matches!(err, ChartError::Io { .. }));
    assert!(err.is_data_load());
}

#[test]
fn bundled_sample_data_loads() {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("../../data/social-media-uk.csv");
    let ds = Dataset::from_path(path).expect("sample data");
    assert_eq!(ds.series.len(), 8);
    assert!(ds.series.iter().all(|s| s.samples.len() == AgeGroup::ALL.len()));
}
