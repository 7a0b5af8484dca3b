//! Staff detection pipeline regression test
//!
//! Runs `detect_staves` on synthetic two-staff pages: straight, scanned
//! in gray, sheared, and with a staff whose start is hidden under a solid
//! block. Every measured quantity is known from the page construction.

use staffline_core::Raster;
use staffline_recog::render::{LINE_GRAY, render_traced_lines};
use staffline_recog::staff::CENTER_LINE;
use staffline_recog::{RecogError, StaffDetectOptions, detect_staves};
use staffline_test::RegParams;
use staffline_test::synth::{PageBuilder, StaffSpec, shear, to_gray};

const WIDTH: u32 = 400;
const HEIGHT: u32 = 400;

fn staves() -> [StaffSpec; 2] {
    [
        StaffSpec::new(60, 12).with_thickness(3).with_columns(30, 369),
        StaffSpec::new(240, 12).with_thickness(3).with_columns(30, 369),
    ]
}

/// Barlines at both ends of every staff and one stem in each page half.
fn glyphs(mut builder: PageBuilder) -> PageBuilder {
    for spec in staves() {
        let (top, bottom) = (spec.line_top(0), spec.line_top(4) + 2);
        builder = builder
            .vline(30, top, bottom, 3)
            .vline(367, top, bottom, 3)
            .vline(100, top - 10, spec.line_top(2) + 6, 2)
            .vline(300, top - 10, spec.line_top(2) + 6, 2);
    }
    builder
}

fn score_page() -> Raster {
    let builder = staves()
        .iter()
        .fold(PageBuilder::new(WIDTH, HEIGHT).expect("page"), |b, s| b.staff(s));
    glyphs(builder).build()
}

#[test]
fn pipeline_reg() {
    let mut rp = RegParams::new("pipeline");
    let page = score_page();
    let options = StaffDetectOptions::default().with_erase_lines(true);

    // --- Test 1: page-level geometry ---
    let geometry = detect_staves(&page, &options).expect("detect staves");
    rp.compare_values(0.0, geometry.h_max as f64, 0.0);
    rp.compare_values(12.0, geometry.interline as f64, 0.0);
    rp.compare_values(3.0, geometry.thickness0 as f64, 0.0);
    rp.compare_values(3.0, geometry.thickness_avg, 1e-9);
    rp.compare_values(2.0, geometry.staves.len() as f64, 0.0);
    rp.compare_values(2.0, geometry.traced_count() as f64, 0.0);

    // --- Test 2: per-staff bounds and traced lines ---
    let expected_glyphs = glyphs(PageBuilder::new(WIDTH, HEIGHT).expect("page")).build();
    for (staff, spec) in geometry.staves.iter().zip(staves()) {
        rp.compare_values(30.0, staff.left_bound.map_or(-1.0, f64::from), 0.0);
        rp.compare_values(369.0, staff.right_bound.map_or(-1.0, f64::from), 0.0);
        let center = staff.page_rows(CENTER_LINE).unwrap_or_default();
        rp.compare_values(340.0, center.len() as f64, 0.0);
        let on_center = center.iter().all(|&r| r == spec.center_row() as i32);
        rp.compare_values(1.0, on_center as u8 as f64, 0.0);
        let top = staff.page_rows(0).unwrap_or_default();
        let on_top = top.iter().all(|&r| r == spec.line_top(0) as i32 + 1);
        rp.compare_values(1.0, on_top as u8 as f64, 0.0);

        // erasure leaves only barlines and stems
        let expected = expected_glyphs
            .crop_rows(staff.origin_row, staff.raster.height())
            .expect("crop");
        match &staff.cleaned {
            Some(cleaned) => {
                rp.compare_rasters(&expected, cleaned);
            }
            None => {
                rp.compare_values(1.0, 0.0, 0.0);
            }
        }

        // rendering paints every traced pixel
        let rendered = render_traced_lines(staff);
        let painted = rendered.data().iter().filter(|&&v| v == LINE_GRAY).count();
        rp.compare_values(5.0 * 340.0, painted as f64, 0.0);
    }

    // --- Test 3: a gray scan gives the same geometry ---
    let gray = to_gray(&page, 40, 235);
    let from_gray = detect_staves(&gray, &options).expect("detect staves on gray");
    let same = serde_json::to_value(&from_gray).ok() == serde_json::to_value(&geometry).ok();
    rp.compare_values(1.0, same as u8 as f64, 0.0);

    // --- Test 4: serial and parallel runs agree ---
    let serial = detect_staves(&page, &options.clone().with_parallel(false)).expect("serial");
    let same = serde_json::to_value(&serial).ok() == serde_json::to_value(&geometry).ok();
    rp.compare_values(1.0, same as u8 as f64, 0.0);

    // --- Test 5: a sheared page is straightened first ---
    let sheared = shear(&page, 16).expect("shear");
    let straightened = detect_staves(&sheared, &options).expect("detect staves on sheared page");
    rp.compare_values(-8.0, straightened.h_max as f64, 0.0);
    let angle = -(16.0f64 / 400.0).atan().to_degrees();
    rp.compare_values(angle, straightened.skew_angle, 1e-9);
    let same_staves = serde_json::to_value(&straightened.staves).ok()
        == serde_json::to_value(&geometry.staves).ok();
    rp.compare_values(1.0, same_staves as u8 as f64, 0.0);

    // --- Test 6: the model serializes without rasters ---
    let json = serde_json::to_value(&geometry).expect("serialize");
    rp.compare_values(12.0, json["interline"].as_f64().unwrap_or(0.0), 0.0);
    let staff0 = &json["staves"][0];
    rp.compare_values(1.0, staff0.get("raster").is_none() as u8 as f64, 0.0);
    rp.compare_values(1.0, staff0.get("cleaned").is_none() as u8 as f64, 0.0);
    rp.compare_values(5.0, staff0["lines"].as_array().map_or(0, Vec::len) as f64, 0.0);
    rp.compare_values(30.0, staff0["left_bound"].as_f64().unwrap_or(-1.0), 0.0);

    assert!(rp.cleanup(), "pipeline regression test failed");
}

#[test]
fn pipeline_untraced_staff_reg() {
    let mut rp = RegParams::new("pipeline_untraced");
    let [a, b] = staves();
    let page = PageBuilder::new(WIDTH, HEIGHT)
        .expect("page")
        .staff(&a)
        .staff(&b)
        .block(0, b.line_top(0) - 5, 150, b.line_top(4) + 7)
        .build();
    let options = StaffDetectOptions::default()
        .with_deskew_range(0)
        .with_parallel(false)
        .with_erase_lines(true);

    // --- Test 1: the blocked staff is kept but not traced ---
    let geometry = detect_staves(&page, &options).expect("detect staves");
    rp.compare_values(12.0, geometry.interline as f64, 0.0);
    rp.compare_values(2.0, geometry.staves.len() as f64, 0.0);
    rp.compare_values(1.0, geometry.traced_count() as f64, 0.0);

    let first = &geometry.staves[0];
    rp.compare_values(1.0, first.is_traced() as u8 as f64, 0.0);
    rp.compare_values(30.0, first.left_bound.map_or(-1.0, f64::from), 0.0);

    let second = &geometry.staves[1];
    rp.compare_values(0.0, second.lines.len() as f64, 0.0);
    rp.compare_values(1.0, second.cleaned.is_none() as u8 as f64, 0.0);
    rp.compare_values(1.0, second.left_bound.map_or(-1.0, f64::from), 0.0);
    rp.compare_values(369.0, second.right_bound.map_or(-1.0, f64::from), 0.0);
    let center = second.center_row.map(|c| c + second.origin_row);
    rp.compare_values(b.center_row() as f64, center.map_or(-1.0, f64::from), 0.0);

    // --- Test 2: page-level failures ---
    let blank = PageBuilder::new(200, 200).expect("page").build();
    let err = detect_staves(&blank, &options);
    rp.compare_values(
        1.0,
        matches!(err, Err(RecogError::UndeterminedGeometry(_))) as u8 as f64,
        0.0,
    );
    let err = detect_staves(&page, &options.clone().with_alpha(1.5));
    rp.compare_values(
        1.0,
        matches!(err, Err(RecogError::InvalidParameter(_))) as u8 as f64,
        0.0,
    );

    // --- Test 3: a thickness window too tall to count in rows ---
    let huge = options.clone().with_thickness_window(u32::MAX / 2);
    rp.compare_values(1.0, huge.validate().is_ok() as u8 as f64, 0.0);
    let err = detect_staves(&page, &huge);
    rp.compare_values(
        1.0,
        matches!(err, Err(RecogError::InvalidParameter(_))) as u8 as f64,
        0.0,
    );
    let tall = options.clone().with_thickness_window(1000);
    let geometry = detect_staves(&page, &tall).expect("detect staves with a tall window");
    rp.compare_values(3.0, geometry.thickness0 as f64, 0.0);

    // --- Test 4: options load from partial JSON ---
    let loaded: StaffDetectOptions =
        serde_json::from_str(r#"{"threshold": 200, "erase_lines": true}"#).expect("parse options");
    rp.compare_values(200.0, loaded.threshold as f64, 0.0);
    rp.compare_values(30.0, loaded.deskew_range as f64, 0.0);
    rp.compare_values(1.0, (loaded.erase_lines && loaded.parallel) as u8 as f64, 0.0);

    assert!(rp.cleanup(), "pipeline untraced regression test failed");
}
