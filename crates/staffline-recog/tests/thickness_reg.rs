//! Line thickness regression test
//!
//! The modal run length must equal the drawn line thickness, the average
//! must weigh neighbouring thicknesses by their counts, and a window with
//! no ink must be reported as undeterminable.

use staffline_recog::thickness::{estimate_thickness, thickness_histogram};
use staffline_test::RegParams;
use staffline_test::synth::{PageBuilder, StaffSpec};

#[test]
fn thickness_reg() {
    let mut rp = RegParams::new("thickness");

    // --- Test 1: uniform thickness, stems do not disturb the mode ---
    for t in 1..=4u32 {
        let a = StaffSpec::new(40, 12).with_thickness(t);
        let b = StaffSpec::new(200, 12).with_thickness(t);
        let page = PageBuilder::new(300, 300)
            .expect("page")
            .staff(&a)
            .staff(&b)
            .vline(100, 30, 95, 2)
            .vline(210, 190, 260, 2)
            .build();
        let centers = [a.center_row(), b.center_row()];
        let hist = thickness_histogram(&page, &centers, 6 * 12);
        let est = estimate_thickness(&hist);
        eprintln!("  thickness {} -> {:?}", t, est);
        rp.compare_values(t as f64, est.thickness0 as f64, 0.0);
        rp.compare_values(t as f64, est.thickness_avg.unwrap_or(-1.0), 1e-9);
    }

    // --- Test 2: mixed thicknesses are averaged by count ---
    let a = StaffSpec::new(40, 12).with_thickness(3);
    let b = StaffSpec::new(200, 12).with_thickness(2).with_columns(0, 99);
    let page = PageBuilder::new(300, 300)
        .expect("page")
        .staff(&a)
        .staff(&b)
        .build();
    let hist = thickness_histogram(&page, &[a.center_row(), b.center_row()], 72);
    rp.compare_values(1500.0, hist.count(3) as f64, 0.0);
    rp.compare_values(500.0, hist.count(2) as f64, 0.0);
    let est = estimate_thickness(&hist);
    rp.compare_values(3.0, est.thickness0 as f64, 0.0);
    rp.compare_values(2.75, est.thickness_avg.unwrap_or(-1.0), 1e-9);

    // --- Test 3: runs as long as the window are dropped ---
    let page = PageBuilder::new(50, 200)
        .expect("page")
        .staff(&StaffSpec::new(60, 10))
        .vline(10, 0, 199, 3)
        .build();
    let hist = thickness_histogram(&page, &[80], 60);
    rp.compare_values(0.0, hist.as_slice().iter().skip(2).sum::<u32>() as f64, 0.0);
    rp.compare_values(47.0 * 5.0, hist.count(1) as f64, 0.0);

    // --- Test 4: an all-white window is undeterminable ---
    let blank = PageBuilder::new(100, 100).expect("page").build();
    let est = estimate_thickness(&thickness_histogram(&blank, &[50], 60));
    rp.compare_values(0.0, est.thickness0 as f64, 0.0);
    rp.compare_values(1.0, est.thickness_avg.is_none() as u8 as f64, 0.0);

    assert!(rp.cleanup(), "thickness regression test failed");
}
