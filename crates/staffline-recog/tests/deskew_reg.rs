//! Deskew regression test
//!
//! Pages with a known uniform vertical shear must give back the shear
//! within one row, and the corrected page must realign the staff lines.

use staffline_recog::deskew::{correct_shear, deskew, find_vertical_shift, skew_angle_degrees};
use staffline_test::RegParams;
use staffline_test::synth::{PageBuilder, StaffSpec, shear};

#[test]
fn deskew_reg() {
    let mut rp = RegParams::new("deskew");

    let page = PageBuilder::new(400, 300)
        .expect("page")
        .staff(&StaffSpec::new(40, 12))
        .staff(&StaffSpec::new(170, 12))
        .build();

    // --- Test 1: an unsheared page needs no correction ---
    let result = find_vertical_shift(&page, 30);
    rp.compare_values(0.0, result.h_max as f64, 0.0);
    rp.compare_values(1.0, (result.score > 0.0) as u8 as f64, 0.0);

    // --- Test 2: known shears are recovered within one row ---
    for rise in [-16i64, -6, 6, 10, 16] {
        let sheared = shear(&page, rise).expect("shear");
        let found = find_vertical_shift(&sheared, 30);
        eprintln!("  rise {} -> h_max {} (score {:.4})", rise, found.h_max, found.score);
        rp.compare_values(-(rise as f64) / 2.0, found.h_max as f64, 1.0);
    }

    // --- Test 3: correction realigns every line ---
    let sheared = shear(&page, 16).expect("shear");
    let before = sheared.horizontal_profile();
    let (corrected, result) = deskew(&sheared, 30);
    rp.compare_values(-8.0, result.h_max as f64, 0.0);
    let after = corrected.horizontal_profile();
    rp.compare_values(1.0, (after.max() > before.max()) as u8 as f64, 0.0);
    rp.compare_rasters(&page, &corrected);

    // --- Test 4: the skew angle follows the sign of the shear ---
    let angle = result.angle_degrees(corrected.width());
    rp.compare_values(-(16.0f64 / 400.0).atan().to_degrees(), angle, 1e-9);
    rp.compare_values(0.0, skew_angle_degrees(0, 400), 0.0);

    // --- Test 5: zero shear returns the page itself ---
    let same = correct_shear(&page, 0);
    rp.compare_values(0.0, page.count_differences(&same).expect("same size") as f64, 0.0);

    assert!(rp.cleanup(), "deskew regression test failed");
}
