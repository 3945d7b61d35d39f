//! Binary morphology regression test
//!
//! Checks the algebraic properties of opening and closing with disk
//! structuring elements (idempotence, duality, monotonicity) and the
//! three-stage cleanup of a noisy disk.

use spritemask_core::{Box, Pix};
use spritemask_morph::{
    Sel, cleanup, close, close_inverse, dilate, dilate_padded, erode, open, open_inverse,
};
use spritemask_region::{ConnectivityType, count_components, find_connected_components};
use spritemask_test::{RegParams, add_salt_and_pepper, make_disk_image, make_random_blob};

/// Bounds shared by two images
fn common_bounds(a: &Pix, b: &Pix) -> Box {
    a.bounds()
        .intersect(&b.bounds())
        .unwrap_or(Box::new_unchecked(0, 0, 0, 0))
}

/// Every set pixel of `a` inside `region` is also set in `b`
fn is_subset_in(a: &Pix, b: &Pix, region: &Box) -> bool {
    (region.y..region.bottom())
        .all(|y| (region.x..region.right()).all(|x| !a.is_set(x, y) || b.is_set(x, y)))
}

fn flag(ok: bool) -> f64 {
    if ok { 1.0 } else { 0.0 }
}

#[test]
fn binmorph_reg() {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut rp = RegParams::new("binmorph");

    let blob = make_random_blob(Box::from_size(48, 40), Box::new_unchecked(10, 10, 28, 20), 1);
    let noisy_disk = add_salt_and_pepper(&make_disk_image(60, 60, 30, 30, 15).expect("disk"), 5, 42);

    for (name, pixs) in [("blob", &blob), ("noisy disk", &noisy_disk)] {
        for d in [3u32, 4, 5] {
            eprintln!("=== {} with disk {} ===", name, d);
            let sel = Sel::create_disk(d).expect("create_disk");

            // --- Idempotence ---
            let opened = open(pixs, &sel).expect("open");
            let reopened = open(&opened, &sel).expect("open twice");
            let region = common_bounds(&opened, &reopened);
            rp.compare_values(1.0, flag(opened.equals_in(&reopened, &region)), 0.0);

            let closed = close(pixs, &sel).expect("close");
            let reclosed = close(&closed, &sel).expect("close twice");
            let region = common_bounds(&closed, &reclosed);
            rp.compare_values(1.0, flag(closed.equals_in(&reclosed, &region)), 0.0);

            // --- Monotonicity ---
            rp.compare_values(1.0, flag(is_subset_in(&opened, pixs, &opened.bounds())), 0.0);
            rp.compare_values(1.0, flag(is_subset_in(pixs, &closed, &closed.bounds())), 0.0);

            // --- Duality ---
            let inverted = pixs.invert().expect("invert");
            let expected = close(&inverted, &sel).expect("close").invert().expect("invert");
            rp.compare_pix(&close_inverse(pixs, &sel).expect("close_inverse"), &expected);
            let expected = open(&inverted, &sel).expect("open").invert().expect("invert");
            rp.compare_pix(&open_inverse(pixs, &sel).expect("open_inverse"), &expected);

            // --- Bounds ---
            let (l, t, r, b) = sel.padding();
            let shrunk = pixs.bounds().shrink(l, t, r, b);
            rp.compare_values(1.0, flag(opened.bounds() == shrunk), 0.0);
            rp.compare_values(1.0, flag(closed.bounds() == shrunk), 0.0);
            let padded = dilate_padded(pixs, &sel).expect("dilate_padded");
            rp.compare_values(1.0, flag(padded.bounds() == pixs.bounds().expand(l, t, r, b)), 0.0);
            let cropped = dilate(pixs, &sel).expect("dilate");
            rp.compare_pix(&padded.crop(&pixs.bounds()), &cropped);

            // every disk holds its anchor, so erosion never adds foreground
            let eroded = erode(pixs, &sel).expect("erode");
            rp.compare_values(1.0, flag(is_subset_in(&eroded, pixs, &eroded.bounds())), 0.0);

            eprintln!(
                "  set: input {} open {} close {}",
                pixs.count_set(),
                opened.count_set(),
                closed.count_set()
            );
        }
    }

    let sel3 = Sel::create_disk(3).expect("create_disk");
    rp.compare_values(107.0, open(&blob, &sel3).expect("open").count_set() as f64, 0.0);

    if rp.display() {
        rp.write_pix_and_check(&noisy_disk).expect("write noisy");
        let cleaned = cleanup(&noisy_disk, &sel3).expect("cleanup");
        rp.write_pix_and_check(&cleaned).expect("write cleaned");
    }

    assert!(rp.cleanup(), "binmorph regression test failed");
}

#[test]
fn cleanup_noisy_disk_reg() {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut rp = RegParams::new("cleanup");

    let disk = make_disk_image(100, 100, 50, 50, 20).expect("disk");
    let sel = Sel::create_disk(3).expect("create_disk");

    for (seed, expected_set) in [(42u32, 1260.0), (7, 1262.0), (1234, 1267.0)] {
        eprintln!("=== salt and pepper, seed {} ===", seed);
        let noisy = add_salt_and_pepper(&disk, 1, seed);
        let cleaned = cleanup(&noisy, &sel).expect("cleanup");

        rp.compare_values(1.0, flag(cleaned.bounds() == Box::new_unchecked(3, 3, 94, 94)), 0.0);
        let fg = find_connected_components(&cleaned, true, ConnectivityType::FourWay)
            .expect("components");
        let bg = count_components(&cleaned, false, ConnectivityType::FourWay).expect("components");
        rp.compare_values(1.0, fg.len() as f64, 0.0);
        rp.compare_values(1.0, bg as f64, 0.0);
        rp.compare_values(expected_set, cleaned.count_set() as f64, 0.0);
        if let Some(c) = fg.first() {
            eprintln!("  disk component: {} pixels, {:?}", c.pixel_count, c.bounds);
            rp.compare_values(1.0, flag(c.bounds.contains_point(50, 50)), 0.0);
        }
    }

    assert!(rp.cleanup(), "cleanup regression test failed");
}
