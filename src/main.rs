use riso::debug_ui;
use riso::desc::parse_trace_json;
use riso::field::SampleField;
use riso::im::Lum8Im;
use riso::pipeline::{extract_loops, extract_polygons, extract_segments};
use riso::stitch::Loop;

#[allow(dead_code)]
const TEST_JSON: &str = r#"
    {
        "version": 1,
        "threshold": 127.5,
        "interp": "value",
        "lookup": "indexed",
        "pad": true,
        "pad_fill": 0,
        "poly_scale": 1000,
        "max_loops": null,
        "tag": 0
    }
"#;

/// Synthetic test raster: a bright disc with a dark hole, plus a small
/// separate blob, so the output has an outer loop, a hole loop, and a
/// second component.
fn synth_im(dim: usize) -> Lum8Im {
    let mut im = Lum8Im::new(dim, dim);
    let c = dim as f32 / 2.0;
    let r_outer = dim as f32 * 0.32;
    let r_hole = dim as f32 * 0.12;
    let blob_c = dim as f32 * 0.14;
    let blob_r = dim as f32 * 0.07;

    for y in 0..dim {
        for x in 0..dim {
            let dx = x as f32 - c;
            let dy = y as f32 - c;
            let d = (dx * dx + dy * dy).sqrt();

            let bx = x as f32 - blob_c;
            let by = y as f32 - blob_c;
            let bd = (bx * bx + by * by).sqrt();

            let v: u8 = if (d < r_outer && d > r_hole) || bd < blob_r {
                255
            } else {
                0
            };
            unsafe {
                *im.get_unchecked_mut(x, y, 0) = v;
            }
        }
    }
    im
}

fn main() {
    // Debug UI collector (global). These calls are intended to stay in-place and become no-ops
    // in production builds by disabling the `debug_ui` feature.
    debug_ui::init("riso debug");

    let desc = parse_trace_json(TEST_JSON).expect("Failed to parse trace JSON");
    let cfg = desc.to_cfg();

    // Load a grayscale PNG if a path was given, otherwise trace a synthetic
    // raster.
    let im: Lum8Im = match std::env::args().nth(1) {
        #[cfg(feature = "im-io")]
        Some(path) => Lum8Im::load_png(&path)
            .unwrap_or_else(|e| panic!("failed to load {path}: {e}")),
        #[cfg(not(feature = "im-io"))]
        Some(_) => panic!("PNG loading requires the `im-io` feature"),
        None => synth_im(128),
    };
    println!("source: {}x{}", im.w, im.h);

    let field = if desc.pad {
        SampleField::from_lum8_padded(&im, desc.pad_fill, |v| v as f32)
    } else {
        SampleField::from_lum8(&im, |v| v as f32)
    };

    let segments = extract_segments(&field, &cfg);
    println!("segments: {}", segments.len());

    let loops = extract_loops(&field, &cfg);
    let closed = loops.iter().filter(|l| l.closed).count();
    let total_segs: usize = loops.iter().map(Loop::seg_count).sum();
    println!(
        "loops: {} ({closed} closed, {} open), {total_segs} segments stitched",
        loops.len(),
        loops.len() - closed
    );
    for (i, lp) in loops.iter().enumerate() {
        println!(
            "  loop {i}: {} points, closed={}",
            lp.points.len(),
            lp.closed
        );
    }

    let mpoly = extract_polygons(&field, &cfg);
    println!("polygons: {} paths at scale {}", mpoly.len(), cfg.poly_scale);

    debug_ui::add_lum8("source", &im);
    debug_ui::add_segments("iso segments", &im, &segments);
    debug_ui::show();
}
