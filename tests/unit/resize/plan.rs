use super::*;
use crate::filter::kernels::Filter;
use crate::pipeline::arena::BudgetAllocator;
use crate::resize::config::SourceRegion;

fn dims(w: u32, h: u32) -> Dimensions {
    Dimensions::new(w, h).unwrap()
}

fn plan(input: (u32, u32), output: (u32, u32), config: &ResizeConfig) -> ResizeResult<ResizePlan> {
    ResizePlan::new(dims(input.0, input.1), dims(output.0, output.1), config)
}

#[test]
fn default_filters_follow_each_axis() {
    let p = plan((4, 8), (8, 4), &ResizeConfig::new(1)).unwrap();
    assert_eq!(p.horizontal.filter, Filter::CatmullRom);
    assert_eq!(p.vertical.filter, Filter::Mitchell);

    let p = plan((4, 8), (8, 4), &ResizeConfig::new(1).with_filter(Filter::Box)).unwrap();
    assert_eq!(p.horizontal.filter, Filter::Box);
    assert_eq!(p.vertical.filter, Filter::Box);
}

#[test]
fn memory_is_itemized_exactly() {
    let up = plan((4, 4), (8, 8), &ResizeConfig::new(1)).unwrap();
    assert_eq!(
        up.layout,
        MemoryLayout {
            horizontal_contributors: 16,
            horizontal_coefficients: 32,
            vertical_contributors: 16,
            vertical_coefficients: 32,
            decode_buffer: 8,
            horizontal_buffer: 0,
            ring_buffer: 40,
            encode_buffer: 8,
        }
    );
    assert_eq!(up.memory_required(), 152 * 4);

    let down = plan((8, 8), (4, 4), &ResizeConfig::new(1)).unwrap();
    assert_eq!(down.layout.horizontal_buffer, 4);
    assert_eq!(down.layout.encode_buffer, 0);
    assert_eq!(down.layout.ring_buffer, 36);
    assert_eq!(down.memory_required(), 248 * 4);
}

#[test]
fn far_subpixel_offsets_are_rejected() {
    let far = ResizeConfig::new(1).with_region(SourceRegion::Subpixel {
        scale: kurbo::Vec2::new(2.0, 2.0),
        offset: kurbo::Vec2::new(100.0, 0.0),
    });
    let err = plan((4, 4), (8, 8), &far).unwrap_err();
    assert!(err.to_string().contains("horizontal"), "{err}");

    let far = ResizeConfig::new(1).with_region(SourceRegion::Subpixel {
        scale: kurbo::Vec2::new(0.5, 0.5),
        offset: kurbo::Vec2::new(0.0, -50.0),
    });
    let err = plan((8, 8), (4, 4), &far).unwrap_err();
    assert!(err.to_string().contains("vertical"), "{err}");
}

#[test]
fn image_checks_run_before_any_work() {
    let p = plan((2, 2), (3, 3), &ResizeConfig::new(2)).unwrap();
    let src = [0u8; 8];
    let mut dst = [0u8; 18];

    let err = p
        .execute(ImageRef::new(&src[..7], 2, 2), ImageMut::new(&mut dst, 3, 3))
        .unwrap_err();
    assert!(matches!(err, ResizeError::Buffer(_)), "{err}");

    let err = p
        .execute(ImageRef::new(&src, 2, 2), ImageMut::new(&mut dst, 3, 2))
        .unwrap_err();
    assert!(err.to_string().contains("plan is 2x2 -> 3x3"), "{err}");

    let err = p
        .execute(
            ImageRef::new(&src, 2, 2).with_stride(3),
            ImageMut::new(&mut dst, 3, 3),
        )
        .unwrap_err();
    assert!(err.to_string().contains("shorter"), "{err}");

    let wide = [0.0f32; 8];
    let mut out = [0.0f32; 18];
    let err = p
        .execute(
            ImageRef::new(&wide, 2, 2).with_stride(18),
            ImageMut::new(&mut out, 3, 3),
        )
        .unwrap_err();
    assert!(err.to_string().contains("multiple"), "{err}");
    assert!(out.iter().all(|&v| v == 0.0));
}

#[test]
fn padded_strides_are_honored() {
    let p = plan((2, 2), (2, 2), &ResizeConfig::new(1).with_filter(Filter::Triangle)).unwrap();
    let src = [10u8, 20, 99, 30, 40];
    let mut dst = [0u8; 8];
    p.execute(
        ImageRef::new(&src, 2, 2).with_stride(3),
        ImageMut::new(&mut dst, 2, 2).with_stride(4),
    )
    .unwrap();
    assert_eq!(dst, [10, 20, 0, 0, 30, 40, 0, 0]);
}

#[test]
fn scratch_shortfall_is_an_allocation_error() {
    let p = plan((4, 4), (8, 8), &ResizeConfig::new(1)).unwrap();
    let src = [0.5f32; 16];
    let mut dst = [0.0f32; 64];
    let words = p.layout.total_words();

    let mut short = vec![0.0f32; words - 1];
    let err = p
        .execute_in(ImageRef::new(&src, 4, 4), ImageMut::new(&mut dst, 8, 8), &mut short)
        .unwrap_err();
    assert!(matches!(err, ResizeError::Allocation(_)), "{err}");

    let mut exact = vec![0.0f32; words];
    p.execute_in(ImageRef::new(&src, 4, 4), ImageMut::new(&mut dst, 8, 8), &mut exact)
        .unwrap();
    assert!(dst.iter().all(|v| (v - 0.5).abs() < 1e-5));
}

#[test]
fn budget_allocator_sees_the_exact_request() {
    let p = plan((4, 4), (8, 8), &ResizeConfig::new(1)).unwrap();
    let src = [0u8; 16];
    let mut dst = [0u8; 64];

    let mut tight = BudgetAllocator::new(p.memory_required() - 1);
    let err = p
        .execute_with(ImageRef::new(&src, 4, 4), ImageMut::new(&mut dst, 8, 8), &mut tight)
        .unwrap_err();
    assert!(matches!(err, ResizeError::Allocation(_)), "{err}");
    assert_eq!(tight.peak_request_bytes, p.memory_required());

    let mut enough = BudgetAllocator::new(p.memory_required());
    p.execute_with(ImageRef::new(&src, 4, 4), ImageMut::new(&mut dst, 8, 8), &mut enough)
        .unwrap();
}

#[test]
fn coefficient_tables_match_geometry() {
    let p = plan((5, 9), (12, 4), &ResizeConfig::new(3)).unwrap();
    let (h, v) = p.coefficient_tables();
    assert_eq!(h.contributors.len(), 12);
    assert_eq!(v.contributors.len(), 9 + 2 * p.vertical.pixel_margin);
    assert_eq!(h.geometry, p.horizontal);
}

#[test]
fn plans_serialize_for_inspection() {
    let p = plan((5, 9), (12, 4), &ResizeConfig::new(3)).unwrap();
    let json = serde_json::to_value(&p).unwrap();
    assert_eq!(json["horizontal"]["filter"], "catmull_rom");
    assert_eq!(json["vertical"]["filter"], "mitchell");
    assert_eq!(json["layout"]["encode_buffer"], 0);
    assert_eq!(json["input"]["width"], 5);
}
