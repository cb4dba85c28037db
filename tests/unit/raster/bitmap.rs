use super::*;

fn rep(px: u32, scale: f64) -> PixelBuffer {
    PixelBuffer::new(px, px, scale).unwrap()
}

#[test]
fn representations_are_sorted_and_unique() {
    let bmp = Bitmap::with_representations(
        Size::new(16.0, 16.0),
        vec![rep(48, 3.0), rep(16, 1.0), rep(32, 2.0), rep(32, 2.0)],
    )
    .unwrap();
    assert_eq!(bmp.scales(), vec![1.0, 2.0, 3.0]);
}

#[test]
fn best_representation_prefers_equal_or_denser() {
    let bmp =
        Bitmap::with_representations(Size::new(16.0, 16.0), vec![rep(16, 1.0), rep(48, 3.0)])
            .unwrap();
    assert_eq!(bmp.best_representation(1.0).unwrap().scale(), 1.0);
    assert_eq!(bmp.best_representation(2.0).unwrap().scale(), 3.0);
    assert_eq!(bmp.best_representation(4.0).unwrap().scale(), 3.0);
    assert!(bmp.representation(2.0).is_none());
}

#[test]
fn from_buffer_derives_logical_size() {
    let bmp = Bitmap::from_buffer(rep(36, 2.0));
    assert_eq!(bmp.size(), Size::new(18.0, 18.0));
    assert!(!bmp.is_empty());
}

#[test]
fn empty_when_no_reps_or_zero_area() {
    assert!(Bitmap::new(Size::new(10.0, 10.0)).is_empty());
    assert!(Bitmap::from_buffer(PixelBuffer::new(0, 0, 1.0).unwrap()).is_empty());
    assert!(Bitmap::with_representations(Size::new(-1.0, 1.0), vec![]).is_err());
}
