pub(crate) use super::*;

#[test]
fn test_from_vec() {
    let m = Matrix::<f64>::from_vec(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0])
        .expect("test data has correct dimensions: 2*3=6 elements");
    assert_eq!(m.shape(), (2, 3));
    assert!((m.get(0, 0) - 1.0).abs() < 1e-12);
    assert!((m.get(1, 2) - 6.0).abs() < 1e-12);
}

#[test]
fn test_from_vec_error() {
    let result = Matrix::<f64>::from_vec(2, 3, vec![1.0, 2.0, 3.0]);
    assert!(result.is_err());
}

#[test]
fn test_zeros() {
    let m = Matrix::zeros(2, 3);
    assert_eq!(m.shape(), (2, 3));
    assert!(m.as_slice().iter().all(|&x| x == 0.0));
    assert!(!m.is_square());
}

#[test]
fn test_set_and_row() {
    let mut m = Matrix::zeros(2, 2);
    m.set(1, 0, 4.0);
    assert_eq!(m.row(1), &[4.0, 0.0]);
    assert_eq!(m.row(0), &[0.0, 0.0]);
}

#[test]
fn test_matmul() {
    // 2x3 * 3x2 = 2x2
    let a = Matrix::from_vec(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0])
        .expect("test data has correct dimensions: 2*3=6 elements");
    let b = Matrix::from_vec(3, 2, vec![7.0, 8.0, 9.0, 10.0, 11.0, 12.0])
        .expect("test data has correct dimensions: 3*2=6 elements");
    let c = a
        .matmul(&b)
        .expect("matrix dimensions are compatible for multiplication: 2x3 * 3x2");

    assert_eq!(c.shape(), (2, 2));
    // c[0,0] = 1*7 + 2*9 + 3*11 = 58
    assert!((c.get(0, 0) - 58.0).abs() < 1e-12);
    // c[1,1] = 4*8 + 5*10 + 6*12 = 154
    assert!((c.get(1, 1) - 154.0).abs() < 1e-12);
}

#[test]
fn test_matmul_dimension_error() {
    let a = Matrix::zeros(2, 3);
    let b = Matrix::zeros(2, 3);
    assert!(a.matmul(&b).is_err());
}

#[test]
fn test_add_and_mul_scalar() {
    let a = Matrix::from_vec(1, 2, vec![1.0, 2.0]).expect("1x2");
    let b = Matrix::from_vec(1, 2, vec![0.5, 0.5]).expect("1x2");
    let c = a.add(&b).expect("same shape").mul_scalar(2.0);
    assert_eq!(c.as_slice(), &[3.0, 5.0]);
    assert!(a.add(&Matrix::zeros(2, 1)).is_err());
}

#[test]
fn test_row_sums() {
    let m = Matrix::from_vec(2, 2, vec![1.0, 2.0, 0.0, 0.0]).expect("2x2");
    assert_eq!(m.row_sums(), vec![3.0, 0.0]);
}

#[test]
fn test_max_abs_diff() {
    let a = Matrix::from_vec(1, 3, vec![1.0, -2.0, 3.0]).expect("1x3");
    let b = Matrix::from_vec(1, 3, vec![1.5, 2.0, 3.0]).expect("1x3");
    let diff = a.max_abs_diff(&b).expect("same shape");
    assert!((diff - 4.0).abs() < 1e-12);
}

#[test]
fn test_scale_rows_cols() {
    let m = Matrix::from_vec(2, 2, vec![1.0, 1.0, 1.0, 1.0]).expect("2x2");
    let s = m
        .scale_rows_cols(&[1.0, 2.0], &[3.0, 4.0])
        .expect("matching scales");
    assert_eq!(s.as_slice(), &[3.0, 4.0, 6.0, 8.0]);
    assert!(m.scale_rows_cols(&[1.0], &[1.0, 1.0]).is_err());
}

#[test]
fn test_max_abs_diff_reports_nan() {
    let a = Matrix::from_vec(1, 3, vec![f64::NAN, 0.0, 100.0]).expect("1x3");
    let b = Matrix::zeros(1, 3);
    assert!(a.max_abs_diff(&b).expect("same shape").is_nan());
    assert!(b.max_abs_diff(&a).expect("same shape").is_nan());
}

#[test]
fn test_find_entry() {
    let m = Matrix::from_vec(2, 2, vec![0.5, 1.0, -2.0, 3.0]).expect("2x2");
    assert_eq!(m.find_entry(|x| x >= 0.0), Some((1, 0, -2.0)));
    assert_eq!(m.find_entry(f64::is_finite), None);
}

#[test]
fn test_select() {
    let m = Matrix::from_vec(3, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]).expect("3x3");
    let s = m.select(&[0, 2], &[0, 2]);
    assert_eq!(s.shape(), (2, 2));
    assert_eq!(s.as_slice(), &[1.0, 3.0, 7.0, 9.0]);
    assert_eq!(m.select(&[], &[]).shape(), (0, 0));
}
