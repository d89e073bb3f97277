use approx::assert_relative_eq;
use ndstride_kernel::{
    add, approximately_equal, broadcast_add, broadcast_multiply, matmul, multiply, ArrayError,
    NdArray,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn random_array(rng: &mut StdRng, dims: &[usize]) -> NdArray<f64> {
    NdArray::from_fn(dims, |_| rng.gen_range(-1.0..1.0))
}

fn make_tensor(rows: usize, cols: usize) -> NdArray<f64> {
    NdArray::from_fn(&[rows, cols], |idx| (idx[0] * cols + idx[1]) as f64)
}

/// Reference product over contiguous `[batch, m, k] x [batch, k, n]` inputs.
fn reference_bmm(a: &NdArray<f64>, b: &NdArray<f64>) -> NdArray<f64> {
    let (nb, m, k) = (a.dims()[0], a.dims()[1], a.dims()[2]);
    let n = b.dims()[2];
    NdArray::from_fn(&[nb, m, n], |idx| {
        let mut acc = 0.0;
        for p in 0..k {
            acc += a[[idx[0], idx[1], p]] * b[[idx[0], p, idx[2]]];
        }
        acc
    })
}

#[test]
fn test_add_transposed_operands() {
    init_logger();
    let a = make_tensor(6, 4);
    let a_t = a.clone().permuted(&[1, 0]).unwrap();
    let b = make_tensor(4, 6);

    let out = add(&a_t, &b).unwrap();
    assert_eq!(out.dims(), &[4, 6]);
    for i in 0..4 {
        for j in 0..6 {
            assert_relative_eq!(out[[i, j]], a[[j, i]] + b[[i, j]], epsilon = 1e-12);
        }
    }
}

#[test]
fn test_multiply_random() {
    let mut rng = StdRng::seed_from_u64(7);
    let a = random_array(&mut rng, &[3, 5, 2]);
    let b = random_array(&mut rng, &[3, 5, 2]);
    let out = multiply(&a, &b).unwrap();
    for ((&x, &y), &z) in a.iter().zip(b.iter()).zip(out.iter()) {
        assert_relative_eq!(z, x * y, epsilon = 1e-12);
    }
}

#[test]
fn test_add_is_commutative() {
    let mut rng = StdRng::seed_from_u64(11);
    let a = random_array(&mut rng, &[8, 8]);
    let b = random_array(&mut rng, &[8, 8]);
    assert!(approximately_equal(
        &add(&a, &b).unwrap(),
        &add(&b, &a).unwrap()
    ));
    assert!(approximately_equal(
        &multiply(&a, &b).unwrap(),
        &multiply(&b, &a).unwrap()
    ));
}

#[test]
fn test_large_elementwise() {
    init_logger();
    // Big enough to take the threaded path when `parallel` is enabled.
    let n = 3 * ndstride_kernel::MIN_THREAD_LENGTH + 5;
    let a = NdArray::from_fn(&[n], |idx| idx[0] as f64);
    let b = NdArray::full(&[n], 2.0f64);
    let out = multiply(&a, &b).unwrap();
    assert_eq!(out.size(), n);
    assert_eq!(out[[n - 1]], 2.0 * (n - 1) as f64);
    assert_eq!(out[[n / 2]], 2.0 * (n / 2) as f64);
}

#[test]
fn test_broadcast_column_and_row() {
    let col = NdArray::from_fn(&[4, 1], |idx| idx[0] as f64);
    let row = NdArray::from_fn(&[1, 5], |idx| 10.0 * idx[1] as f64);
    let sum = broadcast_add(&col, &row).unwrap();
    let prod = broadcast_multiply(&col, &row).unwrap();
    assert_eq!(sum.dims(), &[4, 5]);
    for i in 0..4 {
        for j in 0..5 {
            assert_eq!(sum[[i, j]], i as f64 + 10.0 * j as f64);
            assert_eq!(prod[[i, j]], i as f64 * 10.0 * j as f64);
        }
    }
}

#[test]
fn test_broadcast_error_reports_shapes() {
    let a = NdArray::<f64>::zeros(&[2, 3]);
    let b = NdArray::<f64>::zeros(&[4]);
    let err = broadcast_add(&a, &b).unwrap_err();
    assert_eq!(err, ArrayError::IncompatibleShapes(vec![2, 3], vec![4]));
    assert_eq!(err.to_string(), "incompatible shapes: [2, 3] vs [4]");
}

#[test]
fn test_matmul_random_batches() {
    init_logger();
    let mut rng = StdRng::seed_from_u64(42);
    let a = random_array(&mut rng, &[3, 4, 5]);
    let b = random_array(&mut rng, &[3, 5, 2]);
    let out = matmul(&a, &b).unwrap();
    let expected = reference_bmm(&a, &b);
    assert_eq!(out.dims(), expected.dims());
    for (&x, &y) in out.iter().zip(expected.iter()) {
        assert_relative_eq!(x, y, epsilon = 1e-12);
    }
}

#[test]
fn test_matmul_broadcast_batch_matches_reference() {
    let mut rng = StdRng::seed_from_u64(3);
    let a = random_array(&mut rng, &[4, 3]);
    let b = random_array(&mut rng, &[5, 3, 2]);
    let out = matmul(&a, &b).unwrap();
    assert_eq!(out.dims(), &[5, 4, 2]);

    let a_batched = NdArray::from_fn(&[5, 4, 3], |idx| a[[idx[1], idx[2]]]);
    let expected = reference_bmm(&a_batched, &b);
    for (&x, &y) in out.iter().zip(expected.iter()) {
        assert_relative_eq!(x, y, epsilon = 1e-12);
    }
}

#[test]
fn test_matmul_transposed_equals_contiguous() {
    let mut rng = StdRng::seed_from_u64(9);
    let a = random_array(&mut rng, &[6, 4]);
    let b = random_array(&mut rng, &[6, 3]);
    let a_t = a.permuted(&[1, 0]).unwrap();
    let lhs = matmul(&a_t, &b).unwrap();
    let rhs = matmul(&a_t.to_contiguous(), &b).unwrap();
    assert!(approximately_equal(&lhs, &rhs));
}
